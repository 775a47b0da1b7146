//! Single-slot hand-off between the capture thread and the detection worker.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use super::types::Frame;

#[derive(Debug, Default)]
struct SlotState {
    frame: Option<Frame>,
    closed: bool,
    dropped: u64,
}

/// Bounded queue of capacity one.
///
/// Offering a frame while another is still waiting replaces the waiting one,
/// so the consumer only ever sees the most recent capture. Replaced frames
/// are counted and never delivered.
#[derive(Debug, Default)]
pub struct LatestFrameSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

impl LatestFrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `frame`, returning the sequence number of the frame it
    /// superseded, if any. Frames offered after `close()` are discarded.
    pub fn offer(&self, frame: Frame) -> Option<u64> {
        let mut state = self.lock();
        if state.closed {
            return None;
        }
        let superseded = state.frame.replace(frame).map(|old| old.sequence);
        if let Some(seq) = superseded {
            state.dropped += 1;
            log::debug!("Dropped late frame {}", seq);
        }
        drop(state);
        self.ready.notify_one();
        superseded
    }

    /// Take the waiting frame without blocking.
    pub fn try_take(&self) -> Option<Frame> {
        self.lock().frame.take()
    }

    /// Block until a frame is available or the slot is closed.
    ///
    /// Returns `None` once closed, even if a frame is still waiting.
    pub fn take(&self) -> Option<Frame> {
        let mut state = self.lock();
        loop {
            if state.closed {
                return None;
            }
            if let Some(frame) = state.frame.take() {
                return Some(frame);
            }
            state = self.ready.wait(state).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Like `take`, but gives up after `timeout`.
    pub fn take_timeout(&self, timeout: Duration) -> Option<Frame> {
        let state = self.lock();
        let (mut state, _) = self
            .ready
            .wait_timeout_while(state, timeout, |s| !s.closed && s.frame.is_none())
            .unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return None;
        }
        state.frame.take()
    }

    /// Wake every waiter and refuse further frames.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.frame = None;
        drop(state);
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of frames superseded before the consumer reached them.
    pub fn dropped_count(&self) -> u64 {
        self.lock().dropped
    }
}

//! RenderLoop - the per-frame driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::error::LoopError;
use super::sink::RenderSink;
use super::state::{LoopState, LoopStats};
use super::ui::{UiHandle, UiThread};
use crate::detect::{try_detect, LandmarkSource};
use crate::frame::LatestFrameSlot;
use crate::geometry::{GeometryMapper, Size, DEFAULT_INSET};
use crate::overlay::{FrameUpdate, OverlayCompositor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOptions {
    pub inset: f64,
    /// Stop on its own after this many frames
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            inset: DEFAULT_INSET,
            max_frames: None,
        }
    }
}

/// State shared between the handle and the worker thread.
#[derive(Debug, Default)]
struct Shared {
    state: Mutex<LoopState>,
    stats: Mutex<LoopStats>,
    stop: AtomicBool,
}

impl Shared {
    fn set_state(&self, state: LoopState) {
        if let Ok(mut s) = self.state.lock() {
            *s = state;
        }
    }

    fn update_stats(&self, f: impl FnOnce(&mut LoopStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            f(&mut stats);
        }
    }
}

/// Drives detection, mapping and compositing for every frame that reaches
/// the slot.
///
/// One worker thread takes frames one at a time and blocks on detection;
/// frames that arrive meanwhile overwrite each other in the slot, so only
/// the newest is processed next. Results go to the UI thread in capture
/// order.
pub struct RenderLoop {
    slot: Arc<LatestFrameSlot>,
    shared: Arc<Shared>,
    viewport: Arc<RwLock<Size>>,
    worker: Option<JoinHandle<()>>,
    ui: Option<UiThread>,
    ui_handle: UiHandle,
}

impl RenderLoop {
    /// Spawn the UI thread (owning `compositor`) and the worker.
    ///
    /// The worker blocks on `slot` until the capture side offers a frame,
    /// so the loop can be started before capture is.
    ///
    /// # Arguments
    /// * `slot` - Latest-frame slot shared with the capture thread
    /// * `source` - Detector called once per taken frame
    /// * `compositor` - Moved onto the UI thread; returned by `stop()`
    /// * `sink` - Receives every committed scene on the UI thread
    /// * `options` - Mapping inset and optional frame limit
    ///
    /// # Errors
    /// * `LoopError::Spawn` - either thread could not be spawned
    pub fn start(
        slot: Arc<LatestFrameSlot>,
        source: Box<dyn LandmarkSource>,
        compositor: OverlayCompositor,
        sink: Box<dyn RenderSink>,
        options: LoopOptions,
    ) -> Result<Self, LoopError> {
        // The worker maps into the compositor's initial size until resized
        let viewport = Arc::new(RwLock::new(compositor.viewport()));
        let ui = UiThread::spawn(compositor, sink)?;
        let ui_handle = ui.handle();
        let shared = Arc::new(Shared::default());

        let worker = Worker {
            slot: Arc::clone(&slot),
            shared: Arc::clone(&shared),
            viewport: Arc::clone(&viewport),
            ui: ui.handle(),
            source,
            options,
        };
        let handle = thread::Builder::new()
            .name("render-worker".to_string())
            .spawn(move || worker.run())
            .map_err(|source| LoopError::Spawn {
                name: "render-worker",
                source,
            })?;

        log::info!("Render loop started");
        Ok(Self {
            slot,
            shared,
            viewport,
            worker: Some(handle),
            ui: Some(ui),
            ui_handle,
        })
    }

    pub fn state(&self) -> LoopState {
        self.shared
            .state
            .lock()
            .map(|s| *s)
            .unwrap_or(LoopState::Stopped)
    }

    pub fn stats(&self) -> LoopStats {
        self.shared
            .stats
            .lock()
            .map(|s| *s)
            .unwrap_or_default()
    }

    /// Map later frames into `viewport` and resize the compositor.
    ///
    /// Updates already mapped into the old size still carry that size, so
    /// each presented scene pairs its viewport with matching regions.
    ///
    /// # Errors
    /// * `LoopError::UiDisconnected` - the UI thread has exited
    pub fn set_viewport(&self, viewport: Size) -> Result<(), LoopError> {
        self.ui_handle.set_viewport(viewport)?;
        if let Ok(mut v) = self.viewport.write() {
            *v = viewport;
        }
        Ok(())
    }

    /// True once the worker has exited (frame limit reached or stopped).
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Poll until `processed` reaches `frames`, the worker exits, or
    /// `timeout` elapses. Returns whether the count was reached.
    pub fn wait_for_processed(&self, frames: u64, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.stats().processed >= frames {
                return true;
            }
            if self.is_finished() || start.elapsed() > timeout {
                return self.stats().processed >= frames;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Stop the worker, flush the UI thread and return the compositor.
    ///
    /// A detection call in progress runs to completion first.
    pub fn stop(mut self) -> Result<OverlayCompositor, LoopError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<OverlayCompositor, LoopError> {
        self.shared.stop.store(true, Ordering::SeqCst);
        self.slot.close();
        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| LoopError::Panicked("render-worker"))?;
        }
        let ui = self.ui.take().ok_or(LoopError::UiDisconnected)?;
        let compositor = ui.shutdown()?;
        log::info!("Render loop stopped: {}", self.stats());
        Ok(compositor)
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if self.ui.is_some() {
            let _ = self.shutdown();
        }
    }
}

struct Worker {
    slot: Arc<LatestFrameSlot>,
    shared: Arc<Shared>,
    viewport: Arc<RwLock<Size>>,
    ui: UiHandle,
    source: Box<dyn LandmarkSource>,
    options: LoopOptions,
}

impl Worker {
    fn run(mut self) {
        let mut processed = 0u64;

        while !self.shared.stop.load(Ordering::SeqCst) {
            self.shared.set_state(LoopState::Capturing);
            let Some(frame) = self.slot.take() else {
                break;
            };

            self.shared.set_state(LoopState::Detecting);
            let result = try_detect(self.source.as_mut(), &frame);
            let sequence = frame.sequence;
            drop(frame);

            processed += 1;
            let dropped = self.slot.dropped_count();
            self.shared.update_stats(|s| {
                s.processed = processed;
                s.dropped = dropped;
            });

            match result {
                Err(e) => {
                    log::warn!("Detection failed on frame {}: {}", sequence, e);
                    self.shared.update_stats(|s| s.detection_failures += 1);
                }
                Ok(faces) => {
                    self.shared.set_state(LoopState::Mapping);
                    if faces.is_empty() {
                        self.shared.update_stats(|s| s.empty += 1);
                    }
                    let viewport = self.viewport.read().map(|v| *v).unwrap_or_default();
                    let mapper = GeometryMapper::with_inset(viewport, self.options.inset);
                    let update = FrameUpdate {
                        sequence,
                        viewport,
                        faces: faces.iter().map(|f| mapper.map_face(f)).collect(),
                    };

                    self.shared.set_state(LoopState::Compositing);
                    if let Err(e) = self.ui.commit(update) {
                        log::error!("Stopping render loop: {}", e);
                        break;
                    }
                    self.shared.update_stats(|s| s.committed += 1);
                }
            }

            if self.options.max_frames.is_some_and(|max| processed >= max) {
                log::info!("Processed {} frames, stopping", processed);
                break;
            }
        }

        self.shared.set_state(LoopState::Stopped);
    }
}

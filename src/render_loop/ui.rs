//! The UI thread: sole owner of the compositor.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::error::LoopError;
use super::sink::RenderSink;
use crate::geometry::Size;
use crate::overlay::{FrameUpdate, OverlayCompositor};

pub enum UiCommand {
    Commit(FrameUpdate),
    SetViewport(Size),
    Shutdown,
}

/// Cloneable handle for queueing work onto the UI thread.
///
/// Commands are applied in the order they were sent.
#[derive(Debug, Clone)]
pub struct UiHandle {
    sender: Sender<UiCommand>,
}

impl UiHandle {
    pub fn commit(&self, update: FrameUpdate) -> Result<(), LoopError> {
        self.send(UiCommand::Commit(update))
    }

    pub fn set_viewport(&self, viewport: Size) -> Result<(), LoopError> {
        self.send(UiCommand::SetViewport(viewport))
    }

    fn send(&self, command: UiCommand) -> Result<(), LoopError> {
        self.sender
            .send(command)
            .map_err(|_| LoopError::UiDisconnected)
    }
}

/// Dedicated thread that applies updates to the compositor and presents
/// the resulting scene. No other thread touches sprites or the debug layer.
pub struct UiThread {
    handle: UiHandle,
    thread: Option<JoinHandle<OverlayCompositor>>,
}

impl UiThread {
    /// Move `compositor` and `sink` onto a new thread named `ui`.
    ///
    /// # Errors
    /// * `LoopError::Spawn` - the thread could not be spawned
    pub fn spawn(
        compositor: OverlayCompositor,
        sink: Box<dyn RenderSink>,
    ) -> Result<Self, LoopError> {
        let (sender, receiver) = unbounded();
        let thread = thread::Builder::new()
            .name("ui".to_string())
            .spawn(move || run_ui(compositor, sink, receiver))
            .map_err(|source| LoopError::Spawn { name: "ui", source })?;

        Ok(Self {
            handle: UiHandle { sender },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    /// Drain pending commands, stop the thread and hand back the compositor.
    pub fn shutdown(mut self) -> Result<OverlayCompositor, LoopError> {
        self.join()
    }

    fn join(&mut self) -> Result<OverlayCompositor, LoopError> {
        let _ = self.handle.send(UiCommand::Shutdown);
        let thread = self.thread.take().ok_or(LoopError::UiDisconnected)?;
        thread.join().map_err(|_| LoopError::Panicked("ui"))
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.join();
        }
    }
}

fn run_ui(
    mut compositor: OverlayCompositor,
    mut sink: Box<dyn RenderSink>,
    receiver: Receiver<UiCommand>,
) -> OverlayCompositor {
    for command in receiver.iter() {
        match command {
            UiCommand::Commit(update) => {
                compositor.commit(&update);
                sink.present(&compositor.scene());
            }
            UiCommand::SetViewport(viewport) => compositor.set_viewport(viewport),
            UiCommand::Shutdown => break,
        }
    }
    compositor
}

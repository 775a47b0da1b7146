//! Capture session handle and background capture thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::error::CaptureError;
use super::ingest::FrameIngest;
use super::slot::LatestFrameSlot;
use super::source::FrameSource;
use super::types::{CameraSettings, Resolution};

/// Capture session handle.
///
/// Owns a frame source until `start()`, which moves it onto a background
/// thread. That thread pulls frames, corrects their orientation and offers
/// them to a [`LatestFrameSlot`]; a frame the consumer has not reached yet
/// is simply replaced.
pub struct CaptureSession {
    source: Option<Box<dyn FrameSource>>,
    capture_thread: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    settings: CameraSettings,
    /// Actual resolution (set after the source opens)
    actual_resolution: Option<Resolution>,
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("settings", &self.settings)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl CaptureSession {
    /// Validate `settings` and take ownership of `source`.
    ///
    /// # Errors
    /// * `CaptureError::ConfigurationRejected` - zero resolution or frame rate
    pub fn open(
        settings: CameraSettings,
        source: Box<dyn FrameSource>,
    ) -> Result<Self, CaptureError> {
        if settings.resolution.is_empty() {
            return Err(CaptureError::ConfigurationRejected(format!(
                "resolution {} has no pixels",
                settings.resolution
            )));
        }
        if settings.fps == 0 {
            return Err(CaptureError::ConfigurationRejected(
                "frame rate must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            source: Some(source),
            capture_thread: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            settings,
            actual_resolution: None,
        })
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Resolution reported by the source, `None` before `start()`.
    pub fn actual_resolution(&self) -> Option<Resolution> {
        self.actual_resolution
    }

    /// Start capturing into `slot`.
    ///
    /// Blocks until the source has opened (or failed to) on the capture
    /// thread.
    ///
    /// # Errors
    /// * `CaptureError::AlreadyRunning` - capture is already running
    /// * `CaptureError::NoSource` - the source was consumed by an earlier start
    /// * whatever the source's `open` reports
    pub fn start(&mut self, slot: Arc<LatestFrameSlot>) -> Result<(), CaptureError> {
        if self.is_running() {
            return Err(CaptureError::AlreadyRunning);
        }
        let source = self.source.take().ok_or(CaptureError::NoSource)?;

        self.stop_signal.store(false, Ordering::SeqCst);
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();
        let (info_tx, info_rx) = mpsc::channel::<Result<Resolution, CaptureError>>();

        let handle = thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || run_capture_loop(settings, source, slot, stop, info_tx))
            .map_err(|e| CaptureError::StreamFailed(e.to_string()))?;
        self.capture_thread = Some(handle);

        match info_rx.recv() {
            Ok(Ok(res)) => {
                log::info!("Capture started at {} ({} fps)", res, self.settings.fps);
                self.actual_resolution = Some(res);
                Ok(())
            }
            Ok(Err(e)) => {
                self.join();
                Err(e)
            }
            Err(_) => {
                self.join();
                Err(CaptureError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ))
            }
        }
    }

    /// Signal the capture thread to stop and wait for it.
    pub fn stop(&mut self) {
        self.join();
    }

    fn join(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_capture_loop(
    settings: CameraSettings,
    mut source: Box<dyn FrameSource>,
    slot: Arc<LatestFrameSlot>,
    stop: Arc<AtomicBool>,
    info_tx: Sender<Result<Resolution, CaptureError>>,
) {
    match source.open(&settings) {
        Ok(res) => {
            let _ = info_tx.send(Ok(res));
        }
        Err(e) => {
            log::error!("Failed to open {}: {}", source.name(), e);
            let _ = info_tx.send(Err(e));
            return;
        }
    }

    let interval = Duration::from_secs_f64(1.0 / settings.fps as f64);
    let mut ingest = FrameIngest::new(settings.front_facing, settings.correction);

    while !stop.load(Ordering::Relaxed) && !slot.is_closed() {
        let Some(raw) = source.next_frame() else {
            log::info!("{} reached end of stream", source.name());
            break;
        };
        match ingest.ingest(raw) {
            Ok(frame) => {
                slot.offer(frame);
            }
            // A malformed buffer is skipped; the next one replaces it anyway
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
        thread::sleep(interval);
    }
}

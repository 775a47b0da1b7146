//! Render sinks: the boundary to whatever actually draws the overlay.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::overlay::Scene;

/// Receives the committed scene after every update on the UI thread.
pub trait RenderSink: Send {
    fn present(&mut self, scene: &Scene);
}

/// Logs a one-line summary of each scene.
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn present(&mut self, scene: &Scene) {
        let placed: Vec<String> = scene
            .sprites
            .iter()
            .filter(|s| s.is_shown())
            .filter_map(|s| {
                s.transform.frame.map(|r| {
                    format!("{}@({:.0},{:.0} {:.0}x{:.0})", s.feature, r.x, r.y, r.width, r.height)
                })
            })
            .collect();
        log::info!(
            "frame {}: {} shapes, sprites [{}]",
            scene.sequence.map_or_else(|| "-".to_string(), |s| s.to_string()),
            scene.shapes.len(),
            placed.join(", ")
        );
    }
}

/// Writes each scene as one line of JSON.
pub struct JsonSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> RenderSink for JsonSink<W> {
    fn present(&mut self, scene: &Scene) {
        let result = serde_json::to_writer(&mut self.writer, scene)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            log::warn!("Failed to write scene: {}", e);
        }
    }
}

/// Keeps every presented scene; cloned handles share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    scenes: Arc<Mutex<Vec<Scene>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> Vec<Scene> {
        self.scenes
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl RenderSink for RecordingSink {
    fn present(&mut self, scene: &Scene) {
        if let Ok(mut scenes) = self.scenes.lock() {
            scenes.push(scene.clone());
        }
    }
}

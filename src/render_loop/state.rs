//! Loop state and counters.

use std::fmt;

use serde::Serialize;

/// Where the worker currently is in its per-frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    #[default]
    Idle,
    /// Waiting for the next frame
    Capturing,
    Detecting,
    Mapping,
    /// Update handed to the UI thread
    Compositing,
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoopState::Idle => "idle",
            LoopState::Capturing => "capturing",
            LoopState::Detecting => "detecting",
            LoopState::Mapping => "mapping",
            LoopState::Compositing => "compositing",
            LoopState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoopStats {
    /// Frames taken from the slot, whatever the detection outcome
    pub processed: u64,
    /// Frames superseded before the worker reached them
    pub dropped: u64,
    pub detection_failures: u64,
    /// Frames with no face
    pub empty: u64,
    /// Updates sent to the UI thread
    pub committed: u64,
}

impl fmt::Display for LoopStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} dropped, {} failed, {} without faces, {} committed",
            self.processed, self.dropped, self.detection_failures, self.empty, self.committed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(LoopState::default(), LoopState::Idle);
        assert_eq!(format!("{}", LoopState::Compositing), "compositing");
    }

    #[test]
    fn test_stats_display() {
        let stats = LoopStats {
            processed: 3,
            dropped: 1,
            ..LoopStats::default()
        };
        assert!(format!("{}", stats).starts_with("3 processed, 1 dropped"));
    }
}

//! Render loop error types.

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("Failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        source: std::io::Error,
    },

    #[error("UI thread is no longer receiving updates")]
    UiDisconnected,

    #[error("{0} thread panicked")]
    Panicked(&'static str),
}

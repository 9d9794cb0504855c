use std::error::Error as StdError;

use thiserror::Error;

/// Uttercut's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Uttercut's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs. The refine/slice cores report typed variants;
/// glue code (subprocess handling, file I/O) flows in through the `From` impls below.
#[derive(Debug, Error)]
pub enum Error {
    /// Caption segments were not in nondecreasing start-time order.
    ///
    /// The refiner validates ordering up front and fails fast rather than silently
    /// mis-merging. `index` is the position of the out-of-order segment.
    #[error("caption segment {index} starts before its predecessor")]
    InvalidSegmentSequence { index: usize },

    /// The audio buffer handed to the slicer was unusable (empty, or a zero sample rate).
    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    /// A collaborator (playlist listing, caption fetch, audio download) failed.
    ///
    /// Per-video fetch failures are recoverable: the orchestrator logs them and moves
    /// on to the next video instead of aborting the playlist.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

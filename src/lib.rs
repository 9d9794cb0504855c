//! `uttercut` — prepare speech-training datasets from YouTube playlists.
//!
//! This crate provides:
//! - Caption segment refinement (noise filtering + temporal merging)
//! - Audio slicing into per-utterance clips aligned to caption timing
//! - Playlist orchestration over a pluggable video source
//! - WAV clip output plus a pipe-separated transcript index
//!
//! The refine and slice cores are pure, synchronous functions; everything
//! network-facing sits behind the [`source::VideoSource`] trait, with the
//! shipped implementation shelling out to `yt-dlp`.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Segment data model and the refinement core.
pub mod refine;
pub mod segments;

// Audio slicing and normalization.
pub mod clip;
pub mod resample;
pub mod wav;

// Caption wire format.
pub mod json3;

// Collaborator seam and the yt-dlp-backed implementation.
pub mod source;
pub mod ytdlp;

// Transcript index output.
pub mod metadata;

// Logging configuration and control.
pub mod logging;

mod error;

pub use error::{Error, Result};

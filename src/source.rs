//! The collaborator seam between the pipeline and the outside world.
//!
//! Playlist enumeration, caption fetching, and audio downloading are external
//! concerns with a narrow contract. Keeping them behind a trait lets the
//! pipeline run against the real `yt-dlp`-backed implementation in production
//! and an in-memory fake in tests.

use std::path::Path;

use crate::error::Result;
use crate::segments::CaptionSegment;

/// Provider of playlist listings, captions, and audio for the pipeline.
///
/// All methods may fail with [`crate::Error::Fetch`] when a video is
/// unavailable or lacks the requested data; the pipeline treats those failures
/// as per-video and keeps going.
pub trait VideoSource {
    /// List the video ids in a playlist, in playlist order.
    ///
    /// When `only_captions` is set, videos without caption tracks are omitted.
    fn list_video_ids(&self, playlist_url: &str, only_captions: bool) -> Result<Vec<String>>;

    /// Fetch the caption track for one video, ordered by start time.
    fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionSegment>>;

    /// Download one video's full audio as mono samples at `sample_rate`.
    ///
    /// The download is transiently materialized at `staging_wav` (the caller
    /// removes it after slicing); the returned buffer is the normalized
    /// waveform ready for the slicer.
    fn fetch_audio(
        &self,
        video_id: &str,
        sample_rate: u32,
        staging_wav: &Path,
    ) -> Result<Vec<f32>>;
}

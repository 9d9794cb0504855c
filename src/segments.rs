use serde::{Deserialize, Serialize};

/// A timed transcript entry as returned by the caption fetcher.
///
/// Invariants: `start >= 0.0`, `duration >= 0.0`. Segments are immutable once
/// fetched; refinement produces new merged instances rather than mutating these
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,

    /// Offset from the beginning of the video, in seconds.
    pub start: f64,

    /// Length of the segment, in seconds.
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End of the segment's span, in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A caption segment that survived refinement.
///
/// Same shape as [`CaptionSegment`], but with stronger guarantees established at
/// creation time: the seeding segment lasted at least a second, its text holds
/// more than one word, and no non-speech marker appears in it. The span may have
/// been extended by merging in later segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefinedSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl RefinedSegment {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

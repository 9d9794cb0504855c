//! Audio slicing.
//!
//! Given a full-length decoded waveform and the refined segment list, compute
//! the sample range each utterance covers and carve out one owned clip per
//! segment. Like refinement, this is pure: no I/O, no retries, deterministic.

use crate::error::{Error, Result};
use crate::segments::RefinedSegment;

/// A mono slice of a source waveform plus the rate it was sampled at.
///
/// Clips own their samples; nothing aliases back into the source buffer, whose
/// lifetime ends with the per-video processing step.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    /// Clip length in seconds.
    pub fn seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Cut one clip per refined segment out of a source waveform.
///
/// Sample offsets are computed as `ceil(rate * seconds)` on both ends, giving a
/// half-open `[start_index, end_index)` range. A range reaching past the end of
/// the source is truncated to the available samples; a segment lying entirely
/// beyond the source yields a zero-length clip rather than an error. Zero-length
/// clips are passed through, not filtered; callers decide whether to keep them.
///
/// Fails with [`Error::InvalidAudio`] when the source buffer is empty or the
/// sample rate is zero.
pub fn slice_clips(
    source: &[f32],
    sample_rate: u32,
    segments: &[RefinedSegment],
) -> Result<Vec<(String, AudioClip)>> {
    if source.is_empty() {
        return Err(Error::InvalidAudio("source buffer is empty".to_string()));
    }
    if sample_rate == 0 {
        return Err(Error::InvalidAudio("sample rate must be positive".to_string()));
    }

    let rate = f64::from(sample_rate);
    let mut clips = Vec::with_capacity(segments.len());

    for segment in segments {
        let start_index = (rate * segment.start).ceil() as usize;
        let end_index = (rate * segment.end()).ceil() as usize;

        let start_index = start_index.min(source.len());
        let end_index = end_index.min(source.len());

        let clip = AudioClip {
            samples: source[start_index..end_index].to_vec(),
            sample_rate,
        };
        clips.push((segment.text.clone(), clip));
    }

    Ok(clips)
}

//! Caption segment refinement.
//!
//! Raw auto-generated captions are noisy: music tags, one-word fragments, and
//! sub-second slivers that make poor training utterances. This module collapses
//! a raw caption stream into a smaller sequence of coherent utterances by:
//! - merging segments whose gap to the in-progress utterance is small enough
//!   that they read as continuous speech
//! - dropping segments that cannot seed an utterance on their own (markers,
//!   too short, too few words)
//!
//! The pass is a single left-to-right sweep with one explicit "pending"
//! accumulator held in a local variable. It is pure and deterministic: no I/O,
//! no shared state, same input always yields the same output.

use tracing::debug;

use crate::error::{Error, Result};
use crate::segments::{CaptionSegment, RefinedSegment};

/// Maximum gap (seconds) between the pending utterance and the next segment
/// for the two to merge.
///
/// The comparison is strict: a gap of exactly this value closes the pending
/// utterance. Negative gaps (overlapping captions) always merge.
pub const MERGE_GAP_SECONDS: f64 = 0.2;

/// Minimum duration (seconds) for a segment to seed an utterance or for the
/// trailing accumulator to be emitted.
///
/// Distinct from [`MERGE_GAP_SECONDS`]; the two thresholds are unrelated and
/// must not be conflated.
pub const MIN_SEGMENT_SECONDS: f64 = 1.0;

/// Caption tags that denote non-speech audio. A segment containing any of
/// these can never seed an utterance.
pub const NON_SPEECH_MARKERS: &[&str] = &["[Music]", "[Applause]", "[Laughter]"];

/// Whether a segment can stand alone: no non-speech marker in the text, more
/// than one whitespace-separated word, and a duration of at least
/// [`MIN_SEGMENT_SECONDS`].
fn valid(text: &str, duration: f64) -> bool {
    if NON_SPEECH_MARKERS.iter().any(|m| text.contains(m)) {
        return false;
    }

    if text.split_whitespace().count() <= 1 {
        return false;
    }

    duration >= MIN_SEGMENT_SECONDS
}

/// Refine an ordered caption stream into merged, noise-free utterances.
///
/// Input must be in nondecreasing `start` order; we validate this up front and
/// return [`Error::InvalidSegmentSequence`] rather than silently mis-merging.
///
/// Algorithm (one pass, O(n)):
/// - While an utterance is pending, any next segment whose gap is strictly
///   under [`MERGE_GAP_SECONDS`] is absorbed into it, valid or not: the text is
///   appended with a single space and the span extends through the end of the
///   absorbed segment (overlaps included). Short trailing fragments belong to
///   the utterance they follow.
/// - A segment past the merge gap closes the pending utterance. It seeds the
///   next one only if it passes [`valid`]; noise is discarded.
/// - The trailing accumulator is emitted only if it still passes the full
///   validity predicate. An accumulator that absorbed a marker tag is silently
///   dropped, not repaired.
pub fn refine(segments: &[CaptionSegment]) -> Result<Vec<RefinedSegment>> {
    for (index, pair) in segments.windows(2).enumerate() {
        if pair[1].start < pair[0].start {
            return Err(Error::InvalidSegmentSequence { index: index + 1 });
        }
    }

    let mut refined: Vec<RefinedSegment> = Vec::new();
    let mut pending: Option<RefinedSegment> = None;

    for item in segments {
        if let Some(mut acc) = pending.take() {
            let gap = item.start - acc.end();
            if gap < MERGE_GAP_SECONDS {
                acc.text.push(' ');
                acc.text.push_str(&item.text);
                acc.duration = (item.start - acc.start) + item.duration;
                pending = Some(acc);
                continue;
            }

            // Mid-stream utterances are emitted as-is: they were seeded by a
            // valid segment, and absorbed fragments only ever extended them.
            refined.push(acc);
        }

        if valid(&item.text, item.duration) {
            pending = Some(RefinedSegment {
                text: item.text.clone(),
                start: item.start,
                duration: item.duration,
            });
        }
    }

    if let Some(last) = pending.take() {
        if valid(&last.text, last.duration) {
            refined.push(last);
        }
    }

    debug!(
        input = segments.len(),
        output = refined.len(),
        "refined caption segments"
    );

    Ok(refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, start: f64, duration: f64) -> CaptionSegment {
        CaptionSegment::new(text, start, duration)
    }

    #[test]
    fn drops_non_speech_markers() -> anyhow::Result<()> {
        let out = refine(&[seg("[Music]", 0.0, 3.0)])?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn drops_single_word_segments() -> anyhow::Result<()> {
        let out = refine(&[seg("hello", 0.0, 2.0)])?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn duration_exactly_one_second_is_valid() -> anyhow::Result<()> {
        let out = refine(&[seg("hello there", 0.0, 1.0)])?;
        assert_eq!(out.len(), 1);
        Ok(())
    }

    #[test]
    fn duration_just_under_one_second_is_dropped() -> anyhow::Result<()> {
        let out = refine(&[seg("hello there", 0.0, 0.999)])?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn short_fragment_still_merges_into_a_valid_utterance() -> anyhow::Result<()> {
        // 0.999s alone is dropped, but close behind a valid seed it is absorbed.
        let out = refine(&[seg("hello there", 0.0, 1.0), seg("friend", 1.1, 0.999)])?;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "hello there friend");
        assert!((out[0].duration - 2.099).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn gap_exactly_at_threshold_does_not_merge() -> anyhow::Result<()> {
        let out = refine(&[seg("first part", 0.0, 1.0), seg("second part", 1.2, 1.0)])?;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "first part");
        assert_eq!(out[1].text, "second part");
        Ok(())
    }

    #[test]
    fn gap_just_under_threshold_merges() -> anyhow::Result<()> {
        let out = refine(&[
            seg("first part", 0.0, 1.0),
            seg("second part", 1.1999, 1.0),
        ])?;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "first part second part");
        assert_eq!(out[0].start, 0.0);
        assert!((out[0].duration - 2.1999).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn overlapping_segments_are_absorbed() -> anyhow::Result<()> {
        // Second segment starts before the first ends (negative gap).
        let out = refine(&[seg("hello world", 3.1, 1.5), seg("over there", 4.5, 1.0)])?;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "hello world over there");
        // Span extends through the end of the later segment: (4.5 - 3.1) + 1.0.
        assert!((out[0].duration - 2.4).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn distant_marker_does_not_seed_and_pending_is_flushed() -> anyhow::Result<()> {
        let out = refine(&[
            seg("first utterance", 0.0, 1.0),
            seg("[Music]", 5.0, 3.0),
            seg("second utterance", 10.0, 1.0),
        ])?;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "first utterance");
        assert_eq!(out[1].text, "second utterance");
        Ok(())
    }

    #[test]
    fn trailing_accumulator_that_absorbed_a_marker_is_dropped() -> anyhow::Result<()> {
        // The marker lands inside the merge gap, poisoning the accumulator; the
        // final revalidation throws the whole utterance away.
        let out = refine(&[seg("last real words", 0.0, 1.5), seg("[Music]", 1.6, 2.0)])?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn out_of_order_input_fails_fast() {
        let err = refine(&[seg("hello there", 5.0, 1.0), seg("too early", 1.0, 1.0)])
            .unwrap_err();
        match err {
            Error::InvalidSegmentSequence { index } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn refine_is_idempotent_on_well_separated_output() -> anyhow::Result<()> {
        let input = vec![
            seg("one two three", 0.0, 2.0),
            seg("four five six", 3.0, 2.0),
            seg("seven eight nine", 6.0, 1.5),
        ];
        let once = refine(&input)?;

        let as_captions: Vec<CaptionSegment> = once
            .iter()
            .map(|r| CaptionSegment::new(r.text.clone(), r.start, r.duration))
            .collect();
        let twice = refine(&as_captions)?;

        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn output_preserves_start_order() -> anyhow::Result<()> {
        let input = vec![
            seg("a b", 0.0, 1.0),
            seg("c d", 2.0, 1.0),
            seg("e f", 2.05, 1.0),
            seg("[Music]", 4.0, 2.0),
            seg("g h", 7.0, 1.0),
        ];
        let out = refine(&input)?;
        for pair in out.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        Ok(())
    }

    #[test]
    fn end_to_end_music_then_merge() -> anyhow::Result<()> {
        // Marker dropped; the next two overlap (gap = 4.5 - 4.6 = -0.1) and merge
        // even though "there" could not stand alone.
        let out = refine(&[
            seg("[Music]", 0.0, 3.0),
            seg("hello world", 3.1, 1.5),
            seg("there", 4.5, 0.5),
        ])?;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "hello world there");
        assert_eq!(out[0].start, 3.1);
        assert!((out[0].duration - 1.9).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_output() -> anyhow::Result<()> {
        assert!(refine(&[])?.is_empty());
        Ok(())
    }
}

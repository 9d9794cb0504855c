//! Playlist orchestration.
//!
//! Drives the per-video pipeline: fetch captions → refine → download audio →
//! slice → write clips and transcripts. The pipeline is deliberately thin; all
//! of the interesting behavior lives in [`crate::refine`] and [`crate::clip`].
//!
//! Failure policy: a failure on one video is logged with its id and reason and
//! that video is skipped; the playlist keeps going. Only failures before any
//! per-video work starts (listing the playlist, opening the output directory)
//! abort the run. The final [`PlaylistReport`] tells callers whether anything
//! was skipped.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::clip::slice_clips;
use crate::error::Result;
use crate::metadata::MetadataWriter;
use crate::opts::Opts;
use crate::refine::refine;
use crate::source::VideoSource;
use crate::wav;

/// Outcome of one playlist run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistReport {
    /// Videos fully processed (including ones that produced zero clips).
    pub processed: usize,

    /// Videos skipped due to a per-video failure.
    pub skipped: usize,

    /// Total clips written to disk.
    pub clips_written: usize,
}

impl PlaylistReport {
    /// Whether every listed video was processed.
    pub fn all_succeeded(&self) -> bool {
        self.skipped == 0
    }
}

/// Process every video in a playlist into per-utterance clips.
///
/// Clips land at `{output_dir}/{video_id}_{i:04}.wav` (1-based segment index)
/// with one transcript line per written clip in `metadata.csv`. Each video's
/// full download is transiently materialized at `{output_dir}/{video_id}_audio.wav`
/// and removed once its clips are cut.
pub fn run_playlist(
    source: &impl VideoSource,
    playlist_url: &str,
    opts: &Opts,
) -> Result<PlaylistReport> {
    std::fs::create_dir_all(&opts.output_dir)?;

    let video_ids = source.list_video_ids(playlist_url, opts.only_captions)?;
    let mut metadata = MetadataWriter::open(&opts.output_dir, opts.overwrite_metadata)?;

    let mut report = PlaylistReport {
        processed: 0,
        skipped: 0,
        clips_written: 0,
    };

    for video_id in &video_ids {
        match process_video(source, video_id, opts, &mut metadata) {
            Ok(written) => {
                report.processed += 1;
                report.clips_written += written;
            }
            Err(err) => {
                warn!(video_id, error = %err, "skipping video");
                report.skipped += 1;
            }
        }
    }

    metadata.flush()?;

    info!(
        processed = report.processed,
        skipped = report.skipped,
        clips = report.clips_written,
        "playlist run finished"
    );
    Ok(report)
}

/// Run the fetch → refine → download → slice → write pipeline for one video.
///
/// Returns the number of clips written. The refine step runs before the audio
/// download so videos whose captions refine to nothing are never downloaded.
fn process_video(
    source: &impl VideoSource,
    video_id: &str,
    opts: &Opts,
    metadata: &mut MetadataWriter,
) -> Result<usize> {
    let captions = source.fetch_captions(video_id)?;
    let refined = refine(&captions)?;
    if refined.is_empty() {
        debug!(video_id, "no usable utterances, skipping download");
        return Ok(0);
    }

    let staging_wav = opts.output_dir.join(format!("{video_id}_audio.wav"));
    let samples = source.fetch_audio(video_id, opts.sample_rate, &staging_wav)?;

    let clips = slice_clips(&samples, opts.sample_rate, &refined)?;

    let mut written = 0;
    for (index, (text, clip)) in clips.iter().enumerate() {
        // The clip index tracks the refined segment index even when an empty
        // clip is not written, so file names stay aligned with the segments.
        let stem = format!("{video_id}_{:04}", index + 1);

        if clip.is_empty() && !opts.keep_empty_clips {
            debug!(video_id, clip = %stem, "dropping zero-length clip");
            continue;
        }

        wav::write_clip(opts.output_dir.join(format!("{stem}.wav")), clip)?;
        metadata.record(&stem, text)?;
        written += 1;
    }

    remove_staging(&staging_wav);

    info!(video_id, clips = written, "video processed");
    Ok(written)
}

/// Remove the transient full-video download.
///
/// Best effort: a leftover staging file wastes disk but does not invalidate the
/// dataset, so failure to remove it is logged rather than propagated.
fn remove_staging(staging_wav: &Path) {
    if let Err(err) = std::fs::remove_file(staging_wav) {
        if staging_wav.exists() {
            warn!(path = %staging_wav.display(), error = %err, "failed to remove staging audio");
        }
    }
}

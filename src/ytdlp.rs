//! `yt-dlp`-backed [`VideoSource`] implementation.
//!
//! Everything network-facing is delegated to the `yt-dlp` executable:
//! - playlist listing via `-J` (JSON dump)
//! - caption tracks via `--write-auto-subs --sub-format json3`
//! - audio via `-x --audio-format wav`
//!
//! Downloaded audio is then normalized in-process (mono downmix + resample) so
//! the pipeline always sees the contracted format regardless of what the
//! source served.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::resample::normalize;
use crate::segments::CaptionSegment;
use crate::source::VideoSource;
use crate::{json3, wav};

/// Caption language requested from YouTube's auto-generated tracks.
const DEFAULT_CAPTION_LANG: &str = "en";

/// A [`VideoSource`] that shells out to `yt-dlp`.
pub struct YtDlpSource {
    program: PathBuf,
    caption_lang: String,
}

impl YtDlpSource {
    /// Locate `yt-dlp` on the `PATH` and build a source around it.
    pub fn new() -> Result<Self> {
        let program = which::which("yt-dlp")
            .map_err(|err| Error::fetch(format!("yt-dlp executable not found: {err}")))?;
        Ok(Self::with_program(program))
    }

    /// Build a source around an explicit `yt-dlp` executable path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            caption_lang: DEFAULT_CAPTION_LANG.to_string(),
        }
    }

    /// Override the caption language (default `"en"`).
    pub fn caption_lang(mut self, lang: impl Into<String>) -> Self {
        self.caption_lang = lang.into();
        self
    }

    /// Run `yt-dlp` with the given arguments and return its stdout.
    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        debug!(program = %self.program.display(), ?args, "running yt-dlp");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|err| Error::fetch(format!("failed to spawn yt-dlp: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().last().unwrap_or("no error output").trim();
            return Err(Error::fetch(format!(
                "yt-dlp exited with {}: {reason}",
                output.status
            )));
        }

        Ok(output.stdout)
    }
}

fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[derive(Debug, Deserialize)]
struct PlaylistDump {
    #[serde(default)]
    entries: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    id: String,

    /// Present (and possibly empty) only in full, non-flat dumps.
    #[serde(default)]
    automatic_captions: serde_json::Map<String, serde_json::Value>,
}

impl VideoSource for YtDlpSource {
    fn list_video_ids(&self, playlist_url: &str, only_captions: bool) -> Result<Vec<String>> {
        // The flat listing is cheap but carries no caption info; filtering by
        // captions requires a full per-entry dump.
        let stdout = if only_captions {
            self.run(&["-J", "--skip-download", playlist_url])?
        } else {
            self.run(&["-J", "--flat-playlist", playlist_url])?
        };

        let dump: PlaylistDump = serde_json::from_slice(&stdout)?;

        let ids: Vec<String> = dump
            .entries
            .into_iter()
            .filter(|entry| !only_captions || !entry.automatic_captions.is_empty())
            .map(|entry| entry.id)
            .collect();

        info!(playlist = playlist_url, videos = ids.len(), "listed playlist");
        Ok(ids)
    }

    fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionSegment>> {
        let staging = tempfile::tempdir()
            .map_err(|err| Error::fetch(format!("failed to create caption staging dir: {err}")))?;

        let template = staging.path().join("%(id)s");
        let template = template.to_string_lossy().into_owned();

        self.run(&[
            "--skip-download",
            "--write-auto-subs",
            "--sub-langs",
            &self.caption_lang,
            "--sub-format",
            "json3",
            "-o",
            &template,
            &watch_url(video_id),
        ])?;

        let caption_path = staging
            .path()
            .join(format!("{video_id}.{}.json3", self.caption_lang));
        let document = std::fs::read_to_string(&caption_path).map_err(|_| {
            Error::fetch(format!("no {} captions available for {video_id}", self.caption_lang))
        })?;

        let segments = json3::parse_json3(&document)?;
        debug!(video_id, segments = segments.len(), "fetched captions");
        Ok(segments)
    }

    fn fetch_audio(&self, video_id: &str, sample_rate: u32, staging_wav: &Path) -> Result<Vec<f32>> {
        // `-x --audio-format wav` appends the final extension itself.
        let template = staging_wav.with_extension("%(ext)s");
        let template = template.to_string_lossy().into_owned();

        self.run(&[
            "-x",
            "--audio-format",
            "wav",
            "-o",
            &template,
            &watch_url(video_id),
        ])?;

        let (interleaved, spec) = wav::read_samples_from_file(staging_wav)
            .map_err(|err| Error::fetch(format!("downloaded audio unreadable: {err:#}")))?;

        let samples = normalize(
            &interleaved,
            spec.channels as usize,
            spec.sample_rate,
            sample_rate,
        )?;

        info!(
            video_id,
            sample_rate,
            seconds = samples.len() as f64 / sample_rate as f64,
            "fetched audio"
        );
        Ok(samples)
    }
}

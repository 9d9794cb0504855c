//! Transcript metadata file.
//!
//! Clips alone are useless without their transcripts. The dataset layout pairs
//! every written clip with one line in `{output_dir}/metadata.csv`:
//!
//! ```text
//! {clip_stem}|{text}
//! ```
//!
//! pipe-separated, one utterance per line, the format Tacotron-style training
//! scripts consume. The writer appends across runs so a playlist can be
//! processed incrementally; overwrite mode truncates first.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// File name of the transcript index inside the output directory.
pub const METADATA_FILE_NAME: &str = "metadata.csv";

/// Streams transcript lines into `metadata.csv`.
pub struct MetadataWriter {
    w: BufWriter<File>,
}

impl MetadataWriter {
    /// Open the metadata file inside `output_dir`.
    ///
    /// With `overwrite` set, an existing file is truncated; otherwise new lines
    /// are appended after any previous run's entries.
    pub fn open(output_dir: &Path, overwrite: bool) -> Result<Self> {
        let path = output_dir.join(METADATA_FILE_NAME);
        let file = if overwrite {
            File::create(&path)
        } else {
            OpenOptions::new().create(true).append(true).open(&path)
        }
        .with_context(|| format!("failed to open metadata file '{}'", path.display()))?;

        Ok(Self {
            w: BufWriter::new(file),
        })
    }

    /// Record one clip's transcript.
    ///
    /// The pipe separator cannot appear inside `text`; caption text never
    /// contains it, but we replace any stray occurrence to keep lines parseable.
    pub fn record(&mut self, clip_stem: &str, text: &str) -> Result<()> {
        let text = text.replace('|', " ");
        writeln!(self.w, "{clip_stem}|{text}")?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_across_writers() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let mut first = MetadataWriter::open(dir.path(), false)?;
        first.record("vid1_0001", "hello world")?;
        first.flush()?;

        let mut second = MetadataWriter::open(dir.path(), false)?;
        second.record("vid2_0001", "more words")?;
        second.flush()?;

        let content = std::fs::read_to_string(dir.path().join(METADATA_FILE_NAME))?;
        assert_eq!(content, "vid1_0001|hello world\nvid2_0001|more words\n");
        Ok(())
    }

    #[test]
    fn overwrite_truncates_previous_entries() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let mut first = MetadataWriter::open(dir.path(), false)?;
        first.record("vid1_0001", "old entry")?;
        first.flush()?;

        let mut second = MetadataWriter::open(dir.path(), true)?;
        second.record("vid2_0001", "fresh start")?;
        second.flush()?;

        let content = std::fs::read_to_string(dir.path().join(METADATA_FILE_NAME))?;
        assert_eq!(content, "vid2_0001|fresh start\n");
        Ok(())
    }

    #[test]
    fn pipe_in_text_is_replaced() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let mut writer = MetadataWriter::open(dir.path(), true)?;
        writer.record("vid_0001", "odd | text")?;
        writer.flush()?;

        let content = std::fs::read_to_string(dir.path().join(METADATA_FILE_NAME))?;
        assert_eq!(content.matches('|').count(), 1);
        Ok(())
    }
}

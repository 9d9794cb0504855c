use std::path::PathBuf;

/// Default dataset sample rate (Hz), matching the Tacotron training layout the
/// output is prepared for.
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Options that control how a playlist is turned into a dataset.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Directory that receives the per-utterance clips and `metadata.csv`.
    pub output_dir: PathBuf,

    /// Sample rate of the written clips (Hz).
    pub sample_rate: u32,

    /// Whether to truncate an existing `metadata.csv` instead of appending.
    pub overwrite_metadata: bool,

    /// Whether playlist listing should skip videos without caption tracks.
    ///
    /// Listing with this set is slower (it requires a full per-entry dump),
    /// but avoids per-video caption failures later.
    pub only_captions: bool,

    /// Whether to keep zero-length clips (utterances entirely past the end of
    /// the downloaded audio). The slicer always passes them through; by
    /// default the pipeline skips writing them.
    pub keep_empty_clips: bool,
}

impl Opts {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            overwrite_metadata: false,
            only_captions: false,
            keep_empty_clips: false,
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use uttercut::opts::{DEFAULT_SAMPLE_RATE, Opts};
use uttercut::pipeline::run_playlist;
use uttercut::ytdlp::YtDlpSource;

fn main() -> ExitCode {
    uttercut::logging::init();

    let params = Params::parse();
    let playlist_url = format!("https://youtube.com/playlist?list={}", params.playlist_id);

    let opts = Opts {
        output_dir: params.output,
        sample_rate: params.sample_rate,
        overwrite_metadata: params.overwrite_metadata,
        only_captions: params.only_captions,
        keep_empty_clips: false,
    };

    let source = match YtDlpSource::new() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_playlist(&source, &playlist_url, &opts) {
        Ok(report) => {
            eprintln!(
                "processed {} video(s), skipped {}, wrote {} clip(s)",
                report.processed, report.skipped, report.clips_written
            );
            if report.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "uttercut")]
#[command(about = "Slice YouTube playlist audio into caption-aligned training clips")]
struct Params {
    /// ID of the YouTube playlist to process.
    #[arg(long = "playlist-id")]
    pub playlist_id: String,

    /// Output directory for clips and metadata.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Truncate an existing metadata file instead of appending to it.
    #[arg(long = "overwrite-metadata", default_value_t = false)]
    pub overwrite_metadata: bool,

    /// Only process videos that have caption tracks (slower playlist listing).
    #[arg(long = "only-captions", default_value_t = false)]
    pub only_captions: bool,

    /// Sample rate of the written clips, in Hz.
    #[arg(long = "sample-rate", default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,
}

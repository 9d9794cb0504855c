//! WAV reading and writing via `hound`.
//!
//! Reading is permissive: downloaded audio arrives at whatever rate and channel
//! count the source served, and the resample stage normalizes it afterwards.
//! Writing is strict: dataset clips are always mono 16-bit PCM at the
//! configured rate, the layout Tacotron-style training scripts expect.

use std::fs::File;
use std::io::{BufWriter, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::clip::AudioClip;

/// Load WAV audio from a reader and return interleaved samples normalized to
/// `[-1.0, 1.0]` plus the source `WavSpec` (rate and channel count drive the
/// normalization step downstream).
pub fn read_samples<R>(reader: R) -> Result<(Vec<f32>, WavSpec)>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader).context("failed to read WAV data from reader")?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .context("failed to decode float WAV samples")?,
        (SampleFormat::Int, 16) => {
            let mut samples = Vec::new();
            for sample in reader.samples::<i16>() {
                let pcm = sample.context("failed to decode PCM WAV sample")?;
                samples.push(pcm as f32 / i16::MAX as f32);
            }
            samples
        }
        (format, bits) => anyhow::bail!("unsupported WAV format: {bits}-bit {format:?}"),
    };

    Ok((samples, spec))
}

/// Load WAV audio from a file path. See [`read_samples`].
pub fn read_samples_from_file(path: impl AsRef<Path>) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open WAV file '{}'", path.display()))?;
    read_samples(file)
}

/// Write one clip as a mono 16-bit PCM WAV file.
///
/// Samples are clamped to `[-1.0, 1.0]` before conversion so out-of-range
/// values from resampling cannot wrap around.
pub fn write_clip(path: impl AsRef<Path>, clip: &AudioClip) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create WAV file '{}'", path.display()))?;
    let mut writer = WavWriter::new(BufWriter::new(file), spec)
        .with_context(|| format!("failed to start WAV file '{}'", path.display()))?;

    for &sample in &clip.samples {
        let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
        writer.write_sample(pcm)?;
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finalize WAV file '{}'", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_mono_16_bit_pcm_at_the_clip_rate() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("clip.wav");

        let clip = AudioClip {
            samples: vec![0.0, 0.5, -0.5, 1.0, -1.0],
            sample_rate: 22_050,
        };
        write_clip(&path, &clip)?;

        let (samples, spec) = read_samples_from_file(&path)?;
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(samples.len(), 5);
        assert!((samples[1] - 0.5).abs() < 1e-3);
        assert!((samples[3] - 1.0).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn clamps_out_of_range_samples() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hot.wav");

        let clip = AudioClip {
            samples: vec![2.0, -2.0],
            sample_rate: 8_000,
        };
        write_clip(&path, &clip)?;

        let (samples, _) = read_samples_from_file(&path)?;
        assert!((samples[0] - 1.0).abs() < 1e-3);
        assert!((samples[1] + 1.0).abs() < 1.5e-3);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_samples_from_file("/nonexistent/audio.wav").is_err());
    }
}

//! Waveform normalization: downmix to mono and resample to the dataset rate.
//!
//! The audio fetch contract promises a single-channel waveform at the
//! configured sample rate, but downloaded files arrive at whatever the source
//! served (typically 44.1 or 48 kHz stereo). This module closes that gap.
//!
//! Notes:
//! - rubato's `SincFixedIn` consumes fixed-size input blocks; the tail is
//!   zero-padded to a full block and the output trimmed back to the expected
//!   frame count.

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use tracing::debug;

/// Source frames fed to rubato per `process()` call.
const RESAMPLE_BLOCK_FRAMES: usize = 2048;

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}

/// Resample a mono waveform from `src_rate` to `dst_rate`.
///
/// Returns the input unchanged when the rates already match. The output length
/// is `round(len * dst_rate / src_rate)` frames.
pub fn resample_mono(mono: &[f32], src_rate: u32, dst_rate: u32) -> Result<Vec<f32>> {
    if src_rate == 0 || dst_rate == 0 {
        bail!("sample rates must be positive (got {src_rate} -> {dst_rate})");
    }

    if src_rate == dst_rate {
        return Ok(mono.to_vec());
    }

    let ratio = dst_rate as f64 / src_rate as f64;
    let mut rs = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        rubato::SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: rubato::SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        RESAMPLE_BLOCK_FRAMES,
        1, // mono
    )
    .map_err(|e| anyhow!(e))
    .context("failed to init resampler")?;

    let expected_frames = (mono.len() as f64 * ratio).round() as usize;

    // Pad the tail to a whole block; rubato expects exact input sizes.
    let mut padded = mono.to_vec();
    let rem = padded.len() % RESAMPLE_BLOCK_FRAMES;
    if rem != 0 {
        padded.resize(padded.len() + (RESAMPLE_BLOCK_FRAMES - rem), 0.0);
    }

    let mut out = Vec::with_capacity(expected_frames);
    for block in padded.chunks(RESAMPLE_BLOCK_FRAMES) {
        let input = vec![block.to_vec()];
        let mut processed = rs
            .process(&input, None)
            .map_err(|e| anyhow!(e))
            .context("resampler process failed")?;

        if processed.len() != 1 {
            bail!("expected mono output from resampler");
        }
        out.append(&mut processed[0]);
    }

    // Trim the padding's contribution.
    out.truncate(expected_frames);

    debug!(
        src_rate,
        dst_rate,
        in_frames = mono.len(),
        out_frames = out.len(),
        "resampled waveform"
    );

    Ok(out)
}

/// Downmix and resample an interleaved waveform to mono at `dst_rate`.
pub fn normalize(
    interleaved: &[f32],
    channels: usize,
    src_rate: u32,
    dst_rate: u32,
) -> Result<Vec<f32>> {
    if channels == 0 {
        bail!("waveform has zero channels");
    }

    let mono = downmix_to_mono(interleaved, channels);
    resample_mono(&mono, src_rate, dst_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_to_mono_single_channel_is_identity() {
        let input = vec![0.0, 1.0, -1.0];
        let mono = downmix_to_mono(&input, 1);
        assert_eq!(mono, input);
    }

    #[test]
    fn downmix_to_mono_averages_channels() {
        // Two frames of stereo: (L=1, R=3), (L=-1, R=1) => mono: 2, 0
        let interleaved = vec![1.0, 3.0, -1.0, 1.0];
        let mono = downmix_to_mono(&interleaved, 2);
        assert_eq!(mono, vec![2.0, 0.0]);
    }

    #[test]
    fn matching_rates_pass_through() -> anyhow::Result<()> {
        let mono = vec![0.5f32; 1000];
        let out = resample_mono(&mono, 22_050, 22_050)?;
        assert_eq!(out, mono);
        Ok(())
    }

    #[test]
    fn resampling_halves_frame_count_for_half_rate() -> anyhow::Result<()> {
        let mono = vec![0.0f32; 44_100];
        let out = resample_mono(&mono, 44_100, 22_050)?;
        assert_eq!(out.len(), 22_050);
        Ok(())
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(resample_mono(&[0.0; 16], 0, 22_050).is_err());
        assert!(resample_mono(&[0.0; 16], 44_100, 0).is_err());
    }

    #[test]
    fn normalize_rejects_zero_channels() {
        assert!(normalize(&[0.0; 16], 0, 44_100, 22_050).is_err());
    }

    #[test]
    fn normalize_downmixes_and_resamples() -> anyhow::Result<()> {
        let interleaved = vec![0.25f32; 44_100 * 2];
        let out = normalize(&interleaved, 2, 44_100, 22_050)?;
        assert_eq!(out.len(), 22_050);
        Ok(())
    }
}

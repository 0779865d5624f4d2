use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{QmfError, Result};
use crate::qmf::SubbandPair;
use crate::signal_processing::Sample;

/// Read the first channel of a 16-bit PCM WAV file
///
/// Returns the samples and the file's sample rate.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Sample>, u32)> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(QmfError::Config(format!(
            "{}: expected 16-bit integer PCM, got {} bits {:?}",
            path.as_ref().display(),
            spec.bits_per_sample,
            spec.sample_format
        )));
    }

    let channels = spec.channels.max(1) as usize;
    let samples = reader
        .samples::<i16>()
        .step_by(channels)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((samples, spec.sample_rate))
}

/// Write a mono 16-bit PCM WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[Sample], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write subband pairs as a stereo WAV file: left = low band, right = high band
pub fn save_subbands_wav<P: AsRef<Path>>(
    path: P,
    pairs: &[SubbandPair],
    sample_rate: u32,
) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for pair in pairs {
        writer.write_sample(pair.low)?;
        writer.write_sample(pair.high)?;
    }
    writer.finalize()?;
    Ok(())
}

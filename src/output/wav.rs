// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing waveforms as mono 16 bit PCM WAV files.

use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::{debug, warn};
use snafu::{ResultExt, Snafu};

use crate::wave::{Sample, Waveform, SAMPLE_RATE};

#[derive(Debug, Snafu)]
pub enum OutputError {
    #[snafu(display("Could not write {}: {}", path.display(), source))]
    WavFile { path: PathBuf, source: hound::Error },
    #[snafu(display("Could not encode WAV data: {}", source))]
    Encode { source: hound::Error },
}

pub fn spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Convert a sample to 16 bit PCM, saturating outside of `[-1.0, 1.0]`.
///
/// ```
/// # use modsynth::output::wav::*;
/// assert_eq!(pcm_i16(1.0), 32767);
/// assert_eq!(pcm_i16(-1.0), -32767);
/// assert_eq!(pcm_i16(0.5), 16384);
/// assert_eq!(pcm_i16(3.0), i16::MAX);
/// assert_eq!(pcm_i16(-3.0), i16::MIN);
/// ```
pub fn pcm_i16(sample: Sample) -> i16 {
    // float to int casts saturate, and NaN becomes 0
    (sample * 32767.0).round() as i16
}

/// Write the samples and finish the file, returning how many samples clipped.
fn write_samples<W: Write + Seek>(
    mut writer: WavWriter<W>,
    wave: &Waveform,
) -> Result<usize, hound::Error> {
    for &sample in wave {
        writer.write_sample(pcm_i16(sample))?;
    }
    writer.finalize()?;
    Ok(wave.clipped())
}

fn report_clipping(clipped: usize, total: usize) {
    if clipped > 0 {
        warn!("{} of {} samples were clipped", clipped, total);
    }
}

/// Encode a waveform into any seekable output, e.g. an in-memory buffer.
pub fn write_wav_to<W: Write + Seek>(wave: &Waveform, out: W) -> Result<(), OutputError> {
    let writer = WavWriter::new(out, spec()).context(Encode)?;
    let clipped = write_samples(writer, wave).context(Encode)?;
    report_clipping(clipped, wave.len());
    Ok(())
}

/// Save a waveform to a file at the shared sample rate.
pub fn write_wav(wave: &Waveform, path: &Path) -> Result<(), OutputError> {
    let writer = WavWriter::create(path, spec()).context(WavFile { path })?;
    let clipped = write_samples(writer, wave).context(WavFile { path })?;
    report_clipping(clipped, wave.len());
    debug!(
        "wrote {} samples ({:.2} seconds) to {}",
        wave.len(),
        wave.seconds(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(wave: &Waveform) -> (WavSpec, Vec<i16>) {
        let mut buffer = Cursor::new(Vec::new());
        write_wav_to(wave, &mut buffer).unwrap();
        buffer.set_position(0);
        let mut reader = hound::WavReader::new(buffer).unwrap();
        let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        (reader.spec(), samples)
    }

    #[test]
    fn mono_16_bit() {
        let (spec, samples) = roundtrip(&vec![0.0, 1.0, -1.0, 0.25].into());
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(samples, vec![0, 32767, -32767, 8192]);
    }

    #[test]
    fn clipping_saturates() {
        let (_, samples) = roundtrip(&vec![1.5, -2.0].into());
        assert_eq!(samples, vec![i16::MAX, i16::MIN]);
    }

    #[test]
    fn missing_directory() {
        let path = Path::new("/this/directory/does/not/exist/out.wav");
        match write_wav(&vec![0.0].into(), path) {
            Err(OutputError::WavFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

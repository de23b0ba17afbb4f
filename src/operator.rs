//! Operations combining and resampling existing waveforms.
//!
//! None of the operations modify their inputs. Operations on two waveforms of
//! different length treat the shorter one as if it was padded with silence.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::wave::{sample_count, Sample, SignalError, Waveform};

/// The operations that can be requested by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Normalise,
    Scale,
    Stretch,
    Append,
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "sub",
            Operator::Normalise => "norm",
            Operator::Scale => "scale",
            Operator::Stretch => "stretch",
            Operator::Append => "append",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" | "+" => Ok(Operator::Add),
            "sub" | "-" => Ok(Operator::Subtract),
            "norm" | "=" => Ok(Operator::Normalise),
            "scale" | "*" => Ok(Operator::Scale),
            "stretch" => Ok(Operator::Stretch),
            "append" => Ok(Operator::Append),
            other => Err(SignalError::invalid("operator kind", other)),
        }
    }
}

/// Combine two waveforms sample by sample, padding the shorter one with zeros.
fn zip_padded<F>(a: &Waveform, b: &Waveform, f: F) -> Waveform
where
    F: Fn(Sample, Sample) -> Sample,
{
    let length = a.len().max(b.len());
    (0..length)
        .map(|i| f(a.get(i).unwrap_or(0.0), b.get(i).unwrap_or(0.0)))
        .collect()
}

/// Elementwise sum, the result is as long as the longer input.
///
/// ```
/// # use modsynth::operator::*;
/// let sum = add(&vec![1.0, 0.0, -1.0].into(), &vec![1.0, 1.0, 1.0].into());
/// assert_eq!(sum.samples(), &[2.0, 1.0, 0.0]);
/// ```
pub fn add(a: &Waveform, b: &Waveform) -> Waveform {
    zip_padded(a, b, |x, y| x + y)
}

/// Elementwise difference `a - b`, the result is as long as the longer input.
pub fn subtract(a: &Waveform, b: &Waveform) -> Waveform {
    zip_padded(a, b, |x, y| x - y)
}

pub fn scale(wave: &Waveform, factor: f64) -> Waveform {
    wave.iter().map(|s| s * factor).collect()
}

/// Scale the waveform so that its largest magnitude becomes 1.0.
pub fn normalise(wave: &Waveform) -> Result<Waveform, SignalError> {
    match wave.peak() {
        Some(peak) if peak > 0.0 => {
            trace!("normalising by factor {}", 1.0 / peak);
            Ok(scale(wave, 1.0 / peak))
        }
        _ => Err(SignalError::DegenerateWaveform),
    }
}

/// Resample the waveform to `factor` times its length using linear interpolation.
///
/// Source positions past the last sample are clamped to the last sample.
/// Results longer than [`MAX_SAMPLES`](crate::wave::MAX_SAMPLES) are rejected.
/// Note that the interpolation weights the lower neighbour by the fractional
/// part of the position and the upper neighbour by the rest.
pub fn stretch(wave: &Waveform, factor: f64) -> Result<Waveform, SignalError> {
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(SignalError::invalid("stretch factor", factor));
    }
    let samples = wave.samples();
    let last = match samples.len().checked_sub(1) {
        Some(last) => last,
        None => return Ok(Waveform::new()),
    };

    let length = sample_count(samples.len() as f64 * factor, "stretch factor", factor)?;
    trace!("stretching {} samples to {}", samples.len(), length);
    Ok((0..length)
        .map(|i| {
            let position = i as f64 / factor;
            let lo = position.floor();
            let frac = position - lo;
            let lo_val = samples[(lo as usize).min(last)];
            let hi_val = samples[(position.ceil() as usize).min(last)];
            lo_val * frac + hi_val * (1.0 - frac)
        })
        .collect())
}

/// `a` followed by `b`.
pub fn append(a: &Waveform, b: &Waveform) -> Waveform {
    a.iter().chain(b.iter()).copied().collect()
}

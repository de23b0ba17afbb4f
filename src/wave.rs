//! This is the namespace for all parts dealing with data in sampled waves.

use std::iter::FromIterator;
use std::ops;

use snafu::Snafu;

/// Number of samples per second, shared by everything that reasons about time.
pub const SAMPLE_RATE: u32 = 24_000;

/// Upper bound on the length of any generated or stretched waveform (one hour).
pub const MAX_SAMPLES: usize = SAMPLE_RATE as usize * 60 * 60;

/// A single amplitude, nominally in `[-1.0, 1.0]`.
/// Values outside that range are valid, but they clip when written out.
pub type Sample = f64;

/// A finite sequence of mono samples.
///
/// Waveforms are never modified once they are built,
/// all operations on them produce a new waveform.
///
/// ```
/// use modsynth::wave::*;
///
/// let wave: Waveform = vec![0.25, -0.5, 0.0].into();
/// assert_eq!(wave.len(), 3);
/// assert_eq!(wave[1], -0.5);
/// assert_eq!(wave.peak(), Some(0.5));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Waveform {
    samples: Vec<Sample>,
}

impl Waveform {
    /// The empty waveform.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Size of the waveform in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    /// Playback length at the shared sample rate.
    pub fn seconds(&self) -> f64 {
        self.len() as f64 / SAMPLE_RATE as f64
    }

    /// The largest magnitude on either side of zero, i.e. `max(max(w), -min(w))`.
    /// NaN samples are ignored. Returns `None` for the empty waveform.
    pub fn peak(&self) -> Option<Sample> {
        if self.is_empty() {
            return None;
        }
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        Some(max.max(-min))
    }

    /// Number of samples outside of `[-1.0, 1.0]`.
    pub fn clipped(&self) -> usize {
        self.samples.iter().filter(|s| s.abs() > 1.0).count()
    }
}

impl From<Vec<Sample>> for Waveform {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl From<&[Sample]> for Waveform {
    fn from(samples: &[Sample]) -> Self {
        Self {
            samples: samples.to_vec(),
        }
    }
}

impl FromIterator<Sample> for Waveform {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl ops::Index<usize> for Waveform {
    type Output = Sample;

    fn index(&self, index: usize) -> &Sample {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a Waveform {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Errors of the signal processing core.
#[derive(Debug, PartialEq, Snafu)]
pub enum SignalError {
    /// A numeric argument was out of range, or a name did not match any known kind.
    #[snafu(display("Invalid {}: {}", what, value))]
    InvalidParameter { what: &'static str, value: String },
    #[snafu(display("Cannot normalise a waveform that is empty or silent"))]
    DegenerateWaveform,
}

impl SignalError {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        SignalError::InvalidParameter {
            what,
            value: value.to_string(),
        }
    }
}

/// Number of whole samples in `length`, rejecting lengths above [`MAX_SAMPLES`]
/// as an invalid `what` before anything is allocated.
pub(crate) fn sample_count(
    length: f64,
    what: &'static str,
    value: f64,
) -> Result<usize, SignalError> {
    let length = length.floor();
    if length > MAX_SAMPLES as f64 {
        Err(SignalError::invalid(what, value))
    } else {
        Ok(length as usize)
    }
}

// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Synthesis of the basic periodic waveforms.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::wave::{sample_count, Sample, SignalError, Waveform, SAMPLE_RATE};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WaveKind {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl WaveKind {
    pub const ALL: [WaveKind; 4] = [
        WaveKind::Sine,
        WaveKind::Saw,
        WaveKind::Square,
        WaveKind::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WaveKind::Sine => "sine",
            WaveKind::Saw => "saw",
            WaveKind::Square => "square",
            WaveKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" | "sin" => Ok(WaveKind::Sine),
            "saw" => Ok(WaveKind::Saw),
            "square" => Ok(WaveKind::Square),
            "triangle" | "tri" => Ok(WaveKind::Triangle),
            other => Err(SignalError::invalid("generator kind", other)),
        }
    }
}

/// An oscillator sampling a wave of some kind at a fixed sample rate.
///
/// Unlike a running oscillator it has no state, any sample can be computed
/// directly from its index.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    kind: WaveKind,
    sample_rate: f64,
    frequency: f64,
}

impl Oscillator {
    pub fn new(kind: WaveKind, sample_rate: f64, frequency: f64) -> Self {
        Self {
            kind,
            sample_rate,
            frequency,
        }
    }

    /// Samples per cycle. Fractional unless the frequency divides the sample rate.
    pub fn period(&self) -> f64 {
        self.sample_rate / self.frequency
    }

    pub fn sample(&self, index: usize) -> Sample {
        use std::f64::consts::PI;
        let i = index as f64;
        let period = self.period();
        // real valued modulo, the period need not be whole
        let offset = i % period;
        match self.kind {
            WaveKind::Sine => (2.0 * PI * self.frequency * i / self.sample_rate).sin(),
            WaveKind::Saw => -(offset / (period / 2.0) - 1.0),
            WaveKind::Square => {
                // exactly half a period still counts as the lower half
                if offset > period / 2.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveKind::Triangle => 4.0 * (offset / period - 0.5).abs() - 1.0,
        }
    }
}

/// Generate `duration` seconds of a wave at the shared sample rate.
///
/// Durations longer than [`MAX_SAMPLES`](crate::wave::MAX_SAMPLES) samples are rejected.
///
/// ```
/// use modsynth::generator::*;
///
/// let wave = generate(WaveKind::Square, 2.0, 1.0).unwrap();
/// assert_eq!(wave.len(), 24_000);
/// assert_eq!(wave[5999], -1.0);
/// assert_eq!(wave[6001], 1.0);
/// ```
pub fn generate(kind: WaveKind, frequency: f64, duration: f64) -> Result<Waveform, SignalError> {
    if !(frequency > 0.0 && frequency.is_finite()) {
        return Err(SignalError::invalid("frequency", frequency));
    }
    if !(duration > 0.0 && duration.is_finite()) {
        return Err(SignalError::invalid("duration", duration));
    }

    let sample_rate = SAMPLE_RATE as f64;
    let count = sample_count(sample_rate * duration, "duration", duration)?;
    let oscillator = Oscillator::new(kind, sample_rate, frequency);
    debug!(
        "generating {} samples of {} at {} Hz (period {:.3})",
        count,
        kind,
        frequency,
        oscillator.period()
    );
    Ok((0..count).map(|i| oscillator.sample(i)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn length_follows_duration() {
        for &kind in WaveKind::ALL.iter() {
            assert_eq!(generate(kind, 440.0, 1.0).unwrap().len(), 24_000);
            assert_eq!(generate(kind, 440.0, 0.25).unwrap().len(), 6_000);
            // 24000 * 0.00001 = 0.24 samples
            assert!(generate(kind, 440.0, 0.00001).unwrap().is_empty());
        }
    }

    #[test]
    fn sine_matches_formula() {
        let wave = generate(WaveKind::Sine, 3.0, 0.5).unwrap();
        for (i, &sample) in wave.iter().enumerate() {
            let expected =
                (2.0 * std::f64::consts::PI * 3.0 * i as f64 / SAMPLE_RATE as f64).sin();
            assert!((sample - expected).abs() < EPSILON, "sample {}", i);
        }
    }

    #[test]
    fn square_boundary_is_strict() {
        let wave = generate(WaveKind::Square, 2.0, 1.0).unwrap();
        assert_eq!(wave[0], -1.0);
        assert_eq!(wave[5999], -1.0);
        assert_eq!(wave[6000], -1.0);
        assert_eq!(wave[6001], 1.0);
        assert_eq!(wave[11_999], 1.0);
        assert_eq!(wave[12_000], -1.0);
    }

    #[test]
    fn saw_ramps_over_one_period() {
        // period of 8 samples
        let wave = generate(WaveKind::Saw, 3000.0, 0.001).unwrap();
        let expected = [1.0, 0.75, 0.5, 0.25, 0.0, -0.25, -0.5, -0.75];
        for (i, &e) in expected.iter().enumerate() {
            assert!((wave[i] - e).abs() < EPSILON, "sample {}", i);
        }
        assert!((wave[8] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn fractional_period() {
        // 24000 / 7000 is not whole, the modulo must not truncate the period
        let osc = Oscillator::new(WaveKind::Saw, SAMPLE_RATE as f64, 7000.0);
        let period = osc.period();
        assert!((period - 24.0 / 7.0).abs() < EPSILON);
        let expected = -((4.0 % period) / (period / 2.0) - 1.0);
        assert!((osc.sample(4) - expected).abs() < EPSILON);
    }

    #[test]
    fn triangle_is_bounded() {
        let wave = generate(WaveKind::Triangle, 3000.0, 0.01).unwrap();
        assert_eq!(wave[0], 1.0);
        assert!((wave[4] + 1.0).abs() < EPSILON);
        assert!(wave.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            generate(WaveKind::Sine, 0.0, 1.0),
            Err(SignalError::invalid("frequency", 0.0))
        );
        assert!(generate(WaveKind::Sine, -5.0, 1.0).is_err());
        assert!(generate(WaveKind::Sine, f64::NAN, 1.0).is_err());
        assert_eq!(
            generate(WaveKind::Saw, 440.0, 0.0),
            Err(SignalError::invalid("duration", 0.0))
        );
        assert!(generate(WaveKind::Saw, 440.0, -1.0).is_err());
    }

    #[test]
    fn rejects_huge_durations() {
        assert_eq!(
            generate(WaveKind::Sine, 2.0, 1e300),
            Err(SignalError::invalid("duration", 1e300))
        );
        // one second past the hour limit
        assert!(generate(WaveKind::Square, 2.0, 3601.0).is_err());
    }

    #[test]
    fn parse_kinds() {
        assert_eq!("sine".parse::<WaveKind>(), Ok(WaveKind::Sine));
        assert_eq!("sin".parse::<WaveKind>(), Ok(WaveKind::Sine));
        assert_eq!("saw".parse::<WaveKind>(), Ok(WaveKind::Saw));
        assert_eq!("square".parse::<WaveKind>(), Ok(WaveKind::Square));
        assert_eq!("tri".parse::<WaveKind>(), Ok(WaveKind::Triangle));
        assert_eq!(
            "noise".parse::<WaveKind>(),
            Err(SignalError::invalid("generator kind", "noise"))
        );
        for &kind in WaveKind::ALL.iter() {
            assert_eq!(kind.name().parse::<WaveKind>(), Ok(kind));
        }
    }
}

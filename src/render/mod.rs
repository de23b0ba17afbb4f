//! Turning waveforms into a grid of characters.
//!
//! Every sample occupies one column. Its amplitude is quantized into one of
//! `height + 1` bands, samples outside of `[-1.0, 1.0]` go into one of two
//! dedicated clipping rows instead.

pub mod term;

use crate::wave::{SignalError, Waveform};

/// Identifies a row of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Samples above 1.0.
    ClipUpper,
    /// Amplitude band, 0 is the lowest (-1.0) and `height` the highest (1.0).
    Band(usize),
    /// Samples below -1.0.
    ClipLower,
}

impl RowKind {
    pub fn is_clip(self) -> bool {
        matches!(self, RowKind::ClipUpper | RowKind::ClipLower)
    }
}

/// One row of a frame, with one flag per column.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub kind: RowKind,
    marks: &'a [bool],
}

impl<'a> Row<'a> {
    pub fn is_marked(&self, column: usize) -> bool {
        self.marks.get(column).copied().unwrap_or(false)
    }

    pub fn marked_columns(&self) -> impl Iterator<Item = usize> + 'a {
        let marks = self.marks;
        marks
            .iter()
            .enumerate()
            .filter(|(_, marked)| **marked)
            .map(|(column, _)| column)
    }

    /// Text of this row, `mark` in marked columns and `blank` everywhere else.
    pub fn to_line(&self, mark: char, blank: char) -> String {
        self.marks
            .iter()
            .map(|&marked| if marked { mark } else { blank })
            .collect()
    }
}

/// A rasterized waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    clip_upper: Vec<bool>,
    /// Indexed by band, lowest band first.
    bands: Vec<Vec<bool>>,
    clip_lower: Vec<bool>,
}

impl Frame {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            clip_upper: vec![false; width],
            bands: vec![vec![false; width]; height + 1],
            clip_lower: vec![false; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The row of the given kind, `None` for bands above the frame's height.
    pub fn row(&self, kind: RowKind) -> Option<Row<'_>> {
        let marks = match kind {
            RowKind::ClipUpper => &self.clip_upper,
            RowKind::Band(band) => self.bands.get(band)?,
            RowKind::ClipLower => &self.clip_lower,
        };
        Some(Row { kind, marks })
    }

    /// All rows in display order: upper clipping, bands from high to low, lower clipping.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        let upper = std::iter::once(Row {
            kind: RowKind::ClipUpper,
            marks: &self.clip_upper,
        });
        let bands = self
            .bands
            .iter()
            .enumerate()
            .rev()
            .map(|(band, marks)| Row {
                kind: RowKind::Band(band),
                marks,
            });
        let lower = std::iter::once(Row {
            kind: RowKind::ClipLower,
            marks: &self.clip_lower,
        });
        upper.chain(bands).chain(lower)
    }
}

/// Map the first `width` samples of the waveform into a frame with `height + 1` bands.
///
/// Samples past `width` are not shown. NaN samples are left out entirely.
///
/// ```
/// # use modsynth::render::*;
/// # use modsynth::wave::Waveform;
/// let wave = Waveform::from(vec![-1.0, 0.0, 1.0, 2.0]);
/// let frame = rasterize(&wave, 4, 2).unwrap();
/// let lines: Vec<_> = frame.rows().map(|row| row.to_line('#', '.')).collect();
/// assert_eq!(lines, vec!["...#", "..#.", ".#..", "#...", "...."]);
/// ```
pub fn rasterize(wave: &Waveform, width: usize, height: usize) -> Result<Frame, SignalError> {
    if width == 0 {
        return Err(SignalError::invalid("width", width));
    }
    if height == 0 {
        return Err(SignalError::invalid("height", height));
    }

    let mut frame = Frame::empty(width, height);
    for (column, &value) in wave.iter().take(width).enumerate() {
        if value > 1.0 {
            frame.clip_upper[column] = true;
        } else if value < -1.0 {
            frame.clip_lower[column] = true;
        } else if !value.is_nan() {
            let band = ((value + 1.0) / 2.0 * height as f64).round() as usize;
            frame.bands[band.min(height)][column] = true;
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(frame: &Frame, kind: RowKind) -> Vec<usize> {
        frame.row(kind).unwrap().marked_columns().collect()
    }

    #[test]
    fn constant_clipping() {
        let wave: Waveform = vec![1.5; 10].into();
        let frame = rasterize(&wave, 10, 5).unwrap();
        assert_eq!(marked(&frame, RowKind::ClipUpper), (0..10).collect::<Vec<_>>());
        for band in 0..=5 {
            assert!(marked(&frame, RowKind::Band(band)).is_empty());
        }
        assert!(marked(&frame, RowKind::ClipLower).is_empty());
    }

    #[test]
    fn bands_are_rounded() {
        let wave: Waveform = vec![-1.0, -0.5, 0.0, 0.5, 1.0, 0.19, -1.5].into();
        let frame = rasterize(&wave, 80, 10).unwrap();
        assert_eq!(marked(&frame, RowKind::Band(0)), vec![0]);
        assert_eq!(marked(&frame, RowKind::Band(3)), vec![1]);
        assert_eq!(marked(&frame, RowKind::Band(5)), vec![2]);
        assert_eq!(marked(&frame, RowKind::Band(8)), vec![3]);
        assert_eq!(marked(&frame, RowKind::Band(10)), vec![4]);
        // (1.19 / 2) * 10 = 5.95
        assert_eq!(marked(&frame, RowKind::Band(6)), vec![5]);
        assert_eq!(marked(&frame, RowKind::ClipLower), vec![6]);
        assert!(frame.row(RowKind::Band(11)).is_none());
    }

    #[test]
    fn limits_are_not_clipping() {
        let wave: Waveform = vec![1.0, -1.0].into();
        let frame = rasterize(&wave, 2, 4).unwrap();
        assert!(marked(&frame, RowKind::ClipUpper).is_empty());
        assert!(marked(&frame, RowKind::ClipLower).is_empty());
        assert_eq!(marked(&frame, RowKind::Band(4)), vec![0]);
        assert_eq!(marked(&frame, RowKind::Band(0)), vec![1]);
    }

    #[test]
    fn samples_beyond_width_are_dropped() {
        let wave: Waveform = vec![0.0, 0.0, 2.0, -2.0].into();
        let frame = rasterize(&wave, 2, 2).unwrap();
        assert_eq!(frame.width(), 2);
        assert!(marked(&frame, RowKind::ClipUpper).is_empty());
        assert!(marked(&frame, RowKind::ClipLower).is_empty());
        assert_eq!(marked(&frame, RowKind::Band(1)), vec![0, 1]);
    }

    #[test]
    fn short_waveforms_leave_blank_columns() {
        let wave: Waveform = vec![0.0].into();
        let frame = rasterize(&wave, 5, 2).unwrap();
        let lines: Vec<_> = frame.rows().map(|row| row.to_line('#', ' ')).collect();
        assert_eq!(lines, vec!["     ", "     ", "#    ", "     ", "     "]);
    }

    #[test]
    fn row_order() {
        let frame = rasterize(&Waveform::new(), 3, 2).unwrap();
        let kinds: Vec<_> = frame.rows().map(|row| row.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::ClipUpper,
                RowKind::Band(2),
                RowKind::Band(1),
                RowKind::Band(0),
                RowKind::ClipLower
            ]
        );
    }

    #[test]
    fn nan_is_not_drawn() {
        let wave: Waveform = vec![f64::NAN].into();
        let frame = rasterize(&wave, 1, 2).unwrap();
        assert!(frame.rows().all(|row| !row.is_marked(0)));
    }

    #[test]
    fn deterministic() {
        let wave: Waveform = vec![0.3, -0.8, 1.2, -0.1].into();
        assert_eq!(
            rasterize(&wave, 4, 6).unwrap(),
            rasterize(&wave, 4, 6).unwrap()
        );
    }

    #[test]
    fn rejects_empty_surface() {
        let wave: Waveform = vec![0.0].into();
        assert_eq!(
            rasterize(&wave, 0, 5),
            Err(SignalError::invalid("width", 0))
        );
        assert_eq!(
            rasterize(&wave, 5, 0),
            Err(SignalError::invalid("height", 0))
        );
    }
}

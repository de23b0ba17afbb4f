// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Printing frames to a terminal.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use super::Frame;

/// Used when the size of the terminal cannot be determined, e.g. when piping.
pub const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Printed where there is a wave.
    pub mark: char,
    /// Printed where there isn't.
    pub blank: char,
    /// Whether the clipping rows are highlighted.
    pub color: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            mark: '█',
            blank: ' ',
            color: true,
        }
    }
}

/// Number of columns of the terminal attached to this process.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => columns as usize,
        _ => DEFAULT_WIDTH,
    }
}

/// Print every row of the frame on its own line, clipping rows in red.
pub fn write_frame<W: Write>(out: &mut W, frame: &Frame, style: &Style) -> io::Result<()> {
    for row in frame.rows() {
        let line = row.to_line(style.mark, style.blank);
        if style.color && row.kind.is_clip() {
            queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(line),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(out, Print(line), Print("\n"))?;
        }
    }
    out.flush()
}

// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `modsynth` - generating, mangling and looking at waveforms from the command line.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use crossterm::tty::IsTty;
use structopt::StructOpt;

use modsynth::repl::{Config, Session};

#[derive(Debug, StructOpt)]
#[structopt(name = "modsynth", about = "A simple program for generating and manipulating waveforms")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Number of amplitude bands used when printing waveforms.
    #[structopt(long, default_value = "10")]
    height: usize,

    /// Number of columns used when printing waveforms. Defaults to the terminal width.
    #[structopt(long)]
    width: Option<usize>,

    /// Do not highlight clipping samples.
    #[structopt(long)]
    no_color: bool,

    /// Read commands from this file instead of the standard input.
    #[structopt(short, long, parse(from_os_str))]
    script: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut config = Config {
        height: opt.height,
        width: opt.width,
        color: !opt.no_color && stdout.is_tty(),
        interactive: false,
    };

    match opt.script {
        Some(path) => {
            log::info!("running commands from {}", path.display());
            let script = BufReader::new(File::open(&path)?);
            Session::new(config, stdout.lock()).run(script)
        }
        None => {
            config.interactive = stdin.is_tty();
            Session::new(config, stdout.lock()).run(stdin.lock())
        }
    }
}

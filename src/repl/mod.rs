// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The command interpreter: reads commands line by line and runs them
//! against a store of named waveforms.

pub mod command;

use std::io::{self, BufRead, Write};
use std::num::ParseFloatError;

use log::{debug, info, trace};
use snafu::{ResultExt, Snafu};

use crate::generator;
use crate::operator;
use crate::output::{self, OutputError};
use crate::render::{self, term};
use crate::store::{StoreError, WaveformStore};
use crate::wave::{SignalError, Waveform};

pub use command::{Command, OpCall};

const HELP: &str = "\
Available commands:
 - gen [kind] [freq] [length] [name] - generate a waveform
 - op add [wav1] [wav2] [name] - add [wav1] and [wav2] values
 - op sub [wav1] [wav2] [name] - subtract [wav2] values from [wav1]
 - op norm [wav] [name] - normalise [wav]
 - op scale [wav] [amount] [name] - scale [wav] by [amount]
 - op stretch [wav] [amount] [name] - stretch [wav] by [amount]
 - op append [wav1] [wav2] [name] - append [wav2] to [wav1]
 - print [wav] - print the waveform [wav]
 - save [wav] [file] - save the waveform [wav] to [file]
 - list - list loaded waveforms
 - help - display this message
 - quit

Where:
 - [kind] - kind of waveform to generate (sine, saw, square, triangle)
 - [freq] - frequency in Hz
 - [length] - length of sample in seconds
 - [name] - name to associate with waveform

";

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(display("Unknown command: {}", command))]
    UnknownCommand { command: String },
    #[snafu(display("Invalid arguments for command {}: missing {}", command, what))]
    MissingArgument {
        command: String,
        what: &'static str,
    },
    #[snafu(display("Invalid arguments for command {}: unexpected {:?}", command, arg))]
    UnexpectedArgument { command: String, arg: String },
    #[snafu(display("Invalid input: {} {:?} is not a number", what, text))]
    InvalidNumber {
        what: &'static str,
        text: String,
        source: ParseFloatError,
    },
    #[snafu(display("Invalid input: {}", source))]
    Signal { source: SignalError },
    #[snafu(display("{}", source))]
    Store { source: StoreError },
    #[snafu(display("{}", source))]
    Output { source: OutputError },
    #[snafu(display("Could not write to the output: {}", source))]
    Io { source: io::Error },
}

/// Settings of a session, usually taken from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of amplitude bands above the lowest one when printing.
    pub height: usize,
    /// Columns used when printing. The width of the terminal if not given.
    pub width: Option<usize>,
    /// Highlight clipping samples.
    pub color: bool,
    /// Greet the user and show prompts.
    pub interactive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: 10,
            width: None,
            color: true,
            interactive: false,
        }
    }
}

/// Whether the session goes on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interpreter session, owning all waveforms created in it.
pub struct Session<W> {
    config: Config,
    store: WaveformStore,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self {
            config,
            store: WaveformStore::new(),
            out,
        }
    }

    pub fn store(&self) -> &WaveformStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run commands until the input ends or a `quit` command is given.
    ///
    /// Failing commands are reported on the output and do not end the session,
    /// only errors writing the output do.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        if self.config.interactive {
            writeln!(self.out, "Modular Synthesis")?;
            writeln!(self.out)?;
            self.out.write_all(HELP.as_bytes())?;
        }

        let mut lines = input.lines();
        loop {
            if self.config.interactive {
                write!(self.out, "Enter a command: ")?;
                self.out.flush()?;
            }
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    if self.config.interactive {
                        // finish the prompt line as if the user typed it
                        writeln!(self.out, "quit\nGoodbye!")?;
                    }
                    return Ok(());
                }
            };
            trace!("read {:?}", line);

            match self.run_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(CommandError::Io { source }) => return Err(source),
                Err(err) => {
                    debug!("{:?} failed: {:?}", line, err);
                    writeln!(self.out, "{}", err)?;
                }
            }
        }
    }

    /// Parse and execute one line, blank lines do nothing.
    pub fn run_line(&mut self, line: &str) -> Result<Flow, CommandError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, CommandError> {
        match command {
            Command::Generate {
                kind,
                frequency,
                duration,
                name,
            } => {
                let wave = generator::generate(kind, frequency, duration).context(Signal)?;
                info!("generated {} at {} Hz as {:?}", kind, frequency, name);
                self.store.insert(name, wave);
            }
            Command::Operate { call, name } => {
                let wave = self.apply(&call)?;
                info!("applied {} as {:?}", call.operator(), name);
                self.store.insert(name, wave);
            }
            Command::Print { name } => {
                let wave = self.store.get(&name).context(Store)?;
                let width = self.config.width.unwrap_or_else(term::terminal_width);
                let frame = render::rasterize(wave, width, self.config.height).context(Signal)?;
                let style = term::Style {
                    color: self.config.color,
                    ..term::Style::default()
                };
                term::write_frame(&mut self.out, &frame, &style).context(Io)?;
            }
            Command::Save { name, path } => {
                let wave = self.store.get(&name).context(Store)?;
                output::write_wav(wave, &path).context(Output)?;
                info!("saved {:?} to {}", name, path.display());
            }
            Command::List => {
                if self.store.is_empty() {
                    writeln!(self.out, "No waveforms generated").context(Io)?;
                } else {
                    for name in self.store.names() {
                        writeln!(self.out, " - {}", name).context(Io)?;
                    }
                }
            }
            Command::Help => self.out.write_all(HELP.as_bytes()).context(Io)?,
            Command::Quit => {
                writeln!(self.out, "Goodbye!").context(Io)?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn wave(&self, name: &str) -> Result<&Waveform, CommandError> {
        self.store.get(name).context(Store)
    }

    fn apply(&self, call: &OpCall) -> Result<Waveform, CommandError> {
        Ok(match call {
            OpCall::Add(a, b) => operator::add(self.wave(a)?, self.wave(b)?),
            OpCall::Subtract(a, b) => operator::subtract(self.wave(a)?, self.wave(b)?),
            OpCall::Append(a, b) => operator::append(self.wave(a)?, self.wave(b)?),
            OpCall::Normalise(a) => operator::normalise(self.wave(a)?).context(Signal)?,
            OpCall::Scale(a, factor) => operator::scale(self.wave(a)?, *factor),
            OpCall::Stretch(a, factor) => operator::stretch(self.wave(a)?, *factor).context(Signal)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<Vec<u8>> {
        Session::new(
            Config {
                width: Some(20),
                color: false,
                ..Config::default()
            },
            Vec::new(),
        )
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn generate_and_operate() {
        let mut s = session();
        assert_eq!(s.run_line("gen square 2 1 sq").unwrap(), Flow::Continue);
        s.run_line("gen sine 440 0.5 si").unwrap();
        s.run_line("op append sq si both").unwrap();
        s.run_line("op scale both 0.5 quiet").unwrap();
        s.run_line("op stretch quiet 0.5 short").unwrap();
        assert_eq!(s.store().get("both").unwrap().len(), 36_000);
        assert_eq!(s.store().get("quiet").unwrap()[0], -0.5);
        assert_eq!(s.store().get("short").unwrap().len(), 18_000);
    }

    #[test]
    fn unknown_waveform() {
        let mut s = session();
        match s.run_line("op norm missing n") {
            Err(CommandError::Store { source }) => assert_eq!(
                source,
                StoreError::UnknownWaveform {
                    name: "missing".into()
                }
            ),
            other => panic!("unexpected {:?}", other),
        }
        assert!(s.store().is_empty());
    }

    #[test]
    fn list_and_quit() {
        let mut s = session();
        s.run_line("list").unwrap();
        s.run_line("gen saw 100 0.1 b").unwrap();
        s.run_line("gen saw 100 0.1 a").unwrap();
        s.run_line("l").unwrap();
        assert_eq!(s.run_line("quit").unwrap(), Flow::Quit);
        assert_eq!(
            output(s),
            "No waveforms generated\n - b\n - a\nGoodbye!\n"
        );
    }

    #[test]
    fn print_uses_configured_size() {
        let mut s = session();
        s.run_line("gen square 2 1 sq").unwrap();
        s.run_line("print sq").unwrap();
        let out = output(s);
        let lines: Vec<_> = out.lines().collect();
        // upper clip, 11 bands, lower clip
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|line| line.chars().count() == 20));
        assert_eq!(lines[12 - 1], "█".repeat(20));
    }
}

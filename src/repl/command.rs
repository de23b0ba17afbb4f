// modsynth -- a text based waveform synthesizer
// Copyright (C) 2020  The modsynth authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Parsing of command lines.

use std::path::PathBuf;
use std::str::SplitAsciiWhitespace;

use snafu::ResultExt;

use super::{CommandError, InvalidNumber, Signal};
use crate::generator::WaveKind;
use crate::operator::Operator;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `gen [kind] [freq] [length] [name]`
    Generate {
        kind: WaveKind,
        frequency: f64,
        duration: f64,
        name: String,
    },
    /// `op [operator] [args...] [name]`
    Operate { call: OpCall, name: String },
    Print { name: String },
    Save { name: String, path: PathBuf },
    List,
    Help,
    Quit,
}

/// An operator together with the names of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum OpCall {
    Add(String, String),
    Subtract(String, String),
    Append(String, String),
    Normalise(String),
    Scale(String, f64),
    Stretch(String, f64),
}

impl OpCall {
    pub fn operator(&self) -> Operator {
        match self {
            OpCall::Add(..) => Operator::Add,
            OpCall::Subtract(..) => Operator::Subtract,
            OpCall::Append(..) => Operator::Append,
            OpCall::Normalise(_) => Operator::Normalise,
            OpCall::Scale(..) => Operator::Scale,
            OpCall::Stretch(..) => Operator::Stretch,
        }
    }
}

impl Command {
    /// Parse a single line of input. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_ascii_whitespace();
        let command = match words.next() {
            Some(command) => command,
            None => return Ok(None),
        };
        let mut args = Args { command, words };

        // struct fields are evaluated in order, so they consume arguments in order
        let parsed = match command {
            "g" | "gen" => Command::Generate {
                kind: args.word("kind")?.parse::<WaveKind>().context(Signal)?,
                frequency: args.number("frequency")?,
                duration: args.number("length")?,
                name: args.name()?,
            },
            "o" | "op" => {
                let operator = args.word("operator")?.parse::<Operator>().context(Signal)?;
                let call = match operator {
                    Operator::Add => OpCall::Add(args.name()?, args.name()?),
                    Operator::Subtract => OpCall::Subtract(args.name()?, args.name()?),
                    Operator::Append => OpCall::Append(args.name()?, args.name()?),
                    Operator::Normalise => OpCall::Normalise(args.name()?),
                    Operator::Scale => OpCall::Scale(args.name()?, args.number("amount")?),
                    Operator::Stretch => OpCall::Stretch(args.name()?, args.number("amount")?),
                };
                Command::Operate {
                    call,
                    name: args.name()?,
                }
            }
            "p" | "print" => Command::Print { name: args.name()? },
            "s" | "save" => Command::Save {
                name: args.name()?,
                path: args.word("file")?.into(),
            },
            "l" | "list" => Command::List,
            "h" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => {
                return Err(CommandError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };
        args.finish()?;
        Ok(Some(parsed))
    }
}

/// The remaining arguments of a command.
struct Args<'a> {
    command: &'a str,
    words: SplitAsciiWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, what: &'static str) -> Result<&'a str, CommandError> {
        let command = self.command;
        self.words
            .next()
            .ok_or_else(|| CommandError::MissingArgument {
                command: command.to_string(),
                what,
            })
    }

    fn name(&mut self) -> Result<String, CommandError> {
        self.word("name").map(String::from)
    }

    fn number(&mut self, what: &'static str) -> Result<f64, CommandError> {
        let text = self.word(what)?;
        text.parse::<f64>().context(InvalidNumber { what, text })
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.words.next() {
            Some(arg) => Err(CommandError::UnexpectedArgument {
                command: self.command.to_string(),
                arg: arg.to_string(),
            }),
            None => Ok(()),
        }
    }
}

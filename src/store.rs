//! Named waveforms of a session.

use std::collections::HashMap;

use log::debug;
use snafu::Snafu;

use crate::wave::Waveform;

#[derive(Debug, PartialEq, Snafu)]
pub enum StoreError {
    #[snafu(display("Invalid waveform name: {}", name))]
    UnknownWaveform { name: String },
}

/// Maps names to waveforms. Names are listed in the order they were first stored.
#[derive(Debug, Default)]
pub struct WaveformStore {
    waves: HashMap<String, Waveform>,
    order: Vec<String>,
}

impl WaveformStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a waveform, returning the one previously stored under that name.
    pub fn insert(&mut self, name: impl Into<String>, wave: Waveform) -> Option<Waveform> {
        let name = name.into();
        debug!("storing {} samples as {:?}", wave.len(), name);
        if !self.waves.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.waves.insert(name, wave)
    }

    pub fn get(&self, name: &str) -> Result<&Waveform, StoreError> {
        self.waves
            .get(name)
            .ok_or_else(|| StoreError::UnknownWaveform {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

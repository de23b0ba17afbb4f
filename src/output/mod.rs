//! Getting waveforms out of the program.

pub mod wav;

pub use wav::{write_wav, OutputError};

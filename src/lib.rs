// modules for making and changing waves
pub mod generator;
pub mod operator;
pub mod wave;

// Getting waves out
pub mod output;
pub mod render;

// The interpreter
pub mod repl;
pub mod store;

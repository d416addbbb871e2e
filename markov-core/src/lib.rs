//! Word-level Markov chain text generation library.
//!
//! This crate provides an order-N Markov chain over words including:
//! - Whitespace tokenization with bounded token length
//! - A hash table of prefixes, each owning a bag of successor occurrences
//! - Incremental model construction and frequency-weighted random walks
//! - Plain and debug rendering of generated text
//!
//! A chain goes through a strict lifecycle: a `Builder` consumes the whole
//! word stream, then `finish` freezes it into a `Chain` that generators only
//! read.

/// Construction-time and run-time parameters.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Core model types, construction and generation logic.
pub mod model;

/// Writers for generated words.
pub mod output;

/// Whitespace tokenizer.
pub mod tokenizer;

/// I/O utilities (stream and file loading).
///
/// Not exposed
pub(crate) mod io;

pub use config::{ChainConfig, GenerateConfig};
pub use error::{MarkovError, Result};
pub use model::builder::Builder;
pub use model::chain::{Chain, ChainStats};
pub use model::generator::{Emission, Generator};

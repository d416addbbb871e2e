//! Top-level module for the Markov chain.
//!
//! This module provides a word-level Markov text generator, including:
//! - Interned word storage (`WordPool`) and boundary-aware tokens (`Token`)
//! - Fixed-order prefix windows (`Prefix`)
//! - Per-prefix successor bags (`State`) and their hash table (`StateTable`)
//! - Incremental construction (`Builder`) of a frozen model (`Chain`)
//! - Bounded random walks over a chain (`Generator`)

/// Incremental construction of a chain from a word stream.
pub mod builder;

/// Frozen chain: word pool plus state table, with read-only queries.
pub mod chain;

/// Bounded random walks and parallel batches of independent walks.
pub mod generator;

/// Fixed-order windows of tokens used as table keys.
pub mod prefix;

/// One prefix and the bag of its observed successors.
///
/// Supports uniform sampling over occurrences (reservoir sampling).
pub mod state;

/// Chained hash table keyed by prefixes.
pub mod state_table;

/// Word arena and the boundary-aware token type.
pub mod word;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::builder::Builder;
use super::prefix::Prefix;
use super::state::State;
use super::state_table::StateTable;
use super::word::{Token, WordPool};
use crate::config::ChainConfig;
use crate::error::Result;
use crate::io::read_source;
use crate::tokenizer::{Tokens, read_tokens};

/// Prefix → successor multiset, with `None` standing for the boundary.
///
/// Independent of bucket layout and bag order, so two chains built from the
/// same stream have equal snapshots.
pub type Snapshot = BTreeMap<Vec<Option<String>>, BTreeMap<Option<String>, usize>>;

/// Summary figures of a built chain.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainStats {
	/// Prefix order.
	pub order: usize,
	/// Distinct words stored in the pool.
	pub words: usize,
	/// Distinct prefixes.
	pub states: usize,
	/// Recorded successor occurrences, end-of-text included.
	pub occurrences: usize,
	/// Bucket count of the table.
	pub buckets: usize,
	/// Longest collision chain.
	pub longest_chain: usize,
}

/// A frozen Markov chain: word pool plus state table.
///
/// Only a [`Builder`] can create one, and nothing can mutate it afterwards.
/// A chain can therefore be shared freely between concurrent generation
/// runs.
#[derive(Clone, Debug)]
pub struct Chain {
	config: ChainConfig,
	pool: WordPool,
	table: StateTable,
}

impl Chain {
	pub(crate) fn new(config: ChainConfig, pool: WordPool, table: StateTable) -> Self {
		Self { config, pool, table }
	}

	/// Builds a chain from an in-memory text.
	pub fn from_text(config: ChainConfig, text: &str) -> Self {
		let mut builder = Builder::new(config);
		builder.feed(Tokens::new(text.as_bytes(), config.max_token_len()));
		builder.finish()
	}

	/// Builds a chain from a whole stream.
	///
	/// # Errors
	/// Returns an error if reading the stream fails.
	pub fn from_reader<R: Read>(config: ChainConfig, reader: R) -> Result<Self> {
		let words = read_tokens(reader, config.max_token_len())?;
		let mut builder = Builder::new(config);
		builder.feed(words);
		Ok(builder.finish())
	}

	/// Builds a chain from a corpus file, or standard input when `path` is
	/// `None`.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn from_path<P: AsRef<Path>>(config: ChainConfig, path: Option<P>) -> Result<Self> {
		let bytes = read_source(path)?;
		let mut builder = Builder::new(config);
		builder.feed(Tokens::new(&bytes, config.max_token_len()));
		Ok(builder.finish())
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	/// Prefix order.
	pub fn order(&self) -> usize {
		self.config.order()
	}

	pub fn pool(&self) -> &WordPool {
		&self.pool
	}

	pub fn table(&self) -> &StateTable {
		&self.table
	}

	/// Window every walk starts from.
	pub fn start(&self) -> Prefix {
		Prefix::start(self.order())
	}

	/// Looks up the state of `prefix`, if the build recorded it.
	pub fn lookup(&self, prefix: &Prefix) -> Option<&State> {
		self.table
			.find(prefix, &self.pool)
			.map(|id| self.table.get(id))
	}

	/// Builds a prefix out of word texts.
	///
	/// Returns `None` if a word is unknown or the length is not the order.
	pub fn prefix(&self, words: &[&str]) -> Option<Prefix> {
		if words.len() != self.order() {
			return None;
		}
		Prefix::from_words(&self.pool, words)
	}

	/// Successor counts of the state reached by `words`, keyed by text.
	///
	/// The end-of-text boundary is reported under
	/// [`BOUNDARY_LABEL`](super::word::BOUNDARY_LABEL).
	pub fn successor_counts(&self, words: &[&str]) -> Option<BTreeMap<String, usize>> {
		let state = self.lookup(&self.prefix(words)?)?;
		let counts = state
			.counts()
			.into_iter()
			.map(|(token, count)| (token.text(&self.pool).to_owned(), count))
			.collect();
		Some(counts)
	}

	/// Content of the whole table, see [`Snapshot`].
	pub fn snapshot(&self) -> Snapshot {
		let text = |token: Token| match token {
			Token::Boundary => None,
			Token::Word(id) => Some(self.pool.resolve(id).to_owned()),
		};

		self.table
			.iter()
			.map(|state| {
				let key = state.prefix().tokens().iter().map(|t| text(*t)).collect();
				let bag = state
					.counts()
					.into_iter()
					.map(|(token, count)| (text(token), count))
					.collect();
				(key, bag)
			})
			.collect()
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			order: self.order(),
			words: self.pool.len(),
			states: self.table.len(),
			occurrences: self.table.iter().map(State::len).sum(),
			buckets: self.table.bucket_count(),
			longest_chain: self.table.longest_chain(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_reader_and_builder_agree() {
		let text = "one fish two fish red fish blue fish";
		let config = ChainConfig::default();

		let from_text = Chain::from_text(config, text);
		let from_reader = Chain::from_reader(config, text.as_bytes()).unwrap();
		let mut builder = Builder::new(config);
		builder.feed(text.split_whitespace());
		let built = builder.finish();

		assert_eq!(from_text.snapshot(), from_reader.snapshot());
		assert_eq!(from_text.snapshot(), built.snapshot());
	}

	#[test]
	fn prefix_requires_the_chain_order() {
		let chain = Chain::from_text(ChainConfig::default(), "a b c");
		assert!(chain.prefix(&["a", "b"]).is_some());
		assert!(chain.prefix(&["a"]).is_none());
		assert!(chain.prefix(&["a", "b", "c"]).is_none());
		assert!(chain.prefix(&["a", "z"]).is_none());
	}

	#[test]
	fn stats_count_everything() {
		let chain = Chain::from_text(ChainConfig::default(), "a b a b");
		let stats = chain.stats();
		// (B,B)->a (B,a)->b (a,b)->a (b,a)->b (a,b)->B
		assert_eq!(stats.order, 2);
		assert_eq!(stats.words, 2);
		assert_eq!(stats.states, 4);
		assert_eq!(stats.occurrences, 5);
		assert_eq!(stats.buckets, 4093);
		assert!(stats.longest_chain >= 1);
	}

	#[test]
	fn stats_serialize_as_json() {
		let chain = Chain::from_text(ChainConfig::default(), "a b");
		let json = serde_json::to_value(chain.stats()).unwrap();
		assert_eq!(json["states"], 3);
		assert_eq!(json["order"], 2);
	}

	#[test]
	fn truncation_applies_while_building() {
		let mut config = ChainConfig::default();
		config.set_max_token_len(3).unwrap();
		let chain = Chain::from_text(config, "abcdef ghi");
		assert!(chain.pool().get("abc").is_some());
		assert!(chain.pool().get("abcdef").is_none());
	}
}

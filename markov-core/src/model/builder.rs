use log::{debug, info};

use super::chain::Chain;
use super::prefix::Prefix;
use super::state_table::StateTable;
use super::word::{Token, WordPool};
use crate::config::ChainConfig;

/// Incremental construction of a [`Chain`].
///
/// The builder owns the word pool and the state table while the corpus is
/// read. Each consumed word is recorded as a successor of the current
/// window, then the window slides over it. [`Builder::finish`] records the
/// end-of-text boundary and hands back the frozen chain; there is no way to
/// mutate a chain afterwards.
///
/// # Notes
/// - Words must be consumed in stream order: the window is sequential state.
#[derive(Debug)]
pub struct Builder {
	config: ChainConfig,
	pool: WordPool,
	table: StateTable,
	/// The last `order` consumed tokens, boundaries before the first word.
	window: Prefix,
	/// Number of words consumed so far.
	consumed: usize,
}

impl Builder {
	/// Creates a builder with an empty table and a window of boundaries.
	pub fn new(config: ChainConfig) -> Self {
		debug!(
			"new builder: order {}, {} buckets",
			config.order(),
			config.buckets()
		);
		Self {
			config,
			pool: WordPool::new(),
			table: StateTable::new(config.buckets()),
			window: Prefix::start(config.order()),
			consumed: 0,
		}
	}

	/// Records `word` as a successor of the current window and slides the
	/// window over it.
	pub fn consume(&mut self, word: &str) {
		let id = self.pool.intern(word);
		self.record(Token::Word(id));
		self.consumed += 1;
	}

	/// Consumes every word of `words`, in order.
	pub fn feed<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.consume(word.as_ref());
		}
	}

	/// Number of words consumed so far.
	pub fn consumed(&self) -> usize {
		self.consumed
	}

	/// Current window.
	pub fn window(&self) -> &Prefix {
		&self.window
	}

	/// Records the end-of-text boundary after the last window and freezes
	/// the chain.
	pub fn finish(mut self) -> Chain {
		self.record(Token::Boundary);
		let chain = Chain::new(self.config, self.pool, self.table);
		let stats = chain.stats();
		info!(
			"chain built: {} words read, {} distinct, {} states, {} occurrences, longest chain {}",
			self.consumed, stats.words, stats.states, stats.occurrences, stats.longest_chain
		);
		chain
	}

	fn record(&mut self, token: Token) {
		let id = self.table.find_or_insert(&self.window, &self.pool);
		self.table.get_mut(id).push(token);
		self.window.push(token);
	}
}

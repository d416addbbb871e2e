use crate::error::{MarkovError, Result};

/// Default number of words in a prefix.
pub const DEFAULT_ORDER: usize = 2;

/// Default bucket count of the state table.
pub const DEFAULT_BUCKETS: usize = 4093;

/// Default longest token, in bytes. Longer runs are truncated.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 99;

/// Default maximum number of generated words.
pub const DEFAULT_MAX_WORDS: usize = 10_000;

/// Construction-time parameters of a chain.
///
/// The order is fixed once a [`Builder`](crate::model::builder::Builder) is
/// created from this configuration.
///
/// # Invariants
/// - `order`, `buckets` and `max_token_len` are all >= 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
	order: usize,
	buckets: usize,
	max_token_len: usize,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			buckets: DEFAULT_BUCKETS,
			max_token_len: DEFAULT_MAX_TOKEN_LEN,
		}
	}
}

impl ChainConfig {
	/// Creates a configuration with the given order and default capacity.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize) -> Result<Self> {
		let mut config = Self::default();
		config.set_order(order)?;
		Ok(config)
	}

	/// Number of words in a prefix.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Bucket count of the state table.
	pub fn buckets(&self) -> usize {
		self.buckets
	}

	/// Longest token kept by the tokenizer, in bytes.
	pub fn max_token_len(&self) -> usize {
		self.max_token_len
	}

	/// Sets the prefix order.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order == 0 {
			return Err(MarkovError::InvalidConfig("order must be >= 1".to_owned()));
		}
		self.order = order;
		Ok(())
	}

	/// Sets the bucket count.
	///
	/// # Errors
	/// Returns an error if `buckets` is 0.
	pub fn set_buckets(&mut self, buckets: usize) -> Result<()> {
		if buckets == 0 {
			return Err(MarkovError::InvalidConfig("buckets must be >= 1".to_owned()));
		}
		self.buckets = buckets;
		Ok(())
	}

	/// Sets the longest token length.
	///
	/// # Errors
	/// Returns an error if `max_token_len` is 0.
	pub fn set_max_token_len(&mut self, max_token_len: usize) -> Result<()> {
		if max_token_len == 0 {
			return Err(MarkovError::InvalidConfig("max_token_len must be >= 1".to_owned()));
		}
		self.max_token_len = max_token_len;
		Ok(())
	}
}

/// Parameters of one generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateConfig {
	/// Maximum number of emitted words.
	pub max_words: usize,
	/// Emit `(prefix) -> word` records instead of plain words.
	pub debug: bool,
}

impl Default for GenerateConfig {
	fn default() -> Self {
		Self { max_words: DEFAULT_MAX_WORDS, debug: false }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_classic_constants() {
		let config = ChainConfig::default();
		assert_eq!(config.order(), 2);
		assert_eq!(config.buckets(), 4093);
		assert_eq!(config.max_token_len(), 99);
		assert_eq!(GenerateConfig::default().max_words, 10_000);
		assert!(!GenerateConfig::default().debug);
	}

	#[test]
	fn zero_values_are_rejected() {
		assert!(matches!(ChainConfig::new(0), Err(MarkovError::InvalidConfig(_))));

		let mut config = ChainConfig::new(3).unwrap();
		assert!(config.set_buckets(0).is_err());
		assert!(config.set_max_token_len(0).is_err());
		assert_eq!(config, ChainConfig::new(3).unwrap());

		config.set_buckets(11).unwrap();
		config.set_max_token_len(5).unwrap();
		assert_eq!(config.buckets(), 11);
		assert_eq!(config.max_token_len(), 5);
	}
}

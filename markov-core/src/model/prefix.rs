use std::fmt;

use super::word::{Token, WordPool};

/// Ordered window of the `order` tokens preceding a successor.
///
/// Two prefixes are equal iff every slot holds the same token, in the same
/// position. Because the pool deduplicates texts, comparing tokens is
/// comparing word contents.
///
/// # Invariants
/// - The length never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
	tokens: Box<[Token]>,
}

impl Prefix {
	/// Window of `order` boundary markers, the "nothing read yet" state.
	pub fn start(order: usize) -> Self {
		Self { tokens: vec![Token::Boundary; order].into_boxed_slice() }
	}

	/// Builds a prefix from explicit tokens.
	pub fn from_tokens(tokens: Vec<Token>) -> Self {
		Self { tokens: tokens.into_boxed_slice() }
	}

	/// Builds a prefix from word texts already present in `pool`.
	///
	/// Returns `None` if a word was never stored: such a prefix cannot
	/// exist in a table built over this pool.
	pub fn from_words(pool: &WordPool, words: &[&str]) -> Option<Self> {
		let tokens = words
			.iter()
			.map(|word| pool.get(word).map(Token::Word))
			.collect::<Option<Vec<_>>>()?;
		Some(Self::from_tokens(tokens))
	}

	/// Number of slots (the chain order).
	pub fn order(&self) -> usize {
		self.tokens.len()
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Slides the window: drops the oldest token and appends `token`.
	pub fn push(&mut self, token: Token) {
		if self.tokens.is_empty() {
			return;
		}
		self.tokens.rotate_left(1);
		let last = self.tokens.len() - 1;
		self.tokens[last] = token;
	}

	/// Word texts of the window, boundaries rendered as a label.
	pub fn words<'a>(&self, pool: &'a WordPool) -> Vec<&'a str> {
		self.tokens.iter().map(|token| token.text(pool)).collect()
	}

	/// Adapter implementing `Display` as `w1 w2 ... wn`.
	pub fn display<'a>(&'a self, pool: &'a WordPool) -> PrefixDisplay<'a> {
		PrefixDisplay { prefix: self, pool }
	}
}

/// See [`Prefix::display`].
pub struct PrefixDisplay<'a> {
	prefix: &'a Prefix,
	pool: &'a WordPool,
}

impl fmt::Display for PrefixDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, token) in self.prefix.tokens.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			f.write_str(token.text(self.pool))?;
		}
		Ok(())
	}
}

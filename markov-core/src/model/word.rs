use std::collections::HashMap;

/// Label used when a boundary marker has to be shown to a human.
pub const BOUNDARY_LABEL: &str = "<BOUNDARY>";

/// Bytes fed to the prefix hash for a boundary marker.
///
/// A lone newline can never appear inside a whitespace-split token.
const BOUNDARY_BYTES: &[u8] = b"\n";

/// Dense index of a word stored in a [`WordPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl WordId {
	/// Position of the word inside its pool.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// One slot of a prefix window or one recorded successor.
///
/// `Boundary` marks both the start of the text (initial window) and its end
/// (last recorded successor). It can never be confused with a real word,
/// whatever that word's text is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
	Boundary,
	Word(WordId),
}

impl Token {
	/// Returns `true` for the boundary marker.
	pub fn is_boundary(self) -> bool {
		matches!(self, Token::Boundary)
	}

	/// Bytes contributing to the prefix hash.
	pub fn bytes(self, pool: &WordPool) -> &[u8] {
		match self {
			Token::Boundary => BOUNDARY_BYTES,
			Token::Word(id) => pool.resolve(id).as_bytes(),
		}
	}

	/// Human readable text, the boundary rendering as [`BOUNDARY_LABEL`].
	pub fn text(self, pool: &WordPool) -> &str {
		match self {
			Token::Boundary => BOUNDARY_LABEL,
			Token::Word(id) => pool.resolve(id),
		}
	}
}

/// Arena owning every word read from the corpus.
///
/// Each distinct text is stored once and never freed while the pool lives,
/// so a [`WordId`] handed out by [`WordPool::intern`] stays valid for the
/// whole lifetime of the model. Two ids are equal iff their texts are equal.
#[derive(Clone, Debug, Default)]
pub struct WordPool {
	/// Word texts, indexed by `WordId`.
	words: Vec<Box<str>>,
	/// Reverse index used for deduplication.
	index: HashMap<Box<str>, WordId>,
}

impl WordPool {
	/// Creates an empty pool.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `word` if it is new and returns its id.
	pub fn intern(&mut self, word: &str) -> WordId {
		if let Some(id) = self.index.get(word) {
			return *id;
		}
		let id = WordId(self.words.len() as u32);
		self.words.push(word.into());
		self.index.insert(word.into(), id);
		id
	}

	/// Returns the id of an already stored word, without storing it.
	pub fn get(&self, word: &str) -> Option<WordId> {
		self.index.get(word).copied()
	}

	/// Returns the text of a stored word.
	///
	/// Ids are only minted by this pool, so the lookup cannot miss.
	pub fn resolve(&self, id: WordId) -> &str {
		&self.words[id.index()]
	}

	/// Number of distinct words stored.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if no word has been stored yet.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

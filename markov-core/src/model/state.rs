use std::collections::BTreeMap;

use rand::Rng;

use super::prefix::Prefix;
use super::word::Token;

/// Represents a state of the Markov chain.
///
/// A `State` corresponds to one distinct prefix and stores every observed
/// continuation of that prefix as a separate occurrence. The bag of
/// occurrences *is* the frequency distribution: a word seen three times
/// after the prefix appears three times in `successors`. No counters exist.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during the build phase
/// - Pick one occurrence uniformly at random during generation
///
/// ## Invariants
/// - The prefix never changes after creation
/// - The bag is append-only, and is never empty once the build has touched
///   the state
#[derive(Clone, Debug)]
pub struct State {
	/// The window this state was created for, retained as given.
	prefix: Prefix,
	/// Observed continuations, one entry per occurrence.
	successors: Vec<Token>,
}

impl State {
	/// Creates a new state with an empty bag.
	pub(crate) fn new(prefix: Prefix) -> Self {
		Self {
			prefix,
			successors: Vec::new(),
		}
	}

	/// Records one more occurrence of `token` following this prefix.
	pub(crate) fn push(&mut self, token: Token) {
		self.successors.push(token);
	}

	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}

	/// All recorded occurrences, in insertion order.
	pub fn successors(&self) -> &[Token] {
		&self.successors
	}

	/// Number of recorded occurrences.
	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Occurrence count per distinct successor.
	pub fn counts(&self) -> BTreeMap<Token, usize> {
		let mut counts = BTreeMap::new();
		for token in &self.successors {
			*counts.entry(*token).or_insert(0) += 1;
		}
		counts
	}

	/// Picks one occurrence uniformly at random (reservoir sampling, size 1).
	///
	/// The k-th visited occurrence replaces the held candidate with
	/// probability exactly `1/k`, which leaves every occurrence selected with
	/// probability `1/len()` without knowing `len()` up front. Since repeated
	/// words are repeated occurrences, this is frequency-weighted sampling
	/// over distinct words.
	///
	/// Returns `None` if the bag is empty.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Token> {
		let mut held = None;
		let mut seen: u32 = 0;
		for token in &self.successors {
			seen = seen.saturating_add(1);
			if rng.random_ratio(1, seen) {
				held = Some(*token);
			}
		}
		held
	}
}

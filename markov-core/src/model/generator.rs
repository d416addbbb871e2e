use std::fmt;
use std::iter::FusedIterator;
use std::sync::mpsc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::chain::Chain;
use super::prefix::Prefix;
use super::word::Token;
use crate::error::{MarkovError, Result};

/// One generated word, with the window that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emission<'a> {
	/// Window the word was sampled from, boundaries rendered as a label.
	pub prefix: Vec<&'a str>,
	/// The sampled word.
	pub word: &'a str,
}

impl fmt::Display for Emission<'_> {
	/// Debug record: `(w1 w2) -> word`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}) -> {}", self.prefix.join(" "), self.word)
	}
}

/// Seed taken from the wall clock, in whole seconds.
///
/// Two generators created within the same second get the same seed.
pub fn time_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_secs())
		.unwrap_or(0)
}

/// Bounded random walk over a frozen [`Chain`].
///
/// The walk starts from the all-boundary window. Each step looks up the
/// current window, picks one recorded occurrence uniformly at random,
/// emits it and slides the window. It stops when the end-of-text boundary
/// is picked or after `max_words` emitted words, whichever comes first.
///
/// # Notes
/// - Every window reached was recorded by the build, so a failed lookup
///   is reported once as [`MarkovError::MissingState`] and ends the walk.
/// - The iterator is fused: once it returned `None` or an error, it only
///   returns `None`.
#[derive(Debug)]
pub struct Generator<'a, R = StdRng> {
	chain: &'a Chain,
	rng: R,
	window: Prefix,
	max_words: usize,
	steps: usize,
	running: bool,
}

impl<'a> Generator<'a, StdRng> {
	/// Creates a generator seeded from the wall clock.
	pub fn new(chain: &'a Chain, max_words: usize) -> Self {
		Self::with_rng(chain, max_words, StdRng::seed_from_u64(time_seed()))
	}

	/// Creates a generator with a fixed seed, for reproducible runs.
	pub fn seeded(chain: &'a Chain, max_words: usize, seed: u64) -> Self {
		Self::with_rng(chain, max_words, StdRng::seed_from_u64(seed))
	}
}

impl<'a, R: Rng> Generator<'a, R> {
	/// Creates a generator drawing from `rng`.
	pub fn with_rng(chain: &'a Chain, max_words: usize, rng: R) -> Self {
		Self {
			chain,
			rng,
			window: chain.start(),
			max_words,
			steps: 0,
			running: true,
		}
	}

	/// Starts the walk at `window` instead of the all-boundary window.
	pub fn starting_at(mut self, window: Prefix) -> Self {
		self.window = window;
		self
	}

	/// Number of words emitted so far.
	pub fn steps(&self) -> usize {
		self.steps
	}

	/// Returns `false` once the walk ended.
	pub fn is_running(&self) -> bool {
		self.running && self.steps < self.max_words
	}

	/// Runs the walk to its end and returns the emitted words.
	///
	/// # Errors
	/// Returns the consistency fault if the walk met an unknown window.
	pub fn collect_words(self) -> Result<Vec<String>> {
		self.map(|emission| emission.map(|e| e.word.to_owned())).collect()
	}

	/// One step of the walk; `Ok(None)` when the end of text was picked.
	fn step(&mut self) -> Result<Option<Emission<'a>>> {
		let chain = self.chain;
		let pool = chain.pool();

		let picked = chain.lookup(&self.window).and_then(|state| state.pick(&mut self.rng));
		let Some(token) = picked else {
			let window = self.window.display(pool).to_string();
			error!("no state recorded for window ({window})");
			return Err(MarkovError::MissingState(window));
		};

		match token {
			Token::Boundary => Ok(None),
			Token::Word(id) => {
				let emission = Emission {
					prefix: self.window.words(pool),
					word: pool.resolve(id),
				};
				self.window.push(token);
				self.steps += 1;
				Ok(Some(emission))
			}
		}
	}
}

impl<'a, R: Rng> Iterator for Generator<'a, R> {
	type Item = Result<Emission<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if !self.is_running() {
			self.running = false;
			return None;
		}

		match self.step() {
			Ok(Some(emission)) => Some(Ok(emission)),
			Ok(None) => {
				debug!("end of text reached after {} words", self.steps);
				self.running = false;
				None
			}
			Err(e) => {
				self.running = false;
				Some(Err(e))
			}
		}
	}
}

impl<R: Rng> FusedIterator for Generator<'_, R> {}

/// Runs `runs` independent walks over `chain` in parallel, seeded from the
/// wall clock.
///
/// See [`generate_many_seeded`].
pub fn generate_many(chain: &Chain, runs: usize, max_words: usize) -> Result<Vec<Vec<String>>> {
	generate_many_seeded(chain, runs, max_words, time_seed())
}

/// Runs `runs` independent walks over `chain` in parallel.
///
/// # Behavior
/// - Spawns one worker per CPU (never more than `runs`).
/// - Run `i` draws from a generator seeded with `seed + i`, so the result
///   does not depend on the number of workers.
/// - Results are returned in run order.
///
/// # Errors
/// Returns the first consistency fault, in run order.
pub fn generate_many_seeded(
	chain: &Chain,
	runs: usize,
	max_words: usize,
	seed: u64,
) -> Result<Vec<Vec<String>>> {
	if runs == 0 {
		return Ok(Vec::new());
	}
	let workers = num_cpus::get().clamp(1, runs);
	debug!("{runs} runs over {workers} workers");

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for worker in 0..workers {
			let tx = tx.clone();
			scope.spawn(move || {
				for run in (worker..runs).step_by(workers) {
					let generator = Generator::seeded(chain, max_words, seed.wrapping_add(run as u64));
					if tx.send((run, generator.collect_words())).is_err() {
						return;
					}
				}
			});
		}
	});
	drop(tx);

	let mut results: Vec<(usize, Result<Vec<String>>)> = rx.iter().collect();
	results.sort_by_key(|(run, _)| *run);
	results.into_iter().map(|(_, words)| words).collect()
}

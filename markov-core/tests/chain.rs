use std::collections::BTreeMap;

use markov_core::model::word::BOUNDARY_LABEL;
use markov_core::{Builder, Chain, ChainConfig, Generator};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CORPUS: &str = "the cat sat on the mat . the dog sat on the rug .";

/// Random source returning the same value forever.
struct FixedRng(u64);

impl RngCore for FixedRng {
	fn next_u32(&mut self) -> u32 {
		self.0 as u32
	}

	fn next_u64(&mut self) -> u64 {
		self.0
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		dst.fill(self.0 as u8);
	}
}

fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
	pairs.iter().map(|(word, count)| (word.to_string(), *count)).collect()
}

#[test]
fn corpus_transitions_are_recorded() {
	let chain = Chain::from_text(ChainConfig::default(), CORPUS);

	assert_eq!(chain.successor_counts(&["the", "cat"]), Some(counts(&[("sat", 1)])));
	assert_eq!(chain.successor_counts(&["cat", "sat"]), Some(counts(&[("on", 1)])));
	assert_eq!(chain.successor_counts(&["on", "the"]), Some(counts(&[("mat", 1), ("rug", 1)])));
	assert_eq!(chain.successor_counts(&["sat", "on"]), Some(counts(&[("the", 2)])));
	assert_eq!(chain.successor_counts(&["rug", "."]), Some(counts(&[(BOUNDARY_LABEL, 1)])));
	assert_eq!(chain.successor_counts(&["cat", "the"]), None);

	let start = chain.lookup(&chain.start()).expect("start state");
	assert_eq!(start.len(), 1);

	let stats = chain.stats();
	assert_eq!(stats.words, 8);
	assert_eq!(stats.states, 13);
	assert_eq!(stats.occurrences, 15);
}

#[test]
fn pinned_sources_reproduce_pinned_walks() {
	let chain = Chain::from_text(ChainConfig::default(), CORPUS);

	let last = Generator::with_rng(&chain, 10_000, FixedRng(0)).collect_words().unwrap();
	assert_eq!(last.join(" "), "the cat sat on the rug .");

	let first = Generator::with_rng(&chain, 12, FixedRng(u64::MAX)).collect_words().unwrap();
	assert_eq!(first.join(" "), "the cat sat on the mat . the dog sat on the");
}

#[test]
fn seeded_walks_are_reproducible() {
	let chain = Chain::from_text(ChainConfig::default(), CORPUS);
	for seed in [0, 1, 42, 2024] {
		let a = Generator::with_rng(&chain, 500, StdRng::seed_from_u64(seed)).collect_words().unwrap();
		let b = Generator::seeded(&chain, 500, seed).collect_words().unwrap();
		assert_eq!(a, b);
		assert_eq!(a.last().map(String::as_str), Some("."));
	}
}

#[test]
fn rebuilding_yields_the_same_content() {
	let a = Chain::from_text(ChainConfig::default(), CORPUS);

	let mut config = ChainConfig::default();
	config.set_buckets(3).unwrap();
	let mut builder = Builder::new(config);
	builder.feed(CORPUS.split_whitespace());
	let b = builder.finish();

	assert_eq!(a.snapshot(), b.snapshot());
	assert_eq!(a.snapshot(), Chain::from_text(ChainConfig::default(), CORPUS).snapshot());
	assert!(b.table().longest_chain() > a.table().longest_chain());
}

#[test]
fn sampling_follows_corpus_frequencies() {
	// (x, y) is followed by "a" three times and "b" once.
	let chain = Chain::from_text(ChainConfig::default(), "x y a x y a x y a x y b");
	let window = chain.prefix(&["x", "y"]).unwrap();
	assert_eq!(chain.successor_counts(&["x", "y"]), Some(counts(&[("a", 3), ("b", 1)])));

	let mut rng = StdRng::seed_from_u64(0x5eed);
	let trials = 20_000;
	let mut a = 0;
	for _ in 0..trials {
		let words = Generator::with_rng(&chain, 1, &mut rng)
			.starting_at(window.clone())
			.collect_words()
			.unwrap();
		match words.as_slice() {
			[word] if word == "a" => a += 1,
			[word] => assert_eq!(word, "b"),
			other => panic!("unexpected walk {other:?}"),
		}
	}

	let share = a as f64 / trials as f64;
	assert!((share - 0.75).abs() < 0.02, "share of \"a\" was {share}");
}

#[test]
fn higher_orders_need_longer_matches() {
	let chain = Chain::from_text(ChainConfig::new(3).unwrap(), CORPUS);
	assert_eq!(chain.successor_counts(&["sat", "on", "the"]), Some(counts(&[("mat", 1), ("rug", 1)])));
	assert_eq!(chain.successor_counts(&["the", "cat", "sat"]), Some(counts(&[("on", 1)])));

	let words = Generator::with_rng(&chain, 100, FixedRng(0)).collect_words().unwrap();
	assert_eq!(words.join(" "), "the cat sat on the rug .");
}

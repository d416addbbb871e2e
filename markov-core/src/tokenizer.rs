//! Whitespace tokenizer feeding the builder.
//!
//! A token is a maximal run of non-whitespace bytes. Nothing else is done:
//! no case folding, no punctuation handling.

use std::io::Read;

use crate::io::read_all;

/// Whitespace as understood by C's `isspace` in the "C" locale.
pub fn is_space(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Iterator over the tokens of an in-memory byte buffer.
///
/// Tokens longer than `max_len` bytes are truncated (never split, never
/// rejected). The cut backs off to a UTF-8 character boundary, but always
/// keeps at least one character. Invalid UTF-8 is replaced lossily.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
	input: &'a [u8],
	max_len: usize,
}

impl<'a> Tokens<'a> {
	pub fn new(input: &'a [u8], max_len: usize) -> Self {
		Self { input, max_len }
	}
}

impl Iterator for Tokens<'_> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		let start = self.input.iter().position(|byte| !is_space(*byte))?;
		let rest = &self.input[start..];
		let end = rest.iter().position(|byte| is_space(*byte)).unwrap_or(rest.len());
		let (run, tail) = rest.split_at(end);
		self.input = tail;
		Some(truncate(run, self.max_len))
	}
}

/// Converts a raw run into a word of at most `max_len` bytes.
fn truncate(run: &[u8], max_len: usize) -> String {
	let word = String::from_utf8_lossy(run);
	if word.len() <= max_len {
		return word.into_owned();
	}

	let first = word.chars().next().map_or(0, char::len_utf8);
	let cut = word
		.char_indices()
		.map(|(i, c)| i + c.len_utf8())
		.take_while(|end| *end <= max_len)
		.last()
		.unwrap_or(first);
	word[..cut].to_owned()
}

/// Reads the whole stream and splits it into tokens.
pub fn read_tokens<R: Read>(reader: R, max_len: usize) -> std::io::Result<Vec<String>> {
	let bytes = read_all(reader)?;
	Ok(Tokens::new(&bytes, max_len).collect())
}

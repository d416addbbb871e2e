use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole stream into memory.
pub(crate) fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	reader.read_to_end(&mut contents)?;
	Ok(contents)
}

/// Reads a corpus file, or standard input when no path is given.
///
/// - Reads the entire input into memory
/// - Does not interpret the bytes; tokenizing is left to the caller
pub(crate) fn read_source<P: AsRef<Path>>(path: Option<P>) -> io::Result<Vec<u8>> {
	match path {
		Some(path) => read_all(File::open(path)?),
		None => read_all(io::stdin().lock()),
	}
}

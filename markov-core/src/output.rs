//! Presentation of generated words.

use std::io::Write;

use crate::error::Result;
use crate::model::generator::Emission;

/// Writes each word followed by a space, all on one running line.
///
/// A final newline is written if at least one word was. Returns the number
/// of words written.
///
/// # Errors
/// Returns the first write error or generation fault. Words emitted before
/// a fault are already written.
pub fn write_plain<'a, W, I>(out: &mut W, emissions: I) -> Result<usize>
where
	W: Write,
	I: IntoIterator<Item = Result<Emission<'a>>>,
{
	let mut written = 0;
	for emission in emissions {
		write!(out, "{} ", emission?.word)?;
		written += 1;
	}
	if written > 0 {
		writeln!(out)?;
	}
	Ok(written)
}

/// Writes one `(prefix) -> word` record per line.
///
/// # Errors
/// See [`write_plain`].
pub fn write_debug<'a, W, I>(out: &mut W, emissions: I) -> Result<usize>
where
	W: Write,
	I: IntoIterator<Item = Result<Emission<'a>>>,
{
	let mut written = 0;
	for emission in emissions {
		writeln!(out, "{}", emission?)?;
		written += 1;
	}
	Ok(written)
}

/// Dispatches to [`write_debug`] or [`write_plain`].
pub fn write_emissions<'a, W, I>(out: &mut W, emissions: I, debug: bool) -> Result<usize>
where
	W: Write,
	I: IntoIterator<Item = Result<Emission<'a>>>,
{
	if debug {
		write_debug(out, emissions)
	} else {
		write_plain(out, emissions)
	}
}

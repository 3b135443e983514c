use std::io::{self, Bytes, Read};
use std::slice;

use crate::error::MarkovError;

/// Longest accepted word, in bytes of its UTF-8 encoding.
pub const MAX_WORD_LENGTH: usize = 1023;

/// Separators used by `StreamingWordSource` when none are given.
pub const DEFAULT_SEPARATORS: [&str; 4] = [" ", "\t", "\n", "\r"];

/// Checks a word against `MAX_WORD_LENGTH`.
pub(crate) fn check_word_length(word: &str) -> Result<(), MarkovError> {
	if word.len() > MAX_WORD_LENGTH {
		return Err(MarkovError::WordTooLong { length: word.len(), max: MAX_WORD_LENGTH });
	}
	Ok(())
}

/// Supply of words fed to a `MarkovChain`.
///
/// `next_word` is called repeatedly until it returns `Ok(None)`.
pub trait WordSource {
	/// Returns the next word, or `None` once the supply is exhausted.
	///
	/// # Errors
	/// - `MarkovError::WordTooLong` if the next word exceeds `MAX_WORD_LENGTH`
	/// - `MarkovError::Io` if the underlying stream fails
	fn next_word(&mut self) -> Result<Option<String>, MarkovError>;
}

impl<S: WordSource + ?Sized> WordSource for &mut S {
	fn next_word(&mut self) -> Result<Option<String>, MarkovError> {
		(**self).next_word()
	}
}

/// Splits a byte stream into words.
///
/// A word ends where one of the separator sequences ends. Consecutive
/// separators produce no empty words. The text after the last separator is
/// the final word.
///
/// - With no separators, every byte is its own word
/// - The stream is read byte by byte; wrap files in a `BufReader`
/// - Words must be valid UTF-8, otherwise an `InvalidData` I/O error is raised
pub struct StreamingWordSource<R: Read> {
	bytes: Bytes<R>,
	separators: Vec<Vec<u8>>,
	longest_separator: usize,
	buffer: Vec<u8>,
	finished: bool,
}

impl<R: Read> StreamingWordSource<R> {
	/// Creates a source splitting on `DEFAULT_SEPARATORS`.
	pub fn new(reader: R) -> Self {
		Self::with_separators(reader, &DEFAULT_SEPARATORS)
	}

	/// Creates a source splitting on the given separator sequences.
	///
	/// Empty separators are ignored.
	pub fn with_separators<S: AsRef<str>>(reader: R, separators: &[S]) -> Self {
		let separators: Vec<Vec<u8>> = separators
			.iter()
			.map(|s| s.as_ref().as_bytes().to_vec())
			.filter(|s| !s.is_empty())
			.collect();
		let longest_separator = separators.iter().map(Vec::len).max().unwrap_or(0);
		Self {
			bytes: reader.bytes(),
			separators,
			longest_separator,
			buffer: Vec::with_capacity(MAX_WORD_LENGTH),
			finished: false,
		}
	}

	/// Length of the separator the buffer currently ends with, if any.
	fn trailing_separator(&self) -> Option<usize> {
		self.separators
			.iter()
			.find(|sep| self.buffer.ends_with(sep))
			.map(Vec::len)
	}

	fn take_word(&mut self, length: usize) -> Result<String, MarkovError> {
		let bytes: Vec<u8> = self.buffer.drain(..).take(length).collect();
		let word = String::from_utf8(bytes)
			.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
		check_word_length(&word)?;
		Ok(word)
	}
}

impl<R: Read> WordSource for StreamingWordSource<R> {
	fn next_word(&mut self) -> Result<Option<String>, MarkovError> {
		if self.finished {
			return Ok(None);
		}

		loop {
			let byte = match self.bytes.next() {
				Some(byte) => byte?,
				None => {
					self.finished = true;
					if self.buffer.is_empty() {
						return Ok(None);
					}
					let length = self.buffer.len();
					return self.take_word(length).map(Some);
				}
			};
			self.buffer.push(byte);

			if self.separators.is_empty() {
				let length = self.buffer.len();
				return self.take_word(length).map(Some);
			}

			if let Some(separator) = self.trailing_separator() {
				let length = self.buffer.len() - separator;
				if length == 0 {
					// Separator right after another one
					self.buffer.clear();
					continue;
				}
				return self.take_word(length).map(Some);
			}

			// No separator can end here and still leave a short enough word
			if self.buffer.len() > MAX_WORD_LENGTH + self.longest_separator {
				return Err(MarkovError::WordTooLong { length: self.buffer.len(), max: MAX_WORD_LENGTH });
			}
		}
	}
}

/// Iterates over a pre-built list of words.
///
/// Each word is checked against `MAX_WORD_LENGTH` when it is handed out.
pub struct StaticWordSource<'a, S: AsRef<str>> {
	words: slice::Iter<'a, S>,
}

impl<'a, S: AsRef<str>> StaticWordSource<'a, S> {
	pub fn new(words: &'a [S]) -> Self {
		Self { words: words.iter() }
	}
}

impl<S: AsRef<str>> WordSource for StaticWordSource<'_, S> {
	fn next_word(&mut self) -> Result<Option<String>, MarkovError> {
		match self.words.next() {
			Some(word) => {
				let word = word.as_ref();
				check_word_length(word)?;
				Ok(Some(word.to_owned()))
			}
			None => Ok(None),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn drain<W: WordSource>(mut source: W) -> Result<Vec<String>, MarkovError> {
		let mut words = Vec::new();
		while let Some(word) = source.next_word()? {
			words.push(word);
		}
		Ok(words)
	}

	struct FailingReader;

	impl Read for FailingReader {
		fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
		}
	}

	#[test]
	fn splits_on_default_whitespace() {
		let source = StreamingWordSource::new(Cursor::new("the cat\tsat\r\non  the mat\n"));
		assert_eq!(drain(source).unwrap(), vec!["the", "cat", "sat", "on", "the", "mat"]);
	}

	#[test]
	fn multi_byte_separators() {
		let source = StreamingWordSource::with_separators(Cursor::new("a--b----c-d"), &["--"]);
		assert_eq!(drain(source).unwrap(), vec!["a", "b", "c-d"]);
	}

	#[test]
	fn no_separators_yields_bytes() {
		let empty: [&str; 0] = [];
		let source = StreamingWordSource::with_separators(Cursor::new("abc"), &empty);
		assert_eq!(drain(source).unwrap(), vec!["a", "b", "c"]);
	}

	#[test]
	fn empty_stream_has_no_words() {
		let mut source = StreamingWordSource::new(Cursor::new(""));
		assert!(source.next_word().unwrap().is_none());
		assert!(source.next_word().unwrap().is_none());
	}

	#[test]
	fn keeps_utf8_words() {
		let source = StreamingWordSource::new(Cursor::new("été déjà vu"));
		assert_eq!(drain(source).unwrap(), vec!["été", "déjà", "vu"]);
	}

	#[test]
	fn longest_word_is_accepted() {
		let text = format!("{} end", "x".repeat(MAX_WORD_LENGTH));
		let words = drain(StreamingWordSource::new(Cursor::new(text))).unwrap();
		assert_eq!(words[0].len(), MAX_WORD_LENGTH);
		assert_eq!(words[1], "end");
	}

	#[test]
	fn overlong_word_is_a_constraint_violation() {
		let text = format!("ok {} tail", "x".repeat(MAX_WORD_LENGTH + 1));
		let mut source = StreamingWordSource::new(Cursor::new(text));
		assert_eq!(source.next_word().unwrap().as_deref(), Some("ok"));
		let err = source.next_word().unwrap_err();
		assert!(matches!(err, MarkovError::WordTooLong { max: MAX_WORD_LENGTH, .. }));
	}

	#[test]
	fn overlong_trailing_word_is_rejected() {
		let text = "y".repeat(MAX_WORD_LENGTH + 1);
		let mut source = StreamingWordSource::new(Cursor::new(text));
		assert!(matches!(source.next_word(), Err(MarkovError::WordTooLong { .. })));
	}

	#[test]
	fn reader_failure_is_io() {
		let mut source = StreamingWordSource::new(FailingReader);
		assert!(matches!(source.next_word(), Err(MarkovError::Io(_))));
	}

	#[test]
	fn invalid_utf8_is_io() {
		let mut source = StreamingWordSource::new(Cursor::new(vec![0xff, 0xfe, b' ']));
		assert!(matches!(source.next_word(), Err(MarkovError::Io(_))));
	}

	#[test]
	fn static_source_iterates_in_order() {
		let words = ["a", "b", "a"];
		assert_eq!(drain(StaticWordSource::new(&words)).unwrap(), vec!["a", "b", "a"]);
	}

	#[test]
	fn static_source_checks_length() {
		let words = vec!["fine".to_owned(), "z".repeat(MAX_WORD_LENGTH + 1)];
		let mut source = StaticWordSource::new(&words);
		assert_eq!(source.next_word().unwrap().as_deref(), Some("fine"));
		assert!(matches!(source.next_word(), Err(MarkovError::WordTooLong { .. })));
	}
}

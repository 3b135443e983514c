use std::io;

use thiserror::Error;

/// Errors surfaced by the Markov chain and its word sources.
///
/// None of these are fatal: they are returned to the immediate caller,
/// which decides whether to retry, skip the input or give up. A dead end
/// reached while generating is not an error, the chain reseeds itself.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The last word of an empty context window was requested.
	#[error("context window is empty")]
	MissingElement,

	/// The underlying word stream could not be read.
	#[error("word source is unreadable: {0}")]
	Io(#[from] io::Error),

	/// A word is longer than the accepted bound (in bytes).
	#[error("word of {length} bytes exceeds the {max} byte limit")]
	WordTooLong { length: usize, max: usize },

	/// The interner ran out of word identities.
	#[error("word store is full")]
	VocabularyFull,

	/// Nothing was ever fed, so there is no entry point to start from.
	#[error("model is empty, feed it before generating")]
	ModelEmpty,

	/// The chain order is outside `1..=MAX_ORDER`.
	#[error("invalid chain order {0}")]
	InvalidOrder(usize),
}

impl MarkovError {
	/// Returns `true` for errors caused by input breaking a size constraint.
	pub fn is_constraint_violation(&self) -> bool {
		matches!(self, Self::WordTooLong { .. } | Self::VocabularyFull)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn io_errors_convert() {
		let err: MarkovError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
		assert!(matches!(err, MarkovError::Io(_)));
		assert!(!err.is_constraint_violation());
	}

	#[test]
	fn constraint_group() {
		assert!(MarkovError::WordTooLong { length: 2000, max: 1023 }.is_constraint_violation());
		assert!(MarkovError::VocabularyFull.is_constraint_violation());
		assert!(!MarkovError::ModelEmpty.is_constraint_violation());
	}

	#[test]
	fn messages_mention_sizes() {
		let msg = MarkovError::WordTooLong { length: 2000, max: 1023 }.to_string();
		assert!(msg.contains("2000"));
		assert!(msg.contains("1023"));
	}
}

use std::collections::HashMap;

use crate::error::MarkovError;

/// Maximum number of distinct words a single collection can hold.
pub const MAX_UNIQUE_WORDS: usize = (u32::MAX - 1) as usize;

/// Stable identity of an interned word.
///
/// Two identities are equal if and only if they were produced by the same
/// `WordCollection` for textually equal words. Identities are handed out
/// in first-seen order, starting at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(u32);

impl WordId {
	/// Position of the word in its collection.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Canonical store of every distinct word seen by a chain.
///
/// # Invariants
/// - `words[id.index()]` is the text of `id`
/// - `ids` and `words` always hold the same set of words
/// - Nothing is ever removed
#[derive(Debug)]
pub struct WordCollection {
	ids: HashMap<Box<str>, WordId>,
	words: Vec<Box<str>>,
	limit: usize,
}

impl Default for WordCollection {
	fn default() -> Self {
		Self::with_limit(MAX_UNIQUE_WORDS)
	}
}

impl WordCollection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_limit(limit: usize) -> Self {
		Self {
			ids: HashMap::new(),
			words: Vec::new(),
			limit: limit.min(MAX_UNIQUE_WORDS),
		}
	}

	/// Returns the identity of `word`, allocating one on first sighting.
	///
	/// # Errors
	/// Returns `MarkovError::VocabularyFull` if `word` is new and the
	/// collection already holds its maximum number of words.
	pub fn resolve(&mut self, word: &str) -> Result<WordId, MarkovError> {
		if let Some(id) = self.ids.get(word) {
			return Ok(*id);
		}
		if self.words.len() >= self.limit {
			return Err(MarkovError::VocabularyFull);
		}

		// Bounded by `limit`, which never exceeds u32::MAX - 1
		let id = WordId(self.words.len() as u32);
		self.words.push(word.into());
		self.ids.insert(word.into(), id);
		Ok(id)
	}

	/// Looks a word up without interning it.
	pub fn find(&self, word: &str) -> Option<WordId> {
		self.ids.get(word).copied()
	}

	/// Returns the text behind an identity.
	///
	/// Returns `None` for an identity that came from another collection.
	pub fn word(&self, id: WordId) -> Option<&str> {
		self.words.get(id.index()).map(|w| &**w)
	}

	/// Number of distinct words interned so far.
	pub fn count(&self) -> usize {
		self.words.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolve_is_idempotent() {
		let mut words = WordCollection::new();
		let a = words.resolve("alpha").unwrap();
		let b = words.resolve("beta").unwrap();
		assert_eq!(words.resolve("alpha").unwrap(), a);
		assert_ne!(a, b);
		assert_eq!(words.count(), 2);
	}

	#[test]
	fn ids_follow_first_sighting() {
		let mut words = WordCollection::new();
		assert_eq!(words.resolve("x").unwrap().index(), 0);
		assert_eq!(words.resolve("y").unwrap().index(), 1);
		assert_eq!(words.resolve("x").unwrap().index(), 0);
	}

	#[test]
	fn word_round_trips_text() {
		let mut words = WordCollection::new();
		let id = words.resolve("gamma").unwrap();
		assert_eq!(words.word(id), Some("gamma"));
		assert_eq!(words.find("gamma"), Some(id));
		assert_eq!(words.find("delta"), None);
	}

	#[test]
	fn full_collection_rejects_new_words_only() {
		let mut words = WordCollection::with_limit(2);
		let a = words.resolve("a").unwrap();
		words.resolve("b").unwrap();
		assert!(matches!(words.resolve("c"), Err(MarkovError::VocabularyFull)));
		assert_eq!(words.resolve("a").unwrap(), a);
		assert_eq!(words.count(), 2);
	}
}

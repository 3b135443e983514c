use std::collections::VecDeque;

use crate::error::MarkovError;
use super::interner::WordId;

/// Bounded lookback context: the last words seen, oldest first.
///
/// The window grows until it holds `capacity` words, then slides: each new
/// word evicts the oldest one.
///
/// # Invariants
/// - `len() <= capacity()`
/// - `capacity() >= 1`
#[derive(Clone, Debug)]
pub struct ContextWindow {
	words: VecDeque<WordId>,
	capacity: usize,
}

impl ContextWindow {
	/// Creates an empty window. A capacity of zero is raised to one.
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self { words: VecDeque::with_capacity(capacity), capacity }
	}

	/// Creates a window holding the last `capacity` words of `words`.
	pub fn from_words(capacity: usize, words: &[WordId]) -> Self {
		let mut window = Self::new(capacity);
		for word in words {
			window.append_or_shift(*word);
		}
		window
	}

	/// Appends `word`, evicting the oldest word if the window is full.
	pub fn append_or_shift(&mut self, word: WordId) {
		if self.words.len() >= self.capacity {
			self.words.pop_front();
		}
		self.words.push_back(word);
	}

	/// Returns the most recently added word.
	///
	/// # Errors
	/// Returns `MarkovError::MissingElement` if the window is empty.
	pub fn last(&self) -> Result<WordId, MarkovError> {
		self.words.back().copied().ok_or(MarkovError::MissingElement)
	}

	/// Empties the window; the capacity is kept.
	pub fn clear(&mut self) {
		self.words.clear();
	}

	/// Number of words currently held.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` when no word is held.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Maximum number of words, the chain order.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Iterates over the words, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
		self.words.iter().copied()
	}
}

// Two windows are equal when they hold the same words in the same order,
// whatever their capacities.
impl PartialEq for ContextWindow {
	fn eq(&self, other: &Self) -> bool {
		self.words == other.words
	}
}

impl Eq for ContextWindow {}

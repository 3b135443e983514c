use std::collections::BTreeMap;

use rand::RngCore;

use super::interner::WordId;
use super::select::{pick_uniform, pick_uniform_keyed};

/// A node of the context tree.
///
/// A node reached from the root by the path `w1, ..., wd` stands for the
/// context "the last `d` words were `w1 ... wd`". It stores the words seen
/// right after that context, and the longer contexts extending it.
///
/// ## Responsibilities:
/// - Own the child nodes, keyed by the next context word
/// - Accumulate candidates during training, duplicates included
/// - Sample a child or a candidate uniformly
///
/// ## Invariants
/// - At most one child per word identity
/// - The candidate list is append-only; a word observed `k` times after this
///   context appears `k` times, which weights it for sampling
#[derive(Clone, Debug, Default)]
pub struct MarkovNode {
	/// Longer contexts, indexed by their last word.
	children: BTreeMap<WordId, MarkovNode>,
	/// Words observed right after this context, in observation order.
	/// Example: [b, b, c]
	candidates: Vec<WordId>,
}

impl MarkovNode {
	/// Creates a node without children or candidates.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the child for `word`, if one was ever created.
	pub fn find_child(&self, word: WordId) -> Option<&MarkovNode> {
		self.children.get(&word)
	}

	/// Returns the child for `word`, creating an empty one if needed.
	///
	/// Calling it twice with the same identity never creates two children.
	pub fn resolve_child(&mut self, word: WordId) -> &mut MarkovNode {
		self.children.entry(word).or_default()
	}

	/// Records `word` as observed after this context.
	pub fn add_candidate(&mut self, word: WordId) {
		self.candidates.push(word);
	}

	/// Picks a child uniformly among all children.
	///
	/// Returns `None` if the node has no children.
	pub fn pick_random_child<R>(&self, rng: &mut R) -> Option<(WordId, &MarkovNode)>
	where
		R: RngCore + ?Sized,
	{
		pick_uniform_keyed(&self.children, rng).map(|(word, node)| (*word, node))
	}

	/// Picks a candidate uniformly over the candidate list.
	///
	/// Since duplicates are kept, a word's chance is proportional to the
	/// number of times it was observed. Returns `None` without candidates.
	pub fn pick_random_candidate<R>(&self, rng: &mut R) -> Option<WordId>
	where
		R: RngCore + ?Sized,
	{
		pick_uniform(&self.candidates, rng).copied()
	}

	/// Number of recorded candidates, duplicates included.
	pub fn candidate_count(&self) -> usize {
		self.candidates.len()
	}

	/// Recorded candidates, in observation order.
	pub fn candidates(&self) -> &[WordId] {
		&self.candidates
	}

	/// Number of distinct longer contexts below this one.
	pub fn child_count(&self) -> usize {
		self.children.len()
	}

	/// A node with neither children nor candidates leads nowhere.
	pub fn is_dead_end(&self) -> bool {
		self.children.is_empty() && self.candidates.is_empty()
	}

	/// Counts every node below this one (this node excluded).
	pub fn descendant_count(&self) -> usize {
		self.children
			.values()
			.map(|child| 1 + child.descendant_count())
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::interner::WordCollection;
	use crate::model::select::testing::FixedRng;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn ids(words: &[&str]) -> Vec<WordId> {
		let mut collection = WordCollection::new();
		words.iter().map(|w| collection.resolve(w).unwrap()).collect()
	}

	#[test]
	fn resolve_child_is_idempotent() {
		let w = ids(&["a"]);
		let mut root = MarkovNode::new();
		root.resolve_child(w[0]).add_candidate(w[0]);
		root.resolve_child(w[0]);
		assert_eq!(root.child_count(), 1);
		assert_eq!(root.find_child(w[0]).unwrap().candidate_count(), 1);
	}

	#[test]
	fn find_child_does_not_create() {
		let w = ids(&["a"]);
		let root = MarkovNode::new();
		assert!(root.find_child(w[0]).is_none());
		assert_eq!(root.child_count(), 0);
		assert!(root.is_dead_end());
	}

	#[test]
	fn candidates_keep_duplicates() {
		let w = ids(&["b", "c"]);
		let mut node = MarkovNode::new();
		node.add_candidate(w[0]);
		node.add_candidate(w[0]);
		node.add_candidate(w[1]);
		assert_eq!(node.candidates(), &[w[0], w[0], w[1]]);
	}

	#[test]
	fn empty_node_picks_nothing() {
		let node = MarkovNode::new();
		assert!(node.pick_random_child(&mut FixedRng(0)).is_none());
		assert!(node.pick_random_candidate(&mut FixedRng(0)).is_none());
	}

	#[test]
	fn pick_random_child_returns_existing_pair() {
		let w = ids(&["a", "b"]);
		let mut root = MarkovNode::new();
		root.resolve_child(w[0]);
		root.resolve_child(w[1]).add_candidate(w[0]);
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			let (word, child) = root.pick_random_child(&mut rng).unwrap();
			let expected = root.find_child(word).unwrap();
			assert_eq!(child.candidate_count(), expected.candidate_count());
		}
	}

	#[test]
	fn candidate_weight_follows_duplicates() {
		let w = ids(&["b", "c"]);
		let mut node = MarkovNode::new();
		for word in [w[0], w[0], w[1]] {
			node.add_candidate(word);
		}
		let mut rng = StdRng::seed_from_u64(99);
		let mut b = 0usize;
		let mut c = 0usize;
		for _ in 0..30_000 {
			match node.pick_random_candidate(&mut rng) {
				Some(word) if word == w[0] => b += 1,
				Some(_) => c += 1,
				None => panic!("node has candidates"),
			}
		}
		let ratio = b as f64 / c as f64;
		assert!((1.8..2.2).contains(&ratio), "ratio was {ratio}");
	}

	#[test]
	fn descendants_are_counted_recursively() {
		let w = ids(&["a", "b", "c"]);
		let mut root = MarkovNode::new();
		root.resolve_child(w[0]).resolve_child(w[1]);
		root.resolve_child(w[0]).resolve_child(w[2]);
		root.resolve_child(w[1]);
		assert_eq!(root.descendant_count(), 4);
	}
}

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::MarkovError;
use crate::io::{WordSource, check_word_length};
use super::config::{ChainConfig, OutputMode};
use super::interner::{WordCollection, WordId};
use super::node::MarkovNode;
use super::window::ContextWindow;

/// Outcome of a single `MarkovChain::generate` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
	/// The word the chain was at before this call advanced it.
	/// `None` only in `OutputMode::Probable`, which has no strategy yet.
	pub word: Option<String>,

	/// `true` if no continuation was found and the chain had to reseed.
	pub reset: bool,
}

/// Word-level Markov chain of a fixed order.
///
/// # Responsibilities
/// - Learn from word sources, growing the context tree (`feed`)
/// - Walk the tree to emit words, reseeding at dead ends (`generate`)
/// - Own the interned words, the current context and the random source
///
/// # Invariants
/// - `order` never changes after construction
/// - Generation only moves the current context; the tree is only grown by `feed`
/// - The tree is at most `order` levels deep below the root
///
/// # Notes
/// A chain is not meant to be shared between threads without a lock around
/// the whole instance: tree, context and random source change together.
#[derive(Debug)]
pub struct MarkovChain<R: RngCore = StdRng> {
	order: usize,
	mode: OutputMode,
	root: MarkovNode,
	words: WordCollection,
	current: ContextWindow,
	rng: R,
}

impl MarkovChain<StdRng> {
	/// Creates an empty chain of the given order, seeded from OS entropy.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidOrder` if `order` is 0 or above `MAX_ORDER`.
	pub fn new(order: usize) -> Result<Self, MarkovError> {
		Self::from_config(&ChainConfig::new(order)?)
	}

	/// Creates an empty chain from a configuration.
	///
	/// Uses `config.seed` when set, so that runs can be replayed.
	pub fn from_config(config: &ChainConfig) -> Result<Self, MarkovError> {
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self::with_rng(config, rng)
	}
}

impl<R: RngCore> MarkovChain<R> {
	/// Creates an empty chain drawing randomness from `rng`.
	///
	/// `config.seed` is ignored: the caller already chose the source.
	pub fn with_rng(config: &ChainConfig, rng: R) -> Result<Self, MarkovError> {
		config.validate()?;
		let chain = Self {
			order: config.order(),
			mode: OutputMode::Random,
			root: MarkovNode::new(),
			words: WordCollection::new(),
			current: ContextWindow::new(config.order()),
			rng,
		};
		Ok(chain.with_mode(config.mode))
	}

	fn with_mode(mut self, mode: OutputMode) -> Self {
		self.set_output_mode(mode);
		self
	}

	/// Chain order, as set at construction.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Current word selection strategy.
	pub fn output_mode(&self) -> OutputMode {
		self.mode
	}

	/// Selects how the next word is picked.
	pub fn set_output_mode(&mut self, mode: OutputMode) {
		if mode == OutputMode::Probable {
			warn!("Probable output mode is not implemented, generation will yield no words");
		}
		self.mode = mode;
	}

	/// Number of distinct words interned so far, including words only
	/// passed to `seed_context`.
	pub fn unique_word_count(&self) -> usize {
		self.words.count()
	}

	/// Number of contexts recorded in the tree (the empty root context excluded).
	pub fn state_count(&self) -> usize {
		self.root.descendant_count()
	}

	/// Root of the context tree (the empty context).
	pub fn root(&self) -> &MarkovNode {
		&self.root
	}

	/// Word store shared by the tree and the current context.
	pub fn words(&self) -> &WordCollection {
		&self.words
	}

	/// Returns the node recorded for the exact context `path`, if any.
	///
	/// Unknown words are never interned by this lookup.
	pub fn find_context<S: AsRef<str>>(&self, path: &[S]) -> Option<&MarkovNode> {
		let mut node = &self.root;
		for word in path {
			node = node.find_child(self.words.find(word.as_ref())?)?;
		}
		Some(node)
	}

	/// Text of the current context, oldest word first.
	pub fn current_context(&self) -> Vec<&str> {
		self.current.iter().filter_map(|id| self.words.word(id)).collect()
	}

	/// Replaces the current context with the last `order` words of `words`.
	///
	/// Empty words are skipped, as in `feed`. Words never fed are interned.
	/// An empty list clears the context, so the next `generate` reseeds.
	///
	/// # Errors
	/// Fails if a word is too long or the word store is full; the current
	/// context is left unchanged in that case.
	pub fn seed_context<S: AsRef<str>>(&mut self, words: &[S]) -> Result<(), MarkovError> {
		let mut window = ContextWindow::new(self.order);
		for word in words {
			let word = word.as_ref();
			if word.is_empty() {
				continue;
			}
			check_word_length(word)?;
			window.append_or_shift(self.words.resolve(word)?);
		}
		self.current = window;
		Ok(())
	}

	/// Reads `source` to the end and adds what it observes to the model.
	///
	/// Every feed starts from an empty context: the context grows word by
	/// word up to `order`, then slides. Each next word is recorded as a
	/// candidate of the node for the context that preceded it, so contexts
	/// shorter than `order` are also recorded at the start of the stream.
	/// Empty words are skipped.
	///
	/// Returns the number of words processed.
	///
	/// # Errors
	/// Propagates source failures and rejects words longer than
	/// `MAX_WORD_LENGTH`. Nothing is recorded for the failing word; words
	/// processed before it stay in the model.
	pub fn feed<S: WordSource>(&mut self, mut source: S) -> Result<usize, MarkovError> {
		let mut window = ContextWindow::new(self.order);
		let mut processed = 0;

		loop {
			let next = match source.next_word()? {
				Some(word) if word.is_empty() => continue,
				Some(word) => {
					check_word_length(&word)?;
					Some(self.words.resolve(&word)?)
				}
				None => None,
			};

			// The path is resolved even when the source is exhausted, so the
			// last context is reachable as an entry point for `reset`.
			if !window.is_empty() {
				let node = Self::resolve_path(&mut self.root, &window);
				if let Some(word) = next {
					node.add_candidate(word);
				}
			}

			let Some(word) = next else {
				break;
			};
			window.append_or_shift(word);
			processed += 1;
		}

		debug!(
			"Fed {} words ({} unique, {} states)",
			processed,
			self.words.count(),
			self.state_count()
		);
		Ok(processed)
	}

	/// Walks from `root` along `window`, creating missing nodes.
	fn resolve_path<'a>(root: &'a mut MarkovNode, window: &ContextWindow) -> &'a mut MarkovNode {
		window.iter().fold(root, |node, word| node.resolve_child(word))
	}

	/// Picks a random entry point.
	///
	/// Clears the current context, then walks down from the root choosing a
	/// random child at each level until a node without children is reached.
	/// The words along the way become the new context.
	///
	/// # Errors
	/// Returns `MarkovError::ModelEmpty` if the tree has no contexts at all.
	pub fn reset(&mut self) -> Result<(), MarkovError> {
		self.current.clear();

		let mut node = &self.root;
		while let Some((word, child)) = node.pick_random_child(&mut self.rng) {
			self.current.append_or_shift(word);
			node = child;
		}

		if self.current.is_empty() {
			return Err(MarkovError::ModelEmpty);
		}
		trace!("Reseeded chain at {:?}", self.current_context());
		Ok(())
	}

	/// Returns the word the chain is at, then moves to the next one.
	///
	/// The returned word is one step behind the internal context: it is
	/// the last word of the context *before* this call advanced it.
	///
	/// The next word is sampled from the deepest node matching the current
	/// context. If that node has no candidate, the chain reseeds (random
	/// mode) and reports it through `Generated::reset`.
	///
	/// # Errors
	/// Returns `MarkovError::ModelEmpty` if nothing was ever fed.
	pub fn generate(&mut self) -> Result<Generated, MarkovError> {
		if self.current.is_empty() {
			self.reset()?;
		}
		let output = self.text(self.current.last()?);

		let mut matched = &self.root;
		for word in self.current.iter() {
			match matched.find_child(word) {
				Some(child) => matched = child,
				// Keep the longest context matched so far
				None => break,
			}
		}

		let candidate = match self.mode {
			OutputMode::Random => matched.pick_random_candidate(&mut self.rng),
			OutputMode::Probable => None,
		};

		match candidate {
			Some(word) => {
				self.current.append_or_shift(word);
				Ok(Generated { word: Some(output), reset: false })
			}
			None if self.mode == OutputMode::Random => {
				self.reset()?;
				Ok(Generated { word: Some(output), reset: true })
			}
			None => Ok(Generated { word: None, reset: true }),
		}
	}

	/// Calls `generate` `count` times and collects the words produced.
	///
	/// Calls that yield no word (probable mode) add nothing.
	pub fn generate_words(&mut self, count: usize) -> Result<Vec<String>, MarkovError> {
		let mut words = Vec::with_capacity(count);
		for _ in 0..count {
			if let Some(word) = self.generate()?.word {
				words.push(word);
			}
		}
		Ok(words)
	}

	fn text(&self, word: WordId) -> String {
		self.words.word(word).unwrap_or_default().to_owned()
	}
}

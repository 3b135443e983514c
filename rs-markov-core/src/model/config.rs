use serde::{Deserialize, Serialize};

use crate::error::MarkovError;

/// Largest supported chain order.
pub const MAX_ORDER: usize = u8::MAX as usize;

/// Strategy used to pick the next word while generating.
///
/// # Variants
/// - `Random`: sample a candidate of the current context, weighted by how
///   often it was observed.
/// - `Probable`: reserved for a most-likely-candidate strategy. Not
///   implemented yet: generation in this mode yields no word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
	#[default]
	Random,
	Probable,
}

impl std::str::FromStr for OutputMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"random" => Ok(Self::Random),
			"probable" => Ok(Self::Probable),
			other => Err(format!("Unknown output mode '{other}', expected 'random' or 'probable'")),
		}
	}
}

/// Construction parameters of a `MarkovChain`.
///
/// # Responsibilities
/// - Hold the chain order (immutable once the chain is built)
/// - Hold the output mode
/// - Hold the optional random seed (`None` means OS entropy)
///
/// # Invariants
/// - `1 <= order <= MAX_ORDER`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
	/// Number of trailing words used as context.
	order: usize,

	/// Word selection strategy.
	#[serde(default)]
	pub mode: OutputMode,

	/// Fixed seed for reproducible runs.
	#[serde(default)]
	pub seed: Option<u64>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self { order: 1, mode: OutputMode::Random, seed: None }
	}
}

impl ChainConfig {
	/// Creates a configuration for a chain of the given order.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidOrder` if `order` is 0 or above `MAX_ORDER`.
	pub fn new(order: usize) -> Result<Self, MarkovError> {
		let mut config = Self::default();
		config.set_order(order)?;
		Ok(config)
	}

	/// Number of trailing words used as context.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Sets the chain order.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidOrder` if `order` is 0 or above `MAX_ORDER`.
	pub fn set_order(&mut self, order: usize) -> Result<(), MarkovError> {
		if !(1..=MAX_ORDER).contains(&order) {
			return Err(MarkovError::InvalidOrder(order));
		}
		self.order = order;
		Ok(())
	}

	/// Checks a configuration that did not go through `set_order`
	/// (typically one produced by deserialization).
	pub fn validate(&self) -> Result<(), MarkovError> {
		if !(1..=MAX_ORDER).contains(&self.order) {
			return Err(MarkovError::InvalidOrder(self.order));
		}
		Ok(())
	}

	/// Returns the configuration with another output mode.
	pub fn with_mode(mut self, mode: OutputMode) -> Self {
		self.mode = mode;
		self
	}

	/// Returns the configuration with a fixed random seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}
}

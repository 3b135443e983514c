//! Top-level module for the Markov chain.
//!
//! This module contains:
//! - The chain engine (`MarkovChain`)
//! - Chain construction parameters (`ChainConfig`, `OutputMode`)
//! - The context tree (`MarkovNode`)
//! - The word interner (`WordCollection`)
//! - The sliding context window (`ContextWindow`)
//! - Uniform random selection helpers

/// Training and generation state machine.
pub mod chain;

/// Chain order, output mode and seed.
pub mod config;

/// Deduplicated word store handing out `WordId`s.
pub mod interner;

/// Node of the context tree, recursively owning its subtree.
pub mod node;

/// Uniform selection over slices and keyed collections.
pub mod select;

/// Fixed-capacity FIFO of the last context words.
pub mod window;

//! Word-level Markov chain text generation library.
//!
//! This crate provides a Markov chain over words including:
//! - A context tree recording which words follow which contexts
//! - Training from streaming or pre-built word sources
//! - Self-healing random generation that reseeds at dead ends
//! - A pluggable random source for reproducible runs
//!
//! ```
//! use rs_markov_core::io::StaticWordSource;
//! use rs_markov_core::model::chain::MarkovChain;
//! use rs_markov_core::model::config::ChainConfig;
//!
//! # fn main() -> Result<(), rs_markov_core::error::MarkovError> {
//! let config = ChainConfig::new(2)?.with_seed(7);
//! let mut chain = MarkovChain::from_config(&config)?;
//! chain.feed(StaticWordSource::new(&["the", "cat", "sat", "on", "the", "mat"]))?;
//! let words = chain.generate_words(10)?;
//! assert_eq!(words.len(), 10);
//! # Ok(())
//! # }
//! ```

/// Error taxonomy shared by the whole crate.
pub mod error;

/// Word sources (streaming splitter, static list) and the word length bound.
pub mod io;

/// The chain, its context tree and supporting structures.
pub mod model;

pub use error::MarkovError;
pub use io::{StaticWordSource, StreamingWordSource, WordSource};
pub use model::chain::{Generated, MarkovChain};
pub use model::config::{ChainConfig, OutputMode};

//! # dawgc
//!
//! Compiles a sorted word list into a minimal
//! [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph) and serializes it into a compact bit-packed
//! binary format.
//!
//! A DAWG is a trie whose identical subtrees have been merged, so that common
//! suffixes are stored once. Building one takes four steps:
//!
//! 1. Insert sorted words into a [`TrieBuilder`](dawg::TrieBuilder).
//! 2. [`minimize`](dawg::Trie::minimize) the trie bottom-up, merging
//!    structurally identical vertices.
//! 3. Renumber the surviving vertices so parents come before children
//!    ([`into_dawg`](dawg::Trie::into_dawg)).
//! 4. [`encode`](dawg::codec::encode) the graph as one 32-bit record per edge.
//!
//! ## Quick Start
//!
//! ```
//! use dawgc::dawg::codec;
//! use dawgc::dawg::enumerate::collect_words;
//! use dawgc::{build_dawg, DawgConfig};
//!
//! let config = DawgConfig::default();
//! let dawg = build_dawg(["bad", "cad"], &config).unwrap();
//! assert_eq!(dawg.vertex_count(), 5);
//!
//! let bytes = codec::to_bytes(&codec::encode(&dawg).unwrap());
//! assert_eq!(bytes.len(), 5 * codec::RECORD_SIZE);
//!
//! let decoded = codec::decode(&bytes, &config.alphabet).unwrap();
//! assert_eq!(collect_words(&decoded), ["bad", "cad"]);
//! ```
//!
//! ## Step by Step
//!
//! ```
//! use dawgc::dawg::TrieBuilder;
//! use dawgc::DawgConfig;
//!
//! let mut builder = TrieBuilder::new(DawgConfig::default());
//! for word in ["bake", "cake", "fake", "lake", "make"] {
//!     builder.add_word(word).unwrap();
//! }
//! let mut trie = builder.finish();
//! assert_eq!(trie.vertex_count(), 21);
//!
//! trie.minimize();
//! let dawg = trie.into_dawg();
//! assert_eq!(dawg.vertex_count(), 9);
//! assert_eq!(dawg.root().id(), 0);
//! ```
//!
//! ## Custom Alphabets
//!
//! Letters are stored as indices into an [`Alphabet`]. Input must be sorted
//! by that alphabet's order, not by Unicode order:
//!
//! ```
//! use dawgc::dawg::enumerate::collect_words;
//! use dawgc::{build_dawg, Alphabet, DawgConfig};
//!
//! let config = DawgConfig::new(Alphabet::new("zyx").unwrap());
//! let dawg = build_dawg(["zz", "zx", "yz"], &config).unwrap();
//! assert_eq!(collect_words(&dawg), ["zz", "zx", "yz"]);
//! ```

#![warn(missing_docs)]

/// Alphabet and build limits.
pub mod config;
/// Core DAWG data structures: trie, minimizer, renumbering, codec.
pub mod dawg;
/// Error types.
pub mod error;
/// Word-list parsing.
pub mod wordlist;

pub use config::{Alphabet, DawgConfig, WORD_LIMIT};
pub use dawg::{build_dawg, Dawg};
pub use error::{DawgError, Overflow, Result};

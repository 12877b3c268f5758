//! Compressed prefix trees for Rust.
//!
//! This crate provides [`RadixTree`], an associative index from string-like
//! keys to ordered lists of values, built for prefix search, autocomplete and
//! longest-prefix matching:
//!
//! - [`insert`](RadixTree::insert) - Append a value at a key, splitting edges as needed
//! - [`traverse`](RadixTree::traverse) / [`path`](RadixTree::path) - Walk the nodes along a query
//! - [`traverse_all`](RadixTree::traverse_all) / [`iter`](RadixTree::iter) - Pre-order walk with depths
//! - [`subtree`](RadixTree::subtree) - Pre-order walk below one key, for completions
//! - [`longest_prefix`](RadixTree::longest_prefix) - Deepest stored key that prefixes a query
//!
//! # Example
//!
//! ```
//! use radix_index::RadixTree;
//!
//! let mut words = RadixTree::new();
//! words.insert("Romane", 1);
//! words.insert("romanus", 2);
//! words.insert("romulus", 3);
//!
//! // Matching is case-insensitive by default.
//! assert_eq!(words.get("ROMANE"), Some(&[1][..]));
//!
//! // "rom" is shared, "an" is shared by the first two words.
//! assert_eq!(words.node_count(), 6);
//! words.validate();
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Pluggable comparison** - [`CaseInsensitive`] by default, [`Exact`] or any
//!   [`FnCompare`] function pair instead
//! - **Arena storage** - All nodes but the root live in one arena, so edge
//!   splits move handles instead of copying subtrees
//! - **`tracing`** (optional feature) - Logs node splits and clears through the `tracing` crate
//!
//! # Implementation
//!
//! Each node stores the key segment labelling the edge from its parent, its
//! values, and its children sorted by first character. No two children of a
//! node share a first character, so every lookup step is a binary search for a
//! single candidate.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod tracing_helpers;

mod compare;
mod raw;

pub mod radix_tree;
pub mod statistics;

pub use compare::{CaseInsensitive, CharCompare, Exact, FnCompare, FoldCase};
pub use radix_tree::RadixTree;
pub use raw::Node;
pub use statistics::Statistics;

//! # splay_cache
//! A self-adjusting binary search tree keyed map, used as a bounded-size
//! cache.
//!
//! ## Features
//! - Standard map operations (`insert`, `get`, `remove`, ...) backed by a
//!   top-down splay tree: every access rotates the node it touched (or the
//!   nearest in-order neighbor, on a miss) to the root, so repeatedly
//!   accessed keys stay cheap to reach.
//! - Non-splaying, non-recursive ordered iteration (`iter`, `keys`,
//!   `values`), safe on deeply skewed trees.
//! - Optional `max_size` bound: once exceeded, height-guided leaf pruning
//!   evicts structurally "cold" (deep) entries until the map is back
//!   within bound, invoking a caller-registered callback per eviction.
//! - A small convenience surface (`get_or_default`, `get_or_compute`,
//!   `merge_into`, `contains_value`, `key_for_value`) layered on top of
//!   the core operations.
//!
//! ## Usage
//! This crate exposes [`SplayMap`] as a library type; there is no binary
//! or CLI here. Thread-safety, if needed, is the caller's responsibility —
//! wrap a `SplayMap` in a `std::sync::Mutex`, since every read here can
//! also mutate the tree's shape.
mod ext;
mod iter;
mod map;
mod node;
mod prune;
mod splay;

pub mod error;

pub use error::MapError;
pub use iter::{Iter, Keys, Values};
pub use map::{EvictionCallback, SplayMap};

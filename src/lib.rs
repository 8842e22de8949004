//! Fair, round-robin merging of async streams.
//!
//! A [`RoundRobinUnion`][stream::RoundRobinUnion] takes a stream of streams
//! (or a fixed list of streams) and yields their items one source at a time,
//! in turn. Sources may keep arriving while the union is being consumed; each
//! new source is appended to the rotation and gets its first turn once all the
//! sources before it have had theirs.
//!
//! Nothing is polled ahead of demand: the union runs its fill loop from
//! `poll_next`, gives every live source at most one turn per round, and
//! returns `Poll::Pending` when none of them has anything ready. Sources that
//! end are dropped immediately; the union ends once no more sources can
//! arrive and every registered source has ended.
//!
//! # Examples
//!
//! ```rust
//! use round_robin_union::prelude::*;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let a = stream::iter(vec![0, 1, 2]);
//!     let b = stream::iter(vec![3, 4, 5, 6]);
//!     let out: Vec<_> = vec![a, b].round_robin().collect().await;
//!     assert_eq!(out, vec![0, 3, 1, 4, 2, 5, 6]);
//! })
//! ```
//!
//! # Errors
//!
//! [`TryRoundRobinUnion`][stream::TryRoundRobinUnion] is the fallible
//! counterpart. The first error from the outer stream or any of the sources is
//! yielded unchanged, after which the union drops all its sources and ends.
//!
//! # Features
//!
//! - `std` (default): enables `std` support in `futures-core`. Without it the
//!   crate only requires `alloc`.
//! - `tracing`: emits `trace` and `debug` events when sources are registered
//!   or retired, when the outer stream ends, and when the union completes or
//!   fails.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

extern crate alloc;

mod utils;

/// The round-robin union prelude.
pub mod prelude {
    pub use super::stream::IntoStream as _;
    pub use super::stream::RoundRobin as _;
    pub use super::stream::StreamExt as _;
}

pub mod stream;

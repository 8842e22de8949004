//! Fair, round-robin merging of a growing set of streams.
//!
//! Each time the union is polled, newly arrived sources are taken in from the
//! outer stream and appended after the sources that are already registered.
//! Then every registered source gets at most one turn, starting where the
//! previous poll left off, until one of them yields an item. A source that
//! ends is dropped on the spot and the next one takes its place in the same
//! pass. A source that has nothing ready is skipped, and has the current waker
//! registered so that the union is polled again once it does.
use futures_core::Stream;

mod fill;
mod intake;
mod options;
mod registry;
mod try_union;
mod union;

pub use options::{FillMode, Options, DEFAULT_BUFFER_SIZE};
pub use try_union::{StaticSources, TryRoundRobinUnion};
pub use union::RoundRobinUnion;

/// Takes turns between multiple streams, yielding one item from each in
/// order.
///
/// Unlike a merge, which yields from whichever stream happens to be ready
/// first, two streams that both have data available never see one of them
/// yield twice in a row.
///
/// # Examples
///
/// ```
/// use round_robin_union::prelude::*;
/// use futures_lite::stream::{self, StreamExt};
/// use futures_lite::future::block_on;
///
/// block_on(async {
///     let a = stream::iter(vec!["a1", "a2"]);
///     let b = stream::iter(vec!["b1", "b2", "b3"]);
///     let s = [a, b].round_robin();
///
///     let out: Vec<_> = s.collect().await;
///     assert_eq!(out, ["a1", "b1", "a2", "b2", "b3"]);
/// })
/// ```
pub trait RoundRobin {
    /// The resulting output type.
    type Item;

    /// The stream type.
    type Stream: Stream<Item = Self::Item>;

    /// Combine multiple streams into a single stream, taking turns.
    fn round_robin(self) -> Self::Stream;
}

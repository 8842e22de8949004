use futures_core::{Stream, TryStream};

use super::{Options, RoundRobinUnion, TryRoundRobinUnion};

/// Extend `Stream` with round-robin methods.
pub trait StreamExt: Stream {
    /// Flattens a stream of streams, taking turns between the inner streams.
    ///
    /// Inner streams are polled as soon as they arrive, without waiting for
    /// the ones before them to end. The resulting stream ends once `self` and
    /// every stream it yielded have ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use round_robin_union::stream::StreamExt as _;
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let sources = stream::iter(vec![stream::iter(vec![1, 2]), stream::iter(vec![3])]);
    ///     let out: Vec<_> = sources.round_robin_flatten().collect().await;
    ///     assert_eq!(out, vec![1, 3, 2]);
    /// })
    /// ```
    fn round_robin_flatten(self) -> RoundRobinUnion<Self>
    where
        Self: Sized,
        Self::Item: Stream,
    {
        RoundRobinUnion::new(self)
    }

    /// Like [`round_robin_flatten`][StreamExt::round_robin_flatten], with
    /// explicit [`Options`].
    fn round_robin_flatten_with(self, options: Options) -> RoundRobinUnion<Self>
    where
        Self: Sized,
        Self::Item: Stream,
    {
        RoundRobinUnion::with_options(self, options)
    }

    /// Flattens a fallible stream of fallible streams, taking turns between
    /// the inner streams. The first error ends the resulting stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use round_robin_union::stream::StreamExt as _;
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let sources = stream::iter(vec![
    ///         Ok(stream::iter(vec![Ok(1), Ok(2)])),
    ///         Err("lost a source"),
    ///     ]);
    ///     let mut s = sources.try_round_robin_flatten();
    ///     assert_eq!(s.next().await, Some(Err("lost a source")));
    ///     assert_eq!(s.next().await, None);
    /// })
    /// ```
    fn try_round_robin_flatten(self) -> TryRoundRobinUnion<Self>
    where
        Self: Sized + TryStream,
        Self::Ok: TryStream<Error = Self::Error>,
    {
        TryRoundRobinUnion::new(self)
    }
}

impl<S> StreamExt for S where S: Stream {}

/// Conversion into a `Stream`.
///
/// By implementing `IntoStream` for a type, you define how it will be
/// converted to a stream. This is common for types which describe a
/// collection of some kind.
pub trait IntoStream {
    /// The type of the elements being iterated over.
    type Item;

    /// Which kind of stream are we turning this into?
    type IntoStream: Stream<Item = Self::Item>;

    /// Creates a stream from a value.
    fn into_stream(self) -> Self::IntoStream;
}

impl<S: Stream> IntoStream for S {
    type Item = S::Item;
    type IntoStream = S;

    #[inline]
    fn into_stream(self) -> S {
        self
    }
}

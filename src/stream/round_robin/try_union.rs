use core::fmt;
use core::iter::Map;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream, TryStream};
use pin_project::pin_project;

use super::fill::FillLoop;
use super::Options;
use crate::utils::{from_iter, FromIter};

/// The outer stream used by [`TryRoundRobinUnion::from_sources`].
pub type StaticSources<I, E> =
    FromIter<Map<I, fn(<I as Iterator>::Item) -> Result<<I as Iterator>::Item, E>>>;

/// A fallible stream that takes turns between a growing set of fallible
/// streams.
///
/// This behaves like [`RoundRobinUnion`][super::RoundRobinUnion], except that
/// both the outer stream and the sources yield `Result`s. The first error,
/// whether it comes from the outer stream or from any of the sources, is
/// yielded as-is and ends the union: all sources are dropped, and so are
/// items that had already been read ahead.
///
/// # Example
///
/// ```
/// use round_robin_union::stream::TryRoundRobinUnion;
/// use futures_lite::future::block_on;
/// use futures_lite::{stream, StreamExt};
///
/// block_on(async {
///     let mut union = TryRoundRobinUnion::from_sources([
///         stream::iter(vec![Ok(1), Ok(2)]),
///         stream::iter(vec![Ok(3), Err("broken")]),
///     ]);
///     assert_eq!(union.next().await, Some(Ok(1)));
///     assert_eq!(union.next().await, Some(Ok(3)));
///     assert_eq!(union.next().await, Some(Ok(2)));
///     assert_eq!(union.next().await, Some(Err("broken")));
///     assert_eq!(union.next().await, None);
/// })
/// ```
#[must_use = "streams do nothing unless polled"]
#[pin_project]
pub struct TryRoundRobinUnion<O>
where
    O: TryStream,
    O::Ok: TryStream<Error = O::Error>,
{
    #[pin]
    inner: FillLoop<O, O::Ok, <O::Ok as TryStream>::Ok>,
}

impl<O> TryRoundRobinUnion<O>
where
    O: TryStream,
    O::Ok: TryStream<Error = O::Error>,
{
    /// Create a union over the sources yielded by `outer`.
    pub fn new(outer: O) -> Self {
        Self::with_options(outer, Options::default())
    }

    /// Create a union over the sources yielded by `outer`, configured by
    /// `options`.
    pub fn with_options(outer: O, options: Options) -> Self {
        Self {
            inner: FillLoop::new(outer, options),
        }
    }

    /// The number of registered sources that have not ended.
    ///
    /// Sources still waiting in the outer stream are not counted.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no registered source is still live.
    ///
    /// Sources are registered when the union is polled, so a union created
    /// with [`from_sources`](Self::from_sources) is empty until its first
    /// poll.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once the outer stream has ended or failed.
    pub fn is_intake_ended(&self) -> bool {
        self.inner.is_intake_ended()
    }

    /// The options this union was created with.
    pub fn options(&self) -> Options {
        self.inner.options()
    }
}

impl<I, E> TryRoundRobinUnion<StaticSources<I, E>>
where
    I: Iterator,
    I::Item: TryStream<Error = E>,
{
    /// Create a union over a fixed set of sources.
    pub fn from_sources<T>(sources: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let admit: fn(I::Item) -> Result<I::Item, E> = Ok;
        Self::new(from_iter(sources.into_iter().map(admit)))
    }
}

impl<O> fmt::Debug for TryRoundRobinUnion<O>
where
    O: TryStream,
    O::Ok: TryStream<Error = O::Error>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TryRoundRobinUnion")
            .field(&self.inner)
            .finish()
    }
}

impl<O> Stream for TryRoundRobinUnion<O>
where
    O: TryStream,
    O::Ok: TryStream<Error = O::Error>,
{
    type Item = Result<<O::Ok as TryStream>::Ok, O::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_fill(
            cx,
            |outer, cx| outer.try_poll_next(cx),
            |source, cx| source.try_poll_next(cx),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .size_hint(|outer| outer.size_hint(), |source| source.size_hint())
    }
}

impl<O> FusedStream for TryRoundRobinUnion<O>
where
    O: TryStream,
    O::Ok: TryStream<Error = O::Error>,
{
    fn is_terminated(&self) -> bool {
        self.inner.is_done()
    }
}

use core::convert::Infallible;
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};
use pin_project::pin_project;

use super::fill::FillLoop;
use super::{Options, RoundRobin as RoundRobinTrait};
use crate::stream::IntoStream;
use crate::utils::{from_iter, FromIter};

/// A stream that takes turns between a growing set of streams.
///
/// Sources arrive through an outer stream and are visited in the order they
/// arrived. Every time an item is requested each live source gets at most one
/// turn, starting with the one after the source that produced the previous
/// item. Sources are dropped as soon as they end, and the union ends once the
/// outer stream and all of its sources have ended.
///
/// Each poll drains the outer stream until it returns `Pending` or ends. An
/// outer stream that never stops producing sources, such as
/// `stream::repeat_with`, will keep `poll_next` from ever returning.
///
/// This `struct` is created by [`RoundRobinUnion::new`], by
/// [`StreamExt::round_robin_flatten`], or by the [`round_robin`] method on the
/// [`RoundRobin`] trait. See their documentation for more.
///
/// [`round_robin`]: super::RoundRobin::round_robin
/// [`RoundRobin`]: super::RoundRobin
/// [`StreamExt::round_robin_flatten`]: crate::stream::StreamExt::round_robin_flatten
///
/// # Example
///
/// ```
/// use round_robin_union::stream::RoundRobinUnion;
/// use futures_lite::future::block_on;
/// use futures_lite::{stream, StreamExt};
///
/// block_on(async {
///     let union = RoundRobinUnion::from_sources([
///         stream::iter(vec![0, 1, 2]),
///         stream::iter(vec![3, 4, 5, 6]),
///     ]);
///     let out: Vec<_> = union.collect().await;
///     assert_eq!(out, vec![0, 3, 1, 4, 2, 5, 6]);
/// })
/// ```
#[must_use = "streams do nothing unless polled"]
#[pin_project]
pub struct RoundRobinUnion<O>
where
    O: Stream,
    O::Item: Stream,
{
    #[pin]
    inner: FillLoop<O, O::Item, <O::Item as Stream>::Item>,
}

impl<O> RoundRobinUnion<O>
where
    O: Stream,
    O::Item: Stream,
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

    /// The number of sources that have been registered and have not ended.
    ///
    /// Sources still waiting in the outer stream are not counted.
    ///
    /// # Example
    ///
    /// ```
    /// use round_robin_union::stream::RoundRobinUnion;
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let mut union = RoundRobinUnion::from_sources([stream::iter(vec![1]), stream::iter(vec![2])]);
    ///     assert_eq!(union.len(), 0);
    ///     assert_eq!(union.next().await, Some(1));
    ///     assert_eq!(union.len(), 2);
    /// })
    /// ```
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

    /// Returns `true` once the outer stream has ended, meaning no new sources
    /// will be registered.
    pub fn is_intake_ended(&self) -> bool {
        self.inner.is_intake_ended()
    }

    /// The options this union was created with.
    pub fn options(&self) -> Options {
        self.inner.options()
    }
}

impl<I> RoundRobinUnion<FromIter<I>>
where
    I: Iterator,
    I::Item: Stream,
{
    /// Create a union over a fixed set of sources.
    pub fn from_sources<T>(sources: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self::new(from_iter(sources))
    }
}

impl<O> fmt::Debug for RoundRobinUnion<O>
where
    O: Stream,
    O::Item: Stream,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoundRobinUnion").field(&self.inner).finish()
    }
}

impl<O> Stream for RoundRobinUnion<O>
where
    O: Stream,
    O::Item: Stream,
{
    type Item = <O::Item as Stream>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let poll = self.project().inner.poll_fill::<Infallible>(
            cx,
            |outer, cx| outer.poll_next(cx).map(|source| source.map(Ok)),
            |source, cx| source.poll_next(cx).map(|item| item.map(Ok)),
        );
        poll.map(|item| item.map(|item| item.unwrap_or_else(|never| match never {})))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .size_hint(|outer| outer.size_hint(), |source| source.size_hint())
    }
}

impl<O> FusedStream for RoundRobinUnion<O>
where
    O: Stream,
    O::Item: Stream,
{
    fn is_terminated(&self) -> bool {
        self.inner.is_done()
    }
}

impl<S> RoundRobinTrait for alloc::vec::Vec<S>
where
    S: IntoStream,
{
    type Item = <S::IntoStream as Stream>::Item;
    type Stream = RoundRobinUnion<FromIter<alloc::vec::IntoIter<S::IntoStream>>>;

    fn round_robin(self) -> Self::Stream {
        let sources: alloc::vec::Vec<_> = self.into_iter().map(|s| s.into_stream()).collect();
        RoundRobinUnion::from_sources(sources)
    }
}

impl<S, const N: usize> RoundRobinTrait for [S; N]
where
    S: IntoStream,
{
    type Item = <S::IntoStream as Stream>::Item;
    type Stream = RoundRobinUnion<FromIter<core::array::IntoIter<S::IntoStream, N>>>;

    fn round_robin(self) -> Self::Stream {
        RoundRobinUnion::from_sources(self.map(|s| s.into_stream()))
    }
}

use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};

/// A stream that yields every item of an iterator without ever returning
/// `Poll::Pending`.
///
/// This is the intake used when a round-robin union is built from a fixed
/// list of sources: all of them are registered on the first poll, after which
/// the intake reports that it has ended.
#[derive(Clone, Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct FromIter<I> {
    iter: Option<I>,
}

/// Converts an iterator into a stream.
pub(crate) fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter {
        iter: Some(iter.into_iter()),
    }
}

// `FromIter` never pins its iterator.
impl<I> Unpin for FromIter<I> {}

impl<I: Iterator> Stream for FromIter<I> {
    type Item = I::Item;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let next = self.iter.as_mut().and_then(Iterator::next);
        if next.is_none() {
            self.iter = None;
        }
        Poll::Ready(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<I: Iterator> FusedStream for FromIter<I> {
    fn is_terminated(&self) -> bool {
        self.iter.is_none()
    }
}

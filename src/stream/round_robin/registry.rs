use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};

use crate::utils::log::trace;

/// The ordered set of live sources, plus the cursor pointing at whichever
/// source gets the next turn.
///
/// Every source is pinned in its own allocation, so removing an entry from the
/// middle of the `Vec` only moves the box and never the source itself.
pub(crate) struct Registry<S> {
    sources: Vec<Pin<Box<S>>>,
    cursor: usize,
}

impl<S> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            sources: Vec::new(),
            cursor: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sources.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[cfg(all(test, feature = "std"))]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &S> {
        self.sources.iter().map(|source| source.as_ref().get_ref())
    }

    /// Append a source. It takes its turn once the cursor reaches the end of
    /// the registry; the relative order of existing sources is untouched.
    pub(crate) fn push(&mut self, source: S) {
        self.sources.push(Box::pin(source));
        trace!("registered source, {} live", self.sources.len());
    }

    /// Drop every source.
    pub(crate) fn clear(&mut self) {
        self.sources.clear();
        self.cursor = 0;
    }

    /// One fairness pass: give each source at most one turn, starting at the
    /// cursor, and stop at the first one that yields an item.
    ///
    /// The number of attempts is fixed to the length of the registry when the
    /// pass starts. A source that has ended is removed in place and the cursor
    /// stays put, since the next source has shifted into its slot.
    ///
    /// Returns `None` when no source had an item ready. Every source that was
    /// visited and is still registered has had `cx` registered with it.
    pub(crate) fn poll_lap<T>(
        &mut self,
        cx: &mut Context<'_>,
        mut poll_source: impl FnMut(Pin<&mut S>, &mut Context<'_>) -> Poll<Option<T>>,
    ) -> Option<T> {
        let mut attempts = self.sources.len();

        while attempts > 0 && !self.sources.is_empty() {
            attempts -= 1;

            let source = self.sources[self.cursor].as_mut();
            match poll_source(source, cx) {
                Poll::Ready(Some(item)) => {
                    self.advance();
                    return Some(item);
                }
                Poll::Ready(None) => self.retire(),
                Poll::Pending => self.advance(),
            }
        }

        None
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.normalize();
    }

    fn retire(&mut self) {
        drop(self.sources.remove(self.cursor));
        trace!("retired source, {} live", self.sources.len());
        self.normalize();
    }

    fn normalize(&mut self) {
        self.cursor = match self.sources.len() {
            0 => 0,
            len => self.cursor % len,
        };
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("sources", &self.sources.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::utils::channel::local_channel;
    use futures::task::noop_waker_ref;
    use futures_core::Stream;
    use futures_lite::stream;

    fn lap<S: Stream>(registry: &mut Registry<S>) -> Option<S::Item> {
        let mut cx = Context::from_waker(noop_waker_ref());
        registry.poll_lap(&mut cx, |s, cx| s.poll_next(cx))
    }

    #[test]
    fn alternates_between_ready_sources() {
        let mut registry = Registry::new();
        registry.push(stream::iter(vec![0, 1, 2]));
        registry.push(stream::iter(vec![3, 4, 5, 6]));

        let mut out = vec![];
        while let Some(n) = lap(&mut registry) {
            out.push(n);
        }
        assert_eq!(out, vec![0, 3, 1, 4, 2, 5, 6]);
        assert!(registry.is_empty());
        assert_eq!(registry.cursor(), 0);
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let mut registry = Registry::<stream::Iter<std::vec::IntoIter<u8>>>::new();
        assert_eq!(lap(&mut registry), None);
        assert_eq!(registry.cursor(), 0);
    }

    #[test]
    fn pending_sources_are_skipped_once_per_lap() {
        let (tx_a, rx_a) = local_channel();
        let (tx_b, rx_b) = local_channel();
        let (tx_c, rx_c) = local_channel();

        let mut registry = Registry::new();
        registry.push(rx_a);
        registry.push(rx_b);
        registry.push(rx_c);

        // Nothing ready: one full lap, back where we started.
        assert_eq!(lap(&mut registry), None);
        assert_eq!(registry.cursor(), 0);

        tx_c.send("c");
        assert_eq!(lap(&mut registry), Some("c"));
        assert_eq!(registry.cursor(), 0);

        tx_a.send("a");
        tx_b.send("b");
        assert_eq!(lap(&mut registry), Some("a"));
        assert_eq!(lap(&mut registry), Some("b"));
        assert_eq!(registry.cursor(), 2);
    }

    #[test]
    fn ended_source_is_retired_without_advancing() {
        let (tx_a, rx_a) = local_channel();
        let (tx_b, rx_b) = local_channel();
        let (tx_c, rx_c) = local_channel();

        let mut registry = Registry::new();
        registry.push(rx_a);
        registry.push(rx_b);
        registry.push(rx_c);

        tx_a.send(1);
        assert_eq!(lap(&mut registry), Some(1));
        assert_eq!(registry.cursor(), 1);

        // `b` ends, `c` shifts into its slot and is read in the same lap.
        tx_b.close();
        tx_c.send(3);
        assert_eq!(lap(&mut registry), Some(3));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.cursor(), 0);
        drop(tx_a);
    }

    #[test]
    fn trailing_item_is_drained_before_retiring() {
        let (tx, rx) = local_channel();
        let mut registry = Registry::new();
        registry.push(rx);

        tx.send(7);
        tx.close();
        assert_eq!(lap(&mut registry), Some(7));
        assert_eq!(registry.len(), 1);
        assert_eq!(lap(&mut registry), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn appended_source_waits_for_its_turn() {
        let mut registry = Registry::new();
        registry.push(stream::iter(vec![0, 1]));
        registry.push(stream::iter(vec![10, 11]));

        assert_eq!(lap(&mut registry), Some(0));
        registry.push(stream::iter(vec![20, 21]));
        assert_eq!(lap(&mut registry), Some(10));
        assert_eq!(lap(&mut registry), Some(20));
        assert_eq!(lap(&mut registry), Some(1));
        assert_eq!(lap(&mut registry), Some(11));
        assert_eq!(lap(&mut registry), Some(21));
        assert_eq!(lap(&mut registry), None);
        assert!(registry.is_empty());
    }
}

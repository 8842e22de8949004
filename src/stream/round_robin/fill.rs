use alloc::collections::VecDeque;
use core::fmt;
use core::ops::ControlFlow;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project::pin_project;

use super::intake::Intake;
use super::registry::Registry;
use super::Options;
use crate::utils::log::{debug, trace};

/// Outcome of a single fill round.
enum Round<T, E> {
    /// A source yielded an item.
    Item(T),
    /// No item this round. Every live source and the outer stream (if still
    /// open) have the waker registered.
    Idle,
    /// A source or the outer stream failed.
    Failed(E),
}

/// The state shared by the infallible and fallible round-robin unions.
///
/// `O` is the outer stream of sources, `S` a single source and `T` the items
/// the union yields. How sources and the outer stream are polled is supplied
/// by the caller, which lets both flavours normalize to `Result<_, E>`.
#[pin_project]
pub(crate) struct FillLoop<O, S, T> {
    #[pin]
    intake: Intake<O>,
    registry: Registry<S>,
    buffer: VecDeque<T>,
    options: Options,
    done: bool,
}

impl<O, S, T> FillLoop<O, S, T> {
    pub(crate) fn new(outer: O, options: Options) -> Self {
        Self {
            intake: Intake::new(outer),
            registry: Registry::new(),
            buffer: VecDeque::new(),
            options,
            done: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn is_intake_ended(&self) -> bool {
        self.intake.is_ended()
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    pub(crate) fn options(&self) -> Options {
        self.options
    }

    /// Bounds on the remaining items, given a way to ask a source for its own.
    pub(crate) fn size_hint(
        &self,
        outer_hint: impl Fn(&O) -> (usize, Option<usize>),
        source_hint: impl Fn(&S) -> (usize, Option<usize>),
    ) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }

        let buffered = self.buffer.len();
        let (mut low, mut high) = (buffered, Some(buffered));
        for source in self.registry.iter() {
            let (l, h) = source_hint(source);
            low = low.saturating_add(l);
            high = match (high, h) {
                (Some(a), Some(b)) => a.checked_add(b),
                _ => None,
            };
        }

        match self.intake.outer() {
            None => (low, high),
            // Sources that are yet to arrive may hold any number of items,
            // unless we know for sure there won't be any more of them.
            Some(outer) => match outer_hint(outer) {
                (_, Some(0)) => (low, high),
                _ => (low, None),
            },
        }
    }

    /// Drive the fill loop for one `poll_next` call.
    pub(crate) fn poll_fill<E>(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        mut poll_outer: impl FnMut(Pin<&mut O>, &mut Context<'_>) -> Poll<Option<Result<S, E>>>,
        mut poll_source: impl FnMut(Pin<&mut S>, &mut Context<'_>) -> Poll<Option<Result<T, E>>>,
    ) -> Poll<Option<Result<T, E>>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        let target = this.options.fill_target();
        while this.buffer.len() < target {
            let round = Self::round(
                this.intake.as_mut(),
                this.registry,
                cx,
                &mut poll_outer,
                &mut poll_source,
            );
            match round {
                Round::Item(item) => this.buffer.push_back(item),
                Round::Idle => break,
                Round::Failed(error) => {
                    debug!("round-robin union failed, dropping {} sources", this.registry.len());
                    *this.done = true;
                    this.buffer.clear();
                    this.registry.clear();
                    this.intake.as_mut().close();
                    return Poll::Ready(Some(Err(error)));
                }
            }
        }

        if let Some(item) = this.buffer.pop_front() {
            return Poll::Ready(Some(Ok(item)));
        }

        if this.registry.is_empty() && this.intake.is_ended() {
            debug!("round-robin union completed");
            *this.done = true;
            return Poll::Ready(None);
        }

        Poll::Pending
    }

    /// A single fill round: take in newly arrived sources, then make one
    /// fairness pass over the registry.
    fn round<E>(
        intake: Pin<&mut Intake<O>>,
        registry: &mut Registry<S>,
        cx: &mut Context<'_>,
        poll_outer: impl FnMut(Pin<&mut O>, &mut Context<'_>) -> Poll<Option<Result<S, E>>>,
        poll_source: impl FnMut(Pin<&mut S>, &mut Context<'_>) -> Poll<Option<Result<T, E>>>,
    ) -> Round<T, E> {
        if !intake.is_ended() {
            let flow = intake.poll_drain(cx, poll_outer, |source| match source {
                Ok(source) => {
                    registry.push(source);
                    ControlFlow::Continue(())
                }
                Err(error) => ControlFlow::Break(error),
            });
            if let ControlFlow::Break(error) = flow {
                trace!("outer stream of sources failed");
                return Round::Failed(error);
            }
        }

        match registry.poll_lap(cx, poll_source) {
            Some(Ok(item)) => Round::Item(item),
            Some(Err(error)) => {
                trace!("source failed");
                Round::Failed(error)
            }
            None => Round::Idle,
        }
    }
}

impl<O, S, T> fmt::Debug for FillLoop<O, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillLoop")
            .field("intake", &self.intake)
            .field("registry", &self.registry)
            .field("buffered", &self.buffer.len())
            .field("options", &self.options)
            .field("done", &self.done)
            .finish()
    }
}

use core::fmt;
use core::ops::ControlFlow;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project::pin_project;

use crate::utils::log::debug;

/// Bridges the outer stream of sources into the registry.
///
/// The outer stream is dropped as soon as it reports that it has ended, so
/// `outer.is_none()` is the "no more sources will arrive" flag.
#[pin_project]
pub(crate) struct Intake<O> {
    #[pin]
    outer: Option<O>,
}

impl<O> Intake<O> {
    pub(crate) fn new(outer: O) -> Self {
        Self { outer: Some(outer) }
    }

    pub(crate) fn is_ended(&self) -> bool {
        self.outer.is_none()
    }

    pub(crate) fn outer(&self) -> Option<&O> {
        self.outer.as_ref()
    }

    /// Release the outer stream without waiting for it to end.
    pub(crate) fn close(self: Pin<&mut Self>) {
        self.project().outer.set(None);
    }

    /// Pull from the outer stream until it has nothing more to offer right
    /// now, handing every pulled value to `admit`.
    ///
    /// Stops early when `admit` breaks. `poll_outer` is called with `cx`, so
    /// a `Pending` result leaves the caller's waker registered with the outer
    /// stream.
    pub(crate) fn poll_drain<T, B>(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        mut poll_outer: impl FnMut(Pin<&mut O>, &mut Context<'_>) -> Poll<Option<T>>,
        mut admit: impl FnMut(T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let mut this = self.project();

        while let Some(outer) = this.outer.as_mut().as_pin_mut() {
            match poll_outer(outer, cx) {
                Poll::Ready(Some(value)) => {
                    if let ControlFlow::Break(b) = admit(value) {
                        return ControlFlow::Break(b);
                    }
                }
                Poll::Ready(None) => {
                    this.outer.set(None);
                    debug!("outer stream of sources ended");
                }
                Poll::Pending => break,
            }
        }

        ControlFlow::Continue(())
    }
}

impl<O> fmt::Debug for Intake<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intake")
            .field("ended", &self.is_ended())
            .finish()
    }
}

//! A single-threaded channel whose receiver is a `Stream`.
//!
//! Receivers return `Poll::Pending` until a value is sent or the channel is
//! closed, which lets tests drive sources that become ready at arbitrary
//! points in time.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use futures::Stream;

struct LocalChannel<T> {
    queue: VecDeque<T>,
    waker: Option<Waker>,
    closed: bool,
    receiver_alive: bool,
}

impl<T> LocalChannel<T> {
    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }
}

pub(crate) struct LocalReceiver<T> {
    channel: Rc<RefCell<LocalChannel<T>>>,
}

impl<T> Stream for LocalReceiver<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut channel = self.channel.borrow_mut();

        match channel.queue.pop_front() {
            Some(item) => Poll::Ready(Some(item)),
            None if channel.closed => Poll::Ready(None),
            None => {
                channel.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl<T> Drop for LocalReceiver<T> {
    fn drop(&mut self) {
        self.channel.borrow_mut().receiver_alive = false;
    }
}

pub(crate) struct LocalSender<T> {
    channel: Rc<RefCell<LocalChannel<T>>>,
}

impl<T> LocalSender<T> {
    pub(crate) fn send(&self, item: T) {
        let mut channel = self.channel.borrow_mut();
        channel.queue.push_back(item);
        channel.wake();
    }

    /// Close the channel. Already queued values are still delivered.
    pub(crate) fn close(self) {
        drop(self);
    }

    /// Whether the receiving half has been dropped.
    pub(crate) fn is_receiver_dropped(&self) -> bool {
        !self.channel.borrow().receiver_alive
    }
}

impl<T> Drop for LocalSender<T> {
    fn drop(&mut self) {
        let mut channel = self.channel.borrow_mut();
        channel.closed = true;
        channel.wake();
    }
}

pub(crate) fn local_channel<T>() -> (LocalSender<T>, LocalReceiver<T>) {
    let channel = Rc::new(RefCell::new(LocalChannel {
        queue: VecDeque::new(),
        waker: None,
        closed: false,
        receiver_alive: true,
    }));

    (
        LocalSender {
            channel: channel.clone(),
        },
        LocalReceiver { channel },
    )
}

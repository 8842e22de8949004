//! Utilities to implement the streams of this crate.

pub(crate) mod log;
mod stream;

#[cfg(all(test, feature = "std"))]
pub(crate) mod channel;

pub(crate) use stream::from_iter;
pub use stream::FromIter;

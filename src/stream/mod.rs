//! Composable asynchronous iteration.
//!
//! # Examples
//!
//! Interleave sources that arrive over time:
//!
//! ```
//! use round_robin_union::prelude::*;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let sources = stream::iter(vec![
//!         stream::iter(vec![1, 2]),
//!         stream::iter(vec![10, 20]),
//!     ]);
//!     let out: Vec<_> = sources.round_robin_flatten().collect().await;
//!     assert_eq!(out, vec![1, 10, 2, 20]);
//! })
//! ```
pub use crate::utils::FromIter;
pub use round_robin::{
    FillMode, Options, RoundRobin, RoundRobinUnion, StaticSources, TryRoundRobinUnion,
    DEFAULT_BUFFER_SIZE,
};
pub use stream_ext::{IntoStream, StreamExt};

pub(crate) mod round_robin;
mod stream_ext;

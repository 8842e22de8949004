// Logging shim: forwards to `tracing` when the feature is enabled, otherwise
// the arguments are discarded at compile time.

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

pub(crate) use debug;
pub(crate) use trace;

//! Internal logging shims.
//!
//! Each macro forwards to the matching `tracing` macro when the `tracing`
//! feature is enabled and expands to nothing otherwise.

macro_rules! _debug {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($tt)+);
    };
}

macro_rules! _trace {
    ($($tt:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($tt)+);
    };
}

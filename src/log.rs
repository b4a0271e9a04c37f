//! Logging shim for the render pipeline.
//!
//! With the `tracing` feature the macros below are `tracing`'s own, so fields
//! and levels follow `RUST_LOG`. Without it every macro swallows its tokens and
//! the render pass carries no logging cost at all.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __inkplot_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __inkplot_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __inkplot_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__inkplot_debug as debug, __inkplot_info as info, __inkplot_warn as warn};

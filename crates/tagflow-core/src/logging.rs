#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the usual `tracing` event macros are re-exported
//! here. Without it the same names expand to nothing, so call sites across the
//! workspace never need their own `cfg` guards.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __tagflow_log_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::__tagflow_log_noop as debug;
#[cfg(not(feature = "tracing"))]
pub use crate::__tagflow_log_noop as trace;
#[cfg(not(feature = "tracing"))]
pub use crate::__tagflow_log_noop as warn;

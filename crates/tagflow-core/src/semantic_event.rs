#![forbid(unsafe_code)]

//! High-level pointer gestures derived from raw [`PointerEvent`]s.
//!
//! # Invariants
//! 1. Every drag sequence is well-formed: `LongPress` → zero or more
//!    `DragMove` → `DragEnd` or `DragCancel`.
//! 2. `Tap` and `LongPress` never both emit for the same press.
//!
//! [`PointerEvent`]: crate::event::PointerEvent

use crate::geometry::Point;
use std::time::Duration;

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticEvent {
    /// Short press and release without leaving the slop radius.
    Tap { pos: Point },
    /// Press held in place past the long-press threshold. Starts a drag.
    LongPress { pos: Point, duration: Duration },
    /// Pointer moved during a long-press drag.
    DragMove { start: Point, current: Point },
    /// Pointer released during a long-press drag.
    DragEnd { start: Point, end: Point },
    /// The platform cancelled a long-press drag.
    DragCancel,
}

#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! Hosts translate their native touch/mouse events into [`PointerEvent`]
//! values in container coordinates. Only the primary pointer is tracked.

use crate::geometry::Point;

/// A raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Position relative to the container's top-left corner.
    pub pos: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            pos: Point::new(x, y),
        }
    }

    /// Pointer pressed.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    /// Pointer moved while pressed.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Pointer released.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// The platform took the gesture away (scroll parent, focus loss, ...).
    #[must_use]
    pub const fn cancel() -> Self {
        Self::new(PointerEventKind::Cancel, 0, 0)
    }
}

/// Kinds of pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// How the host constrains one axis of the container.
///
/// Mirrors the usual measure-spec triple of retained-mode toolkits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", content = "size", rename_all = "snake_case")]
pub enum SizeConstraint {
    /// The container must be exactly this size.
    Exact(u32),
    /// The container may be at most this size.
    AtMost(u32),
    /// No constraint.
    #[default]
    Unbounded,
}

impl SizeConstraint {
    /// Exact constraint from a signed host value (negative clamps to zero).
    #[must_use]
    pub const fn exact(size: i32) -> Self {
        Self::Exact(crate::geometry::clamp_len(size))
    }

    /// At-most constraint from a signed host value (negative clamps to zero).
    #[must_use]
    pub const fn at_most(size: i32) -> Self {
        Self::AtMost(crate::geometry::clamp_len(size))
    }

    /// The bound used while placing content, if any.
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Self::Exact(size) | Self::AtMost(size) => Some(size),
            Self::Unbounded => None,
        }
    }

    /// Resolve a computed size against this constraint.
    ///
    /// Only `Exact` overrides; `AtMost` leaves the computed value alone.
    #[must_use]
    pub const fn resolve(self, computed: u32) -> u32 {
        match self {
            Self::Exact(size) => size,
            Self::AtMost(_) | Self::Unbounded => computed,
        }
    }
}

/// Width and height constraints for one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct MeasureSpec {
    pub width: SizeConstraint,
    pub height: SizeConstraint,
}

impl MeasureSpec {
    /// Create a new measure spec.
    #[must_use]
    pub const fn new(width: SizeConstraint, height: SizeConstraint) -> Self {
        Self { width, height }
    }

    /// Bounded width with wrap-content height, the common case for a tag box.
    #[must_use]
    pub const fn wrap_height(width: i32) -> Self {
        Self::new(SizeConstraint::at_most(width), SizeConstraint::Unbounded)
    }
}

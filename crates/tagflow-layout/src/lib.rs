#![forbid(unsafe_code)]

//! Flow layout for tag chips.
//!
//! # Role in tagflow
//! `tagflow-layout` turns an ordered list of measured items into rows and
//! rectangles. It holds no state between passes; row hints and the drag
//! pinning flag are explicit inputs.

pub mod flow;

pub use flow::{DEFAULT_SPACING, Flow, FlowItem, FlowOutput, FlowPlacement};
pub use tagflow_core::event::{MeasureSpec, SizeConstraint};
pub use tagflow_core::geometry::{Rect, Sides, Size};

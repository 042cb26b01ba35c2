#![forbid(unsafe_code)]

//! Tag group: an ordered, selectable, drag-reorderable set of chips laid out
//! in wrapping rows.
//!
//! # Role in tagflow
//! This crate owns the tag sequence and the two interaction controllers
//! (selection and drag). [`TagGroup`] wires them to the flow pass from
//! `tagflow-layout` and reports placements through a [`RenderSink`].
//!
//! # Example
//! ```
//! use tagflow::{MeasureSpec, RenderCommand, TagGroup, TagGroupConfig};
//!
//! let mut group = TagGroup::new(TagGroupConfig::default(), Vec::<RenderCommand>::new());
//! let a = group.add_tag("rust");
//! let b = group.add_tag("layout");
//! group.on_container_resized(MeasureSpec::wrap_height(140));
//! group.on_size_available(a, 60, 20);
//! group.on_size_available(b, 60, 20);
//! assert_eq!(group.layout().rows(), 1);
//! ```

pub mod drag;
pub mod group;
pub mod model;
pub mod selection;
pub mod sink;

pub use drag::{
    CancelPolicy, DragCancelReason, DragSession, DropTarget, TagDragController, TagDragEffect,
    TagDragNoopReason, TagDragState, TagDragTransition,
};
pub use group::{TagGroup, TagGroupConfig};
pub use model::{Tag, TagId, TagModel, TagModelError};
pub use selection::{SelectionChange, SelectionNoopReason};
pub use sink::{NoopListener, RenderCommand, RenderSink, TagListener, TagMeasurer};

pub use tagflow_core::{
    GestureConfig, MeasureSpec, Point, PointerEvent, PointerEventKind, Rect, SemanticEvent,
    Sides, Size, SizeConstraint,
};
pub use tagflow_layout::{DEFAULT_SPACING, Flow, FlowOutput, FlowPlacement};

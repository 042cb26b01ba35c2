#![forbid(unsafe_code)]

//! Host-facing collaborator traits.
//!
//! The group never draws or measures anything itself. Hosts plug in a
//! [`RenderSink`] for output, a [`TagListener`] for selection changes, and
//! optionally a [`TagMeasurer`] for sizes.

use tagflow_core::geometry::{Rect, Size};

use crate::model::{Tag, TagId};

/// Receives the result of every layout pass.
pub trait RenderSink {
    /// Place one tag. Called once per laid-out tag per pass, in sequence order.
    fn place_tag(&mut self, id: TagId, rect: Rect);

    /// Report the container size after all tags of a pass are placed.
    fn report_container_size(&mut self, size: Size);

    /// Mark or unmark the tag picked up by a drag (e.g. reduced opacity).
    fn set_drag_source(&mut self, id: TagId, active: bool) {
        let _ = (id, active);
    }
}

/// One recorded sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    Place { id: TagId, rect: Rect },
    ContainerSize(Size),
    DragSource { id: TagId, active: bool },
}

impl RenderSink for Vec<RenderCommand> {
    fn place_tag(&mut self, id: TagId, rect: Rect) {
        self.push(RenderCommand::Place { id, rect });
    }

    fn report_container_size(&mut self, size: Size) {
        self.push(RenderCommand::ContainerSize(size));
    }

    fn set_drag_source(&mut self, id: TagId, active: bool) {
        self.push(RenderCommand::DragSource { id, active });
    }
}

/// Single-subscriber selection callback.
pub trait TagListener<C> {
    fn on_tag_selection_changed(&mut self, tag: &Tag<C>);
}

impl<C, F> TagListener<C> for F
where
    F: FnMut(&Tag<C>),
{
    fn on_tag_selection_changed(&mut self, tag: &Tag<C>) {
        self(tag)
    }
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<C> TagListener<C> for NoopListener {
    fn on_tag_selection_changed(&mut self, _tag: &Tag<C>) {}
}

/// Supplies natural sizes for tag content.
pub trait TagMeasurer<C> {
    fn measure(&mut self, content: &C) -> Size;
}

impl<C, F> TagMeasurer<C> for F
where
    F: FnMut(&C) -> Size,
{
    fn measure(&mut self, content: &C) -> Size {
        self(content)
    }
}

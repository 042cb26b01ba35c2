#![forbid(unsafe_code)]

//! The tag group: model, controllers, and layout wired together.
//!
//! [`TagGroup`] is the single entry point a host talks to. Every mutation
//! runs synchronously and, when it can change geometry, ends with exactly one
//! layout pass whose results go to the [`RenderSink`].
//!
//! # Invariants
//!
//! 1. A layout pass always sees the model after the mutation that triggered it.
//! 2. The pass is pinned exactly while the drag controller is active.
//! 3. Every exit from a drag (drop, cancel, removal, clear) is followed by one
//!    unpinned pass, so stored row indices settle to the plain wrap result.
//! 4. Sinks and listeners get `&mut self` only; they cannot re-enter the group.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tagflow_core::event::{MeasureSpec, PointerEvent};
use tagflow_core::geometry::{Point, Rect, Size};
use tagflow_core::gesture::{GestureConfig, GestureRecognizer};
use tagflow_core::logging::{debug, trace, warn};
use tagflow_core::semantic_event::SemanticEvent;
use tagflow_layout::{Flow, FlowOutput};

use crate::drag::{
    CancelPolicy, DragCancelReason, DropTarget, TagDragController, TagDragEffect, TagDragState,
    TagDragTransition, hit_test,
};
use crate::model::{Tag, TagId, TagModel};
use crate::selection::{SelectionChange, toggle_selection};
use crate::sink::{NoopListener, RenderSink, TagListener, TagMeasurer};

/// Configuration for a [`TagGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagGroupConfig {
    /// Spacing and insets.
    pub flow: Flow,
    /// Tap and long-press thresholds.
    pub gesture: GestureConfig,
    /// Order handling when a drag is cancelled.
    pub cancel_policy: CancelPolicy,
}

impl TagGroupConfig {
    #[must_use]
    pub fn flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub fn cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }
}

/// A flow-wrapping, selectable, drag-reorderable group of tags.
#[derive(Debug)]
pub struct TagGroup<C, R, L = NoopListener> {
    flow: Flow,
    model: TagModel<C>,
    drag: TagDragController,
    gestures: GestureRecognizer,
    spec: MeasureSpec,
    output: FlowOutput,
    targets: Vec<DropTarget>,
    sink: R,
    listener: L,
}

impl<C, R: RenderSink> TagGroup<C, R> {
    /// Create a group that ignores selection notifications.
    pub fn new(config: TagGroupConfig, sink: R) -> Self {
        Self::with_listener(config, sink, NoopListener)
    }
}

impl<C, R, L> TagGroup<C, R, L>
where
    R: RenderSink,
    L: TagListener<C>,
{
    /// Create a group with a selection listener.
    pub fn with_listener(config: TagGroupConfig, sink: R, listener: L) -> Self {
        Self {
            flow: config.flow,
            model: TagModel::new(),
            drag: TagDragController::new(config.cancel_policy),
            gestures: GestureRecognizer::new(config.gesture),
            spec: MeasureSpec::default(),
            output: FlowOutput::default(),
            targets: Vec::new(),
            sink,
            listener,
        }
    }

    // -----------------------------------------------------------------------
    // Tag list
    // -----------------------------------------------------------------------

    /// Append one tag.
    pub fn add_tag(&mut self, content: C) -> TagId {
        let id = self.model.push(content);
        self.relayout();
        id
    }

    /// Append several tags with a single layout pass.
    pub fn add_tags(&mut self, contents: impl IntoIterator<Item = C>) -> Vec<TagId> {
        let ids = contents
            .into_iter()
            .map(|content| self.model.push(content))
            .collect();
        self.relayout();
        ids
    }

    /// Replace every tag.
    pub fn set_tags(&mut self, contents: impl IntoIterator<Item = C>) -> Vec<TagId> {
        self.end_drag_for_removal();
        self.model.clear();
        self.add_tags(contents)
    }

    /// Remove every tag.
    pub fn remove_all_tags(&mut self) {
        self.end_drag_for_removal();
        self.model.clear();
        self.relayout();
    }

    /// Remove one tag. Returns `false` for an unknown handle.
    pub fn remove_tag(&mut self, id: TagId) -> bool {
        if self.model.position(id).is_none() {
            return false;
        }
        self.end_drag_for_removal();
        let removed = self.model.remove(id).is_ok();
        self.relayout();
        removed
    }

    /// Show or hide a tag. Hidden tags take no space.
    pub fn set_visible(&mut self, id: TagId, visible: bool) -> bool {
        if !self.model.set_visible(id, visible) {
            return false;
        }
        self.relayout();
        true
    }

    // -----------------------------------------------------------------------
    // Measurement
    // -----------------------------------------------------------------------

    /// The host measured a tag. Negative values clamp to zero.
    pub fn on_size_available(&mut self, id: TagId, width: i32, height: i32) -> bool {
        if !self.model.set_size(id, Size::clamped(width, height)) {
            return false;
        }
        self.relayout();
        true
    }

    /// Measure every tag through `measurer`, then lay out once.
    pub fn measure_with<M>(&mut self, measurer: &mut M)
    where
        M: TagMeasurer<C> + ?Sized,
    {
        self.model.measure_all(|content| measurer.measure(content));
        self.relayout();
    }

    /// The container's constraints changed.
    pub fn on_container_resized(&mut self, spec: MeasureSpec) {
        self.spec = spec;
        self.relayout();
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> TagGroupConfig {
        TagGroupConfig {
            flow: self.flow,
            gesture: self.gestures.config().clone(),
            cancel_policy: self.drag.cancel_policy(),
        }
    }

    /// Replace the configuration and lay out again.
    ///
    /// A drag in progress keeps going; the new cancel policy applies to how it
    /// ends.
    pub fn set_config(&mut self, config: TagGroupConfig) {
        self.flow = config.flow;
        self.gestures.set_config(config.gesture);
        self.drag.set_cancel_policy(config.cancel_policy);
        self.relayout();
    }

    // -----------------------------------------------------------------------
    // Drag surface
    // -----------------------------------------------------------------------

    /// Long press on a tag: pick it up. Ignored while another drag is active.
    pub fn on_long_press_start(&mut self, id: TagId) -> bool {
        let Some(index) = self.model.position(id) else {
            return false;
        };
        let transition = self.drag.begin(id, index);
        if let TagDragEffect::Started { tag, .. } = transition.effect {
            debug!(message = "tagflow.drag.start", tag = tag.get(), index);
            self.sink.set_drag_source(tag, true);
            true
        } else {
            false
        }
    }

    /// Pointer moved while a drag may be active.
    pub fn on_pointer_move(&mut self, x: i32, y: i32) -> TagDragTransition {
        let transition = self.drag.pointer_move(Point::new(x, y), &self.targets);
        if let TagDragEffect::Reordered { tag, to, .. } = transition.effect {
            match self.model.move_tag(tag, to) {
                Ok(_) => {
                    debug!(message = "tagflow.drag.reorder", tag = tag.get(), to);
                    self.relayout();
                }
                Err(_err) => {
                    warn!(message = "tagflow.drag.reorder_failed", error = %_err);
                }
            }
        }
        transition
    }

    /// Pointer released. A release outside the container cancels.
    pub fn on_pointer_release(&mut self) -> TagDragTransition {
        let inside = self
            .drag
            .session()
            .and_then(|session| session.pointer)
            .is_none_or(|pointer| self.bounds().contains(pointer));
        let transition = self.drag.release(inside);
        self.finish_drag(transition);
        transition
    }

    /// The platform cancelled the gesture.
    pub fn on_gesture_cancelled(&mut self) -> TagDragTransition {
        let transition = self.drag.cancel(DragCancelReason::GestureCancelled);
        self.finish_drag(transition);
        transition
    }

    /// Cancel any active drag from host code.
    pub fn cancel_drag(&mut self) -> TagDragTransition {
        let transition = self.drag.cancel(DragCancelReason::Programmatic);
        self.gestures.reset();
        self.finish_drag(transition);
        transition
    }

    // -----------------------------------------------------------------------
    // Selection surface
    // -----------------------------------------------------------------------

    /// Tap/click on a tag.
    pub fn on_tag_activated(&mut self, id: TagId) -> SelectionChange {
        toggle_selection(
            &mut self.model,
            id,
            self.drag.dragged_tag(),
            &mut self.listener,
        )
    }

    // -----------------------------------------------------------------------
    // Raw pointer input
    // -----------------------------------------------------------------------

    /// Feed a raw pointer event through the gesture recognizer.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) {
        for gesture in self.gestures.process(event, now) {
            self.dispatch(gesture);
        }
    }

    /// Advance the long-press timer without pointer input.
    pub fn tick(&mut self, now: Instant) {
        if let Some(gesture) = self.gestures.tick(now) {
            self.dispatch(gesture);
        }
    }

    fn dispatch(&mut self, gesture: SemanticEvent) {
        trace!(message = "tagflow.gesture", gesture = ?gesture);
        match gesture {
            SemanticEvent::Tap { pos } => {
                if let Some(id) = self.tag_at(pos.x, pos.y) {
                    self.on_tag_activated(id);
                }
            }
            SemanticEvent::LongPress { pos, .. } => {
                if let Some(id) = self.tag_at(pos.x, pos.y) {
                    self.on_long_press_start(id);
                }
            }
            SemanticEvent::DragMove { current, .. } => {
                self.on_pointer_move(current.x, current.y);
            }
            SemanticEvent::DragEnd { end, .. } => {
                let last = self.drag.session().and_then(|session| session.pointer);
                if last != Some(end) {
                    self.on_pointer_move(end.x, end.y);
                }
                self.on_pointer_release();
            }
            SemanticEvent::DragCancel => {
                self.on_gesture_cancelled();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tag whose current placement contains the point.
    #[must_use]
    pub fn tag_at(&self, x: i32, y: i32) -> Option<TagId> {
        hit_test(&self.targets, Point::new(x, y), None).map(|target| target.tag)
    }

    /// Tags in sequence order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag<C>> {
        self.model.iter()
    }

    #[must_use]
    pub fn tag(&self, id: TagId) -> Option<&Tag<C>> {
        self.model.get(id)
    }

    /// Handles in sequence order.
    #[must_use]
    pub fn order(&self) -> Vec<TagId> {
        self.model.ids().collect()
    }

    #[must_use]
    pub fn model(&self) -> &TagModel<C> {
        &self.model
    }

    /// Result of the latest layout pass.
    #[must_use]
    pub fn layout(&self) -> &FlowOutput {
        &self.output
    }

    /// Placement of `id` in the latest pass.
    #[must_use]
    pub fn placement(&self, id: TagId) -> Option<Rect> {
        self.targets
            .iter()
            .find(|target| target.tag == id)
            .map(|target| target.rect)
    }

    #[must_use]
    pub fn container_size(&self) -> Size {
        self.output.size()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[must_use]
    pub fn drag_state(&self) -> TagDragState {
        self.drag.state()
    }

    #[must_use]
    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Container rectangle used to decide whether a release was inside.
    fn bounds(&self) -> Rect {
        let size = self.output.size();
        let width = self.spec.width.limit().unwrap_or(size.width).max(size.width);
        Rect::from_size(width, size.height)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn end_drag_for_removal(&mut self) {
        if self.drag.is_active() {
            let transition = self.drag.cancel(DragCancelReason::TagRemoved);
            self.gestures.reset();
            self.finish_drag(transition);
        }
    }

    fn finish_drag(&mut self, transition: TagDragTransition) {
        let (tag, restore_to) = match transition.effect {
            TagDragEffect::Dropped { tag, .. } => (tag, None),
            TagDragEffect::Cancelled {
                tag, restore_to, ..
            } => (tag, restore_to),
            _ => return,
        };
        debug!(message = "tagflow.drag.end", effect = ?transition.effect);

        if let Some(index) = restore_to {
            let index = index.min(self.model.len().saturating_sub(1));
            if let Err(_err) = self.model.move_tag(tag, index) {
                warn!(message = "tagflow.drag.restore_failed", error = %_err);
            }
        }
        self.sink.set_drag_source(tag, false);
        self.relayout();
    }

    fn relayout(&mut self) {
        let items = self.model.flow_items();
        let pinned = self.drag.is_active();
        self.output = self.flow.layout(&items, self.spec, pinned);
        self.model.apply_rows(&self.output);

        self.targets.clear();
        for placement in self.output.placements() {
            let Some(tag) = self.model.at(placement.index) else {
                continue;
            };
            let target = DropTarget {
                tag: tag.id(),
                index: placement.index,
                rect: placement.rect,
            };
            self.sink.place_tag(target.tag, target.rect);
            self.targets.push(target);
        }
        self.sink.report_container_size(self.output.size());

        trace!(
            message = "tagflow.layout.pass",
            tags = items.len(),
            rows = self.output.rows(),
            pinned
        );
    }
}

#![forbid(unsafe_code)]

//! Drag-to-reorder lifecycle.
//!
//! ```text
//! Idle -> Dragging -> Idle
//!             |-> Dropped   (release over the container)
//!             \-> Cancelled (release outside, platform cancel, removal)
//! ```
//!
//! [`TagDragController`] only decides. Every transition returns a
//! [`TagDragEffect`] and the owner applies it: splicing the model on
//! `Reordered`, restoring order on a `Cancelled` that carries `restore_to`,
//! and running one unpinned layout pass after `Dropped` or `Cancelled`.
//!
//! The pinning flag handed to the layout pass is [`TagDragController::is_active`],
//! derived from the state itself, so leaving `Dragging` by any path clears it.

use serde::{Deserialize, Serialize};
use tagflow_core::geometry::{Point, Rect};

use crate::model::TagId;

/// What happens to the sequence order when a drag is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep the reorder applied while the pointer moved.
    #[default]
    KeepReorder,
    /// Put the dragged tag back at the index it was picked up from.
    RestoreOrder,
}

/// A laid-out tag the pointer can hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub tag: TagId,
    /// Sequence position of the tag.
    pub index: usize,
    pub rect: Rect,
}

/// Find the tag under `pointer`, skipping `exclude`.
#[must_use]
pub fn hit_test(targets: &[DropTarget], pointer: Point, exclude: Option<TagId>) -> Option<&DropTarget> {
    targets
        .iter()
        .find(|target| Some(target.tag) != exclude && target.rect.contains(pointer))
}

/// State of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub tag: TagId,
    /// Index at pick-up, kept for cancel rollback.
    pub origin_index: usize,
    /// Index after the latest reorder.
    pub current_index: usize,
    /// Last pointer position seen, if any.
    pub pointer: Option<Point>,
    /// Tag the pointer is currently over. A reorder fires only on entering
    /// a different tag.
    pub hovered: Option<TagId>,
}

/// Deterministic drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TagDragState {
    #[default]
    Idle,
    Dragging { session: DragSession },
}

/// Why a drag was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    /// Released outside the container.
    ReleasedOutside,
    /// The platform took the gesture away.
    GestureCancelled,
    /// Tags were removed while the drag was active.
    TagRemoved,
    /// Cancelled by the host.
    Programmatic,
}

/// Explicit no-op diagnostics for inputs that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagDragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    NoTagUnderPointer,
    /// The pointer is still inside the tag it last entered.
    StillOverHoveredTag,
    AlreadyAtCandidate,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum TagDragEffect {
    Started {
        tag: TagId,
        origin_index: usize,
    },
    Reordered {
        tag: TagId,
        from: usize,
        to: usize,
    },
    Dropped {
        tag: TagId,
        origin_index: usize,
        final_index: usize,
    },
    Cancelled {
        tag: TagId,
        origin_index: usize,
        final_index: usize,
        /// Index the owner must move the tag back to, if any.
        restore_to: Option<usize>,
        reason: DragCancelReason,
    },
    Noop {
        reason: TagDragNoopReason,
    },
}

impl TagDragEffect {
    /// Whether this effect ends the session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Dropped { .. } | Self::Cancelled { .. })
    }
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDragTransition {
    pub transition_id: u64,
    pub from: TagDragState,
    pub to: TagDragState,
    pub effect: TagDragEffect,
}

/// Runtime lifecycle machine for tag reordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagDragController {
    state: TagDragState,
    cancel_policy: CancelPolicy,
    transition_counter: u64,
}

impl TagDragController {
    #[must_use]
    pub fn new(cancel_policy: CancelPolicy) -> Self {
        Self {
            state: TagDragState::Idle,
            cancel_policy,
            transition_counter: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TagDragState {
        self.state
    }

    #[must_use]
    pub const fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    pub fn set_cancel_policy(&mut self, policy: CancelPolicy) {
        self.cancel_policy = policy;
    }

    /// Whether a drag is in progress. This is the layout pinning flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, TagDragState::Dragging { .. })
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            TagDragState::Dragging { session } => Some(session),
            TagDragState::Idle => None,
        }
    }

    /// Tag currently picked up.
    #[must_use]
    pub fn dragged_tag(&self) -> Option<TagId> {
        self.session().map(|session| session.tag)
    }

    /// Long press on `tag`, which sits at sequence position `index`.
    pub fn begin(&mut self, tag: TagId, index: usize) -> TagDragTransition {
        let from = self.state;
        let effect = match from {
            TagDragState::Idle => {
                self.state = TagDragState::Dragging {
                    session: DragSession {
                        tag,
                        origin_index: index,
                        current_index: index,
                        pointer: None,
                        hovered: None,
                    },
                };
                TagDragEffect::Started {
                    tag,
                    origin_index: index,
                }
            }
            TagDragState::Dragging { .. } => TagDragEffect::Noop {
                reason: TagDragNoopReason::DragAlreadyInProgress,
            },
        };
        self.transition(from, effect)
    }

    /// Pointer moved to `pointer`; `targets` are the current placements.
    ///
    /// Entering a tag makes its index the candidate. A candidate different
    /// from the dragged tag's index yields `Reordered`. Further moves inside
    /// the same tag do nothing.
    pub fn pointer_move(&mut self, pointer: Point, targets: &[DropTarget]) -> TagDragTransition {
        let from = self.state;
        let effect = match &mut self.state {
            TagDragState::Idle => TagDragEffect::Noop {
                reason: TagDragNoopReason::IdleWithoutActiveDrag,
            },
            TagDragState::Dragging { session } => {
                session.pointer = Some(pointer);
                if let Some(own) = targets.iter().find(|target| target.tag == session.tag) {
                    session.current_index = own.index;
                }
                let hit = hit_test(targets, pointer, Some(session.tag));
                let previous_hover = std::mem::replace(&mut session.hovered, hit.map(|t| t.tag));
                match hit {
                    None => TagDragEffect::Noop {
                        reason: TagDragNoopReason::NoTagUnderPointer,
                    },
                    Some(target) if previous_hover == Some(target.tag) => TagDragEffect::Noop {
                        reason: TagDragNoopReason::StillOverHoveredTag,
                    },
                    Some(target) if target.index == session.current_index => TagDragEffect::Noop {
                        reason: TagDragNoopReason::AlreadyAtCandidate,
                    },
                    Some(target) => {
                        let previous = session.current_index;
                        session.current_index = target.index;
                        TagDragEffect::Reordered {
                            tag: session.tag,
                            from: previous,
                            to: target.index,
                        }
                    }
                }
            }
        };
        self.transition(from, effect)
    }

    /// Pointer released. `inside` tells whether it was over the container.
    pub fn release(&mut self, inside: bool) -> TagDragTransition {
        let from = self.state;
        let effect = match from {
            TagDragState::Idle => TagDragEffect::Noop {
                reason: TagDragNoopReason::IdleWithoutActiveDrag,
            },
            TagDragState::Dragging { session } if inside => {
                self.state = TagDragState::Idle;
                TagDragEffect::Dropped {
                    tag: session.tag,
                    origin_index: session.origin_index,
                    final_index: session.current_index,
                }
            }
            TagDragState::Dragging { .. } => {
                return self.cancel(DragCancelReason::ReleasedOutside);
            }
        };
        self.transition(from, effect)
    }

    /// End the drag without a drop.
    pub fn cancel(&mut self, reason: DragCancelReason) -> TagDragTransition {
        let from = self.state;
        let effect = match from {
            TagDragState::Idle => TagDragEffect::Noop {
                reason: TagDragNoopReason::IdleWithoutActiveDrag,
            },
            TagDragState::Dragging { session } => {
                self.state = TagDragState::Idle;
                let restore_to = match self.cancel_policy {
                    CancelPolicy::RestoreOrder if session.current_index != session.origin_index => {
                        Some(session.origin_index)
                    }
                    CancelPolicy::RestoreOrder | CancelPolicy::KeepReorder => None,
                };
                TagDragEffect::Cancelled {
                    tag: session.tag,
                    origin_index: session.origin_index,
                    final_index: session.current_index,
                    restore_to,
                    reason,
                }
            }
        };
        self.transition(from, effect)
    }

    fn transition(&mut self, from: TagDragState, effect: TagDragEffect) -> TagDragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        TagDragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TagId {
        serde_json::from_str(&n.to_string()).expect("tag id")
    }

    /// Five 100px tags, spacing 10, width 250: rows [0,1] [2,3] [4].
    fn grid() -> Vec<DropTarget> {
        (0..5)
            .map(|i| DropTarget {
                tag: id(i as u64 + 1),
                index: i,
                rect: Rect::new((i as u32 % 2) * 110, (i as u32 / 2) * 40, 100, 30),
            })
            .collect()
    }

    #[test]
    fn begin_enters_dragging() {
        let mut drag = TagDragController::default();
        let t = drag.begin(id(1), 0);
        assert_eq!(t.from, TagDragState::Idle);
        assert!(drag.is_active());
        assert_eq!(drag.dragged_tag(), Some(id(1)));
        assert_eq!(
            t.effect,
            TagDragEffect::Started {
                tag: id(1),
                origin_index: 0
            }
        );
    }

    #[test]
    fn second_long_press_is_ignored() {
        let mut drag = TagDragController::default();
        drag.begin(id(1), 0);
        let t = drag.begin(id(2), 1);
        assert_eq!(
            t.effect,
            TagDragEffect::Noop {
                reason: TagDragNoopReason::DragAlreadyInProgress
            }
        );
        assert_eq!(drag.dragged_tag(), Some(id(1)));
    }

    #[test]
    fn hover_over_other_tag_reorders() {
        let mut drag = TagDragController::default();
        drag.begin(id(1), 0);
        let t = drag.pointer_move(Point::new(150, 50), &grid());
        assert_eq!(
            t.effect,
            TagDragEffect::Reordered {
                tag: id(1),
                from: 0,
                to: 3
            }
        );
        assert_eq!(drag.session().map(|s| s.current_index), Some(3));
    }

    /// `grid` after tag 1 moved to index 3 under a pinned pass:
    /// rows [2] [3 4] [1 5].
    fn after_splice() -> Vec<DropTarget> {
        [(2, 0, 0), (3, 0, 40), (4, 110, 40), (1, 0, 80), (5, 110, 80)]
            .into_iter()
            .enumerate()
            .map(|(index, (tag, x, y))| DropTarget {
                tag: id(tag),
                index,
                rect: Rect::new(x, y, 100, 30),
            })
            .collect()
    }

    #[test]
    fn moving_within_hovered_tag_reorders_once() {
        let mut drag = TagDragController::default();
        drag.begin(id(1), 0);
        let first = drag.pointer_move(Point::new(150, 50), &grid());
        assert!(matches!(first.effect, TagDragEffect::Reordered { to: 3, .. }));

        let second = drag.pointer_move(Point::new(151, 50), &after_splice());
        assert_eq!(
            second.effect,
            TagDragEffect::Noop {
                reason: TagDragNoopReason::StillOverHoveredTag
            }
        );
        assert_eq!(drag.session().map(|s| s.current_index), Some(3));
    }

    #[test]
    fn leaving_and_reentering_a_tag_counts_again() {
        let mut drag = TagDragController::default();
        drag.begin(id(1), 0);
        drag.pointer_move(Point::new(150, 50), &grid());
        let gap = drag.pointer_move(Point::new(105, 50), &after_splice());
        assert!(matches!(gap.effect, TagDragEffect::Noop { .. }));
        assert_eq!(drag.session().and_then(|s| s.hovered), None);

        let again = drag.pointer_move(Point::new(150, 50), &after_splice());
        assert_eq!(
            again.effect,
            TagDragEffect::Reordered {
                tag: id(1),
                from: 3,
                to: 2
            }
        );
        assert_eq!(drag.session().and_then(|s| s.hovered), Some(id(4)));
    }

    #[test]
    fn hover_over_self_or_gap_is_noop() {
        let mut drag = TagDragController::default();
        drag.begin(id(1), 0);
        let own = drag.pointer_move(Point::new(10, 10), &grid());
        assert_eq!(
            own.effect,
            TagDragEffect::Noop {
                reason: TagDragNoopReason::NoTagUnderPointer
            }
        );
        let gap = drag.pointer_move(Point::new(105, 10), &grid());
        assert!(matches!(gap.effect, TagDragEffect::Noop { .. }));
        assert_eq!(drag.session().and_then(|s| s.pointer), Some(Point::new(105, 10)));
    }

    #[test]
    fn release_inside_drops() {
        let mut drag = TagDragController::default();
        drag.begin(id(2), 1);
        drag.pointer_move(Point::new(20, 90), &grid());
        let t = drag.release(true);
        assert_eq!(
            t.effect,
            TagDragEffect::Dropped {
                tag: id(2),
                origin_index: 1,
                final_index: 4
            }
        );
        assert!(t.effect.is_terminal());
        assert!(!drag.is_active());
    }

    #[test]
    fn release_outside_cancels_keeping_order_by_default() {
        let mut drag = TagDragController::default();
        drag.begin(id(2), 1);
        drag.pointer_move(Point::new(20, 90), &grid());
        let t = drag.release(false);
        assert_eq!(
            t.effect,
            TagDragEffect::Cancelled {
                tag: id(2),
                origin_index: 1,
                final_index: 4,
                restore_to: None,
                reason: DragCancelReason::ReleasedOutside,
            }
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn restore_policy_requests_rollback() {
        let mut drag = TagDragController::new(CancelPolicy::RestoreOrder);
        drag.begin(id(2), 1);
        drag.pointer_move(Point::new(20, 90), &grid());
        let t = drag.cancel(DragCancelReason::GestureCancelled);
        assert!(matches!(
            t.effect,
            TagDragEffect::Cancelled {
                restore_to: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn restore_policy_without_movement_has_nothing_to_restore() {
        let mut drag = TagDragController::new(CancelPolicy::RestoreOrder);
        drag.begin(id(2), 1);
        let t = drag.cancel(DragCancelReason::Programmatic);
        assert!(matches!(
            t.effect,
            TagDragEffect::Cancelled {
                restore_to: None,
                ..
            }
        ));
    }

    #[test]
    fn idle_inputs_are_noops() {
        let mut drag = TagDragController::default();
        let idle = TagDragEffect::Noop {
            reason: TagDragNoopReason::IdleWithoutActiveDrag,
        };
        assert_eq!(drag.release(true).effect, idle);
        assert_eq!(drag.cancel(DragCancelReason::GestureCancelled).effect, idle);
        assert_eq!(drag.pointer_move(Point::new(1, 1), &grid()).effect, idle);
        assert!(!drag.is_active());
    }

    #[test]
    fn transition_ids_increase() {
        let mut drag = TagDragController::default();
        let a = drag.begin(id(1), 0).transition_id;
        let b = drag.release(true).transition_id;
        assert!(b > a);
    }

    #[test]
    fn state_serializes_with_tag() {
        let mut drag = TagDragController::default();
        drag.begin(id(7), 2);
        let json = serde_json::to_value(drag.state()).expect("serialize");
        assert_eq!(json["state"], "dragging");
        assert_eq!(json["session"]["tag"], 7);
        assert_eq!(json["session"]["origin_index"], 2);
    }

    #[test]
    fn hit_test_skips_excluded() {
        let targets = grid();
        let point = Point::new(5, 5);
        assert_eq!(hit_test(&targets, point, None).map(|t| t.index), Some(0));
        assert!(hit_test(&targets, point, Some(id(1))).is_none());
    }
}

#![forbid(unsafe_code)]

//! Click-to-select toggling.
//!
//! Selection is presentation state only; it never feeds the layout pass.

use serde::{Deserialize, Serialize};
use tagflow_core::logging::debug;

use crate::model::{TagId, TagModel};
use crate::sink::TagListener;

/// Why an activation did not toggle anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionNoopReason {
    UnknownTag,
    TagBeingDragged,
}

/// Result of one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum SelectionChange {
    Selected,
    Deselected,
    Ignored { reason: SelectionNoopReason },
}

impl SelectionChange {
    /// Whether the selection flag flipped.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Ignored { .. })
    }
}

/// Toggle `id` and notify `listener` exactly once.
///
/// The tag currently picked up by a drag (`dragged`) cannot be toggled.
pub fn toggle_selection<C, L>(
    model: &mut TagModel<C>,
    id: TagId,
    dragged: Option<TagId>,
    listener: &mut L,
) -> SelectionChange
where
    L: TagListener<C> + ?Sized,
{
    if dragged == Some(id) {
        return SelectionChange::Ignored {
            reason: SelectionNoopReason::TagBeingDragged,
        };
    }
    let Some(selected) = model.toggle_selected(id) else {
        return SelectionChange::Ignored {
            reason: SelectionNoopReason::UnknownTag,
        };
    };
    debug!(message = "tagflow.selection.toggle", tag = id.get(), selected);
    if let Some(tag) = model.get(id) {
        listener.on_tag_selection_changed(tag);
    }
    if selected {
        SelectionChange::Selected
    } else {
        SelectionChange::Deselected
    }
}

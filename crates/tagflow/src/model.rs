#![forbid(unsafe_code)]

//! Ordered tag storage.
//!
//! [`TagModel`] owns the tag sequence. Order is significant: it is what the
//! flow pass walks and what a drag rewrites. Handles ([`TagId`]) stay valid
//! across reorders and are never reused.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tagflow_core::geometry::Size;
use tagflow_layout::{FlowItem, FlowOutput};

/// Stable handle to one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(u64);

impl TagId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

/// One chip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<C> {
    id: TagId,
    content: C,
    size: Option<Size>,
    selected: bool,
    row_index: usize,
    visible: bool,
}

impl<C> Tag<C> {
    fn new(id: TagId, content: C) -> Self {
        Self {
            id,
            content,
            size: None,
            selected: false,
            row_index: 0,
            visible: true,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    #[must_use]
    pub const fn content(&self) -> &C {
        &self.content
    }

    /// Measured natural size, once the host has supplied one.
    #[must_use]
    pub const fn size(&self) -> Option<Size> {
        self.size
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Row this tag occupied after the last layout pass.
    #[must_use]
    pub const fn row_index(&self) -> usize {
        self.row_index
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the flow pass will place this tag.
    #[must_use]
    pub const fn is_laid_out(&self) -> bool {
        self.visible && self.size.is_some()
    }
}

/// Failures of programmatic model edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagModelError {
    /// The handle does not belong to a live tag.
    UnknownTag(TagId),
    /// The target index is past the end of the sequence.
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for TagModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag(id) => write!(f, "unknown tag {id}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for {len} tags")
            }
        }
    }
}

impl std::error::Error for TagModelError {}

/// The ordered tag sequence.
#[derive(Debug, Clone)]
pub struct TagModel<C> {
    tags: Vec<Tag<C>>,
    positions: FxHashMap<TagId, usize>,
    next_id: u64,
}

impl<C> Default for TagModel<C> {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            positions: FxHashMap::default(),
            next_id: 1,
        }
    }
}

impl<C> TagModel<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append a tag and return its handle.
    pub fn push(&mut self, content: C) -> TagId {
        let id = TagId(self.next_id);
        self.next_id += 1;
        self.positions.insert(id, self.tags.len());
        self.tags.push(Tag::new(id, content));
        id
    }

    /// Remove every tag. Handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.positions.clear();
    }

    /// Remove one tag, returning it.
    pub fn remove(&mut self, id: TagId) -> Result<Tag<C>, TagModelError> {
        let index = self.position(id).ok_or(TagModelError::UnknownTag(id))?;
        let tag = self.tags.remove(index);
        self.positions.remove(&id);
        self.reindex(index..self.tags.len());
        Ok(tag)
    }

    /// Splice `id` out of the sequence and back in at `to`.
    ///
    /// Returns the index the tag came from.
    pub fn move_tag(&mut self, id: TagId, to: usize) -> Result<usize, TagModelError> {
        let from = self.position(id).ok_or(TagModelError::UnknownTag(id))?;
        let len = self.tags.len();
        if to >= len {
            return Err(TagModelError::IndexOutOfBounds { index: to, len });
        }
        if from != to {
            let tag = self.tags.remove(from);
            self.tags.insert(to, tag);
            self.reindex(from.min(to)..from.max(to) + 1);
        }
        Ok(from)
    }

    /// Current sequence position of `id`.
    #[must_use]
    pub fn position(&self, id: TagId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&Tag<C>> {
        self.position(id).map(|index| &self.tags[index])
    }

    /// Tag at a sequence position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Tag<C>> {
        self.tags.get(index)
    }

    /// Tags in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag<C>> {
        self.tags.iter()
    }

    /// Handles in sequence order.
    pub fn ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.tags.iter().map(|tag| tag.id)
    }

    pub(crate) fn set_size(&mut self, id: TagId, size: Size) -> bool {
        self.with_tag(id, |tag| tag.size = Some(size))
    }

    pub(crate) fn set_visible(&mut self, id: TagId, visible: bool) -> bool {
        self.with_tag(id, |tag| tag.visible = visible)
    }

    /// Flip the selection flag, returning the new value.
    pub(crate) fn toggle_selected(&mut self, id: TagId) -> Option<bool> {
        let index = self.position(id)?;
        let tag = &mut self.tags[index];
        tag.selected = !tag.selected;
        Some(tag.selected)
    }

    /// Fill in sizes for every tag through `measure`.
    pub(crate) fn measure_all(&mut self, mut measure: impl FnMut(&C) -> Size) {
        for tag in &mut self.tags {
            tag.size = Some(measure(&tag.content));
        }
    }

    /// Items for one flow pass, index-aligned with the sequence.
    ///
    /// Unmeasured tags are handed over as hidden.
    pub(crate) fn flow_items(&self) -> Vec<FlowItem> {
        self.tags
            .iter()
            .map(|tag| {
                FlowItem::from_size(tag.size.unwrap_or_default())
                    .visible(tag.is_laid_out())
                    .row_hint(tag.row_index)
            })
            .collect()
    }

    /// Store each placed tag's row for the next pass.
    pub(crate) fn apply_rows(&mut self, output: &FlowOutput) {
        for placement in output.placements() {
            if let Some(tag) = self.tags.get_mut(placement.index) {
                tag.row_index = placement.row;
            }
        }
    }

    fn with_tag(&mut self, id: TagId, edit: impl FnOnce(&mut Tag<C>)) -> bool {
        match self.position(id) {
            Some(index) => {
                edit(&mut self.tags[index]);
                true
            }
            None => false,
        }
    }

    fn reindex(&mut self, range: std::ops::Range<usize>) {
        for index in range {
            self.positions.insert(self.tags[index].id, index);
        }
    }
}

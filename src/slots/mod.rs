pub mod editor;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Highest slot index a request may address. Growth past this only happens
/// through first-empty appends and the single extra cell a push move may need.
pub const MAX_SLOT_INDEX: usize = 99_999;

/// A card placed in a binder, as captured from the card resolver at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CardEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Image variants exactly as the upstream catalog returned them.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub images: Option<serde_json::Value>,
    /// Set name
    #[serde(default)]
    pub set: String,
    #[serde(default, rename = "setId")]
    pub set_id: String,
    /// Collector number within the set
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub lang: String,
}

/// `None` is a vacant cell. Slots have no identity beyond their position.
pub type Slot = Option<CardEntry>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid index: {0}")]
    NegativeIndex(i64),
    #[error("Index {0} exceeds the binder size limit")]
    IndexTooLarge(i64),
    #[error("Source slot is empty")]
    EmptySource,
    #[error("Destination slot is not empty")]
    DestinationOccupied,
}

/// Position-addressed run of slots. Index `i` is always the same physical
/// page cell, so nothing here ever compacts or truncates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSequence(Vec<Slot>);

impl SlotSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardEntry> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.0.iter()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Occupied entries in position order.
    pub fn occupied(&self) -> impl Iterator<Item = &CardEntry> {
        self.0.iter().flatten()
    }

    pub fn occupied_ids(&self) -> Vec<String> {
        self.occupied()
            .filter(|c| !c.id.is_empty())
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.occupied().any(|c| c.id == id)
    }

    /// Grow with empty slots until `index` is addressable. Never shrinks.
    pub fn extend_to(&mut self, index: usize) -> Result<(), EditError> {
        if index > MAX_SLOT_INDEX {
            return Err(EditError::IndexTooLarge(index as i64));
        }
        if index >= self.0.len() {
            self.0.resize(index + 1, None);
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, slot: Slot) {
        self.0.push(slot);
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.0.get_mut(index)
    }

    pub(crate) fn take(&mut self, index: usize) -> Slot {
        self.0.get_mut(index).and_then(Option::take)
    }

    pub(crate) fn swap_cells(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }
}

impl From<Vec<Slot>> for SlotSequence {
    fn from(slots: Vec<Slot>) -> Self {
        Self(slots)
    }
}

/// Validate a caller-supplied index as a non-negative position that may be
/// extended to.
pub fn addressable(raw: i64) -> Result<usize, EditError> {
    let index = usize::try_from(raw).map_err(|_| EditError::NegativeIndex(raw))?;
    if index > MAX_SLOT_INDEX {
        return Err(EditError::IndexTooLarge(raw));
    }
    Ok(index)
}

#[cfg(test)]
pub(crate) fn card(id: &str) -> CardEntry {
    CardEntry {
        id: id.to_string(),
        name: format!("Card {id}"),
        image: None,
        images: None,
        set: "Base Set".to_string(),
        set_id: "base1".to_string(),
        number: Some("1".to_string()),
        lang: "en".to_string(),
    }
}

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::slots::editor::{self, AddOutcome, MoveOutcome, RemoveOutcome};
use crate::slots::{CardEntry, EditError, SlotSequence};

pub const DEFAULT_BINDER_ID: &str = "default";
pub const DEFAULT_BINDER_NAME: &str = "Main Binder";

/// Serialize only. Loading goes through `store::migration`, which fills defaults
/// and repairs the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binder {
    pub name: String,
    #[serde(rename = "cards")]
    pub slots: SlotSequence,
    pub readonly: bool,
    pub favorite: bool,
}

impl Binder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: SlotSequence::new(),
            readonly: false,
            favorite: false,
        }
    }

    /// Slot sequence behind the read-only guard.
    pub fn slots_mut(&mut self) -> Result<&mut SlotSequence, CollectionError> {
        if self.readonly {
            return Err(CollectionError::Readonly);
        }
        Ok(&mut self.slots)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    #[error("Binder not found: {0}")]
    BinderNotFound(String),
    #[error("Binder is read-only")]
    Readonly,
    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    LastBinder,
}

impl DeleteOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::NotFound => "not_found",
            DeleteOutcome::LastBinder => "last_binder",
        }
    }
}

/// Every binder a user owns plus the one the collection endpoints act on.
///
/// Never empty, `active` always names a present binder and exactly one binder
/// is the favorite. Binder order is insertion order; "first" below means first
/// in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinderCollection {
    binders: IndexMap<String, Binder>,
    active: String,
}

impl Default for BinderCollection {
    fn default() -> Self {
        let mut main = Binder::new(DEFAULT_BINDER_NAME);
        main.favorite = true;
        let mut binders = IndexMap::new();
        binders.insert(DEFAULT_BINDER_ID.to_string(), main);
        Self {
            binders,
            active: DEFAULT_BINDER_ID.to_string(),
        }
    }
}

impl BinderCollection {
    /// Build a collection from possibly inconsistent parts, repairing it.
    pub fn from_parts(binders: IndexMap<String, Binder>, active: Option<String>) -> Self {
        let mut collection = Self {
            binders,
            active: active.unwrap_or_default(),
        };
        collection.repair();
        collection
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn active(&self) -> Option<&Binder> {
        self.binders.get(&self.active)
    }

    pub fn get(&self, id: &str) -> Option<&Binder> {
        self.binders.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Binder)> {
        self.binders.iter()
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }

    /// The named binder, or the active one when no name is given.
    pub fn target(&self, binder_id: Option<&str>) -> Result<(&str, &Binder), CollectionError> {
        let id = binder_id.unwrap_or(self.active.as_str());
        self.binders
            .get_key_value(id)
            .map(|(k, b)| (k.as_str(), b))
            .ok_or_else(|| CollectionError::BinderNotFound(id.to_string()))
    }

    fn target_mut(&mut self, binder_id: Option<&str>) -> Result<&mut Binder, CollectionError> {
        let id = binder_id.unwrap_or(self.active.as_str()).to_string();
        self.binders
            .get_mut(&id)
            .ok_or(CollectionError::BinderNotFound(id))
    }

    /// Re-establish the collection invariants. Returns whether anything changed.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;

        if self.binders.is_empty() {
            self.binders
                .insert(DEFAULT_BINDER_ID.to_string(), Binder::new(DEFAULT_BINDER_NAME));
            changed = true;
        }

        if !self.binders.contains_key(&self.active) {
            if let Some(first) = self.binders.keys().next() {
                self.active = first.clone();
                changed = true;
            }
        }

        let mut seen_favorite = false;
        for binder in self.binders.values_mut() {
            if binder.favorite {
                if seen_favorite {
                    binder.favorite = false;
                    changed = true;
                }
                seen_favorite = true;
            }
        }
        if !seen_favorite {
            if let Some(active) = self.binders.get_mut(&self.active) {
                active.favorite = true;
                changed = true;
            }
        }

        changed
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string()[..8].to_string();
            if !self.binders.contains_key(&id) {
                return id;
            }
        }
    }

    // ── Binder lifecycle ────────────────────────────────────────────────

    /// Create an empty binder and make it active.
    pub fn create(&mut self, name: impl Into<String>) -> String {
        let id = self.fresh_id();
        self.binders.insert(id.clone(), Binder::new(name));
        self.active = id.clone();
        id
    }

    pub fn select(&mut self, binder_id: &str) -> bool {
        if !self.binders.contains_key(binder_id) {
            return false;
        }
        self.active = binder_id.to_string();
        true
    }

    pub fn delete(&mut self, binder_id: &str) -> DeleteOutcome {
        if !self.binders.contains_key(binder_id) {
            return DeleteOutcome::NotFound;
        }
        if self.binders.len() == 1 {
            return DeleteOutcome::LastBinder;
        }
        self.binders.shift_remove(binder_id);
        self.repair();
        DeleteOutcome::Deleted
    }

    pub fn rename(&mut self, binder_id: &str, name: impl Into<String>) -> bool {
        match self.binders.get_mut(binder_id) {
            Some(binder) => {
                binder.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Deep-copy a binder's slots into a new editable, non-favorite binder
    /// that becomes active. A blank name derives one from the source.
    pub fn duplicate(&mut self, binder_id: &str, name: Option<&str>) -> Option<String> {
        let source = self.binders.get(binder_id)?;
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("{} (copy)", source.name),
        };
        let copy = Binder {
            name,
            slots: source.slots.clone(),
            readonly: false,
            favorite: false,
        };

        let id = self.fresh_id();
        self.binders.insert(id.clone(), copy);
        self.active = id.clone();
        Some(id)
    }

    pub fn set_readonly(&mut self, binder_id: &str, readonly: bool) -> bool {
        match self.binders.get_mut(binder_id) {
            Some(binder) => {
                binder.readonly = readonly;
                true
            }
            None => false,
        }
    }

    pub fn set_favorite(&mut self, binder_id: &str) -> bool {
        if !self.binders.contains_key(binder_id) {
            return false;
        }
        for (id, binder) in self.binders.iter_mut() {
            binder.favorite = id == binder_id;
        }
        true
    }

    // ── Slot edits on the target binder ─────────────────────────────────

    /// Whether `card_id` would be a duplicate in the target binder. Fails the
    /// same way [`Self::add_card`] would so callers can bail before resolving.
    pub fn check_addable(
        &self,
        binder_id: Option<&str>,
        card_id: &str,
    ) -> Result<bool, CollectionError> {
        let (_, binder) = self.target(binder_id)?;
        if binder.readonly {
            return Err(CollectionError::Readonly);
        }
        Ok(binder.slots.contains_id(card_id))
    }

    /// `requested_id` is the id the caller asked for, which may differ from the
    /// canonical id the resolver returned in `entry`.
    pub fn add_card(
        &mut self,
        binder_id: Option<&str>,
        requested_id: &str,
        entry: CardEntry,
    ) -> Result<AddOutcome, CollectionError> {
        let slots = self.target_mut(binder_id)?.slots_mut()?;
        if slots.contains_id(requested_id) {
            return Ok(AddOutcome::AlreadyAdded);
        }
        Ok(editor::add_first_empty(slots, entry))
    }

    pub fn remove_card(
        &mut self,
        binder_id: Option<&str>,
        index: i64,
    ) -> Result<RemoveOutcome, CollectionError> {
        let slots = self.target_mut(binder_id)?.slots_mut()?;
        Ok(editor::remove(slots, index))
    }

    pub fn move_card(
        &mut self,
        binder_id: Option<&str>,
        from: i64,
        to: i64,
    ) -> Result<MoveOutcome, CollectionError> {
        let slots = self.target_mut(binder_id)?.slots_mut()?;
        Ok(editor::move_with_push(slots, from, to)?)
    }

    pub fn swap_cards(
        &mut self,
        binder_id: Option<&str>,
        a: i64,
        b: i64,
    ) -> Result<(), CollectionError> {
        let slots = self.target_mut(binder_id)?.slots_mut()?;
        Ok(editor::swap(slots, a, b)?)
    }

    pub fn place_card(
        &mut self,
        binder_id: Option<&str>,
        from: i64,
        to: i64,
    ) -> Result<(), CollectionError> {
        let slots = self.target_mut(binder_id)?.slots_mut()?;
        Ok(editor::place(slots, from, to)?)
    }
}

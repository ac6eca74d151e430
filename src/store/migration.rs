//! Upgrades whatever is on disk into the current collection shape.
//!
//! Known shapes:
//! - current: `{"binders": {id: {name, cards, readonly, favorite}}, "active": id}`
//! - legacy single list: `{"cards": [...]}`, which becomes the default binder
//!
//! Missing binder fields get their defaults. Card objects are read field by
//! field so a null or mistyped field falls back to its default; only slot values
//! that are not objects, or objects without an id, become empty slots.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::StoreError;
use crate::binders::{Binder, BinderCollection, DEFAULT_BINDER_ID, DEFAULT_BINDER_NAME};
use crate::slots::{CardEntry, Slot, SlotSequence};

/// Returns the repaired collection and whether it differs from `doc`, in which
/// case the caller should write it back.
pub fn upgrade(doc: Value) -> Result<(BinderCollection, bool), StoreError> {
    let Value::Object(root) = &doc else {
        return Err(StoreError::Corrupt(
            "top-level value is not an object".to_string(),
        ));
    };

    let collection = if !root.contains_key("binders") && root.contains_key("cards") {
        tracing::info!("Migrating legacy single-list collection");
        let mut main = Binder::new(DEFAULT_BINDER_NAME);
        main.favorite = true;
        main.slots = slots_from_value(root.get("cards"));
        let mut binders = IndexMap::new();
        binders.insert(DEFAULT_BINDER_ID.to_string(), main);
        BinderCollection::from_parts(binders, Some(DEFAULT_BINDER_ID.to_string()))
    } else {
        let binders = match root.get("binders") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(id, value)| (id.clone(), binder_from_value(id, value)))
                .collect(),
            _ => IndexMap::new(),
        };
        let active = root
            .get("active")
            .and_then(Value::as_str)
            .map(str::to_string);
        BinderCollection::from_parts(binders, active)
    };

    let changed = serde_json::to_value(&collection)? != doc;
    Ok((collection, changed))
}

fn binder_from_value(id: &str, value: &Value) -> Binder {
    let empty = Map::new();
    let fields = match value {
        Value::Object(map) => map,
        _ => {
            tracing::warn!(binder_id = %id, "Binder entry is not an object, resetting it");
            &empty
        }
    };

    Binder {
        name: fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Binder")
            .to_string(),
        slots: slots_from_value(fields.get("cards")),
        readonly: fields
            .get("readonly")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        favorite: fields
            .get("favorite")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn slots_from_value(value: Option<&Value>) -> SlotSequence {
    let Some(Value::Array(items)) = value else {
        return SlotSequence::new();
    };
    items
        .iter()
        .map(entry_from_value)
        .collect::<Vec<Slot>>()
        .into()
}

fn entry_from_value(item: &Value) -> Slot {
    let fields = item.as_object()?;
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    let Some(id) = text("id").filter(|id| !id.is_empty()) else {
        tracing::warn!("Dropping slot entry without an id");
        return None;
    };

    Some(CardEntry {
        id,
        name: text("name").unwrap_or_default(),
        image: text("image"),
        images: fields.get("images").filter(|v| !v.is_null()).cloned(),
        set: text("set").unwrap_or_default(),
        set_id: text("setId").unwrap_or_default(),
        number: fields.get("number").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
        lang: text("lang").unwrap_or_default(),
    })
}

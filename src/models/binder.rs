use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::binders::Binder;
use crate::slots::CardEntry;

pub const DEFAULT_PREVIEW_LIMIT: i64 = 9;
pub const MAX_PREVIEW_LIMIT: i64 = 27;

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct BinderSummary {
    pub id: String,
    pub name: String,
    pub readonly: bool,
    pub favorite: bool,
    /// Number of slots, vacant ones included
    pub count: usize,
}

impl BinderSummary {
    pub fn new(id: &str, binder: &Binder) -> Self {
        Self {
            id: id.to_string(),
            name: binder.name.clone(),
            readonly: binder.readonly,
            favorite: binder.favorite,
            count: binder.slots.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveBinderResponse {
    pub active: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewCard {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub images: Option<serde_json::Value>,
    pub set: String,
    pub number: Option<String>,
    pub lang: String,
}

impl From<&CardEntry> for PreviewCard {
    fn from(card: &CardEntry) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            image: card.image.clone(),
            images: card.images.clone(),
            set: card.set.clone(),
            number: card.number.clone(),
            lang: if card.lang.is_empty() {
                crate::resolver::DEFAULT_LANG.to_string()
            } else {
                card.lang.clone()
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BinderSnapshot {
    #[serde(flatten)]
    pub summary: BinderSummary,
    /// First occupied slots in position order
    pub preview: Vec<PreviewCard>,
}

impl BinderSnapshot {
    pub fn new(id: &str, binder: &Binder, limit: Option<i64>) -> Self {
        let limit = limit
            .unwrap_or(DEFAULT_PREVIEW_LIMIT)
            .clamp(0, MAX_PREVIEW_LIMIT) as usize;
        Self {
            summary: BinderSummary::new(id, binder),
            preview: binder
                .slots
                .occupied()
                .take(limit)
                .map(PreviewCard::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedBinderResponse {
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DuplicateBinderResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

// ── Parameters ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
pub struct BinderIdQuery {
    pub binder_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SnapshotQuery {
    pub binder_id: String,
    /// Preview size (default 9, clamped to 0..=27)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CreateBinderQuery {
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RenameBinderQuery {
    pub binder_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DuplicateBinderQuery {
    pub binder_id: String,
    /// Name of the copy; blank derives one from the source
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReadonlyQuery {
    pub binder_id: String,
    pub readonly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{card, Slot, SlotSequence};

    fn binder(n: usize) -> Binder {
        let mut b = Binder::new("Preview");
        b.slots = SlotSequence::from(
            (0..n)
                .map(|i| (i % 2 == 0).then(|| card(&format!("c{i}"))))
                .collect::<Vec<Slot>>(),
        );
        b
    }

    #[test]
    fn snapshot_previews_occupied_slots_only() {
        let snap = BinderSnapshot::new("id", &binder(6), Some(2));
        assert_eq!(snap.summary.count, 6);
        let ids: Vec<&str> = snap.preview.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c2"]);
    }

    #[test]
    fn snapshot_limit_is_clamped() {
        assert_eq!(BinderSnapshot::new("id", &binder(80), Some(500)).preview.len(), 27);
        assert!(BinderSnapshot::new("id", &binder(80), Some(-3)).preview.is_empty());
        assert_eq!(BinderSnapshot::new("id", &binder(80), None).preview.len(), 9);
    }

    #[test]
    fn snapshot_serializes_flat() {
        let json = serde_json::to_value(BinderSnapshot::new("ab", &binder(1), None)).unwrap();
        assert_eq!(json["id"], "ab");
        assert_eq!(json["count"], 1);
        assert_eq!(json["preview"][0]["lang"], "en");
    }
}

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct BinderQuery {
    /// Binder to act on (defaults to the active binder)
    pub binder_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AddCardQuery {
    /// TCGdex card id, e.g. `swsh3-136`
    pub card_id: String,
    /// Catalog language (default `pt`)
    pub lang: Option<String>,
    pub binder_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RemoveCardQuery {
    pub index: i64,
    pub binder_id: Option<String>,
}

/// Used by both move (push) and place (no displacement).
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveCardRequest {
    pub from_index: i64,
    pub to_index: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SwapCardsRequest {
    pub a_index: i64,
    pub b_index: i64,
}

//! Read-through proxies to the card catalog so clients only ever talk to us.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::error::{ApiError, ErrorResponse};
use crate::models::catalog::{LangQuery, SearchQuery};
use crate::resolver::Lang;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cards/search", get(search_cards))
        .route("/cards/{card_id}", get(get_card))
        .route("/sets", get(list_sets))
        .route("/sets/{set_id}", get(get_set))
}

#[utoipa::path(
    get,
    path = "/cards/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Card briefs matching the name"),
        (status = 400, description = "Invalid language", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    ),
    tag = "Catalog"
)]
pub(crate) async fn search_cards(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = Lang::parse(query.lang.as_deref())?;
    Ok(Json(state.resolver.search_cards(&query.name, lang).await?))
}

#[utoipa::path(
    get,
    path = "/cards/{card_id}",
    params(("card_id" = String, Path, description = "TCGdex card id"), LangQuery),
    responses(
        (status = 200, description = "Full card details"),
        (status = 400, description = "Invalid language", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    ),
    tag = "Catalog"
)]
pub(crate) async fn get_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = Lang::parse(query.lang.as_deref())?;
    Ok(Json(state.resolver.card(&card_id, lang).await?))
}

#[utoipa::path(
    get,
    path = "/sets",
    params(LangQuery),
    responses(
        (status = 200, description = "Set briefs"),
        (status = 400, description = "Invalid language", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    ),
    tag = "Catalog"
)]
pub(crate) async fn list_sets(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = Lang::parse(query.lang.as_deref())?;
    Ok(Json(state.resolver.sets(lang).await?))
}

#[utoipa::path(
    get,
    path = "/sets/{set_id}",
    params(("set_id" = String, Path, description = "TCGdex set id"), LangQuery),
    responses(
        (status = 200, description = "Set with its card list"),
        (status = 400, description = "Invalid language", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    ),
    tag = "Catalog"
)]
pub(crate) async fn get_set(
    State(state): State<AppState>,
    Path(set_id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = Lang::parse(query.lang.as_deref())?;
    Ok(Json(state.resolver.set(&set_id, lang).await?))
}

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ErrorResponse};
use crate::models::collection::{
    AddCardQuery, BinderQuery, MoveCardRequest, RemoveCardQuery, SwapCardsRequest,
};
use crate::models::StatusResponse;
use crate::resolver::Lang;
use crate::slots::{CardEntry, Slot};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collection))
        .route("/ids", get(list_ids))
        .route("/add", post(add_card))
        .route("/remove", post(remove_card))
        .route("/move", post(move_card))
        .route("/swap", post(swap_cards))
        .route("/place", post(place_card))
}

#[utoipa::path(
    get,
    path = "/collection",
    params(BinderQuery),
    responses(
        (status = 200, description = "Slots of the binder, null for vacant slots", body = Vec<CardEntry>),
        (status = 404, description = "Unknown binder", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn list_collection(
    State(state): State<AppState>,
    Query(query): Query<BinderQuery>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    let slots = state
        .store
        .read(|c| {
            c.target(query.binder_id.as_deref())
                .map(|(_, binder)| binder.slots.slots().to_vec())
        })
        .await?;
    Ok(Json(slots))
}

#[utoipa::path(
    get,
    path = "/collection/ids",
    params(BinderQuery),
    responses(
        (status = 200, description = "Ids of occupied slots in position order", body = Vec<String>),
        (status = 404, description = "Unknown binder", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn list_ids(
    State(state): State<AppState>,
    Query(query): Query<BinderQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state
        .store
        .read(|c| {
            c.target(query.binder_id.as_deref())
                .map(|(_, binder)| binder.slots.occupied_ids())
        })
        .await?;
    Ok(Json(ids))
}

#[utoipa::path(
    post,
    path = "/collection/add",
    params(AddCardQuery),
    responses(
        (status = 200, description = "`added` or `already_added`", body = StatusResponse),
        (status = 400, description = "Invalid language", body = ErrorResponse),
        (status = 403, description = "Binder is read-only", body = ErrorResponse),
        (status = 502, description = "Card lookup failed", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn add_card(
    State(state): State<AppState>,
    Query(query): Query<AddCardQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let lang = Lang::parse(query.lang.as_deref())?;
    let target = query.binder_id.as_deref();

    // Skip the lookup when the outcome is already known. The write below
    // re-checks since the lock is not held across the network call.
    let duplicate = state
        .store
        .read(|c| c.check_addable(target, &query.card_id))
        .await?;
    if duplicate {
        return Ok(Json(StatusResponse::new("already_added")));
    }

    let entry = state.resolver.resolve(&query.card_id, lang).await?;

    let outcome = state
        .store
        .transaction(|c| {
            c.add_card(target, &query.card_id, entry)
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(card_id = %query.card_id, %lang, status = outcome.status(), "Add card");
    Ok(Json(StatusResponse::new(outcome.status())))
}

#[utoipa::path(
    post,
    path = "/collection/remove",
    params(RemoveCardQuery),
    responses(
        (status = 200, description = "`removed` or `invalid_index`", body = StatusResponse),
        (status = 403, description = "Binder is read-only", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn remove_card(
    State(state): State<AppState>,
    Query(query): Query<RemoveCardQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let outcome = state
        .store
        .transaction(|c| {
            c.remove_card(query.binder_id.as_deref(), query.index)
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(index = query.index, status = outcome.status(), "Remove card");
    Ok(Json(StatusResponse::new(outcome.status())))
}

#[utoipa::path(
    post,
    path = "/collection/move",
    params(BinderQuery),
    request_body = MoveCardRequest,
    responses(
        (status = 200, description = "`ok` or `invalid_from`", body = StatusResponse),
        (status = 400, description = "Target index out of bounds", body = ErrorResponse),
        (status = 403, description = "Binder is read-only", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn move_card(
    State(state): State<AppState>,
    Query(query): Query<BinderQuery>,
    Json(req): Json<MoveCardRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let outcome = state
        .store
        .transaction(|c| {
            c.move_card(query.binder_id.as_deref(), req.from_index, req.to_index)
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(
        from = req.from_index,
        to = req.to_index,
        outcome = ?outcome,
        "Move card"
    );
    Ok(Json(StatusResponse::new(outcome.status())))
}

#[utoipa::path(
    post,
    path = "/collection/swap",
    params(BinderQuery),
    request_body = SwapCardsRequest,
    responses(
        (status = 200, description = "Slots swapped", body = StatusResponse),
        (status = 400, description = "Invalid index", body = ErrorResponse),
        (status = 403, description = "Binder is read-only", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn swap_cards(
    State(state): State<AppState>,
    Query(query): Query<BinderQuery>,
    Json(req): Json<SwapCardsRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .store
        .transaction(|c| {
            c.swap_cards(query.binder_id.as_deref(), req.a_index, req.b_index)
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(a = req.a_index, b = req.b_index, "Swap cards");
    Ok(Json(StatusResponse::new("ok")))
}

#[utoipa::path(
    post,
    path = "/collection/place",
    params(BinderQuery),
    request_body = MoveCardRequest,
    responses(
        (status = 200, description = "Card placed", body = StatusResponse),
        (status = 400, description = "Invalid index, empty source or occupied destination", body = ErrorResponse),
        (status = 403, description = "Binder is read-only", body = ErrorResponse),
    ),
    tag = "Collection"
)]
pub(crate) async fn place_card(
    State(state): State<AppState>,
    Query(query): Query<BinderQuery>,
    Json(req): Json<MoveCardRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .store
        .transaction(|c| {
            c.place_card(query.binder_id.as_deref(), req.from_index, req.to_index)
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(from = req.from_index, to = req.to_index, "Place card");
    Ok(Json(StatusResponse::new("ok")))
}

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ErrorResponse};
use crate::export;
use crate::models::binder::{
    ActiveBinderResponse, BinderIdQuery, BinderSnapshot, BinderSummary, CreateBinderQuery,
    CreatedBinderResponse, DuplicateBinderQuery, DuplicateBinderResponse, ReadonlyQuery,
    RenameBinderQuery, SnapshotQuery,
};
use crate::models::StatusResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_binders))
        .route("/active", get(get_active))
        .route("/snapshot", get(binder_snapshot))
        .route("/create", post(create_binder))
        .route("/select", post(select_binder))
        .route("/delete", post(delete_binder))
        .route("/rename", post(rename_binder))
        .route("/duplicate", post(duplicate_binder))
        .route("/readonly", post(set_readonly))
        .route("/favorite", post(set_favorite))
        .route("/export/json", get(export_json))
        .route("/export/document", get(export_document))
}

fn ok_or_invalid(found: bool) -> Json<StatusResponse> {
    Json(StatusResponse::new(if found { "ok" } else { "invalid" }))
}

#[utoipa::path(
    get,
    path = "/binders",
    responses(
        (status = 200, description = "All binders in creation order", body = Vec<BinderSummary>),
    ),
    tag = "Binders"
)]
pub(crate) async fn list_binders(State(state): State<AppState>) -> Json<Vec<BinderSummary>> {
    let binders: Vec<BinderSummary> = state
        .store
        .read(|c| {
            c.iter()
                .map(|(id, binder)| BinderSummary::new(id, binder))
                .collect()
        })
        .await;
    Json(binders)
}

#[utoipa::path(
    get,
    path = "/binders/active",
    responses(
        (status = 200, description = "Id of the active binder", body = ActiveBinderResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn get_active(State(state): State<AppState>) -> Json<ActiveBinderResponse> {
    let active = state.store.read(|c| c.active_id().to_string()).await;
    Json(ActiveBinderResponse { active })
}

#[utoipa::path(
    get,
    path = "/binders/snapshot",
    params(SnapshotQuery),
    responses(
        (status = 200, description = "Binder metadata and a preview of its first cards", body = BinderSnapshot),
        (status = 404, description = "Unknown binder", body = ErrorResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn binder_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<BinderSnapshot>, ApiError> {
    let snapshot = state
        .store
        .read(|c| {
            c.target(Some(query.binder_id.as_str()))
                .map(|(id, binder)| BinderSnapshot::new(id, binder, query.limit))
        })
        .await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    post,
    path = "/binders/create",
    params(CreateBinderQuery),
    responses(
        (status = 200, description = "New binder, now active", body = CreatedBinderResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn create_binder(
    State(state): State<AppState>,
    Query(query): Query<CreateBinderQuery>,
) -> Result<Json<CreatedBinderResponse>, ApiError> {
    let id = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.create(query.name.as_str())))
        .await?;

    tracing::info!(binder_id = %id, name = %query.name, "Binder created");
    Ok(Json(CreatedBinderResponse { id }))
}

#[utoipa::path(
    post,
    path = "/binders/select",
    params(BinderIdQuery),
    responses(
        (status = 200, description = "`ok` or `invalid`", body = StatusResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn select_binder(
    State(state): State<AppState>,
    Query(query): Query<BinderIdQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let found = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.select(&query.binder_id)))
        .await?;
    Ok(ok_or_invalid(found))
}

#[utoipa::path(
    post,
    path = "/binders/delete",
    params(BinderIdQuery),
    responses(
        (status = 200, description = "`deleted`, `not_found` or `last_binder`", body = StatusResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn delete_binder(
    State(state): State<AppState>,
    Query(query): Query<BinderIdQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let outcome = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.delete(&query.binder_id)))
        .await?;

    tracing::info!(binder_id = %query.binder_id, status = outcome.status(), "Delete binder");
    Ok(Json(StatusResponse::new(outcome.status())))
}

#[utoipa::path(
    post,
    path = "/binders/rename",
    params(RenameBinderQuery),
    responses(
        (status = 200, description = "`ok` or `invalid`", body = StatusResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn rename_binder(
    State(state): State<AppState>,
    Query(query): Query<RenameBinderQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let found = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.rename(&query.binder_id, query.name.as_str())))
        .await?;
    Ok(ok_or_invalid(found))
}

#[utoipa::path(
    post,
    path = "/binders/duplicate",
    params(DuplicateBinderQuery),
    responses(
        (status = 200, description = "`ok` with the copy's id, or `invalid`", body = DuplicateBinderResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn duplicate_binder(
    State(state): State<AppState>,
    Query(query): Query<DuplicateBinderQuery>,
) -> Result<Json<DuplicateBinderResponse>, ApiError> {
    let copy = state
        .store
        .transaction(|c| {
            Ok::<_, ApiError>(c.duplicate(&query.binder_id, query.name.as_deref()))
        })
        .await?;

    let response = match copy {
        Some(id) => {
            tracing::info!(source = %query.binder_id, binder_id = %id, "Binder duplicated");
            DuplicateBinderResponse {
                status: "ok",
                id: Some(id),
            }
        }
        None => DuplicateBinderResponse {
            status: "invalid",
            id: None,
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/binders/readonly",
    params(ReadonlyQuery),
    responses(
        (status = 200, description = "`ok` or `invalid`", body = StatusResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn set_readonly(
    State(state): State<AppState>,
    Query(query): Query<ReadonlyQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let found = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.set_readonly(&query.binder_id, query.readonly)))
        .await?;
    Ok(ok_or_invalid(found))
}

#[utoipa::path(
    post,
    path = "/binders/favorite",
    params(BinderIdQuery),
    responses(
        (status = 200, description = "`ok` or `invalid`", body = StatusResponse),
    ),
    tag = "Binders"
)]
pub(crate) async fn set_favorite(
    State(state): State<AppState>,
    Query(query): Query<BinderIdQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let found = state
        .store
        .transaction(|c| Ok::<_, ApiError>(c.set_favorite(&query.binder_id)))
        .await?;
    Ok(ok_or_invalid(found))
}

#[utoipa::path(
    get,
    path = "/binders/export/json",
    params(BinderIdQuery),
    responses(
        (status = 200, description = "The binder with its id and every slot"),
        (status = 404, description = "Unknown binder", body = ErrorResponse),
    ),
    tag = "Export"
)]
pub(crate) async fn export_json(
    State(state): State<AppState>,
    Query(query): Query<BinderIdQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = state
        .store
        .read(|c| -> Result<_, ApiError> {
            let (id, binder) = c.target(Some(query.binder_id.as_str()))?;
            serde_json::to_value(export::binder_json(id, binder))
                .map_err(|e| ApiError::Internal(e.to_string()))
        })
        .await?;
    Ok(Json(payload))
}

#[utoipa::path(
    get,
    path = "/binders/export/document",
    params(BinderIdQuery),
    responses(
        (status = 200, description = "Paginated slot listing", content_type = "text/plain"),
        (status = 404, description = "Unknown binder", body = ErrorResponse),
    ),
    tag = "Export"
)]
pub(crate) async fn export_document(
    State(state): State<AppState>,
    Query(query): Query<BinderIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .store
        .read(|c| {
            c.target(Some(query.binder_id.as_str()))
                .map(|(_, binder)| export::binder_document(binder, chrono::Utc::now()))
        })
        .await?;

    let file_stem: String = query
        .binder_id
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
        .collect();
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"binder_{}.txt\"", file_stem),
        ),
    ];
    Ok((headers, document))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::binders::CollectionError;
use crate::resolver::ResolveError;
use crate::store::StoreError;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    error: String,
}

/// Request failures. Expected outcomes such as `invalid_index` are not errors
/// and travel as a normal `{status}` body instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("Storage error")]
    Storage(#[from] StoreError),
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CollectionError> for ApiError {
    fn from(e: CollectionError) -> Self {
        match e {
            CollectionError::BinderNotFound(_) => ApiError::NotFound(e.to_string()),
            CollectionError::Readonly => ApiError::Forbidden(e.to_string()),
            CollectionError::Edit(edit) => ApiError::BadRequest(edit.to_string()),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidLang(_) => ApiError::BadRequest(e.to_string()),
            _ => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Storage(e) => tracing::error!(error = %e, "Storage failure"),
            ApiError::Internal(detail) => tracing::error!(%detail, "Internal failure"),
            _ => tracing::debug!(%status, error = %self, "Request rejected"),
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::EditError;

    #[test]
    fn collection_errors_map_to_client_statuses() {
        let cases = [
            (CollectionError::Readonly, StatusCode::FORBIDDEN),
            (
                CollectionError::BinderNotFound("x".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                CollectionError::Edit(EditError::DestinationOccupied),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn resolver_errors_split_by_cause() {
        let bad_lang = ApiError::from(ResolveError::InvalidLang("xx".to_string()));
        assert_eq!(bad_lang.status(), StatusCode::BAD_REQUEST);

        let upstream = ApiError::from(ResolveError::Unavailable("down".to_string()));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.to_string(), "down");
    }
}

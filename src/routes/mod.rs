pub mod binders;
pub mod catalog;
pub mod collection;

use axum::Router;
use crate::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/collection", collection::router())
        .nest("/binders", binders::router())
        .merge(catalog::router())
        .with_state(state)
}

mod binders;
mod config;
mod error;
mod export;
mod models;
mod resolver;
mod routes;
mod slots;
mod store;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::resolver::{CardResolver, TcgdexClient};
use crate::store::BinderStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BinderStore>,
    /// Card metadata source. Only consulted outside the store lock.
    pub resolver: Arc<dyn CardResolver>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::collection::list_collection,
        routes::collection::list_ids,
        routes::collection::add_card,
        routes::collection::remove_card,
        routes::collection::move_card,
        routes::collection::swap_cards,
        routes::collection::place_card,
        routes::binders::list_binders,
        routes::binders::get_active,
        routes::binders::binder_snapshot,
        routes::binders::create_binder,
        routes::binders::select_binder,
        routes::binders::delete_binder,
        routes::binders::rename_binder,
        routes::binders::duplicate_binder,
        routes::binders::set_readonly,
        routes::binders::set_favorite,
        routes::binders::export_json,
        routes::binders::export_document,
        routes::catalog::search_cards,
        routes::catalog::get_card,
        routes::catalog::list_sets,
        routes::catalog::get_set,
    ),
    components(schemas(
        slots::CardEntry,
        error::ErrorResponse,
        models::StatusResponse,
        models::collection::MoveCardRequest,
        models::collection::SwapCardsRequest,
        models::binder::BinderSummary,
        models::binder::ActiveBinderResponse,
        models::binder::PreviewCard,
        models::binder::BinderSnapshot,
        models::binder::CreatedBinderResponse,
        models::binder::DuplicateBinderResponse,
    )),
    tags(
        (name = "Collection", description = "Slot edits on a binder (active binder unless `binder_id` is given)"),
        (name = "Binders", description = "Binder lifecycle and flags"),
        (name = "Export", description = "Binder downloads"),
        (name = "Catalog", description = "TCGdex card and set lookups")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    let store = BinderStore::open(&config.data_file).await?;
    let resolver = TcgdexClient::new(&config.tcgdex_base_url);
    tracing::info!(base_url = %resolver.base_url(), "Card catalog configured");

    let cors = if config.cors_origins.trim().is_empty() || config.cors_origins == "*" {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    };

    let state = AppState {
        store: Arc::new(store),
        resolver: Arc::new(resolver),
    };

    let app = routes::api_router(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    tracing::info!("Swagger UI at http://{}/docs/", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

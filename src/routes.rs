use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const HEALTH: &str = "/health";
pub const CONFIG: &str = "/api/config";
pub const PLACES_AUTOCOMPLETE: &str = "/api/places/autocomplete";
pub const PLACES_DETAILS: &str = "/api/places/details";
pub const PLACES_PHOTO: &str = "/api/places/photo";
pub const DISTANCE: &str = "/api/distance";
pub const DATA_ITEM: &str = "/api/data/{key}";
pub const REVIEW: &str = "/api/review";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full application router
///
/// Anything that does not match an API route is served from the static
/// asset directory, with `/` resolving to `index.html`.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(CONFIG, get(handlers::config_handler))
        .route(PLACES_AUTOCOMPLETE, get(handlers::autocomplete_handler))
        .route(PLACES_DETAILS, get(handlers::details_handler))
        .route(PLACES_PHOTO, get(handlers::photo_handler))
        .route(DISTANCE, post(handlers::distance_handler))
        .route(DATA_ITEM, get(handlers::get_handler).put(handlers::put_handler))
        .route(REVIEW, post(handlers::review_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

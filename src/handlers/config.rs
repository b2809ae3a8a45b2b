use crate::models::ConfigResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /api/config handler - Public settings for the front-end map
///
/// The Maps key is meant for browser use, so it is handed out as-is; an empty
/// string means maps are disabled.
#[utoipa::path(
    get,
    path = routes::CONFIG,
    responses(
        (status = 200, description = "Client configuration", body = ConfigResponse)
    ),
    tag = "config"
)]
pub async fn config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        google_maps_api_key: state.config.google_api_key.clone().unwrap_or_default(),
    })
}

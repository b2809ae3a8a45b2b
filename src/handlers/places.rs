use crate::error::{ApiError, ErrorResponse};
use crate::models::{AutocompleteQuery, DetailsQuery, PhotoQuery};
use crate::places::DEFAULT_PHOTO_WIDTH;
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value as JsonValue;

const PHOTO_CACHE_CONTROL: &str = "public, max-age=86400";
const PHOTO_FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// GET /api/places/autocomplete handler - Relay place predictions
#[utoipa::path(
    get,
    path = routes::PLACES_AUTOCOMPLETE,
    params(
        ("input" = Option<String>, Query, description = "Free-text search query")
    ),
    responses(
        (status = 200, description = "Provider payload, or {\"predictions\": []}", body = serde_json::Value),
        (status = 500, description = "Provider unreachable", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn autocomplete_handler(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<JsonValue>, ApiError> {
    let body = state
        .places
        .autocomplete(&query.input)
        .await
        .map_err(ApiError::UpstreamError)?;
    Ok(Json(body))
}

/// GET /api/places/details handler - Relay details for one place
#[utoipa::path(
    get,
    path = routes::PLACES_DETAILS,
    params(
        ("place_id" = Option<String>, Query, description = "Provider place identifier")
    ),
    responses(
        (status = 200, description = "Provider payload, or {\"result\": {}}", body = serde_json::Value),
        (status = 500, description = "Provider unreachable", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn details_handler(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<JsonValue>, ApiError> {
    let body = state
        .places
        .details(&query.place_id)
        .await
        .map_err(ApiError::UpstreamError)?;
    Ok(Json(body))
}

/// GET /api/places/photo handler - Stream a place photo
///
/// Answers an empty 404 when the reference or the API key is missing.
#[utoipa::path(
    get,
    path = routes::PLACES_PHOTO,
    params(
        ("ref" = Option<String>, Query, description = "Photo reference"),
        ("w" = Option<u32>, Query, description = "Maximum width in pixels, default 400")
    ),
    responses(
        (status = 200, description = "Image bytes with the provider content type"),
        (status = 404, description = "No reference or no API key"),
        (status = 500, description = "Provider unreachable", body = ErrorResponse)
    ),
    tag = "places"
)]
pub async fn photo_handler(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
) -> Result<Response, ApiError> {
    let width = photo_width(query.w.as_deref());

    let Some(upstream) = state
        .places
        .photo(&query.reference, width)
        .await
        .map_err(ApiError::UpstreamError)?
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(PHOTO_FALLBACK_CONTENT_TYPE));

    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL)
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::UpstreamError(e.into()))?;

    Ok(response)
}

fn photo_width(raw: Option<&str>) -> u32 {
    raw.and_then(|w| w.trim().parse::<u32>().ok())
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_PHOTO_WIDTH)
}

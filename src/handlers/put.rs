use crate::error::{ApiError, ErrorResponse};
use crate::models::PutResponse;
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::Path, extract::State, http::StatusCode, Json};
use serde_json::Value as JsonValue;

/// PUT /api/data/{key} handler - Store a JSON document
///
/// Replaces any previous document under the same key. Without a database the
/// body is not read and the answer is `{"ok": false, "reason": "no database"}`.
/// A body that is not JSON is a 500, like any other failed write.
#[utoipa::path(
    put,
    path = routes::DATA_ITEM,
    params(
        ("key" = String, Path, description = "Record key")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Stored, or not stored because no database is configured", body = PutResponse),
        (status = 500, description = "Invalid JSON body or database error", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<PutResponse>), ApiError> {
    let Some(store) = &state.store else {
        tracing::warn!("No database configured, dropping write for {}", key);
        return Ok((
            StatusCode::OK,
            Json(PutResponse {
                ok: false,
                reason: Some("no database".to_string()),
            }),
        ));
    };

    let value: JsonValue = serde_json::from_slice(&body).map_err(ApiError::InvalidBody)?;
    let updated_at = store.upsert(&key, &value).await?;

    tracing::info!("Successfully stored record {} at {}", key, updated_at.to_rfc3339());
    Ok((
        StatusCode::OK,
        Json(PutResponse {
            ok: true,
            reason: None,
        }),
    ))
}

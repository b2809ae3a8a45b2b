use crate::error::{ApiError, ErrorResponse};
use crate::models::{ReviewRequest, ReviewResponse};
use crate::review::REVISED_ITINERARY_MARKER;
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};

/// POST /api/review handler - Ask the language model to review an itinerary
///
/// The API key is checked before the body is parsed, so a keyless server
/// always answers 500 without contacting the provider.
#[utoipa::path(
    post,
    path = routes::REVIEW,
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Markdown review followed by the revised itinerary", body = ReviewResponse),
        (status = 500, description = "Missing API key, invalid body or provider failure", body = ErrorResponse)
    ),
    tag = "review"
)]
pub async fn review_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ApiError> {
    if !state.reviewer.is_configured() {
        tracing::warn!("Review requested but ANTHROPIC_API_KEY is not set");
        return Err(ApiError::MissingCredential("ANTHROPIC_API_KEY"));
    }

    let request: ReviewRequest = serde_json::from_slice(&body).map_err(ApiError::InvalidBody)?;

    let review = state
        .reviewer
        .review(&request.itinerary_json, request.user_prompt.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Review failed: {:#}", e);
            ApiError::UpstreamError(e)
        })?;

    tracing::info!(
        "Generated review ({} bytes, revised itinerary included: {})",
        review.len(),
        review.contains(REVISED_ITINERARY_MARKER)
    );
    Ok(Json(ReviewResponse { review }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bare_config, body_json, spawn_upstream, state_with};
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use serde_json::{json, Value as JsonValue};
    use tower::ServiceExt;

    fn app(api_key: Option<&str>, base_url: Option<String>) -> Router {
        let mut config = bare_config();
        config.anthropic_api_key = api_key.map(String::from);
        if let Some(base) = base_url {
            config.anthropic_base_url = base;
        }
        Router::new()
            .route(routes::REVIEW, post(review_handler))
            .with_state(state_with(config, None))
    }

    async fn post_review(app: Router, body: JsonValue) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/review")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_review_without_key_is_500() {
        let response = post_review(app(None, None), json!({"itinerary_json": {"days": []}})).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("ANTHROPIC_API_KEY"));
    }

    #[tokio::test]
    async fn test_review_without_key_ignores_body_and_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/review")
            .body(Body::from("not json"))
            .unwrap();
        let response = app(None, None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ANTHROPIC_API_KEY is not configured");
    }

    #[tokio::test]
    async fn test_review_malformed_body_is_500_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/review")
            .header("content-type", "application/json")
            .body(Body::from("{\"itinerary_json\": "))
            .unwrap();
        let response = app(Some("key"), None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_review_returns_model_text() {
        async fn messages(Json(body): Json<JsonValue>) -> Json<JsonValue> {
            let user = body["messages"][0]["content"].as_str().unwrap_or_default();
            assert!(user.starts_with("Is the ferry realistic?"));
            assert!(user.contains("Sakurajima"));
            Json(json!({"content": [{"type": "text", "text": "## 総評\nOK"}]}))
        }
        let base = spawn_upstream(Router::new().route("/v1/messages", post(messages))).await;

        let response = post_review(
            app(Some("key"), Some(base)),
            json!({
                "user_prompt": "Is the ferry realistic?",
                "itinerary_json": {"days": [{"stops": ["Sakurajima"]}]}
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"review": "## 総評\nOK"}));
    }

    #[tokio::test]
    async fn test_review_provider_unreachable_is_500() {
        let response = post_review(app(Some("key"), None), json!({"itinerary_json": {}})).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Upstream error"));
    }
}

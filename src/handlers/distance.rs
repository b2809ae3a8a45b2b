use crate::distance::estimate_segments;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{DistanceRequest, DistanceResponse};
use crate::routes;
use axum::{body::Bytes, Json};

/// POST /api/distance handler - Per-leg distance and time estimates
///
/// An empty body or `{}` is treated as no points at all.
#[utoipa::path(
    post,
    path = routes::DISTANCE,
    request_body = DistanceRequest,
    responses(
        (status = 200, description = "One estimate per consecutive pair of points", body = DistanceResponse),
        (status = 400, description = "Body is not a valid points document", body = ErrorResponse)
    ),
    tag = "distance"
)]
pub async fn distance_handler(body: Bytes) -> Result<Json<DistanceResponse>, ApiError> {
    let request: DistanceRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DistanceRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let distances = estimate_segments(&request.points);
    tracing::debug!(
        "Estimated {} legs for {} points",
        distances.len(),
        request.points.len()
    );

    Ok(Json(DistanceResponse { distances }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::body_json;
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use serde_json::json;
    use tower::ServiceExt;

    async fn post_body(body: &str) -> axum::response::Response {
        Router::new()
            .route(routes::DISTANCE, post(distance_handler))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/distance")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_distance_endpoint_two_points() {
        let response =
            post_body(r#"{"points": [[33.5902, 130.4017], [32.7503, 129.8779]]}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"distances": [{"km": 137.0, "minutes": 205, "straight_km": 105.4}]})
        );
    }

    #[tokio::test]
    async fn test_distance_endpoint_single_point() {
        let response = post_body(r#"{"points": [[33.5902, 130.4017]]}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"distances": []}));
    }

    #[tokio::test]
    async fn test_distance_endpoint_empty_body() {
        for body in ["", "{}"] {
            let response = post_body(body).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, json!({"distances": []}));
        }
    }

    #[tokio::test]
    async fn test_distance_endpoint_ignores_extra_point_fields() {
        let response =
            post_body(r#"{"points": [[33.5902, 130.4017, 12.0], [32.7503, 129.8779, 3.5, 0]]}"#)
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"distances": [{"km": 137.0, "minutes": 205, "straight_km": 105.4}]})
        );
    }

    #[tokio::test]
    async fn test_distance_endpoint_point_missing_longitude() {
        let response = post_body(r#"{"points": [[33.5902, 130.4017], [32.7503]]}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("point 1"));
    }

    #[tokio::test]
    async fn test_distance_endpoint_malformed_points() {
        let response = post_body(r#"{"points": [["north", 130.4]]}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("JSON parse error"));
    }
}

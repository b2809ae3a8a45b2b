use utoipa::OpenApi;

use crate::distance::DistanceEstimate;
use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    ConfigResponse, DistanceRequest, DistanceResponse, PutResponse, ReviewRequest, ReviewResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "kyushu-trip-server API",
        version = "1.0.0",
        description = "Backend for the Kyushu itinerary planner: place search proxy, distance estimates, itinerary storage and AI review"
    ),
    paths(
        handlers::health::health_handler,
        handlers::config::config_handler,
        handlers::places::autocomplete_handler,
        handlers::places::details_handler,
        handlers::places::photo_handler,
        handlers::distance::distance_handler,
        handlers::get::get_handler,
        handlers::put::put_handler,
        handlers::review::review_handler
    ),
    components(
        schemas(
            ConfigResponse,
            DistanceRequest,
            DistanceResponse,
            DistanceEstimate,
            PutResponse,
            ReviewRequest,
            ReviewResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "config", description = "Client configuration"),
        (name = "places", description = "Google Places proxy"),
        (name = "distance", description = "Distance and travel time estimates"),
        (name = "data", description = "Key-value document store"),
        (name = "review", description = "AI itinerary review")
    )
)]
pub struct ApiDoc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::distance::{Coordinate, DistanceEstimate};

/// Response type for the client configuration endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConfigResponse {
    #[serde(rename = "googleMapsApiKey")]
    pub google_maps_api_key: String,
}

/// Query parameters for place autocomplete
#[derive(Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub input: String,
}

/// Query parameters for place details
#[derive(Deserialize)]
pub struct DetailsQuery {
    #[serde(default)]
    pub place_id: String,
}

/// Query parameters for photo retrieval
///
/// `w` stays a string so that an unparseable width falls back to the default
/// instead of rejecting the request.
#[derive(Deserialize)]
pub struct PhotoQuery {
    #[serde(default, rename = "ref")]
    pub reference: String,
    pub w: Option<String>,
}

/// Request body for the distance endpoint
#[derive(Default, Deserialize, utoipa::ToSchema)]
pub struct DistanceRequest {
    #[serde(default, deserialize_with = "deserialize_points")]
    #[schema(value_type = Vec<Vec<f64>>)]
    pub points: Vec<Coordinate>,
}

/// Points are `[lat, lon, ...]`; anything after the longitude is ignored
fn deserialize_points<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<Vec<f64>>::deserialize(deserializer)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, point)| match point.as_slice() {
            [lat, lon, ..] => Ok([*lat, *lon]),
            _ => Err(serde::de::Error::custom(format!(
                "point {} needs a latitude and a longitude",
                i
            ))),
        })
        .collect()
}

/// Response type for the distance endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DistanceResponse {
    pub distances: Vec<DistanceEstimate>,
}

/// Response type for PUT operations on the data store
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PutResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request body for the review endpoint
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReviewRequest {
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub itinerary_json: JsonValue,
}

/// Response type for the review endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub review: String,
}

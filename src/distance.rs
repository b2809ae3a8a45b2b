use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Road distance is approximated as great-circle distance times this factor
pub const ROAD_DETOUR_FACTOR: f64 = 1.3;
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// `(latitude, longitude)` in degrees
pub type Coordinate = [f64; 2];

/// Estimate for one leg between consecutive stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DistanceEstimate {
    /// Estimated road distance in km, one decimal
    pub km: f64,
    /// Estimated travel time, never below 1
    pub minutes: u32,
    /// Great-circle distance in km, one decimal
    pub straight_km: f64,
}

/// Great-circle distance in km using the haversine formula
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Estimate a single leg from `from` to `to`
///
/// Both distances are rounded to one decimal, halves away from zero.
pub fn estimate(from: Coordinate, to: Coordinate) -> DistanceEstimate {
    let straight = haversine_km(from[0], from[1], to[0], to[1]);
    let road = straight * ROAD_DETOUR_FACTOR;
    let minutes = (road / AVERAGE_SPEED_KMH * 60.0).round().max(1.0) as u32;

    DistanceEstimate {
        km: round_one_decimal(road),
        minutes,
        straight_km: round_one_decimal(straight),
    }
}

/// Estimate every consecutive leg of `points`, in order
///
/// Fewer than two points yields an empty list.
pub fn estimate_segments(points: &[Coordinate]) -> Vec<DistanceEstimate> {
    points
        .windows(2)
        .map(|pair| estimate(pair[0], pair[1]))
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

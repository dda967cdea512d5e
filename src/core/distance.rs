use geo::HaversineDistance;
use crate::models::Coordinates;

/// Meters in a statute mile
const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two points in miles
///
/// Uses the haversine formula over the mean Earth radius.
#[inline]
pub fn haversine_miles(from: Coordinates, to: Coordinates) -> f64 {
    from.to_point().haversine_distance(&to.to_point()) / METERS_PER_MILE
}

/// Distance in miles when both sides have coordinates
#[inline]
pub fn distance_between(from: Option<Coordinates>, to: Option<Coordinates>) -> Option<f64> {
    match (from, to) {
        (Some(a), Some(b)) => Some(haversine_miles(a, b)),
        _ => None,
    }
}

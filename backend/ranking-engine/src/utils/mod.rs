// Shared numeric helpers for the scoring adapters.

use crate::models::GeoPoint;
use tracing::warn;

const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Clamp `value` into `[min, max]`, logging when upstream data was out of
/// range. Out-of-range input is a data-quality problem, not a scoring error,
/// so ranking stays resilient to slightly-malformed records.
pub fn clamp_to_range(model: &str, feature: &str, value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        warn!(model, feature, "Feature value is NaN, substituting {}", min);
        return min;
    }
    if value < min || value > max {
        let clamped = value.clamp(min, max);
        warn!(
            model,
            feature, value, clamped, "Feature value out of range, clamping"
        );
        return clamped;
    }
    value
}

/// Clamp a pre-normalized feature value into the standard [0, 100] domain.
pub fn clamp_feature(model: &str, feature: &str, value: f64) -> f64 {
    clamp_to_range(model, feature, value, 0.0, 100.0)
}

/// Clamp a rate into [0, 1].
pub fn clamp_rate(model: &str, feature: &str, value: f64) -> f64 {
    clamp_to_range(model, feature, value, 0.0, 1.0)
}

/// Great-circle distance in miles between two coordinates.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    // Rounding can push h marginally past 1 near antipodal points, which
    // would make asin return NaN.
    let h = ((d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(clamp_feature("test", "f", 42.5), 42.5);
        assert_eq!(clamp_rate("test", "r", 0.9), 0.9);
    }

    #[test]
    fn out_of_range_values_clamp_at_boundary() {
        assert_eq!(clamp_feature("test", "f", -3.0), 0.0);
        assert_eq!(clamp_feature("test", "f", 180.0), 100.0);
        assert_eq!(clamp_rate("test", "r", 1.7), 1.0);
    }

    #[test]
    fn nan_clamps_to_minimum() {
        assert_eq!(clamp_feature("test", "f", f64::NAN), 0.0);
    }

    #[test]
    fn haversine_zero_distance() {
        let p = GeoPoint {
            lat: 34.05,
            lon: -118.24,
        };
        assert!(haversine_miles(p, p) < 1e-9);
    }

    #[test]
    fn haversine_antipodal_points_stay_finite() {
        let a = GeoPoint { lat: 0.0, lon: 0.0 };
        let b = GeoPoint {
            lat: 0.0,
            lon: 180.0,
        };
        let miles = haversine_miles(a, b);
        assert!(miles.is_finite());
        // Half the equatorial circumference, roughly 12,436 miles.
        assert!((12_400.0..12_500.0).contains(&miles), "got {}", miles);
    }

    #[test]
    fn haversine_known_distance() {
        // Los Angeles to San Francisco, roughly 347 miles.
        let la = GeoPoint {
            lat: 34.0522,
            lon: -118.2437,
        };
        let sf = GeoPoint {
            lat: 37.7749,
            lon: -122.4194,
        };
        let miles = haversine_miles(la, sf);
        assert!((330.0..360.0).contains(&miles), "got {}", miles);
    }
}

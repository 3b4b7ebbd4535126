//! Spherical earth geodesy.
//!
//! Public inputs and outputs are degrees; trigonometry is done in
//! radians. Every routine uses [`MEAN_EARTH_RADIUS`].

use crate::{constants::MEAN_EARTH_RADIUS, Location};

/// Returns the haversine great-circle distance from `a` to `b`, in
/// meters.
pub fn distance(a: Location, b: Location) -> f64 {
    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lng = (b.lng - a.lng).abs().to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    MEAN_EARTH_RADIUS * angle
}

/// Returns the initial (forward azimuth) bearing from `from` to `to`,
/// in degrees within `[0, 360)`.
pub fn bearing(from: Location, to: Location) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    let y = lat1.cos() * d_lng.sin();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Returns the location reached by travelling `distance_m` meters from
/// `from` along the great circle with initial bearing `bearing_deg`.
pub fn destination(from: Location, distance_m: f64, bearing_deg: f64) -> Location {
    let angle = distance_m / MEAN_EARTH_RADIUS;
    let theta = bearing_deg.to_radians();
    let lat1 = from.lat.to_radians();
    let lng1 = from.lng.to_radians();

    let lat2 = (lat1.sin() * angle.cos() + lat1.cos() * angle.sin() * theta.cos()).asin();
    let lng2 = lng1
        + (theta.sin() * angle.sin() * lat1.cos()).atan2(angle.cos() - lat1.sin() * lat2.sin());

    Location::new(lng2.to_degrees(), lat2.to_degrees())
}

//! Distance helpers reserved for the `school` and `subway` searches.
//! Nothing calls these yet; those searches are coordinate pass-throughs
//! until a rating or transit data source is available.

const EARTH_RADIUS_KM: f64 = 6371.0;
const WALKING_SPEED_KMH: f64 = 5.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Walking time in minutes at 5 km/h.
pub fn walking_minutes(distance_km: f64) -> f64 {
    distance_km / WALKING_SPEED_KMH * 60.0
}

use crate::hospital::Hospital;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance in kilometers (haversine).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m away", km * 1000.0)
    } else {
        format!("{km:.1} km away")
    }
}

fn parse_coord(s: Option<&str>) -> Option<f64> {
    s?.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// A hospital's position, if both coordinate strings parse to real numbers.
pub fn hospital_position(hospital: &Hospital) -> Option<GeoPoint> {
    let lat = parse_coord(hospital.latitude.as_deref())?;
    let lng = parse_coord(hospital.longitude.as_deref())?;
    Some(GeoPoint { lat, lng })
}

/// Human-readable distance from the user to a hospital. None when the user
/// location is unknown or the hospital's coordinates are missing/non-numeric.
pub fn distance_display(user: Option<GeoPoint>, hospital: &Hospital) -> Option<String> {
    let user = user?;
    let pos = hospital_position(hospital)?;
    Some(format_distance(distance_km(user, pos)))
}

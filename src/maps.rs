use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::geo::{GeoPoint, hospital_position};
use crate::hospital::Hospital;

// Same characters encodeURIComponent leaves alone.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Google Maps deep link for a hospital, best strategy first:
/// directions from the user when both positions are known, a pin on the
/// hospital when only its coordinates parse, else a text search on
/// "name, address".
pub fn build_map_url(hospital: &Hospital, user: Option<GeoPoint>) -> String {
    if let Some(pos) = hospital_position(hospital) {
        if let Some(user) = user {
            return format!(
                "https://www.google.com/maps/dir/{},{}/{},{}",
                user.lat, user.lng, pos.lat, pos.lng
            );
        }
        return format!("https://www.google.com/maps?q={},{}", pos.lat, pos.lng);
    }

    let query = format!("{}, {}", hospital.name, hospital.address);
    format!(
        "https://www.google.com/maps/search/{}",
        utf8_percent_encode(&query, QUERY)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(lat: Option<&str>, lng: Option<&str>) -> Hospital {
        Hospital {
            id: 0,
            name: "City Hospital".into(),
            address: "12 Main Road".into(),
            pincode: "800002".into(),
            latitude: lat.map(str::to_string),
            longitude: lng.map(str::to_string),
        }
    }

    #[test]
    fn directions_url_when_user_location_known() {
        let h = hospital(Some("25.6"), Some("85.1"));
        let user = GeoPoint { lat: 28.61, lng: 77.21 };
        assert_eq!(
            build_map_url(&h, Some(user)),
            "https://www.google.com/maps/dir/28.61,77.21/25.6,85.1"
        );
    }

    #[test]
    fn point_url_without_user_location() {
        let h = hospital(Some("25.6"), Some("85.1"));
        assert_eq!(
            build_map_url(&h, None),
            "https://www.google.com/maps?q=25.6,85.1"
        );
    }

    #[test]
    fn search_url_when_coordinates_missing() {
        let h = hospital(None, None);
        assert_eq!(
            build_map_url(&h, None),
            "https://www.google.com/maps/search/City%20Hospital%2C%2012%20Main%20Road"
        );
    }

    #[test]
    fn non_numeric_coordinates_fall_through_to_search() {
        let h = hospital(Some("unknown"), Some("85.1"));
        let user = GeoPoint { lat: 28.61, lng: 77.21 };
        let url = build_map_url(&h, Some(user));
        assert!(url.starts_with("https://www.google.com/maps/search/"), "{url}");
    }

    #[test]
    fn search_query_survives_reserved_characters() {
        let mut h = hospital(None, None);
        h.name = "St. Mary's & Co".into();
        let url = build_map_url(&h, None);
        assert!(url.contains("St.%20Mary's%20%26%20Co"), "{url}");
    }
}

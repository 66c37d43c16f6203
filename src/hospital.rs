use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical hospital record built from whatever shape upstream returns.
/// `id` is the record's position in the current response, not a stable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: usize,
    pub name: String,
    pub address: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

// Upstream field names vary across dataset revisions. Each attribute gets an
// ordered candidate list; the first present, non-empty value wins.
const NAME_FIELDS: &[&str] = &["hospital_name", "name"];
const ADDRESS_FIELDS: &[&str] = &["_address_original_first_line", "_location", "address"];
const PINCODE_FIELDS: &[&str] = &["_pincode", "pincode"];
const COMBINED_COORDS_FIELD: &str = "_location_coordinates";
const LATITUDE_FIELDS: &[&str] = &["latitude", "lat"];
const LONGITUDE_FIELDS: &[&str] = &["longitude", "lng", "lon"];

const FALLBACK_NAME: &str = "Unknown Hospital";
const FALLBACK_ADDRESS: &str = "Address not available";

fn first_text(record: &Value, candidates: &[&str]) -> Option<String> {
    for key in candidates {
        if let Some(s) = record.get(*key).and_then(Value::as_str) {
            let s = s.trim();
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

/// Coordinates come either as one `"<lat>,<lng>"` string or as discrete
/// fields under a few spellings. Values are kept as strings; whether they
/// parse as numbers is the consumer's problem.
fn extract_coordinates(record: &Value) -> (Option<String>, Option<String>) {
    if let Some(combined) = first_text(record, &[COMBINED_COORDS_FIELD]) {
        let mut parts = combined.splitn(2, ',');
        let lat = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let lng = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        return (lat, lng);
    }
    (
        first_text(record, LATITUDE_FIELDS),
        first_text(record, LONGITUDE_FIELDS),
    )
}

/// Build a canonical record from one upstream record. Tolerates any field
/// being absent; `requested_pincode` is echoed back when upstream omits its
/// own pincode.
pub fn normalize_record(record: &Value, requested_pincode: &str, ordinal: usize) -> Hospital {
    let (latitude, longitude) = extract_coordinates(record);

    Hospital {
        id: ordinal,
        name: first_text(record, NAME_FIELDS).unwrap_or_else(|| FALLBACK_NAME.to_string()),
        address: first_text(record, ADDRESS_FIELDS)
            .unwrap_or_else(|| FALLBACK_ADDRESS.to_string()),
        pincode: first_text(record, PINCODE_FIELDS)
            .unwrap_or_else(|| requested_pincode.to_string()),
        latitude,
        longitude,
    }
}

/// Map the `records` array of an upstream response. A missing or non-array
/// `records` field yields an empty list rather than an error.
pub fn normalize_records(response: &Value, requested_pincode: &str) -> Vec<Hospital> {
    let Some(records) = response.get("records").and_then(Value::as_array) else {
        return Vec::new();
    };
    records
        .iter()
        .enumerate()
        .map(|(i, rec)| normalize_record(rec, requested_pincode, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_prefers_hospital_name_over_name() {
        let rec = json!({"hospital_name": "AIIMS Patna", "name": "wrong"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.name, "AIIMS Patna");
    }

    #[test]
    fn missing_every_name_field_falls_back() {
        let rec = json!({"_pincode": "800002"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.name, "Unknown Hospital");
    }

    #[test]
    fn empty_and_whitespace_names_do_not_win() {
        let rec = json!({"hospital_name": "   ", "name": "City Hospital"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.name, "City Hospital");
    }

    #[test]
    fn address_fallback_chain_in_order() {
        let rec = json!({"_location": "Kankarbagh", "address": "wrong"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.address, "Kankarbagh");

        let rec = json!({});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.address, "Address not available");
    }

    #[test]
    fn pincode_echoes_request_when_upstream_omits_it() {
        let rec = json!({"name": "City Hospital"});
        let h = normalize_record(&rec, "110001", 3);
        assert_eq!(h.pincode, "110001");
        assert_eq!(h.id, 3);
    }

    #[test]
    fn combined_coordinates_split_and_trimmed() {
        let rec = json!({"_location_coordinates": "12.34, 56.78"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.latitude.as_deref(), Some("12.34"));
        assert_eq!(h.longitude.as_deref(), Some("56.78"));
    }

    #[test]
    fn combined_coordinates_take_priority_over_discrete() {
        let rec = json!({
            "_location_coordinates": "1.0,2.0",
            "latitude": "9.9",
            "longitude": "9.9"
        });
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.latitude.as_deref(), Some("1.0"));
        assert_eq!(h.longitude.as_deref(), Some("2.0"));
    }

    #[test]
    fn combined_coordinates_without_comma_yield_no_longitude() {
        let rec = json!({"_location_coordinates": "12.34"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.latitude.as_deref(), Some("12.34"));
        assert_eq!(h.longitude, None);
    }

    #[test]
    fn discrete_coordinate_spellings() {
        let rec = json!({"lat": "25.6", "lon": "85.1"});
        let h = normalize_record(&rec, "800002", 0);
        assert_eq!(h.latitude.as_deref(), Some("25.6"));
        assert_eq!(h.longitude.as_deref(), Some("85.1"));
    }

    #[test]
    fn normalize_records_tolerates_missing_records_array() {
        assert!(normalize_records(&json!({}), "800002").is_empty());
        assert!(normalize_records(&json!({"records": "oops"}), "800002").is_empty());
    }

    #[test]
    fn normalize_records_assigns_ordinals() {
        let resp = json!({"records": [
            {"hospital_name": "A"},
            {"hospital_name": "B"},
        ]});
        let hs = normalize_records(&resp, "800002");
        assert_eq!(hs.len(), 2);
        assert_eq!(hs[0].id, 0);
        assert_eq!(hs[1].id, 1);
        assert_eq!(hs[1].name, "B");
    }
}

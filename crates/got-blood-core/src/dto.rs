//! API Data Transfer Objects
//!
//! Shapes exchanged with the hospital/donor backend. Field names follow the
//! wire format exactly, which mixes camelCase and snake_case.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ========================
// Inventory and Location
// ========================

/// One row of `/hospital/data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalInventoryRecord {
    pub hospital: String,
    pub city: String,
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    pub delta_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// (0,0) is the backend's sentinel for "location unknown"
    pub fn is_unknown(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodVolume {
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "totalBloodCC")]
    pub total_blood_cc: f64,
}

/// One entry of `/hospital/data/loc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalLocationEntry {
    pub hospital: String,
    pub city: String,
    pub coordinates: Coordinates,
    #[serde(rename = "bloodData", default)]
    pub blood_data: Vec<BloodVolume>,
}

impl HospitalLocationEntry {
    /// Summed volume across all blood types
    pub fn shortage_severity(&self) -> f64 {
        self.blood_data.iter().map(|b| b.total_blood_cc).sum()
    }

    /// Blood type with the largest stored volume; the first wins on ties
    pub fn dominant_blood_type(&self) -> Option<&str> {
        let mut best: Option<&BloodVolume> = None;
        for volume in &self.blood_data {
            if best.map_or(true, |b| volume.total_blood_cc > b.total_blood_cc) {
                best = Some(volume);
            }
        }
        best.map(|b| b.blood_type.as_str())
    }
}

/// Candidate pairing returned by the matching endpoints. Whether it is a
/// surplus or a shortage candidate depends only on which endpoint answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub hospital: String,
    #[serde(default)]
    pub city: Option<String>,
    pub coordinates: Coordinates,
    #[serde(rename = "totalBloodCC", default)]
    pub total_blood_cc: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

// ========================
// Dashboard
// ========================

/// Blood type counts in the order the server listed them
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BloodInventory(pub Vec<(String, i64)>);

impl BloodInventory {
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(bt, count)| (bt.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for BloodInventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct InventoryVisitor;

        impl<'de> Visitor<'de> for InventoryVisitor {
            type Value = BloodInventory;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of blood type to count")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(8));
                while let Some((blood_type, count)) = access.next_entry::<String, i64>()? {
                    entries.push((blood_type, count));
                }
                Ok(BloodInventory(entries))
            }
        }

        deserializer.deserialize_map(InventoryVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodTypeDonorStat {
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "donorCount")]
    pub donor_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorStat {
    pub city: String,
    #[serde(rename = "totalDonors")]
    pub total_donors: i64,
    #[serde(rename = "bloodTypeStats", default)]
    pub blood_type_stats: Vec<BloodTypeDonorStat>,
}

/// `/api/hospital_inventory/{lid}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalInventorySnapshot {
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    #[serde(rename = "hospitalLocation", default)]
    pub hospital_location: String,
    #[serde(default)]
    pub inventory: BloodInventory,
    #[serde(rename = "donorStats", default)]
    pub donor_stats: Vec<DonorStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcessHospital {
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    #[serde(rename = "hospitalLocation", default)]
    pub hospital_location: String,
    #[serde(rename = "excessBloodCount")]
    pub excess_blood_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorPool {
    #[serde(rename = "areaName")]
    pub area_name: String,
    #[serde(rename = "donorCount")]
    pub donor_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeededHospital {
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    #[serde(rename = "hospitalLocation", default)]
    pub hospital_location: String,
    #[serde(rename = "shortageBloodCount")]
    pub shortage_blood_count: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub recommendations: Vec<String>,
}

// ========================
// Responses to POSTs
// ========================

/// `{message}` on success, `{error}` on failure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// Resolve to the text to show, given whether the HTTP status was 2xx
    pub fn into_result(self, ok: bool, fallback_error: &str) -> Result<String, String> {
        match (ok, self.error) {
            (true, None) => Ok(self.message.unwrap_or_default()),
            (_, Some(error)) => Err(error),
            (false, None) => Err(fallback_error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

// ========================
// Geocoding
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeocodeGeometry {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

/// OpenCage forward geocoding response, reduced to what sign-up needs
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    pub fn first_coordinates(&self) -> Option<Coordinates> {
        self.results
            .first()
            .map(|r| Coordinates::new(r.geometry.lat, r.geometry.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_keeps_server_order() {
        let json = r#"{"hospitalName":"General","hospitalLocation":"Austin, TX",
            "inventory":{"O-":4,"A+":1,"B+":15}}"#;
        let snapshot: HospitalInventorySnapshot = serde_json::from_str(json).unwrap();
        let order: Vec<&str> = snapshot.inventory.iter().map(|(bt, _)| bt).collect();
        assert_eq!(order, vec!["O-", "A+", "B+"]);
        assert!(snapshot.donor_stats.is_empty());
    }

    #[test]
    fn test_location_entry_severity_and_dominant_type() {
        let json = r#"{"hospital":"Mercy","city":"Boston","coordinates":{"lat":42.3,"lon":-71.0},
            "bloodData":[{"bloodType":"A+","totalBloodCC":40},{"bloodType":"O+","totalBloodCC":60},
            {"bloodType":"B+","totalBloodCC":60}]}"#;
        let entry: HospitalLocationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.shortage_severity(), 160.0);
        assert_eq!(entry.dominant_blood_type(), Some("O+"));
    }

    #[test]
    fn test_location_entry_without_blood_data() {
        let json = r#"{"hospital":"Mercy","city":"Boston","coordinates":{"lat":0,"lon":0}}"#;
        let entry: HospitalLocationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.shortage_severity(), 0.0);
        assert_eq!(entry.dominant_blood_type(), None);
        assert!(entry.coordinates.is_unknown());
    }

    #[test]
    fn test_match_record_accepts_either_metric() {
        let by_volume: MatchRecord = serde_json::from_str(
            r#"{"hospital":"A","coordinates":{"lat":1,"lon":2},"totalBloodCC":300}"#,
        )
        .unwrap();
        let by_distance: MatchRecord = serde_json::from_str(
            r#"{"hospital":"B","city":"X","coordinates":{"lat":1,"lon":2},"distance_km":12.5}"#,
        )
        .unwrap();
        assert_eq!(by_volume.total_blood_cc, Some(300.0));
        assert_eq!(by_volume.distance_km, None);
        assert_eq!(by_distance.distance_km, Some(12.5));
        assert_eq!(by_distance.city.as_deref(), Some("X"));
    }

    #[test]
    fn test_api_message_resolution() {
        let ok = ApiMessage { message: Some("Donor added successfully.".into()), error: None };
        assert_eq!(ok.into_result(true, "fallback"), Ok("Donor added successfully.".to_string()));

        let err = ApiMessage { message: None, error: Some("Missing donor_id.".into()) };
        assert_eq!(err.into_result(false, "fallback"), Err("Missing donor_id.".to_string()));

        let bare = ApiMessage::default();
        assert_eq!(bare.into_result(false, "fallback"), Err("fallback".to_string()));
    }

    #[test]
    fn test_geocode_first_result() {
        let json = r#"{"results":[{"geometry":{"lat":40.7,"lng":-74.0}},{"geometry":{"lat":1,"lng":1}}]}"#;
        let response: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_coordinates(), Some(Coordinates::new(40.7, -74.0)));

        let empty: GeocodeResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert_eq!(empty.first_coordinates(), None);
    }
}

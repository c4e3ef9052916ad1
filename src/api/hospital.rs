use got_blood_core::dto::{HospitalInventoryRecord, HospitalLocationEntry, MatchRecord};
use got_blood_core::FetchError;

use super::Api;

// ========================
// Hospital Data
// ========================

impl Api {
    pub async fn list_inventory_records(&self) -> Result<Vec<HospitalInventoryRecord>, FetchError> {
        self.get_sequence(&self.endpoints.hospital_data(), "hospital data").await
    }

    pub async fn list_hospital_locations(&self) -> Result<Vec<HospitalLocationEntry>, FetchError> {
        self.get_sequence(&self.endpoints.hospital_data_loc(), "hospital locations").await
    }

    /// Shortage candidates for the hospital's dominant blood type. A hospital
    /// without blood data is not queried.
    pub async fn list_matches(
        &self,
        entry: &HospitalLocationEntry,
        max_results: u32,
    ) -> Result<Vec<MatchRecord>, FetchError> {
        let Some(blood_type) = entry.dominant_blood_type() else {
            return Ok(Vec::new());
        };
        let url = self
            .endpoints
            .matching_shortage(&entry.hospital, &entry.city, blood_type, max_results);
        self.get_sequence(&url, "matches").await
    }
}

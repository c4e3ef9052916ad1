use got_blood_core::dashboard::{resolve_mode, DashboardData, DashboardMode, Panel, Thresholds};
use got_blood_core::dto::{DonorPool, ExcessHospital, HospitalInventorySnapshot, NeededHospital, Recommendations};
use got_blood_core::FetchError;

use super::Api;

// ========================
// Hospital Dashboard
// ========================

impl Api {
    pub async fn hospital_inventory(&self, lid: &str) -> Result<HospitalInventorySnapshot, FetchError> {
        self.get_object(&self.endpoints.hospital_inventory(lid), "hospital inventory").await
    }

    pub async fn nearby_excess_hospitals(&self, lid: &str, blood_type: &str) -> Result<Vec<ExcessHospital>, FetchError> {
        let url = self.endpoints.nearby_excess_hospitals(lid, blood_type);
        self.get_sequence(&url, "nearby excess hospitals").await
    }

    pub async fn nearby_donor_pools(&self, lid: &str, blood_type: &str) -> Result<Vec<DonorPool>, FetchError> {
        let url = self.endpoints.nearby_donor_pools(lid, blood_type);
        self.get_sequence(&url, "nearby donor pools").await
    }

    pub async fn nearest_needed_hospitals(&self, lid: &str, blood_type: &str) -> Result<Vec<NeededHospital>, FetchError> {
        let url = self.endpoints.nearest_needed_hospitals(lid, blood_type);
        self.get_sequence(&url, "nearest needed hospitals").await
    }

    pub async fn blood_recommendations(&self, lid: &str) -> Result<Recommendations, FetchError> {
        self.get_object(&self.endpoints.blood_recommendations(lid), "recommendations").await
    }

    /// Inventory first, then the panels its mode calls for, then
    /// recommendations. The first failure aborts the whole load.
    pub async fn load_dashboard(
        &self,
        lid: &str,
        thresholds: Thresholds,
    ) -> Result<(DashboardMode, DashboardData), FetchError> {
        let snapshot = self.hospital_inventory(lid).await?;
        let mode = resolve_mode(&snapshot.inventory, thresholds);
        log::info!("[Dashboard] {} resolved to {:?}", snapshot.hospital_name, mode);

        let mut data = DashboardData::default();
        if let Some(blood_type) = mode.blood_type() {
            for panel in mode.panels() {
                match panel {
                    Panel::ExcessHospitals => {
                        data.excess_hospitals = Some(self.nearby_excess_hospitals(lid, blood_type).await?);
                    }
                    Panel::DonorPools => {
                        data.donor_pools = Some(self.nearby_donor_pools(lid, blood_type).await?);
                    }
                    Panel::NeededHospitals => {
                        data.needed_hospitals = Some(self.nearest_needed_hospitals(lid, blood_type).await?);
                    }
                }
            }
        }
        data.recommendations = Some(self.blood_recommendations(lid).await?);
        data.snapshot = Some(snapshot);
        data.retain_mode_panels(&mode);
        Ok((mode, data))
    }
}

use got_blood_core::dto::{Coordinates, GeocodeResponse, LoginResponse};
use got_blood_core::forms::{
    BloodUpdatePayload, DonorSignupPayload, HospitalCreatePayload, HospitalSignup, LoginRequest,
};
use got_blood_core::FetchError;

use super::Api;

// ========================
// Sign-up, Sign-in, Inventory Updates
// ========================

impl Api {
    pub async fn donor_signup(&self, payload: &DonorSignupPayload) -> Result<String, String> {
        self.submit(
            &self.endpoints.signup(),
            payload,
            "There was an issue with your signup. Please try again.",
        )
        .await
    }

    /// Postal code to coordinates through OpenCage. `Ok(None)` means the
    /// lookup worked but found nothing.
    pub async fn geocode_zip(&self, zip_code: &str) -> Result<Option<Coordinates>, String> {
        let Some(key) = self.geocode_key.as_deref() else {
            return Err("Geocoding is not configured.".to_string());
        };
        let response: GeocodeResponse = self
            .get_object(&self.endpoints.geocode(zip_code, key), "geocoding")
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.first_coordinates())
    }

    /// Geocode, then create the hospital account
    pub async fn hospital_signup(&self, signup: HospitalSignup) -> Result<String, String> {
        let coordinates = self
            .geocode_zip(&signup.zip_code)
            .await?
            .ok_or_else(|| "Invalid zip code.".to_string())?;
        let payload: HospitalCreatePayload = signup.with_coordinates(coordinates);
        self.submit(&self.endpoints.hospital_create(), &payload, "Signup failed. Try again.")
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, String> {
        let raw = self
            .post(&self.endpoints.login(), request, "login")
            .await
            .map_err(|e| match e {
                FetchError::Timeout { .. } => e.to_string(),
                _ => "Login failed. Please try again.".to_string(),
            })?;
        if !raw.is_success() {
            return Err(raw
                .message()
                .error
                .unwrap_or_else(|| "Login failed. Please try again.".to_string()));
        }
        serde_json::from_str(&raw.body).map_err(|e| {
            log::error!("[API] Unreadable login response: {}", e);
            "Login failed. Please try again.".to_string()
        })
    }

    pub async fn update_blood(&self, payload: &BloodUpdatePayload) -> Result<String, String> {
        self.submit(&self.endpoints.update_blood(), payload, "Error updating blood.")
            .await
    }
}

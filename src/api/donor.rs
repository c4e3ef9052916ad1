use got_blood_core::forms::DonorPayload;

use super::Api;

impl Api {
    pub async fn add_donor(&self, payload: &DonorPayload) -> Result<String, String> {
        self.submit(
            &self.endpoints.donor_add(),
            payload,
            "Failed to add donor. Please try again.",
        )
        .await
        .map(|message| {
            if message.is_empty() {
                "Donor added successfully!".to_string()
            } else {
                message
            }
        })
    }
}

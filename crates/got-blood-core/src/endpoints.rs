//! API Endpoints
//!
//! URL builders for every backend route the client calls. Path segments and
//! query values are percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::ClientConfig;

/// Everything except RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `k1=v1&k2=v2` with every value encoded
pub fn query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
    geocode_url: String,
}

impl Endpoints {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base: config.api_base.trim_end_matches('/').to_string(),
            geocode_url: config.geocode_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    // ========================
    // Hospital data
    // ========================

    pub fn hospital_data(&self) -> String {
        self.url("/hospital/data")
    }

    pub fn hospital_data_loc(&self) -> String {
        self.url("/hospital/data/loc")
    }

    /// Hospitals short on `blood_type` that could take stock from a surplus hospital
    pub fn matching_shortage(&self, surplus_hospital: &str, surplus_city: &str, blood_type: &str, max_results: u32) -> String {
        let max = max_results.to_string();
        format!(
            "{}?{}",
            self.url("/hospital/matching/shortage"),
            query_string(&[
                ("surplus_hospital", surplus_hospital),
                ("surplus_city", surplus_city),
                ("blood_type", blood_type),
                ("max_results", &max),
            ])
        )
    }

    // ========================
    // Dashboard
    // ========================

    pub fn hospital_inventory(&self, lid: &str) -> String {
        self.url(&format!("/api/hospital_inventory/{}", encode(lid)))
    }

    pub fn nearby_excess_hospitals(&self, lid: &str, blood_type: &str) -> String {
        self.by_blood_type("/api/nearby_excess_hospitals", lid, blood_type)
    }

    pub fn nearby_donor_pools(&self, lid: &str, blood_type: &str) -> String {
        self.by_blood_type("/api/nearby_donor_pools", lid, blood_type)
    }

    pub fn nearest_needed_hospitals(&self, lid: &str, blood_type: &str) -> String {
        self.by_blood_type("/api/nearest_needed_hospitals", lid, blood_type)
    }

    pub fn blood_recommendations(&self, lid: &str) -> String {
        self.url(&format!("/api/blood_recommendations/{}", encode(lid)))
    }

    fn by_blood_type(&self, route: &str, lid: &str, blood_type: &str) -> String {
        format!(
            "{}?{}",
            self.url(&format!("{}/{}", route, encode(lid))),
            query_string(&[("bloodType", blood_type)])
        )
    }

    // ========================
    // Forms
    // ========================

    pub fn signup(&self) -> String {
        self.url("/api/signup")
    }

    pub fn login(&self) -> String {
        self.url("/api/login")
    }

    pub fn update_blood(&self) -> String {
        self.url("/api/updateBlood")
    }

    pub fn hospital_create(&self) -> String {
        self.url("/hospital/create")
    }

    pub fn donor_add(&self) -> String {
        self.url("/donor/add")
    }

    /// OpenCage lookup of a postal code
    pub fn geocode(&self, zip_code: &str, key: &str) -> String {
        format!("{}?{}", self.geocode_url, query_string(&[("q", zip_code.trim()), ("key", key)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(&ClientConfig::default())
    }

    #[test]
    fn test_plain_routes() {
        let e = endpoints();
        assert_eq!(e.hospital_data(), "http://localhost:5001/hospital/data");
        assert_eq!(e.hospital_data_loc(), "http://localhost:5001/hospital/data/loc");
        assert_eq!(e.donor_add(), "http://localhost:5001/donor/add");
        assert_eq!(e.update_blood(), "http://localhost:5001/api/updateBlood");
    }

    #[test]
    fn test_matching_query_is_encoded() {
        let url = endpoints().matching_shortage("St. Mary's & Co", "New York, NY", "AB+", 5);
        assert_eq!(
            url,
            "http://localhost:5001/hospital/matching/shortage?surplus_hospital=St.%20Mary%27s%20%26%20Co\
             &surplus_city=New%20York%2C%20NY&blood_type=AB%2B&max_results=5"
        );
    }

    #[test]
    fn test_dashboard_routes_encode_segments() {
        let e = endpoints();
        assert_eq!(e.hospital_inventory("L0001"), "http://localhost:5001/api/hospital_inventory/L0001");
        assert_eq!(
            e.nearby_excess_hospitals("L 1/2", "O-"),
            "http://localhost:5001/api/nearby_excess_hospitals/L%201%2F2?bloodType=O-"
        );
        assert_eq!(
            e.nearest_needed_hospitals("L0001", "A+"),
            "http://localhost:5001/api/nearest_needed_hospitals/L0001?bloodType=A%2B"
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let config = ClientConfig { api_base: "https://api.example.org/".into(), ..ClientConfig::default() };
        assert_eq!(Endpoints::new(&config).login(), "https://api.example.org/api/login");
    }

    #[test]
    fn test_geocode_url() {
        let url = endpoints().geocode(" 10001 ", "k3y");
        assert_eq!(url, "https://api.opencagedata.com/geocode/v1/json?q=10001&key=k3y");
    }
}

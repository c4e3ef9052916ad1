//! Client Configuration
//!
//! Defaults match the development backend. Overrides are baked in at build
//! time from `GOT_BLOOD_*` variables, since a static wasm bundle has no
//! process environment to read at runtime.

use crate::dashboard::Thresholds;

/// Errors raised while applying configuration overrides
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
    #[error("low stock threshold ({low_stock}) must be below the surplus threshold ({surplus})")]
    ThresholdOrder { low_stock: i64, surplus: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the hospital/donor API, without trailing slash
    pub api_base: String,
    /// OpenCage forward geocoding endpoint
    pub geocode_url: String,
    /// OpenCage API key; hospital sign-up cannot geocode without one
    pub geocode_key: Option<String>,
    pub fetch_timeout_ms: u32,
    pub thresholds: Thresholds,
    /// `max_results` sent to the matching endpoint
    pub max_match_results: u32,
    /// Delay before redirecting after a successful sign-up or sign-in
    pub redirect_delay_ms: u32,
    /// Padding applied when the map frames its markers
    pub map_padding_px: u32,
    pub tile_url: String,
    /// Hospital shown by the dashboard when the URL names none
    pub default_hospital_lid: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5001".to_string(),
            geocode_url: "https://api.opencagedata.com/geocode/v1/json".to_string(),
            geocode_key: None,
            fetch_timeout_ms: 10_000,
            thresholds: Thresholds::default(),
            max_match_results: 5,
            redirect_delay_ms: 2_000,
            map_padding_px: 50,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            default_hospital_lid: "L0001".to_string(),
        }
    }
}

impl ClientConfig {
    /// Build from the variables captured at compile time
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "GOT_BLOOD_API_BASE" => option_env!("GOT_BLOOD_API_BASE"),
                "GOT_BLOOD_GEOCODE_KEY" => option_env!("GOT_BLOOD_GEOCODE_KEY"),
                "GOT_BLOOD_FETCH_TIMEOUT_MS" => option_env!("GOT_BLOOD_FETCH_TIMEOUT_MS"),
                "GOT_BLOOD_LOW_STOCK_THRESHOLD" => option_env!("GOT_BLOOD_LOW_STOCK_THRESHOLD"),
                "GOT_BLOOD_SURPLUS_THRESHOLD" => option_env!("GOT_BLOOD_SURPLUS_THRESHOLD"),
                "GOT_BLOOD_MAX_MATCH_RESULTS" => option_env!("GOT_BLOOD_MAX_MATCH_RESULTS"),
                "GOT_BLOOD_DEFAULT_HOSPITAL" => option_env!("GOT_BLOOD_DEFAULT_HOSPITAL"),
                "GOT_BLOOD_REDIRECT_DELAY_MS" => option_env!("GOT_BLOOD_REDIRECT_DELAY_MS"),
                "GOT_BLOOD_MAP_PADDING_PX" => option_env!("GOT_BLOOD_MAP_PADDING_PX"),
                "GOT_BLOOD_TILE_URL" => option_env!("GOT_BLOOD_TILE_URL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("GOT_BLOOD_API_BASE") {
            let base = base.trim().trim_end_matches('/');
            if base.is_empty() {
                return Err(ConfigError::Empty { key: "GOT_BLOOD_API_BASE" });
            }
            config.api_base = base.to_string();
        }
        if let Some(key) = lookup("GOT_BLOOD_GEOCODE_KEY") {
            let key = key.trim();
            config.geocode_key = (!key.is_empty()).then(|| key.to_string());
        }
        if let Some(lid) = lookup("GOT_BLOOD_DEFAULT_HOSPITAL") {
            let lid = lid.trim();
            if lid.is_empty() {
                return Err(ConfigError::Empty { key: "GOT_BLOOD_DEFAULT_HOSPITAL" });
            }
            config.default_hospital_lid = lid.to_string();
        }
        if let Some(url) = lookup("GOT_BLOOD_TILE_URL") {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { key: "GOT_BLOOD_TILE_URL" });
            }
            config.tile_url = url.to_string();
        }

        if let Some(ms) = parse_positive(&lookup, "GOT_BLOOD_FETCH_TIMEOUT_MS")? {
            config.fetch_timeout_ms = ms as u32;
        }
        if let Some(low) = parse_number(&lookup, "GOT_BLOOD_LOW_STOCK_THRESHOLD")? {
            config.thresholds.low_stock = low;
        }
        if let Some(surplus) = parse_number(&lookup, "GOT_BLOOD_SURPLUS_THRESHOLD")? {
            config.thresholds.surplus = surplus;
        }
        if let Some(max) = parse_positive(&lookup, "GOT_BLOOD_MAX_MATCH_RESULTS")? {
            config.max_match_results = max as u32;
        }
        if let Some(ms) = parse_number(&lookup, "GOT_BLOOD_REDIRECT_DELAY_MS")? {
            config.redirect_delay_ms = ms as u32;
        }
        if let Some(px) = parse_number(&lookup, "GOT_BLOOD_MAP_PADDING_PX")? {
            config.map_padding_px = px as u32;
        }

        let Thresholds { low_stock, surplus } = config.thresholds;
        if low_stock >= surplus {
            return Err(ConfigError::ThresholdOrder { low_stock, surplus });
        }

        Ok(config)
    }
}

fn parse_number<F>(lookup: &F, key: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) => Ok(Some(n as i64)),
        Err(_) => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn parse_positive<F>(lookup: &F, key: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_number(lookup, key)? {
        Some(0) => Err(ConfigError::Zero { key }),
        other => Ok(other),
    }
}

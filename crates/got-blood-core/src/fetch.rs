//! Fetch-Transform-Render Contract
//!
//! Turns a raw HTTP outcome into the loading/error/data triple the pages
//! render. Data is never left undefined: every failure resets it to empty.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dto::ApiMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Expected top-level container of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
}

impl Shape {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Shape::Array => value.is_array(),
            Shape::Object => value.is_object(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Shape::Array => "array",
            Shape::Object => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to load {what}. Please try again.")]
    Network { what: String, detail: String },
    #[error("Request timed out after {after_ms} ms.")]
    Timeout { after_ms: u32 },
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("Could not read the server response: {0}")]
    Decode(String),
    #[error("API response was not in the expected {} format.", .expected.label())]
    Shape { expected: Shape },
}

/// Observable state of one remote collection or document
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: T,
}

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self { loading: false, error: None, data: T::default() }
    }
}

impl<T: Default> Loadable<T> {
    /// State of a page that has just issued its fetch
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a finished fetch. Errors reset data to empty.
    pub fn settle(&mut self, result: Result<T, FetchError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.error = None;
                self.data = data;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.data = T::default();
            }
        }
    }

    /// True once the data may be read with the shape the view expects
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

impl<T: Default> From<Result<T, FetchError>> for Loadable<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        let mut state = Self::default();
        state.settle(result);
        state
    }
}

/// Check the status code and parse the body as JSON of the expected shape
pub fn interpret_response(status: u16, body: &str, expected: Shape) -> Result<Value, FetchError> {
    if !(200..300).contains(&status) {
        log::error!("[fetch] HTTP status not OK: {}", status);
        return Err(FetchError::Status { status });
    }
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !expected.matches(&value) {
        log::warn!("[fetch] response is not an {}: {}", expected.label(), value);
        return Err(FetchError::Shape { expected });
    }
    Ok(value)
}

/// Decode each element of an array independently, dropping the ones that do
/// not fit `T` (e.g. positional rows from older backends)
pub fn decode_sequence<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, FetchError> {
    let Value::Array(items) = value else {
        return Err(FetchError::Shape { expected: Shape::Array });
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| {
            // serde would otherwise read an array as the struct's fields in order
            if !item.is_object() {
                log::warn!("[fetch] dropping positional record: {}", item);
                return None;
            }
            decode_record(item)
        })
        .collect();
    if decoded.len() < total {
        log::warn!("[fetch] kept {} of {} records", decoded.len(), total);
    }
    Ok(decoded)
}

fn decode_record<T: DeserializeOwned>(item: Value) -> Option<T> {
    match serde_json::from_value(item) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("[fetch] dropping malformed record: {}", e);
            None
        }
    }
}

pub fn decode_object<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    if !value.is_object() {
        return Err(FetchError::Shape { expected: Shape::Object });
    }
    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Status + body → typed sequence
pub fn parse_sequence<T: DeserializeOwned>(status: u16, body: &str) -> Result<Vec<T>, FetchError> {
    interpret_response(status, body, Shape::Array).and_then(decode_sequence)
}

/// Status + body → typed document
pub fn parse_object<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    interpret_response(status, body, Shape::Object).and_then(decode_object)
}

// ========================
// Form Submissions
// ========================

/// Status and body of a finished request, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `{message}` / `{error}` body of a POST; unreadable bodies count as empty
    pub fn message(&self) -> ApiMessage {
        serde_json::from_str(&self.body).unwrap_or_default()
    }
}

/// Text to show after a form POST. Timeouts keep their own wording; any
/// other transport failure shows `failure`.
pub fn submit_outcome(response: Result<RawResponse, FetchError>, failure: &str) -> Result<String, String> {
    match response {
        Ok(raw) => raw.message().into_result(raw.is_success(), failure),
        Err(e @ FetchError::Timeout { .. }) => Err(e.to_string()),
        Err(e) => {
            log::warn!("[fetch] form request failed: {}", e);
            Err(failure.to_string())
        }
    }
}

// ========================
// Stale Result Guard
// ========================

/// Issues tickets for in-flight requests of one mounted view. Invalidating
/// the guard (on unmount, or when a newer request supersedes) makes every
/// outstanding ticket stale so its result is dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    epoch: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    epoch: Arc<AtomicU64>,
    issued_at: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket valid until the next `invalidate`
    pub fn ticket(&self) -> Ticket {
        Ticket {
            epoch: Arc::clone(&self.epoch),
            issued_at: self.epoch.load(Ordering::SeqCst),
        }
    }

    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Invalidate outstanding tickets and hand out a fresh one
    pub fn reissue(&self) -> Ticket {
        self.invalidate();
        self.ticket()
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.issued_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::HospitalInventoryRecord;

    const TWO_ROWS: &str = r#"[
        {"hospital":"Mercy General","city":"Sacramento","bloodType":"A+","delta_count":3},
        {"hospital":"St. Luke's","city":"Boise","bloodType":"O-","delta_count":-1}
    ]"#;

    #[test]
    fn test_success_stores_records() {
        let state: Loadable<Vec<HospitalInventoryRecord>> = parse_sequence(200, TWO_ROWS).into();
        assert!(state.is_ready());
        assert_eq!(state.data.len(), 2);
        assert_eq!(state.data[1].hospital, "St. Luke's");
    }

    #[test]
    fn test_http_500_gives_error_and_no_rows() {
        let mut state = Loadable::<Vec<HospitalInventoryRecord>>::pending();
        state.settle(parse_sequence(500, "Internal Server Error"));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
        assert!(state.data.is_empty());
    }

    #[test]
    fn test_object_instead_of_array_is_shape_error() {
        let mut state = Loadable::<Vec<HospitalInventoryRecord>>::pending();
        state.settle(parse_sequence(200, r#"{"hospital":"Mercy"}"#));
        assert_eq!(
            state.error.as_deref(),
            Some("API response was not in the expected array format.")
        );
        assert!(state.data.is_empty());
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = parse_sequence::<HospitalInventoryRecord>(200, "<html>");
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_positional_rows_are_dropped() {
        let body = r#"[
            ["Mercy General","Sacramento","A+",3],
            {"hospital":"St. Luke's","city":"Boise","bloodType":"O-","delta_count":2}
        ]"#;
        let records = parse_sequence::<HospitalInventoryRecord>(200, body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hospital, "St. Luke's");
    }

    #[test]
    fn test_positional_rows_never_reach_the_filter() {
        let body = r#"[["Mercy General","Sacramento","A+",3]]"#;
        let records = parse_sequence::<HospitalInventoryRecord>(200, body).unwrap();
        assert!(records.is_empty());
        assert!(crate::filter::filter_by_hospital(&records, "mercy").is_empty());
    }

    #[test]
    fn test_error_resets_previous_data() {
        let mut state: Loadable<Vec<HospitalInventoryRecord>> = parse_sequence(200, TWO_ROWS).into();
        state.begin();
        assert!(state.loading);
        assert_eq!(state.error, None);
        state.settle(Err(FetchError::Network { what: "hospital data".into(), detail: "offline".into() }));
        assert_eq!(state.error.as_deref(), Some("Failed to load hospital data. Please try again."));
        assert!(state.data.is_empty());
    }

    #[test]
    fn test_object_parse_rejects_array() {
        let result = parse_object::<crate::dto::Recommendations>(200, "[]");
        assert_eq!(result, Err(FetchError::Shape { expected: Shape::Object }));
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(FetchError::Timeout { after_ms: 10_000 }.to_string(), "Request timed out after 10000 ms.");
    }

    fn raw(status: u16, body: &str) -> Result<RawResponse, FetchError> {
        Ok(RawResponse { status, body: body.to_string() })
    }

    #[test]
    fn test_submit_success_shows_server_message() {
        let outcome = submit_outcome(raw(201, r#"{"message":"Hospital created"}"#), "Signup failed. Try again.");
        assert_eq!(outcome, Ok("Hospital created".to_string()));
    }

    #[test]
    fn test_submit_error_prefers_server_error() {
        let outcome = submit_outcome(raw(400, r#"{"error":"Email already registered"}"#), "Signup failed. Try again.");
        assert_eq!(outcome, Err("Email already registered".to_string()));
        let outcome = submit_outcome(raw(500, "<html>oops</html>"), "Signup failed. Try again.");
        assert_eq!(outcome, Err("Signup failed. Try again.".to_string()));
    }

    #[test]
    fn test_submit_transport_failures() {
        let timeout = submit_outcome(Err(FetchError::Timeout { after_ms: 10_000 }), "Error updating blood.");
        assert_eq!(timeout, Err("Request timed out after 10000 ms.".to_string()));
        let offline = submit_outcome(
            Err(FetchError::Network { what: "form".into(), detail: "offline".into() }),
            "Error updating blood.",
        );
        assert_eq!(offline, Err("Error updating blood.".to_string()));
    }

    #[test]
    fn test_ticket_goes_stale_after_invalidate() {
        let guard = RequestGuard::new();
        let first = guard.ticket();
        assert!(first.is_current());

        let second = guard.reissue();
        assert!(!first.is_current());
        assert!(second.is_current());

        guard.invalidate();
        assert!(!second.is_current());
    }

    #[test]
    fn test_cloned_guard_shares_epoch() {
        let guard = RequestGuard::new();
        let ticket = guard.ticket();
        let on_unmount = guard.clone();
        on_unmount.invalidate();
        assert!(!ticket.is_current());
    }
}

//! Typed Form Records
//!
//! One struct per form, one field per input. A form is checked here before
//! any request leaves the browser; only a valid form yields a payload.
//! Rules are declared with `validator` on the trimmed copy of each form.

use std::borrow::Cow;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::blood_type::BloodType;
use crate::dto::Coordinates;

pub const REQUIRED_PROMPT: &str = "Please fill in all fields.";

/// `validator` code of the presence rule (`length(min = 1)`)
const MISSING_CODE: &str = "length";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub missing: bool,
}

/// Field-level errors in the order the fields appear on the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    pub fields: Vec<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.fields.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    /// Form-level prompt: the generic one when anything is missing,
    /// otherwise the first specific problem
    pub fn summary(&self) -> String {
        if self.fields.iter().any(|e| e.missing) {
            return REQUIRED_PROMPT.to_string();
        }
        self.fields.first().map(|e| e.message.clone()).unwrap_or_default()
    }

    /// One entry per failing field, in `order`. A blank field reports only
    /// that it is missing.
    pub fn from_validation(errors: &ValidationErrors, order: &[&'static str]) -> Self {
        let by_field = errors.field_errors();
        let fields = order
            .iter()
            .filter_map(|&field| {
                let list = by_field.get(&field)?;
                let error = list
                    .iter()
                    .find(|e| e.code == MISSING_CODE)
                    .or_else(|| list.first())?;
                Some(FieldError {
                    field,
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid.", field)),
                    missing: error.code == MISSING_CODE,
                })
            })
            .collect();
        Self { fields }
    }
}

/// A form that turns into a request payload once every input checks out
pub trait FormRecord: Validate + Sized {
    type Payload;

    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// The values as they will be submitted
    fn trimmed(&self) -> Self;

    /// Payload of a form that passed validation
    fn build(&self) -> Option<Self::Payload>;

    fn to_payload(&self) -> Result<Self::Payload, FormErrors> {
        let form = self.trimmed();
        form.validate()
            .map_err(|e| FormErrors::from_validation(&e, Self::FIELDS))?;
        form.build().ok_or_else(|| {
            log::error!("[forms] validated form did not build");
            FormErrors {
                fields: vec![FieldError {
                    field: "form",
                    message: "Please check the form and try again.".to_string(),
                    missing: false,
                }],
            }
        })
    }
}

fn trim(value: &str) -> String {
    value.trim().to_string()
}

// ========================
// Custom rules; blank values are left to the presence rule
// ========================

fn known_blood_type(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    value.parse::<BloodType>().map(|_| ()).map_err(|message| {
        let mut error = ValidationError::new("blood_type");
        error.message = Some(Cow::from(message));
        error
    })
}

fn whole_number(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<u32>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("whole_number"))
}

fn positive_whole_number(value: &str) -> Result<(), ValidationError> {
    match value.parse::<i64>() {
        _ if value.is_empty() => Ok(()),
        Ok(n) if n > 0 => Ok(()),
        _ => Err(ValidationError::new("positive_whole_number")),
    }
}

fn finite_number(value: &str) -> Result<(), ValidationError> {
    match value.parse::<f64>() {
        _ if value.is_empty() => Ok(()),
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(ValidationError::new("number")),
    }
}

// ========================
// Donor notification sign-up
// ========================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DonorSignupForm {
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Select your blood type."),
        custom(function = "known_blood_type")
    )]
    pub blood_type: String,
    #[validate(length(min = 1, message = "Location is required."))]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorSignupPayload {
    pub email: String,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    pub location: String,
}

impl FormRecord for DonorSignupForm {
    type Payload = DonorSignupPayload;
    const FIELDS: &'static [&'static str] = &["email", "blood_type", "location"];

    fn trimmed(&self) -> Self {
        Self {
            email: trim(&self.email),
            blood_type: trim(&self.blood_type),
            location: trim(&self.location),
        }
    }

    fn build(&self) -> Option<Self::Payload> {
        Some(DonorSignupPayload {
            email: self.email.clone(),
            blood_type: self.blood_type.parse().ok()?,
            location: self.location.clone(),
        })
    }
}

// ========================
// Hospital sign-up
// ========================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct HospitalSignupForm {
    #[validate(length(min = 1, message = "Hospital name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required."))]
    pub city: String,
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Zip code is required."))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Validated sign-up, still waiting for the geocoded location
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalSignup {
    pub name: String,
    pub city: String,
    pub email: String,
    pub zip_code: String,
    pub password: String,
}

impl HospitalSignup {
    pub fn with_coordinates(self, coordinates: Coordinates) -> HospitalCreatePayload {
        HospitalCreatePayload {
            name: self.name,
            city: self.city,
            email: self.email,
            password: self.password,
            coordinates,
        }
    }
}

/// Body of `POST /hospital/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalCreatePayload {
    pub name: String,
    pub city: String,
    pub email: String,
    pub password: String,
    pub coordinates: Coordinates,
}

impl FormRecord for HospitalSignupForm {
    type Payload = HospitalSignup;
    const FIELDS: &'static [&'static str] = &["name", "city", "email", "zip_code", "password"];

    // passwords are submitted exactly as typed
    fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            city: trim(&self.city),
            email: trim(&self.email),
            zip_code: trim(&self.zip_code),
            password: self.password.clone(),
        }
    }

    fn build(&self) -> Option<Self::Payload> {
        Some(HospitalSignup {
            name: self.name.clone(),
            city: self.city.clone(),
            email: self.email.clone(),
            zip_code: self.zip_code.clone(),
            password: self.password.clone(),
        })
    }
}

// ========================
// Hospital sign-in and blood management
// ========================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, message = "Email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    #[validate(length(min = 1, message = "State is required."))]
    pub state: String,
    #[validate(length(min = 1, message = "Hospital name is required."))]
    pub hospital_name: String,
}

/// Body of `POST /api/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub state: String,
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
}

impl FormRecord for SignInForm {
    type Payload = LoginRequest;
    const FIELDS: &'static [&'static str] = &["email", "password", "state", "hospital_name"];

    fn trimmed(&self) -> Self {
        Self {
            email: trim(&self.email),
            password: self.password.clone(),
            state: trim(&self.state),
            hospital_name: trim(&self.hospital_name),
        }
    }

    fn build(&self) -> Option<Self::Payload> {
        Some(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            state: self.state.clone(),
            hospital_name: self.hospital_name.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BloodAction {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BloodUpdateForm {
    #[validate(
        length(min = 1, message = "Enter a blood amount."),
        custom(function = "positive_whole_number", message = "Blood amount must be a positive whole number.")
    )]
    pub amount: String,
}

/// Body of `POST /api/updateBlood`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodUpdatePayload {
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    pub state: String,
    #[serde(rename = "bloodAmount")]
    pub blood_amount: i64,
    pub action: BloodAction,
}

impl BloodUpdateForm {
    /// Validated amount as a positive whole number
    pub fn amount(&self) -> Result<i64, FormErrors> {
        let form = Self { amount: trim(&self.amount) };
        form.validate()
            .map_err(|e| FormErrors::from_validation(&e, &["amount"]))?;
        form.amount.parse().map_err(|_| FormErrors {
            fields: vec![FieldError {
                field: "amount",
                message: "Blood amount must be a positive whole number.".to_string(),
                missing: false,
            }],
        })
    }

    pub fn to_payload(
        &self,
        hospital_name: &str,
        state: &str,
        action: BloodAction,
    ) -> Result<BloodUpdatePayload, FormErrors> {
        Ok(BloodUpdatePayload {
            hospital_name: hospital_name.to_string(),
            state: state.to_string(),
            blood_amount: self.amount()?,
            action,
        })
    }
}

// ========================
// Donor registration
// ========================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DonorForm {
    #[validate(length(min = 1, message = "Donor ID is required."))]
    pub donor_id: String,
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "Age is required."),
        custom(function = "whole_number", message = "Age must be a whole number.")
    )]
    pub age: String,
    #[validate(
        length(min = 1, message = "Blood type is required."),
        custom(function = "known_blood_type")
    )]
    pub blood_type: String,
    #[validate(length(min = 1, message = "City is required."))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required."))]
    pub state: String,
    #[validate(
        length(min = 1, message = "Latitude is required."),
        custom(function = "finite_number", message = "Latitude must be a number.")
    )]
    pub lat: String,
    #[validate(
        length(min = 1, message = "Longitude is required."),
        custom(function = "finite_number", message = "Longitude must be a number.")
    )]
    pub lon: String,
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required."))]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorLocation {
    pub city: String,
    pub state: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Body of `POST /donor/add`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorPayload {
    pub donor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub blood_type: BloodType,
    pub location: DonorLocation,
    pub contact_info: ContactInfo,
}

impl FormRecord for DonorForm {
    type Payload = DonorPayload;
    const FIELDS: &'static [&'static str] = &[
        "donor_id", "first_name", "last_name", "age", "blood_type", "city", "state", "lat", "lon", "email",
        "phone",
    ];

    fn trimmed(&self) -> Self {
        Self {
            donor_id: trim(&self.donor_id),
            first_name: trim(&self.first_name),
            last_name: trim(&self.last_name),
            age: trim(&self.age),
            blood_type: trim(&self.blood_type),
            city: trim(&self.city),
            state: trim(&self.state),
            lat: trim(&self.lat),
            lon: trim(&self.lon),
            email: trim(&self.email),
            phone: trim(&self.phone),
        }
    }

    fn build(&self) -> Option<Self::Payload> {
        Some(DonorPayload {
            donor_id: self.donor_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age.parse().ok()?,
            blood_type: self.blood_type.parse().ok()?,
            location: DonorLocation {
                city: self.city.clone(),
                state: self.state.clone(),
                coordinates: Coordinates::new(self.lat.parse().ok()?, self.lon.parse().ok()?),
            },
            contact_info: ContactInfo {
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_donor() -> DonorForm {
        DonorForm {
            donor_id: "D0000001".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            age: "30".into(),
            blood_type: "O+".into(),
            city: "New York".into(),
            state: "NY".into(),
            lat: "40.7128".into(),
            lon: "-74.0060".into(),
            email: "johndoe@example.com".into(),
            phone: "123-456-7890".into(),
        }
    }

    #[test]
    fn test_donor_payload_shape() {
        let payload = filled_donor().to_payload().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["age"], 30);
        assert_eq!(json["blood_type"], "O+");
        assert_eq!(json["location"]["coordinates"]["lat"], 40.7128);
        assert_eq!(json["location"]["coordinates"]["lon"], -74.006);
        assert_eq!(json["contact_info"]["phone"], "123-456-7890");
    }

    #[test]
    fn test_missing_fields_block_submission() {
        let form = DonorForm { first_name: String::new(), phone: String::new(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        let fields: Vec<&str> = errors.fields.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "phone"]);
        assert_eq!(errors.summary(), REQUIRED_PROMPT);
        assert_eq!(errors.for_field("phone"), Some("Phone is required."));
    }

    #[test]
    fn test_malformed_numbers_are_field_errors() {
        let form = DonorForm { age: "thirty".into(), lat: "north".into(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("age"), Some("Age must be a whole number."));
        assert_eq!(errors.for_field("lat"), Some("Latitude must be a number."));
        assert_eq!(errors.summary(), "Age must be a whole number.");
    }

    #[test]
    fn test_unknown_blood_type() {
        let form = DonorForm { blood_type: "Q+".into(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("blood_type"), Some("Unknown blood type: Q+"));
    }

    #[test]
    fn test_bad_email() {
        let form = DonorForm { email: "not-an-email".into(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Enter a valid email address."));
        assert!(!errors.fields[0].missing);
    }

    #[test]
    fn test_email_is_checked_after_trimming() {
        let signup = |email: &str| DonorSignupForm {
            email: email.into(),
            blood_type: "A-".into(),
            location: "Reno".into(),
        };
        let payload = signup(" ops@mercy.health.org ").to_payload().unwrap();
        assert_eq!(payload.email, "ops@mercy.health.org");
        for bad in ["@b.org", "a b@c.org", "mercy.org"] {
            let errors = signup(bad).to_payload().unwrap_err();
            assert_eq!(errors.for_field("email"), Some("Enter a valid email address."), "{}", bad);
        }
    }

    #[test]
    fn test_blank_field_reports_only_missing() {
        let form = DonorForm { lat: "   ".into(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert_eq!(errors.for_field("lat"), Some("Latitude is required."));
        assert!(errors.fields[0].missing);
    }

    #[test]
    fn test_infinite_coordinate_rejected() {
        let form = DonorForm { lon: "inf".into(), ..filled_donor() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("lon"), Some("Longitude must be a number."));
    }

    #[test]
    fn test_empty_email_reports_required() {
        let form = DonorSignupForm { email: String::new(), blood_type: "A-".into(), location: "Reno".into() };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Email is required."));
        assert_eq!(errors.summary(), REQUIRED_PROMPT);
    }

    #[test]
    fn test_donor_signup_payload() {
        let form = DonorSignupForm {
            email: "jane@example.com".into(),
            blood_type: "AB-".into(),
            location: " Reno, NV ".into(),
        };
        let json = serde_json::to_value(form.to_payload().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"email": "jane@example.com", "bloodType": "AB-", "location": "Reno, NV"}));
    }

    #[test]
    fn test_login_request_field_names() {
        let form = SignInForm {
            email: "admin@mercy.org".into(),
            password: "pw".into(),
            state: "CA".into(),
            hospital_name: "Mercy".into(),
        };
        let json = serde_json::to_value(form.to_payload().unwrap()).unwrap();
        assert_eq!(json["hospitalName"], "Mercy");
        assert_eq!(json["state"], "CA");
    }

    #[test]
    fn test_sign_in_requires_every_field() {
        let errors = SignInForm::default().to_payload().unwrap_err();
        assert_eq!(errors.fields.len(), 4);
        assert_eq!(errors.summary(), REQUIRED_PROMPT);
    }

    #[test]
    fn test_hospital_signup_with_coordinates() {
        let form = HospitalSignupForm {
            name: "Mercy".into(),
            city: "Sacramento".into(),
            email: "ops@mercy.org".into(),
            zip_code: " 95819 ".into(),
            password: "secret".into(),
        };
        let signup = form.to_payload().unwrap();
        assert_eq!(signup.zip_code, "95819");
        let payload = signup.with_coordinates(Coordinates::new(38.5, -121.4));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["coordinates"], serde_json::json!({"lat": 38.5, "lon": -121.4}));
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_hospital_signup_requires_zip() {
        let form = HospitalSignupForm {
            name: "Mercy".into(),
            city: "Sacramento".into(),
            email: "ops@mercy.org".into(),
            zip_code: String::new(),
            password: "secret".into(),
        };
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.for_field("zip_code"), Some("Zip code is required."));
    }

    #[test]
    fn test_blood_update_payload() {
        let form = BloodUpdateForm { amount: "3".into() };
        let payload = form.to_payload("Mercy", "CA", BloodAction::Subtract).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"hospitalName": "Mercy", "state": "CA", "bloodAmount": 3, "action": "subtract"})
        );
    }

    #[test]
    fn test_blood_update_rejects_non_positive() {
        for raw in ["0", "-2", "1.5", "lots"] {
            let form = BloodUpdateForm { amount: raw.into() };
            let errors = form.amount().unwrap_err();
            assert_eq!(errors.for_field("amount"), Some("Blood amount must be a positive whole number."));
        }
        let errors = BloodUpdateForm::default().amount().unwrap_err();
        assert_eq!(errors.for_field("amount"), Some("Enter a blood amount."));
    }
}

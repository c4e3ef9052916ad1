//! UI Components
//!
//! Reusable Leptos components.

mod blood_type_select;
mod form_field;
mod form_message;
mod hospital_map;
mod nav_bar;
mod severity_legend;

pub use blood_type_select::BloodTypeSelect;
pub use form_field::{bound_field, FormField};
pub use form_message::{FormMessage, Notice};
pub use hospital_map::HospitalMap;
pub use nav_bar::NavBar;
pub use severity_legend::SeverityLegend;

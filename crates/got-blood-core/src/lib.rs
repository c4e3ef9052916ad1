//! Got Blood? Core
//!
//! Models and view logic shared by the web client. Nothing in here touches
//! the browser, so it builds and tests on the native target.

pub mod blood_type;
pub mod config;
pub mod dashboard;
pub mod dto;
pub mod endpoints;
pub mod fetch;
pub mod filter;
pub mod forms;
pub mod map;
pub mod stats;

pub use blood_type::BloodType;
pub use config::{ClientConfig, ConfigError};
pub use fetch::{FetchError, Loadable, RequestGuard, Shape, Ticket};

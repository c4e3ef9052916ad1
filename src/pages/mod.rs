//! Routed Pages

mod dashboard;
mod donor_add;
mod home;
mod hospital_signin;
mod hospital_signup;
mod map;
mod not_found;
mod query;
mod signup;
mod statistics;

pub use dashboard::DashboardPage;
pub use donor_add::DonorAddPage;
pub use home::HomePage;
pub use hospital_signin::HospitalSignInPage;
pub use hospital_signup::HospitalSignupPage;
pub use map::MapPage;
pub use not_found::NotFoundPage;
pub use query::QueryPage;
pub use signup::SignUpPage;
pub use statistics::StatisticsPage;

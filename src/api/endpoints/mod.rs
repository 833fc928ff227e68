//! API endpoint handlers.
//!
//! Handlers parse the body, call into `registry`, and shape the success
//! payload. Validation and persistence never happen here.

pub mod appointments;
pub mod doctors;
pub mod files;
pub mod health;
pub mod index;
pub mod patients;
pub mod workers;

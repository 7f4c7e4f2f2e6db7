//! API endpoint modules organized by category.
//!
//! Each module adds typed methods to [`crate::SensitApi`] for a group of
//! related endpoints.

pub mod auth;
pub mod devices;
pub mod sensors;

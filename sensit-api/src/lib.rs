//! Sens'it API - HTTP client for the Sens'it device and telemetry REST API.
//!
//! This crate provides the transport seam ([`HttpGateway`]) with its reqwest
//! implementation ([`ApiClient`]), the response envelope shared by every
//! endpoint, and [`SensitApi`], a token-carrying handle with typed methods for
//! authentication, device discovery and sensor history pages.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod gateway;
pub mod response;

// Re-export key types
pub use api::SensitApi;
pub use client::ApiClient;
pub use gateway::HttpGateway;
pub use response::{normalize_link, ApiResponse};

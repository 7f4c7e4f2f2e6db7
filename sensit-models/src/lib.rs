//! Sens'it Models - Telemetry records, measurements, devices and history selection.
//!
//! This crate owns the data side of the client: raw history records as the
//! API delivers them, the decoder that turns them into typed measurements,
//! device entities discovered for an account, and the selection criteria the
//! history paginator works from.

pub mod models;
pub mod timestamp;

// Re-export key types
pub use models::sensor::SensorKind;
pub use models::record::{HistoryPage, RawRecord};
pub use models::measurement::{ButtonPress, Measurement, Mode};
pub use models::device::{Device, DeviceDetail};
pub use models::criterion::{CriterionError, DateBound, HistoryRequest, SelectionCriterion};
pub use timestamp::parse_timestamp;

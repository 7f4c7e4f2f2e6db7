//! Raw history records and pages.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sensit_core::constants::NEXT_LINK;

use crate::timestamp;

/// One telemetry record exactly as delivered by the history endpoint.
///
/// ```json
/// { "date": "2015-07-12T10:00Z", "data": "21.5:23.0", "date_period": "2015-07-12T09:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// When the reading was taken (end of the window for aggregated readings).
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date: DateTime<Utc>,
    /// Colon-separated numeric payload. Empty for button presses.
    #[serde(default)]
    pub data: String,
    /// Start of the aggregation window, when the reading is aggregated.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_period: Option<DateTime<Utc>>,
}

impl RawRecord {
    /// Build a record from its parts.
    pub fn new(date: DateTime<Utc>, data: impl Into<String>) -> Self {
        Self {
            date,
            data: data.into(),
            date_period: None,
        }
    }
}

/// One page of sensor history plus its navigation links.
///
/// Link values are already reduced to paths relative to the API root.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub records: Vec<RawRecord>,
    pub links: HashMap<String, String>,
}

impl HistoryPage {
    /// Path of the follow-up page, if the page declares one.
    pub fn next(&self) -> Option<&str> {
        self.links.get(NEXT_LINK).map(String::as_str)
    }
}

//! Typed measurements and the record decoder.
//!
//! The API sends no type tag with a record: the shape of a reading is only
//! visible in how many numeric fields its payload carries. Each kind has a
//! `complete` arity (aggregated over a window, with min/max and for some
//! kinds a threshold) and a `specific` arity (a point reading).
//!
//! | kind        | complete                   | specific                       |
//! |-------------|----------------------------|--------------------------------|
//! | temperature | `min:max`                  | `value`                        |
//! | sound       | `value:min:max`            | `threshold:value:min:max`      |
//! | motion      | `threshold:value`          | `value`                        |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sensit_core::error::{SensitError, SensitResult};

use super::record::RawRecord;
use super::sensor::SensorKind;

/// Which payload shape a measurement was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Aggregated over a window.
    Complete,
    /// A single point-in-time reading.
    Specific,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Complete => f.write_str("complete"),
            Mode::Specific => f.write_str("specific"),
        }
    }
}

/// A decoded temperature, sound or motion reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub kind: SensorKind,
    pub date: DateTime<Utc>,
    /// Start of the aggregation window, when the API reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<DateTime<Utc>>,
    pub value: f64,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// A button press. Only the timestamp is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPress {
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<DateTime<Utc>>,
}

impl From<&RawRecord> for ButtonPress {
    fn from(record: &RawRecord) -> Self {
        Self {
            date: record.date,
            period_start: record.date_period,
        }
    }
}

/// Split a colon-separated payload into numbers.
pub fn parse_fields(payload: &str) -> SensitResult<Vec<f64>> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    payload
        .split(':')
        .map(|field| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|e| SensitError::Decode(format!("bad field {field:?} in {payload:?}: {e}")))
        })
        .collect()
}

impl Measurement {
    /// Decode one raw record as a reading of `kind`.
    pub fn decode(kind: SensorKind, record: &RawRecord) -> SensitResult<Self> {
        let (complete, specific) = kind
            .arities()
            .ok_or_else(|| SensitError::Decode(format!("{kind} records carry no measurement")))?;
        let fields = parse_fields(&record.data)?;

        let mut m = Measurement {
            kind,
            date: record.date,
            period_start: record.date_period,
            value: 0.0,
            mode: Mode::Specific,
            min: None,
            max: None,
            threshold: None,
        };

        match fields.len() {
            n if n == complete => {
                m.mode = Mode::Complete;
                match (kind, fields.as_slice()) {
                    (SensorKind::Temperature, &[min, max]) => {
                        m.min = Some(min);
                        m.max = Some(max);
                        m.value = (min + max) / 2.0;
                    }
                    (SensorKind::Sound, &[value, min, max]) => {
                        m.value = value;
                        m.min = Some(min);
                        m.max = Some(max);
                    }
                    (SensorKind::Motion, &[threshold, value]) => {
                        m.threshold = Some(threshold);
                        m.value = value;
                    }
                    _ => return Err(arity_error(kind, record, n)),
                }
            }
            n if n == specific => {
                m.mode = Mode::Specific;
                match (kind, fields.as_slice()) {
                    (SensorKind::Temperature | SensorKind::Motion, &[value]) => {
                        m.value = value;
                    }
                    (SensorKind::Sound, &[threshold, value, min, max]) => {
                        m.threshold = Some(threshold);
                        m.value = value;
                        m.min = Some(min);
                        m.max = Some(max);
                    }
                    _ => return Err(arity_error(kind, record, n)),
                }
            }
            n => return Err(arity_error(kind, record, n)),
        }

        Ok(m)
    }
}

fn arity_error(kind: SensorKind, record: &RawRecord, found: usize) -> SensitError {
    SensitError::Decode(format!(
        "{kind} record at {} has {found} field(s): {:?}",
        record.date.to_rfc3339(),
        record.data
    ))
}

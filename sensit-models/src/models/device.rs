//! Device entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use sensit_core::error::{SensitError, SensitResult};

use super::sensor::SensorKind;
use crate::timestamp::parse_timestamp;

/// A Sens'it device of the authenticated account.
///
/// Identity and lifetime bounds come from the `/devices` listing; the sensor
/// map and the operating mode are filled in by a per-device detail call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub activation_date: DateTime<Utc>,
    pub last_comm_date: DateTime<Utc>,
    /// Sensor id per kind. Empty until discovery has run.
    #[serde(default)]
    pub sensors: BTreeMap<SensorKind, String>,
    /// Operating mode as reported by the API.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Sensor map and mode from `/devices/{id}/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceDetail {
    pub sensors: BTreeMap<SensorKind, String>,
    pub mode: Option<String>,
}

/// Ids and modes come as numbers or strings depending on the endpoint.
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_date(map: &serde_json::Value, key: &str) -> SensitResult<DateTime<Utc>> {
    let raw = map
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SensitError::Serialization(format!("device missing {key}")))?;
    parse_timestamp(raw)
}

impl Device {
    /// Create a Device from one entry of the `/devices` listing.
    pub fn from_server_map(map: &serde_json::Value) -> SensitResult<Self> {
        let id = map
            .get("id")
            .and_then(scalar_to_string)
            .ok_or_else(|| SensitError::Serialization("device missing id".into()))?;

        Ok(Self {
            id,
            activation_date: required_date(map, "activation_date")?,
            last_comm_date: required_date(map, "last_comm_date")?,
            sensors: BTreeMap::new(),
            mode: None,
        })
    }

    /// Attach the result of sensor discovery.
    pub fn apply_detail(&mut self, detail: DeviceDetail) {
        self.sensors = detail.sensors;
        self.mode = detail.mode;
    }

    /// Sensor id for `kind`, if the device has one.
    pub fn sensor_id(&self, kind: SensorKind) -> Option<&str> {
        self.sensors.get(&kind).map(String::as_str)
    }

    /// History resource path of the `kind` sensor.
    pub fn history_path(&self, kind: SensorKind) -> SensitResult<String> {
        let sensor = self.sensor_id(kind).ok_or_else(|| SensitError::SensorNotFound {
            device: self.id.clone(),
            kind: kind.to_string(),
        })?;
        Ok(format!("/devices/{}/sensors/{}", self.id, sensor))
    }
}

impl DeviceDetail {
    /// Parse the `data` object of `/devices/{id}/`.
    ///
    /// Sensor types this client does not read are skipped.
    pub fn from_server_map(map: &serde_json::Value) -> SensitResult<Self> {
        let mut sensors = BTreeMap::new();
        let list = map
            .get("sensors")
            .and_then(|v| v.as_array())
            .ok_or_else(|| SensitError::Serialization("device detail missing sensors".into()))?;

        for entry in list {
            let Some(sensor_type) = entry.get("sensor_type").and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(id) = entry.get("id").and_then(scalar_to_string) else {
                continue;
            };
            match sensor_type.parse::<SensorKind>() {
                Ok(kind) => {
                    sensors.insert(kind, id);
                }
                Err(_) => debug!("skipping unsupported sensor type {sensor_type}"),
            }
        }

        Ok(Self {
            sensors,
            mode: map.get("mode").and_then(scalar_to_string),
        })
    }
}

//! Sensor kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sensit_core::constants::sensor_types;
use sensit_core::error::SensitError;

/// The four telemetry channels a Sens'it device exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Temperature,
    Sound,
    Motion,
    Button,
}

impl SensorKind {
    /// All kinds, in display order.
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Temperature,
        SensorKind::Sound,
        SensorKind::Motion,
        SensorKind::Button,
    ];

    /// Identifier used by the API and as the accessor name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => sensor_types::TEMPERATURE,
            SensorKind::Sound => sensor_types::SOUND,
            SensorKind::Motion => sensor_types::MOTION,
            SensorKind::Button => sensor_types::BUTTON,
        }
    }

    /// Field counts of the `complete` and `specific` payload shapes.
    /// `None` for kinds whose records carry no payload.
    pub fn arities(&self) -> Option<(usize, usize)> {
        match self {
            SensorKind::Temperature => Some((2, 1)),
            SensorKind::Sound => Some((3, 4)),
            SensorKind::Motion => Some((2, 1)),
            SensorKind::Button => None,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = SensitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        SensorKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| SensitError::Serialization(format!("unknown sensor type: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sensor_kind() {
        assert_eq!("sound".parse::<SensorKind>().unwrap(), SensorKind::Sound);
        assert_eq!(" Temperature ".parse::<SensorKind>().unwrap(), SensorKind::Temperature);
        assert!("battery".parse::<SensorKind>().is_err());
    }

    #[test]
    fn test_arities_are_distinct() {
        for kind in SensorKind::ALL {
            if let Some((complete, specific)) = kind.arities() {
                assert_ne!(complete, specific, "{kind} arities collide");
            }
        }
        assert!(SensorKind::Button.arities().is_none());
    }
}

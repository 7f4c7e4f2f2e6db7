//! History selection: what the caller asks for, and what gets fetched.
//!
//! A caller describes a window with up to two of `count`, `begin` and `end`
//! ([`HistoryRequest`]). Resolving it against a device's lifetime produces a
//! [`SelectionCriterion`], the only shape the paginator accepts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use sensit_core::error::SensitError;

use super::device::Device;
use crate::timestamp::parse_timestamp;

/// Why a selection was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("needs 2 parameters: 0 given")]
    Empty,
    #[error("needs 2 parameters: 3 given")]
    Overdetermined,
    #[error("count must be at least 1")]
    ZeroCount,
    #[error("given 'begin' is after given 'end'")]
    BeginAfterEnd,
    #[error("given 'begin' is before activation date")]
    BeforeActivation,
    #[error("given 'end' is after last communication date")]
    AfterLastCommunication,
}

impl CriterionError {
    /// Attribute the failure to a named accessor.
    pub fn in_method(self, method: &str) -> SensitError {
        SensitError::argument(method, self)
    }
}

/// One side of a requested window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateBound {
    /// The device's own bound: activation date for `begin`, last
    /// communication date for `end`.
    Device,
    /// An explicit instant.
    At(DateTime<Utc>),
}

impl DateBound {
    fn resolve(self, device_bound: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            DateBound::Device => device_bound,
            DateBound::At(dt) => dt,
        }
    }
}

impl From<DateTime<Utc>> for DateBound {
    fn from(dt: DateTime<Utc>) -> Self {
        DateBound::At(dt)
    }
}

impl FromStr for DateBound {
    type Err = SensitError;

    /// `device` (or `-1`) selects the device bound; anything else is a timestamp.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "device" | "-1" => Ok(DateBound::Device),
            other => parse_timestamp(other).map(DateBound::At),
        }
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Device => f.write_str("device"),
            DateBound::At(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

/// The caller-facing `(count?, begin?, end?)` triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub count: Option<usize>,
    pub begin: Option<DateBound>,
    pub end: Option<DateBound>,
}

impl HistoryRequest {
    /// The `n` records upstream serves first.
    pub fn last(n: usize) -> Self {
        Self { count: Some(n), ..Self::default() }
    }

    /// Records strictly between `begin` and `end`.
    pub fn between(begin: impl Into<DateBound>, end: impl Into<DateBound>) -> Self {
        Self {
            count: None,
            begin: Some(begin.into()),
            end: Some(end.into()),
        }
    }

    /// Records strictly after `begin`.
    pub fn since(begin: impl Into<DateBound>) -> Self {
        Self { begin: Some(begin.into()), ..Self::default() }
    }

    /// Records strictly before `end`.
    pub fn until(end: impl Into<DateBound>) -> Self {
        Self { end: Some(end.into()), ..Self::default() }
    }

    /// Cap the number of records.
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    /// Validate against `device` and produce the criterion to fetch with.
    pub fn resolve(&self, device: &Device) -> Result<SelectionCriterion, CriterionError> {
        let (count, begin, end) = (self.count, self.begin, self.end);

        if count.is_none() && begin.is_none() && end.is_none() {
            return Err(CriterionError::Empty);
        }
        if count.is_some() && begin.is_some() && end.is_some() {
            return Err(CriterionError::Overdetermined);
        }

        let begin = begin.map(|b| b.resolve(device.activation_date));
        let end = end.map(|e| e.resolve(device.last_comm_date));

        if matches!(begin, Some(b) if b < device.activation_date) {
            return Err(CriterionError::BeforeActivation);
        }
        if matches!(end, Some(e) if e > device.last_comm_date) {
            return Err(CriterionError::AfterLastCommunication);
        }

        let criterion = match (count, begin, end) {
            (Some(n), None, None) => SelectionCriterion::Count(n),
            (Some(n), Some(begin), None) => SelectionCriterion::CountFromStart { begin, n },
            (Some(n), None, Some(end)) => SelectionCriterion::CountUntilEnd { end, n },
            (None, begin, end) => SelectionCriterion::Range { begin, end },
            (Some(_), Some(_), Some(_)) => return Err(CriterionError::Overdetermined),
        };
        criterion.check()?;
        Ok(criterion)
    }
}

/// A validated selection of history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionCriterion {
    /// The first `n` records upstream serves.
    Count(usize),
    /// Records strictly inside the window. At least one bound is present.
    Range {
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// The `n` earliest records strictly after `begin`.
    CountFromStart { begin: DateTime<Utc>, n: usize },
    /// The `n` latest records strictly before `end`.
    CountUntilEnd { end: DateTime<Utc>, n: usize },
}

impl SelectionCriterion {
    /// Structural checks that do not depend on a device.
    pub fn check(&self) -> Result<(), CriterionError> {
        match *self {
            SelectionCriterion::Count(0)
            | SelectionCriterion::CountFromStart { n: 0, .. }
            | SelectionCriterion::CountUntilEnd { n: 0, .. } => Err(CriterionError::ZeroCount),
            SelectionCriterion::Range { begin: None, end: None } => Err(CriterionError::Empty),
            SelectionCriterion::Range { begin: Some(b), end: Some(e) } if b > e => {
                Err(CriterionError::BeginAfterEnd)
            }
            _ => Ok(()),
        }
    }
}

//! Slot times: the `HH:MM` times of day at which a habit is due.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

static SLOT_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap());

/// A validated time of day in `HH:MM` form.
///
/// Ordering is chronological, which matches the lexicographic order of the
/// zero-padded text form. Serialized as the `HH:MM` string, including when
/// used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    /// Build a slot time from numeric parts, rejecting out-of-range values.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parse `HH:MM` text. Surrounding whitespace is trimmed first.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let caps = SLOT_TIME_RE
            .captures(trimmed)
            .ok_or_else(|| CoreError::InvalidSlotTime(raw.to_string()))?;
        // The pattern only admits two ASCII digits per group.
        let hour = caps[1]
            .parse::<u8>()
            .map_err(|_| CoreError::InvalidSlotTime(raw.to_string()))?;
        let minute = caps[2]
            .parse::<u8>()
            .map_err(|_| CoreError::InvalidSlotTime(raw.to_string()))?;
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

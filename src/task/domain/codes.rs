//! Status and priority code tables.
//!
//! Codes the platform adds later must not break aggregation, so unknown codes
//! translate to an explicit `Unknown` value instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status, translated from the platform's numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Code `0`: requested, not yet started.
    Waiting,
    /// Code `1`: done.
    Completed,
    /// Code `2`: paused.
    OnHold,
    /// Code `3`: cancelled.
    Cancelled,
    /// Code `4`: being worked on.
    InProgress,
    /// Any code outside the table.
    #[default]
    Unknown,
}

impl TaskStatus {
    /// Translates a platform status code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" => Self::Waiting,
            "1" => Self::Completed,
            "2" => Self::OnHold,
            "3" => Self::Cancelled,
            "4" => Self::InProgress,
            _ => Self::Unknown,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Completed => "Completed",
            Self::OnHold => "On hold",
            Self::Cancelled => "Cancelled",
            Self::InProgress => "In progress",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority, translated from the platform's numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Empty code: no priority set.
    #[default]
    None,
    /// Code `1`.
    Low,
    /// Code `2`.
    Normal,
    /// Code `3`.
    High,
    /// Code `4`.
    Urgent,
    /// Any code outside the table.
    Unknown,
}

impl TaskPriority {
    /// Translates a platform priority code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "" => Self::None,
            "1" => Self::Low,
            "2" => Self::Normal,
            "3" => Self::High,
            "4" => Self::Urgent,
            _ => Self::Unknown,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Urgent => "Urgent",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

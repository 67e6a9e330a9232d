//! Building-maintenance trades used to categorize checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    Electrical,
    Plumbing,
    Hvac,
    FireSafety,
    Carpentry,
    Locksmith,
    Cleaning,
    General,
}

impl Trade {
    pub const ALL: [Trade; 8] = [
        Trade::Electrical,
        Trade::Plumbing,
        Trade::Hvac,
        Trade::FireSafety,
        Trade::Carpentry,
        Trade::Locksmith,
        Trade::Cleaning,
        Trade::General,
    ];

    /// Parse the stored (snake_case) representation.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown trade '{name}'")))
    }

    /// Return the database string representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Electrical => "electrical",
            Self::Plumbing => "plumbing",
            Self::Hvac => "hvac",
            Self::FireSafety => "fire_safety",
            Self::Carpentry => "carpentry",
            Self::Locksmith => "locksmith",
            Self::Cleaning => "cleaning",
            Self::General => "general",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Electrical => "Electrical",
            Self::Plumbing => "Plumbing",
            Self::Hvac => "HVAC",
            Self::FireSafety => "Fire safety",
            Self::Carpentry => "Carpentry",
            Self::Locksmith => "Locksmith",
            Self::Cleaning => "Cleaning",
            Self::General => "General",
        }
    }
}

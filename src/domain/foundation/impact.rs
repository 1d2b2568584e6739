//! Impact value object: the preference direction of a criterion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whether higher or lower raw values are preferable for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Maximize,
    Minimize,
}

impl Impact {
    /// Parses a single impact marker.
    ///
    /// Accepts the compact `+` / `-` notation as well as the words
    /// `max`, `maximize`, `min` and `minimize` (case-insensitive).
    pub fn parse(marker: &str) -> Result<Self, ValidationError> {
        match marker.trim().to_ascii_lowercase().as_str() {
            "+" | "max" | "maximize" => Ok(Impact::Maximize),
            "-" | "min" | "minimize" => Ok(Impact::Minimize),
            other => Err(ValidationError::invalid_format(
                "impact",
                format!("'{}' is not one of '+' or '-'", other),
            )),
        }
    }

    /// Returns the opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Impact::Maximize => Impact::Minimize,
            Impact::Minimize => Impact::Maximize,
        }
    }

    /// Returns the compact marker (`+` or `-`).
    pub fn symbol(&self) -> char {
        match self {
            Impact::Maximize => '+',
            Impact::Minimize => '-',
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Impact::Maximize => "Maximize",
            Impact::Minimize => "Minimize",
        }
    }

    /// Returns true if higher values are better.
    pub fn is_benefit(&self) -> bool {
        matches!(self, Impact::Maximize)
    }
}

impl FromStr for Impact {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Impact::parse(s)
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

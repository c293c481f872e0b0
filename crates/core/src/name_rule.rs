//! Configurable validation rule for cat names.
//!
//! Empty names have always been accepted by the record service and the
//! editor, so [`NameRule::AllowEmpty`] is the default. Deployments that want
//! the stricter behaviour opt in with `require-non-empty`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Accepted spellings for [`NameRule`] when parsed from configuration.
pub const VALID_NAME_RULES: &[&str] = &["allow-empty", "require-non-empty"];

/// Whether an empty `name` is accepted on create and update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameRule {
    #[default]
    AllowEmpty,
    RequireNonEmpty,
}

impl NameRule {
    /// Returns `true` if names must be validated before they are stored.
    pub fn requires_name(self) -> bool {
        matches!(self, NameRule::RequireNonEmpty)
    }
}

impl FromStr for NameRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "allow-empty" => Ok(NameRule::AllowEmpty),
            "require-non-empty" => Ok(NameRule::RequireNonEmpty),
            other => Err(CoreError::Validation(format!(
                "Invalid name rule '{other}'. Must be one of: {}",
                VALID_NAME_RULES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for NameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameRule::AllowEmpty => "allow-empty",
            NameRule::RequireNonEmpty => "require-non-empty",
        };
        f.write_str(s)
    }
}

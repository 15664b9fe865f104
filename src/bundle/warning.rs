//! Bundler warnings and the filter deciding which of them reach the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WarningCode {
    /// An import is present but nothing from it is used
    UnusedExternalImport,
    /// An import could not be resolved and was treated as external
    UnresolvedImport,
    Other(String),
}

impl WarningCode {
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::UnusedExternalImport => "UNUSED_EXTERNAL_IMPORT",
            WarningCode::UnresolvedImport => "UNRESOLVED_IMPORT",
            WarningCode::Other(code) => code,
        }
    }
}

impl From<String> for WarningCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "UNUSED_EXTERNAL_IMPORT" => WarningCode::UnusedExternalImport,
            "UNRESOLVED_IMPORT" => WarningCode::UnresolvedImport,
            _ => WarningCode::Other(code),
        }
    }
}

impl From<WarningCode> for String {
    fn from(code: WarningCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Suppresses warnings by code and surfaces the rest unaltered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningFilter {
    pub suppress: Vec<WarningCode>,
}

impl Default for WarningFilter {
    fn default() -> Self {
        Self {
            suppress: vec![
                WarningCode::UnusedExternalImport,
                WarningCode::UnresolvedImport,
            ],
        }
    }
}

impl WarningFilter {
    /// A filter that lets every warning through
    pub fn surface_all() -> Self {
        Self {
            suppress: Vec::new(),
        }
    }

    pub fn is_suppressed(&self, warning: &Warning) -> bool {
        self.suppress.contains(&warning.code)
    }

    /// Returns the warning if it should be shown
    pub fn filter<'a>(&self, warning: &'a Warning) -> Option<&'a Warning> {
        (!self.is_suppressed(warning)).then_some(warning)
    }

    /// Log the warning's message if it passes the filter
    pub fn on_warn(&self, warning: &Warning) {
        match self.filter(warning) {
            Some(shown) => warn!("{}", shown.message),
            None => debug!("Suppressed {} warning", warning.code),
        }
    }
}

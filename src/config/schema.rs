use crate::extract::{Descent, DEFAULT_TYPE_NAME};
use crate::pipeline::FailurePolicy;
use crate::report::ReportFormat;
use serde::Deserialize;
use std::fmt;

/// Extraction settings, as read from `span-extract.toml`.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Exact display name of the declared type to collect.
    pub type_name: String,
    pub on_error: FailurePolicy,
    pub descent: Descent,
    pub format: ReportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            type_name: DEFAULT_TYPE_NAME.to_string(),
            on_error: FailurePolicy::default(),
            descent: Descent::default(),
            format: ReportFormat::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.type_name.is_empty() {
            issues.push(ValidationIssue::EmptyTypeName);
        } else if self.type_name.trim() != self.type_name {
            issues.push(ValidationIssue::PaddedTypeName {
                value: self.type_name.clone(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTypeName,
    PaddedTypeName { value: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTypeName => write!(f, "type_name must not be empty"),
            ValidationIssue::PaddedTypeName { value } => {
                write!(f, "type_name '{value}' has leading or trailing whitespace")
            }
        }
    }
}

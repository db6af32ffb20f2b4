//! Creation Form Validation
//!
//! The add screen only submits when the trimmed inputs are non-empty.
//! A rejected submission is dropped quietly; the shell shows nothing.

use serde::{Deserialize, Serialize};

/// Shown by the shell after a todo is added
pub const SUCCESS_MESSAGE: &str = "Todo Added Successfully.";

/// Which fields the form insists on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormPolicy {
    /// Refuse submissions with a blank description
    pub require_description: bool,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self {
            require_description: true,
        }
    }
}

/// Why a submission was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormRejection {
    #[error("title is empty")]
    EmptyTitle,
    #[error("description is empty")]
    EmptyDescription,
}

/// Raw values typed into the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TodoForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Check the form against `policy`
    ///
    /// Only the check trims; the stored values are kept as typed.
    pub fn validate(&self, policy: FormPolicy) -> Result<(), FormRejection> {
        if self.title.trim().is_empty() {
            return Err(FormRejection::EmptyTitle);
        }
        if policy.require_description && self.description.trim().is_empty() {
            return Err(FormRejection::EmptyDescription);
        }
        Ok(())
    }
}

//! Per-field pass/fail verdicts.

use serde::{Deserialize, Serialize};

use noor_model::{Field, ValidationError};

/// Outcome of one field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub field: Field,
    pub passed: bool,
    /// Empty when the rule passed.
    pub reason: String,
}

impl ValidationVerdict {
    pub fn pass(field: Field) -> Self {
        Self {
            field,
            passed: true,
            reason: String::new(),
        }
    }

    pub fn fail(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            passed: false,
            reason: reason.into(),
        }
    }

    /// Verdict for the result of a rule function.
    pub fn of<T>(field: Field, result: &Result<T, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::pass(field),
            Err(err) => Self::fail(err.field, err.reason.clone()),
        }
    }

    pub fn error(&self) -> Option<ValidationError> {
        (!self.passed).then(|| ValidationError::new(self.field, self.reason.clone()))
    }
}

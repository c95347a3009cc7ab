use serde::{Deserialize, Serialize};

use crate::form::{validate, FormAccumulator};

use super::AsyncFailure;

/// Format a payload field must satisfy before the backend looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// Any non-blank text.
    Text,
    Phone,
    Otp,
    Aadhaar,
}

impl FieldFormat {
    /// Canonical form of `raw`, or `None` when it does not match.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            FieldFormat::Text => validate::is_non_blank(raw).then(|| raw.trim().to_string()),
            FieldFormat::Phone => validate::is_phone(raw).then(|| raw.to_string()),
            FieldFormat::Otp => validate::is_otp(raw).then(|| raw.to_string()),
            FieldFormat::Aadhaar => validate::normalize_aadhaar(raw),
        }
    }
}

/// Deterministic acceptance rule of a simulated backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AcceptRule {
    /// Every request succeeds.
    AcceptAll,
    /// `field` must be present and well-formed.
    Format { field: String, format: FieldFormat },
    /// `field` must be well-formed and equal `expected` after normalization.
    ExactMatch {
        field: String,
        format: FieldFormat,
        expected: String,
    },
}

impl AcceptRule {
    pub fn format(field: impl Into<String>, format: FieldFormat) -> Self {
        AcceptRule::Format {
            field: field.into(),
            format,
        }
    }

    pub fn exact_match(
        field: impl Into<String>,
        format: FieldFormat,
        expected: impl Into<String>,
    ) -> Self {
        AcceptRule::ExactMatch {
            field: field.into(),
            format,
            expected: expected.into(),
        }
    }

    pub fn evaluate(&self, payload: &FormAccumulator) -> Result<(), AsyncFailure> {
        match self {
            AcceptRule::AcceptAll => Ok(()),
            AcceptRule::Format { field, format } => {
                Self::normalized(payload, field, *format).map(|_| ())
            }
            AcceptRule::ExactMatch {
                field,
                format,
                expected,
            } => {
                let value = Self::normalized(payload, field, *format)?;
                let expected = format.normalize(expected).unwrap_or_else(|| expected.clone());
                if value == expected {
                    Ok(())
                } else {
                    Err(AsyncFailure::RejectedByBackend)
                }
            }
        }
    }

    fn normalized(
        payload: &FormAccumulator,
        field: &str,
        format: FieldFormat,
    ) -> Result<String, AsyncFailure> {
        payload
            .text(field)
            .and_then(|raw| format.normalize(raw))
            .ok_or(AsyncFailure::InvalidFormat)
    }
}

//! Record validation errors and shared field checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validation failure for a record about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// A currency or rate field is negative or not finite.
    InvalidAmount {
        entity: &'static str,
        field: &'static str,
        value: f64,
    },
    /// An address does not look like `local@domain.tld`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} is required")
            }
            Self::InvalidAmount {
                entity,
                field,
                value,
            } => write!(
                f,
                "{entity}.{field} must be a non-negative amount, got {value}"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `value` has the basic `local@domain.tld` shape.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE_RE.is_match(value)
}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_amount(
    entity: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount {
            entity,
            field,
            value,
        });
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    if !is_email_shaped(value) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_email_shaped, require_amount, require_text, ValidationError};

    #[test]
    fn email_shape_accepts_plain_addresses_only() {
        assert!(is_email_shaped("jporteous@uslegalteam.com"));
        assert!(!is_email_shaped("jporteous@uslegalteam"));
        assert!(!is_email_shaped("j porteous@uslegalteam.com"));
        assert!(!is_email_shaped(""));
    }

    #[test]
    fn amount_rejects_negative_and_nan() {
        assert!(require_amount("offer", "amount", 0.0).is_ok());
        assert!(matches!(
            require_amount("offer", "amount", -1.0),
            Err(ValidationError::InvalidAmount { .. })
        ));
        assert!(require_amount("offer", "amount", f64::NAN).is_err());
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let err = require_text("task", "title", "   ").unwrap_err();
        assert_eq!(err.to_string(), "task.title is required");
    }
}

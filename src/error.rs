//! Error types for card classification and checksum validation.

use std::fmt;

/// Errors returned by classification and checksum validation.
///
/// Both kinds are terminal for the call: there is no partial result and
/// nothing to retry. Callers usually turn them straight into a form
/// validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// No issuer pattern matched the card number.
    Unsupported,

    /// The card number is too short or its check digit does not match.
    Invalid,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => {
                write!(f, "unsupported card type - check the card number prefix")
            }
            Self::Invalid => {
                write!(f, "invalid card number - please verify the digits")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error returned when a card type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardTypeError {
    name: String,
}

impl ParseCardTypeError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseCardTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown card type '{}'", self.name.escape_default())
    }
}

impl std::error::Error for ParseCardTypeError {}

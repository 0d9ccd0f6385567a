//! Classification and checksum entry points.
//!
//! `classify` and `validate_checksum` are independent: a checkout form
//! typically calls `classify` with `suggest = true` on every keystroke to
//! pick a card icon, and `validate_checksum` once the number is complete.
//! `validate` runs strict classification followed by the checksum.

use crate::card::{CardNumber, CardType, ValidatedCard};
use crate::detect::Classifier;
use crate::error::ValidationError;
use crate::luhn::{self, MIN_CHECKSUM_DIGITS};

/// Classifies a raw card number against the primary issuer scan.
///
/// Non-digit characters are ignored. With `suggest` set, a bare issuer
/// prefix is enough; otherwise the type's full length rule applies.
///
/// # Example
///
/// ```
/// use cardcheck::{classify, CardType, ValidationError};
///
/// assert_eq!(classify("4111 1111 1111 1111", false), Ok(CardType::Visa));
/// assert_eq!(classify("4", true), Ok(CardType::Visa));
/// assert_eq!(classify("4", false), Err(ValidationError::Unsupported));
/// ```
#[inline]
pub fn classify(input: &str, suggest: bool) -> Result<CardType, ValidationError> {
    Classifier::new().suggest(suggest).classify(input)
}

/// Verifies the check digit of a raw card number.
///
/// Fails with `Invalid` if fewer than 9 digits remain after stripping
/// formatting, or if the final digit does not match.
///
/// # Example
///
/// ```
/// use cardcheck::{validate_checksum, ValidationError};
///
/// assert_eq!(validate_checksum("5500 0000 0000 0004"), Ok(()));
/// assert_eq!(validate_checksum("5500 0000 0000 0005"), Err(ValidationError::Invalid));
/// assert_eq!(validate_checksum("1234"), Err(ValidationError::Invalid));
/// ```
pub fn validate_checksum(input: &str) -> Result<(), ValidationError> {
    validate_number_checksum(&CardNumber::parse(input))
}

/// Verifies the check digit of an already normalized card number.
pub fn validate_number_checksum(number: &CardNumber) -> Result<(), ValidationError> {
    if number.len() < MIN_CHECKSUM_DIGITS {
        return Err(ValidationError::Invalid);
    }

    if !luhn::validate(number.digits()) {
        return Err(ValidationError::Invalid);
    }

    Ok(())
}

/// Classifies (strict, primary scan) and then verifies the checksum.
///
/// # Example
///
/// ```
/// use cardcheck::{validate, CardType, ValidationError};
///
/// let card = validate("3400-000000-00009").unwrap();
/// assert_eq!(card.card_type(), CardType::AmericanExpress);
/// assert_eq!(card.last_four(), "0009");
///
/// assert_eq!(validate("0000 0000 0000 0000").unwrap_err(), ValidationError::Unsupported);
/// assert_eq!(validate("4111 1111 1111 1112").unwrap_err(), ValidationError::Invalid);
/// ```
pub fn validate(input: &str) -> Result<ValidatedCard, ValidationError> {
    validate_with(input, Classifier::new())
}

/// Like [`validate`], with explicit classification settings.
///
/// Classification always runs before the checksum, so an input that matches
/// no pattern reports `Unsupported` even if its check digit is also wrong.
pub fn validate_with(
    input: &str,
    classifier: Classifier,
) -> Result<ValidatedCard, ValidationError> {
    let number = CardNumber::parse(input);
    let card_type = classifier.classify_number(&number)?;
    validate_number_checksum(&number)?;
    Ok(ValidatedCard::new(card_type, number))
}

/// Quick check: true if `validate` would succeed.
///
/// # Example
///
/// ```
/// use cardcheck::is_valid;
///
/// assert!(is_valid("4111111111111111"));
/// assert!(!is_valid("4111111111111112"));
/// assert!(!is_valid(""));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// True if the input has at least 9 digits and a matching check digit.
///
/// Ignores the issuer patterns entirely.
#[inline]
pub fn passes_checksum(input: &str) -> bool {
    validate_checksum(input).is_ok()
}

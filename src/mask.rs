//! Masking for display and logging.
//!
//! Only the last four digits are ever shown. Masked output groups the hidden
//! digits in fours and always separates the visible last four:
//! `****-****-****-1111`.

use crate::card::{CardNumber, ValidatedCard};

/// Masks a validated card.
///
/// # Example
///
/// ```
/// use cardcheck::{validate, mask};
///
/// let card = validate("4111-1111-1111-1111").unwrap();
/// assert_eq!(mask::mask_card(&card), "****-****-****-1111");
/// ```
#[inline]
pub fn mask_card(card: &ValidatedCard) -> String {
    mask_digits(card.digits())
}

/// Masks a raw card number string, ignoring formatting characters.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_string;
///
/// assert_eq!(mask_string("3400 000000 00009"), "****-****-***-0009");
/// assert_eq!(mask_string("123"), "***");
/// ```
#[inline]
pub fn mask_string(input: &str) -> String {
    CardNumber::parse(input).masked()
}

/// Masks digit values. Four or fewer digits are hidden entirely.
pub(crate) fn mask_digits(digits: &[u8]) -> String {
    let len = digits.len();
    if len <= 4 {
        return "*".repeat(len);
    }

    let hidden = len - 4;
    let mut result = String::with_capacity(len + len / 4 + 1);

    for i in 0..hidden {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    result.push('-');
    result.extend(digits[hidden..].iter().map(|&d| (b'0' + d) as char));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_string("4111111111111111"), "****-****-****-1111");
        assert_eq!(mask_string("4111 1111 1111 1111"), "****-****-****-1111");
    }

    #[test]
    fn test_mask_15_digits() {
        assert_eq!(mask_string("378282246310005"), "****-****-***-0005");
    }

    #[test]
    fn test_mask_short_input() {
        assert_eq!(mask_string(""), "");
        assert_eq!(mask_string("1234"), "****");
        assert_eq!(mask_string("12345"), "*-2345");
    }

    #[test]
    fn test_mask_card() {
        let card = crate::validate("5500 0000 0000 0004").unwrap();
        let masked = mask_card(&card);
        assert_eq!(masked, "****-****-****-0004");
        assert!(!masked.contains("5500"));
    }
}

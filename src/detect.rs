//! Card type detection using issuer prefix patterns.
//!
//! Every card type has an issuer prefix (for example `34`/`37` for American
//! Express) and two ways of matching it:
//!
//! - **strict**: the prefix followed by a type-specific number of trailing
//!   digits, anchored to the whole input. Used to accept a number.
//! - **suggest**: the prefix followed by any number of digits, including
//!   none. Used to guess the type while the number is still being typed.
//!
//! Types are tried in [`CardType::ALL`] order and the first match wins.
//!
//! # Issuer scan
//!
//! The default scan ([`IssuerScan::Primary`]) stops after JCB, so Maestro
//! and RuPay numbers are reported as unsupported. Existing checkout clients
//! depend on this. [`IssuerScan::Extended`] tries all eight types.

use std::ops::RangeInclusive;

use crate::card::{CardNumber, CardType};
use crate::error::ValidationError;

/// How strictly the input must match an issuer pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Prefix plus the full trailing-digit requirement.
    #[default]
    Strict,
    /// Prefix only; trailing digits are optional.
    Suggest,
}

/// Which card types a classification tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IssuerScan {
    /// American Express through JCB.
    #[default]
    Primary,
    /// All card types, including Maestro and RuPay.
    Extended,
}

impl IssuerScan {
    /// The card types tried, in priority order.
    #[inline]
    pub fn card_types(&self) -> &'static [CardType] {
        match self {
            Self::Primary => &CardType::ALL[..6],
            Self::Extended => &CardType::ALL,
        }
    }
}

/// Returns the length of the issuer prefix if `digits` starts with one.
///
/// # Example
///
/// ```
/// use cardcheck::detect::issuer_prefix_len;
/// use cardcheck::CardType;
///
/// assert_eq!(issuer_prefix_len(CardType::Jcb, &[3, 5, 2, 8, 0]), Some(5));
/// assert_eq!(issuer_prefix_len(CardType::Jcb, &[3, 5, 2, 8]), None);
/// ```
#[inline]
pub fn issuer_prefix_len(card_type: CardType, digits: &[u8]) -> Option<usize> {
    match card_type {
        CardType::AmericanExpress => match digits {
            [3, 4 | 7, ..] => Some(2),
            _ => None,
        },
        CardType::Visa => match digits {
            [4, ..] => Some(1),
            _ => None,
        },
        CardType::MasterCard => match digits {
            [5, 1..=5, ..] => Some(2),
            _ => None,
        },
        CardType::Discover => match digits {
            [6, 0, 1, 1, ..] | [6, 5, _, _, ..] => Some(4),
            _ => None,
        },
        CardType::DinersClub => match digits {
            [3, 0, 0..=5, ..] | [3, 6 | 8, _, ..] => Some(3),
            _ => None,
        },
        CardType::Jcb => match digits {
            [2, 1, 3, 1, ..] | [1, 8, 0, 0, ..] => Some(4),
            [3, 5, _, _, _, ..] => Some(5),
            _ => None,
        },
        CardType::Maestro => match digits {
            [5, 0, 1, 8, ..]
            | [5, 0, 2, 0, ..]
            | [5, 0, 3, 8, ..]
            | [6, 3, 0, 4, ..]
            | [6, 7, 5, 9, ..]
            | [6, 7, 6, 1 | 3, ..] => Some(4),
            _ => None,
        },
        CardType::RuPay => match digits {
            [6, ..] => Some(1),
            _ => None,
        },
    }
}

/// Number of digits a strict match requires after the issuer prefix.
#[inline]
pub fn strict_trailing_digits(card_type: CardType) -> RangeInclusive<usize> {
    match card_type {
        CardType::AmericanExpress => 5..=usize::MAX,
        CardType::Visa => 6..=usize::MAX,
        CardType::MasterCard => 5..=usize::MAX,
        CardType::Discover => 3..=usize::MAX,
        CardType::DinersClub => 4..=usize::MAX,
        CardType::Jcb => 3..=usize::MAX,
        CardType::Maestro => 8..=15,
        CardType::RuPay => 15..=15,
    }
}

/// Returns true if the digits match the card type's pattern in `mode`.
#[inline]
pub fn matches(card_type: CardType, digits: &[u8], mode: MatchMode) -> bool {
    let Some(prefix_len) = issuer_prefix_len(card_type, digits) else {
        return false;
    };
    match mode {
        MatchMode::Suggest => true,
        MatchMode::Strict => {
            strict_trailing_digits(card_type).contains(&(digits.len() - prefix_len))
        }
    }
}

/// Detects the card type of a digit sequence.
///
/// Returns the first type in `scan` whose pattern matches, or `None`.
///
/// # Example
///
/// ```
/// use cardcheck::detect::{detect_card_type, IssuerScan, MatchMode};
/// use cardcheck::CardType;
///
/// let visa = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(
///     detect_card_type(&visa, MatchMode::Strict, IssuerScan::Primary),
///     Some(CardType::Visa)
/// );
///
/// // Maestro is only tried by the extended scan
/// let maestro = [6, 7, 5, 9, 6, 4, 9, 8, 2, 6, 4, 3, 8, 4, 5, 3];
/// assert_eq!(detect_card_type(&maestro, MatchMode::Strict, IssuerScan::Primary), None);
/// assert_eq!(
///     detect_card_type(&maestro, MatchMode::Strict, IssuerScan::Extended),
///     Some(CardType::Maestro)
/// );
/// ```
#[inline]
pub fn detect_card_type(digits: &[u8], mode: MatchMode, scan: IssuerScan) -> Option<CardType> {
    scan.card_types()
        .iter()
        .copied()
        .find(|&card_type| matches(card_type, digits, mode))
}

/// Classification settings: match mode plus issuer scan.
///
/// # Example
///
/// ```
/// use cardcheck::detect::{Classifier, IssuerScan};
/// use cardcheck::{CardType, ValidationError};
///
/// let classifier = Classifier::new().suggest(true);
/// assert_eq!(classifier.classify("4"), Ok(CardType::Visa));
///
/// let extended = Classifier::new().scan(IssuerScan::Extended);
/// assert_eq!(extended.classify("6073 8497 0000 4947"), Ok(CardType::RuPay));
/// assert_eq!(
///     Classifier::new().classify("6073 8497 0000 4947"),
///     Err(ValidationError::Unsupported)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Classifier {
    mode: MatchMode,
    scan: IssuerScan,
}

impl Classifier {
    /// Strict matching over the primary scan.
    #[inline]
    pub const fn new() -> Self {
        Self {
            mode: MatchMode::Strict,
            scan: IssuerScan::Primary,
        }
    }

    /// Sets the match mode.
    #[inline]
    pub const fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switches between suggestion and strict matching.
    #[inline]
    pub const fn suggest(self, suggest: bool) -> Self {
        self.mode(if suggest {
            MatchMode::Suggest
        } else {
            MatchMode::Strict
        })
    }

    /// Sets the issuer scan.
    #[inline]
    pub const fn scan(mut self, scan: IssuerScan) -> Self {
        self.scan = scan;
        self
    }

    /// The configured match mode.
    #[inline]
    pub const fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// The configured issuer scan.
    #[inline]
    pub const fn issuer_scan(&self) -> IssuerScan {
        self.scan
    }

    /// Classifies raw input, ignoring any non-digit characters.
    pub fn classify(&self, input: &str) -> Result<CardType, ValidationError> {
        self.classify_number(&CardNumber::parse(input))
    }

    /// Classifies an already normalized card number.
    pub fn classify_number(&self, number: &CardNumber) -> Result<CardType, ValidationError> {
        detect_card_type(number.digits(), self.mode, self.scan).ok_or(ValidationError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    fn strict(s: &str) -> Option<CardType> {
        detect_card_type(&digits(s), MatchMode::Strict, IssuerScan::Extended)
    }

    fn suggest(s: &str) -> Option<CardType> {
        detect_card_type(&digits(s), MatchMode::Suggest, IssuerScan::Extended)
    }

    #[test]
    fn test_amex_detection() {
        assert_eq!(strict("340000000000009"), Some(CardType::AmericanExpress));
        assert_eq!(strict("378282246310005"), Some(CardType::AmericanExpress));
        // 2 prefix + 5 trailing is the shortest strict match
        assert_eq!(strict("3400000"), Some(CardType::AmericanExpress));
        assert_eq!(strict("340000"), None);
    }

    #[test]
    fn test_visa_detection() {
        assert_eq!(strict("4111111111111111"), Some(CardType::Visa));
        assert_eq!(strict("4222222222222"), Some(CardType::Visa));
        assert_eq!(strict("4000000"), Some(CardType::Visa));
        assert_eq!(strict("400000"), None);
    }

    #[test]
    fn test_mastercard_detection() {
        assert_eq!(strict("5500000000000004"), Some(CardType::MasterCard));
        assert_eq!(strict("5105105105105100"), Some(CardType::MasterCard));
        assert_eq!(strict("5600000000000000"), None);
        // 2-series ranges are not part of the pattern set
        assert_eq!(strict("2223000048400011"), None);
    }

    #[test]
    fn test_discover_detection() {
        assert_eq!(strict("6011111111111117"), Some(CardType::Discover));
        assert_eq!(strict("6500000000000002"), Some(CardType::Discover));
        assert_eq!(strict("6011000"), Some(CardType::Discover));
        assert_eq!(strict("601100"), None);
    }

    #[test]
    fn test_diners_club_detection() {
        assert_eq!(strict("30569309025904"), Some(CardType::DinersClub));
        assert_eq!(strict("38520000023237"), Some(CardType::DinersClub));
        assert_eq!(strict("36700102000000"), Some(CardType::DinersClub));
        assert_eq!(strict("30600000000000"), None);
    }

    #[test]
    fn test_jcb_detection() {
        assert_eq!(strict("3530111333300000"), Some(CardType::Jcb));
        assert_eq!(strict("3566002020360505"), Some(CardType::Jcb));
        assert_eq!(strict("2131000000000008"), Some(CardType::Jcb));
        assert_eq!(strict("1800000000000000"), Some(CardType::Jcb));
        assert_eq!(strict("3528000"), None);
        assert_eq!(strict("35280000"), Some(CardType::Jcb));
    }

    #[test]
    fn test_maestro_detection() {
        assert_eq!(strict("6759649826438453"), Some(CardType::Maestro));
        assert_eq!(strict("501800000009"), Some(CardType::Maestro));
        assert_eq!(strict("6304000000000000000"), Some(CardType::Maestro));
        // 4 prefix + 8..=15 trailing
        assert_eq!(strict("50180000000"), None);
        assert_eq!(strict("50180000000000000000"), None);
    }

    #[test]
    fn test_rupay_detection() {
        assert_eq!(strict("6073849700004947"), Some(CardType::RuPay));
        assert_eq!(strict("607384970000494"), None);
        assert_eq!(strict("60738497000049470"), None);
    }

    #[test]
    fn test_priority_order() {
        // 6011 is both Discover and RuPay shaped; Discover comes first
        assert_eq!(strict("6011000990139424"), Some(CardType::Discover));
        // 6304 at 16 digits is both Maestro and RuPay shaped; Maestro first
        assert_eq!(strict("6304000000000000"), Some(CardType::Maestro));
    }

    #[test]
    fn test_primary_scan_skips_maestro_and_rupay() {
        let primary =
            |s: &str| detect_card_type(&digits(s), MatchMode::Strict, IssuerScan::Primary);
        assert_eq!(primary("6759649826438453"), None);
        assert_eq!(primary("6073849700004947"), None);
        assert_eq!(primary("4111111111111111"), Some(CardType::Visa));
        assert_eq!(IssuerScan::Primary.card_types().len(), 6);
        assert_eq!(IssuerScan::Extended.card_types().len(), 8);
    }

    #[test]
    fn test_suggest_matches_bare_prefix() {
        assert_eq!(suggest("4"), Some(CardType::Visa));
        assert_eq!(suggest("34"), Some(CardType::AmericanExpress));
        assert_eq!(suggest("51"), Some(CardType::MasterCard));
        assert_eq!(suggest("6011"), Some(CardType::Discover));
        assert_eq!(suggest("305"), Some(CardType::DinersClub));
        assert_eq!(suggest("35000"), Some(CardType::Jcb));
        assert_eq!(suggest("5018"), Some(CardType::Maestro));
        assert_eq!(suggest("6"), Some(CardType::RuPay));
    }

    #[test]
    fn test_suggest_needs_complete_prefix() {
        assert_eq!(suggest("3"), None);
        assert_eq!(suggest("5"), None);
        assert_eq!(suggest("35"), None);
        assert_eq!(suggest(""), None);
    }

    #[test]
    fn test_suggest_ignores_length_limits() {
        // far beyond the strict Maestro maximum
        assert_eq!(suggest("5018000000000000000000000"), Some(CardType::Maestro));
        assert_eq!(strict("5018000000000000000000000"), None);
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(strict("0000000000000000"), None);
        assert_eq!(strict("9000000000000000"), None);
        assert_eq!(strict(""), None);
    }

    #[test]
    fn test_classifier_builder() {
        let classifier = Classifier::new()
            .suggest(true)
            .scan(IssuerScan::Extended);
        assert_eq!(classifier.match_mode(), MatchMode::Suggest);
        assert_eq!(classifier.issuer_scan(), IssuerScan::Extended);
        assert_eq!(Classifier::default(), Classifier::new());
    }

    #[test]
    fn test_classifier_strips_formatting() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.classify("4111 1111-1111 1111"),
            classifier.classify("4111111111111111")
        );
        assert_eq!(classifier.classify(""), Err(ValidationError::Unsupported));
    }
}

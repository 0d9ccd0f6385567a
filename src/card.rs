//! Core card types.
//!
//! This module provides the `CardType` enum naming the supported issuer
//! networks, the `CardNumber` digit buffer produced by normalizing raw input,
//! and the `ValidatedCard` returned when both classification and the checksum
//! succeed.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use crate::error::ParseCardTypeError;

/// Supported card issuer networks.
///
/// The set is closed. Variants carry no numeric value; classification order
/// is given by [`CardType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    /// American Express - prefix 34, 37
    AmericanExpress,
    /// Visa - prefix 4
    Visa,
    /// Mastercard - prefix 51-55
    MasterCard,
    /// Discover - prefix 6011, 65
    Discover,
    /// Diners Club - prefix 300-305, 36, 38
    DinersClub,
    /// JCB - prefix 2131, 1800, 35
    Jcb,
    /// Maestro - prefix 5018, 5020, 5038, 6304, 6759, 6761, 6763
    Maestro,
    /// RuPay - prefix 6, exactly 16 digits
    RuPay,
}

impl CardType {
    /// Every card type, in classification priority order.
    pub const ALL: [CardType; 8] = [
        CardType::AmericanExpress,
        CardType::Visa,
        CardType::MasterCard,
        CardType::Discover,
        CardType::DinersClub,
        CardType::Jcb,
        CardType::Maestro,
        CardType::RuPay,
    ];

    /// Returns the display name for the card type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AmericanExpress => "American Express",
            Self::Visa => "Visa",
            Self::MasterCard => "Mastercard",
            Self::Discover => "Discover",
            Self::DinersClub => "Diner's Club",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::RuPay => "Rupay",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardType {
    type Err = ParseCardTypeError;

    /// Parses a display name (case-insensitive) or a common short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "american express" | "americanexpress" | "amex" => Ok(Self::AmericanExpress),
            "visa" => Ok(Self::Visa),
            "mastercard" | "master card" | "mc" => Ok(Self::MasterCard),
            "discover" => Ok(Self::Discover),
            "diner's club" | "diners club" | "dinersclub" | "diners" => Ok(Self::DinersClub),
            "jcb" => Ok(Self::Jcb),
            "maestro" => Ok(Self::Maestro),
            "rupay" => Ok(Self::RuPay),
            _ => Err(ParseCardTypeError::new(s)),
        }
    }
}

/// The digits of a card number with all formatting removed.
///
/// Digits are stored as values 0-9, not ASCII. The buffer is zeroed when the
/// value is dropped and `Debug` only shows the masked form.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CardNumber {
    digits: Vec<u8>,
}

impl CardNumber {
    /// Normalizes raw input by keeping only its ASCII digits.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::CardNumber;
    ///
    /// let number = CardNumber::parse("4111 1111-1111 1111");
    /// assert_eq!(number.len(), 16);
    /// assert_eq!(number.last_four(), "1111");
    /// ```
    pub fn parse(input: &str) -> Self {
        let digits = input
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        Self { digits }
    }

    /// Builds a card number from digit values.
    ///
    /// Returns `None` if any value is greater than 9.
    pub fn from_digits(digits: &[u8]) -> Option<Self> {
        if digits.iter().any(|&d| d > 9) {
            return None;
        }
        Some(Self {
            digits: digits.to_vec(),
        })
    }

    /// Returns the digit values.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True if the input contained no digits at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns the last four digits, or all of them for shorter numbers.
    pub fn last_four(&self) -> String {
        let start = self.digits.len().saturating_sub(4);
        to_string(&self.digits[start..])
    }

    /// Returns the full number as a digit string.
    ///
    /// # Security Warning
    ///
    /// Never log the result. Use `masked()` for display.
    pub fn number(&self) -> String {
        to_string(&self.digits)
    }

    /// Returns the number masked down to its last four digits.
    pub fn masked(&self) -> String {
        crate::mask::mask_digits(&self.digits)
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl Drop for CardNumber {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// A card number that matched an issuer pattern and passed the checksum.
#[derive(Clone)]
pub struct ValidatedCard {
    card_type: CardType,
    number: CardNumber,
}

impl ValidatedCard {
    /// Internal constructor. Use `validate()` to create instances.
    #[inline]
    pub(crate) fn new(card_type: CardType, number: CardNumber) -> Self {
        Self { card_type, number }
    }

    /// Returns the detected card type.
    #[inline]
    pub const fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub fn length(&self) -> usize {
        self.number.len()
    }

    /// Returns the last four digits. Safe to display.
    #[inline]
    pub fn last_four(&self) -> String {
        self.number.last_four()
    }

    /// Returns the full card number as a digit string.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Prefer `masked()` for display.
    #[inline]
    pub fn number(&self) -> String {
        self.number.number()
    }

    /// Returns the masked card number, e.g. `****-****-****-1111`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    #[inline]
    pub(crate) fn digits(&self) -> &[u8] {
        self.number.digits()
    }
}

impl fmt::Debug for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCard")
            .field("card_type", &self.card_type)
            .field("number", &self.masked())
            .field("length", &self.length())
            .finish()
    }
}

impl fmt::Display for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.card_type, self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_names() {
        assert_eq!(CardType::AmericanExpress.name(), "American Express");
        assert_eq!(CardType::DinersClub.name(), "Diner's Club");
        assert_eq!(CardType::RuPay.to_string(), "Rupay");
    }

    #[test]
    fn test_card_type_from_name_round_trips() {
        for card_type in CardType::ALL {
            assert_eq!(card_type.name().parse::<CardType>(), Ok(card_type));
            assert_eq!(
                card_type.name().to_uppercase().parse::<CardType>(),
                Ok(card_type)
            );
        }
    }

    #[test]
    fn test_card_type_aliases() {
        assert_eq!("amex".parse::<CardType>(), Ok(CardType::AmericanExpress));
        assert_eq!("Diners".parse::<CardType>(), Ok(CardType::DinersClub));
        assert_eq!(" mc ".parse::<CardType>(), Ok(CardType::MasterCard));
        assert!("unionpay".parse::<CardType>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(CardType::ALL[0], CardType::AmericanExpress);
        assert_eq!(CardType::ALL[5], CardType::Jcb);
        assert_eq!(CardType::ALL[7], CardType::RuPay);
    }

    #[test]
    fn test_card_number_parse_strips_formatting() {
        let number = CardNumber::parse(" 4111-1111 1111.1111 ");
        assert_eq!(number.number(), "4111111111111111");
        assert_eq!(number, CardNumber::parse("4111111111111111"));
    }

    #[test]
    fn test_card_number_empty() {
        assert!(CardNumber::parse("").is_empty());
        assert!(CardNumber::parse(" - ").is_empty());
        assert_eq!(CardNumber::parse("").last_four(), "");
    }

    #[test]
    fn test_card_number_from_digits() {
        let number = CardNumber::from_digits(&[4, 2, 4, 2]).unwrap();
        assert_eq!(number.number(), "4242");
        assert!(CardNumber::from_digits(&[4, 10]).is_none());
    }

    #[test]
    fn test_debug_is_masked() {
        let number = CardNumber::parse("4111111111111111");
        let debug = format!("{:?}", number);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("****"));

        let card = ValidatedCard::new(CardType::Visa, number);
        let debug = format!("{:?}", card);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("Visa"));
    }

    #[test]
    fn test_validated_card_display() {
        let card = ValidatedCard::new(CardType::Visa, CardNumber::parse("4111111111111111"));
        assert_eq!(card.to_string(), "Visa ****-****-****-1111");
        assert_eq!(card.length(), 16);
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardType>();
        assert_send_sync::<CardNumber>();
        assert_send_sync::<ValidatedCard>();
    }
}

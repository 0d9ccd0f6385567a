//! Test card number generation.
//!
//! Generated numbers match their type's strict pattern and carry a correct
//! check digit. They are not connected to real accounts and should only be
//! used in tests and sandboxes.
//!
//! # Example
//!
//! ```
//! use cardcheck::generate::{generate_card_deterministic, CardGenerator};
//! use cardcheck::{is_valid, CardType};
//!
//! let number = generate_card_deterministic(CardType::Visa);
//! assert_eq!(number, "4000000000000002");
//! assert!(is_valid(&number));
//!
//! let number = CardGenerator::new(CardType::MasterCard).length(19).generate_deterministic();
//! assert!(number.starts_with("51"));
//! assert_eq!(number.len(), 19);
//! ```

use crate::luhn;
use crate::CardType;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns the prefix used when generating numbers for a card type.
pub const fn prefix_for(card_type: CardType) -> &'static str {
    match card_type {
        CardType::AmericanExpress => "34",
        CardType::Visa => "4",
        CardType::MasterCard => "51",
        CardType::Discover => "6011",
        CardType::DinersClub => "36",
        CardType::Jcb => "3528",
        CardType::Maestro => "6759",
        CardType::RuPay => "60",
    }
}

/// Returns the length used when generating numbers for a card type.
pub const fn default_length(card_type: CardType) -> usize {
    match card_type {
        CardType::AmericanExpress => 15,
        CardType::DinersClub => 14,
        _ => 16,
    }
}

/// Generates a number for the card type with zero-filled middle digits.
///
/// Always returns the same number for the same type.
pub fn generate_card_deterministic(card_type: CardType) -> String {
    build(prefix_for(card_type), default_length(card_type), || 0)
}

/// Generates a zero-filled number with the given prefix and total length.
///
/// Returns `None` if the prefix leaves no room for the check digit.
///
/// # Example
///
/// ```
/// use cardcheck::generate::generate_deterministic_with_prefix;
///
/// assert_eq!(generate_deterministic_with_prefix("4", 9).as_deref(), Some("400000006"));
/// assert_eq!(generate_deterministic_with_prefix("4111", 4), None);
/// ```
pub fn generate_deterministic_with_prefix(prefix: &str, length: usize) -> Option<String> {
    fits(prefix, length).then(|| build(prefix, length, || 0))
}

/// Generates a random number for the card type.
///
/// Requires the `generate` feature.
///
/// # Example
///
/// ```
/// use cardcheck::generate::generate_card;
/// use cardcheck::CardType;
///
/// let number = generate_card(CardType::AmericanExpress);
/// assert_eq!(number.len(), 15);
/// assert!(cardcheck::is_valid(&number));
/// ```
#[cfg(feature = "generate")]
pub fn generate_card(card_type: CardType) -> String {
    let mut rng = rand::thread_rng();
    generate_card_with_rng(card_type, &mut rng)
}

/// Generates a random number for the card type from the given RNG.
///
/// Use a seeded RNG for reproducible fixtures.
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(card_type: CardType, rng: &mut R) -> String {
    build(prefix_for(card_type), default_length(card_type), || rng.gen_range(0..10))
}

/// Generates a random number with the given prefix and total length.
///
/// Returns `None` if the prefix leaves no room for the check digit.
#[cfg(feature = "generate")]
pub fn generate_with_rng<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> Option<String> {
    fits(prefix, length).then(|| build(prefix, length, || rng.gen_range(0..10)))
}

/// Generates `count` random numbers for the card type.
#[cfg(feature = "generate")]
pub fn generate_cards(card_type: CardType, count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| generate_card_with_rng(card_type, &mut rng))
        .collect()
}

fn prefix_digits(prefix: &str) -> Vec<u8> {
    prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

fn fits(prefix: &str, length: usize) -> bool {
    prefix_digits(prefix).len() < length
}

/// Fills `prefix` up to `length` and appends the check digit. A length too
/// short for the prefix is raised to the prefix length plus one.
fn build(prefix: &str, length: usize, mut fill: impl FnMut() -> u8) -> String {
    let mut digits = prefix_digits(prefix);
    let length = length.max(digits.len() + 1);

    while digits.len() < length - 1 {
        digits.push(fill());
    }
    digits.push(luhn::check_digit(&digits));

    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Builder for generating numbers with a custom prefix or length.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
    length: usize,
}

impl CardGenerator {
    /// Creates a generator using the card type's prefix and length.
    pub fn new(card_type: CardType) -> Self {
        Self {
            prefix: prefix_for(card_type).to_string(),
            length: default_length(card_type),
        }
    }

    /// Creates a 16-digit generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            length: 16,
        }
    }

    /// Sets the total length.
    ///
    /// A length that leaves no room for the check digit is raised to the
    /// prefix length plus one when generating.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Generates a zero-filled number.
    pub fn generate_deterministic(&self) -> String {
        build(&self.prefix, self.length, || 0)
    }

    /// Generates a random number.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        build(&self.prefix, self.length, || rng.gen_range(0..10))
    }

    /// Generates `count` random numbers.
    #[cfg(feature = "generate")]
    pub fn generate_many(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| build(&self.prefix, self.length, || rng.gen_range(0..10)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Classifier, IssuerScan};
    use crate::{is_valid, passes_checksum, validate_with};

    #[test]
    fn test_deterministic_numbers() {
        assert_eq!(generate_card_deterministic(CardType::Visa), "4000000000000002");
        assert_eq!(generate_card_deterministic(CardType::MasterCard), "5100000000000008");
        assert_eq!(generate_card_deterministic(CardType::AmericanExpress), "340000000000009");
        assert_eq!(generate_card_deterministic(CardType::Discover), "6011000000000004");
        assert_eq!(generate_card_deterministic(CardType::DinersClub), "36000000000008");
        assert_eq!(generate_card_deterministic(CardType::Jcb), "3528000000000007");
        assert_eq!(generate_card_deterministic(CardType::Maestro), "6759000000000000");
        assert_eq!(generate_card_deterministic(CardType::RuPay), "6000000000000007");
    }

    #[test]
    fn test_every_type_classifies_as_itself() {
        let extended = Classifier::new().scan(IssuerScan::Extended);
        for card_type in CardType::ALL {
            let number = generate_card_deterministic(card_type);
            let card = validate_with(&number, extended).unwrap();
            assert_eq!(card.card_type(), card_type, "{}", number);
        }
    }

    #[test]
    fn test_primary_types_pass_default_validation() {
        for &card_type in IssuerScan::Primary.card_types() {
            assert!(is_valid(&generate_card_deterministic(card_type)));
        }
    }

    #[test]
    fn test_generator_builder() {
        let number = CardGenerator::new(CardType::Visa).length(19).generate_deterministic();
        assert!(number.starts_with('4'));
        assert_eq!(number.len(), 19);
        assert!(is_valid(&number));

        let number = CardGenerator::with_prefix("999999").generate_deterministic();
        assert_eq!(number.len(), 16);
        assert!(passes_checksum(&number));
    }

    #[test]
    fn test_prefix_too_long() {
        assert_eq!(generate_deterministic_with_prefix("4111", 4), None);
        assert_eq!(generate_deterministic_with_prefix("4111", 3), None);
        assert_eq!(generate_deterministic_with_prefix("", 0), None);
        assert_eq!(
            generate_deterministic_with_prefix("4111", 5).as_deref(),
            Some("41111")
        );
    }

    #[test]
    fn test_builder_raises_short_length() {
        let number = CardGenerator::new(CardType::Discover).length(2).generate_deterministic();
        assert_eq!(number.len(), 5);
        assert!(number.starts_with("6011"));
        assert!(luhn::validate(&number.bytes().map(|b| b - b'0').collect::<Vec<_>>()));

        let number = CardGenerator::with_prefix("4").length(0).generate_deterministic();
        assert_eq!(number, "42");
    }

    #[cfg(feature = "generate")]
    mod random_tests {
        use super::*;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        #[test]
        fn test_generate_card() {
            for card_type in [CardType::Visa, CardType::AmericanExpress, CardType::Jcb] {
                let number = generate_card(card_type);
                assert!(number.starts_with(prefix_for(card_type)));
                assert_eq!(number.len(), default_length(card_type));
                assert!(is_valid(&number));
            }
        }

        #[test]
        fn test_seeded_generation_is_reproducible() {
            let a = generate_card_with_rng(CardType::Discover, &mut StdRng::seed_from_u64(7));
            let b = generate_card_with_rng(CardType::Discover, &mut StdRng::seed_from_u64(7));
            assert_eq!(a, b);
            assert!(is_valid(&a));
        }

        #[test]
        fn test_generate_with_rng_prefix_must_fit() {
            let mut rng = StdRng::seed_from_u64(11);
            let number = generate_with_rng("6304", 19, &mut rng).unwrap();
            assert_eq!(number.len(), 19);
            assert!(passes_checksum(&number));
            assert_eq!(generate_with_rng("6304", 4, &mut rng), None);
        }

        #[test]
        fn test_generate_many_are_mostly_unique() {
            let numbers = CardGenerator::new(CardType::Visa).generate_many(100);
            let unique: std::collections::HashSet<_> = numbers.iter().collect();
            assert!(unique.len() >= 90);
            assert!(numbers.iter().all(|n| is_valid(n)));
        }

        #[test]
        fn test_generate_cards() {
            let numbers = generate_cards(CardType::MasterCard, 10);
            assert_eq!(numbers.len(), 10);
            assert!(numbers.iter().all(|n| n.starts_with("51")));
        }
    }
}

//! Card number formatting utilities.
//!
//! Grouping follows the card type suggested by the digits' prefix:
//!
//! - **American Express**: `XXXX XXXXXX XXXXX`
//! - **Diners Club** (14 digits): `XXXX XXXXXX XXXX`
//! - **Other**: groups of 4 with the remainder at the end
//!
//! # Example
//!
//! ```
//! use cardcheck::format::{format_card_number, format_with_separator};
//!
//! assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_with_separator("4111111111111111", "-"), "4111-1111-1111-1111");
//! ```

use crate::card::CardType;
use crate::detect::{detect_card_type, IssuerScan, MatchMode};

/// Formats a card number with spaces between digit groups.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number with a custom separator.
///
/// # Example
///
/// ```
/// use cardcheck::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4111 1111 1111 1111", "."), "4111.1111.1111.1111");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits = digit_chars(input);
    let groups = grouping_for(suggested_type(&digits), digits.len());
    join_groups(&digits, &groups, separator)
}

/// Formats a partially typed card number.
///
/// Uses the suggestion patterns, so American Express grouping applies as
/// soon as `34` or `37` has been typed.
///
/// # Example
///
/// ```
/// use cardcheck::format::format_partial;
///
/// assert_eq!(format_partial("41111"), "4111 1");
/// assert_eq!(format_partial("3782822"), "3782 822");
/// assert_eq!(format_partial("37828224631"), "3782 822463 1");
/// ```
pub fn format_partial(input: &str) -> String {
    let digits = digit_chars(input);
    let groups = match suggested_type(&digits) {
        Some(CardType::AmericanExpress) => vec![4, 6, 5],
        _ => groups_of_four(digits.len()),
    };
    join_groups(&digits, &groups, " ")
}

/// Strips all formatting from a card number, leaving only digits.
///
/// # Example
///
/// ```
/// use cardcheck::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111 1111-1111 1111"), "4111111111111111");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digit_chars(input: &str) -> Vec<char> {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn suggested_type(digits: &[char]) -> Option<CardType> {
    let values: Vec<u8> = digits.iter().map(|&c| (c as u8) - b'0').collect();
    detect_card_type(&values, MatchMode::Suggest, IssuerScan::Extended)
}

/// Returns the digit grouping pattern for a card type.
fn grouping_for(card_type: Option<CardType>, length: usize) -> Vec<usize> {
    match card_type {
        Some(CardType::AmericanExpress) => vec![4, 6, 5],
        Some(CardType::DinersClub) if length == 14 => vec![4, 6, 4],
        _ => groups_of_four(length),
    }
}

/// Groups of four with any remainder as a shorter final group.
fn groups_of_four(length: usize) -> Vec<usize> {
    let mut groups = vec![4; length / 4];
    if length % 4 != 0 {
        groups.push(length % 4);
    }
    groups
}

/// Writes digits into the given groups. Digits past the last group form one
/// extra trailing group.
fn join_groups(digits: &[char], groups: &[usize], separator: &str) -> String {
    let mut result = String::with_capacity(digits.len() + groups.len() * separator.len());
    let mut rest = digits;

    for &size in groups {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at(size.min(rest.len()));
        if !result.is_empty() {
            result.push_str(separator);
        }
        result.extend(group);
        rest = tail;
    }

    if !rest.is_empty() {
        if !result.is_empty() {
            result.push_str(separator);
        }
        result.extend(rest);
    }

    result
}

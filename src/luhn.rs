//! Check digit arithmetic for card numbers.
//!
//! This is a mod-10 (Luhn) checksum written in check-digit form: the payload
//! (every digit except the last) is summed right to left, doubling every
//! other digit starting with the rightmost payload digit, and the expected
//! check digit is `(sum * 9) % 10`. A number is valid when that value equals
//! its final digit.
//!
//! `(sum * 9) % 10` is the digit that brings `sum` up to a multiple of ten,
//! so the result always agrees with the textbook "total is divisible by 10"
//! test. The check-digit form is kept so the arithmetic matches existing
//! clients digit for digit.

/// Minimum number of digits accepted by the checksum.
pub const MIN_CHECKSUM_DIGITS: usize = 9;

/// Sums a payload right to left, doubling digits at even reversed positions.
///
/// A doubled value above 9 has 9 subtracted before it is added.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::payload_sum;
///
/// // reversed: 1 (doubled -> 2), 2 (kept), 3 (doubled -> 6)
/// assert_eq!(payload_sum(&[3, 2, 1]), 10);
/// ```
#[inline]
pub fn payload_sum(payload: &[u8]) -> u64 {
    let mut sum: u64 = 0;

    for (idx, &digit) in payload.iter().rev().enumerate() {
        let value = digit as u64;
        if idx % 2 == 0 {
            let mut product = value * 2;
            if product > 9 {
                product -= 9;
            }
            sum += product;
        } else {
            sum += value;
        }
    }

    sum
}

/// Computes the check digit for a payload.
///
/// The sum is reduced mod 10 before the multiply, so payloads of any
/// length give the same result as `(sum * 9) % 10` without overflowing.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::check_digit;
///
/// // Visa test card without its check digit
/// let payload = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(check_digit(&payload), 1);
/// ```
#[inline]
pub fn check_digit(payload: &[u8]) -> u8 {
    (((payload_sum(payload) % 10) * 9) % 10) as u8
}

/// Returns true if the final digit matches the check digit of the rest.
///
/// No minimum length is applied here; empty input is never valid.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate;
///
/// assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
/// assert!(!validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    match digits.split_last() {
        Some((&declared, payload)) => check_digit(payload) == declared,
        None => false,
    }
}

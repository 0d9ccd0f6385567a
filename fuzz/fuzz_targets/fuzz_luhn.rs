//! Fuzz target for the check digit arithmetic.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use cardcheck::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().take(64).map(|&b| b % 10).collect();

    let valid = luhn::validate(&digits);

    if let Some((&last, payload)) = digits.split_last() {
        let check = luhn::check_digit(payload);
        assert!(check <= 9, "check digit should be 0-9");
        assert_eq!(valid, check == last, "validate disagrees with check_digit");

        // Appending the computed check digit always validates
        let mut with_check = digits.clone();
        with_check.push(luhn::check_digit(&digits));
        assert!(luhn::validate(&with_check));
    } else {
        assert!(!valid, "empty input should never validate");
    }
});

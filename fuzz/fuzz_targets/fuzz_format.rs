//! Fuzz target for card formatting and masking.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use cardcheck::{format, mask};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = format::format_with_separator(data, "");
    let _ = mask::mask_string(data);

    let digits = format::strip_formatting(data);

    for formatted in [
        format::format_card_number(data),
        format::format_with_separator(data, "-"),
        format::format_partial(data),
    ] {
        assert_eq!(format::strip_formatting(&formatted), digits, "formatting lost digits");
    }
});

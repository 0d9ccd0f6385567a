//! Fuzz target for classification and validation.
//!
//! Tests that nothing panics on arbitrary input and that the combined
//! validation agrees with its two halves.

#![no_main]

use cardcheck::{classify, is_valid, validate, validate_checksum, Classifier, IssuerScan};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let strict = classify(data, false);
    let _ = classify(data, true);
    let checksum = validate_checksum(data);

    let expected = strict.and_then(|card_type| checksum.map(|()| card_type));
    assert_eq!(validate(data).map(|card| card.card_type()), expected);
    assert_eq!(is_valid(data), expected.is_ok());

    let extended = Classifier::new().scan(IssuerScan::Extended);
    if strict.is_ok() {
        assert_eq!(extended.classify(data), strict, "extended scan reordered a primary match");
    }
});

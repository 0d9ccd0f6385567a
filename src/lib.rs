//! # cardcheck
//!
//! Payment card type detection and check digit validation for checkout
//! forms.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{classify, validate_checksum, CardType, ValidationError};
//!
//! // Pick a card icon while the number is being typed
//! assert_eq!(classify("4", true), Ok(CardType::Visa));
//!
//! // Accept or reject the finished number
//! assert_eq!(classify("4111 1111 1111 1111", false), Ok(CardType::Visa));
//! assert_eq!(validate_checksum("4111 1111 1111 1111"), Ok(()));
//! assert_eq!(validate_checksum("4111 1111 1111 1112"), Err(ValidationError::Invalid));
//! ```
//!
//! Or both at once:
//!
//! ```rust
//! use cardcheck::{validate, CardType};
//!
//! let card = validate("5500-0000-0000-0004").unwrap();
//! assert_eq!(card.card_type(), CardType::MasterCard);
//!
//! // Safe for logging - never exposes the full number
//! assert_eq!(card.to_string(), "Mastercard ****-****-****-0004");
//! ```
//!
//! ## Card Types
//!
//! Types are tried in this order; the first match wins.
//!
//! | Type | Prefix | Strict length |
//! |------|--------|---------------|
//! | American Express | 34, 37 | 7+ |
//! | Visa | 4 | 7+ |
//! | Mastercard | 51-55 | 7+ |
//! | Discover | 6011, 65 | 7+ |
//! | Diners Club | 300-305, 36, 38 | 7+ |
//! | JCB | 2131, 1800, 35 | 7+ (8+ for 35) |
//! | Maestro | 5018, 5020, 5038, 6304, 6759, 6761, 6763 | 12-19 |
//! | RuPay | 6 | 16 |
//!
//! Maestro and RuPay are only tried with
//! [`IssuerScan::Extended`](detect::IssuerScan::Extended); see [`detect`].
//!
//! ## Checksum
//!
//! At least 9 digits are required. The check digit is computed from the
//! other digits as described in [`luhn`] and compared with the final digit.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `generate` | Random test number generation |
//! | `parallel` | Rayon-based batch processing |
//! | `serde` | `Serialize`/`Deserialize` for `CardType` |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//!
//! ## Security
//!
//! - Digit buffers are zeroized when dropped
//! - `Debug` and `Display` show masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod detect;
pub mod error;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod validate;

pub use card::{CardNumber, CardType, ValidatedCard};
pub use detect::{Classifier, IssuerScan, MatchMode};
pub use error::{ParseCardTypeError, ValidationError};
pub use validate::{
    classify, is_valid, passes_checksum, validate, validate_checksum, validate_number_checksum,
    validate_with,
};

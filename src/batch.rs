//! Batch validation and classification.
//!
//! Every function returns results in input order. With the `parallel`
//! feature, the `*_parallel` variants spread the work over rayon's global
//! thread pool; the underlying functions are pure, so no coordination is
//! needed beyond collecting the results.

use crate::card::{CardType, ValidatedCard};
use crate::detect::Classifier;
use crate::error::ValidationError;
use crate::validate::validate_with;

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Inputs processed.
    pub total: usize,
    /// Inputs that validated.
    pub valid: usize,
    /// Inputs that matched no issuer pattern.
    pub unsupported: usize,
    /// Inputs that matched a pattern but failed the checksum.
    pub invalid: usize,
}

impl BatchSummary {
    /// Summarizes a slice of validation results.
    pub fn from_results<T>(results: &[Result<T, ValidationError>]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(_) => summary.valid += 1,
                Err(ValidationError::Unsupported) => summary.unsupported += 1,
                Err(ValidationError::Invalid) => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Validates each card number with default settings.
///
/// # Example
///
/// ```
/// use cardcheck::batch::validate_batch;
///
/// let results = validate_batch(&["4111111111111111", "4111111111111112"]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
#[inline]
pub fn validate_batch<S: AsRef<str>>(cards: &[S]) -> Vec<Result<ValidatedCard, ValidationError>> {
    validate_batch_with(cards, Classifier::new())
}

/// Validates each card number with the given classifier.
pub fn validate_batch_with<S: AsRef<str>>(
    cards: &[S],
    classifier: Classifier,
) -> Vec<Result<ValidatedCard, ValidationError>> {
    cards
        .iter()
        .map(|c| validate_with(c.as_ref(), classifier))
        .collect()
}

/// Classifies each card number.
///
/// # Example
///
/// ```
/// use cardcheck::batch::classify_batch;
/// use cardcheck::detect::Classifier;
/// use cardcheck::CardType;
///
/// let types = classify_batch(&["4", "34", "9"], Classifier::new().suggest(true));
/// assert_eq!(types[0], Ok(CardType::Visa));
/// assert_eq!(types[1], Ok(CardType::AmericanExpress));
/// assert!(types[2].is_err());
/// ```
pub fn classify_batch<S: AsRef<str>>(
    cards: &[S],
    classifier: Classifier,
) -> Vec<Result<CardType, ValidationError>> {
    cards.iter().map(|c| classifier.classify(c.as_ref())).collect()
}

/// Counts valid and failed cards without keeping the results.
///
/// Returns `(valid, failed)`.
#[inline]
pub fn count_valid<S: AsRef<str>>(cards: &[S]) -> (usize, usize) {
    let classifier = Classifier::new();
    let valid = cards
        .iter()
        .filter(|c| validate_with(c.as_ref(), classifier).is_ok())
        .count();
    (valid, cards.len() - valid)
}

/// Parallel version of [`validate_batch_with`].
///
/// Requires the `parallel` feature.
#[cfg(feature = "parallel")]
pub fn validate_batch_parallel<S: AsRef<str> + Sync>(
    cards: &[S],
    classifier: Classifier,
) -> Vec<Result<ValidatedCard, ValidationError>> {
    use rayon::prelude::*;
    cards
        .par_iter()
        .map(|c| validate_with(c.as_ref(), classifier))
        .collect()
}

/// Parallel version of [`classify_batch`].
///
/// Requires the `parallel` feature.
#[cfg(feature = "parallel")]
pub fn classify_batch_parallel<S: AsRef<str> + Sync>(
    cards: &[S],
    classifier: Classifier,
) -> Vec<Result<CardType, ValidationError>> {
    use rayon::prelude::*;
    cards
        .par_iter()
        .map(|c| classifier.classify(c.as_ref()))
        .collect()
}

/// Parallel version of [`count_valid`].
///
/// Requires the `parallel` feature.
#[cfg(feature = "parallel")]
pub fn count_valid_parallel<S: AsRef<str> + Sync>(cards: &[S]) -> (usize, usize) {
    use rayon::prelude::*;
    let classifier = Classifier::new();
    let valid = cards
        .par_iter()
        .filter(|c| validate_with(c.as_ref(), classifier).is_ok())
        .count();
    (valid, cards.len() - valid)
}

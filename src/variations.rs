//! Randomized content selection helpers.
//!
//! Small utilities for keeping repeated prompts from sounding canned: pick
//! one of several phrasings, or include a flourish only some of the time.

use rand::Rng;

/// A random item from the slice, or `None` when it is empty.
pub fn random_item<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..items.len());
    items.get(index)
}

/// True with the given probability. Values at or above 1.0 are always
/// true, at or below 0.0 never.
pub fn chance(probability: f64) -> bool {
    probability > rand::rng().random::<f64>()
}

/// The value with the given probability, `None` otherwise.
pub fn chance_value<T>(probability: f64, value: T) -> Option<T> {
    chance(probability).then_some(value)
}

//! Common test utilities and constants for the Shiori crate.
//!
//! Provides randomized inputs (shuffled lists, digit strings, padded numbers)
//! and a few shared fixtures.

use rand::seq::SliceRandom;
use rand::{Rng, distributions::Alphanumeric};

/// How many shuffles ordering tests run before trusting a result.
#[allow(dead_code)]
pub const SHUFFLE_ROUNDS: usize = 16;

/// Library root used by the path-level tests.
#[allow(dead_code)]
pub const LIBRARY_ROOT: &str = "E:/Manga/";

/// Returns a shuffled copy of `items`.
#[allow(dead_code)]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(&mut rand::thread_rng());
    copy
}

/// Random alphanumeric string, handy for unique names.
#[allow(dead_code)]
pub fn random_name(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random decimal number without leading zeros.
#[allow(dead_code)]
pub fn random_number(max: u32) -> u32 {
    rand::thread_rng().gen_range(1..=max)
}

/// Random ASCII digit string of exactly `len` digits. Leading zeros are
/// allowed and values may be far wider than any machine integer.
#[allow(dead_code)]
pub fn random_digits(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(rng.gen_range(b'0'..=b'9')))
        .collect()
}

/// Formats `value` with between zero and `max_zeros` extra leading zeros.
#[allow(dead_code)]
pub fn with_random_zeros(value: &str, max_zeros: usize) -> String {
    let zeros = rand::thread_rng().gen_range(0..=max_zeros);
    format!("{}{}", "0".repeat(zeros), value)
}

/// Sorts many shuffled copies of `expected` with `sort` and checks that each
/// one comes back in the expected order.
#[allow(dead_code)]
pub fn assert_sorts_back<T, F>(expected: &[T], sort: F)
where
    T: Clone + PartialEq + std::fmt::Debug,
    F: Fn(&mut Vec<T>),
{
    for _ in 0..SHUFFLE_ROUNDS {
        let mut items = shuffled(expected);
        sort(&mut items);
        assert_eq!(items, expected);
    }
}

use log::trace;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use super::Comparer;
use crate::types::SortDirection;

/// Memoized tokenizations, keyed by the exact input string.
///
/// A cache belongs to one comparer instance. It is not shared between
/// threads, so a comparer can be moved to another thread but not used from
/// two threads at once.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: RefCell<HashMap<String, Arc<[String]>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Returns the tokens for `value`, tokenizing and caching it on first use.
    fn tokens(&self, value: &str) -> Arc<[String]> {
        if let Some(tokens) = self.entries.borrow().get(value) {
            trace!("Token cache hit for '{}'", value);
            return Arc::clone(tokens);
        }
        let tokens: Arc<[String]> = tokenize(value).into();
        self.entries
            .borrow_mut()
            .insert(value.to_string(), Arc::clone(&tokens));
        tokens
    }
}

/// Splits a string into alternating runs of non-digits and ASCII digits.
/// Empty runs are never produced.
fn tokenize(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;
    for c in value.chars() {
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != in_digits {
            tokens.push(std::mem::take(&mut current));
        }
        in_digits = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Compares two digit tokens by value, without an upper bound on size.
fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn compare_tokens(left: &str, right: &str) -> Ordering {
    if is_number(left) && is_number(right) {
        // "01" and "1" have the same value; fall back to ordinal so the order stays total
        compare_numeric(left, right).then_with(|| left.cmp(right))
    } else {
        left.cmp(right)
    }
}

/// Token-based natural comparison with a sort direction.
///
/// Strings are split into digit and non-digit tokens, which are compared
/// pairwise. Two numeric tokens compare by value; anything else compares
/// ordinally. When every shared token is equal, the string with more tokens
/// sorts first in ascending order. Descending order negates every result.
///
/// Tokenizations are cached per instance in a [`TokenCache`] which is freed
/// with the comparer.
///
/// ```
/// use shiori::compare::{Comparer, NaturalSortComparer};
/// use shiori::types::SortDirection;
///
/// let comparer = NaturalSortComparer::new(SortDirection::Ascending);
/// let mut files = vec!["page10.jpg", "page2.jpg", "page1.jpg"];
/// files.sort_by(|a, b| comparer.compare(*a, *b));
/// assert_eq!(files, ["page1.jpg", "page2.jpg", "page10.jpg"]);
/// ```
#[derive(Debug, Default)]
pub struct NaturalSortComparer {
    direction: SortDirection,
    cache: TokenCache,
}

impl NaturalSortComparer {
    pub fn new(direction: SortDirection) -> Self {
        Self::with_cache(direction, TokenCache::new())
    }

    pub fn ascending() -> Self {
        Self::new(SortDirection::Ascending)
    }

    pub fn descending() -> Self {
        Self::new(SortDirection::Descending)
    }

    /// Creates a comparer that starts from an already filled cache, e.g. one
    /// taken from a previous comparer with [`NaturalSortComparer::into_cache`].
    pub fn with_cache(direction: SortDirection, cache: TokenCache) -> Self {
        Self { direction, cache }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn into_cache(self) -> TokenCache {
        self.cache
    }

    pub fn clear_cache(&self) {
        trace!("Clearing {} cached tokenizations", self.cache.len());
        self.cache.clear();
    }

    fn compare_ascending(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let left = self.cache.tokens(a);
        let right = self.cache.tokens(b);

        for (l, r) in left.iter().zip(right.iter()) {
            if l == r {
                continue;
            }
            return compare_tokens(l, r);
        }

        // All shared tokens tie: more tokens sorts first
        right.len().cmp(&left.len())
    }
}

impl Comparer<str> for NaturalSortComparer {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = self.compare_ascending(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Comparer<String> for NaturalSortComparer {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        Comparer::<str>::compare(self, a.as_str(), b.as_str())
    }
}

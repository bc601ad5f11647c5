//! Natural ordering for strings and chapter numbers.
//!
//! Three comparators live here:
//! - [`StringLogicalComparer`]: character-stream comparison where digit runs
//!   compare by magnitude (`"img2"` before `"img10"`).
//! - [`NaturalSortComparer`]: token-based comparison with an ascending or
//!   descending direction and a per-instance token cache.
//! - [`ChapterOrderComparer`]: numeric chapter ordering with a configurable
//!   placement for specials.
//!
//! All of them implement [`Comparer`], so sorting code can stay generic over
//! the ordering policy.

mod chapter;
mod logical;
mod natural;

pub use chapter::ChapterOrderComparer;
pub use logical::StringLogicalComparer;
pub use natural::{NaturalSortComparer, TokenCache};

use rayon::prelude::*;
use std::cmp::Ordering;

use crate::types::{SortDirection, SpecialsPlacement};

/// A three-way comparison policy over `T`.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Sorts strings in logical order, in parallel.
///
/// # Arguments
///
/// * `items` - Strings to sort in place
pub fn sort_logical<S>(items: &mut [S])
where
    S: AsRef<str> + Send,
{
    items.par_sort_by(|a, b| StringLogicalComparer.compare(a.as_ref(), b.as_ref()));
}

/// Sorts strings in natural order using one comparer (and one token cache)
/// for the whole sort.
///
/// # Arguments
///
/// * `items` - Strings to sort in place
/// * `direction` - Ascending or descending order
pub fn sort_natural<S>(items: &mut [S], direction: SortDirection)
where
    S: AsRef<str>,
{
    let comparer = NaturalSortComparer::new(direction);
    items.sort_by(|a, b| comparer.compare(a.as_ref(), b.as_ref()));
}

/// Sorts chapter numbers, with the zero sentinel placed according to `placement`.
///
/// # Arguments
///
/// * `numbers` - Chapter numbers to sort in place
/// * `placement` - Whether specials go first or last
pub fn sort_chapter_numbers(numbers: &mut [f64], placement: SpecialsPlacement) {
    let comparer = ChapterOrderComparer::new(placement);
    numbers.par_sort_by(|a, b| comparer.compare(a, b));
}

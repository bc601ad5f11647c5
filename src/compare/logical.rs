use std::cmp::Ordering;

use super::Comparer;

/// Compares strings so that embedded numbers order by magnitude.
///
/// The order is total over `Option<&str>`:
/// - `None` sorts before `""`, which sorts before any non-empty string.
/// - A string starting with a symbol sorts before one starting with a letter or digit.
/// - Digit runs compare by value. Equal values with more leading zeros sort
///   first (`"007"` before `"07"`).
/// - Where only one side is inside a digit run, the digit side sorts first.
/// - Letters compare case-insensitively and sort after symbols. Other
///   characters compare by code point.
/// - A strict prefix sorts before the longer string.
///
/// ```
/// use shiori::compare::{Comparer, StringLogicalComparer};
/// use std::cmp::Ordering;
///
/// assert_eq!(StringLogicalComparer.compare("img2", "img10"), Ordering::Less);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLogicalComparer;

impl StringLogicalComparer {
    /// Compares two possibly missing strings.
    pub fn compare_nullable(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => compare_logical(a, b),
        }
    }
}

impl Comparer<str> for StringLogicalComparer {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_logical(a, b)
    }
}

impl Comparer<String> for StringLogicalComparer {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        compare_logical(a, b)
    }
}

fn compare_logical(s1: &str, s2: &str) -> Ordering {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    match (a.first(), b.first()) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(first1), Some(first2)) => {
            match (first1.is_alphanumeric(), first2.is_alphanumeric()) {
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                _ => {}
            }
        }
    }

    let (mut i1, mut i2) = (0, 0);
    loop {
        let (c1, c2) = (a[i1], b[i2]);
        match (c1.is_ascii_digit(), c2.is_ascii_digit()) {
            (true, true) => {
                let result = compare_digit_runs(&a, &mut i1, &b, &mut i2);
                if result != Ordering::Equal {
                    return result;
                }
            }
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                let result = match (c1.is_alphabetic(), c2.is_alphabetic()) {
                    (true, true) => c1.to_lowercase().cmp(c2.to_lowercase()),
                    (false, false) => c1.cmp(&c2),
                    (false, true) => return Ordering::Less,
                    (true, false) => return Ordering::Greater,
                };
                if result != Ordering::Equal {
                    return result;
                }
            }
        }

        i1 += 1;
        i2 += 1;
        match (i1 >= a.len(), i2 >= b.len()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
    }
}

/// Returns `(end, first_significant)` for the digit run starting at `start`.
fn scan_digit_run(s: &[char], start: usize) -> (usize, usize) {
    let mut end = start;
    let mut significant = start;
    let mut leading_zeros = true;
    while end < s.len() && s[end].is_ascii_digit() {
        if leading_zeros && s[end] == '0' {
            significant += 1;
        } else {
            leading_zeros = false;
        }
        end += 1;
    }
    (end, significant)
}

/// Compares the digit runs starting at `i1`/`i2` and leaves both indices on
/// the last digit of their run.
fn compare_digit_runs(a: &[char], i1: &mut usize, b: &[char], i2: &mut usize) -> Ordering {
    let (start1, start2) = (*i1, *i2);
    let (end1, significant1) = scan_digit_run(a, start1);
    let (end2, significant2) = scan_digit_run(b, start2);
    *i1 = end1 - 1;
    *i2 = end2 - 1;

    let magnitude = (end1 - significant1).cmp(&(end2 - significant2));
    if magnitude != Ordering::Equal {
        return magnitude;
    }

    let digits = a[significant1..end1].cmp(&b[significant2..end2]);
    if digits != Ordering::Equal {
        return digits;
    }

    // Same value: the run with more leading zeros sorts first
    (end2 - start2).cmp(&(end1 - start1))
}

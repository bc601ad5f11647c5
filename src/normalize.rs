//! Number and title normalization helpers.
//!
//! These functions turn the raw fragments captured by the filename rules into
//! stable values: digit strings without leading zeros (or padded to a fixed
//! width for storage), series titles without release-group noise, and
//! contributor lists in a canonical form.

use lazy_static::lazy_static;
use regex::Regex;

/// Default width used by [`pad_zeros`].
pub const DEFAULT_PAD_WIDTH: usize = 3;

lazy_static! {
    /// Release group tokens such as `[Taruby]_` or `[dmntsf.net] `.
    pub(crate) static ref RELEASE_GROUP_REGEX: Regex =
        Regex::new(r"(?i)\[(?P<subgroup>\S(?:.*?\S)?)\](?:_|-|\s|\.)?").unwrap();

    /// Empty brackets, `Complete` tags and parenthesised annotations, applied in order.
    static ref CLEANUP_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?i)\{\}|\[\]|\(\)").unwrap(),
        Regex::new(r"(?i)\{Complete\}|\[Complete\]|\(Complete\)").unwrap(),
        Regex::new(r"(?i)\(.*\)").unwrap(),
    ];

    /// Edition tags. Each captures the edition text in the `Edition` group.
    pub(crate) static ref EDITION_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(?P<Edition>Omnibus(?:\s?Edition)?)\b").unwrap(),
        Regex::new(r"(?i)\b(?P<Edition>Uncensored)\b").unwrap(),
        Regex::new(r"(?i)\{(?P<Edition>[^{}]+?)\}").unwrap(),
    ];

    /// Keywords that mark a bonus/special release. `Extra` must be followed by
    /// whitespace or the end of the name (`Extra-ordinary` is a title word) and
    /// is captured in its own `Extra` group.
    pub(crate) static ref SPECIAL_REGEX: Regex = Regex::new(
        r"(?i)\b(?:(?P<Special>Specials?|One[- ]?Shot|Omake|Art Collection|Side Stories|Bonus)\b|(?P<Extra>Extra(?:\sChapter)?)(?:\s|$))"
    ).unwrap();

    /// Explicit `SP01` markers which force a file to be treated as a special.
    pub(crate) static ref SPECIAL_MARKER_REGEX: Regex = Regex::new(r"(?i)\bSP(?P<Index>\d+)\b").unwrap();

    static ref EMPTY_SPACE_REGEX: Regex = Regex::new(r"\s{2,}").unwrap();

    static ref NORMALIZE_REGEX: Regex = Regex::new(r"[^\p{L}0-9+!＊！＋]").unwrap();
}

/// Characters trimmed from both ends of a cleaned title.
const TITLE_TRIM_CHARS: &[char] = &['\0', '\t', '\r', ' ', '-', ','];

/// Replaces every underscore with a space.
pub fn replace_underscores(name: &str) -> String {
    name.replace('_', " ")
}

/// Strips leading `'0'` characters, always leaving at least one digit.
///
/// `"0013"` becomes `"13"`, `"0000"` becomes `"0"` and `"00.5"` becomes `"0.5"`.
pub fn remove_leading_zeroes(value: &str) -> String {
    let trimmed = value.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Left-pads a number to [`DEFAULT_PAD_WIDTH`] digits. See [`pad_zeros_to`].
pub fn pad_zeros(value: &str) -> String {
    pad_zeros_to(value, DEFAULT_PAD_WIDTH)
}

/// Left-pads a number to `width` digits for stable lexical storage.
///
/// Ranges pad each bound (`"4-8"` becomes `"004-008"`) and decimals pad their
/// integer part (`"1.5"` becomes `"001.5"`). Numbers already at or above the
/// width keep their significant digits. Anything that is not a number or a
/// range of numbers is returned unchanged.
///
/// # Arguments
///
/// * `value` - A digit string, decimal, or `low-high` range
/// * `width` - Minimum number of integer digits
///
/// # Returns
///
/// * `String` - The padded value
pub fn pad_zeros_to(value: &str, width: usize) -> String {
    match value.split_once('-') {
        Some((low, high)) => match (pad_bound(low, width), pad_bound(high, width)) {
            (Some(low), Some(high)) => format!("{}-{}", low, high),
            _ => value.to_string(),
        },
        None => pad_bound(value, width).unwrap_or_else(|| value.to_string()),
    }
}

fn pad_bound(bound: &str, width: usize) -> Option<String> {
    let (integer, fraction) = match bound.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (bound, None),
    };
    if integer.is_empty() || !integer.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if fraction.is_some_and(|f| f.is_empty() || !f.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let significant = remove_leading_zeroes(integer);
    let padded = format!("{:0>width$}", significant, width = width);
    Some(match fraction {
        Some(fraction) => format!("{}.{}", padded, fraction),
        None => padded,
    })
}

/// Removes every edition tag from `title`.
fn remove_edition_tags(title: &str) -> String {
    EDITION_REGEXES
        .iter()
        .fold(title.to_string(), |acc, regex| regex.replace_all(&acc, "").into_owned())
}

/// Cleans a raw series fragment into a display title.
///
/// Underscores become spaces, release-group brackets, parenthesised
/// annotations, edition tags and special keywords are stripped, separators are
/// trimmed from both ends and runs of whitespace collapse to one space.
///
/// ```
/// use shiori::normalize::clean_title;
///
/// assert_eq!(clean_title("[ReleaseGroup]_The_Title"), "The Title");
/// assert_eq!(clean_title("Hello_I_am_here   "), "Hello I am here");
/// ```
pub fn clean_title(title: &str) -> String {
    let mut cleaned = replace_underscores(title);
    cleaned = RELEASE_GROUP_REGEX.replace_all(&cleaned, "").into_owned();
    for regex in CLEANUP_REGEXES.iter() {
        cleaned = regex.replace_all(&cleaned, "").into_owned();
    }
    cleaned = remove_edition_tags(&cleaned);
    cleaned = SPECIAL_REGEX.replace_all(&cleaned, "").into_owned();

    let cleaned = cleaned.trim_matches(TITLE_TRIM_CHARS);
    EMPTY_SPACE_REGEX.replace_all(cleaned, " ").trim().to_string()
}

/// Prepares a special's title for display: underscores become spaces and
/// `SP01`-style markers and the extension are removed.
pub fn clean_special_title(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let replaced = replace_underscores(name);
    let stripped = SPECIAL_MARKER_REGEX.replace_all(&replaced, "");
    let mut cleaned = stripped.trim();
    if let Some(dot) = cleaned.rfind('.') {
        if dot > 0 {
            cleaned = cleaned[..dot].trim();
        }
    }
    if cleaned.is_empty() {
        name.to_string()
    } else {
        EMPTY_SPACE_REGEX.replace_all(cleaned, " ").into_owned()
    }
}

/// Splits a comma/ampersand separated contributor list into trimmed names.
///
/// Empty entries are dropped, as are adjacent duplicates (case-insensitive).
pub fn split_authors(authors: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in authors.split([',', '&']).map(str::trim) {
        if name.is_empty() {
            continue;
        }
        if names
            .last()
            .is_some_and(|previous| previous.to_lowercase() == name.to_lowercase())
        {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// Normalizes a contributor list arriving from external per-file metadata.
///
/// `"  Joe Shmo  "` becomes `"Joe Shmo"` and `"Kishimoto & kishimoto, Ikemoto"`
/// becomes `"Kishimoto, Ikemoto"`.
pub fn clean_author(authors: &str) -> String {
    split_authors(authors).join(", ")
}

/// Builds an identity key for a series name: everything but letters, digits
/// and `+`/`!` is dropped and the result is lowercased.
pub fn normalize(name: &str) -> String {
    NORMALIZE_REGEX
        .replace_all(name, "")
        .trim()
        .to_lowercase()
}

fn range_numbers(range: &str) -> Option<Vec<f64>> {
    if range.is_empty()
        || !range
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
    {
        return None;
    }
    range
        .split('-')
        .map(|token| token.parse::<f64>().ok())
        .collect()
}

/// Smallest number in a range string such as `"18-04.5"`. Returns `0.0`
/// for anything that is not made of digits, dots and dashes.
pub fn min_number_from_range(range: &str) -> f64 {
    range_numbers(range)
        .and_then(|numbers| numbers.into_iter().reduce(f64::min))
        .unwrap_or(0.0)
}

/// Largest number in a range string such as `"18-04.5"`. Returns `0.0`
/// for anything that is not made of digits, dots and dashes.
pub fn max_number_from_range(range: &str) -> f64 {
    range_numbers(range)
        .and_then(|numbers| numbers.into_iter().reduce(f64::max))
        .unwrap_or(0.0)
}

//! Core data types and enums for the Shiori parsing library.
//!
//! This module defines the fundamental data structures used throughout Shiori:
//! - Parse results (`ParsedFilename`, `ParserInfo`)
//! - Numeric spans recovered from filenames (`NumberRange`)
//! - Ordering settings (`ChapterNumber`, `SpecialsPlacement`, `SortDirection`)
//! - File classification (`MangaFormat`)

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::normalize::remove_leading_zeroes;

/// Chapter number used when a file carries no chapter number. The same value
/// also marks a special/bonus entry; see [`ChapterNumber`].
pub const DEFAULT_CHAPTER_NUMBER: f64 = 0.0;

/// String form of [`DEFAULT_CHAPTER_NUMBER`] as stored on [`ParserInfo::chapters`].
pub const DEFAULT_CHAPTER: &str = "0";

/// Volume used for loose chapters that do not belong to any volume.
pub const DEFAULT_VOLUME: &str = "0";

/// A numeric span parsed out of a filename, e.g. `"16-17"` or `"153.5"`.
///
/// Both bounds are kept as normalized digit strings (leading zeros stripped)
/// instead of being collapsed into one value, so callers can detect overlapping
/// or duplicated releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct NumberRange {
    pub low: String,
    pub high: Option<String>,
}

impl NumberRange {
    /// A range holding a single number.
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            low: value.into(),
            high: None,
        }
    }

    /// A closed range `low-high`, kept in the order it was written.
    pub fn closed(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: Some(high.into()),
        }
    }

    /// Builds a range from a value produced by the filename parser.
    /// Empty input means "nothing was found" and yields `None`.
    pub fn from_parsed(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        match value.split_once('-') {
            Some((low, high)) => Some(Self::closed(low, high)),
            None => Some(Self::single(value)),
        }
    }

    pub fn is_range(&self) -> bool {
        self.high.is_some()
    }

    /// Smallest number covered by the range, `0.0` if a bound is not numeric.
    pub fn min_number(&self) -> f64 {
        let low = self.low.parse::<f64>().unwrap_or(0.0);
        match self.high.as_deref().map(str::parse::<f64>) {
            Some(Ok(high)) => low.min(high),
            _ => low,
        }
    }

    /// Largest number covered by the range, `0.0` if a bound is not numeric.
    pub fn max_number(&self) -> f64 {
        let low = self.low.parse::<f64>().unwrap_or(0.0);
        match self.high.as_deref().map(str::parse::<f64>) {
            Some(Ok(high)) => low.max(high),
            _ => low,
        }
    }

    /// Whether two ranges share at least one number.
    pub fn overlaps(&self, other: &NumberRange) -> bool {
        self.min_number() <= other.max_number() && other.min_number() <= self.max_number()
    }
}

fn is_number_token(token: &str) -> bool {
    let mut seen_dot = false;
    !token.is_empty()
        && token.chars().all(|c| match c {
            '0'..='9' => true,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        })
        && token.chars().any(|c| c.is_ascii_digit())
}

impl FromStr for NumberRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (low, high) = match trimmed.split_once('-') {
            Some((low, high)) => (low, Some(high)),
            None => (trimmed, None),
        };
        if !is_number_token(low) || high.is_some_and(|h| !is_number_token(h)) {
            return Err(Error::InvalidRange(s.to_string()));
        }
        Ok(Self {
            low: remove_leading_zeroes(low),
            high: high.map(remove_leading_zeroes),
        })
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.high {
            Some(high) => write!(f, "{}-{}", self.low, high),
            None => write!(f, "{}", self.low),
        }
    }
}

/// Structured identity recovered from a single filename.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct ParsedFilename {
    /// Cleaned series title. Empty when no recognizable token was found.
    pub series_name: String,
    pub volume_range: Option<NumberRange>,
    pub chapter_range: Option<NumberRange>,
    /// Set for `SP01`-style markers, or for names that only carry a special
    /// keyword ("Omake", "One Shot", ...) and no volume or chapter.
    pub is_special: bool,
}

/// A chapter number with the "special" meaning of the zero sentinel made explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub enum ChapterNumber {
    Numbered(f64),
    Special,
}

impl ChapterNumber {
    /// Interprets the overloaded float form, where [`DEFAULT_CHAPTER_NUMBER`]
    /// (either sign of zero) stands for a special entry.
    pub fn from_sentinel(value: f64) -> Self {
        if value == DEFAULT_CHAPTER_NUMBER {
            ChapterNumber::Special
        } else {
            ChapterNumber::Numbered(value)
        }
    }

    pub fn to_sentinel(self) -> f64 {
        match self {
            ChapterNumber::Numbered(value) => value,
            ChapterNumber::Special => DEFAULT_CHAPTER_NUMBER,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, ChapterNumber::Special)
    }
}

impl From<f64> for ChapterNumber {
    fn from(value: f64) -> Self {
        ChapterNumber::from_sentinel(value)
    }
}

/// Where special entries land relative to numbered chapters.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub enum SpecialsPlacement {
    /// Reading order inside one volume: the unnumbered lead entry comes first.
    First,
    /// General chapter listings: specials trail the numbered chapters.
    #[default]
    Last,
}

/// Direction of a natural sort.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Broad file category derived from the extension.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub enum MangaFormat {
    Image,
    Archive,
    #[default]
    Unknown,
    Epub,
    Pdf,
}

impl fmt::Display for MangaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MangaFormat::Image => "Image",
            MangaFormat::Archive => "Archive",
            MangaFormat::Unknown => "Unknown",
            MangaFormat::Epub => "Epub",
            MangaFormat::Pdf => "Pdf",
        };
        f.write_str(name)
    }
}

/// Everything the ingestion pipeline needs to know about one file on disk,
/// as produced by [`FilenameParser::parse_path`](crate::parser::FilenameParser::parse_path).
///
/// Unlike [`ParsedFilename`], volumes and chapters use the string sentinels
/// [`DEFAULT_VOLUME`] and [`DEFAULT_CHAPTER`] when nothing could be recovered,
/// since that is how loose chapters and specials are stored downstream.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct ParserInfo {
    pub series: String,
    pub volumes: String,
    pub chapters: String,
    /// File name including the extension.
    pub filename: String,
    pub full_file_path: String,
    pub format: MangaFormat,
    pub edition: String,
    pub is_special: bool,
    /// Index taken from an `SP01`-style marker, `0` when there is none.
    pub special_index: u32,
    /// File name without its extension.
    pub title: String,
}

impl ParserInfo {
    /// Specials are either flagged explicitly or carry neither volume nor chapter.
    pub fn is_special_info(&self) -> bool {
        self.is_special || (self.volumes == DEFAULT_VOLUME && self.chapters == DEFAULT_CHAPTER)
    }

    pub fn volume_range(&self) -> Option<NumberRange> {
        NumberRange::from_parsed(&self.volumes)
    }

    pub fn chapter_range(&self) -> Option<NumberRange> {
        NumberRange::from_parsed(&self.chapters)
    }
}

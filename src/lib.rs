//! Shiori - Manga Filename Parsing Library
//!
//! This crate recovers structured metadata from the free-form file names that
//! manga and comic archives are distributed under: the series title, volume
//! and chapter numbers (including ranges like `16-17` and part suffixes like
//! `153b`), editions, specials, and the file format. It also provides the
//! natural orderings needed to list such files the way a reader expects.
//!
//! # Getting Started
//!
//! The free functions in [`parser`] use the built-in rule tables. For custom
//! patterns or padding, configure a [`FilenameParser`] through the
//! [`ParserConfig`] builder.
//!
//! ```rust
//! use shiori::prelude::*;
//!
//! fn main() -> shiori::error::Result<()> {
//!     // 1. Parse a single file name with the built-in rules
//!     let parsed = shiori::parser::parse("Killing Bites Vol. 0001 Ch. 0001 - Galactica Scanlations (gb)");
//!     assert_eq!(parsed.series_name, "Killing Bites");
//!     assert_eq!(parsed.volume_range, Some(NumberRange::single("1")));
//!
//!     // Part suffixes become halves
//!     let parsed = shiori::parser::parse("Beelzebub_150-153b_RHS.zip");
//!     assert_eq!(parsed.chapter_range, Some(NumberRange::closed("150", "153.5")));
//!
//!     // 2. Configure a parser with an extra volume pattern
//!     let config = ParserConfig::builder()
//!         .extra_volume_patterns(vec![r"Tomo\s(?P<Volume>\d+)".to_string()])
//!         .build()?;
//!     let parser = FilenameParser::with_config(config)?;
//!     assert_eq!(parser.parse_volume("Asterix Tomo 07"), "7");
//!
//!     // 3. Sort chapter numbers with specials last
//!     let mut chapters = vec![3.0, 0.0, 1.5, 1.0];
//!     sort_chapter_numbers(&mut chapters, SpecialsPlacement::Last);
//!     assert_eq!(chapters, vec![1.0, 1.5, 3.0, 0.0]);
//!
//!     Ok(())
//! }
//! ```
//!
//! Path-level parsing with folder fallbacks lives on
//! [`FilenameParser::parse_path`]; the orderings live in [`compare`].

pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod normalize;
pub mod parser;
pub mod path_utils;
pub mod types;

// Publicly expose the parser, its configuration and the builder
pub use config::{ParserConfig, ParserConfigBuilder};
pub use parser::FilenameParser;

// Re-export the comparators and core types for direct access
pub use compare::{
    ChapterOrderComparer, Comparer, NaturalSortComparer, StringLogicalComparer, TokenCache,
    sort_chapter_numbers, sort_logical, sort_natural,
};
pub use types::{
    ChapterNumber, MangaFormat, NumberRange, ParsedFilename, ParserInfo, SortDirection,
    SpecialsPlacement,
};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and traits, allowing you to
/// import everything you need with a single `use shiori::prelude::*;` statement.
pub mod prelude {
    pub use super::{
        ChapterNumber, ChapterOrderComparer, Comparer, FilenameParser, MangaFormat,
        NaturalSortComparer, NumberRange, ParsedFilename, ParserConfig, ParserConfigBuilder,
        ParserInfo, SortDirection, SpecialsPlacement, StringLogicalComparer, TokenCache, error,
        sort_chapter_numbers, sort_logical, sort_natural, types,
    };
    pub use std::cmp::Ordering;
}

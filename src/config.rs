//! Parser configuration, built declaratively using the builder pattern.
//!
//! The built-in rule tables cover the common scene-group conventions. A
//! [`ParserConfig`] lets callers put their own patterns in front of those
//! tables and tune a few normalization knobs without touching the defaults.

use regex::Regex;

use crate::types::{SortDirection, SpecialsPlacement};

/// Upper bound accepted for [`ParserConfig::pad_width`].
pub const MAX_PAD_WIDTH: usize = 10;

/// Configuration for a [`FilenameParser`](crate::parser::FilenameParser).
///
/// Extra patterns must use the same named groups as the built-in rules:
/// `Series` for series patterns, `Volume` for volume patterns and `Chapter`
/// (optionally with a `Part` group for a trailing `b`) for chapter patterns.
/// They are matched case-insensitively and tried before the built-in rules.
///
/// ```rust
/// use shiori::prelude::*;
///
/// let config = ParserConfig::builder()
///     .extra_chapter_patterns(vec![r"Episodio\s(?P<Chapter>\d+)".to_string()])
///     .pad_width(4usize)
///     .build()
///     .expect("Invalid configuration");
///
/// let parser = FilenameParser::with_config(config).expect("Invalid patterns");
/// assert_eq!(parser.parse_chapter("One Piece Episodio 0012"), "12");
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParserConfig {
    /// Additional series patterns, each with a `Series` group.
    #[builder(default)]
    pub extra_series_patterns: Vec<String>,

    /// Additional volume patterns, each with a `Volume` group.
    #[builder(default)]
    pub extra_volume_patterns: Vec<String>,

    /// Additional chapter patterns, each with a `Chapter` group.
    #[builder(default)]
    pub extra_chapter_patterns: Vec<String>,

    /// Treat underscores as spaces before matching.
    ///
    /// The built-in rules accept `_` wherever they accept a space, and some
    /// conventions (`vol_356-1`) only parse correctly with the underscores
    /// kept. Turn this on when extra patterns only know about spaces.
    #[builder(default = "false")]
    pub replace_underscores: bool,

    /// Width used by [`FilenameParser::pad`](crate::parser::FilenameParser::pad).
    #[builder(default = "crate::normalize::DEFAULT_PAD_WIDTH")]
    pub pad_width: usize,

    /// Direction used by [`FilenameParser::natural_comparer`](crate::parser::FilenameParser::natural_comparer).
    #[builder(default)]
    pub natural_sort_direction: SortDirection,

    /// Placement used by [`FilenameParser::chapter_comparer`](crate::parser::FilenameParser::chapter_comparer).
    #[builder(default)]
    pub specials_placement: SpecialsPlacement,
}

impl std::fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserConfig")
            .field("extra_series_patterns", &self.extra_series_patterns)
            .field("extra_volume_patterns", &self.extra_volume_patterns)
            .field("extra_chapter_patterns", &self.extra_chapter_patterns)
            .field("replace_underscores", &self.replace_underscores)
            .field("pad_width", &self.pad_width)
            .field("natural_sort_direction", &self.natural_sort_direction)
            .field("specials_placement", &self.specials_placement)
            .finish()
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extra_series_patterns: Vec::new(),
            extra_volume_patterns: Vec::new(),
            extra_chapter_patterns: Vec::new(),
            replace_underscores: false,
            pad_width: crate::normalize::DEFAULT_PAD_WIDTH,
            natural_sort_direction: SortDirection::default(),
            specials_placement: SpecialsPlacement::default(),
        }
    }
}

impl ParserConfig {
    /// Creates a new builder for configuring `ParserConfig`.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

impl ParserConfigBuilder {
    /// Validates the builder fields before the config is constructed.
    fn validate(&self) -> std::result::Result<(), String> {
        let groups = [
            (&self.extra_series_patterns, "Series", "extra_series_patterns"),
            (&self.extra_volume_patterns, "Volume", "extra_volume_patterns"),
            (&self.extra_chapter_patterns, "Chapter", "extra_chapter_patterns"),
        ];
        for (patterns, group, field) in groups {
            if let Some(patterns) = patterns {
                for pattern in patterns {
                    check_pattern(pattern, group)
                        .map_err(|reason| format!("Invalid {}: {} ({})", field, pattern, reason))?;
                }
            }
        }

        if let Some(width) = self.pad_width {
            if width == 0 || width > MAX_PAD_WIDTH {
                return Err(format!(
                    "pad_width must be between 1 and {}, got {}",
                    MAX_PAD_WIDTH, width
                ));
            }
        }
        Ok(())
    }
}

/// Checks that `pattern` compiles and exposes the named `group`.
fn check_pattern(pattern: &str, group: &str) -> std::result::Result<(), String> {
    let regex = Regex::new(pattern).map_err(|e| e.to_string())?;
    if regex.capture_names().flatten().any(|name| name == group) {
        Ok(())
    } else {
        Err(format!("missing named group '{}'", group))
    }
}

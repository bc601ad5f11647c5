//! Filename parsing: recovers series, volume and chapter identity from the
//! names scene groups give their archives.
//!
//! The heavy lifting is done by the ordered rule tables in `rules`. This
//! module wires them together, applies the special/edition detection that
//! sits on top of them, and falls back to folder names for path-level parsing.
//!
//! Nothing in here fails: an unrecognized name yields empty fields so the
//! caller can fall back to folder names or flag the file for manual review.
//!
//! ```rust
//! use shiori::parser::{parse_chapter, parse_series, parse_volume};
//!
//! let name = "Killing Bites Vol. 0001 Ch. 0001 - Galactica Scanlations (gb)";
//! assert_eq!(parse_series(name), "Killing Bites");
//! assert_eq!(parse_volume(name), "1");
//! assert_eq!(parse_chapter(name), "1");
//! ```

mod rules;

use std::borrow::Cow;

use lazy_static::lazy_static;
use log::debug;
use rayon::prelude::*;

use crate::compare::{ChapterOrderComparer, NaturalSortComparer};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::format::{is_cover_image, is_image, is_pdf, parse_format};
use crate::normalize::{
    EDITION_REGEXES, SPECIAL_MARKER_REGEX, SPECIAL_REGEX, clean_title, pad_zeros_to,
    replace_underscores,
};
use crate::path_utils::{file_name, file_stem, folders_till_root, normalize_path};
use crate::types::{DEFAULT_CHAPTER, DEFAULT_VOLUME, NumberRange, ParsedFilename, ParserInfo};

use rules::{CHAPTER_RULES, Field, RuleSet, SERIES_RULES, VOLUME_RULES};

lazy_static! {
    /// Parser with the built-in rules only, used by the free functions.
    static ref DEFAULT_PARSER: FilenameParser = FilenameParser::new();
}

/// Parses filenames with the built-in rule tables plus any caller-supplied
/// patterns from a [`ParserConfig`].
///
/// A parser holds no mutable state and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct FilenameParser {
    config: ParserConfig,
    extra_series: RuleSet,
    extra_volume: RuleSet,
    extra_chapter: RuleSet,
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            extra_series: RuleSet::empty(Field::Series),
            extra_volume: RuleSet::empty(Field::Volume),
            extra_chapter: RuleSet::empty(Field::Chapter),
        }
    }

    /// Creates a parser from a configuration, compiling its extra patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Regex`](crate::error::Error::Regex) if an extra pattern
    /// does not compile. Configs produced by the builder are already validated.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            extra_series: RuleSet::from_patterns(Field::Series, &config.extra_series_patterns)?,
            extra_volume: RuleSet::from_patterns(Field::Volume, &config.extra_volume_patterns)?,
            extra_chapter: RuleSet::from_patterns(Field::Chapter, &config.extra_chapter_patterns)?,
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn prepare<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.config.replace_underscores && name.contains('_') {
            Cow::Owned(replace_underscores(name))
        } else {
            Cow::Borrowed(name)
        }
    }

    fn extract(&self, extra: &RuleSet, builtin: &RuleSet, name: &str) -> String {
        let name = self.prepare(name);
        let from_extra = if extra.is_empty() {
            None
        } else {
            extra.extract(&name)
        };
        from_extra
            .or_else(|| builtin.extract(&name))
            .unwrap_or_default()
    }

    /// Extracts the series name, empty when no series token is found.
    pub fn parse_series(&self, filename: &str) -> String {
        self.extract(&self.extra_series, &SERIES_RULES, filename)
    }

    /// Extracts the volume (or volume range such as `"16-17"`), empty when
    /// the name carries no volume.
    pub fn parse_volume(&self, filename: &str) -> String {
        self.extract(&self.extra_volume, &VOLUME_RULES, filename)
    }

    /// Extracts the chapter (or chapter range such as `"90-98"`), empty when
    /// the name carries no chapter.
    pub fn parse_chapter(&self, filename: &str) -> String {
        self.extract(&self.extra_chapter, &CHAPTER_RULES, filename)
    }

    /// Parses all fields of a filename at once.
    ///
    /// An `SP01`-style marker makes the file a special and discards any volume
    /// or chapter. Otherwise a special keyword only counts when neither a
    /// volume nor a chapter was found, so `v20 c171-180+Omake` stays a regular
    /// chapter range. A special whose series the rules cannot find keeps its
    /// cleaned stem as series.
    pub fn parse(&self, filename: &str) -> ParsedFilename {
        let mut series_name = self.parse_series(filename);
        let mut volume_range = NumberRange::from_parsed(&self.parse_volume(filename));
        let mut chapter_range = NumberRange::from_parsed(&self.parse_chapter(filename));

        let is_special = if has_special_marker(filename) {
            volume_range = None;
            chapter_range = None;
            true
        } else {
            volume_range.is_none() && chapter_range.is_none() && !parse_special(filename).is_empty()
        };
        if is_special && series_name.is_empty() {
            series_name = clean_title(&file_stem(filename));
        }

        ParsedFilename {
            series_name,
            volume_range,
            chapter_range,
            is_special,
        }
    }

    /// Parses a batch of filenames in parallel, preserving input order.
    pub fn parse_many<S>(&self, filenames: &[S]) -> Vec<ParsedFilename>
    where
        S: AsRef<str> + Sync,
    {
        filenames
            .par_iter()
            .map(|name| self.parse(name.as_ref()))
            .collect()
    }

    /// Parses a file path below a library root, falling back to the folders
    /// between the two when the file name alone is not enough.
    ///
    /// Cover images yield `None`, as do files whose series stays empty after
    /// every fallback. Images never contribute series, volume or chapter from
    /// their own name since page files rarely carry that information.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Full path of the file, `/` or `\` separated
    /// * `root_path` - The library folder the file was found in
    ///
    /// # Returns
    ///
    /// * `Option<ParserInfo>` - The parsed record, volumes and chapters set to
    ///   [`DEFAULT_VOLUME`]/[`DEFAULT_CHAPTER`] when unknown
    pub fn parse_path(&self, file_path: &str, root_path: &str) -> Option<ParserInfo> {
        if is_cover_image(file_path) {
            debug!("Skipping cover image '{}'", file_path);
            return None;
        }

        let stem = file_stem(file_path);
        let mut info = ParserInfo {
            series: self.parse_series(&stem),
            volumes: or_default(self.parse_volume(&stem), DEFAULT_VOLUME),
            chapters: or_default(self.parse_chapter(&stem), DEFAULT_CHAPTER),
            filename: file_name(file_path),
            full_file_path: file_path.to_string(),
            format: parse_format(file_path),
            title: stem.clone(),
            ..Default::default()
        };

        let image = is_image(file_path);
        if image {
            info.volumes = DEFAULT_VOLUME.to_string();
            info.chapters = DEFAULT_CHAPTER.to_string();
            info.series = String::new();
        }

        if info.series.is_empty() || image {
            self.parse_from_fallback_folders(file_path, root_path, &mut info);
        }

        let edition = parse_edition(&stem);
        if !edition.is_empty() {
            info.series = clean_title(&info.series.replace(&edition, ""));
            info.edition = edition;
        }

        let special = parse_special(&stem);
        if info.chapters == DEFAULT_CHAPTER && info.volumes == DEFAULT_VOLUME && !special.is_empty() {
            info.is_special = true;
            self.parse_from_fallback_folders(file_path, root_path, &mut info);
        }

        if has_special_marker(&stem) {
            info.is_special = true;
            info.special_index = parse_special_index(&stem);
            info.chapters = DEFAULT_CHAPTER.to_string();
            info.volumes = DEFAULT_VOLUME.to_string();
            self.parse_from_fallback_folders(file_path, root_path, &mut info);
        }

        if info.series.is_empty() {
            info.series = clean_title(&stem);
        }

        if is_pdf(file_path) && info.series.to_lowercase().ends_with(".pdf") {
            let keep = info.series.len() - ".pdf".len();
            info.series.truncate(keep);
        }

        if info.series.is_empty() {
            None
        } else {
            Some(info)
        }
    }

    /// Fills volume, chapter and series from the folders between the root and
    /// the file. Folders named after specials are ignored. The series comes
    /// from the top-most folder since libraries are usually grouped by series.
    fn parse_from_fallback_folders(&self, file_path: &str, root_path: &str, info: &mut ParserInfo) {
        let folders: Vec<String> = folders_till_root(root_path, file_path)
            .into_iter()
            .filter(|folder| parse_special(folder).is_empty())
            .collect();
        debug!("Falling back to folders {:?} for '{}'", folders, file_path);

        if folders.is_empty() {
            let root = normalize_path(root_path);
            let root_name = root
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
            let series = self.parse_series(&root_name);
            if series.is_empty() {
                info.series = clean_title(&root_name);
            } else if info.series.is_empty() || !root_name.contains(&info.series) {
                info.series = series;
            }
            return;
        }

        let last = folders.len() - 1;
        for (index, folder) in folders.iter().enumerate() {
            let volume = or_default(self.parse_volume(folder), DEFAULT_VOLUME);
            let chapter = or_default(self.parse_chapter(folder), DEFAULT_CHAPTER);

            if volume != DEFAULT_VOLUME
                && (info.volumes.is_empty() || info.volumes == DEFAULT_VOLUME)
            {
                info.volumes = volume;
            }
            if chapter != DEFAULT_CHAPTER
                && (info.chapters.is_empty() || info.chapters == DEFAULT_CHAPTER)
            {
                info.chapters = chapter;
            }

            if index == last && *folder != info.series {
                let series = self.parse_series(folder);
                if series.is_empty() {
                    info.series = clean_title(folder);
                } else if info.series.is_empty() || !folder.contains(&info.series) {
                    info.series = series;
                }
            }
        }
    }

    /// Pads a number or range to the configured width.
    pub fn pad(&self, value: &str) -> String {
        pad_zeros_to(value, self.config.pad_width)
    }

    /// A natural sort comparer in the configured direction.
    pub fn natural_comparer(&self) -> NaturalSortComparer {
        NaturalSortComparer::new(self.config.natural_sort_direction)
    }

    /// A chapter comparer with the configured specials placement.
    pub fn chapter_comparer(&self) -> ChapterOrderComparer {
        ChapterOrderComparer::new(self.config.specials_placement)
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Extracts the series name with the built-in rules.
pub fn parse_series(filename: &str) -> String {
    DEFAULT_PARSER.parse_series(filename)
}

/// Extracts the volume with the built-in rules.
pub fn parse_volume(filename: &str) -> String {
    DEFAULT_PARSER.parse_volume(filename)
}

/// Extracts the chapter with the built-in rules.
pub fn parse_chapter(filename: &str) -> String {
    DEFAULT_PARSER.parse_chapter(filename)
}

/// Parses all fields with the built-in rules. See [`FilenameParser::parse`].
pub fn parse(filename: &str) -> ParsedFilename {
    DEFAULT_PARSER.parse(filename)
}

/// Returns the edition tag of a name (`Omnibus`, `Uncensored`, `{...}`),
/// empty when there is none.
pub fn parse_edition(filename: &str) -> String {
    let name = replace_underscores(filename);
    EDITION_REGEXES
        .iter()
        .find_map(|regex| regex.captures(&name))
        .and_then(|caps| caps.name("Edition").map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}

/// Returns the first special keyword in a name (`Omake`, `One Shot`, ...),
/// empty when there is none.
pub fn parse_special(filename: &str) -> String {
    let name = replace_underscores(filename);
    SPECIAL_REGEX
        .captures(&name)
        .and_then(|caps| caps.name("Special").or_else(|| caps.name("Extra")))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Whether a name carries an explicit `SP01`-style special marker.
pub fn has_special_marker(filename: &str) -> bool {
    !filename.is_empty() && SPECIAL_MARKER_REGEX.is_match(&replace_underscores(filename))
}

/// Index of the `SP01`-style marker in a name, `0` when there is none.
pub fn parse_special_index(filename: &str) -> u32 {
    SPECIAL_MARKER_REGEX
        .captures(&replace_underscores(filename))
        .and_then(|caps| caps.name("Index").and_then(|m| m.as_str().parse().ok()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;

    #[test]
    fn test_parse_marks_keyword_only_specials() {
        let parsed = parse("Love Hina - Special.cbz");
        assert!(parsed.is_special);
        assert_eq!(parsed.volume_range, None);
        assert_eq!(parsed.chapter_range, None);
    }

    #[test]
    fn test_parse_keeps_numbered_omake() {
        let parsed = parse("Beelzebub_v20_c171-180+Omake");
        assert!(!parsed.is_special);
        assert_eq!(parsed.volume_range, Some(NumberRange::single("20")));
    }

    #[test]
    fn test_special_marker_resets_numbers() {
        let parsed = parse("Beastars SP01 v02");
        assert!(parsed.is_special);
        assert_eq!(parsed.volume_range, None);
        assert_eq!(parsed.chapter_range, None);
        assert_eq!(parse_special_index("Beastars_SP07"), 7);
        assert_eq!(parse_special_index("Beastars"), 0);
    }

    #[test]
    fn test_extra_patterns_take_priority() {
        let config = ParserConfig::builder()
            .extra_volume_patterns(vec![r"Tome\s?(?P<Volume>\d+)".to_string()])
            .build()
            .unwrap();
        let parser = FilenameParser::with_config(config).unwrap();
        assert_eq!(parser.parse_volume("Asterix Tome 03"), "3");
        assert_eq!(parser.parse_volume("Asterix v04"), "4");
    }

    #[test]
    fn test_underscores_are_kept_by_default() {
        assert_eq!(FilenameParser::new().parse_volume("vol_356-1"), "356");
        assert_eq!(FilenameParser::new().parse_chapter("Beelzebub_153b_RHS"), "153.5");

        let config = ParserConfig::builder()
            .replace_underscores(true)
            .build()
            .unwrap();
        let parser = FilenameParser::with_config(config).unwrap();
        assert_eq!(parser.parse_volume("vol_356-1"), "356-1");
        assert_eq!(parser.parse_chapter("Beelzebub_153b_RHS"), "153.5");
    }

    #[test]
    fn test_keyword_special_keeps_stem_as_series() {
        let parsed = parse(
            "Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U Extra Chapter",
        );
        assert!(parsed.is_special);
        assert_eq!(
            parsed.series_name,
            "Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U"
        );
        assert_eq!(parse("Love Hina - Special.cbz").series_name, "Love Hina");
    }

    #[test]
    fn test_pad_uses_configured_width() {
        let config = ParserConfig::builder().pad_width(4usize).build().unwrap();
        let parser = FilenameParser::with_config(config).unwrap();
        assert_eq!(parser.pad("12"), "0012");
        assert_eq!(FilenameParser::new().pad("12"), "012");
    }
}

//! Ordered, data-driven extraction rules for series, volume and chapter tokens.
//!
//! Every entry encodes one naming convention seen in the wild. Tables are
//! ordered from the most specific convention to the most permissive one and the
//! first accepted match wins. The regex engine has no lookaround, so context
//! conditions are expressed as [`Guard`]s checked around each candidate match.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Captures, Regex};
use std::fmt;

use crate::error::Result;
use crate::normalize::{clean_title, remove_leading_zeroes};

/// The field a rule table extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Series,
    Volume,
    Chapter,
}

impl Field {
    /// Name of the capture group holding this field's value.
    pub(crate) fn group(self) -> &'static str {
        match self {
            Field::Series => "Series",
            Field::Volume => "Volume",
            Field::Chapter => "Chapter",
        }
    }

    /// Turns an accepted match into the final field value.
    pub(crate) fn extract(self, caps: &Captures<'_>) -> String {
        let value = caps.name(self.group()).map_or("", |m| m.as_str());
        match self {
            Field::Series => clean_title(value),
            Field::Volume | Field::Chapter => {
                format_number(value, caps.name("Part").is_some())
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

/// A trailing `b` part marker means "second half": `153b` is read as `153.5`.
fn add_part(value: &str) -> String {
    if value.contains('.') {
        value.to_string()
    } else {
        format!("{}.5", value)
    }
}

/// Normalizes a captured volume/chapter value, keeping both bounds of a range.
///
/// The upper bound may repeat the chapter prefix (`c01-c04`). A range with an
/// empty upper bound (`12-`) collapses to its lower bound.
pub(crate) fn format_number(value: &str, has_part: bool) -> String {
    let with_part = |v: &str| {
        if has_part {
            add_part(v)
        } else {
            v.to_string()
        }
    };

    if !value.contains('-') {
        return remove_leading_zeroes(&with_part(value));
    }

    let tokens: Vec<&str> = value.split('-').collect();
    let from = remove_leading_zeroes(tokens[0]);
    if tokens.len() != 2 {
        return from;
    }
    let to = tokens[1].trim().trim_start_matches(['c', 'C']);
    if to.is_empty() {
        return from;
    }
    format!("{}-{}", from, remove_leading_zeroes(&with_part(to)))
}

/// Context conditions a candidate match must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Guard {
    /// The whole name must not start with `vol`.
    NotLeadingVolume,
    /// The whole name must not start with `chapter`.
    NotLeadingChapter,
    /// The text before the `Sep` group, or before the match when the rule has
    /// no such group, must not end with this lowercase suffix.
    NotAfter(&'static str),
    /// The match must not be closed by a `]`, as in `[v2]` version tags.
    Unbracketed,
}

impl Guard {
    fn accepts_name(self, name: &str) -> bool {
        match self {
            Guard::NotLeadingVolume => !starts_with_ignore_case(name, "vol"),
            Guard::NotLeadingChapter => !starts_with_ignore_case(name, "chapter"),
            Guard::NotAfter(_) | Guard::Unbracketed => true,
        }
    }

    fn accepts_match(self, name: &str, caps: &Captures<'_>) -> bool {
        match self {
            Guard::NotAfter(suffix) => {
                let at = caps
                    .name("Sep")
                    .or_else(|| caps.get(0))
                    .map_or(0, |m| m.start());
                !name[..at].to_lowercase().ends_with(suffix)
            }
            Guard::Unbracketed => caps
                .get(0)
                .is_none_or(|whole| !name[whole.end()..].starts_with(']')),
            Guard::NotLeadingVolume | Guard::NotLeadingChapter => true,
        }
    }
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Whether a prefix ends with `vol` (optionally followed by one more
/// character) or with `volume`.
fn ends_near_volume(prefix: &str) -> bool {
    let lowered = prefix.to_lowercase();
    if lowered.ends_with("vol") || lowered.ends_with("volume") {
        return true;
    }
    let mut chars = lowered.chars();
    chars.next_back();
    chars.as_str().ends_with("vol")
}

/// How a rule searches the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleKind {
    /// First match whose target group is non-empty.
    Match,
    /// Earliest whitespace position (past the first character) where the
    /// pattern matches and the text before it does not end near `vol`.
    LazyPrefix,
}

/// Static description of a rule, compiled into a [`Rule`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleSpec {
    pattern: &'static str,
    kind: RuleKind,
    guards: &'static [Guard],
}

impl RuleSpec {
    const fn plain(pattern: &'static str) -> Self {
        Self {
            pattern,
            kind: RuleKind::Match,
            guards: &[],
        }
    }

    const fn guarded(pattern: &'static str, guards: &'static [Guard]) -> Self {
        Self {
            pattern,
            kind: RuleKind::Match,
            guards,
        }
    }

    const fn lazy_prefix(pattern: &'static str, guards: &'static [Guard]) -> Self {
        Self {
            pattern,
            kind: RuleKind::LazyPrefix,
            guards,
        }
    }
}

/// A compiled extraction rule.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pattern: Regex,
    kind: RuleKind,
    guards: &'static [Guard],
}

impl Rule {
    fn new(pattern: &str, kind: RuleKind, guards: &'static [Guard]) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){}", pattern))?,
            kind,
            guards,
        })
    }

    /// Returns the accepted match for `field`, if any.
    fn find<'h>(&self, name: &'h str, field: Field) -> Option<Captures<'h>> {
        if !self.guards.iter().all(|guard| guard.accepts_name(name)) {
            return None;
        }
        let group = field.group();
        let has_value = |caps: &Captures<'_>| caps.name(group).is_some_and(|m| !m.as_str().is_empty());

        match self.kind {
            RuleKind::Match => self.pattern.captures_iter(name).find(|caps| {
                self.guards
                    .iter()
                    .all(|guard| guard.accepts_match(name, caps))
                    && has_value(caps)
            }),
            RuleKind::LazyPrefix => name
                .char_indices()
                .filter(|&(at, c)| at > 0 && c.is_whitespace())
                .filter(|&(at, _)| !ends_near_volume(&name[..at]))
                .find_map(|(at, _)| {
                    let caps = self.pattern.captures_at(name, at)?;
                    let starts_here = caps.get(0).is_some_and(|whole| whole.start() == at);
                    (starts_here && has_value(&caps)).then_some(caps)
                }),
        }
    }
}

/// An ordered table of rules for one field.
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    field: Field,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub(crate) fn compile(field: Field, specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|spec| Rule::new(spec.pattern, spec.kind, spec.guards))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { field, rules })
    }

    pub(crate) fn empty(field: Field) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    /// Compiles caller-supplied patterns as plain, unguarded rules.
    pub(crate) fn from_patterns(field: Field, patterns: &[String]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|pattern| Rule::new(pattern, RuleKind::Match, &[]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { field, rules })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs the rules in order and returns the first accepted match.
    pub(crate) fn find<'h>(&self, name: &'h str) -> Option<Captures<'h>> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(caps) = rule.find(name, self.field) {
                debug!("{} rule #{} matched '{}'", self.field, index, name);
                return Some(caps);
            }
        }
        trace!("No {} rule matched '{}'", self.field, name);
        None
    }

    /// Runs the rules and extracts the field value, `None` when nothing matched.
    pub(crate) fn extract(&self, name: &str) -> Option<String> {
        self.find(name).map(|caps| self.field.extract(&caps))
    }
}

use Guard::{NotAfter, NotLeadingChapter, NotLeadingVolume, Unbracketed};

const VOLUME_SPECS: &[RuleSpec] = &[
    // Thai เล่ม / เล่มที่
    RuleSpec::plain(r"(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(\-\d+)?(\.\d+)?)"),
    // v16-17 followed by a separator
    RuleSpec::plain(r"(?P<Series>.*)(\b|_)v(?P<Volume>\d+-?\d+)( |_)"),
    // Accel World Chapter 001 Volume 002
    RuleSpec::plain(
        r"^(?P<Series>.+?)(\s*Chapter\s*\d+)?(\s|_|\-\s)+(Vol(ume)?\.?(\s|_)?)(?P<Volume>\d+(\.\d+)?)(.+?|$)",
    ),
    // v03.5 or v01-02, but not a [v2] release version
    RuleSpec::guarded(
        r"(?P<Series>.*)(\b|_)v(?P<Volume>\d+(\.\d)?(-\d+(\.\d)?)?)",
        &[Unbracketed],
    ),
    RuleSpec::plain(r"(?P<Series>.*)(\b|_)(vol\.? ?)(?P<Volume>\d+(\.\d)?(-\d+)?(\.\d)?)"),
    RuleSpec::plain(r"(vol\.? ?)(?P<Volume>\d+(\.\d)?)"),
    RuleSpec::plain(r"(volume )(?P<Volume>\d+(\.\d)?)"),
    // Season numbers are stored as volumes
    RuleSpec::plain(r"(?P<Series>.*)(\b|_|)(S(?P<Volume>\d+))"),
    RuleSpec::plain(r"(vol_)(?P<Volume>\d+(\.\d)?)"),
    // Chinese
    RuleSpec::plain(r"第(?P<Volume>\d+)(卷|册)"),
    RuleSpec::plain(r"(卷|册)(?P<Volume>\d+)"),
    // Korean 권, 회, 화 and 장, and seasons
    RuleSpec::plain(r"제?(?P<Volume>\d+(\.\d)?)(권|회|화|장)"),
    RuleSpec::plain(r"시즌(?P<Volume>\d+\-?\d+)"),
    RuleSpec::plain(r"(?P<Volume>\d+(\-|~)?\d+?)시즌"),
    RuleSpec::plain(r"시즌(?P<Volume>\d+(\-|~)?\d+?)"),
    // Japanese
    RuleSpec::plain(r"(?P<Volume>\d+(?:(\-)\d+)?)巻"),
    // Russian Том / Тома, before or after the number
    RuleSpec::plain(r"Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(\-)\d+)?)"),
    RuleSpec::plain(r"(\s|_)?(?P<Volume>\d+(?:(\-)\d+)?)(\s|_)Том(а?)"),
];

const SERIES_SPECS: &[RuleSpec] = &[
    RuleSpec::plain(r"(?P<Series>.+?)(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(\-\d+)?(\.\d+)?)"),
    RuleSpec::plain(r"(?P<Series>.+?)Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(\-)\d+)?)"),
    RuleSpec::plain(r"(?P<Series>.+?)(\s|_)?(?P<Volume>\d+(?:(\-)\d+)?)(\s|_)Том(а?)"),
    RuleSpec::plain(
        r"(?P<Series>.+?)\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
    ),
    RuleSpec::plain(r"(?P<Series>.+?)(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)"),
    // SP01 special markers
    RuleSpec::plain(r"(?P<Series>.*)(\b|_|-|\s)(?:sp)\d"),
    RuleSpec::plain(
        r"(?P<Series>.+?)(\s|_|-)+(?:Vol(ume|\.)?(\s|_|-)+\d+)(\s|_|-)+(?:(Ch|Chapter|Ch)\.?)(\s|_|-)+(?P<Chapter>\d+)",
    ),
    // Title, optional chapter, then the volume
    RuleSpec::plain(
        r"^(?P<Series>.+?)(?:\s*|_|\-\s*)+(?:Ch(?:apter|\.|)\s*\d+(?:\.\d+)?(?:\s*|_|\-\s*)+)?Vol(?:ume|\.|)\s*(?:\d+|tbd)(?:\s|_|\-\s*).+",
    ),
    RuleSpec::plain(r"(?P<Series>.*)(\b|_)v(?P<Volume>\d+-?\d*)(\s|_|-)"),
    RuleSpec::plain(r"(?P<Series>.+?)( - )(?:v|vo|c|chapters)\d"),
    RuleSpec::plain(r"(?P<Series>.*)(?:, Chapter )(?P<Chapter>\d+)"),
    RuleSpec::plain(
        r"(?P<Series>.+?)(\s|_|-)(\s|_|-)((?:Chapter)|(?:Ch\.))(\s|_|-)(?P<Chapter>\d+)",
    ),
    RuleSpec::plain(r"(?P<Series>.+?):? (\b|_|-)(vol)\.?(\s|-|_)?\d+"),
    RuleSpec::plain(r"(?P<Series>.+?):?(\s|\b|_|-)Chapter(\s|\b|_|-)\d+(\s|\b|_|-)(vol)(ume)"),
    RuleSpec::plain(r"(?P<Series>.+?):? (\b|_|-)(vol)(ume)"),
    RuleSpec::plain(r"(?P<Series>.*)(\bc\d+\b)"),
    RuleSpec::plain(r"(?P<Series>.*)(?: _|-|\[|\()\s?vol(ume)?"),
    RuleSpec::guarded(
        r"^(?P<Series>.+?)(?:(ch(apter|\.)(\b|_|-|\s))|sp)\d",
        &[NotLeadingVolume],
    ),
    RuleSpec::plain(r"(?P<Series>.*) (\b|_|-)(v|ch\.?|c|s)\d+"),
    RuleSpec::plain(r"(?P<Series>.*)\s+(?P<Chapter>\d+)\s+(?:\(\d{4}\))\s"),
    RuleSpec::plain(r"(?P<Series>.*) (-)?(?P<Chapter>\d+(?:.\d+|-\d+)?) \(\d{4}\)"),
    RuleSpec::plain(
        r"(?P<Series>.*)(\s|_)(?:Episode|Ep\.?)(\s|_)(?P<Chapter>\d+(?:.\d+|-\d+)?)",
    ),
    // Series (2016-2019) (Digital)
    RuleSpec::plain(r"(?P<Series>.*)\(\d"),
    RuleSpec::plain(r"(?P<Series>.*)(\s|_)\((c\s|ch\s|chapter\s)"),
    RuleSpec::plain(r"(?P<Series>.+?)(\s|_|\-)+?chapters(\s|_|\-)+?\d+(\s|_|\-)+?"),
    RuleSpec::plain(r"(?P<Series>.+?)(\s|_|\-)+?\d+(\s|_|\-)\("),
    // Must stay ahead of the bare version rule below
    RuleSpec::plain(r"(?P<Series>.*)(v|s)\d+(-\d+)?(_|\s)"),
    RuleSpec::plain(r"(?P<Series>.*)(v|s)\d+(-\d+)?"),
    RuleSpec::plain(r"(?P<Series>.*)(_)(v|vo|c|volume)( |_)\d+"),
    RuleSpec::plain(r"(?P<Series>.*)( |_)(vol\d+)?( |_)(?:Chp\.? ?\d+)"),
    RuleSpec::plain(r"(?P<Series>.*)( |_)(?:Chp.? ?\d+)"),
    RuleSpec::guarded(r"^(?P<Series>.*)( |_)Chapter( |_)(\d+)", &[NotLeadingVolume]),
    RuleSpec::guarded(r"^(?P<Series>.*)( |_)(chapters( |_)?)\d+-?\d*", &[NotLeadingVolume]),
    RuleSpec::guarded(
        r"^(?P<Series>.*)( |_)(episode|chapter|(ch\.?) ?)\d+-?\d*",
        &[NotLeadingVolume],
    ),
    RuleSpec::guarded(r"^(?P<Series>.*)ch\d+-?\d?", &[NotLeadingVolume]),
    RuleSpec::plain(r"(?P<Series>.*)( ?- ?)Ch\.\d+-?\d*"),
    RuleSpec::guarded(
        r"^(?P<Series>.+?)(-|_|\s|#)\d+(-\d+)?(권|화|話)",
        &[NotLeadingVolume, NotLeadingChapter],
    ),
    // Very permissive, keep near the end. The number has to end at a word
    // boundary so a title token such as `2U` stays in the series.
    RuleSpec::guarded(
        r"^(?P<Series>.+?)(-|_|\s|#)\d+(-\d+)?(\b|_)",
        &[NotLeadingVolume, NotLeadingChapter],
    ),
    RuleSpec::guarded(
        r"^(?P<Series>.+?)(\s|_)(ch|chapter)?\.?\d+-?\d*(\b|_)",
        &[NotLeadingVolume, NotLeadingChapter],
    ),
    RuleSpec::guarded(r"^(?P<Series>.*)( |_|-)(ch?)\d+", &[NotLeadingVolume]),
    RuleSpec::plain(r"(?P<Series>.+?)第(?P<Volume>\d+(?:(\-)\d+)?)巻"),
];

const CHAPTER_SPECS: &[RuleSpec] = &[
    // Thai บทที่ / ตอนที่, with the volume in front
    RuleSpec::plain(
        r"(?P<Volume>((เล่ม|เล่มที่))?(\s|_)?\.?\d+)(\s|_)(บทที่|ตอนที่)\.?(\s|_)?(?P<Chapter>\d+)",
    ),
    // c01-c04, Ch.153-162.5
    RuleSpec::plain(r"(\b|_)(c|ch)(\.?\s?)(?P<Chapter>(\d+(\.\d)?)(-c?\d+(\.\d)?)?)"),
    RuleSpec::plain(r"v\d+\.(\s|_)(?P<Chapter>\d+(?:.\d+|-\d+)?)"),
    RuleSpec::plain(r"^(?P<Series>.*)(?: |_)#(?P<Chapter>\d+)"),
    RuleSpec::guarded(
        r"^(?P<Series>.*)\s?(?P<Sep>\s)Chapter\s(?P<Chapter>\d+(?:\.?[\d-]+)?)",
        &[NotLeadingVolume, NotAfter("vol. ")],
    ),
    RuleSpec::plain(r"(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)"),
    // Bare chapter number after the title, optionally followed by a year
    RuleSpec::lazy_prefix(
        r"\s(\d\s)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(?:\s\(\d{4}\))?(\b|_|-)",
        &[],
    ),
    RuleSpec::plain(r"(?P<Series>.*)\sS(?P<Volume>\d+)\s(?P<Chapter>\d+(?:.\d+|-\d+)?)"),
    // No `v` before the number. A trailing b marks a half chapter.
    RuleSpec::plain(
        r"^[^v]*(\s|_)(?P<Chapter>\.?\d+(?:.\d+|-\d+)?)(?P<Part>b)?(\s|_|\[|\()",
    ),
    RuleSpec::plain(r"Chapter(?P<Chapter>\d+(-\d+)?)"),
    RuleSpec::plain(r"(?P<Series>.*)(\s|_)(vol\d+)?(\s|_)Chp\.? ?(?P<Chapter>\d+)"),
    RuleSpec::plain(
        r"(?P<Volume>((vol|volume|v))?(\s|_)?\.?\d+)(\s|_)(Chp|Chapter)\.?(\s|_)?(?P<Chapter>\d+)",
    ),
    // Chinese, Korean and Japanese
    RuleSpec::plain(r"第(?P<Chapter>\d+)话"),
    RuleSpec::plain(r"제?(?P<Chapter>\d+\.?\d+)(회|화|장)"),
    RuleSpec::plain(r"第?(?P<Chapter>\d+(?:\.\d+|-\d+)?)話"),
    // Манга Том 1 2 Глава
    RuleSpec::guarded(
        r"\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
        &[NotAfter("том.")],
    ),
];

lazy_static! {
    /// Built-in volume rules, most specific first.
    pub(crate) static ref VOLUME_RULES: RuleSet = RuleSet::compile(Field::Volume, VOLUME_SPECS).unwrap();
    /// Built-in series rules, most specific first.
    pub(crate) static ref SERIES_RULES: RuleSet = RuleSet::compile(Field::Series, SERIES_SPECS).unwrap();
    /// Built-in chapter rules, most specific first.
    pub(crate) static ref CHAPTER_RULES: RuleSet = RuleSet::compile(Field::Chapter, CHAPTER_SPECS).unwrap();
}

use std::cmp::Ordering;

use super::Comparer;
use crate::types::{ChapterNumber, SpecialsPlacement};

/// Orders chapter numbers, placing specials first or last.
///
/// On the float form a value equal to zero (either sign) is the special
/// sentinel. Two specials are equal; numbered chapters compare by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterOrderComparer {
    placement: SpecialsPlacement,
}

impl ChapterOrderComparer {
    pub const fn new(placement: SpecialsPlacement) -> Self {
        Self { placement }
    }

    /// Specials ahead of numbered chapters, the order used inside a volume.
    pub const fn specials_first() -> Self {
        Self::new(SpecialsPlacement::First)
    }

    pub const fn specials_last() -> Self {
        Self::new(SpecialsPlacement::Last)
    }

    pub fn placement(&self) -> SpecialsPlacement {
        self.placement
    }

    fn special_vs_numbered(&self) -> Ordering {
        match self.placement {
            SpecialsPlacement::First => Ordering::Less,
            SpecialsPlacement::Last => Ordering::Greater,
        }
    }
}

impl Comparer<ChapterNumber> for ChapterOrderComparer {
    fn compare(&self, a: &ChapterNumber, b: &ChapterNumber) -> Ordering {
        match (a, b) {
            (ChapterNumber::Special, ChapterNumber::Special) => Ordering::Equal,
            (ChapterNumber::Special, ChapterNumber::Numbered(_)) => self.special_vs_numbered(),
            (ChapterNumber::Numbered(_), ChapterNumber::Special) => {
                self.special_vs_numbered().reverse()
            }
            (ChapterNumber::Numbered(x), ChapterNumber::Numbered(y)) => x.total_cmp(y),
        }
    }
}

impl Comparer<f64> for ChapterOrderComparer {
    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        self.compare(
            &ChapterNumber::from_sentinel(*a),
            &ChapterNumber::from_sentinel(*b),
        )
    }
}

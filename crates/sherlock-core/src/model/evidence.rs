use core::fmt;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};
use std::array;

/// Evidence symbols printed on the suspect cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Evidence {
    Pipe = 0,
    Lightbulb = 1,
    Fist = 2,
    Badge = 3,
    Journal = 4,
    Necklace = 5,
    Eye = 6,
    Skull = 7,
}

impl Evidence {
    pub const COUNT: usize = 8;

    pub const ALL: [Evidence; Evidence::COUNT] = [
        Evidence::Pipe,
        Evidence::Lightbulb,
        Evidence::Fist,
        Evidence::Badge,
        Evidence::Journal,
        Evidence::Necklace,
        Evidence::Eye,
        Evidence::Skull,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Evidence::Pipe),
            1 => Some(Evidence::Lightbulb),
            2 => Some(Evidence::Fist),
            3 => Some(Evidence::Badge),
            4 => Some(Evidence::Journal),
            5 => Some(Evidence::Necklace),
            6 => Some(Evidence::Eye),
            7 => Some(Evidence::Skull),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of copies of this symbol across the whole deck.
    pub const fn total_in_game(self) -> u8 {
        match self {
            Evidence::Pipe | Evidence::Lightbulb | Evidence::Fist | Evidence::Badge => 5,
            Evidence::Journal => 4,
            Evidence::Necklace | Evidence::Eye | Evidence::Skull => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Evidence::Pipe => "Pipe",
            Evidence::Lightbulb => "Lightbulb",
            Evidence::Fist => "Fist",
            Evidence::Badge => "Badge",
            Evidence::Journal => "Journal",
            Evidence::Necklace => "Necklace",
            Evidence::Eye => "Eye",
            Evidence::Skull => "Skull",
        }
    }

    /// Single-letter code used on score sheets.
    pub const fn code(self) -> char {
        match self {
            Evidence::Pipe => 'p',
            Evidence::Lightbulb => 'l',
            Evidence::Fist => 'f',
            Evidence::Badge => 'b',
            Evidence::Journal => 'j',
            Evidence::Necklace => 'n',
            Evidence::Eye => 'e',
            Evidence::Skull => 's',
        }
    }

    /// Column header used by compact tables (first five letters of the name).
    pub fn short_label(self) -> &'static str {
        let name = self.name();
        &name[..name.len().min(5)]
    }

    /// Accepts either the single-letter code or the full name, ignoring case.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                let code = code.to_ascii_lowercase();
                Evidence::ALL
                    .into_iter()
                    .find(|evidence| evidence.code() == code)
            }
            _ => Evidence::ALL
                .into_iter()
                .find(|evidence| value.eq_ignore_ascii_case(evidence.name())),
        }
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size map with one slot per evidence symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvidenceMap<T>([T; Evidence::COUNT]);

impl<T> EvidenceMap<T> {
    pub fn from_fn(mut f: impl FnMut(Evidence) -> T) -> Self {
        Self(array::from_fn(|index| f(Evidence::ALL[index])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Evidence, &T)> {
        Evidence::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; Evidence::COUNT] {
        &self.0
    }
}

impl<T: Copy + Default> Default for EvidenceMap<T> {
    fn default() -> Self {
        Self([T::default(); Evidence::COUNT])
    }
}

impl<T> Index<Evidence> for EvidenceMap<T> {
    type Output = T;

    fn index(&self, evidence: Evidence) -> &T {
        &self.0[evidence.index()]
    }
}

impl<T> IndexMut<Evidence> for EvidenceMap<T> {
    fn index_mut(&mut self, evidence: Evidence) -> &mut T {
        &mut self.0[evidence.index()]
    }
}

/// Bit-mask describing which symbols a card carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EvidenceMask(u8);

impl EvidenceMask {
    pub const EMPTY: Self = Self(0);

    pub const fn of(symbols: &[Evidence]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < symbols.len() {
            bits |= 1 << symbols[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, evidence: Evidence) -> bool {
        self.0 & (1 << evidence as u8) != 0
    }

    pub const fn with(mut self, evidence: Evidence) -> Self {
        self.0 |= 1 << evidence as u8;
        self
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Evidence> {
        Evidence::ALL
            .into_iter()
            .filter(move |evidence| self.contains(*evidence))
    }
}

#[cfg(test)]
mod tests {
    use super::{Evidence, EvidenceMap, EvidenceMask};

    #[test]
    fn deck_holds_thirty_three_symbols() {
        let total: u32 = Evidence::ALL
            .iter()
            .map(|evidence| evidence.total_in_game() as u32)
            .sum();
        assert_eq!(total, 33);
    }

    #[test]
    fn from_label_accepts_codes_and_names() {
        assert_eq!(Evidence::from_label("p"), Some(Evidence::Pipe));
        assert_eq!(Evidence::from_label("S"), Some(Evidence::Skull));
        assert_eq!(Evidence::from_label("lightbulb"), Some(Evidence::Lightbulb));
        assert_eq!(Evidence::from_label(" Necklace "), Some(Evidence::Necklace));
        assert_eq!(Evidence::from_label("x"), None);
        assert_eq!(Evidence::from_label("pi"), None);
    }

    #[test]
    fn index_roundtrip() {
        for (i, evidence) in Evidence::ALL.iter().enumerate() {
            assert_eq!(Evidence::from_index(i), Some(*evidence));
            assert_eq!(evidence.index(), i);
        }
        assert_eq!(Evidence::from_index(8), None);
    }

    #[test]
    fn short_label_truncates_long_names() {
        assert_eq!(Evidence::Lightbulb.short_label(), "Light");
        assert_eq!(Evidence::Eye.short_label(), "Eye");
    }

    #[test]
    fn map_indexes_by_symbol() {
        let mut map: EvidenceMap<u8> = EvidenceMap::default();
        map[Evidence::Journal] = 4;
        assert_eq!(map[Evidence::Journal], 4);
        assert_eq!(map[Evidence::Pipe], 0);
        let totals = EvidenceMap::from_fn(Evidence::total_in_game);
        assert_eq!(totals[Evidence::Eye], 3);
        assert_eq!(totals.iter().count(), Evidence::COUNT);
    }

    #[test]
    fn mask_tracks_membership() {
        let mask = EvidenceMask::of(&[Evidence::Skull, Evidence::Fist]);
        assert!(mask.contains(Evidence::Skull));
        assert!(!mask.contains(Evidence::Pipe));
        assert_eq!(mask.len(), 2);
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![Evidence::Fist, Evidence::Skull]
        );
        assert!(EvidenceMask::EMPTY.with(Evidence::Eye).contains(Evidence::Eye));
    }
}

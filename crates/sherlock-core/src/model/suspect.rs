use crate::model::evidence::{Evidence, EvidenceMap, EvidenceMask};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suspect {
    SebastianMoran = 0,
    IreneAdler = 1,
    InspectorLestrade = 2,
    InspectorGregson = 3,
    InspectorBaynes = 4,
    InspectorBradstreet = 5,
    InspectorHopkins = 6,
    SherlockHolmes = 7,
    JohnWatson = 8,
    MycroftHolmes = 9,
    MrsHudson = 10,
    MaryMorstan = 11,
    JamesMoriarty = 12,
}

impl Suspect {
    pub const COUNT: usize = 13;

    pub const ALL: [Suspect; Suspect::COUNT] = [
        Suspect::SebastianMoran,
        Suspect::IreneAdler,
        Suspect::InspectorLestrade,
        Suspect::InspectorGregson,
        Suspect::InspectorBaynes,
        Suspect::InspectorBradstreet,
        Suspect::InspectorHopkins,
        Suspect::SherlockHolmes,
        Suspect::JohnWatson,
        Suspect::MycroftHolmes,
        Suspect::MrsHudson,
        Suspect::MaryMorstan,
        Suspect::JamesMoriarty,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Suspect::COUNT {
            Some(Suspect::ALL[index])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suspect::SebastianMoran => "Sebastian Moran",
            Suspect::IreneAdler => "Irene Adler",
            Suspect::InspectorLestrade => "Inspector Lestrade",
            Suspect::InspectorGregson => "Inspector Gregson",
            Suspect::InspectorBaynes => "Inspector Baynes",
            Suspect::InspectorBradstreet => "Inspector Bradstreet",
            Suspect::InspectorHopkins => "Inspector Hopkins",
            Suspect::SherlockHolmes => "Sherlock Holmes",
            Suspect::JohnWatson => "John Watson",
            Suspect::MycroftHolmes => "Mycroft Holmes",
            Suspect::MrsHudson => "Mrs. Hudson",
            Suspect::MaryMorstan => "Mary Morstan",
            Suspect::JamesMoriarty => "James Moriarty",
        }
    }

    /// Symbols printed on this suspect's card.
    pub const fn evidence(self) -> EvidenceMask {
        use Evidence::*;
        match self {
            Suspect::SebastianMoran => EvidenceMask::of(&[Skull, Fist]),
            Suspect::IreneAdler => EvidenceMask::of(&[Skull, Lightbulb, Necklace]),
            Suspect::InspectorLestrade => EvidenceMask::of(&[Badge, Eye, Journal]),
            Suspect::InspectorGregson => EvidenceMask::of(&[Badge, Fist, Journal]),
            Suspect::InspectorBaynes => EvidenceMask::of(&[Badge, Lightbulb]),
            Suspect::InspectorBradstreet => EvidenceMask::of(&[Badge, Fist]),
            Suspect::InspectorHopkins => EvidenceMask::of(&[Badge, Pipe, Eye]),
            Suspect::SherlockHolmes => EvidenceMask::of(&[Pipe, Lightbulb, Fist]),
            Suspect::JohnWatson => EvidenceMask::of(&[Pipe, Eye, Fist]),
            Suspect::MycroftHolmes => EvidenceMask::of(&[Pipe, Lightbulb, Journal]),
            Suspect::MrsHudson => EvidenceMask::of(&[Pipe, Necklace]),
            Suspect::MaryMorstan => EvidenceMask::of(&[Journal, Necklace]),
            Suspect::JamesMoriarty => EvidenceMask::of(&[Skull, Lightbulb]),
        }
    }

    pub const fn carries(self, evidence: Evidence) -> bool {
        self.evidence().contains(evidence)
    }

    /// Case-insensitive lookup by full name. The trailing period of "Mrs." is optional.
    pub fn from_name(value: &str) -> Option<Self> {
        let wanted = normalize_name(value);
        Suspect::ALL
            .into_iter()
            .find(|suspect| normalize_name(suspect.name()) == wanted)
    }
}

fn normalize_name(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts how many of each symbol appear across a set of suspect cards.
pub fn evidence_counts<'a>(suspects: impl IntoIterator<Item = &'a Suspect>) -> EvidenceMap<u8> {
    let mut counts: EvidenceMap<u8> = EvidenceMap::default();
    for suspect in suspects {
        for evidence in suspect.evidence().iter() {
            counts[evidence] += 1;
        }
    }
    counts
}

/// Per-suspect flags set from outside the deduction rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectFlags {
    /// A player is known to hold this card, so it cannot be the solution.
    pub physically_held: bool,
    /// Crossed off by hand (for example after a failed accusation).
    pub manually_cleared: bool,
}

/// The thirteen suspects plus their mutable elimination flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspectRegistry {
    flags: [SuspectFlags; Suspect::COUNT],
}

impl SuspectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self, suspect: Suspect) -> SuspectFlags {
        self.flags[suspect.index()]
    }

    pub fn set_held(&mut self, suspect: Suspect, held: bool) {
        self.flags[suspect.index()].physically_held = held;
    }

    pub fn toggle_held(&mut self, suspect: Suspect) {
        let flags = &mut self.flags[suspect.index()];
        flags.physically_held = !flags.physically_held;
    }

    pub fn clear(&mut self, suspect: Suspect) {
        self.flags[suspect.index()].manually_cleared = true;
    }

    pub fn held(&self) -> impl Iterator<Item = Suspect> + '_ {
        Suspect::ALL
            .into_iter()
            .filter(|suspect| self.flags(*suspect).physically_held)
    }
}

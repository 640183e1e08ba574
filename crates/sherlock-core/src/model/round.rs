use core::fmt;
use serde::{Deserialize, Serialize};

/// Per-player cyclic marker tagging observations with the turn cycle they belong to.
///
/// Two observations of the same symbol under the same marker describe the same
/// visible hand and are therefore duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoundMarker {
    #[default]
    First = 0,
    Second = 1,
    Third = 2,
}

impl RoundMarker {
    pub const CYCLE: [RoundMarker; 3] = [RoundMarker::First, RoundMarker::Second, RoundMarker::Third];

    pub const fn next(self) -> RoundMarker {
        match self {
            RoundMarker::First => RoundMarker::Second,
            RoundMarker::Second => RoundMarker::Third,
            RoundMarker::Third => RoundMarker::First,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RoundMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Tightening policy for observations.
///
/// In hard mode a player cannot see one of their own cards, so every answer may
/// undercount by one and the baseline rules loosen accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMode {
    #[default]
    Normal,
    Hard,
}

impl DeductionMode {
    pub const fn from_flag(hard_mode: bool) -> Self {
        if hard_mode {
            DeductionMode::Hard
        } else {
            DeductionMode::Normal
        }
    }

    pub const fn is_hard(self) -> bool {
        matches!(self, DeductionMode::Hard)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeductionMode::Normal => "normal",
            DeductionMode::Hard => "hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DeductionMode, RoundMarker};

    #[test]
    fn marker_wraps_after_three_turns() {
        let mut marker = RoundMarker::default();
        for expected in [RoundMarker::Second, RoundMarker::Third, RoundMarker::First] {
            marker = marker.next();
            assert_eq!(marker, expected);
        }
    }

    #[test]
    fn cycle_indices_are_sequential() {
        for (i, marker) in RoundMarker::CYCLE.iter().enumerate() {
            assert_eq!(marker.index(), i);
        }
    }

    #[test]
    fn mode_from_flag() {
        assert!(DeductionMode::from_flag(true).is_hard());
        assert_eq!(DeductionMode::from_flag(false), DeductionMode::Normal);
        assert_eq!(DeductionMode::Hard.as_str(), "hard");
    }
}

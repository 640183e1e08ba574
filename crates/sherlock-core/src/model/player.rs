use core::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;

/// Cards dealt to the players; the thirteenth card is the solution.
pub const DEALT_CARDS: usize = 12;

/// Seat index at the table, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        assert!(index < MAX_PLAYERS, "seat index out of range");
        Self(index as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat clockwise at a table of `players` seats.
    pub const fn next(self, players: usize) -> PlayerId {
        PlayerId::new((self.index() + 1) % players)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0 + 1)
    }
}

/// Hand size for a table of `players` seats (3 players hold 4 cards, 4 players hold 3).
pub const fn hand_size_for(players: usize) -> u8 {
    (DEALT_CARDS / players) as u8
}

use super::table::Table;
use crate::elimination::{self, EvidenceVerdict};
use crate::model::bound::Bound;
use crate::model::evidence::Evidence;
use crate::model::round::{DeductionMode, RoundMarker};
use crate::model::suspect::{Suspect, SuspectFlags};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of a table for rendering. Never loaded back.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSnapshot {
    pub mode: DeductionMode,
    pub current_player: String,
    pub over: bool,
    pub players: Vec<PlayerRow>,
    pub solution: BTreeMap<Evidence, Bound>,
    pub suspects: Vec<SuspectRow>,
    pub remaining: Vec<Suspect>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerRow {
    pub name: String,
    pub capacity: u8,
    pub protagonist: bool,
    pub active: bool,
    pub has_won: bool,
    pub round: RoundMarker,
    pub bounds: BTreeMap<Evidence, Bound>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuspectRow {
    pub suspect: Suspect,
    pub name: &'static str,
    pub eliminated: bool,
    pub flags: SuspectFlags,
    pub verdicts: BTreeMap<Evidence, EvidenceVerdict>,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let solution = table.solution_bounds();
        let players = table
            .players()
            .iter()
            .map(|ledger| PlayerRow {
                name: ledger.name().to_string(),
                capacity: ledger.capacity(),
                protagonist: ledger.is_protagonist(),
                active: ledger.is_active(),
                has_won: ledger.has_won(),
                round: ledger.round(),
                bounds: ledger.bounds().iter().map(|(e, b)| (e, *b)).collect(),
            })
            .collect();
        let suspects = Suspect::ALL
            .into_iter()
            .map(|suspect| {
                let flags = table.suspects().flags(suspect);
                SuspectRow {
                    suspect,
                    name: suspect.name(),
                    eliminated: elimination::is_eliminated(suspect, flags, &solution),
                    flags,
                    verdicts: elimination::verdicts(suspect, &solution)
                        .iter()
                        .map(|(e, v)| (e, *v))
                        .collect(),
                }
            })
            .collect();

        TableSnapshot {
            mode: table.mode(),
            current_player: table.player(table.current_player()).name().to_string(),
            over: table.is_over(),
            players,
            solution: solution.iter().collect(),
            suspects,
            remaining: elimination::remaining_suspects(table.suspects(), &solution),
        }
    }

    pub fn to_json(table: &Table) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(table))
    }
}

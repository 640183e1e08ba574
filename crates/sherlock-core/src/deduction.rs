//! Aggregate reasoning across every player's ledger.
//!
//! Nothing here holds state: the solution bounds are recomputed from the ledgers on
//! every call, and propagation only ever tightens the ledgers it is handed.

use crate::ledger::PlayerLedger;
use crate::model::bound::Bound;
use crate::model::evidence::{Evidence, EvidenceMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What is known about the solution card: for each symbol, does it carry it (0 or 1)?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionBounds {
    bounds: EvidenceMap<Bound>,
}

impl SolutionBounds {
    pub fn bound(&self, evidence: Evidence) -> Bound {
        self.bounds[evidence]
    }

    pub fn is_conclusive(&self, evidence: Evidence) -> bool {
        self.bounds[evidence].is_exact()
    }

    /// The solution certainly carries `evidence`.
    pub fn has(&self, evidence: Evidence) -> bool {
        self.bounds[evidence].min() == 1
    }

    /// The solution certainly lacks `evidence`.
    pub fn lacks(&self, evidence: Evidence) -> bool {
        self.bounds[evidence].max() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Evidence, Bound)> + '_ {
        self.bounds.iter().map(|(evidence, bound)| (evidence, *bound))
    }
}

/// Sum of the lower bounds for `evidence` over `ledgers`.
pub fn found_min<'a>(ledgers: impl IntoIterator<Item = &'a PlayerLedger>, evidence: Evidence) -> u16 {
    ledgers
        .into_iter()
        .map(|ledger| ledger.bound(evidence).min() as u16)
        .sum()
}

/// Sum of the upper bounds for `evidence` over `ledgers`.
pub fn found_max<'a>(ledgers: impl IntoIterator<Item = &'a PlayerLedger>, evidence: Evidence) -> u16 {
    ledgers
        .into_iter()
        .map(|ledger| ledger.bound(evidence).max() as u16)
        .sum()
}

/// Derives the solution's bounds: every copy not in a player's hand is in the solution,
/// which holds at most one copy of each symbol.
pub fn compute_solution_bounds(ledgers: &[PlayerLedger]) -> SolutionBounds {
    let bounds = EvidenceMap::from_fn(|evidence| {
        let total = evidence.total_in_game() as i32;
        let min = (total - found_max(ledgers, evidence) as i32).clamp(0, 1) as u8;
        let max = (total - found_min(ledgers, evidence) as i32).clamp(0, 1) as u8;
        // Contradictory observations can invert the pair; keep the interval well formed.
        Bound::new(min, max).unwrap_or(Bound::exact(max))
    });
    SolutionBounds { bounds }
}

/// Tightens every non-protagonist ledger against the copies already located elsewhere,
/// repeating full passes over all players until nothing changes. Returns the number of
/// passes that changed at least one bound.
pub fn propagate_non_protagonists(ledgers: &mut [PlayerLedger]) -> usize {
    let mut productive_passes = 0;
    loop {
        let mut changed = false;
        for evidence in Evidence::ALL {
            for index in 0..ledgers.len() {
                if ledgers[index].is_protagonist() {
                    continue;
                }
                changed |= tighten_player(ledgers, index, evidence);
            }
        }
        if !changed {
            break;
        }
        productive_passes += 1;
    }

    debug!(
        target: "sherlock_core::deduction",
        players = ledgers.len(),
        productive_passes,
        "propagation reached fixed point"
    );
    productive_passes
}

fn tighten_player(ledgers: &mut [PlayerLedger], index: usize, evidence: Evidence) -> bool {
    let total = evidence.total_in_game() as u16;
    let located_elsewhere = found_min(
        ledgers
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, ledger)| ledger),
        evidence,
    );
    let max_outstanding = total.saturating_sub(located_elsewhere).min(u8::MAX as u16) as u8;
    let mut changed = ledgers[index].set_max(evidence, max_outstanding);

    // With a single copy unaccounted for it can only be the solution's, so every
    // player must be holding their maximum.
    let min_outstanding = total as i32 - found_max(ledgers.iter(), evidence) as i32;
    if min_outstanding == 1 {
        let ceiling = ledgers[index].bound(evidence).max();
        changed |= ledgers[index].set_min(evidence, ceiling);
    }
    changed
}

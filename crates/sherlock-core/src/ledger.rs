//! Per-player bound tracking and the deduplicated observation history behind it.

use crate::model::bound::Bound;
use crate::model::evidence::{Evidence, EvidenceMap};
use crate::model::round::{DeductionMode, RoundMarker};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A group question: did this player raise a hand for `evidence`?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationRecord {
    pub round: RoundMarker,
    pub evidence: Evidence,
    pub raised_hand: bool,
}

/// A private question: how many `evidence` symbols did this player admit to?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterrogationRecord {
    pub round: RoundMarker,
    pub evidence: Evidence,
    pub declared_count: u8,
}

/// Everything known about one player's hand.
#[derive(Debug, Clone)]
pub struct PlayerLedger {
    name: String,
    capacity: u8,
    mode: DeductionMode,
    bounds: EvidenceMap<Bound>,
    round: RoundMarker,
    investigations: Vec<InvestigationRecord>,
    interrogations: Vec<InterrogationRecord>,
    is_protagonist: bool,
    active: bool,
    has_won: bool,
}

impl PlayerLedger {
    /// Creates a ledger with every symbol open on `[0, capacity]`.
    pub fn new(
        name: impl Into<String>,
        capacity: u8,
        is_protagonist: bool,
        mode: DeductionMode,
    ) -> Self {
        assert!(capacity > 0, "a player holds at least one card");
        Self {
            name: name.into(),
            capacity,
            mode,
            bounds: EvidenceMap::from_fn(|_| Bound::open(capacity)),
            round: RoundMarker::default(),
            investigations: Vec::new(),
            interrogations: Vec::new(),
            is_protagonist,
            active: true,
            has_won: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn mode(&self) -> DeductionMode {
        self.mode
    }

    pub fn is_protagonist(&self) -> bool {
        self.is_protagonist
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn round(&self) -> RoundMarker {
        self.round
    }

    pub fn bound(&self, evidence: Evidence) -> Bound {
        self.bounds[evidence]
    }

    pub fn bounds(&self) -> &EvidenceMap<Bound> {
        &self.bounds
    }

    pub fn investigations(&self) -> &[InvestigationRecord] {
        &self.investigations
    }

    pub fn interrogations(&self) -> &[InterrogationRecord] {
        &self.interrogations
    }

    pub fn is_solved(&self, evidence: Evidence) -> bool {
        self.bounds[evidence].is_exact()
    }

    /// Raises the minimum for `evidence`; clamped, never fails. Returns `true` on change.
    pub fn set_min(&mut self, evidence: Evidence, value: u8) -> bool {
        let changed = self.bounds[evidence].raise_min(value);
        if changed {
            trace!(
                target: "sherlock_core::ledger",
                player = %self.name,
                evidence = %evidence,
                min = self.bounds[evidence].min(),
                "raised minimum"
            );
        }
        changed
    }

    /// Lowers the maximum for `evidence`; clamped, never fails. Returns `true` on change.
    pub fn set_max(&mut self, evidence: Evidence, value: u8) -> bool {
        let changed = self.bounds[evidence].lower_max(value);
        if changed {
            trace!(
                target: "sherlock_core::ledger",
                player = %self.name,
                evidence = %evidence,
                max = self.bounds[evidence].max(),
                "lowered maximum"
            );
        }
        changed
    }

    /// Pins `evidence` to an exact count (used for the protagonist's own hand).
    pub fn set_exact(&mut self, evidence: Evidence, value: u8) {
        self.set_min(evidence, value);
        self.set_max(evidence, value);
    }

    /// Moves the round marker on; called once per completed turn of this player.
    pub fn advance_round(&mut self) {
        self.round = self.round.next();
    }

    pub fn retire(&mut self) {
        self.active = false;
    }

    pub fn declare_winner(&mut self) {
        self.has_won = true;
    }

    /// Applies a group question. Returns `true` when a new record was appended; a
    /// repeated `(round, evidence)` observation is not recorded again but still
    /// tightens, which leaves the state unchanged when the answer is the same.
    pub fn record_investigation(&mut self, evidence: Evidence, raised_hand: bool) -> bool {
        let round = self.round;
        let appended = !self
            .investigations
            .iter()
            .any(|record| record.round == round && record.evidence == evidence);
        if appended {
            self.investigations.push(InvestigationRecord {
                round,
                evidence,
                raised_hand,
            });
        }

        if raised_hand {
            self.set_min(evidence, 1);
        } else {
            let ceiling = if self.mode.is_hard() { 1 } else { 0 };
            self.set_max(evidence, ceiling);
        }

        if self.mode.is_hard() {
            self.apply_hard_investigation_rules(evidence);
        }

        debug!(
            target: "sherlock_core::ledger",
            player = %self.name,
            %round,
            %evidence,
            raised_hand,
            appended,
            bound = %self.bounds[evidence],
            "investigation recorded"
        );
        appended
    }

    fn apply_hard_investigation_rules(&mut self, evidence: Evidence) {
        let (asked, raised) = self
            .investigations
            .iter()
            .filter(|record| record.evidence == evidence)
            .fold((0usize, 0usize), |(asked, raised), record| {
                (asked + 1, raised + usize::from(record.raised_hand))
            });

        // Each round hides a different card, so repeated silence rules out a single copy.
        if asked > 1 && raised == 0 {
            self.set_max(evidence, 0);
        }

        // A hand raised with every card hidden in turn means a hidden copy never mattered.
        if asked == self.capacity as usize && raised == asked {
            self.set_min(evidence, 2);
        }
    }

    /// Applies a private answer. `declared_count` must not exceed the capacity.
    /// Returns `true` when a new record was appended.
    pub fn record_interrogation(&mut self, evidence: Evidence, declared_count: u8) -> bool {
        assert!(
            declared_count <= self.capacity,
            "declared count {declared_count} exceeds hand size {}",
            self.capacity
        );
        let round = self.round;
        let appended = !self
            .interrogations
            .iter()
            .any(|record| record.round == round && record.evidence == evidence);
        if appended {
            self.interrogations.push(InterrogationRecord {
                round,
                evidence,
                declared_count,
            });
        }

        self.set_min(evidence, declared_count);
        let ceiling = if self.mode.is_hard() {
            declared_count.saturating_add(1)
        } else {
            declared_count
        };
        self.set_max(evidence, ceiling);

        if self.mode.is_hard() {
            self.apply_hard_interrogation_rules(evidence);
        }

        debug!(
            target: "sherlock_core::ledger",
            player = %self.name,
            %round,
            %evidence,
            declared_count,
            appended,
            bound = %self.bounds[evidence],
            "interrogation recorded"
        );
        appended
    }

    fn apply_hard_interrogation_rules(&mut self, evidence: Evidence) {
        let mut counts = self
            .interrogations
            .iter()
            .filter(|record| record.evidence == evidence)
            .map(|record| record.declared_count);
        let Some(first) = counts.next() else {
            return;
        };
        let mut repeats = 1usize;
        for count in counts {
            if count != first {
                return;
            }
            repeats += 1;
        }
        if repeats < 2 {
            return;
        }

        if first == 0 {
            self.set_max(evidence, 0);
        } else if first == self.capacity - 1 {
            self.set_min(evidence, self.capacity);
        }
    }
}

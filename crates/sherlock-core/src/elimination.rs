//! Classifying suspects against what is known about the solution card.

use crate::deduction::SolutionBounds;
use crate::model::evidence::{Evidence, EvidenceMap};
use crate::model::suspect::{Suspect, SuspectFlags, SuspectRegistry};
use serde::{Deserialize, Serialize};

/// How one symbol on the solution relates to one suspect's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceVerdict {
    /// The solution's symbol is not yet known.
    Unknown,
    Matches,
    Contradicts,
}

/// Whether `suspect`'s card agrees with the solution on `evidence`.
///
/// Inconclusive symbols always match so that they can never eliminate anyone.
pub fn matches_evidence(suspect: Suspect, evidence: Evidence, solution: &SolutionBounds) -> bool {
    if solution.lacks(evidence) {
        !suspect.carries(evidence)
    } else if solution.has(evidence) {
        suspect.carries(evidence)
    } else {
        true
    }
}

pub fn evidence_verdict(suspect: Suspect, evidence: Evidence, solution: &SolutionBounds) -> EvidenceVerdict {
    if !solution.is_conclusive(evidence) {
        EvidenceVerdict::Unknown
    } else if matches_evidence(suspect, evidence, solution) {
        EvidenceVerdict::Matches
    } else {
        EvidenceVerdict::Contradicts
    }
}

pub fn verdicts(suspect: Suspect, solution: &SolutionBounds) -> EvidenceMap<EvidenceVerdict> {
    EvidenceMap::from_fn(|evidence| evidence_verdict(suspect, evidence, solution))
}

/// A suspect is out when someone holds the card, it was crossed off by hand, or any
/// conclusive symbol disagrees with its card.
pub fn is_eliminated(suspect: Suspect, flags: SuspectFlags, solution: &SolutionBounds) -> bool {
    flags.physically_held
        || flags.manually_cleared
        || Evidence::ALL.into_iter().any(|evidence| {
            solution.is_conclusive(evidence) && !matches_evidence(suspect, evidence, solution)
        })
}

/// Suspects still in the running, in registry order.
pub fn remaining_suspects(registry: &SuspectRegistry, solution: &SolutionBounds) -> Vec<Suspect> {
    Suspect::ALL
        .into_iter()
        .filter(|suspect| !is_eliminated(*suspect, registry.flags(*suspect), solution))
        .collect()
}

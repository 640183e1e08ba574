#![deny(warnings)]
//! Deduction engine for Baker Street style evidence games.
//!
//! - `model`: symbols, suspects, bounds and the per-player round marker.
//! - `ledger`: per-player bounds plus the deduplicated observation history.
//! - `deduction`: solution bounds and cross-player propagation.
//! - `elimination`: which suspects the known evidence rules out.
//! - `game`: the table that sequences observations and renders snapshots.

pub mod deduction;
pub mod elimination;
pub mod game;
pub mod ledger;
pub mod model;

pub use deduction::SolutionBounds;
pub use elimination::EvidenceVerdict;
pub use game::{Table, TableSnapshot};
pub use ledger::{InterrogationRecord, InvestigationRecord, PlayerLedger};
pub use model::bound::Bound;
pub use model::evidence::{Evidence, EvidenceMap, EvidenceMask};
pub use model::player::{PlayerId, hand_size_for};
pub use model::round::{DeductionMode, RoundMarker};
pub use model::suspect::{Suspect, SuspectFlags, SuspectRegistry};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "sherlock"
    }

    pub const fn codename() -> &'static str {
        "Baker Street Dozen"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

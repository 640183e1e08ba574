use crate::deduction::{self, SolutionBounds};
use crate::elimination::{self, EvidenceVerdict};
use crate::ledger::PlayerLedger;
use crate::model::bound::Bound;
use crate::model::evidence::Evidence;
use crate::model::player::{MAX_PLAYERS, PlayerId};
use crate::model::round::DeductionMode;
use crate::model::suspect::{Suspect, SuspectRegistry, evidence_counts};
use tracing::{debug, info};

/// One game in progress: the players' ledgers, the suspect flags and whose turn it is.
///
/// Every mutating call records its observation and runs propagation before returning,
/// so the queries always see a fully tightened state.
#[derive(Debug, Clone)]
pub struct Table {
    mode: DeductionMode,
    players: Vec<PlayerLedger>,
    suspects: SuspectRegistry,
    current: PlayerId,
}

impl Table {
    pub fn new(mode: DeductionMode) -> Self {
        Self {
            mode,
            players: Vec::with_capacity(MAX_PLAYERS),
            suspects: SuspectRegistry::new(),
            current: PlayerId::new(0),
        }
    }

    pub fn mode(&self) -> DeductionMode {
        self.mode
    }

    /// Seats a new player in turn order. At most one player may be the protagonist.
    pub fn add_player(&mut self, name: impl Into<String>, capacity: u8, is_protagonist: bool) -> PlayerId {
        assert!(self.players.len() < MAX_PLAYERS, "table is full");
        assert!(
            !(is_protagonist && self.protagonist().is_some()),
            "only one protagonist per table"
        );
        let id = PlayerId::new(self.players.len());
        let ledger = PlayerLedger::new(name, capacity, is_protagonist, self.mode);
        debug!(
            target: "sherlock_core::table",
            player = ledger.name(),
            seat = id.index(),
            capacity,
            is_protagonist,
            "player seated"
        );
        self.players.push(ledger);
        id
    }

    pub fn players(&self) -> &[PlayerLedger] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &PlayerLedger {
        &self.players[id.index()]
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len()).map(PlayerId::new)
    }

    pub fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|ledger| ledger.name().eq_ignore_ascii_case(name.trim()))
            .map(PlayerId::new)
    }

    pub fn protagonist(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .position(PlayerLedger::is_protagonist)
            .map(PlayerId::new)
    }

    pub fn non_protagonists(&self) -> Vec<PlayerId> {
        self.player_ids()
            .filter(|id| !self.player(*id).is_protagonist())
            .collect()
    }

    pub fn suspects(&self) -> &SuspectRegistry {
        &self.suspects
    }

    /// Fixes the protagonist's ledger to the exact symbol counts of their hand, caps
    /// everyone else by what remains, and marks those suspects as held.
    pub fn set_protagonist_hand(&mut self, hand: &[Suspect]) {
        let protagonist = self
            .protagonist()
            .expect("a protagonist must be seated before their hand is set");
        assert_eq!(
            hand.len(),
            self.player(protagonist).capacity() as usize,
            "starting hand must fill the protagonist's capacity"
        );

        let counts = evidence_counts(hand);
        for evidence in Evidence::ALL {
            self.players[protagonist.index()].set_exact(evidence, counts[evidence]);
            let known = deduction::found_min(&self.players, evidence);
            let outstanding = (evidence.total_in_game() as u16).saturating_sub(known) as u8;
            for ledger in self.players.iter_mut().filter(|l| !l.is_protagonist()) {
                ledger.set_max(evidence, outstanding);
            }
        }
        for suspect in hand {
            self.suspects.set_held(*suspect, true);
        }
        let names: Vec<&str> = hand.iter().map(|suspect| suspect.name()).collect();
        info!(target: "sherlock_core::table", hand = ?names, "protagonist hand set");
        deduction::propagate_non_protagonists(&mut self.players);
    }

    pub fn record_investigation(&mut self, player: PlayerId, evidence: Evidence, raised_hand: bool) {
        self.players[player.index()].record_investigation(evidence, raised_hand);
        deduction::propagate_non_protagonists(&mut self.players);
    }

    pub fn record_interrogation(&mut self, player: PlayerId, evidence: Evidence, count: u8) {
        self.players[player.index()].record_interrogation(evidence, count);
        deduction::propagate_non_protagonists(&mut self.players);
    }

    pub fn advance_round(&mut self, player: PlayerId) {
        self.players[player.index()].advance_round();
    }

    pub fn bounds(&self, player: PlayerId, evidence: Evidence) -> Bound {
        self.player(player).bound(evidence)
    }

    pub fn solution_bounds(&self) -> SolutionBounds {
        deduction::compute_solution_bounds(&self.players)
    }

    pub fn is_eliminated(&self, suspect: Suspect) -> bool {
        elimination::is_eliminated(suspect, self.suspects.flags(suspect), &self.solution_bounds())
    }

    pub fn evidence_verdict(&self, suspect: Suspect, evidence: Evidence) -> EvidenceVerdict {
        elimination::evidence_verdict(suspect, evidence, &self.solution_bounds())
    }

    pub fn remaining_suspects(&self) -> Vec<Suspect> {
        elimination::remaining_suspects(&self.suspects, &self.solution_bounds())
    }

    pub fn toggle_held(&mut self, suspect: Suspect) {
        self.suspects.toggle_held(suspect);
    }

    pub fn clear_suspect(&mut self, suspect: Suspect) {
        self.suspects.clear(suspect);
        debug!(target: "sherlock_core::table", suspect = suspect.name(), "suspect cleared");
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn set_current_player(&mut self, player: PlayerId) {
        assert!(player.index() < self.players.len(), "unknown player {player}");
        self.current = player;
    }

    /// Players who answer the current player's questions: everyone except the asker and
    /// the protagonist, whose hand is already known exactly.
    pub fn answering_players(&self) -> Vec<PlayerId> {
        self.player_ids()
            .filter(|id| *id != self.current && !self.player(*id).is_protagonist())
            .collect()
    }

    /// The current player asks the whole table about `evidence`; `raised` lists the
    /// answering players who raised a hand.
    pub fn investigate(&mut self, evidence: Evidence, raised: &[PlayerId]) {
        for id in self.answering_players() {
            let raised_hand = raised.contains(&id);
            self.players[id.index()].record_investigation(evidence, raised_hand);
        }
        deduction::propagate_non_protagonists(&mut self.players);
    }

    /// The current player privately asks `target` about `evidence`. Answers given by the
    /// protagonist carry no new information and are not recorded; returns whether the
    /// answer was applied.
    pub fn interrogate(&mut self, target: PlayerId, evidence: Evidence, count: u8) -> bool {
        assert_ne!(target, self.current, "players do not interrogate themselves");
        if self.player(target).is_protagonist() {
            return false;
        }
        self.record_interrogation(target, evidence, count);
        true
    }

    /// Completes the current player's turn and passes play to the next seat.
    pub fn end_turn(&mut self) {
        let finished = self.current;
        self.advance_round(finished);
        self.current = finished.next(self.players.len());
        debug!(
            target: "sherlock_core::table",
            finished = self.player(finished).name(),
            next = self.player(self.current).name(),
            "turn ended"
        );
    }

    /// A player made a wrong accusation and is out of the game.
    pub fn retire_player(&mut self, player: PlayerId) {
        self.players[player.index()].retire();
        info!(target: "sherlock_core::table", player = self.player(player).name(), "player retired");
    }

    pub fn declare_winner(&mut self, player: PlayerId) {
        self.players[player.index()].declare_winner();
        info!(target: "sherlock_core::table", player = self.player(player).name(), "winner declared");
    }

    /// Someone has won, or at most one player is still in the game.
    pub fn is_over(&self) -> bool {
        let someone_won = self.players.iter().any(PlayerLedger::has_won);
        let active = self.players.iter().filter(|l| l.is_active()).count();
        someone_won || active <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::hand_size_for;

    fn three_player_table(mode: DeductionMode) -> Table {
        let mut table = Table::new(mode);
        let size = hand_size_for(3);
        table.add_player("Ada", size, true);
        table.add_player("Basil", size, false);
        table.add_player("Clara", size, false);
        table
    }

    #[test]
    fn protagonist_hand_sets_exact_counts() {
        let mut table = three_player_table(DeductionMode::Normal);
        table.set_protagonist_hand(&[
            Suspect::IreneAdler,
            Suspect::MrsHudson,
            Suspect::InspectorBaynes,
            Suspect::MaryMorstan,
        ]);
        let ada = PlayerId::new(0);
        assert_eq!(table.bounds(ada, Evidence::Necklace), Bound::exact(3));
        assert_eq!(table.bounds(ada, Evidence::Lightbulb), Bound::exact(2));
        assert_eq!(table.bounds(ada, Evidence::Eye), Bound::exact(0));
        for evidence in Evidence::ALL {
            assert!(table.player(ada).is_solved(evidence));
        }
        // All three necklaces are in Ada's hand.
        assert_eq!(table.bounds(PlayerId::new(1), Evidence::Necklace), Bound::exact(0));
        assert!(table.solution_bounds().lacks(Evidence::Necklace));
        assert!(table.is_eliminated(Suspect::IreneAdler));
        assert!(table.is_eliminated(Suspect::MrsHudson));
    }

    #[test]
    fn investigate_skips_asker_and_protagonist() {
        let mut table = three_player_table(DeductionMode::Normal);
        table.set_current_player(PlayerId::new(1));
        assert_eq!(table.answering_players(), vec![PlayerId::new(2)]);
        table.investigate(Evidence::Skull, &[]);
        assert_eq!(table.bounds(PlayerId::new(2), Evidence::Skull), Bound::exact(0));
        assert!(table.player(PlayerId::new(1)).investigations().is_empty());
        assert!(table.player(PlayerId::new(0)).investigations().is_empty());
    }

    #[test]
    fn interrogating_protagonist_records_nothing() {
        let mut table = three_player_table(DeductionMode::Normal);
        table.set_current_player(PlayerId::new(1));
        assert!(!table.interrogate(PlayerId::new(0), Evidence::Pipe, 2));
        assert!(table.interrogate(PlayerId::new(2), Evidence::Pipe, 2));
        assert_eq!(table.bounds(PlayerId::new(2), Evidence::Pipe), Bound::exact(2));
        assert_eq!(table.bounds(PlayerId::new(1), Evidence::Pipe).max(), 3);
    }

    #[test]
    fn end_turn_rotates_and_advances_round() {
        let mut table = three_player_table(DeductionMode::Hard);
        table.end_turn();
        assert_eq!(table.current_player(), PlayerId::new(1));
        assert_eq!(table.player(PlayerId::new(0)).round().index(), 1);
        table.end_turn();
        table.end_turn();
        assert_eq!(table.current_player(), PlayerId::new(0));
    }

    #[test]
    fn game_ends_on_winner_or_last_player_standing() {
        let mut table = three_player_table(DeductionMode::Normal);
        assert!(!table.is_over());
        table.retire_player(PlayerId::new(1));
        assert!(!table.is_over());
        table.retire_player(PlayerId::new(2));
        assert!(table.is_over());

        let mut table = three_player_table(DeductionMode::Normal);
        table.declare_winner(PlayerId::new(2));
        assert!(table.is_over());
    }

    #[test]
    fn find_player_ignores_case() {
        let table = three_player_table(DeductionMode::Normal);
        assert_eq!(table.find_player("clara"), Some(PlayerId::new(2)));
        assert_eq!(table.find_player("Dora"), None);
        assert_eq!(table.protagonist(), Some(PlayerId::new(0)));
        assert_eq!(table.non_protagonists(), vec![PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn manual_flags_remove_suspects() {
        let mut table = three_player_table(DeductionMode::Normal);
        table.clear_suspect(Suspect::JamesMoriarty);
        table.toggle_held(Suspect::JohnWatson);
        let remaining = table.remaining_suspects();
        assert_eq!(remaining.len(), Suspect::COUNT - 2);
        assert!(!remaining.contains(&Suspect::JamesMoriarty));
        assert!(!remaining.contains(&Suspect::JohnWatson));
    }

    #[test]
    #[should_panic(expected = "only one protagonist")]
    fn second_protagonist_is_rejected() {
        let mut table = three_player_table(DeductionMode::Normal);
        table.add_player("Dora", 3, true);
    }
}

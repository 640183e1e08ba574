//! Plays seeded random games against real deals and checks every derived bound
//! against the cards actually dealt.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sherlock_core::{
    Bound, DeductionMode, Evidence, EvidenceMap, PlayerId, Suspect, Table, hand_size_for,
};

struct Deal {
    solution: Suspect,
    hands: Vec<Vec<Suspect>>,
}

impl Deal {
    fn shuffled(rng: &mut StdRng, players: usize) -> Self {
        let mut deck = Suspect::ALL.to_vec();
        deck.shuffle(rng);
        let solution = deck[0];
        let size = hand_size_for(players) as usize;
        let hands = deck[1..].chunks(size).map(<[Suspect]>::to_vec).collect();
        Self { solution, hands }
    }

    fn held(&self, seat: usize, evidence: Evidence) -> u8 {
        self.hands[seat]
            .iter()
            .filter(|suspect| suspect.carries(evidence))
            .count() as u8
    }

    /// What the player can see: in hard mode the card at the round marker is hidden.
    fn visible(&self, table: &Table, seat: usize, evidence: Evidence) -> u8 {
        let hidden = match table.mode() {
            DeductionMode::Hard => Some(table.player(PlayerId::new(seat)).round().index()),
            DeductionMode::Normal => None,
        };
        self.hands[seat]
            .iter()
            .enumerate()
            .filter(|(slot, suspect)| Some(*slot) != hidden && suspect.carries(evidence))
            .count() as u8
    }
}

fn seat_table(deal: &Deal, mode: DeductionMode, rng: &mut StdRng) -> Table {
    let players = deal.hands.len();
    let mut table = Table::new(mode);
    for seat in 0..players {
        table.add_player(format!("p{seat}"), hand_size_for(players), seat == 0);
    }
    table.set_protagonist_hand(&deal.hands[0]);
    table.set_current_player(PlayerId::new(rng.gen_range(0..players)));
    table
}

fn bounds_of(table: &Table) -> Vec<EvidenceMap<Bound>> {
    table.players().iter().map(|ledger| *ledger.bounds()).collect()
}

fn check_invariants(table: &Table, deal: &Deal, previous: &[EvidenceMap<Bound>], context: &str) {
    let solution = table.solution_bounds();
    for evidence in Evidence::ALL {
        let total = evidence.total_in_game() as u16;
        let mut sum_min = 0u16;
        let mut sum_max = 0u16;
        for (seat, ledger) in table.players().iter().enumerate() {
            let bound = ledger.bound(evidence);
            let before = previous[seat][evidence];
            assert!(bound.max() <= ledger.capacity(), "{context}: {evidence} over capacity");
            assert!(bound.min() >= before.min(), "{context}: {evidence} min decreased");
            assert!(bound.max() <= before.max(), "{context}: {evidence} max increased");
            assert!(
                bound.contains(deal.held(seat, evidence)),
                "{context}: seat {seat} {evidence} {bound} excludes {}",
                deal.held(seat, evidence)
            );
            sum_min += bound.min() as u16;
            sum_max += bound.max() as u16;
        }

        let sol = solution.bound(evidence);
        assert!(sol.max() <= 1);
        assert!(sum_min + sol.max() as u16 <= total, "{context}: {evidence} over-allocated");
        assert!(sum_max + sol.min() as u16 >= total, "{context}: {evidence} under-allocated");
        assert!(
            sol.contains(u8::from(deal.solution.carries(evidence))),
            "{context}: solution {evidence} {sol}"
        );
    }
    assert!(
        !table.is_eliminated(deal.solution),
        "{context}: the solution {} was eliminated",
        deal.solution
    );
}

fn play_turn(table: &mut Table, deal: &Deal, rng: &mut StdRng) {
    let evidence = Evidence::ALL[rng.gen_range(0..Evidence::COUNT)];
    let current = table.current_player();
    if rng.gen_bool(0.5) {
        let raised: Vec<PlayerId> = table
            .answering_players()
            .into_iter()
            .filter(|id| deal.visible(table, id.index(), evidence) > 0)
            .collect();
        table.investigate(evidence, &raised);
    } else {
        let targets: Vec<PlayerId> = table.player_ids().filter(|id| *id != current).collect();
        let target = targets[rng.gen_range(0..targets.len())];
        let count = deal.visible(table, target.index(), evidence);
        table.interrogate(target, evidence, count);
    }
    table.end_turn();
}

fn run_games(mode: DeductionMode, seed: u64, games: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut solved = 0;
    for game in 0..games {
        let players = if rng.gen_bool(0.5) { 3 } else { 4 };
        let deal = Deal::shuffled(&mut rng, players);
        let mut table = seat_table(&deal, mode, &mut rng);
        let mut previous = bounds_of(&table);
        check_invariants(&table, &deal, &previous, &format!("game {game} setup"));

        for turn in 0..60 {
            play_turn(&mut table, &deal, &mut rng);
            let context = format!("{mode:?} game {game} turn {turn}");
            check_invariants(&table, &deal, &previous, &context);
            previous = bounds_of(&table);
        }

        if table.remaining_suspects() == vec![deal.solution] {
            solved += 1;
        }
    }
    solved
}

#[test]
fn normal_mode_bounds_stay_sound_over_random_games() {
    let solved = run_games(DeductionMode::Normal, 20251016, 150);
    // Truthful answers over sixty turns narrow most games down to one suspect.
    assert!(solved >= 60, "only {solved} of 150 games solved");
}

#[test]
fn hard_mode_bounds_stay_sound_over_random_games() {
    let solved = run_games(DeductionMode::Hard, 7, 150);
    assert!(solved >= 10, "only {solved} of 150 games solved");
}

#[test]
fn capacity_slots_raise_floor_to_two_in_hard_mode() {
    // Four players hold three cards, so the three round markers hide each card once.
    let mut table = Table::new(DeductionMode::Hard);
    for seat in 0..4 {
        table.add_player(format!("p{seat}"), 3, seat == 0);
    }
    let basil = PlayerId::new(1);
    for _ in 0..3 {
        table.record_investigation(basil, Evidence::Badge, true);
        table.advance_round(basil);
    }
    assert_eq!(table.bounds(basil, Evidence::Badge).min(), 2);
}

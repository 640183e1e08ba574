use sherlock_core::{PlayerId, Table};
use tracing::{debug, info};

use crate::config::{Action, ResolvedScript};

/// Outcome of replaying a script: the final table and how many answers were applied.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub game_id: String,
    pub table: Table,
    pub turns_played: usize,
    pub answers_recorded: usize,
}

pub struct ReplayRunner {
    script: ResolvedScript,
}

impl ReplayRunner {
    pub fn new(script: ResolvedScript) -> Self {
        Self { script }
    }

    /// Seats the players, deals the protagonist's hand and plays every action in order.
    pub fn run(self) -> ReplayOutcome {
        let script = self.script;
        let mut table = Table::new(script.mode);
        for player in &script.players {
            table.add_player(player.name.clone(), script.capacity, player.protagonist);
        }
        table.set_protagonist_hand(&script.starting_hand);
        table.set_current_player(PlayerId::new(script.starting_player));

        info!(
            target: "sherlock_replay::replay",
            game_id = %script.game_id,
            mode = script.mode.as_str(),
            players = script.players.len(),
            actions = script.actions.len(),
            "replay started"
        );

        let mut turns_played = 0;
        let mut answers_recorded = 0;
        for (index, action) in script.actions.iter().enumerate() {
            debug!(target: "sherlock_replay::replay", index, ?action, "applying action");
            match action {
                Action::Investigate { evidence, raised } => {
                    let raised: Vec<PlayerId> = raised.iter().copied().map(PlayerId::new).collect();
                    answers_recorded += table.answering_players().len();
                    table.investigate(*evidence, &raised);
                    table.end_turn();
                    turns_played += 1;
                }
                Action::Interrogate {
                    target,
                    evidence,
                    count,
                } => {
                    if table.interrogate(PlayerId::new(*target), *evidence, *count) {
                        answers_recorded += 1;
                    }
                    table.end_turn();
                    turns_played += 1;
                }
                Action::Clear(suspect) => table.clear_suspect(*suspect),
                Action::Retire(seat) => table.retire_player(PlayerId::new(*seat)),
                Action::Win(seat) => table.declare_winner(PlayerId::new(*seat)),
            }
        }

        let remaining = table.remaining_suspects();
        info!(
            target: "sherlock_replay::replay",
            game_id = %script.game_id,
            turns_played,
            remaining = remaining.len(),
            over = table.is_over(),
            "replay finished"
        );

        ReplayOutcome {
            game_id: script.game_id,
            table,
            turns_played,
            answers_recorded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use sherlock_core::{Bound, DeductionMode, Evidence, Suspect};

    fn script(actions: Vec<Action>) -> ResolvedScript {
        ResolvedScript {
            game_id: "unit".to_string(),
            mode: DeductionMode::Normal,
            capacity: 4,
            players: ["Ada", "Basil", "Clara"]
                .into_iter()
                .enumerate()
                .map(|(seat, name)| PlayerConfig {
                    name: name.to_string(),
                    protagonist: seat == 0,
                })
                .collect(),
            starting_player: 0,
            starting_hand: vec![
                Suspect::SherlockHolmes,
                Suspect::JohnWatson,
                Suspect::InspectorLestrade,
                Suspect::MaryMorstan,
            ],
            actions,
        }
    }

    #[test]
    fn turns_rotate_and_answers_are_counted() {
        let outcome = ReplayRunner::new(script(vec![
            Action::Investigate {
                evidence: Evidence::Skull,
                raised: vec![1],
            },
            // Basil asks the protagonist, which tells the table nothing new.
            Action::Interrogate {
                target: 0,
                evidence: Evidence::Skull,
                count: 0,
            },
            Action::Interrogate {
                target: 1,
                evidence: Evidence::Skull,
                count: 2,
            },
        ]))
        .run();

        assert_eq!(outcome.turns_played, 3);
        assert_eq!(outcome.answers_recorded, 3);
        assert_eq!(outcome.table.current_player(), PlayerId::new(0));
        assert_eq!(
            outcome.table.bounds(PlayerId::new(1), Evidence::Skull),
            Bound::exact(2)
        );
        assert_eq!(outcome.table.player(PlayerId::new(2)).investigations().len(), 1);
        assert_eq!(
            outcome.table.bounds(PlayerId::new(2), Evidence::Skull),
            Bound::exact(0)
        );
    }

    #[test]
    fn status_actions_do_not_consume_turns() {
        let outcome = ReplayRunner::new(script(vec![
            Action::Clear(Suspect::IreneAdler),
            Action::Retire(2),
            Action::Win(1),
        ]))
        .run();

        assert_eq!(outcome.turns_played, 0);
        assert_eq!(outcome.table.current_player(), PlayerId::new(0));
        assert!(outcome.table.suspects().flags(Suspect::IreneAdler).manually_cleared);
        assert!(outcome.table.is_over());
    }
}

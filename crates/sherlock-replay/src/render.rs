use std::fmt::Write as _;

use sherlock_core::{Evidence, EvidenceVerdict, TableSnapshot};

const NAME_WIDTH: usize = 20;
const CELL_WIDTH: usize = 7;

/// Plain-text report: per-player bounds, the solution row and the suspect grid.
pub fn render_text(game_id: &str, snapshot: &TableSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {game_id} ({} mode){}",
        snapshot.mode.as_str(),
        if snapshot.over { ", game over" } else { "" }
    );
    let _ = writeln!(out, "Next to act: {}", snapshot.current_player);
    out.push('\n');

    header_row(&mut out, "Player");
    for player in &snapshot.players {
        let mut label = player.name.clone();
        if player.protagonist {
            label.push_str(" (you)");
        }
        if player.has_won {
            label.push_str(" *won*");
        } else if !player.active {
            label.push_str(" [out]");
        }
        let cells = Evidence::ALL.map(|evidence| {
            player
                .bounds
                .get(&evidence)
                .map(ToString::to_string)
                .unwrap_or_default()
        });
        data_row(&mut out, &label, &cells);
    }
    let solution = Evidence::ALL.map(|evidence| {
        snapshot
            .solution
            .get(&evidence)
            .map(ToString::to_string)
            .unwrap_or_default()
    });
    data_row(&mut out, "Solution", &solution);
    out.push('\n');

    header_row(&mut out, "Suspect");
    for row in &snapshot.suspects {
        let mut label = row.name.to_string();
        if row.flags.physically_held {
            label.push_str(" (held)");
        } else if row.flags.manually_cleared {
            label.push_str(" (cleared)");
        }
        let cells = Evidence::ALL.map(|evidence| {
            if !row.suspect.carries(evidence) {
                return String::new();
            }
            row.verdicts
                .get(&evidence)
                .map(|verdict| verdict_mark(*verdict).to_string())
                .unwrap_or_default()
        });
        let marker = if row.eliminated { "-" } else { " " };
        data_row(&mut out, &format!("{marker} {label}"), &cells);
    }
    out.push('\n');

    let remaining: Vec<&str> = snapshot.remaining.iter().map(|s| s.name()).collect();
    if remaining.len() == 1 {
        let _ = writeln!(out, "Solved: {}", remaining[0]);
    } else {
        let _ = writeln!(out, "Remaining ({}): {}", remaining.len(), remaining.join(", "));
    }
    out
}

/// Marks one symbol on a suspect's card; symbols the card does not carry stay blank.
fn verdict_mark(verdict: EvidenceVerdict) -> &'static str {
    match verdict {
        EvidenceVerdict::Matches => "✓",
        EvidenceVerdict::Contradicts => "✗",
        EvidenceVerdict::Unknown => "?",
    }
}

fn header_row(out: &mut String, title: &str) {
    let _ = write!(out, "{title:<NAME_WIDTH$}");
    for evidence in Evidence::ALL {
        let _ = write!(out, "{:>CELL_WIDTH$}", evidence.short_label());
    }
    out.push('\n');
}

fn data_row(out: &mut String, label: &str, cells: &[String]) {
    let _ = write!(out, "{label:<NAME_WIDTH$}");
    for cell in cells {
        let _ = write!(out, "{cell:>CELL_WIDTH$}");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use sherlock_core::{DeductionMode, PlayerId, Suspect, Table};

    #[test]
    fn renders_bounds_solution_and_verdicts() {
        let mut table = Table::new(DeductionMode::Normal);
        table.add_player("Ada", 4, true);
        table.add_player("Basil", 4, false);
        table.add_player("Clara", 4, false);
        table.set_protagonist_hand(&[
            Suspect::SherlockHolmes,
            Suspect::JohnWatson,
            Suspect::InspectorLestrade,
            Suspect::MaryMorstan,
        ]);
        table.set_current_player(PlayerId::new(0));
        table.interrogate(PlayerId::new(1), Evidence::Skull, 2);
        table.interrogate(PlayerId::new(2), Evidence::Skull, 1);

        let text = render_text("unit", &TableSnapshot::capture(&table));
        assert!(text.starts_with("# unit (normal mode)"));
        assert!(text.contains("Ada (you)"));
        assert!(text.contains("Solution"));
        assert!(text.contains("(held)"));
        assert!(text.contains("✗"));
        assert!(text.contains("- James Moriarty"));
    }
}

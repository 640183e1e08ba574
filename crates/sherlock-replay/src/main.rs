use std::path::PathBuf;

use clap::Parser;

use sherlock_core::TableSnapshot;
use sherlock_replay::config::GameScript;
use sherlock_replay::logging::init_logging;
use sherlock_replay::render::render_text;
use sherlock_replay::replay::ReplayRunner;

/// Replays a recorded game and prints what can be deduced from it.
#[derive(Debug, Parser)]
#[command(
    name = "sherlock-replay",
    author,
    version,
    about = "Deduction helper for Baker Street Dozen"
)]
struct Cli {
    /// Path to the YAML game script.
    #[arg(short, long, value_name = "FILE")]
    script: PathBuf,

    /// Force hard-mode deduction regardless of the script.
    #[arg(long)]
    hard_mode: bool,

    /// Print the final table as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Exit after validating the script (nothing is replayed).
    #[arg(long)]
    validate_only: bool,

    /// Write tracing output to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut script = GameScript::from_path(&cli.script)?;

    if cli.hard_mode {
        script.hard_mode = true;
    }

    if cli.validate_only {
        println!(
            "Script '{}' is valid: {} players, {} actions",
            script.game_id,
            script.players.len(),
            script.actions.len()
        );
        return Ok(());
    }

    let _guard = init_logging(&script.logging, cli.log_file.as_deref())?;
    let resolved = script.resolve()?;
    let outcome = ReplayRunner::new(resolved).run();

    if cli.json {
        println!("{}", TableSnapshot::to_json(&outcome.table)?);
    } else {
        let snapshot = TableSnapshot::capture(&outcome.table);
        print!("{}", render_text(&outcome.game_id, &snapshot));
    }

    Ok(())
}

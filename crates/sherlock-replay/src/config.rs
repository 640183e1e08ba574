use serde::Deserialize;
use sherlock_core::model::player::{MAX_PLAYERS, MIN_PLAYERS};
use sherlock_core::{DeductionMode, Evidence, Suspect, hand_size_for};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const GAME_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// A recorded game loaded from YAML: who sat down, the protagonist's hand, and
/// every action taken at the table in order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameScript {
    pub game_id: String,
    #[serde(default)]
    pub hard_mode: bool,
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub starting_player: Option<String>,
    pub starting_hand: Vec<String>,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameScript {
    /// Load and validate a script from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut script: GameScript =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        script.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(script)
    }

    /// Validate the script without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.logging.normalize();
        self.resolve().map(|_| ())
    }

    /// Converts names and labels into engine types, replaying the turn order to reject
    /// actions the table would never see.
    pub fn resolve(&self) -> Result<ResolvedScript, ValidationError> {
        validate_game_id(&self.game_id)?;
        let players = resolve_players(&self.players)?;
        let lookup = |field: String, name: &str| -> Result<usize, ValidationError> {
            players
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| invalid(field, format!("unknown player '{name}'")))
        };

        let starting_player = match self.starting_player.as_deref() {
            Some(name) => lookup("starting_player".to_string(), name)?,
            None => 0,
        };

        let capacity = hand_size_for(players.len());
        let starting_hand = resolve_hand(&self.starting_hand, capacity)?;

        let mut actions = Vec::with_capacity(self.actions.len());
        let mut turn = TurnTracker::new(players.len(), starting_player);
        for (index, action) in self.actions.iter().enumerate() {
            let field = |name: &str| format!("actions[{index}].{name}");
            if turn.is_over() {
                return Err(invalid(
                    format!("actions[{index}]"),
                    "the game is already over".to_string(),
                ));
            }
            let resolved = match action {
                ActionConfig::Investigate { category, raised } => {
                    let evidence = resolve_evidence(field("category"), category)?;
                    let mut seats = Vec::with_capacity(raised.len());
                    for name in raised {
                        let seat = lookup(field("raised"), name)?;
                        if seat == turn.current || players[seat].protagonist {
                            return Err(invalid(
                                field("raised"),
                                format!("'{name}' does not answer this investigation"),
                            ));
                        }
                        if !seats.contains(&seat) {
                            seats.push(seat);
                        }
                    }
                    turn.end_turn();
                    Action::Investigate {
                        evidence,
                        raised: seats,
                    }
                }
                ActionConfig::Interrogate {
                    target,
                    category,
                    count,
                } => {
                    let evidence = resolve_evidence(field("category"), category)?;
                    let seat = lookup(field("target"), target)?;
                    if seat == turn.current {
                        return Err(invalid(
                            field("target"),
                            format!("'{target}' cannot interrogate themselves"),
                        ));
                    }
                    if *count > capacity {
                        return Err(invalid(
                            field("count"),
                            format!("{count} exceeds the hand size of {capacity}"),
                        ));
                    }
                    turn.end_turn();
                    Action::Interrogate {
                        target: seat,
                        evidence,
                        count: *count,
                    }
                }
                ActionConfig::Clear { suspect } => {
                    Action::Clear(resolve_suspect(field("suspect"), suspect)?)
                }
                ActionConfig::Retire { player } => {
                    let seat = lookup(field("player"), player)?;
                    turn.retire(seat);
                    Action::Retire(seat)
                }
                ActionConfig::Win { player } => {
                    let seat = lookup(field("player"), player)?;
                    turn.won = true;
                    Action::Win(seat)
                }
            };
            actions.push(resolved);
        }

        Ok(ResolvedScript {
            game_id: self.game_id.clone(),
            mode: DeductionMode::from_flag(self.hard_mode),
            capacity,
            players,
            starting_player,
            starting_hand,
            actions,
        })
    }
}

/// One seat in the script.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub protagonist: bool,
}

/// A single table action, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConfig {
    /// The current player asks the table; `raised` lists who raised a hand.
    Investigate {
        category: String,
        #[serde(default)]
        raised: Vec<String>,
    },
    /// The current player privately asks `target` how many `category` they hold.
    Interrogate {
        target: String,
        category: String,
        count: u8,
    },
    Clear {
        suspect: String,
    },
    Retire {
        player: String,
    },
    Win {
        player: String,
    },
}

/// Logging configuration defaults to plain, human-readable output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Script with every name resolved to a seat, symbol or suspect.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScript {
    pub game_id: String,
    pub mode: DeductionMode,
    pub capacity: u8,
    pub players: Vec<PlayerConfig>,
    pub starting_player: usize,
    pub starting_hand: Vec<Suspect>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Investigate { evidence: Evidence, raised: Vec<usize> },
    Interrogate { target: usize, evidence: Evidence, count: u8 },
    Clear(Suspect),
    Retire(usize),
    Win(usize),
}

/// Mirrors the table's turn pointer so actions can be checked before replay.
struct TurnTracker {
    players: usize,
    current: usize,
    active: Vec<bool>,
    won: bool,
}

impl TurnTracker {
    fn new(players: usize, current: usize) -> Self {
        Self {
            players,
            current,
            active: vec![true; players],
            won: false,
        }
    }

    fn end_turn(&mut self) {
        self.current = (self.current + 1) % self.players;
    }

    fn retire(&mut self, seat: usize) {
        self.active[seat] = false;
    }

    fn is_over(&self) -> bool {
        self.won || self.active.iter().filter(|active| **active).count() <= 1
    }
}

fn invalid(field: String, message: String) -> ValidationError {
    ValidationError::InvalidField { field, message }
}

fn validate_game_id(game_id: &str) -> Result<(), ValidationError> {
    if game_id.trim().is_empty() {
        return Err(invalid(
            "game_id".to_string(),
            "game_id must not be empty".to_string(),
        ));
    }

    if !game_id.chars().all(|c| GAME_ID_ALLOWED.contains(c)) {
        return Err(invalid(
            "game_id".to_string(),
            "game_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        ));
    }

    Ok(())
}

fn resolve_players(players: &[PlayerConfig]) -> Result<Vec<PlayerConfig>, ValidationError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(invalid(
            "players".to_string(),
            format!(
                "{} players given; the game seats {MIN_PLAYERS} or {MAX_PLAYERS}",
                players.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(players.len());
    for (index, player) in players.iter().enumerate() {
        let name = player.name.trim();
        if name.is_empty() {
            return Err(invalid(
                format!("players[{index}].name"),
                "player name must not be empty".to_string(),
            ));
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(invalid(
                "players".to_string(),
                format!("player name '{name}' defined more than once"),
            ));
        }
        resolved.push(PlayerConfig {
            name: name.to_string(),
            protagonist: player.protagonist,
        });
    }

    let protagonists = resolved.iter().filter(|p| p.protagonist).count();
    if protagonists != 1 {
        return Err(invalid(
            "players".to_string(),
            format!("exactly one protagonist is required, found {protagonists}"),
        ));
    }

    Ok(resolved)
}

fn resolve_hand(hand: &[String], capacity: u8) -> Result<Vec<Suspect>, ValidationError> {
    if hand.len() != capacity as usize {
        return Err(invalid(
            "starting_hand".to_string(),
            format!("expected {capacity} suspects, found {}", hand.len()),
        ));
    }

    let mut suspects = Vec::with_capacity(hand.len());
    for (index, name) in hand.iter().enumerate() {
        let suspect = resolve_suspect(format!("starting_hand[{index}]"), name)?;
        if suspects.contains(&suspect) {
            return Err(invalid(
                "starting_hand".to_string(),
                format!("'{suspect}' listed more than once"),
            ));
        }
        suspects.push(suspect);
    }
    Ok(suspects)
}

fn resolve_evidence(field: String, label: &str) -> Result<Evidence, ValidationError> {
    Evidence::from_label(label).ok_or_else(|| invalid(field, format!("unknown category '{label}'")))
}

fn resolve_suspect(field: String, name: &str) -> Result<Suspect, ValidationError> {
    Suspect::from_name(name).ok_or_else(|| invalid(field, format!("unknown suspect '{name}'")))
}

/// Errors surfaced when loading script files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read script {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse script {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid script {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

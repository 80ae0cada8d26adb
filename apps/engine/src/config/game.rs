use std::env;
use std::str::FromStr;

use crate::domain::cards::CardId;
use crate::domain::rules::{self, EndCondition};

const DEFAULT_ARTWORK_BASE: &str = "https://fabula-decks.example/base";

/// Session-engine configuration with environment overrides.
///
/// All knobs default to the classic ruleset; `from_env` lets a deployment
/// override them without recompiling.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Hand size H every player holds at round boundaries.
    pub hand_size: usize,
    /// Minimum quorum for `start_game`.
    pub min_players: usize,
    /// Total cards in a fresh deck.
    pub deck_size: u32,
    /// Base URL the per-card artwork reference is derived from.
    pub artwork_base: String,
    /// End-of-game predicate, evaluated after each round resolution.
    pub end_condition: EndCondition,
    /// Fixed shuffle seed; None seeds from the OS.
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: rules::HAND_SIZE,
            min_players: rules::MIN_PLAYERS,
            deck_size: rules::DECK_SIZE,
            artwork_base: DEFAULT_ARTWORK_BASE.to_string(),
            end_condition: EndCondition::Never,
            shuffle_seed: None,
        }
    }
}

impl GameConfig {
    /// Build a config from `FABULA_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_parse("FABULA_HAND_SIZE") {
            config.hand_size = v;
        }
        if let Some(v) = env_parse("FABULA_MIN_PLAYERS") {
            config.min_players = v;
        }
        if let Some(v) = env_parse("FABULA_DECK_SIZE") {
            config.deck_size = v;
        }
        if let Ok(v) = env::var("FABULA_ARTWORK_BASE") {
            config.artwork_base = v;
        }
        if let Some(v) = env_parse("FABULA_TARGET_SCORE") {
            config.end_condition = EndCondition::TargetScore(v);
        }
        config
    }

    /// Artwork reference for a card id.
    pub fn artwork_url(&self, id: CardId) -> String {
        format!("{}/{}.png", self.artwork_base, id)
    }

    /// Largest player count this deck can sustain for a full game.
    pub fn max_players(&self) -> usize {
        rules::max_players(self.deck_size as usize, self.hand_size)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

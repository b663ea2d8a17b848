//! Snapshot serialization for stateless invocations.
//!
//! A snapshot is the only thing persisted between invocations. Loading one
//! maps every field explicitly and then checks it against the game's
//! invariants, so a tampered or truncated document is rejected instead of
//! half-applied.

use super::{compute_current_turn, compute_scoreboard, Game};
use crate::error::{GameError, GameResult};
use crate::types::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// The persisted form of a [`Game`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameSnapshot {
    pub id: GameId,
    pub version: u64,
    pub state: GameState,
    pub players: Vec<PlayerName>,
    pub categories: Vec<String>,
    pub excluded_letters: Vec<char>,
    pub letter_policy: LetterPolicy,
    pub rounds: Vec<Round>,
    /// Must be present, possibly as `null`
    #[serde(deserialize_with = "required_nullable")]
    pub current_turn: Option<CurrentTurn>,
    pub scoreboard: Vec<ScoreEntry>,
}

fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            version: game.version,
            state: game.state,
            players: game.players.clone(),
            categories: game.categories.clone(),
            excluded_letters: game.excluded_letters.clone(),
            letter_policy: game.letter_policy,
            rounds: game.rounds.clone(),
            current_turn: game.current_turn.clone(),
            scoreboard: game.scoreboard.clone(),
        }
    }
}

impl TryFrom<GameSnapshot> for Game {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> GameResult<Self> {
        snapshot.validate()?;

        Ok(Game {
            id: snapshot.id,
            version: snapshot.version,
            state: snapshot.state,
            players: snapshot.players,
            categories: snapshot.categories,
            excluded_letters: snapshot.excluded_letters,
            letter_policy: snapshot.letter_policy,
            rounds: snapshot.rounds,
            current_turn: snapshot.current_turn,
            scoreboard: snapshot.scoreboard,
        })
    }
}

fn invalid(msg: impl Into<String>) -> GameError {
    GameError::InvalidSnapshot(msg.into())
}

impl GameSnapshot {
    /// Check the snapshot against every game invariant
    pub fn validate(&self) -> GameResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("Game id cannot be empty"));
        }

        let mut seen = HashSet::new();
        for name in &self.players {
            if name.trim().is_empty() {
                return Err(invalid("Player names cannot be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!("Player '{}' is listed twice", name)));
            }
        }

        let mut seen = HashSet::new();
        for letter in &self.excluded_letters {
            if !ALPHABET.contains(letter) {
                return Err(invalid(format!("Excluded letter '{}' is not a-z", letter)));
            }
            if !seen.insert(*letter) {
                return Err(invalid(format!("Excluded letter '{}' is listed twice", letter)));
            }
        }

        match self.state {
            GameState::NotStarted => {
                if !self.rounds.is_empty() {
                    return Err(invalid("A NOT_STARTED game cannot have rounds"));
                }
            }
            GameState::Started | GameState::Finished => self.validate_rounds()?,
        }

        let unscored = self
            .rounds
            .iter()
            .any(|r| r.turn_order.iter().any(|e| !e.scored));
        match (self.state, unscored) {
            (GameState::Started, false) => {
                return Err(invalid("A STARTED game must have at least one unscored turn"))
            }
            (GameState::Finished, true) => {
                return Err(invalid("A FINISHED game cannot have unscored turns"))
            }
            _ => {}
        }

        if self.current_turn != compute_current_turn(&self.rounds) {
            return Err(invalid("currentTurn does not match the first unscored turn"));
        }

        if self.scoreboard != compute_scoreboard(&self.players, &self.rounds) {
            return Err(invalid("scoreboard does not match the recorded points"));
        }

        Ok(())
    }

    fn validate_rounds(&self) -> GameResult<()> {
        if self.players.len() < MIN_PLAYERS {
            return Err(invalid(format!(
                "A started game needs {} or more players, found {}",
                MIN_PLAYERS,
                self.players.len()
            )));
        }
        if self.categories.is_empty() {
            return Err(invalid("A started game needs categories"));
        }
        if self.rounds.len() != self.categories.len() {
            return Err(invalid(format!(
                "Expected {} rounds (one per category), found {}",
                self.categories.len(),
                self.rounds.len()
            )));
        }

        let mut round_categories: Vec<&str> =
            self.rounds.iter().map(|r| r.category.as_str()).collect();
        let mut categories: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        round_categories.sort_unstable();
        categories.sort_unstable();
        if round_categories != categories {
            return Err(invalid("Round categories do not match the game categories"));
        }

        let mut players: Vec<&str> = self.players.iter().map(String::as_str).collect();
        players.sort_unstable();

        let mut letters = Vec::with_capacity(self.rounds.len());
        for (i, round) in self.rounds.iter().enumerate() {
            if round.round_id as usize != i + 1 {
                return Err(invalid(format!(
                    "Round at position {} has id {}",
                    i + 1,
                    round.round_id
                )));
            }

            if !ALPHABET.contains(&round.letter) || self.excluded_letters.contains(&round.letter) {
                return Err(invalid(format!(
                    "Round {} uses unavailable letter '{}'",
                    round.round_id, round.letter
                )));
            }
            letters.push(round.letter);

            let mut names: Vec<&str> = round.turn_order.iter().map(|e| e.name.as_str()).collect();
            names.sort_unstable();
            if names != players {
                return Err(invalid(format!(
                    "Round {} turn order is not a permutation of the players",
                    round.round_id
                )));
            }

            if let Some(entry) = round
                .turn_order
                .iter()
                .find(|e| e.scored != e.points.is_some())
            {
                return Err(invalid(format!(
                    "Round {} entry for '{}' must have points exactly when scored",
                    round.round_id, entry.name
                )));
            }
        }

        let distinct: HashSet<char> = letters.iter().copied().collect();
        match self.letter_policy {
            LetterPolicy::EveryGame if distinct.len() > 1 => {
                Err(invalid("EVERY_GAME rounds must share one letter"))
            }
            LetterPolicy::EveryRound if distinct.len() != letters.len() => {
                Err(invalid("EVERY_ROUND rounds must use distinct letters"))
            }
            _ => Ok(()),
        }
    }
}

impl Game {
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Emit the full observable state as a JSON document
    pub fn serialize(&self) -> GameResult<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| invalid(format!("Failed to encode game: {}", e)))
    }

    /// Rebuild a game from a document produced by [`Game::serialize`]
    pub fn deserialize(document: &str) -> GameResult<Self> {
        let snapshot: GameSnapshot = serde_json::from_str(document)
            .map_err(|e| invalid(format!("Malformed game document: {}", e)))?;
        let game = Game::try_from(snapshot)?;

        tracing::debug!(
            game_id = %game.id,
            version = game.version,
            state = %game.state,
            "Game loaded"
        );
        Ok(game)
    }
}

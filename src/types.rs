use serde::{Deserialize, Serialize};

/// Opaque ID types for readability
pub type GameId = String;
pub type RoundId = u32;
pub type PlayerName = String;

/// Letters a round can be assigned, before exclusions
pub const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

/// Minimum number of players required to start
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    NotStarted,
    Started,
    Finished,
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameState::NotStarted => "NOT_STARTED",
            GameState::Started => "STARTED",
            GameState::Finished => "FINISHED",
        };
        f.write_str(s)
    }
}

/// How letters are handed out across rounds
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterPolicy {
    /// One letter for the whole game
    #[default]
    EveryGame,
    /// A fresh letter drawn for each round
    EveryRound,
}

impl std::fmt::Display for LetterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterPolicy::EveryGame => "EVERY_GAME",
            LetterPolicy::EveryRound => "EVERY_ROUND",
        };
        f.write_str(s)
    }
}

/// One player's slot in a round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TurnEntry {
    pub name: PlayerName,
    pub scored: bool,
    /// Present if and only if `scored` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl TurnEntry {
    pub fn pending(name: PlayerName) -> Self {
        Self {
            name,
            scored: false,
            points: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Round {
    pub round_id: RoundId,
    pub category: String,
    pub letter: char,
    pub turn_order: Vec<TurnEntry>,
}

impl Round {
    pub fn entry(&self, player: &str) -> Option<&TurnEntry> {
        self.turn_order.iter().find(|e| e.name == player)
    }
}

/// The next player expected to score, game-wide
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CurrentTurn {
    pub category: String,
    pub player: PlayerName,
    pub letter: char,
    pub round_id: RoundId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoreEntry {
    pub name: PlayerName,
    pub points: u64,
}

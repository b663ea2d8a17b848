use crate::error::{GameError, GameResult};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// One invocation's worth of work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Command {
    Create,
    AddPlayer {
        game_id: GameId,
        name: PlayerName,
    },
    SetCategories {
        game_id: GameId,
        categories: Vec<String>,
    },
    ExcludeLetters {
        game_id: GameId,
        letters: Vec<String>,
    },
    SetLetterPolicy {
        game_id: GameId,
        policy: LetterPolicy,
    },
    Start {
        game_id: GameId,
    },
    Score {
        game_id: GameId,
        round_id: RoundId,
        player: PlayerName,
        points: i64,
    },
    /// Validator lookup, does not touch any game
    CheckTerm {
        category: String,
        language: String,
        term: String,
    },
}

impl Command {
    pub fn from_json(document: &str) -> GameResult<Self> {
        serde_json::from_str(document)
            .map_err(|e| GameError::InvalidArgument(format!("Malformed command: {}", e)))
    }

    /// The game this command mutates, if any
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Command::Create | Command::CheckTerm { .. } => None,
            Command::AddPlayer { game_id, .. }
            | Command::SetCategories { game_id, .. }
            | Command::ExcludeLetters { game_id, .. }
            | Command::SetLetterPolicy { game_id, .. }
            | Command::Start { game_id }
            | Command::Score { game_id, .. } => Some(game_id.as_str()),
        }
    }

    /// Short name for logging
    pub fn action(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::AddPlayer { .. } => "add_player",
            Command::SetCategories { .. } => "set_categories",
            Command::ExcludeLetters { .. } => "exclude_letters",
            Command::SetLetterPolicy { .. } => "set_letter_policy",
            Command::Start { .. } => "start",
            Command::Score { .. } => "score",
            Command::CheckTerm { .. } => "check_term",
        }
    }
}

/// Replies that are not a game document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum Reply {
    TermChecked { term: String, valid: bool },
    Error { code: String, msg: String },
}

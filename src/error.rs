/// Result type for game and validator operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors reported to the caller of a game or validator operation.
///
/// None of these are retried or recovered internally: each one describes a
/// problem with the caller's input or with the snapshot it handed in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Player {player} should not be playing round {round_id} now. Current one is: {current} (round {current_round})")]
    TurnViolation {
        player: String,
        round_id: u32,
        current: String,
        current_round: u32,
    },

    #[error("Language {language} not supported for category {category}")]
    UnsupportedLanguage { category: String, language: String },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GameError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidState(_) => "INVALID_STATE",
            GameError::InvalidArgument(_) => "INVALID_ARGUMENT",
            GameError::NotFound(_) => "NOT_FOUND",
            GameError::TurnViolation { .. } => "TURN_VIOLATION",
            GameError::UnsupportedLanguage { .. } => "UNSUPPORTED_LANGUAGE",
            GameError::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
        }
    }
}

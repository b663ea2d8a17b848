use super::Game;
use crate::error::{GameError, GameResult};
use crate::types::*;

impl Game {
    /// Append a player to the join order
    pub fn add_player(&mut self, name: impl Into<PlayerName>) -> GameResult<&mut Self> {
        if self.state != GameState::NotStarted {
            return Err(GameError::InvalidState(
                "You only can add players before starting the game.".to_string(),
            ));
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::InvalidArgument(
                "Player name cannot be empty".to_string(),
            ));
        }
        // Turns are looked up by name
        if self.has_player(&name) {
            return Err(GameError::InvalidArgument(format!(
                "Player {} already joined",
                name
            )));
        }

        tracing::debug!(game_id = %self.id, player = %name, "Player added");
        self.players.push(name);
        self.version += 1;
        Ok(self)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

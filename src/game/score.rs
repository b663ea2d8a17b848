use super::{compute_current_turn, Game};
use crate::error::{GameError, GameResult};
use crate::types::*;
use std::collections::HashMap;

impl Game {
    /// Record `points` for `player` in round `round_id`.
    ///
    /// Only the player named by the current turn may score. The entry written
    /// is the one in `round_id`, which need not be the current turn's round.
    pub fn score(&mut self, round_id: RoundId, player: &str, points: i64) -> GameResult<()> {
        if points < 0 {
            return Err(GameError::InvalidArgument(format!(
                "Points should be greater or equal zero, got {}",
                points
            )));
        }
        let points = u32::try_from(points).map_err(|_| {
            GameError::InvalidArgument(format!("Points value {} is too large", points))
        })?;

        if self.state != GameState::Started {
            return Err(GameError::InvalidState(format!(
                "You only can score in a STARTED game. Current state: {}",
                self.state
            )));
        }

        if self.round(round_id).is_none() {
            return Err(GameError::NotFound(format!("Round {} not found", round_id)));
        }

        if !self.has_player(player) {
            return Err(GameError::NotFound(format!("Player {} not found", player)));
        }

        let current = self
            .current_turn
            .as_ref()
            .ok_or_else(|| GameError::InvalidState("No turn is pending".to_string()))?;
        if current.player != player {
            return Err(GameError::TurnViolation {
                player: player.to_string(),
                round_id,
                current: current.player.clone(),
                current_round: current.round_id,
            });
        }

        let entry = self
            .rounds
            .iter_mut()
            .find(|r| r.round_id == round_id)
            .and_then(|r| r.turn_order.iter_mut().find(|e| e.name == player))
            .ok_or_else(|| {
                GameError::NotFound(format!("Player {} has no turn in round {}", player, round_id))
            })?;
        entry.points = Some(points);
        entry.scored = true;
        self.version += 1;

        tracing::debug!(
            game_id = %self.id,
            round_id,
            player,
            points,
            "Turn scored"
        );

        self.advance();
        Ok(())
    }

    /// Post-update step after any change to the rounds: refresh the derived
    /// fields and finish the game once no turn is left.
    pub(super) fn advance(&mut self) {
        self.scoreboard = compute_scoreboard(&self.players, &self.rounds);
        self.current_turn = compute_current_turn(&self.rounds);

        if self.current_turn.is_none() && self.state == GameState::Started {
            self.finish();
        }
    }
}

/// Total recorded points per player, highest first.
///
/// Unscored turns count as zero, so every player in the rounds is listed.
/// Equal totals keep the players' join order.
pub fn compute_scoreboard(players: &[PlayerName], rounds: &[Round]) -> Vec<ScoreEntry> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for entry in rounds.iter().flat_map(|r| r.turn_order.iter()) {
        *totals.entry(entry.name.as_str()).or_insert(0) += u64::from(entry.points.unwrap_or(0));
    }

    let mut scoreboard: Vec<ScoreEntry> = players
        .iter()
        .filter_map(|name| {
            totals.get(name.as_str()).map(|&points| ScoreEntry {
                name: name.clone(),
                points,
            })
        })
        .collect();

    // Stable sort keeps join order among ties
    scoreboard.sort_by(|a, b| b.points.cmp(&a.points));
    scoreboard
}

use crate::types::*;

/// First unscored entry in round order, then turn order.
///
/// `None` means every turn of every round has been scored.
pub fn compute_current_turn(rounds: &[Round]) -> Option<CurrentTurn> {
    rounds.iter().find_map(|round| {
        round
            .turn_order
            .iter()
            .find(|entry| !entry.scored)
            .map(|entry| CurrentTurn {
                category: round.category.clone(),
                player: entry.name.clone(),
                letter: round.letter,
                round_id: round.round_id,
            })
    })
}

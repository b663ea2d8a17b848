use crate::error::{GameError, GameResult};
use crate::shuffle::{sample_one_without_replacement, shuffle};
use crate::types::*;
use rand::Rng;

/// Build the ordered rounds for a game.
///
/// Round order is a shuffle of `categories`; every round gets its own shuffle
/// of `players`. Under `EveryGame` the first drawn letter is reused, under
/// `EveryRound` each round draws a new one from `available`. The pool size is
/// checked before anything is drawn.
pub fn generate_rounds<R: Rng + ?Sized>(
    categories: &[String],
    available: &[char],
    policy: LetterPolicy,
    players: &[PlayerName],
    rng: &mut R,
) -> GameResult<Vec<Round>> {
    let required = match policy {
        LetterPolicy::EveryGame => 1,
        LetterPolicy::EveryRound => categories.len().max(1),
    };
    if available.len() < required {
        return Err(GameError::InvalidArgument(format!(
            "Letter policy {} needs {} available letter(s) but only {} remain after exclusions",
            policy,
            required,
            available.len()
        )));
    }

    let sorted_categories = shuffle(categories, rng);
    let mut pool = shuffle(available, rng);
    let mut letter = draw(&mut pool, rng)?;

    let mut rounds = Vec::with_capacity(sorted_categories.len());
    for (i, category) in sorted_categories.into_iter().enumerate() {
        if policy == LetterPolicy::EveryRound && i > 0 {
            letter = draw(&mut pool, rng)?;
        }

        let turn_order = shuffle(players, rng)
            .into_iter()
            .map(TurnEntry::pending)
            .collect();

        rounds.push(Round {
            round_id: (i + 1) as RoundId,
            category,
            letter,
            turn_order,
        });
    }

    Ok(rounds)
}

fn draw<R: Rng + ?Sized>(pool: &mut Vec<char>, rng: &mut R) -> GameResult<char> {
    sample_one_without_replacement(pool, rng)
        .ok_or_else(|| GameError::InvalidArgument("No letters left to draw".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rounds_cover_categories_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let categories = strings(&["color", "country", "fruit", "animal"]);
        let players = strings(&["A", "B", "C"]);
        let letters: Vec<char> = ALPHABET.collect();

        let rounds =
            generate_rounds(&categories, &letters, LetterPolicy::EveryGame, &players, &mut rng)
                .unwrap();

        let mut seen: Vec<_> = rounds.iter().map(|r| r.category.clone()).collect();
        seen.sort();
        let mut expected = categories.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_duplicate_categories_are_kept() {
        let mut rng = StdRng::seed_from_u64(5);
        let categories = strings(&["color", "color"]);
        let players = strings(&["A", "B"]);
        let letters: Vec<char> = ALPHABET.collect();

        let rounds =
            generate_rounds(&categories, &letters, LetterPolicy::EveryRound, &players, &mut rng)
                .unwrap();
        assert_eq!(rounds.len(), 2);
        assert!(rounds.iter().all(|r| r.category == "color"));
        assert_ne!(rounds[0].letter, rounds[1].letter);
    }

    #[test]
    fn test_turn_orders_are_shuffled_independently() {
        let categories: Vec<String> = (0..12).map(|i| format!("cat{}", i)).collect();
        let players = strings(&["A", "B", "C", "D", "E"]);
        let letters: Vec<char> = ALPHABET.collect();
        let mut rng = StdRng::seed_from_u64(99);

        let rounds =
            generate_rounds(&categories, &letters, LetterPolicy::EveryGame, &players, &mut rng)
                .unwrap();

        let orders: std::collections::HashSet<Vec<String>> = rounds
            .iter()
            .map(|r| r.turn_order.iter().map(|e| e.name.clone()).collect())
            .collect();
        assert!(orders.len() > 1, "every round had the same turn order");
    }

    #[test]
    fn test_every_round_exact_pool_is_enough() {
        let mut rng = StdRng::seed_from_u64(1);
        let categories = strings(&["color", "fruit", "country"]);
        let players = strings(&["A", "B"]);

        let rounds = generate_rounds(
            &categories,
            &['x', 'y', 'z'],
            LetterPolicy::EveryRound,
            &players,
            &mut rng,
        )
        .unwrap();

        let mut letters: Vec<_> = rounds.iter().map(|r| r.letter).collect();
        letters.sort_unstable();
        assert_eq!(letters, vec!['x', 'y', 'z']);
    }

    #[test]
    fn test_every_round_short_pool_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let categories = strings(&["color", "fruit", "country"]);
        let players = strings(&["A", "B"]);

        let err = generate_rounds(
            &categories,
            &['x', 'y'],
            LetterPolicy::EveryRound,
            &players,
            &mut rng,
        )
        .unwrap_err();
        assert!(err.to_string().contains("needs 3"));
    }
}

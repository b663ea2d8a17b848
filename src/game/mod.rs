mod export;
mod player;
mod round;
mod score;
mod turn;

pub use export::GameSnapshot;
pub use round::generate_rounds;
pub use score::compute_scoreboard;
pub use turn::compute_current_turn;

use crate::error::{GameError, GameResult};
use crate::types::*;
use rand::Rng;

/// One session of the game.
///
/// A `Game` lives for a single invocation: it is built fresh or loaded from a
/// snapshot, receives one mutation, and is serialized back. The derived fields
/// (`current_turn`, `scoreboard`) are refreshed after every mutation, so a
/// serialized game never carries stale values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    version: u64,
    state: GameState,
    players: Vec<PlayerName>,
    categories: Vec<String>,
    excluded_letters: Vec<char>,
    letter_policy: LetterPolicy,
    rounds: Vec<Round>,
    current_turn: Option<CurrentTurn>,
    scoreboard: Vec<ScoreEntry>,
}

impl Game {
    /// Create a NOT_STARTED game with a fresh id
    pub fn new() -> Self {
        Self::fresh(ulid::Ulid::new().to_string())
    }

    /// Create a NOT_STARTED game under a caller-chosen id
    pub fn with_id(id: impl Into<GameId>) -> GameResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GameError::InvalidArgument("Game id cannot be empty".to_string()));
        }
        Ok(Self::fresh(id))
    }

    fn fresh(id: GameId) -> Self {
        Self {
            id,
            version: 0,
            state: GameState::NotStarted,
            players: Vec::new(),
            categories: Vec::new(),
            excluded_letters: Vec::new(),
            letter_policy: LetterPolicy::default(),
            rounds: Vec::new(),
            current_turn: None,
            scoreboard: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Incremented by every successful mutation; never by serialization
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn players(&self) -> &[PlayerName] {
        &self.players
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn excluded_letters(&self) -> &[char] {
        &self.excluded_letters
    }

    pub fn letter_policy(&self) -> LetterPolicy {
        self.letter_policy
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_turn(&self) -> Option<&CurrentTurn> {
        self.current_turn.as_ref()
    }

    pub fn scoreboard(&self) -> &[ScoreEntry] {
        &self.scoreboard
    }

    /// The alphabet minus excluded letters, in alphabetical order
    pub fn available_letters(&self) -> Vec<char> {
        ALPHABET
            .filter(|c| !self.excluded_letters.contains(c))
            .collect()
    }

    pub fn set_categories<S: AsRef<str>>(&mut self, categories: &[S]) -> GameResult<&mut Self> {
        self.ensure_not_started("set categories")?;
        self.categories = categories.iter().map(|c| c.as_ref().to_string()).collect();
        self.version += 1;
        Ok(self)
    }

    /// Replace the excluded letter set. Every element must be one letter.
    pub fn exclude_letters<S: AsRef<str>>(&mut self, letters: &[S]) -> GameResult<&mut Self> {
        self.ensure_not_started("exclude letters")?;

        let mut excluded = Vec::with_capacity(letters.len());
        for raw in letters {
            let letter = parse_letter(raw.as_ref())?;
            if !excluded.contains(&letter) {
                excluded.push(letter);
            }
        }

        self.excluded_letters = excluded;
        self.version += 1;
        Ok(self)
    }

    pub fn set_letter_policy(&mut self, policy: LetterPolicy) -> GameResult<&mut Self> {
        self.ensure_not_started("change the letter policy")?;
        self.letter_policy = policy;
        self.version += 1;
        Ok(self)
    }

    /// Start the game using the thread-local random source
    pub fn start(&mut self) -> GameResult<()> {
        self.start_with_rng(&mut rand::rng())
    }

    /// Generate the rounds and move to STARTED
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<()> {
        self.validate_start()?;

        self.rounds = generate_rounds(
            &self.categories,
            &self.available_letters(),
            self.letter_policy,
            &self.players,
            rng,
        )?;
        self.state = GameState::Started;
        self.version += 1;
        self.advance();

        tracing::info!(
            game_id = %self.id,
            players = self.players.len(),
            rounds = self.rounds.len(),
            policy = %self.letter_policy,
            "Game started"
        );
        Ok(())
    }

    fn validate_start(&self) -> GameResult<()> {
        if self.state != GameState::NotStarted {
            return Err(GameError::InvalidState(format!(
                "You only can start a game when state is NOT_STARTED. Current state: {}",
                self.state
            )));
        }

        if self.categories.is_empty() {
            return Err(GameError::InvalidArgument(
                "You cannot start a game without setting up the categories.".to_string(),
            ));
        }

        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::InvalidArgument(format!(
                "The game only can be started with {} or more players. You have added {} player(s).",
                MIN_PLAYERS,
                self.players.len()
            )));
        }

        Ok(())
    }

    fn ensure_not_started(&self, action: &str) -> GameResult<()> {
        if self.state != GameState::NotStarted {
            return Err(GameError::InvalidState(format!(
                "You only can {} before starting the game. Current state: {}",
                action, self.state
            )));
        }
        Ok(())
    }

    /// Look up a round by its 1-based id
    pub fn round(&self, round_id: RoundId) -> Option<&Round> {
        let index = (round_id as usize).checked_sub(1)?;
        self.rounds.get(index)
    }

    fn finish(&mut self) {
        self.state = GameState::Finished;
        self.current_turn = None;
        tracing::info!(game_id = %self.id, "Game finished");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_letter(raw: &str) -> GameResult<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(GameError::InvalidArgument(format!(
            "Excluded letters must be single letters a-z, got {:?}",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn configured(players: &[&str], categories: &[&str]) -> Game {
        let mut game = Game::with_id("game_1").unwrap();
        for p in players {
            game.add_player(*p).unwrap();
        }
        game.set_categories(categories).unwrap();
        game
    }

    #[test]
    fn test_with_id_rejects_blank_id() {
        for id in ["", "   "] {
            assert!(matches!(
                Game::with_id(id),
                Err(GameError::InvalidArgument(_))
            ));
        }

        let game = Game::with_id("table-7").unwrap();
        assert_eq!(game.id(), "table-7");
        assert_eq!(Game::deserialize(&game.serialize().unwrap()).unwrap(), game);
    }

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new();

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.letter_policy(), LetterPolicy::EveryGame);
        assert_eq!(game.version(), 0);
        assert!(game.players().is_empty());
        assert!(game.rounds().is_empty());
        assert!(game.current_turn().is_none());
        assert!(game.scoreboard().is_empty());
        assert!(ulid::Ulid::from_string(game.id()).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Game::new().id(), Game::new().id());
    }

    #[test]
    fn test_start_three_by_three() {
        let mut game = configured(&["A", "B", "C"], &["color", "country", "fruit"]);
        game.start_with_rng(&mut seeded()).unwrap();

        assert_eq!(game.state(), GameState::Started);
        assert_eq!(game.rounds().len(), 3);

        let mut categories: Vec<_> = game.rounds().iter().map(|r| r.category.clone()).collect();
        categories.sort();
        assert_eq!(categories, vec!["color", "country", "fruit"]);

        for (i, round) in game.rounds().iter().enumerate() {
            assert_eq!(round.round_id as usize, i + 1);
            let mut names: Vec<_> = round.turn_order.iter().map(|e| e.name.clone()).collect();
            names.sort();
            assert_eq!(names, vec!["A", "B", "C"]);
            assert!(round.turn_order.iter().all(|e| !e.scored && e.points.is_none()));
        }

        let turn = game.current_turn().unwrap();
        let first = &game.rounds()[0];
        assert_eq!(turn.round_id, 1);
        assert_eq!(turn.player, first.turn_order[0].name);
        assert_eq!(turn.letter, first.letter);
        assert_eq!(turn.category, first.category);
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut game = configured(&["Solo"], &["color", "country", "fruit"]);
        let err = game.start_with_rng(&mut seeded()).unwrap_err();

        assert!(matches!(err, GameError::InvalidArgument(_)));
        assert!(err.to_string().contains("1 player(s)"));
        assert_eq!(game.state(), GameState::NotStarted);
        assert!(game.rounds().is_empty());
    }

    #[test]
    fn test_start_requires_categories() {
        let mut game = configured(&["A", "B"], &[]);
        let err = game.start_with_rng(&mut seeded()).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
        assert!(err.to_string().contains("categories"));
    }

    #[test]
    fn test_start_twice_fails() {
        let mut game = configured(&["A", "B"], &["color"]);
        game.start_with_rng(&mut seeded()).unwrap();

        let err = game.start_with_rng(&mut seeded()).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn test_every_game_uses_single_letter() {
        let mut game = configured(&["A", "B"], &["a", "b", "c", "d", "e"]);
        game.start_with_rng(&mut seeded()).unwrap();

        let first = game.rounds()[0].letter;
        assert!(game.rounds().iter().all(|r| r.letter == first));
    }

    #[test]
    fn test_every_round_draws_distinct_letters() {
        let mut game = configured(&["A", "B"], &["a", "b", "c", "d", "e"]);
        game.set_letter_policy(LetterPolicy::EveryRound).unwrap();
        game.start_with_rng(&mut seeded()).unwrap();

        let mut letters: Vec<_> = game.rounds().iter().map(|r| r.letter).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), 5);
    }

    #[test]
    fn test_excluded_letters_never_assigned() {
        let excluded: Vec<String> = ALPHABET.filter(|c| *c != 'q').map(String::from).collect();
        let mut game = configured(&["A", "B"], &["color", "fruit"]);
        game.exclude_letters(&excluded).unwrap();
        game.start_with_rng(&mut seeded()).unwrap();

        assert!(game.rounds().iter().all(|r| r.letter == 'q'));
    }

    #[test]
    fn test_every_round_rejects_exhausted_pool() {
        let excluded: Vec<String> = ALPHABET.skip(2).map(String::from).collect();
        let mut game = configured(&["A", "B"], &["color", "fruit", "country"]);
        game.exclude_letters(&excluded).unwrap();
        game.set_letter_policy(LetterPolicy::EveryRound).unwrap();

        let err = game.start_with_rng(&mut seeded()).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
        assert!(err.to_string().contains("only 2"));
        assert_eq!(game.state(), GameState::NotStarted);
    }

    #[test]
    fn test_excluding_every_letter_fails_start() {
        let excluded: Vec<String> = ALPHABET.map(String::from).collect();
        let mut game = configured(&["A", "B"], &["color"]);
        game.exclude_letters(&excluded).unwrap();

        assert!(matches!(
            game.start_with_rng(&mut seeded()),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_exclude_letters_validates_elements() {
        let mut game = Game::new();

        for bad in [vec!["ab"], vec![""], vec!["1"], vec!["a", "xy"]] {
            let err = game.exclude_letters(&bad).unwrap_err();
            assert!(matches!(err, GameError::InvalidArgument(_)), "{:?}", bad);
        }
        assert!(game.excluded_letters().is_empty());
    }

    #[test]
    fn test_exclude_letters_normalizes_and_dedups() {
        let mut game = Game::new();
        game.exclude_letters(&["K", "a", "k"]).unwrap();

        assert_eq!(game.excluded_letters(), &['k', 'a']);
        assert_eq!(game.available_letters().len(), 24);
    }

    #[test]
    fn test_setters_rejected_after_start() {
        let mut game = configured(&["A", "B"], &["color"]);
        game.start_with_rng(&mut seeded()).unwrap();

        assert!(matches!(
            game.set_categories(&["fruit"]),
            Err(GameError::InvalidState(_))
        ));
        assert!(matches!(
            game.exclude_letters(&["a"]),
            Err(GameError::InvalidState(_))
        ));
        assert!(matches!(
            game.set_letter_policy(LetterPolicy::EveryRound),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_version_counts_mutations() {
        let mut game = Game::new();
        game.add_player("A").unwrap().add_player("B").unwrap();
        game.set_categories(&["color"]).unwrap();
        assert_eq!(game.version(), 3);

        game.start_with_rng(&mut seeded()).unwrap();
        assert_eq!(game.version(), 4);

        // Failed mutations leave the version alone
        let _ = game.add_player("C");
        assert_eq!(game.version(), 4);
    }

    #[test]
    fn test_round_lookup() {
        let mut game = configured(&["A", "B"], &["color", "fruit"]);
        assert!(game.round(1).is_none());

        game.start_with_rng(&mut seeded()).unwrap();
        assert_eq!(game.round(1).unwrap().round_id, 1);
        assert_eq!(game.round(2).unwrap().round_id, 2);
        assert!(game.round(0).is_none());
        assert!(game.round(3).is_none());
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = configured(&["A", "B", "C"], &["color", "fruit", "country"]);
        let mut b = a.clone();
        a.start_with_rng(&mut seeded()).unwrap();
        b.start_with_rng(&mut seeded()).unwrap();
        assert_eq!(a.rounds(), b.rounds());
    }
}

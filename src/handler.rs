//! Stateless invocation: load a snapshot, apply one command, persist.
//!
//! Every write goes through [`SnapshotStore::compare_and_swap`] with the
//! version that was loaded, so two invocations racing on the same game cannot
//! both land.

use crate::error::GameError;
use crate::game::Game;
use crate::protocol::Command;
use crate::store::{SnapshotStore, StoreError, StoredSnapshot};
use crate::types::GameId;
use crate::validator::{Category, CategoryValidator, TermSetProvider};
use rand::Rng;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading the command or a configured input file failed
    #[error("Failed to read {what}: {source}")]
    Input {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

impl HandlerError {
    pub fn input(what: impl Into<String>, source: std::io::Error) -> Self {
        HandlerError::Input {
            what: what.into(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::Game(e) => e.code(),
            HandlerError::Store(e) => e.code(),
            HandlerError::Input { .. } => "INPUT_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The game after the command, as persisted
    Game {
        game_id: GameId,
        version: u64,
        document: String,
    },
    TermChecked {
        term: String,
        valid: bool,
    },
}

pub struct Handler<S, R> {
    store: S,
    terms: Box<dyn TermSetProvider>,
    rng: R,
}

impl<S: SnapshotStore, R: Rng> Handler<S, R> {
    pub fn new(store: S, terms: Box<dyn TermSetProvider>, rng: R) -> Self {
        Self { store, terms, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Handle one command and return the resulting outcome
    pub fn handle(&mut self, command: Command) -> Result<Outcome, HandlerError> {
        tracing::info!(action = command.action(), game_id = ?command.game_id(), "Handling command");

        match command {
            Command::Create => self.create(),
            Command::CheckTerm {
                category,
                language,
                term,
            } => {
                let validator =
                    CategoryValidator::new(&self.terms, category.parse::<Category>()?, &language)?;
                let valid = validator.check(&term);
                Ok(Outcome::TermChecked { term, valid })
            }
            Command::AddPlayer { game_id, name } => {
                self.mutate(&game_id, |game| game.add_player(name).map(|_| ()))
            }
            Command::SetCategories {
                game_id,
                categories,
            } => self.mutate(&game_id, |game| game.set_categories(&categories).map(|_| ())),
            Command::ExcludeLetters { game_id, letters } => {
                self.mutate(&game_id, |game| game.exclude_letters(&letters).map(|_| ()))
            }
            Command::SetLetterPolicy { game_id, policy } => {
                self.mutate(&game_id, |game| game.set_letter_policy(policy).map(|_| ()))
            }
            Command::Start { game_id } => {
                let rng = &mut self.rng;
                Self::apply(&mut self.store, &game_id, |game| game.start_with_rng(rng))
            }
            Command::Score {
                game_id,
                round_id,
                player,
                points,
            } => self.mutate(&game_id, |game| game.score(round_id, &player, points)),
        }
    }

    fn create(&mut self) -> Result<Outcome, HandlerError> {
        let game = Game::new();
        let document = game.serialize()?;
        self.store.compare_and_swap(
            game.id(),
            None,
            StoredSnapshot {
                version: game.version(),
                document: document.clone(),
            },
        )?;

        tracing::info!(game_id = %game.id(), "Game created");
        Ok(Outcome::Game {
            game_id: game.id().to_string(),
            version: game.version(),
            document,
        })
    }

    fn mutate<F>(&mut self, game_id: &str, f: F) -> Result<Outcome, HandlerError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        Self::apply(&mut self.store, game_id, f)
    }

    fn apply<F>(store: &mut S, game_id: &str, f: F) -> Result<Outcome, HandlerError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        let stored = store
            .load(game_id)?
            .ok_or_else(|| GameError::NotFound(format!("Game {} not found", game_id)))?;

        let mut game = Game::deserialize(&stored.document)?;
        if game.id() != game_id || game.version() != stored.version {
            return Err(StoreError::Corrupt {
                id: game_id.to_string(),
                reason: format!(
                    "stored under {} v{} but document is {} v{}",
                    game_id,
                    stored.version,
                    game.id(),
                    game.version()
                ),
            }
            .into());
        }

        if let Err(e) = f(&mut game) {
            tracing::warn!(game_id, code = e.code(), error = %e, "Command rejected");
            return Err(e.into());
        }

        let document = game.serialize()?;
        store.compare_and_swap(
            game_id,
            Some(stored.version),
            StoredSnapshot {
                version: game.version(),
                document: document.clone(),
            },
        )?;

        tracing::info!(
            game_id,
            version = game.version(),
            state = %game.state(),
            "Game saved"
        );
        Ok(Outcome::Game {
            game_id: game_id.to_string(),
            version: game.version(),
            document,
        })
    }
}

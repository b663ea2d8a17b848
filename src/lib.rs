// Public API for the binary and for embedding in other request handlers

pub mod config;
pub mod error;
pub mod game;
pub mod handler;
pub mod protocol;
pub mod shuffle;
pub mod store;
pub mod types;
pub mod validator;

pub use error::{GameError, GameResult};
pub use game::Game;

use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stopgame::{
    config::Config,
    handler::{Handler, HandlerError, Outcome},
    protocol::{Command, Reply},
    store::FileStore,
    validator::{BuiltinTerms, MemoryTerms, TermSetProvider},
};

fn main() -> ExitCode {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // stdout carries the reply, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stopgame=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    match run(&config) {
        Ok(Outcome::Game { document, .. }) => {
            println!("{}", document);
            ExitCode::SUCCESS
        }
        Ok(Outcome::TermChecked { term, valid }) => {
            print_reply(&Reply::TermChecked { term, valid });
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.code(), "Command failed: {}", e);
            print_reply(&Reply::Error {
                code: e.code().to_string(),
                msg: e.to_string(),
            });
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<Outcome, HandlerError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| HandlerError::input("command from stdin", e))?;
    let command = Command::from_json(&input)?;

    let terms: Box<dyn TermSetProvider> = match &config.terms_file {
        Some(path) => {
            let document = std::fs::read_to_string(path).map_err(|e| {
                HandlerError::input(format!("terms file {}", path.display()), e)
            })?;
            Box::new(MemoryTerms::from_json(&document)?)
        }
        None => Box::new(BuiltinTerms),
    };

    let store = FileStore::open(&config.state_dir)?;
    let mut handler = Handler::new(store, terms, rand::rng());
    handler.handle(command)
}

fn print_reply(reply: &Reply) {
    match serde_json::to_string(reply) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode reply: {}", e),
    }
}

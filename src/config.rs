use std::path::PathBuf;

const DEFAULT_STATE_DIR: &str = "./games";

/// Runtime configuration for the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one snapshot file per game
    pub state_dir: PathBuf,
    /// Optional JSON term tables; builtin tables are used when unset
    pub terms_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            terms_file: None,
        }
    }
}

impl Config {
    /// Load config from environment variables
    /// STOPGAME_STATE_DIR and STOPGAME_TERMS_FILE; blank values count as unset
    pub fn from_env() -> Self {
        let state_dir = std::env::var("STOPGAME_STATE_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

        let terms_file = std::env::var("STOPGAME_TERMS_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        tracing::info!(
            state_dir = %state_dir.display(),
            terms_file = ?terms_file,
            "Config loaded"
        );

        Self {
            state_dir,
            terms_file,
        }
    }
}

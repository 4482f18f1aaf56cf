// Data source: loads the player catalog and the draft state together.
//
// A load returns both documents or an error, never one without the other.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::DataConfig;
use crate::draft::player::Player;
use crate::draft::state::DraftState;
use crate::draft::DraftSnapshot;

/// Default file name of the player catalog.
pub const PLAYERS_FILE: &str = "players.public.json";
/// Default file name of the draft state.
pub const STATE_FILE: &str = "draft-state.json";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    /// A backing document is missing or could not be read.
    #[error("draft data unavailable at {location}: {source}")]
    DataUnavailable {
        location: String,
        #[source]
        source: BoxError,
    },

    /// A backing document was read but is not the expected structure.
    #[error("draft data malformed at {location}: {source}")]
    DataMalformed {
        location: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn unavailable(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::DataUnavailable {
            location: location.into(),
            source: source.into(),
        }
    }

    pub fn malformed(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StoreError::DataMalformed {
            location: location.into(),
            source: source.into(),
        }
    }

    /// The document location the error refers to.
    pub fn location(&self) -> &str {
        match self {
            StoreError::DataUnavailable { location, .. }
            | StoreError::DataMalformed { location, .. } => location,
        }
    }
}

// ---------------------------------------------------------------------------
// DraftSource
// ---------------------------------------------------------------------------

/// Anything that can produce a complete draft snapshot.
#[async_trait]
pub trait DraftSource: Send + Sync {
    /// Read the catalog and the draft state. No partial results.
    async fn load(&self) -> Result<DraftSnapshot, StoreError>;

    /// Human-readable location of the backing data, for logs and status lines.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Reads `players.public.json` and `draft-state.json` from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    players_path: PathBuf,
    state_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(players_path: impl Into<PathBuf>, state_path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            players_path: players_path.into(),
            state_path: state_path.into(),
        }
    }

    /// Store over the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        JsonFileStore::new(dir.join(PLAYERS_FILE), dir.join(STATE_FILE))
    }

    /// Store over the `[data]` section of the configuration, relative to `base_dir`.
    pub fn from_config(base_dir: &Path, data: &DataConfig) -> Self {
        let dir = base_dir.join(&data.dir);
        JsonFileStore::new(dir.join(&data.players_file), dir.join(&data.state_file))
    }

    pub fn players_path(&self) -> &Path {
        &self.players_path
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

#[async_trait]
impl DraftSource for JsonFileStore {
    async fn load(&self) -> Result<DraftSnapshot, StoreError> {
        // The two documents are independent; read them concurrently.
        let (players_raw, state_raw) = tokio::try_join!(
            read_document(&self.players_path),
            read_document(&self.state_path),
        )?;

        let players: Vec<Player> = parse_document(&self.players_path, &players_raw)?;
        let state: DraftState = parse_document(&self.state_path, &state_raw)?;

        debug!(
            "Loaded {} players and {} picks from {}",
            players.len(),
            state.picks.len(),
            self.describe()
        );

        Ok(DraftSnapshot::new(players, state))
    }

    fn describe(&self) -> String {
        match self.players_path.parent() {
            Some(dir) if self.state_path.parent() == Some(dir) => dir.display().to_string(),
            _ => format!(
                "{} + {}",
                self.players_path.display(),
                self.state_path.display()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn read_document(path: &Path) -> Result<String, StoreError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::unavailable(path.display().to_string(), e))
}

fn parse_document<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::malformed(path.display().to_string(), e))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

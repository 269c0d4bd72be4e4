//! `GameHost` builder: picks the catalog, the roster store and the
//! settings, then starts the game actor.

use std::path::PathBuf;
use std::sync::Arc;

use impostor_game::{GameConfig, GameHandle, GameMachine, spawn_game};
use impostor_model::JsonCodec;
use impostor_setup::{FileHistoryStore, MemoryHistoryStore, NameHistoryStore, WordCatalog};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ImpostorError;

/// Where the word catalog comes from.
enum CatalogSource {
    Builtin,
    Given(Arc<WordCatalog>),
    File(PathBuf),
}

/// Builder for a [`GameHost`].
///
/// # Example
///
/// ```rust,no_run
/// use impostor::prelude::*;
///
/// # async fn run() -> Result<(), ImpostorError> {
/// let host = GameHost::builder()
///     .catalog_file("words.json")
///     .history_file("names.json")
///     .config(GameConfig {
///         low_time_secs: 30,
///         ..GameConfig::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct GameHostBuilder {
    catalog: CatalogSource,
    history_path: Option<PathBuf>,
    config: GameConfig,
    seed: Option<u64>,
}

impl GameHostBuilder {
    /// Built-in catalog, roster kept in memory only, default settings.
    pub fn new() -> Self {
        Self {
            catalog: CatalogSource::Builtin,
            history_path: None,
            config: GameConfig::default(),
            seed: None,
        }
    }

    /// Uses the given catalog instead of the built-in one.
    pub fn catalog(mut self, catalog: WordCatalog) -> Self {
        self.catalog = CatalogSource::Given(Arc::new(catalog));
        self
    }

    /// Loads the catalog from a JSON file at build time.
    ///
    /// The file holds a list of `{"name": ..., "words": [...]}` objects.
    pub fn catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = CatalogSource::File(path.into());
        self
    }

    /// Remembers the roster in a JSON file between runs.
    pub fn history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Makes every draw reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolves the catalog and starts the game actor.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// [`ImpostorError::CatalogRead`], [`ImpostorError::Model`] or
    /// [`ImpostorError::EmptyCatalog`] when a catalog file is unusable.
    pub fn build(self) -> Result<GameHost, ImpostorError> {
        let catalog = match self.catalog {
            CatalogSource::Builtin => Arc::new(WordCatalog::builtin()),
            CatalogSource::Given(catalog) => catalog,
            CatalogSource::File(path) => Arc::new(load_catalog(path)?),
        };

        let store: Box<dyn NameHistoryStore> = match self.history_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "roster kept on disk");
                Box::new(FileHistoryStore::new(path))
            }
            None => Box::new(MemoryHistoryStore::new()),
        };

        let mut machine = GameMachine::new(Arc::clone(&catalog), store, self.config);
        if let Some(seed) = self.seed {
            machine = machine.with_rng(StdRng::seed_from_u64(seed));
        }
        let handle = spawn_game(machine);

        tracing::info!(categories = catalog.len(), "game host started");
        Ok(GameHost { handle, catalog })
    }
}

impl Default for GameHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn load_catalog(path: PathBuf) -> Result<WordCatalog, ImpostorError> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) => return Err(ImpostorError::CatalogRead { path, source }),
    };
    let catalog = WordCatalog::decode(&JsonCodec, &bytes)?;
    if catalog.is_empty() {
        return Err(ImpostorError::EmptyCatalog(path));
    }
    tracing::debug!(path = %path.display(), categories = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// A running game plus the catalog it deals from.
pub struct GameHost {
    handle: GameHandle,
    catalog: Arc<WordCatalog>,
}

impl GameHost {
    pub fn builder() -> GameHostBuilder {
        GameHostBuilder::new()
    }

    /// Handle for sending events. Clone it freely.
    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Stops the game actor.
    pub async fn shutdown(self) -> Result<(), ImpostorError> {
        self.handle.shutdown().await?;
        tracing::info!("game host stopped");
        Ok(())
    }
}

//! The configurator: validates a lobby request and deals a [`Session`].
//!
//! ```text
//! raw names ──normalize──→ names ──validate──→ resolve category
//!                                                   │
//!                     Session ←──assign roles←── draw word
//!                        │
//!                        └──→ NameHistory::record(names)
//! ```
//!
//! Every random choice goes through a caller-supplied [`Rng`] in
//! [`Configurator::finalize_with_rng`], so tests can seed it.

use std::sync::Arc;

use impostor_model::{CategoryChoice, Player, PlayerId, Role, Session, SessionConfig};
use rand::Rng;
use rand::seq::{IndexedRandom, index};

use crate::{Category, NameHistory, NameHistoryStore, SetupError, WordCatalog};

/// Turns lobby input into sessions against one word catalog.
#[derive(Debug, Clone)]
pub struct Configurator {
    catalog: Arc<WordCatalog>,
}

impl Configurator {
    pub fn new(catalog: Arc<WordCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Validates the request and builds a session using the thread RNG.
    ///
    /// On success the normalized names overwrite `history`.
    ///
    /// # Errors
    /// The first failing check, in this order:
    /// [`SetupError::InsufficientPlayers`],
    /// [`SetupError::InvalidImpostorCount`],
    /// [`SetupError::InvalidDuration`],
    /// [`SetupError::UnknownCategory`],
    /// [`SetupError::EmptyCategory`].
    pub fn finalize<N, S>(
        &self,
        raw_names: &[N],
        config: &SessionConfig,
        history: &mut NameHistory<S>,
    ) -> Result<Session, SetupError>
    where
        N: AsRef<str>,
        S: NameHistoryStore,
    {
        self.finalize_with_rng(raw_names, config, history, &mut rand::rng())
    }

    /// [`finalize`](Self::finalize) with an explicit source of randomness.
    pub fn finalize_with_rng<N, S, R>(
        &self,
        raw_names: &[N],
        config: &SessionConfig,
        history: &mut NameHistory<S>,
        rng: &mut R,
    ) -> Result<Session, SetupError>
    where
        N: AsRef<str>,
        S: NameHistoryStore,
        R: Rng + ?Sized,
    {
        let names = normalize_names(raw_names);
        let duration_secs = validate(&names, config)?;

        let category = self.resolve_category(&config.category, rng)?;
        let secret_word = category
            .words
            .choose(rng)
            .ok_or_else(|| SetupError::EmptyCategory(category.name.clone()))?
            .clone();

        let players = assign_roles(names.clone(), config.impostor_count, rng);
        let session = Session::new(players, category.name.clone(), secret_word, duration_secs)?;

        history.record(&names);

        tracing::info!(
            players = session.len(),
            impostors = session.impostor_count(),
            category = %session.category(),
            duration_secs,
            "session finalized"
        );
        Ok(session)
    }

    /// Resolves the sentinel once; named categories must exist.
    fn resolve_category<R: Rng + ?Sized>(
        &self,
        choice: &CategoryChoice,
        rng: &mut R,
    ) -> Result<&Category, SetupError> {
        match choice {
            CategoryChoice::Random => self
                .catalog
                .categories()
                .choose(rng)
                .ok_or_else(|| SetupError::UnknownCategory(CategoryChoice::RANDOM.to_string())),
            CategoryChoice::Named(name) => self
                .catalog
                .get(name)
                .ok_or_else(|| SetupError::UnknownCategory(name.clone())),
        }
    }
}

/// Trims every name and drops the ones left empty, keeping order.
pub fn normalize_names<N: AsRef<str>>(raw: &[N]) -> Vec<String> {
    raw.iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks the request in the documented order and returns the duration
/// in seconds.
fn validate(names: &[String], config: &SessionConfig) -> Result<u32, SetupError> {
    if names.len() < Session::MIN_PLAYERS {
        return Err(SetupError::InsufficientPlayers {
            found: names.len(),
            required: Session::MIN_PLAYERS,
        });
    }

    let count = config.impostor_count;
    let in_range = (SessionConfig::MIN_IMPOSTORS..=SessionConfig::MAX_IMPOSTORS).contains(&count);
    if !in_range || count >= names.len() {
        return Err(SetupError::InvalidImpostorCount {
            requested: count,
            players: names.len(),
        });
    }

    match config.duration_minutes.checked_mul(60) {
        Some(secs) if secs > 0 => Ok(secs),
        _ => Err(SetupError::InvalidDuration(config.duration_minutes)),
    }
}

/// Deals roles: everyone starts as a citizen with id `player-<index>`,
/// then `impostor_count` distinct positions become impostors.
///
/// Positions are drawn with [`rand::seq::index::sample`], which samples
/// without replacement in bounded time; every `impostor_count`-subset of
/// positions is equally likely.
///
/// # Panics
/// If `impostor_count > names.len()`. Callers validate first.
pub fn assign_roles<R: Rng + ?Sized>(
    names: Vec<String>,
    impostor_count: usize,
    rng: &mut R,
) -> Vec<Player> {
    let mut players: Vec<Player> = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Player {
            id: PlayerId(index),
            name,
            role: Role::Citizen,
        })
        .collect();

    for index in index::sample(rng, players.len(), impostor_count) {
        players[index].role = Role::Impostor;
    }
    players
}

//! Core data types for one game of Impostor.
//!
//! A game is described by two records:
//!
//! - [`SessionConfig`]: what the person at the lobby *asked for*
//!   (a category or "random", how many impostors, how many minutes).
//! - [`Session`]: what the game *resolved to* (the concrete category,
//!   the secret word, and every player's role). Built once, read-only
//!   afterwards, thrown away when the next game starts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable identifier for a player within one session.
///
/// The id is positional: the player entered third gets `player-2`. It is
/// only meaningful inside the session that produced it. Two players with
/// the same display name still get distinct ids.
///
/// Serialized as its string form (`"player-2"`), not as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PlayerId(pub usize);

impl PlayerId {
    const PREFIX: &'static str = "player-";

    /// Position of the player in the session's roster.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.to_string()
    }
}

impl FromStr for PlayerId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|index| index.parse().ok())
            .map(PlayerId)
            .ok_or_else(|| ModelError::InvalidPlayerId(s.to_string()))
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The secret role dealt to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Knows the secret word.
    Citizen,
    /// Does not know the word and tries not to get caught.
    Impostor,
}

impl Role {
    pub fn is_impostor(&self) -> bool {
        matches!(self, Self::Impostor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Citizen => write!(f, "citizen"),
            Self::Impostor => write!(f, "impostor"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Trimmed, never empty.
    pub name: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// CategoryChoice
// ---------------------------------------------------------------------------

/// The category requested at the lobby.
///
/// `Random` is a sentinel: it is resolved to a concrete category exactly
/// once, when the session is built, and never appears in a [`Session`].
///
/// On the wire and in text it is the string `"random"`; anything else is
/// taken as a category name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CategoryChoice {
    /// Pick uniformly among every category when the game starts.
    #[default]
    Random,
    /// Use this category.
    Named(String),
}

impl CategoryChoice {
    pub const RANDOM: &'static str = "random";

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str(Self::RANDOM),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<String> for CategoryChoice {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case(Self::RANDOM) {
            Self::Random
        } else {
            Self::Named(s)
        }
    }
}

impl From<CategoryChoice> for String {
    fn from(choice: CategoryChoice) -> Self {
        choice.to_string()
    }
}

impl FromStr for CategoryChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// What the lobby asked for. Validated by the configurator, not here.
///
/// The defaults match a fresh lobby: random category, one impostor,
/// five minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub category: CategoryChoice,
    pub impostor_count: usize,
    pub duration_minutes: u32,
}

impl SessionConfig {
    pub const MIN_IMPOSTORS: usize = 1;
    pub const MAX_IMPOSTORS: usize = 2;

    /// Durations the lobby offers as one-tap choices. Any positive
    /// number of minutes is accepted.
    pub const DURATION_PRESETS_MINUTES: [u32; 4] = [3, 5, 7, 10];
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            category: CategoryChoice::Random,
            impostor_count: 1,
            duration_minutes: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The resolved record of one game.
///
/// Invariants, checked by [`Session::new`]:
/// - at least [`Session::MIN_PLAYERS`] players;
/// - `1 <= impostor_count < players.len()`, where `impostor_count` is the
///   number of players whose role is [`Role::Impostor`].
///
/// That the secret word belongs to the category is the configurator's
/// job; the model has no catalog to check against.
///
/// Decoding goes through [`Session::new`] as well, so a record that breaks
/// the invariants fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    players: Vec<Player>,
    category: String,
    secret_word: String,
    impostor_count: usize,
    duration_secs: u32,
}

impl Session {
    pub const MIN_PLAYERS: usize = 3;

    /// Builds a session, tallying impostors from the players' roles.
    ///
    /// # Errors
    /// [`ModelError::InvalidSession`] if the roster is too small or the
    /// impostor tally is out of range.
    pub fn new(
        players: Vec<Player>,
        category: impl Into<String>,
        secret_word: impl Into<String>,
        duration_secs: u32,
    ) -> Result<Self, ModelError> {
        if players.len() < Self::MIN_PLAYERS {
            return Err(ModelError::InvalidSession(format!(
                "{} players, need at least {}",
                players.len(),
                Self::MIN_PLAYERS
            )));
        }
        let impostor_count = players.iter().filter(|p| p.role.is_impostor()).count();
        if impostor_count == 0 || impostor_count >= players.len() {
            return Err(ModelError::InvalidSession(format!(
                "{impostor_count} impostors among {} players",
                players.len()
            )));
        }
        if duration_secs == 0 {
            return Err(ModelError::InvalidSession("zero duration".into()));
        }

        Ok(Self {
            players,
            category: category.into(),
            secret_word: secret_word.into(),
            impostor_count,
            duration_secs,
        })
    }

    /// Players in entry order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always `false` for a valid session; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn impostor_count(&self) -> usize {
        self.impostor_count
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Display names in entry order.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn impostors(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.role.is_impostor())
    }

    pub fn citizens(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.role.is_impostor())
    }
}

/// Wire shape of a [`Session`], checked before it becomes one.
#[derive(Deserialize)]
struct SessionRecord {
    players: Vec<Player>,
    category: String,
    secret_word: String,
    impostor_count: usize,
    duration_secs: u32,
}

impl TryFrom<SessionRecord> for Session {
    type Error = ModelError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let session = Session::new(
            record.players,
            record.category,
            record.secret_word,
            record.duration_secs,
        )?;
        if session.impostor_count != record.impostor_count {
            return Err(ModelError::InvalidSession(format!(
                "impostor_count {} but {} players are impostors",
                record.impostor_count, session.impostor_count
            )));
        }
        Ok(session)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn player(index: usize, name: &str, role: Role) -> Player {
        Player {
            id: PlayerId(index),
            name: name.into(),
            role,
        }
    }

    fn three_players(impostors: &[usize]) -> Vec<Player> {
        ["Ana", "Bea", "Cleo"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let role = if impostors.contains(&i) {
                    Role::Impostor
                } else {
                    Role::Citizen
                };
                player(i, name, role)
            })
            .collect()
    }

    // -- PlayerId ---------------------------------------------------------

    #[test]
    fn test_player_id_display_is_positional() {
        assert_eq!(PlayerId(0).to_string(), "player-0");
        assert_eq!(PlayerId(12).to_string(), "player-12");
    }

    #[test]
    fn test_player_id_parse_rejects_foreign_format() {
        assert_eq!("player-4".parse::<PlayerId>().unwrap(), PlayerId(4));
        assert!("P-4".parse::<PlayerId>().is_err());
        assert!("player-".parse::<PlayerId>().is_err());
        assert!("player-x".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_player_id_serializes_as_string() {
        let json = serde_json::to_string(&PlayerId(2)).unwrap();
        assert_eq!(json, r#""player-2""#);
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId(2));
    }

    // -- Role -------------------------------------------------------------

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Impostor).unwrap(), r#""impostor""#);
        assert_eq!(serde_json::to_string(&Role::Citizen).unwrap(), r#""citizen""#);
    }

    // -- CategoryChoice ---------------------------------------------------

    #[test]
    fn test_category_choice_random_sentinel_parses() {
        assert_eq!("random".parse::<CategoryChoice>().unwrap(), CategoryChoice::Random);
        assert_eq!("Random".parse::<CategoryChoice>().unwrap(), CategoryChoice::Random);
        assert_eq!(
            "Animals".parse::<CategoryChoice>().unwrap(),
            CategoryChoice::named("Animals")
        );
    }

    #[test]
    fn test_category_choice_serializes_as_plain_string() {
        let json = serde_json::to_string(&CategoryChoice::named("Food")).unwrap();
        assert_eq!(json, r#""Food""#);
        let json = serde_json::to_string(&CategoryChoice::Random).unwrap();
        assert_eq!(json, r#""random""#);
    }

    // -- SessionConfig ----------------------------------------------------

    #[test]
    fn test_session_config_default_matches_fresh_lobby() {
        let config = SessionConfig::default();
        assert!(config.category.is_random());
        assert_eq!(config.impostor_count, 1);
        assert_eq!(config.duration_minutes, 5);
    }

    // -- Session ----------------------------------------------------------

    #[test]
    fn test_session_new_tallies_impostors() {
        let session = Session::new(three_players(&[1]), "Animals", "Cat", 300).unwrap();
        assert_eq!(session.impostor_count(), 1);
        assert_eq!(session.impostors().count(), 1);
        assert_eq!(session.citizens().count(), 2);
        assert_eq!(session.player_names(), vec!["Ana", "Bea", "Cleo"]);
    }

    #[test]
    fn test_session_new_too_few_players_fails() {
        let mut players = three_players(&[0]);
        players.pop();
        let result = Session::new(players, "Animals", "Cat", 300);
        assert!(matches!(result, Err(ModelError::InvalidSession(_))));
    }

    #[test]
    fn test_session_new_without_impostor_fails() {
        let result = Session::new(three_players(&[]), "Animals", "Cat", 300);
        assert!(matches!(result, Err(ModelError::InvalidSession(_))));
    }

    #[test]
    fn test_session_new_all_impostors_fails() {
        let result = Session::new(three_players(&[0, 1, 2]), "Animals", "Cat", 300);
        assert!(matches!(result, Err(ModelError::InvalidSession(_))));
    }

    #[test]
    fn test_session_json_round_trip_keeps_roles() {
        let session = Session::new(three_players(&[2]), "Animals", "Cat", 300).unwrap();
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_session_decode_rejects_invalid_record() {
        let empty = r#"{"players":[],"category":"Animals","secret_word":"Cat","impostor_count":5,"duration_secs":0}"#;
        assert!(serde_json::from_str::<Session>(empty).is_err());

        let no_impostor = Session::new(three_players(&[0]), "Animals", "Cat", 300)
            .map(|s| serde_json::to_string(&s).unwrap())
            .unwrap()
            .replace(r#""role":"impostor""#, r#""role":"citizen""#);
        assert!(serde_json::from_str::<Session>(&no_impostor).is_err());
    }

    #[test]
    fn test_session_decode_rejects_wrong_impostor_tally() {
        let json = serde_json::to_string(
            &Session::new(three_players(&[1]), "Animals", "Cat", 300).unwrap(),
        )
        .unwrap()
        .replace(r#""impostor_count":1"#, r#""impostor_count":2"#);
        let err = serde_json::from_str::<Session>(&json).unwrap_err();
        assert!(err.to_string().contains("impostor_count 2"));
    }
}

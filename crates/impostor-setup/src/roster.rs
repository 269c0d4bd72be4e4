//! The lobby draft: everything the configuring player can edit before
//! pressing start.
//!
//! A draft is deliberately loose. Slots may be blank, the impostor count
//! may be too high for the roster, the category may not exist. Nothing is
//! checked until [`Configurator::finalize`](crate::Configurator::finalize);
//! a failed start hands the same draft back so no field is lost.

use impostor_model::{CategoryChoice, SessionConfig};
use serde::{Deserialize, Serialize};

/// Ordered name slots as typed, blanks included.
///
/// Decoded drafts are padded to [`Self::MIN_SLOTS`] like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RosterRecord")]
pub struct RosterDraft {
    slots: Vec<String>,
}

#[derive(Deserialize)]
struct RosterRecord {
    slots: Vec<String>,
}

impl From<RosterRecord> for RosterDraft {
    fn from(record: RosterRecord) -> Self {
        Self::from_slots(record.slots)
    }
}

impl RosterDraft {
    /// The lobby never shows fewer slots than this.
    pub const MIN_SLOTS: usize = 3;

    /// Three blank slots.
    pub fn empty() -> Self {
        Self::from_slots(Vec::new())
    }

    /// Starts from remembered names, padding with blanks to
    /// [`Self::MIN_SLOTS`].
    pub fn from_history(names: &[String]) -> Self {
        Self::from_slots(names.to_vec())
    }

    pub fn from_slots(mut slots: Vec<String>) -> Self {
        if slots.len() < Self::MIN_SLOTS {
            slots.resize(Self::MIN_SLOTS, String::new());
        }
        Self { slots }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn add_slot(&mut self) {
        self.slots.push(String::new());
    }

    /// Overwrites one slot. Returns `false` if `index` is out of range.
    pub fn set(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = name.into();
                true
            }
            None => false,
        }
    }

    /// Removes one slot. Refused (returns `false`) when only
    /// [`Self::MIN_SLOTS`] remain or `index` is out of range.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if self.slots.len() <= Self::MIN_SLOTS || index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        true
    }

    /// Slots holding something other than whitespace.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.trim().is_empty()).count()
    }
}

impl Default for RosterDraft {
    fn default() -> Self {
        Self::empty()
    }
}

/// One edit made at the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEdit {
    AddSlot,
    RemoveSlot(usize),
    SetName { index: usize, name: String },
    SetCategory(CategoryChoice),
    SetImpostorCount(usize),
    SetDuration(u32),
}

/// Roster plus options: the whole lobby form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupDraft {
    pub roster: RosterDraft,
    pub config: SessionConfig,
}

impl SetupDraft {
    pub fn new(roster: RosterDraft, config: SessionConfig) -> Self {
        Self { roster, config }
    }

    /// Applies an edit. Returns `false` when the edit was refused
    /// (slot index out of range, removing below the minimum).
    ///
    /// Option values are stored as given; range checks belong to
    /// `finalize`.
    pub fn apply(&mut self, edit: DraftEdit) -> bool {
        match edit {
            DraftEdit::AddSlot => {
                self.roster.add_slot();
                true
            }
            DraftEdit::RemoveSlot(index) => self.roster.remove_slot(index),
            DraftEdit::SetName { index, name } => self.roster.set(index, name),
            DraftEdit::SetCategory(category) => {
                self.config.category = category;
                true
            }
            DraftEdit::SetImpostorCount(count) => {
                self.config.impostor_count = count;
                true
            }
            DraftEdit::SetDuration(minutes) => {
                self.config.duration_minutes = minutes;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use impostor_model::{Codec, JsonCodec};

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_history_empty_gives_three_blank_slots() {
        let draft = RosterDraft::from_history(&[]);
        assert_eq!(draft.slots(), ["", "", ""]);
        assert_eq!(draft.filled_count(), 0);
    }

    #[test]
    fn test_from_history_short_list_is_padded() {
        let draft = RosterDraft::from_history(&names(&["Ana"]));
        assert_eq!(draft.slots(), ["Ana", "", ""]);
    }

    #[test]
    fn test_from_history_long_list_kept_in_order() {
        let draft = RosterDraft::from_history(&names(&["Ana", "Bea", "Cleo", "Dani"]));
        assert_eq!(draft.slots(), ["Ana", "Bea", "Cleo", "Dani"]);
    }

    #[test]
    fn test_decoded_short_roster_is_padded() {
        let draft: RosterDraft = JsonCodec.decode(br#"{"slots":["Ana"]}"#).unwrap();
        assert_eq!(draft.slots(), ["Ana", "", ""]);

        let draft: RosterDraft = JsonCodec.decode(br#"{"slots":[]}"#).unwrap();
        assert_eq!(draft.slots().len(), RosterDraft::MIN_SLOTS);
    }

    #[test]
    fn test_remove_slot_refused_at_minimum() {
        let mut draft = RosterDraft::empty();
        assert!(!draft.remove_slot(0));
        draft.add_slot();
        assert!(draft.remove_slot(3));
        assert_eq!(draft.slots().len(), 3);
        assert!(!draft.remove_slot(1));
    }

    #[test]
    fn test_set_out_of_range_refused() {
        let mut draft = RosterDraft::empty();
        assert!(draft.set(2, "Cleo"));
        assert!(!draft.set(3, "Dani"));
        assert_eq!(draft.slots(), ["", "", "Cleo"]);
    }

    #[test]
    fn test_filled_count_ignores_whitespace() {
        let draft = RosterDraft::from_slots(names(&["Ana", "  ", "Bea", ""]));
        assert_eq!(draft.filled_count(), 2);
    }

    #[test]
    fn test_apply_option_edits_stored_verbatim() {
        let mut draft = SetupDraft::default();
        assert!(draft.apply(DraftEdit::SetImpostorCount(7)));
        assert!(draft.apply(DraftEdit::SetDuration(0)));
        assert!(draft.apply(DraftEdit::SetCategory(CategoryChoice::named("Food"))));
        assert_eq!(draft.config.impostor_count, 7);
        assert_eq!(draft.config.duration_minutes, 0);
        assert_eq!(draft.config.category, CategoryChoice::named("Food"));
    }
}

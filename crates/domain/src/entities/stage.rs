//! Stage entity - One state in the relationship finite-state machine

use serde::{Deserialize, Serialize};

use crate::value_objects::Condition;

/// Localized flavor text shown when a stage is reached.
///
/// The condition list is always initialized, even when empty; downstream
/// tooling rejects stages whose entry has no condition collection at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub entry: String,
    pub conditions: Vec<Condition>,
}

impl LogEntry {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            conditions: Vec::new(),
        }
    }
}

/// An integer-indexed state in the relationship state machine.
///
/// Indices are sparse and author-chosen; the numeric banding (hundreds per
/// affinity tier) is a convention, not an enforced rule. Every stage carries
/// exactly one log entry, present even when its text is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub index: u16,
    /// Designer note; required non-empty for editor display
    pub note: String,
    pub log_entries: Vec<LogEntry>,
}

impl Stage {
    pub fn new(index: u16, note: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            index,
            note: note.into(),
            log_entries: vec![LogEntry::new(entry)],
        }
    }
}

/// A scripted-behavior record attached to a stage's log entry.
///
/// Keyed by `(stage, log_entry_index)`; log entry index is always 0 since
/// stages carry a single entry. Stages without scripted behavior simply have
/// no fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub stage: u16,
    pub log_entry_index: u32,
    pub fragment_name: String,
    pub script_name: String,
}

impl Fragment {
    /// Fragment for a stage's sole log entry, named per the fixed
    /// `Fragment_Stage_NNNN_Item_00` convention
    pub fn for_stage(stage: u16, script_name: impl Into<String>) -> Self {
        Self {
            stage,
            log_entry_index: 0,
            fragment_name: format!("Fragment_Stage_{:04}_Item_00", stage),
            script_name: script_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_always_has_one_log_entry() {
        let stage = Stage::new(406, "Friendship Scene Forcegreeted", "");
        assert_eq!(stage.log_entries.len(), 1);
        assert!(stage.log_entries[0].conditions.is_empty());
    }

    #[test]
    fn test_fragment_naming_convention() {
        let fragment = Fragment::for_stage(80, "Fragments:Quests:QF_COMClaude_00000805");
        assert_eq!(fragment.fragment_name, "Fragment_Stage_0080_Item_00");
        assert_eq!(fragment.log_entry_index, 0);
    }
}

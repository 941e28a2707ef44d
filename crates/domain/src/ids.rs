use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a record in the compiled output.
///
/// Form ids are issued monotonically by the id allocator for records this
/// build creates, or returned by the asset resolver for records that already
/// exist in the base content. They are never reused within one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(u32);

impl FormId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for FormId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<FormId> for u32 {
    fn from(value: FormId) -> Self {
        value.0
    }
}

/// Kind of external record the asset resolver can look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Faction,
    Global,
    Quest,
    Keyword,
    Race,
    VoiceType,
    ActorValue,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Faction => "Faction",
            Self::Global => "Global",
            Self::Quest => "Quest",
            Self::Keyword => "Keyword",
            Self::Race => "Race",
            Self::VoiceType => "VoiceType",
            Self::ActorValue => "ActorValue",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_id_hex_display() {
        assert_eq!(FormId::new(0x000805).to_string(), "00000805");
        assert_eq!(FormId::new(0x162C75).to_string(), "00162C75");
    }

    #[test]
    fn test_form_id_round_trip() {
        let id = FormId::from(42u32);
        assert_eq!(u32::from(id), 42);
    }
}

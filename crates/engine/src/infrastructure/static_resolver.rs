//! In-memory asset resolution

use std::collections::HashMap;

use questsmith_domain::{DomainError, FormId, RecordKind};

use crate::ports::AssetResolver;

/// Resolves symbolic names against a pre-registered table.
///
/// Stands in for a load-order lookup; the table is typically filled from a
/// scan of the base content.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    records: HashMap<(RecordKind, String), FormId>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, kind: RecordKind, editor_id: &str, id: FormId) -> Self {
        self.records.insert((kind, editor_id.to_string()), id);
        self
    }
}

impl AssetResolver for StaticResolver {
    fn resolve(&self, editor_id: &str, kind: RecordKind) -> Result<FormId, DomainError> {
        self.records
            .get(&(kind, editor_id.to_string()))
            .copied()
            .ok_or_else(|| DomainError::missing_entity(kind, editor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_record_resolves() {
        let resolver = StaticResolver::new().register(
            RecordKind::Faction,
            "CurrentCompanionFaction",
            FormId::new(0x0F),
        );
        let id = resolver
            .resolve("CurrentCompanionFaction", RecordKind::Faction)
            .expect("resolves");
        assert_eq!(id, FormId::new(0x0F));
    }

    #[test]
    fn test_missing_record_is_fatal() {
        let resolver = StaticResolver::new();
        let err = resolver
            .resolve("HumanRace", RecordKind::Race)
            .expect_err("not registered");
        assert_eq!(
            err,
            DomainError::MissingRequiredEntity {
                kind: RecordKind::Race,
                name: "HumanRace".into()
            }
        );
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let resolver =
            StaticResolver::new().register(RecordKind::Global, "Followers", FormId::new(1));
        assert!(resolver.resolve("Followers", RecordKind::Quest).is_err());
    }
}

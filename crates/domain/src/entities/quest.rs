//! Quest entity - Root of the relationship graph
//!
//! The quest owns its stages, scenes, topics, aliases, and script host.
//! Ownership is a strict tree; everything below it holds non-owning `FormId`
//! references.

use serde::{Deserialize, Serialize};

use crate::entities::scene::Scene;
use crate::entities::stage::{Fragment, Stage};
use crate::entities::topic::Topic;
use crate::ids::FormId;
use crate::value_objects::Condition;

/// Global quest flags; the guardrail requires all four set on the
/// relationship root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestFlags {
    pub start_game_enabled: bool,
    pub run_once: bool,
    pub add_idle_topic_to_hello: bool,
    pub allow_repeated_stages: bool,
}

impl QuestFlags {
    /// The full flag set a companion relationship quest must carry
    pub fn companion() -> Self {
        Self {
            start_game_enabled: true,
            run_once: true,
            add_idle_topic_to_hello: true,
            allow_repeated_stages: true,
        }
    }

    pub fn all_set(&self) -> bool {
        self.start_game_enabled
            && self.run_once
            && self.add_idle_topic_to_hello
            && self.allow_repeated_stages
    }
}

/// Capabilities of the primary actor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryCapabilities {
    pub essential: bool,
    pub quest_object: bool,
    pub stores_text: bool,
}

impl PrimaryCapabilities {
    pub fn companion() -> Self {
        Self {
            essential: true,
            quest_object: true,
            stores_text: true,
        }
    }
}

/// Capabilities of secondary/support actor slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCapabilities {
    pub optional: bool,
    pub allow_disabled: bool,
    pub allow_reserved: bool,
}

impl SupportCapabilities {
    pub fn bystander() -> Self {
        Self {
            optional: true,
            allow_disabled: true,
            allow_reserved: true,
        }
    }
}

/// A named actor-binding slot.
///
/// Each role carries its capability set explicitly instead of an untyped
/// flag bag: the primary slot (0) is the companion themselves, the secondary
/// slot (1) any currently-travelling companion, and support slots carry
/// their own ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alias {
    Primary {
        name: String,
        /// Concrete actor bound to the slot, when known at author time
        actor: Option<FormId>,
        capabilities: PrimaryCapabilities,
    },
    Secondary {
        name: String,
        capabilities: SupportCapabilities,
    },
    Support {
        slot: u32,
        name: String,
        capabilities: SupportCapabilities,
    },
}

impl Alias {
    pub fn slot(&self) -> u32 {
        match self {
            Self::Primary { .. } => 0,
            Self::Secondary { .. } => 1,
            Self::Support { slot, .. } => *slot,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primary { name, .. }
            | Self::Secondary { name, .. }
            | Self::Support { name, .. } => name,
        }
    }

    pub fn is_essential(&self) -> bool {
        match self {
            Self::Primary { capabilities, .. } => capabilities.essential,
            _ => false,
        }
    }
}

/// A bound property on an attached script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptProperty {
    pub name: String,
    pub object: FormId,
    /// Alias slot the property resolves through, for alias-typed properties
    pub alias: Option<u32>,
}

impl ScriptProperty {
    pub fn object(name: impl Into<String>, object: FormId) -> Self {
        Self {
            name: name.into(),
            object,
            alias: None,
        }
    }

    pub fn alias(name: impl Into<String>, quest: FormId, slot: u32) -> Self {
        Self {
            name: name.into(),
            object: quest,
            alias: Some(slot),
        }
    }
}

/// An attached script with its bound properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub name: String,
    pub properties: Vec<ScriptProperty>,
}

impl Script {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: ScriptProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }
}

/// Scripted-behavior host: the fragment script, its per-stage fragments,
/// and any additional attached scripts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptHost {
    /// Fragment-hosting script for stage logic
    pub fragment_script: Option<Script>,
    pub fragments: Vec<Fragment>,
    /// Scripts visible in the editor's scripts tab
    pub scripts: Vec<Script>,
}

impl ScriptHost {
    pub fn script(&self, name: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.name == name)
    }
}

/// The quest/graph root of the relationship state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: FormId,
    pub editor_id: String,
    /// Display name
    pub name: String,
    pub priority: u8,
    pub flags: QuestFlags,
    /// Conditions applied to every dialogue line of the quest; must anchor
    /// the speaker to alias slot 0
    pub dialog_conditions: Vec<Condition>,
    pub aliases: Vec<Alias>,
    pub stages: Vec<Stage>,
    pub scenes: Vec<Scene>,
    pub topics: Vec<Topic>,
    pub script_host: Option<ScriptHost>,
}

impl Quest {
    pub fn alias_by_slot(&self, slot: u32) -> Option<&Alias> {
        self.aliases.iter().find(|a| a.slot() == slot)
    }

    pub fn scene(&self, editor_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.editor_id == editor_id)
    }

    pub fn stage(&self, index: u16) -> Option<&Stage> {
        self.stages.iter().find(|s| s.index == index)
    }
}

//! Guardrail validator - Read-only structural consistency checker
//!
//! Walks a fully assembled graph and asserts every structural invariant
//! before compilation proceeds. Fails fast on the first violation, naming
//! the offending entity and the expected-vs-found values. No partial
//! repair: a partially-valid relationship state machine is unsafe to ship.
//!
//! Validation is pure and may run repeatedly without side effects.

use thiserror::Error;

use questsmith_domain::{Quest, TopicCategory, TopicSubtype};

/// Expected shape of a valid relationship quest.
///
/// The validator is generic over content; all fixed names, thresholds, and
/// phase counts live here. Defaults replicate the shipped companion quest.
#[derive(Debug, Clone)]
pub struct GuardrailPolicy {
    pub quest_priority: u8,
    pub quest_name: String,
    pub primary_alias: String,
    pub secondary_alias: String,
    /// Alias slot every dialogue line must anchor to
    pub anchor_slot: u32,
    pub min_stages: usize,
    pub min_fragments: usize,
    pub fragment_script_prefix: String,
    pub fragment_script_properties: Vec<String>,
    pub affinity_script: String,
    pub affinity_script_properties: Vec<String>,
    pub greeting_priority: u8,
    /// Scenes that must exist with exactly this many phases
    pub required_scenes: Vec<(String, usize)>,
}

impl Default for GuardrailPolicy {
    fn default() -> Self {
        Self {
            quest_priority: 70,
            quest_name: "Claude".into(),
            primary_alias: "Claude".into(),
            secondary_alias: "Companion".into(),
            anchor_slot: 0,
            min_stages: 53,
            min_fragments: 30,
            fragment_script_prefix: "Fragments:Quests:QF_COMClaude_".into(),
            fragment_script_properties: vec!["Alias_Claude".into(), "Followers".into()],
            affinity_script: "AffinitySceneHandlerScript".into(),
            affinity_script_properties: vec![
                "CompanionAlias".into(),
                "CA_TCustom2_Friend".into(),
            ],
            greeting_priority: 50,
            required_scenes: vec![
                ("COMClaude_01_NeutralToFriendship".into(), 8),
                ("COMClaude_02_FriendshipToAdmiration".into(), 6),
                ("COMClaude_02a_AdmirationToConfidant".into(), 8),
                ("COMClaude_03_AdmirationToInfatuation".into(), 14),
                ("COMClaude_04_NeutralToDisdain".into(), 3),
                ("COMClaude_05_DisdainToHatred".into(), 10),
                ("COMClaude_06_RepeatInfatuationToAdmiration".into(), 4),
                ("COMClaude_07_RepeatAdmirationToNeutral".into(), 4),
                ("COMClaude_08_RepeatNeutralToDisdain".into(), 4),
                ("COMClaude_09_RepeatDisdainToHatred".into(), 2),
                ("COMClaude_10_RepeatAdmirationToInfatuation".into(), 6),
                ("COMClaudeMurderScene".into(), 5),
            ],
        }
    }
}

/// A structural invariant violation. Every variant names the offending
/// entity and carries expected-vs-found values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuardrailError {
    #[error("quest '{quest}' must have priority {expected}, found {found}")]
    QuestPriority { quest: String, expected: u8, found: u8 },

    #[error("quest name must be '{expected}', found '{found}'")]
    QuestName { expected: String, found: String },

    #[error("quest '{quest}' flag '{flag}' must be set")]
    QuestFlagUnset { quest: String, flag: &'static str },

    #[error("alias {slot} must exist and be named '{expected}'")]
    AliasMissing { slot: u32, expected: String },

    #[error("alias {slot} '{name}' must carry the essential capability")]
    AliasNotEssential { slot: u32, name: String },

    #[error("quest '{quest}' must anchor dialogue with an is-alias-ref({slot}) dialog condition")]
    DialogAnchorMissing { quest: String, slot: u32 },

    #[error("quest '{quest}' is missing stages: expected {expected}, found {found}")]
    StageCount {
        quest: String,
        expected: usize,
        found: usize,
    },

    #[error("stage {stage} must have exactly one log entry, found {found}")]
    StageLogEntryCount { stage: u16, found: usize },

    #[error("stage {stage} designer note is missing")]
    StageNoteMissing { stage: u16 },

    #[error("quest '{quest}' scripted fragments are missing or incomplete: expected {expected}, found {found}")]
    FragmentCount {
        quest: String,
        expected: usize,
        found: usize,
    },

    #[error("missing or invalid fragment script: expected prefix '{expected_prefix}', found '{found}'")]
    FragmentScriptInvalid {
        expected_prefix: String,
        found: String,
    },

    #[error("script '{script}' is missing the '{property}' property")]
    ScriptPropertyMissing { script: String, property: String },

    #[error("script '{script}' is missing from the scripts tab")]
    ScriptMissing { script: String },

    #[error("scene '{scene}' must have {expected} phases, found {found}")]
    ScenePhaseCount {
        scene: String,
        expected: usize,
        found: usize,
    },

    #[error("scene '{scene}' phase {phase} has a stage effect with on-begin 0 (must be -1 or a real stage)")]
    PhaseBeginsAtStageZero { scene: String, phase: usize },

    #[error("scene '{scene}' has duplicate action indices: {indices:?}")]
    DuplicateActionIndices { scene: String, indices: Vec<u32> },

    #[error("greeting topic '{topic}' must have priority {expected}, found {found}")]
    GreetingPriority { topic: String, expected: u8, found: u8 },

    #[error("greeting topic '{topic}' must have subtype Greeting, found {found}")]
    GreetingSubtype { topic: String, found: String },

    #[error("greeting topic '{topic}' must be in category Misc to stay discoverable, found {found}")]
    GreetingCategory { topic: String, found: String },

    #[error("greeting topic '{topic}' must not have a branch; branches move greetings out of the Misc surface")]
    GreetingHasBranch { topic: String },
}

/// The validation pass. Holds only the policy; never mutates the graph.
#[derive(Debug, Clone, Default)]
pub struct Guardrail {
    policy: GuardrailPolicy,
}

impl Guardrail {
    pub fn new(policy: GuardrailPolicy) -> Self {
        Self { policy }
    }

    /// Assert every structural invariant, in fixed order, stopping at the
    /// first violation
    pub fn validate(&self, quest: &Quest) -> Result<(), GuardrailError> {
        self.check_quest_root(quest)?;
        self.check_aliases(quest)?;
        self.check_dialog_anchor(quest)?;
        self.check_stages(quest)?;
        self.check_fragments(quest)?;
        self.check_fragment_script(quest)?;
        self.check_affinity_script(quest)?;
        self.check_required_scenes(quest)?;
        self.check_phase_stage_effects(quest)?;
        self.check_action_indices(quest)?;
        self.check_greetings(quest)?;
        Ok(())
    }

    // Check 1: the relationship root carries its required shape and all
    // capability flags.
    fn check_quest_root(&self, quest: &Quest) -> Result<(), GuardrailError> {
        if quest.priority != self.policy.quest_priority {
            return Err(GuardrailError::QuestPriority {
                quest: quest.editor_id.clone(),
                expected: self.policy.quest_priority,
                found: quest.priority,
            });
        }
        if quest.name != self.policy.quest_name {
            return Err(GuardrailError::QuestName {
                expected: self.policy.quest_name.clone(),
                found: quest.name.clone(),
            });
        }
        let flags = [
            (quest.flags.start_game_enabled, "StartGameEnabled"),
            (quest.flags.run_once, "RunOnce"),
            (quest.flags.add_idle_topic_to_hello, "AddIdleTopicToHello"),
            (quest.flags.allow_repeated_stages, "AllowRepeatedStages"),
        ];
        for (set, flag) in flags {
            if !set {
                return Err(GuardrailError::QuestFlagUnset {
                    quest: quest.editor_id.clone(),
                    flag,
                });
            }
        }
        Ok(())
    }

    // Check 2: primary and secondary actor slots exist, correctly named,
    // primary essential.
    fn check_aliases(&self, quest: &Quest) -> Result<(), GuardrailError> {
        let primary = quest
            .alias_by_slot(0)
            .filter(|a| a.name() == self.policy.primary_alias)
            .ok_or_else(|| GuardrailError::AliasMissing {
                slot: 0,
                expected: self.policy.primary_alias.clone(),
            })?;
        if !primary.is_essential() {
            return Err(GuardrailError::AliasNotEssential {
                slot: 0,
                name: primary.name().to_string(),
            });
        }
        quest
            .alias_by_slot(1)
            .filter(|a| a.name() == self.policy.secondary_alias)
            .ok_or_else(|| GuardrailError::AliasMissing {
                slot: 1,
                expected: self.policy.secondary_alias.clone(),
            })?;
        Ok(())
    }

    // Check 3: at least one dialog-level condition anchors the speaker.
    fn check_dialog_anchor(&self, quest: &Quest) -> Result<(), GuardrailError> {
        let anchored = quest.dialog_conditions.iter().any(|c| {
            matches!(
                c,
                questsmith_domain::Condition::IsAliasRef { slot } if *slot == self.policy.anchor_slot
            )
        });
        if !anchored {
            return Err(GuardrailError::DialogAnchorMissing {
                quest: quest.editor_id.clone(),
                slot: self.policy.anchor_slot,
            });
        }
        Ok(())
    }

    // Check 4: stage count threshold and per-stage log entry shape. The
    // entry's condition list is always initialized by construction; count
    // and note are what can still go wrong.
    fn check_stages(&self, quest: &Quest) -> Result<(), GuardrailError> {
        if quest.stages.len() < self.policy.min_stages {
            return Err(GuardrailError::StageCount {
                quest: quest.editor_id.clone(),
                expected: self.policy.min_stages,
                found: quest.stages.len(),
            });
        }
        for stage in &quest.stages {
            if stage.log_entries.len() != 1 {
                return Err(GuardrailError::StageLogEntryCount {
                    stage: stage.index,
                    found: stage.log_entries.len(),
                });
            }
            if stage.note.is_empty() {
                return Err(GuardrailError::StageNoteMissing { stage: stage.index });
            }
        }
        Ok(())
    }

    // Check 5: minimum number of scripted fragments.
    fn check_fragments(&self, quest: &Quest) -> Result<(), GuardrailError> {
        let found = quest
            .script_host
            .as_ref()
            .map(|host| host.fragments.len())
            .unwrap_or(0);
        if found < self.policy.min_fragments {
            return Err(GuardrailError::FragmentCount {
                quest: quest.editor_id.clone(),
                expected: self.policy.min_fragments,
                found,
            });
        }
        Ok(())
    }

    // Check 6: fragment-hosting script present, named per convention, with
    // its required bound properties.
    fn check_fragment_script(&self, quest: &Quest) -> Result<(), GuardrailError> {
        let script = quest
            .script_host
            .as_ref()
            .and_then(|host| host.fragment_script.as_ref())
            .ok_or_else(|| GuardrailError::FragmentScriptInvalid {
                expected_prefix: self.policy.fragment_script_prefix.clone(),
                found: "None".into(),
            })?;
        if !script.name.starts_with(&self.policy.fragment_script_prefix) {
            return Err(GuardrailError::FragmentScriptInvalid {
                expected_prefix: self.policy.fragment_script_prefix.clone(),
                found: script.name.clone(),
            });
        }
        for property in &self.policy.fragment_script_properties {
            if !script.has_property(property) {
                return Err(GuardrailError::ScriptPropertyMissing {
                    script: script.name.clone(),
                    property: property.clone(),
                });
            }
        }
        Ok(())
    }

    // Check 7: the affinity/relationship display script is attached with
    // its required bound properties.
    fn check_affinity_script(&self, quest: &Quest) -> Result<(), GuardrailError> {
        let script = quest
            .script_host
            .as_ref()
            .and_then(|host| host.script(&self.policy.affinity_script))
            .ok_or_else(|| GuardrailError::ScriptMissing {
                script: self.policy.affinity_script.clone(),
            })?;
        for property in &self.policy.affinity_script_properties {
            if !script.has_property(property) {
                return Err(GuardrailError::ScriptPropertyMissing {
                    script: script.name.clone(),
                    property: property.clone(),
                });
            }
        }
        Ok(())
    }

    // Check 8: every required scene exists with its exact phase count.
    fn check_required_scenes(&self, quest: &Quest) -> Result<(), GuardrailError> {
        for (editor_id, expected) in &self.policy.required_scenes {
            let found = quest
                .scene(editor_id)
                .map(|scene| scene.phases.len())
                .unwrap_or(0);
            if found != *expected {
                return Err(GuardrailError::ScenePhaseCount {
                    scene: editor_id.clone(),
                    expected: *expected,
                    found,
                });
            }
        }
        Ok(())
    }

    // Check 9: no phase sets stage 0 on begin. 0 does not name a real
    // stage; "no transition" must be spelled -1.
    fn check_phase_stage_effects(&self, quest: &Quest) -> Result<(), GuardrailError> {
        for scene in &quest.scenes {
            for (phase_index, phase) in scene.phases.iter().enumerate() {
                if let Some(effect) = phase.stage_effect {
                    if effect.on_begin == 0 {
                        return Err(GuardrailError::PhaseBeginsAtStageZero {
                            scene: scene.editor_id.clone(),
                            phase: phase_index,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // Check 10: action indices are unique within each scene.
    fn check_action_indices(&self, quest: &Quest) -> Result<(), GuardrailError> {
        for scene in &quest.scenes {
            let duplicates = scene.duplicate_action_indices();
            if !duplicates.is_empty() {
                return Err(GuardrailError::DuplicateActionIndices {
                    scene: scene.editor_id.clone(),
                    indices: duplicates,
                });
            }
        }
        Ok(())
    }

    // Check 11: every first-contact greeting keeps the fixed priority,
    // subtype, and category, and carries no branch.
    fn check_greetings(&self, quest: &Quest) -> Result<(), GuardrailError> {
        for topic in quest.topics.iter().filter(|t| t.is_greeting()) {
            if topic.priority != self.policy.greeting_priority {
                return Err(GuardrailError::GreetingPriority {
                    topic: topic.editor_id.clone(),
                    expected: self.policy.greeting_priority,
                    found: topic.priority,
                });
            }
            if topic.subtype != TopicSubtype::Greeting {
                return Err(GuardrailError::GreetingSubtype {
                    topic: topic.editor_id.clone(),
                    found: topic.subtype.to_string(),
                });
            }
            if topic.category != TopicCategory::Misc {
                return Err(GuardrailError::GreetingCategory {
                    topic: topic.editor_id.clone(),
                    found: topic.category.to_string(),
                });
            }
            if topic.branch.is_some() {
                return Err(GuardrailError::GreetingHasBranch {
                    topic: topic.editor_id.clone(),
                });
            }
        }
        Ok(())
    }
}

//! Scene entity - An ordered phase sequence driving interactive dialogue
//!
//! A scene owns its phases and actions. Actions reference topics by id; the
//! topic registry owns the topics themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::FormId;
use crate::value_objects::StageEffect;

/// Behavior flag presets carried over from the target record format.
///
/// These are opaque bit patterns the editor expects; they are not
/// interpreted by this system.
pub mod flags {
    /// Scene record flags for companion affinity scenes
    pub const SCENE_DEFAULT: u32 = 36;
    /// Actor slot behavior flags
    pub const ACTOR_BEHAVIOR_DEFAULT: u32 = 10;
    /// Actor slot flags
    pub const ACTOR_DEFAULT: u32 = 4;
    /// PlayerDialogue action: face target + headtrack player + camera on speaker
    pub const PLAYER_DIALOGUE_ACTION: u32 = 2_260_992;
    /// Single-line dialog action defaults
    pub const DIALOG_ACTION: u32 = 163_840;
}

/// A participant slot in a scene, bound to a quest alias at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSlot {
    pub slot: u32,
    pub behavior_flags: u32,
    pub flags: u32,
}

impl ActorSlot {
    pub fn new(slot: u32) -> Self {
        Self {
            slot,
            behavior_flags: flags::ACTOR_BEHAVIOR_DEFAULT,
            flags: flags::ACTOR_DEFAULT,
        }
    }
}

/// One step within a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Optional name; named phases can be targeted by greeting responses
    pub name: String,
    /// One-shot stage transition fired when this phase begins/ends
    pub stage_effect: Option<StageEffect>,
}

impl Phase {
    pub fn unnamed() -> Self {
        Self {
            name: String::new(),
            stage_effect: None,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage_effect: None,
        }
    }

    pub fn with_stage_effect(mut self, effect: StageEffect) -> Self {
        self.stage_effect = Some(effect);
        self
    }
}

/// Sentiment slot of a player exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Question,
}

/// A paired player line and NPC reply bound to one sentiment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePair {
    pub player: FormId,
    pub npc: FormId,
}

impl ResponsePair {
    pub fn new(player: FormId, npc: FormId) -> Self {
        Self { player, npc }
    }
}

/// The four sentiment slots of a player-exchange action.
///
/// Unfilled slots are simply absent; an exchange authored through the
/// exchange helper fills only the positive slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSlots {
    pub positive: Option<ResponsePair>,
    pub negative: Option<ResponsePair>,
    pub neutral: Option<ResponsePair>,
    pub question: Option<ResponsePair>,
}

impl ExchangeSlots {
    pub fn positive_only(player: FormId, npc: FormId) -> Self {
        Self {
            positive: Some(ResponsePair::new(player, npc)),
            ..Self::default()
        }
    }

    pub fn set(&mut self, sentiment: Sentiment, pair: ResponsePair) {
        match sentiment {
            Sentiment::Positive => self.positive = Some(pair),
            Sentiment::Negative => self.negative = Some(pair),
            Sentiment::Neutral => self.neutral = Some(pair),
            Sentiment::Question => self.question = Some(pair),
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> Option<ResponsePair> {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Question => self.question,
        }
    }

    pub fn filled_count(&self) -> usize {
        [self.positive, self.negative, self.neutral, self.question]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

/// Repeat-loop bounds on a single-line action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for LoopBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// Discriminated action payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Branching player choice across up to four sentiment slots
    PlayerExchange(ExchangeSlots),
    /// One scripted line; the topic may be left unbound when the line is
    /// wired up later
    SingleLine {
        topic: Option<FormId>,
        loop_bounds: LoopBounds,
    },
}

/// A unit of scene behavior bound to a phase range and an actor slot.
///
/// Action indices are author-chosen and need only be unique within the
/// scene; non-contiguous and out-of-phase-order indices are deliberate
/// authoring patterns, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub index: u32,
    pub actor_slot: u32,
    pub start_phase: u32,
    pub end_phase: u32,
    pub flags: u32,
    pub kind: ActionKind,
}

/// A scene: identity, actor slots, ordered phases, and actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: FormId,
    pub editor_id: String,
    /// Owning quest
    pub quest: FormId,
    pub flags: u32,
    pub actors: Vec<ActorSlot>,
    pub phases: Vec<Phase>,
    pub actions: Vec<Action>,
}

impl Scene {
    /// Action indices that appear more than once, ascending.
    ///
    /// Empty for every well-formed scene; surfaced in guardrail errors
    /// otherwise.
    pub fn duplicate_action_indices(&self) -> Vec<u32> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for action in &self.actions {
            *counts.entry(action.index).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(index: u32) -> Action {
        Action {
            index,
            actor_slot: 0,
            start_phase: 0,
            end_phase: 0,
            flags: flags::DIALOG_ACTION,
            kind: ActionKind::SingleLine {
                topic: None,
                loop_bounds: LoopBounds::default(),
            },
        }
    }

    fn scene(actions: Vec<Action>) -> Scene {
        Scene {
            id: FormId::new(1),
            editor_id: "TestScene".into(),
            quest: FormId::new(2),
            flags: flags::SCENE_DEFAULT,
            actors: vec![ActorSlot::new(0)],
            phases: vec![Phase::unnamed()],
            actions,
        }
    }

    #[test]
    fn test_no_duplicates_for_unique_indices() {
        let s = scene(vec![action(1), action(3), action(9)]);
        assert!(s.duplicate_action_indices().is_empty());
    }

    #[test]
    fn test_duplicates_reported_ascending() {
        let s = scene(vec![action(4), action(1), action(4), action(1)]);
        assert_eq!(s.duplicate_action_indices(), vec![1, 4]);
    }

    #[test]
    fn test_exchange_slots_filled_count() {
        let mut slots = ExchangeSlots::positive_only(FormId::new(1), FormId::new(2));
        assert_eq!(slots.filled_count(), 1);
        slots.set(
            Sentiment::Question,
            ResponsePair::new(FormId::new(3), FormId::new(4)),
        );
        assert_eq!(slots.filled_count(), 2);
        assert!(slots.get(Sentiment::Negative).is_none());
    }

    #[test]
    fn test_default_loop_bounds() {
        let bounds = LoopBounds::default();
        assert_eq!((bounds.min, bounds.max), (1, 10));
    }
}

//! Dialogue topic entity - Reusable dialogue content with selection metadata

use serde::{Deserialize, Serialize};

use crate::ids::FormId;
use crate::value_objects::{Condition, StageEffect};

/// UI surface a topic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicCategory {
    /// Regular dialogue tab
    Topic,
    /// Miscellaneous tab - where greetings must live to stay discoverable
    Misc,
    /// Scene-driven dialogue
    Scene,
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topic => write!(f, "Topic"),
            Self::Misc => write!(f, "Misc"),
            Self::Scene => write!(f, "Scene"),
        }
    }
}

/// Functional subtype of a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicSubtype {
    /// First-contact greeting; aggregates all condition-gated openers
    Greeting,
    /// A line spoken inside a scene
    SceneDialogue,
    /// Anything else
    Custom(String),
}

impl std::fmt::Display for TopicSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greeting => write!(f, "Greeting"),
            Self::SceneDialogue => write!(f, "SceneDialogue"),
            Self::Custom(name) => write!(f, "Custom({})", name),
        }
    }
}

/// Emotion tag on a spoken line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Afraid,
    Surprised,
    Puzzled,
}

/// One spoken line inside a response group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLine {
    pub text: String,
    pub emotion: Emotion,
    /// Ordering metadata within the group; authored lines start at 1
    pub response_number: u8,
}

impl ResponseLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emotion: Emotion::Neutral,
            response_number: 1,
        }
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = emotion;
        self
    }
}

/// A condition-gated response unit.
///
/// A topic holds these in author-declared order; at run time the first group
/// whose conditions are jointly satisfied is selected, so ordering is
/// externally meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseGroup {
    pub id: FormId,
    pub conditions: Vec<Condition>,
    pub lines: Vec<ResponseLine>,
    /// Scene started when this response fires
    pub start_scene: Option<FormId>,
    /// Named phase to start the scene at; empty/none starts at phase 0
    pub start_phase: Option<String>,
    /// One-shot stage transition fired with this response
    pub stage_effect: Option<StageEffect>,
    /// Response is consumed after it fires once
    pub say_once: bool,
}

impl ResponseGroup {
    pub fn new(id: FormId, text: impl Into<String>) -> Self {
        Self {
            id,
            conditions: Vec::new(),
            lines: vec![ResponseLine::new(text)],
            start_scene: None,
            start_phase: None,
            stage_effect: None,
            say_once: false,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_start_scene(mut self, scene: FormId) -> Self {
        self.start_scene = Some(scene);
        self
    }

    pub fn with_start_phase(mut self, phase: impl Into<String>) -> Self {
        self.start_phase = Some(phase.into());
        self
    }

    pub fn with_stage_effect(mut self, effect: StageEffect) -> Self {
        self.stage_effect = Some(effect);
        self
    }

    pub fn say_once(mut self) -> Self {
        self.say_once = true;
        self
    }
}

/// A dialogue topic: identity, selection metadata, and its response units.
///
/// Immutable once created; owned by the topic registry until the quest is
/// assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: FormId,
    pub editor_id: String,
    /// Owning quest
    pub quest: FormId,
    pub category: TopicCategory,
    pub subtype: TopicSubtype,
    pub priority: u8,
    /// Branch attachment moves a topic out of the Misc surface; greetings
    /// must never carry one
    pub branch: Option<FormId>,
    /// Player-facing prompt, when the topic is player-spoken
    pub prompt: Option<String>,
    pub responses: Vec<ResponseGroup>,
}

impl Topic {
    pub fn new(
        id: FormId,
        quest: FormId,
        editor_id: impl Into<String>,
        category: TopicCategory,
        subtype: TopicSubtype,
    ) -> Self {
        Self {
            id,
            editor_id: editor_id.into(),
            quest,
            category,
            subtype,
            priority: 50,
            branch: None,
            prompt: None,
            responses: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn push_response(&mut self, group: ResponseGroup) {
        self.responses.push(group);
    }

    /// True when this topic is a first-contact greeting, by explicit subtype
    /// or by naming convention
    pub fn is_greeting(&self) -> bool {
        self.subtype == TopicSubtype::Greeting || self.editor_id.contains("Greeting")
    }
}

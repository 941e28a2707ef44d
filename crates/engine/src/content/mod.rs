//! Content tables - Hand-authored dialogue and stage data as plain data
//!
//! The compiler is generic over content: everything specific to one
//! companion (stage tables, scene scripts, the greeting truth table, voice
//! mappings) lives in a `ContentPlan` fed into the builders, never in the
//! compiler itself.

mod companion;

pub use companion::claude_companion_plan;

use questsmith_domain::{QuestFlags, RecordKind, Sentiment};

/// Root shape of the quest record
#[derive(Debug, Clone)]
pub struct QuestSpec {
    pub editor_id: String,
    pub name: String,
    pub priority: u8,
    pub flags: QuestFlags,
}

/// Actor-binding slots to declare on the quest
#[derive(Debug, Clone)]
pub enum AliasSpec {
    Primary { name: String },
    Secondary { name: String },
    Support { slot: u32, name: String },
}

/// One row of the relationship stage table
#[derive(Debug, Clone)]
pub struct StageRow {
    pub index: u16,
    pub note: &'static str,
    pub entry: &'static str,
}

/// A dialogue line owned by a scene: editor id, optional player prompt,
/// spoken text
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub editor_id: String,
    pub prompt: &'static str,
    pub text: &'static str,
}

impl LineSpec {
    pub fn new(editor_id: impl Into<String>, prompt: &'static str, text: &'static str) -> Self {
        Self {
            editor_id: editor_id.into(),
            prompt,
            text,
        }
    }
}

/// One scene behavior element, in authoring order
#[derive(Debug, Clone)]
pub enum SceneElement {
    /// The exchange-helper pattern: a positive-only player exchange at
    /// `index` plus an unbound single line at `index + 1`
    Exchange {
        player_phase: u32,
        npc_phase: u32,
        index: u32,
        player: LineSpec,
        npc: LineSpec,
    },
    /// A player exchange with explicit sentiment pairs
    FullExchange {
        index: u32,
        phase: u32,
        pairs: Vec<(Sentiment, LineSpec, LineSpec)>,
    },
    /// A single scripted line; `topic` may be absent for beats whose audio
    /// is wired up elsewhere
    Line {
        index: u32,
        phase: u32,
        actor: u32,
        topic: Option<LineSpec>,
    },
}

/// Declarative scene description
#[derive(Debug, Clone)]
pub struct SceneSpec {
    pub editor_id: String,
    pub actors: Vec<u32>,
    pub phases: usize,
    /// (phase index, name) pairs for greeting-targetable phases
    pub named_phases: Vec<(usize, &'static str)>,
    /// Stage advanced when the final phase ends
    pub end_stage: Option<u16>,
    pub elements: Vec<SceneElement>,
}

/// Condition over external state, by symbolic name; the compiler resolves
/// names through the asset resolver
#[derive(Debug, Clone)]
pub enum ConditionSpec {
    FactionEquals { faction: &'static str, value: f32 },
    GlobalEquals { global: &'static str, value: f32 },
    StageDone { stage: u16 },
}

/// One row of the greeting truth table, in first-match order
#[derive(Debug, Clone)]
pub struct GreetingRow {
    pub text: &'static str,
    pub conditions: Vec<ConditionSpec>,
    pub start_scene: Option<&'static str>,
    pub start_phase: Option<&'static str>,
    /// Stage advanced when this response finishes
    pub end_stage: Option<u16>,
    pub say_once: bool,
}

/// Greeting topic plus its truth table
#[derive(Debug, Clone)]
pub struct GreetingSpec {
    pub editor_id: String,
    pub rows: Vec<GreetingRow>,
}

/// How a script property binds to a record
#[derive(Debug, Clone)]
pub enum PropertyBinding {
    /// Resolves through a quest alias slot
    QuestAlias(u32),
    /// Bound to an external record by symbolic name
    External {
        kind: RecordKind,
        editor_id: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct ScriptPropertySpec {
    pub name: &'static str,
    pub binding: PropertyBinding,
}

/// Scripted-behavior attachment points
#[derive(Debug, Clone)]
pub struct ScriptSpec {
    /// The fragment script name is this prefix plus the quest form id hex
    pub fragment_script_prefix: &'static str,
    pub fragment_properties: Vec<ScriptPropertySpec>,
    pub affinity_script: &'static str,
    pub affinity_properties: Vec<ScriptPropertySpec>,
}

/// Which voice tree a mapping belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceChannel {
    Npc,
    /// Expanded to every player voice type
    Player,
}

/// Where a copied voice file attaches
#[derive(Debug, Clone)]
pub enum VoiceTarget {
    /// The first response of a registry topic, by editor id
    TopicResponse(&'static str),
    /// A greeting response by truth-table position
    GreetingResponse(usize),
}

#[derive(Debug, Clone)]
pub struct VoiceRow {
    pub channel: VoiceChannel,
    pub source: u32,
    pub target: VoiceTarget,
}

#[derive(Debug, Clone)]
pub struct VoicePlan {
    pub npc_voice_type: &'static str,
    pub player_voice_types: Vec<&'static str>,
    pub rows: Vec<VoiceRow>,
}

/// Everything needed to assemble one relationship quest
#[derive(Debug, Clone)]
pub struct ContentPlan {
    pub quest: QuestSpec,
    pub aliases: Vec<AliasSpec>,
    pub stages: Vec<StageRow>,
    /// Stages that carry no scripted fragment
    pub unscripted_stages: Vec<u16>,
    pub scenes: Vec<SceneSpec>,
    pub greeting: GreetingSpec,
    pub scripts: ScriptSpec,
    pub voice: VoicePlan,
}

//! Questsmith domain - types for authoring branching relationship/dialogue
//! state machines.
//!
//! The data flows strictly bottom-up: topics are created first, scenes
//! reference topics, the quest root owns stages and scenes, and the
//! assembled graph is handed immutably to validation and emission.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    flags, Action, ActionKind, ActorSlot, Alias, Emotion, ExchangeSlots, Fragment, LogEntry,
    LoopBounds, Phase, PrimaryCapabilities, Quest, QuestFlags, ResponseGroup, ResponseLine,
    ResponsePair, Scene, Script, ScriptHost, ScriptProperty, Sentiment, Stage,
    SupportCapabilities, Topic, TopicCategory, TopicSubtype,
};
pub use error::DomainError;
pub use ids::{FormId, RecordKind};
pub use value_objects::{CompareOp, Condition, EvaluationContext, StageEffect, NO_STAGE};

//! Domain entities - Core graph objects with identity

mod quest;
mod scene;
mod stage;
mod topic;

pub use quest::{
    Alias, PrimaryCapabilities, Quest, QuestFlags, Script, ScriptHost, ScriptProperty,
    SupportCapabilities,
};
pub use scene::{
    flags, Action, ActionKind, ActorSlot, ExchangeSlots, LoopBounds, Phase, ResponsePair, Scene,
    Sentiment,
};
pub use stage::{Fragment, LogEntry, Stage};
pub use topic::{Emotion, ResponseGroup, ResponseLine, Topic, TopicCategory, TopicSubtype};

//! Builders - Single-pass, single-threaded graph assembly
//!
//! Each builder owns its own ordering state (next phase index, topic
//! insertion order) and returns immutable snapshots. Nothing here is safe
//! for concurrent use; the pipeline runs in one pass on one thread.

mod greeting;
mod quest;
mod scene;
mod topic_registry;

pub use greeting::GreetingBuilder;
pub use quest::QuestBuilder;
pub use scene::SceneBuilder;
pub use topic_registry::TopicRegistry;

//! Infrastructure - Reference implementations of the collaborator ports

mod fs_voice_copier;
mod json_emitter;
mod sequential_allocator;
mod static_resolver;

pub use fs_voice_copier::FsVoiceCopier;
pub use json_emitter::JsonQuestEmitter;
pub use sequential_allocator::SequentialAllocator;
pub use static_resolver::StaticResolver;

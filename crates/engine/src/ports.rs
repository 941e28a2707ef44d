//! Collaborator ports - Interfaces the compile pipeline consumes
//!
//! The core never locates load orders, writes bytes, or touches audio files
//! itself; those concerns live behind these ports. Everything is synchronous:
//! the whole build-validate-emit pipeline runs in one pass on one thread.

use std::fmt;

use thiserror::Error;

use questsmith_domain::{DomainError, FormId, Quest, RecordKind};

/// Binds symbolic names to stable external references.
///
/// Used for race/voice/faction/global identifiers referenced by conditions
/// and script properties. Failure is fatal to the build.
pub trait AssetResolver {
    fn resolve(&self, editor_id: &str, kind: RecordKind) -> Result<FormId, DomainError>;
}

/// Issues fresh unique identifiers on demand, monotonically, with no reuse
/// within one build.
pub trait IdAllocator {
    fn next_id(&mut self) -> FormId;
}

/// Errors from the persistence emitter
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serializes a validated graph to the target persistence format.
///
/// The pipeline only ever hands over graphs that passed the guardrail.
pub trait QuestEmitter {
    fn emit(&mut self, quest: &Quest) -> Result<(), EmitError>;
}

/// One audio file to carry over: an existing voice line keyed by its source
/// record id, renamed to the response record it now backs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMapping {
    /// Voice-type directory the file lives under
    pub voice_type: String,
    pub source: FormId,
    pub target: FormId,
}

/// A voice file that could not be copied. Non-fatal: misses are collected
/// and reported, never aborting the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopyMiss {
    pub voice_type: String,
    pub source: FormId,
}

impl fmt::Display for AssetCopyMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} missing", self.voice_type, self.source)
    }
}

/// Outcome of a voice-copy pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub missed: Vec<AssetCopyMiss>,
}

/// Errors from the asset copier that are not per-file misses (e.g. the
/// destination tree cannot be created)
#[derive(Debug, Error)]
pub enum AssetCopyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Copies voice audio for the given mappings. Missing source files become
/// report entries, not errors.
pub trait VoiceCopier {
    fn copy(&mut self, mappings: &[VoiceMapping]) -> Result<CopyReport, AssetCopyError>;
}

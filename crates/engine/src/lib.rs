//! Questsmith engine - compiles authored relationship/dialogue content
//! plans into validated quest graphs.
//!
//! The pipeline is a fixed synchronous sequence: builders assemble the
//! graph from a [`content::ContentPlan`], the [`guardrail::Guardrail`]
//! asserts every structural invariant, and the collaborator ports persist
//! the result and carry its voice assets over.

pub mod builders;
pub mod compiler;
pub mod content;
pub mod guardrail;
pub mod infrastructure;
pub mod ports;

pub use compiler::{Assembly, BuildReport, CompileError, Compiler};
pub use content::{claude_companion_plan, ContentPlan};
pub use guardrail::{Guardrail, GuardrailError, GuardrailPolicy};

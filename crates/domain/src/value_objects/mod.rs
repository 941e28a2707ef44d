//! Value objects - Immutable objects defined by their attributes

mod condition;
mod stage_effect;

pub use condition::{CompareOp, Condition, EvaluationContext};
pub use stage_effect::{StageEffect, NO_STAGE};

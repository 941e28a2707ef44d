//! One-shot stage transitions attached to scene phases and responses

use serde::{Deserialize, Serialize};

/// Sentinel meaning "do not change the stage"
pub const NO_STAGE: i32 = -1;

/// A one-shot transition of the relationship state machine.
///
/// Fires when the owning phase or response begins (`on_begin`) or ends
/// (`on_end`). `-1` means no transition on that edge.
///
/// `on_begin == 0` is invalid: 0 does not name a real stage, and the target
/// editor rejects "set stage 0 on phase begin" outright. Authors who mean
/// "no transition" must use `-1`; the guardrail enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEffect {
    pub on_begin: i32,
    pub on_end: i32,
}

impl StageEffect {
    pub fn new(on_begin: i32, on_end: i32) -> Self {
        Self { on_begin, on_end }
    }

    /// Advance to `stage` when the owning phase or response ends
    pub fn on_end(stage: u16) -> Self {
        Self {
            on_begin: NO_STAGE,
            on_end: i32::from(stage),
        }
    }

    /// Advance to `stage` when the owning phase or response begins
    pub fn on_begin(stage: u16) -> Self {
        Self {
            on_begin: i32::from(stage),
            on_end: NO_STAGE,
        }
    }
}

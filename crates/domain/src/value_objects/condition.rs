//! Condition predicates gating dialogue responses and branches
//!
//! The predicate set is deliberately closed: faction membership, named
//! global/counter values, stage completion, and the alias-anchor check.
//! Illegal condition shapes are unrepresentable.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ids::FormId;

/// Comparison operator for numeric condition checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareOp {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl CompareOp {
    pub fn compare(self, lhs: f32, rhs: f32) -> bool {
        match self {
            Self::EqualTo => lhs == rhs,
            Self::NotEqualTo => lhs != rhs,
            Self::GreaterThan => lhs > rhs,
            Self::GreaterThanOrEqual => lhs >= rhs,
            Self::LessThan => lhs < rhs,
            Self::LessThanOrEqual => lhs <= rhs,
        }
    }
}

/// A predicate over external state, attached to a response unit or a
/// dialog branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Subject's membership value in a faction compares against `value`
    InFaction {
        faction: FormId,
        op: CompareOp,
        value: f32,
    },
    /// A named global/counter value compares against `value`
    GlobalValue {
        global: FormId,
        op: CompareOp,
        value: f32,
    },
    /// Quest stage `stage` has been completed
    StageDone { quest: FormId, stage: u16 },
    /// The speaking subject fills alias slot `slot`
    IsAliasRef { slot: u32 },
}

impl Condition {
    /// Faction membership equals `value` (0 = not a member, 1 = member)
    pub fn in_faction(faction: FormId, value: f32) -> Self {
        Self::InFaction {
            faction,
            op: CompareOp::EqualTo,
            value,
        }
    }

    /// Named global equals `value`
    pub fn global_equals(global: FormId, value: f32) -> Self {
        Self::GlobalValue {
            global,
            op: CompareOp::EqualTo,
            value,
        }
    }

    pub fn stage_done(quest: FormId, stage: u16) -> Self {
        Self::StageDone { quest, stage }
    }

    pub fn is_alias_ref(slot: u32) -> Self {
        Self::IsAliasRef { slot }
    }

    /// Evaluate this predicate against an external-state snapshot.
    ///
    /// Pure: the context is never mutated and repeated evaluation returns
    /// the same answer.
    pub fn is_satisfied(&self, ctx: &EvaluationContext) -> bool {
        match self {
            Self::InFaction { faction, op, value } => {
                let rank = ctx.faction_rank(*faction);
                op.compare(rank, *value)
            }
            Self::GlobalValue { global, op, value } => {
                let current = ctx.global_value(*global);
                op.compare(current, *value)
            }
            Self::StageDone { quest, stage } => ctx.is_stage_done(*quest, *stage),
            Self::IsAliasRef { slot } => ctx.subject_slot() == Some(*slot),
        }
    }

    /// True when every condition in `conditions` is satisfied.
    ///
    /// An empty list is vacuously satisfied, matching an unconditioned
    /// response unit.
    pub fn all_satisfied(conditions: &[Condition], ctx: &EvaluationContext) -> bool {
        conditions.iter().all(|c| c.is_satisfied(ctx))
    }
}

/// Snapshot of external state used to evaluate conditions.
///
/// At run time the selection among condition-gated responses belongs to the
/// game engine; this context exists so authored truth tables can be checked
/// with the same first-match semantics before shipping.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    faction_ranks: HashMap<FormId, f32>,
    globals: HashMap<FormId, f32>,
    done_stages: HashSet<(FormId, u16)>,
    subject_slot: Option<u32>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faction(mut self, faction: FormId, rank: f32) -> Self {
        self.faction_ranks.insert(faction, rank);
        self
    }

    pub fn with_global(mut self, global: FormId, value: f32) -> Self {
        self.globals.insert(global, value);
        self
    }

    pub fn with_stage_done(mut self, quest: FormId, stage: u16) -> Self {
        self.done_stages.insert((quest, stage));
        self
    }

    pub fn with_subject_slot(mut self, slot: u32) -> Self {
        self.subject_slot = Some(slot);
        self
    }

    /// Unknown factions evaluate as rank 0 (not a member)
    pub fn faction_rank(&self, faction: FormId) -> f32 {
        self.faction_ranks.get(&faction).copied().unwrap_or(0.0)
    }

    /// Unknown globals evaluate as 0
    pub fn global_value(&self, global: FormId) -> f32 {
        self.globals.get(&global).copied().unwrap_or(0.0)
    }

    pub fn is_stage_done(&self, quest: FormId, stage: u16) -> bool {
        self.done_stages.contains(&(quest, stage))
    }

    pub fn subject_slot(&self) -> Option<u32> {
        self.subject_slot
    }
}

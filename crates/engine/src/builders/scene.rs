//! Scene builder - Assembles scenes as ordered phase sequences with actions
//!
//! The builder owns phase indices (assigned monotonically) while action
//! indices stay caller-chosen: affinity scenes deliberately use
//! non-contiguous and out-of-phase-order action indices, so the builder
//! never renumbers. Uniqueness is the guardrail's job.

use questsmith_domain::{
    flags, Action, ActionKind, ActorSlot, ExchangeSlots, FormId, LoopBounds, Phase, Scene,
    StageEffect,
};

/// Builder for one scene; returns an immutable `Scene` snapshot from
/// `build`
#[derive(Debug)]
pub struct SceneBuilder {
    editor_id: String,
    actors: Vec<ActorSlot>,
    phases: Vec<Phase>,
    actions: Vec<Action>,
}

impl SceneBuilder {
    pub fn new(editor_id: impl Into<String>) -> Self {
        Self {
            editor_id: editor_id.into(),
            actors: Vec::new(),
            phases: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Declare a participant slot (default behavior flags)
    pub fn actor(mut self, slot: u32) -> Self {
        self.actors.push(ActorSlot::new(slot));
        self
    }

    /// Append an unnamed phase, returning its index
    pub fn add_phase(&mut self) -> u32 {
        self.push_phase(Phase::unnamed())
    }

    /// Append a named phase (named phases are greeting start targets)
    pub fn add_named_phase(&mut self, name: &str) -> u32 {
        self.push_phase(Phase::named(name))
    }

    /// Append an unnamed phase carrying a stage-advance side effect
    pub fn add_phase_with_effect(&mut self, effect: StageEffect) -> u32 {
        self.push_phase(Phase::unnamed().with_stage_effect(effect))
    }

    /// Append `count` unnamed phases
    pub fn add_phases(&mut self, count: usize) {
        for _ in 0..count {
            self.add_phase();
        }
    }

    /// Attach a stage effect to an already-added phase
    pub fn set_phase_effect(&mut self, phase: u32, effect: StageEffect) {
        if let Some(p) = self.phases.get_mut(phase as usize) {
            p.stage_effect = Some(effect);
        }
    }

    /// Name an already-added phase
    pub fn set_phase_name(&mut self, phase: u32, name: &str) {
        if let Some(p) = self.phases.get_mut(phase as usize) {
            p.name = name.to_string();
        }
    }

    fn push_phase(&mut self, phase: Phase) -> u32 {
        self.phases.push(phase);
        (self.phases.len() - 1) as u32
    }

    /// The exchange helper: emit exactly two actions for one paired
    /// player/NPC beat.
    ///
    /// A player-exchange action at `index` on `player_phase` with only the
    /// positive sentiment slot filled, and a single-line action at
    /// `index + 1` on `npc_phase` with default repeat bounds [1, 10] and no
    /// topic bound (the NPC line arrives through the exchange pair).
    pub fn add_exchange(
        &mut self,
        player_phase: u32,
        npc_phase: u32,
        index: u32,
        player: FormId,
        npc: FormId,
    ) {
        self.add_player_exchange(index, player_phase, ExchangeSlots::positive_only(player, npc));
        self.actions.push(Action {
            index: index + 1,
            actor_slot: 0,
            start_phase: npc_phase,
            end_phase: npc_phase,
            flags: flags::DIALOG_ACTION,
            kind: ActionKind::SingleLine {
                topic: None,
                loop_bounds: LoopBounds::default(),
            },
        });
    }

    /// A player-exchange action with explicit sentiment slots
    pub fn add_player_exchange(&mut self, index: u32, phase: u32, slots: ExchangeSlots) {
        self.actions.push(Action {
            index,
            actor_slot: 0,
            start_phase: phase,
            end_phase: phase,
            flags: flags::PLAYER_DIALOGUE_ACTION,
            kind: ActionKind::PlayerExchange(slots),
        });
    }

    /// A single scripted line on `phase`, spoken by `actor_slot`
    pub fn add_single_line(
        &mut self,
        index: u32,
        phase: u32,
        actor_slot: u32,
        topic: Option<FormId>,
    ) {
        self.actions.push(Action {
            index,
            actor_slot,
            start_phase: phase,
            end_phase: phase,
            flags: flags::DIALOG_ACTION,
            kind: ActionKind::SingleLine {
                topic,
                loop_bounds: LoopBounds::default(),
            },
        });
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn build(self, id: FormId, quest: FormId) -> Scene {
        Scene {
            id,
            editor_id: self.editor_id,
            quest,
            flags: flags::SCENE_DEFAULT,
            actors: self.actors,
            phases: self.phases,
            actions: self.actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questsmith_domain::Sentiment;

    fn ids() -> (FormId, FormId) {
        (FormId::new(0x100), FormId::new(0x101))
    }

    #[test]
    fn test_exchange_emits_two_actions() {
        let (player, npc) = ids();
        let mut builder = SceneBuilder::new("TestScene").actor(0);
        let p0 = builder.add_phase();
        let p1 = builder.add_phase();
        builder.add_exchange(p0, p1, 1, player, npc);

        let scene = builder.build(FormId::new(1), FormId::new(2));
        assert_eq!(scene.actions.len(), 2);

        let exchange = &scene.actions[0];
        assert_eq!(exchange.index, 1);
        assert_eq!((exchange.start_phase, exchange.end_phase), (0, 0));
        match &exchange.kind {
            ActionKind::PlayerExchange(slots) => {
                let pair = slots.get(Sentiment::Positive).expect("positive filled");
                assert_eq!(pair.player, player);
                assert_eq!(pair.npc, npc);
                assert_eq!(slots.filled_count(), 1);
            }
            other => panic!("expected player exchange, got {:?}", other),
        }

        let line = &scene.actions[1];
        assert_eq!(line.index, 2);
        assert_eq!((line.start_phase, line.end_phase), (1, 1));
        match &line.kind {
            ActionKind::SingleLine { topic, loop_bounds } => {
                assert!(topic.is_none());
                assert_eq!((loop_bounds.min, loop_bounds.max), (1, 10));
            }
            other => panic!("expected single line, got {:?}", other),
        }
    }

    #[test]
    fn test_phase_indices_are_monotonic() {
        let mut builder = SceneBuilder::new("TestScene");
        assert_eq!(builder.add_phase(), 0);
        assert_eq!(builder.add_named_phase("Loop01"), 1);
        assert_eq!(builder.add_phase_with_effect(StageEffect::on_end(80)), 2);
    }

    #[test]
    fn test_non_contiguous_action_indices_are_kept() {
        let (player, npc) = ids();
        let mut builder = SceneBuilder::new("TestScene").actor(0);
        builder.add_phases(8);
        // Friendship layout: indices 1,2,3,4 then 6,7,8,9 skipping 5
        builder.add_exchange(0, 1, 1, player, npc);
        builder.add_exchange(2, 3, 3, player, npc);
        builder.add_exchange(4, 5, 6, player, npc);
        builder.add_exchange(6, 7, 8, player, npc);

        let scene = builder.build(FormId::new(1), FormId::new(2));
        let indices: Vec<u32> = scene.actions.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 6, 7, 8, 9]);
        assert!(scene.duplicate_action_indices().is_empty());
    }

    #[test]
    fn test_interleaved_exchanges_may_collide_and_are_not_renumbered() {
        let (player, npc) = ids();
        let mut builder = SceneBuilder::new("TestScene").actor(0);
        builder.add_phases(4);
        builder.add_exchange(0, 1, 1, player, npc);
        builder.add_exchange(2, 3, 2, player, npc); // 2 collides with previous idx+1

        let scene = builder.build(FormId::new(1), FormId::new(2));
        assert_eq!(scene.duplicate_action_indices(), vec![2]);
    }

    #[test]
    fn test_stage_effect_attaches_to_last_phase() {
        let mut builder = SceneBuilder::new("TestScene").actor(0);
        builder.add_phases(3);
        builder.set_phase_effect(2, StageEffect::on_end(220));
        let scene = builder.build(FormId::new(1), FormId::new(2));
        let effect = scene.phases[2].stage_effect.expect("effect set");
        assert_eq!(effect.on_end, 220);
        assert_eq!(effect.on_begin, -1);
    }
}

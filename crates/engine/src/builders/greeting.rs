//! Greeting builder - The nondeterministic-choice mechanism
//!
//! Exactly one greeting topic exists per graph. It accumulates response
//! units, each gated by its own condition list; at run time the engine
//! evaluates condition lists in author-declared order and fires the first
//! whose conditions are jointly satisfied. Declaration order is therefore
//! part of the authored truth table and must be preserved.

use questsmith_domain::{
    Condition, EvaluationContext, FormId, ResponseGroup, StageEffect, Topic, TopicCategory,
    TopicSubtype,
};

use crate::ports::IdAllocator;

/// Builder for the single first-contact greeting topic
#[derive(Debug)]
pub struct GreetingBuilder {
    topic: Topic,
}

impl GreetingBuilder {
    /// Misc category, Greeting subtype, priority 50, no branch - the shape
    /// the guardrail requires of every greeting
    pub fn new(id: FormId, quest: FormId, editor_id: impl Into<String>) -> Self {
        Self {
            topic: Topic::new(
                id,
                quest,
                editor_id,
                TopicCategory::Misc,
                TopicSubtype::Greeting,
            ),
        }
    }

    /// Append a condition-gated response. Order of calls is significant.
    pub fn add_response(
        &mut self,
        alloc: &mut dyn IdAllocator,
        conditions: Vec<Condition>,
        text: &str,
    ) -> &mut Self {
        let group = ResponseGroup::new(alloc.next_id(), text).with_conditions(conditions);
        self.topic.push_response(group);
        self
    }

    /// Append a response that optionally starts a scene when it fires, at a
    /// named phase if given, with an optional one-shot stage transition
    pub fn add_scene_response(
        &mut self,
        alloc: &mut dyn IdAllocator,
        conditions: Vec<Condition>,
        text: &str,
        scene: Option<FormId>,
        start_phase: Option<&str>,
        effect: Option<StageEffect>,
        say_once: bool,
    ) -> &mut Self {
        let mut group = ResponseGroup::new(alloc.next_id(), text).with_conditions(conditions);
        if let Some(scene) = scene {
            group = group.with_start_scene(scene);
        }
        if let Some(phase) = start_phase {
            group = group.with_start_phase(phase);
        }
        if let Some(effect) = effect {
            group = group.with_stage_effect(effect);
        }
        if say_once {
            group = group.say_once();
        }
        self.topic.push_response(group);
        self
    }

    /// First-match selection over the declared responses.
    ///
    /// Run-time selection belongs to the game engine; this mirror exists so
    /// authored truth tables can be verified before shipping. Pure: repeated
    /// calls with the same context return the same response.
    pub fn select_response(&self, ctx: &EvaluationContext) -> Option<&ResponseGroup> {
        self.topic
            .responses
            .iter()
            .find(|group| Condition::all_satisfied(&group.conditions, ctx))
    }

    pub fn id(&self) -> FormId {
        self.topic.id
    }

    pub fn response_count(&self) -> usize {
        self.topic.responses.len()
    }

    /// Response id by declaration position; voice files attach at response
    /// granularity
    pub fn response_id(&self, position: usize) -> Option<FormId> {
        self.topic.responses.get(position).map(|r| r.id)
    }

    pub fn into_topic(self) -> Topic {
        self.topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SequentialAllocator;

    fn global() -> FormId {
        FormId::new(0x20)
    }

    fn quest() -> FormId {
        FormId::new(0x805)
    }

    fn builder_with_four_responses() -> GreetingBuilder {
        let mut alloc = SequentialAllocator::new();
        let mut builder = GreetingBuilder::new(FormId::new(1), quest(), "COMClaudeGreetings");
        builder.add_response(
            &mut alloc,
            vec![Condition::global_equals(global(), 9.0)],
            "R1",
        );
        builder.add_response(
            &mut alloc,
            vec![Condition::global_equals(global(), 1.0)],
            "R2",
        );
        builder.add_response(
            &mut alloc,
            vec![Condition::global_equals(global(), 9.0)],
            "R3",
        );
        builder.add_response(
            &mut alloc,
            vec![
                Condition::global_equals(global(), 1.0),
                Condition::stage_done(quest(), 406),
            ],
            "R4",
        );
        builder
    }

    #[test]
    fn test_first_match_wins() {
        // Context satisfies both R2 and R4; declaration order picks R2.
        let builder = builder_with_four_responses();
        let ctx = EvaluationContext::new()
            .with_global(global(), 1.0)
            .with_stage_done(quest(), 406);
        let selected = builder.select_response(&ctx).expect("match");
        assert_eq!(selected.lines[0].text, "R2");
    }

    #[test]
    fn test_no_match_selects_nothing() {
        let builder = builder_with_four_responses();
        let ctx = EvaluationContext::new().with_global(global(), 5.0);
        assert!(builder.select_response(&ctx).is_none());
    }

    #[test]
    fn test_selection_is_pure() {
        let builder = builder_with_four_responses();
        let ctx = EvaluationContext::new().with_global(global(), 1.0);
        let first = builder.select_response(&ctx).map(|r| r.id);
        let second = builder.select_response(&ctx).map(|r| r.id);
        assert_eq!(first, second);
    }

    #[test]
    fn test_greeting_shape_defaults() {
        let builder = GreetingBuilder::new(FormId::new(1), quest(), "COMClaudeGreetings");
        let topic = builder.into_topic();
        assert_eq!(topic.category, TopicCategory::Misc);
        assert_eq!(topic.subtype, TopicSubtype::Greeting);
        assert_eq!(topic.priority, 50);
        assert!(topic.branch.is_none());
    }
}

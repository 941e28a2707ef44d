//! Topic registry - Owns creation and storage of dialogue topics
//!
//! Insertion order is externally meaningful: it becomes the quest's
//! dialogue-topic list and determines display/iteration order downstream.

use std::collections::HashMap;

use questsmith_domain::{
    DomainError, FormId, ResponseGroup, Topic, TopicCategory, TopicSubtype,
};

use crate::ports::IdAllocator;

/// Ordered, identity-assigning store of dialogue topics
#[derive(Debug)]
pub struct TopicRegistry {
    quest: FormId,
    topics: Vec<Topic>,
    by_editor_id: HashMap<String, usize>,
}

impl TopicRegistry {
    pub fn new(quest: FormId) -> Self {
        Self {
            quest,
            topics: Vec::new(),
            by_editor_id: HashMap::new(),
        }
    }

    /// Create a plain topic with a single response line.
    ///
    /// The returned id is stable for the lifetime of the graph. Duplicate
    /// editor ids fail with `DuplicateIdentifier`.
    pub fn create_topic(
        &mut self,
        alloc: &mut dyn IdAllocator,
        editor_id: &str,
        prompt: Option<&str>,
        text: &str,
    ) -> Result<FormId, DomainError> {
        self.create(
            alloc,
            editor_id,
            prompt,
            text,
            TopicCategory::Topic,
            TopicSubtype::Custom(String::new()),
        )
    }

    /// Create a scene-dialogue topic: Scene category, priority 50, one
    /// neutral-emotion line numbered 1
    pub fn create_scene_topic(
        &mut self,
        alloc: &mut dyn IdAllocator,
        editor_id: &str,
        prompt: Option<&str>,
        text: &str,
    ) -> Result<FormId, DomainError> {
        self.create(
            alloc,
            editor_id,
            prompt,
            text,
            TopicCategory::Scene,
            TopicSubtype::SceneDialogue,
        )
    }

    fn create(
        &mut self,
        alloc: &mut dyn IdAllocator,
        editor_id: &str,
        prompt: Option<&str>,
        text: &str,
        category: TopicCategory,
        subtype: TopicSubtype,
    ) -> Result<FormId, DomainError> {
        let id = alloc.next_id();
        let group = ResponseGroup::new(alloc.next_id(), text);
        let mut topic = Topic::new(id, self.quest, editor_id, category, subtype);
        if let Some(prompt) = prompt.filter(|p| !p.is_empty()) {
            topic = topic.with_prompt(prompt);
        }
        topic.push_response(group);
        self.insert(topic)
    }

    /// Insert a fully-built topic (e.g. the assembled greeting topic),
    /// preserving insertion order
    pub fn insert(&mut self, topic: Topic) -> Result<FormId, DomainError> {
        if self.by_editor_id.contains_key(&topic.editor_id) {
            return Err(DomainError::duplicate_identifier(&topic.editor_id));
        }
        let id = topic.id;
        self.by_editor_id
            .insert(topic.editor_id.clone(), self.topics.len());
        self.topics.push(topic);
        Ok(id)
    }

    pub fn get(&self, editor_id: &str) -> Option<&Topic> {
        self.by_editor_id
            .get(editor_id)
            .and_then(|&i| self.topics.get(i))
    }

    pub fn id_of(&self, editor_id: &str) -> Option<FormId> {
        self.get(editor_id).map(|t| t.id)
    }

    /// The id of the first response group of a topic; voice files attach at
    /// response granularity
    pub fn first_response_id(&self, editor_id: &str) -> Option<FormId> {
        self.get(editor_id)
            .and_then(|t| t.responses.first())
            .map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Flush into the quest's topic list, preserving insertion order
    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SequentialAllocator;

    fn registry() -> (TopicRegistry, SequentialAllocator) {
        (
            TopicRegistry::new(FormId::new(0x805)),
            SequentialAllocator::new(),
        )
    }

    #[test]
    fn test_create_assigns_stable_ids() {
        let (mut reg, mut alloc) = registry();
        let a = reg
            .create_scene_topic(&mut alloc, "Topic_A", Some("Hi"), "Hello there.")
            .expect("create");
        assert_eq!(reg.id_of("Topic_A"), Some(a));
    }

    #[test]
    fn test_duplicate_editor_id_rejected() {
        let (mut reg, mut alloc) = registry();
        reg.create_scene_topic(&mut alloc, "Topic_A", None, "one")
            .expect("first");
        let err = reg
            .create_scene_topic(&mut alloc, "Topic_A", None, "two")
            .expect_err("duplicate must fail");
        assert_eq!(
            err,
            DomainError::DuplicateIdentifier {
                editor_id: "Topic_A".into()
            }
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (mut reg, mut alloc) = registry();
        for name in ["C", "A", "B"] {
            reg.create_scene_topic(&mut alloc, name, None, "line")
                .expect("create");
        }
        let order: Vec<String> = reg
            .into_topics()
            .into_iter()
            .map(|t| t.editor_id)
            .collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_prompt_is_dropped() {
        let (mut reg, mut alloc) = registry();
        reg.create_scene_topic(&mut alloc, "Topic_A", Some(""), "line")
            .expect("create");
        assert!(reg.get("Topic_A").and_then(|t| t.prompt.clone()).is_none());
    }
}

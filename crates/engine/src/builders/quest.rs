//! Quest builder - Assembles the relationship state machine root
//!
//! Owns the ordered stage set, alias slots, dialog-level conditions, scenes,
//! topics, and the script host with its per-stage fragments.

use std::collections::HashSet;

use questsmith_domain::{
    Alias, Condition, DomainError, FormId, Fragment, Quest, QuestFlags, RecordKind, Scene,
    Script, ScriptHost, Stage, Topic,
};

/// Builder for the quest/graph root; `build` hands back an immutable
/// snapshot
#[derive(Debug)]
pub struct QuestBuilder {
    id: FormId,
    editor_id: String,
    name: String,
    priority: u8,
    flags: QuestFlags,
    dialog_conditions: Vec<Condition>,
    aliases: Vec<Alias>,
    stages: Vec<Stage>,
    stage_indices: HashSet<u16>,
    scenes: Vec<Scene>,
    topics: Vec<Topic>,
    fragment_script: Option<Script>,
    fragments: Vec<Fragment>,
    scripts: Vec<Script>,
}

impl QuestBuilder {
    pub fn new(id: FormId, editor_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            editor_id: editor_id.into(),
            name: name.into(),
            priority: 70,
            flags: QuestFlags::default(),
            dialog_conditions: Vec::new(),
            aliases: Vec::new(),
            stages: Vec::new(),
            stage_indices: HashSet::new(),
            scenes: Vec::new(),
            topics: Vec::new(),
            fragment_script: None,
            fragments: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn flags(mut self, flags: QuestFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn dialog_condition(mut self, condition: Condition) -> Self {
        self.dialog_conditions.push(condition);
        self
    }

    pub fn alias(mut self, alias: Alias) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Add a stage to the state machine.
    ///
    /// The single log entry is created here with an initialized (possibly
    /// empty) condition list; `entry` text may be empty. Duplicate indices
    /// fail with `DuplicateStage`.
    pub fn add_stage(
        &mut self,
        index: u16,
        note: &str,
        entry: &str,
    ) -> Result<&mut Self, DomainError> {
        if !self.stage_indices.insert(index) {
            return Err(DomainError::duplicate_stage(index));
        }
        self.stages.push(Stage::new(index, note, entry));
        Ok(self)
    }

    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// Install the fragment-hosting script for stage logic
    pub fn fragment_script(&mut self, script: Script) {
        self.fragment_script = Some(script);
    }

    /// Attach a scripted fragment to a stage's log entry.
    ///
    /// Requires the fragment script to be installed and the stage to exist;
    /// stages without scripted behavior simply never get one.
    pub fn attach_fragment(&mut self, stage: u16) -> Result<&mut Self, DomainError> {
        let script = self
            .fragment_script
            .as_ref()
            .ok_or_else(|| DomainError::missing_entity(RecordKind::Quest, "fragment script"))?;
        if !self.stage_indices.contains(&stage) {
            return Err(DomainError::missing_entity(
                RecordKind::Quest,
                format!("stage {}", stage),
            ));
        }
        self.fragments.push(Fragment::for_stage(stage, &script.name));
        Ok(self)
    }

    /// Attach a script visible in the scripts tab
    pub fn attach_script(&mut self, script: Script) {
        self.scripts.push(script);
    }

    pub fn topics(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn build(self) -> Quest {
        Quest {
            id: self.id,
            editor_id: self.editor_id,
            name: self.name,
            priority: self.priority,
            flags: self.flags,
            dialog_conditions: self.dialog_conditions,
            aliases: self.aliases,
            stages: self.stages,
            scenes: self.scenes,
            topics: self.topics,
            script_host: Some(ScriptHost {
                fragment_script: self.fragment_script,
                fragments: self.fragments,
                scripts: self.scripts,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QuestBuilder {
        QuestBuilder::new(FormId::new(0x805), "COMClaude", "Claude")
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let mut b = builder();
        b.add_stage(300, "Neutral", "").expect("first insert");
        let err = b.add_stage(300, "Neutral again", "").expect_err("dup");
        assert_eq!(err, DomainError::DuplicateStage { index: 300 });
    }

    #[test]
    fn test_every_stage_gets_one_log_entry() {
        let mut b = builder();
        b.add_stage(80, "Pickup Companion", "").expect("insert");
        b.add_stage(406, "Friendship Scene Forcegreeted", "Claude considers you a friend.")
            .expect("insert");
        let quest = b.build();
        for stage in &quest.stages {
            assert_eq!(stage.log_entries.len(), 1);
        }
    }

    #[test]
    fn test_fragment_requires_script_and_stage() {
        let mut b = builder();
        b.add_stage(80, "Pickup Companion", "").expect("insert");

        assert!(b.attach_fragment(80).is_err()); // no fragment script yet

        b.fragment_script(Script::new("Fragments:Quests:QF_COMClaude_00000805"));
        b.attach_fragment(80).expect("fragment attaches");
        assert!(b.attach_fragment(90).is_err()); // stage 90 does not exist

        let quest = b.build();
        let host = quest.script_host.expect("host");
        assert_eq!(host.fragments.len(), 1);
        assert_eq!(host.fragments[0].fragment_name, "Fragment_Stage_0080_Item_00");
    }
}

//! Compile pipeline - Turns a content plan into a validated, emitted quest
//!
//! Orchestration only: topics and scenes come from the builders, structural
//! checking from the guardrail, persistence and audio from the ports. The
//! whole pass is synchronous and runs in a fixed order: assemble, validate,
//! emit, copy voice assets.

use std::collections::HashMap;

use thiserror::Error;

use questsmith_domain::{
    Alias, Condition, DomainError, ExchangeSlots, FormId, PrimaryCapabilities, Quest, RecordKind,
    ResponsePair, Scene, Script, ScriptProperty, StageEffect, SupportCapabilities,
};

use crate::builders::{GreetingBuilder, QuestBuilder, SceneBuilder, TopicRegistry};
use crate::content::{
    AliasSpec, ConditionSpec, ContentPlan, PropertyBinding, SceneElement, SceneSpec,
    ScriptPropertySpec, ScriptSpec, VoiceChannel, VoiceTarget,
};
use crate::guardrail::{Guardrail, GuardrailError};
use crate::ports::{
    AssetCopyError, AssetCopyMiss, AssetResolver, EmitError, IdAllocator, QuestEmitter,
    VoiceCopier, VoiceMapping,
};

/// Any failure of the compile pipeline
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Guardrail(#[from] GuardrailError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    AssetCopy(#[from] AssetCopyError),

    #[error("greeting row references unknown scene '{0}'")]
    UnknownScene(String),

    #[error("voice row references unknown target '{0}'")]
    UnknownVoiceTarget(String),
}

/// An assembled, not-yet-validated quest graph plus the voice mappings that
/// accompany it
#[derive(Debug)]
pub struct Assembly {
    pub quest: Quest,
    pub voice: Vec<VoiceMapping>,
}

/// Outcome of a full build
#[derive(Debug)]
pub struct BuildReport {
    pub quest: Quest,
    pub voice_copied: usize,
    pub voice_missed: Vec<AssetCopyMiss>,
}

/// The compile pipeline over its four collaborator ports
pub struct Compiler<R, A, E, V> {
    resolver: R,
    allocator: A,
    emitter: E,
    voice: V,
    guardrail: Guardrail,
}

impl<R, A, E, V> Compiler<R, A, E, V>
where
    R: AssetResolver,
    A: IdAllocator,
    E: QuestEmitter,
    V: VoiceCopier,
{
    pub fn new(resolver: R, allocator: A, emitter: E, voice: V) -> Self {
        Self {
            resolver,
            allocator,
            emitter,
            voice,
            guardrail: Guardrail::default(),
        }
    }

    pub fn with_guardrail(mut self, guardrail: Guardrail) -> Self {
        self.guardrail = guardrail;
        self
    }

    /// Assemble the full graph from the plan without validating or emitting.
    ///
    /// Split out from `build` so the assembled graph can be inspected and
    /// validated separately in tests.
    pub fn assemble(&mut self, plan: &ContentPlan) -> Result<Assembly, CompileError> {
        let quest_id = self.allocator.next_id();
        tracing::info!(quest = %plan.quest.editor_id, id = %quest_id, "Assembling quest graph");

        let mut registry = TopicRegistry::new(quest_id);
        let mut scene_ids: HashMap<String, FormId> = HashMap::new();
        let mut scenes = Vec::with_capacity(plan.scenes.len());
        for spec in &plan.scenes {
            let scene = self.build_scene(spec, quest_id, &mut registry)?;
            scene_ids.insert(scene.editor_id.clone(), scene.id);
            scenes.push(scene);
        }
        tracing::info!(
            scenes = scenes.len(),
            topics = registry.len(),
            "Scene graph assembled"
        );

        let greeting = self.build_greeting(plan, quest_id, &scene_ids)?;

        let mut builder = QuestBuilder::new(quest_id, &plan.quest.editor_id, &plan.quest.name)
            .priority(plan.quest.priority)
            .flags(plan.quest.flags)
            .dialog_condition(Condition::is_alias_ref(0));
        for alias in &plan.aliases {
            builder = builder.alias(match alias {
                AliasSpec::Primary { name } => Alias::Primary {
                    name: name.clone(),
                    actor: None,
                    capabilities: PrimaryCapabilities::companion(),
                },
                AliasSpec::Secondary { name } => Alias::Secondary {
                    name: name.clone(),
                    capabilities: SupportCapabilities::bystander(),
                },
                AliasSpec::Support { slot, name } => Alias::Support {
                    slot: *slot,
                    name: name.clone(),
                    capabilities: SupportCapabilities::bystander(),
                },
            });
        }

        for row in &plan.stages {
            builder.add_stage(row.index, row.note, row.entry)?;
        }
        self.install_scripts(&mut builder, &plan.scripts, quest_id)?;
        for row in &plan.stages {
            if !plan.unscripted_stages.contains(&row.index) {
                builder.attach_fragment(row.index)?;
            }
        }
        tracing::info!(stages = builder.stage_count(), "Stage graph assembled");

        for scene in scenes {
            builder.add_scene(scene);
        }

        // Voice mappings resolve against the registry and greeting before
        // either is consumed into the quest.
        let voice = self.voice_mappings(plan, &registry, &greeting)?;

        let mut topics = registry.into_topics();
        topics.push(greeting.into_topic());
        builder.topics(topics);

        Ok(Assembly {
            quest: builder.build(),
            voice,
        })
    }

    /// Assemble, validate, emit, and copy voice assets
    pub fn build(&mut self, plan: &ContentPlan) -> Result<BuildReport, CompileError> {
        let assembly = self.assemble(plan)?;
        self.guardrail.validate(&assembly.quest)?;
        tracing::info!(quest = %assembly.quest.editor_id, "Guardrail passed");
        self.emitter.emit(&assembly.quest)?;
        let report = self.voice.copy(&assembly.voice)?;
        Ok(BuildReport {
            quest: assembly.quest,
            voice_copied: report.copied,
            voice_missed: report.missed,
        })
    }

    fn build_scene(
        &mut self,
        spec: &SceneSpec,
        quest_id: FormId,
        registry: &mut TopicRegistry,
    ) -> Result<Scene, CompileError> {
        let scene_id = self.allocator.next_id();
        let mut builder = SceneBuilder::new(&spec.editor_id);
        for &slot in &spec.actors {
            builder = builder.actor(slot);
        }
        builder.add_phases(spec.phases);
        for (phase, name) in &spec.named_phases {
            builder.set_phase_name(*phase as u32, name);
        }
        if let Some(stage) = spec.end_stage {
            if let Some(last) = spec.phases.checked_sub(1) {
                builder.set_phase_effect(last as u32, StageEffect::on_end(stage));
            }
        }

        for element in &spec.elements {
            match element {
                SceneElement::Exchange {
                    player_phase,
                    npc_phase,
                    index,
                    player,
                    npc,
                } => {
                    let player_id = registry.create_scene_topic(
                        &mut self.allocator,
                        &player.editor_id,
                        Some(player.prompt),
                        player.text,
                    )?;
                    let npc_id = registry.create_scene_topic(
                        &mut self.allocator,
                        &npc.editor_id,
                        None,
                        npc.text,
                    )?;
                    builder.add_exchange(*player_phase, *npc_phase, *index, player_id, npc_id);
                }
                SceneElement::FullExchange {
                    index,
                    phase,
                    pairs,
                } => {
                    let mut slots = ExchangeSlots::default();
                    for (sentiment, player, npc) in pairs {
                        let player_id = registry.create_scene_topic(
                            &mut self.allocator,
                            &player.editor_id,
                            Some(player.prompt),
                            player.text,
                        )?;
                        let npc_id = registry.create_scene_topic(
                            &mut self.allocator,
                            &npc.editor_id,
                            None,
                            npc.text,
                        )?;
                        slots.set(*sentiment, ResponsePair::new(player_id, npc_id));
                    }
                    builder.add_player_exchange(*index, *phase, slots);
                }
                SceneElement::Line {
                    index,
                    phase,
                    actor,
                    topic,
                } => {
                    let topic_id = match topic {
                        Some(line) => Some(registry.create_scene_topic(
                            &mut self.allocator,
                            &line.editor_id,
                            Some(line.prompt),
                            line.text,
                        )?),
                        None => None,
                    };
                    builder.add_single_line(*index, *phase, *actor, topic_id);
                }
            }
        }
        Ok(builder.build(scene_id, quest_id))
    }

    fn build_greeting(
        &mut self,
        plan: &ContentPlan,
        quest_id: FormId,
        scene_ids: &HashMap<String, FormId>,
    ) -> Result<GreetingBuilder, CompileError> {
        let greeting_id = self.allocator.next_id();
        let mut greeting =
            GreetingBuilder::new(greeting_id, quest_id, &plan.greeting.editor_id);
        for row in &plan.greeting.rows {
            let conditions = row
                .conditions
                .iter()
                .map(|spec| self.build_condition(spec, quest_id))
                .collect::<Result<Vec<_>, _>>()?;
            let scene = match row.start_scene {
                Some(editor_id) => Some(
                    scene_ids
                        .get(editor_id)
                        .copied()
                        .ok_or_else(|| CompileError::UnknownScene(editor_id.to_string()))?,
                ),
                None => None,
            };
            greeting.add_scene_response(
                &mut self.allocator,
                conditions,
                row.text,
                scene,
                row.start_phase,
                row.end_stage.map(StageEffect::on_end),
                row.say_once,
            );
        }
        tracing::info!(
            responses = greeting.response_count(),
            "Greeting truth table assembled"
        );
        Ok(greeting)
    }

    fn build_condition(
        &self,
        spec: &ConditionSpec,
        quest_id: FormId,
    ) -> Result<Condition, DomainError> {
        Ok(match spec {
            ConditionSpec::FactionEquals { faction, value } => {
                Condition::in_faction(self.resolver.resolve(faction, RecordKind::Faction)?, *value)
            }
            ConditionSpec::GlobalEquals { global, value } => {
                Condition::global_equals(self.resolver.resolve(global, RecordKind::Global)?, *value)
            }
            ConditionSpec::StageDone { stage } => Condition::stage_done(quest_id, *stage),
        })
    }

    fn install_scripts(
        &mut self,
        builder: &mut QuestBuilder,
        spec: &ScriptSpec,
        quest_id: FormId,
    ) -> Result<(), CompileError> {
        let fragment_name = format!("{}{}", spec.fragment_script_prefix, quest_id);
        let mut fragment_script = Script::new(fragment_name);
        for property in &spec.fragment_properties {
            fragment_script =
                fragment_script.with_property(self.bind_property(property, quest_id)?);
        }
        builder.fragment_script(fragment_script);

        let mut affinity = Script::new(spec.affinity_script);
        for property in &spec.affinity_properties {
            affinity = affinity.with_property(self.bind_property(property, quest_id)?);
        }
        builder.attach_script(affinity);
        Ok(())
    }

    fn bind_property(
        &self,
        spec: &ScriptPropertySpec,
        quest_id: FormId,
    ) -> Result<ScriptProperty, DomainError> {
        Ok(match &spec.binding {
            PropertyBinding::QuestAlias(slot) => ScriptProperty::alias(spec.name, quest_id, *slot),
            PropertyBinding::External { kind, editor_id } => {
                ScriptProperty::object(spec.name, self.resolver.resolve(editor_id, *kind)?)
            }
        })
    }

    fn voice_mappings(
        &self,
        plan: &ContentPlan,
        registry: &TopicRegistry,
        greeting: &GreetingBuilder,
    ) -> Result<Vec<VoiceMapping>, CompileError> {
        let mut mappings = Vec::new();
        for row in &plan.voice.rows {
            let target = match &row.target {
                VoiceTarget::TopicResponse(editor_id) => registry
                    .first_response_id(editor_id)
                    .ok_or_else(|| CompileError::UnknownVoiceTarget(editor_id.to_string()))?,
                VoiceTarget::GreetingResponse(position) => {
                    greeting.response_id(*position).ok_or_else(|| {
                        CompileError::UnknownVoiceTarget(format!("greeting response {}", position))
                    })?
                }
            };
            let voice_types: &[&str] = match row.channel {
                VoiceChannel::Npc => std::slice::from_ref(&plan.voice.npc_voice_type),
                VoiceChannel::Player => &plan.voice.player_voice_types,
            };
            for voice_type in voice_types {
                mappings.push(VoiceMapping {
                    voice_type: voice_type.to_string(),
                    source: FormId::new(row.source),
                    target,
                });
            }
        }
        Ok(mappings)
    }
}

//! End-to-end pipeline tests over the companion plan: assembly, guardrail
//! verdicts on mutated graphs, emission, and voice-asset handling.

use mockall::mock;
use mockall::predicate::always;
use tempfile::TempDir;

use questsmith_domain::{
    Alias, Condition, EvaluationContext, FormId, Quest, RecordKind, StageEffect, TopicCategory,
    TopicSubtype, NO_STAGE,
};
use questsmith_engine::compiler::Compiler;
use questsmith_engine::content::{claude_companion_plan, SceneSpec};
use questsmith_engine::guardrail::{Guardrail, GuardrailError};
use questsmith_engine::infrastructure::{
    FsVoiceCopier, JsonQuestEmitter, SequentialAllocator, StaticResolver,
};
use questsmith_engine::ports::{
    AssetCopyError, CopyReport, EmitError, QuestEmitter, VoiceCopier, VoiceMapping,
};
use questsmith_engine::CompileError;

const HAS_BEEN_FACTION: u32 = 0x0A1;
const CURRENT_FACTION: u32 = 0x0A2;
const DISALLOWED_FACTION: u32 = 0x0A3;
const WANTS_TO_TALK: u32 = 0x0B1;
const SCENE_TO_PLAY: u32 = 0x0B2;
const FRIEND_GLOBAL: u32 = 0x0B3;
const FOLLOWERS_QUEST: u32 = 0x0C1;

fn resolver() -> StaticResolver {
    StaticResolver::new()
        .register(
            RecordKind::Faction,
            "HasBeenCompanionFaction",
            FormId::new(HAS_BEEN_FACTION),
        )
        .register(
            RecordKind::Faction,
            "CurrentCompanionFaction",
            FormId::new(CURRENT_FACTION),
        )
        .register(
            RecordKind::Faction,
            "DisallowedCompanionFaction",
            FormId::new(DISALLOWED_FACTION),
        )
        .register(RecordKind::Global, "CA_WantsToTalk", FormId::new(WANTS_TO_TALK))
        .register(
            RecordKind::Global,
            "CA_AffinitySceneToPlay",
            FormId::new(SCENE_TO_PLAY),
        )
        .register(
            RecordKind::Global,
            "CA_TCustom2_Friend",
            FormId::new(FRIEND_GLOBAL),
        )
        .register(RecordKind::Quest, "Followers", FormId::new(FOLLOWERS_QUEST))
}

fn compiler(
    dir: &TempDir,
) -> Compiler<StaticResolver, SequentialAllocator, JsonQuestEmitter, FsVoiceCopier> {
    Compiler::new(
        resolver(),
        SequentialAllocator::new(),
        JsonQuestEmitter::new(dir.path().join("companion.json")),
        FsVoiceCopier::new(dir.path().join("voice_src"), dir.path().join("voice_dst")),
    )
}

fn assembled_quest(dir: &TempDir) -> Quest {
    compiler(dir)
        .assemble(&claude_companion_plan())
        .expect("plan assembles")
        .quest
}

#[test]
fn test_full_plan_assembles_and_passes_guardrail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let quest = assembled_quest(&dir);

    assert_eq!(quest.editor_id, "COMClaude");
    assert_eq!(quest.stages.len(), 53);
    assert_eq!(quest.scenes.len(), 14);
    let host = quest.script_host.as_ref().expect("script host");
    assert_eq!(host.fragments.len(), 36);
    assert_eq!(quest.topics.len(), 102);
    assert_eq!(
        quest.topics.last().map(|t| t.editor_id.as_str()),
        Some("COMClaudeGreetings")
    );

    Guardrail::default().validate(&quest).expect("valid graph");
}

#[test]
fn test_validation_is_pure_and_repeatable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let quest = assembled_quest(&dir);
    let before = quest.clone();
    let guardrail = Guardrail::default();
    guardrail.validate(&quest).expect("first pass");
    guardrail.validate(&quest).expect("second pass");
    assert_eq!(quest, before);
}

#[test]
fn test_missing_phase_fails_scene_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let scene = quest
        .scenes
        .iter_mut()
        .find(|s| s.editor_id == "COMClaude_01_NeutralToFriendship")
        .expect("friendship scene");
    scene.phases.pop();

    let err = Guardrail::default().validate(&quest).expect_err("7 phases");
    assert_eq!(
        err,
        GuardrailError::ScenePhaseCount {
            scene: "COMClaude_01_NeutralToFriendship".into(),
            expected: 8,
            found: 7,
        }
    );
}

#[test]
fn test_truncated_stage_table_fails_stage_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    quest.stages.truncate(40);

    let err = Guardrail::default().validate(&quest).expect_err("40 stages");
    assert_eq!(
        err,
        GuardrailError::StageCount {
            quest: "COMClaude".into(),
            expected: 53,
            found: 40,
        }
    );
}

#[test]
fn test_recategorized_greeting_fails_greeting_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let greeting = quest
        .topics
        .iter_mut()
        .find(|t| t.editor_id == "COMClaudeGreetings")
        .expect("greeting topic");
    greeting.category = TopicCategory::Scene;

    let err = Guardrail::default().validate(&quest).expect_err("bad category");
    assert!(matches!(err, GuardrailError::GreetingCategory { .. }));
}

#[test]
fn test_unset_quest_flag_fails_root_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    quest.flags.run_once = false;

    let err = Guardrail::default().validate(&quest).expect_err("flag unset");
    assert_eq!(
        err,
        GuardrailError::QuestFlagUnset {
            quest: "COMClaude".into(),
            flag: "RunOnce",
        }
    );
}

#[test]
fn test_non_essential_primary_fails_alias_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    match quest.aliases.get_mut(0).expect("primary alias") {
        Alias::Primary { capabilities, .. } => capabilities.essential = false,
        other => panic!("expected primary alias, got {:?}", other),
    }

    let err = Guardrail::default()
        .validate(&quest)
        .expect_err("primary not essential");
    assert_eq!(
        err,
        GuardrailError::AliasNotEssential {
            slot: 0,
            name: "Claude".into(),
        }
    );
}

#[test]
fn test_missing_dialog_anchor_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    quest.dialog_conditions.clear();

    let err = Guardrail::default().validate(&quest).expect_err("no anchor");
    assert_eq!(
        err,
        GuardrailError::DialogAnchorMissing {
            quest: "COMClaude".into(),
            slot: 0,
        }
    );
}

#[test]
fn test_fragment_shortfall_fails_fragment_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let host = quest.script_host.as_mut().expect("script host");
    host.fragments.truncate(10);

    let err = Guardrail::default().validate(&quest).expect_err("10 fragments");
    assert_eq!(
        err,
        GuardrailError::FragmentCount {
            quest: "COMClaude".into(),
            expected: 30,
            found: 10,
        }
    );
}

#[test]
fn test_renamed_fragment_script_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let host = quest.script_host.as_mut().expect("script host");
    host.fragment_script.as_mut().expect("fragment script").name = "QF_Wrong_00000000".into();

    let err = Guardrail::default().validate(&quest).expect_err("wrong prefix");
    assert_eq!(
        err,
        GuardrailError::FragmentScriptInvalid {
            expected_prefix: "Fragments:Quests:QF_COMClaude_".into(),
            found: "QF_Wrong_00000000".into(),
        }
    );
}

#[test]
fn test_missing_script_property_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let host = quest.script_host.as_mut().expect("script host");
    let script = host.fragment_script.as_mut().expect("fragment script");
    script.properties.retain(|p| p.name != "Followers");

    let err = Guardrail::default()
        .validate(&quest)
        .expect_err("property removed");
    match err {
        GuardrailError::ScriptPropertyMissing { property, .. } => {
            assert_eq!(property, "Followers");
        }
        other => panic!("expected missing property, got {:?}", other),
    }
}

#[test]
fn test_on_begin_zero_effect_fails_phase_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let scene = quest
        .scenes
        .iter_mut()
        .find(|s| s.editor_id == "COMClaude_04_NeutralToDisdain")
        .expect("disdain scene");
    scene.phases[0].stage_effect = Some(StageEffect::new(0, NO_STAGE));

    let err = Guardrail::default().validate(&quest).expect_err("begin at 0");
    assert_eq!(
        err,
        GuardrailError::PhaseBeginsAtStageZero {
            scene: "COMClaude_04_NeutralToDisdain".into(),
            phase: 0,
        }
    );
}

#[test]
fn test_duplicate_action_indices_fail_uniqueness_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let scene = quest
        .scenes
        .iter_mut()
        .find(|s| s.editor_id == "COMClaude_04_NeutralToDisdain")
        .expect("disdain scene");
    scene.actions[1].index = scene.actions[0].index;

    let err = Guardrail::default().validate(&quest).expect_err("collision");
    assert_eq!(
        err,
        GuardrailError::DuplicateActionIndices {
            scene: "COMClaude_04_NeutralToDisdain".into(),
            indices: vec![1],
        }
    );
}

#[test]
fn test_repriorized_greeting_fails_greeting_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let greeting = quest
        .topics
        .iter_mut()
        .find(|t| t.editor_id == "COMClaudeGreetings")
        .expect("greeting topic");
    greeting.priority = 60;

    let err = Guardrail::default().validate(&quest).expect_err("priority 60");
    assert_eq!(
        err,
        GuardrailError::GreetingPriority {
            topic: "COMClaudeGreetings".into(),
            expected: 50,
            found: 60,
        }
    );
}

#[test]
fn test_resubtyped_greeting_fails_greeting_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let greeting = quest
        .topics
        .iter_mut()
        .find(|t| t.editor_id == "COMClaudeGreetings")
        .expect("greeting topic");
    greeting.subtype = TopicSubtype::SceneDialogue;

    // The naming convention still flags the topic as a greeting, so the
    // subtype check catches the mutation.
    let err = Guardrail::default().validate(&quest).expect_err("bad subtype");
    assert_eq!(
        err,
        GuardrailError::GreetingSubtype {
            topic: "COMClaudeGreetings".into(),
            found: "SceneDialogue".into(),
        }
    );
}

#[test]
fn test_branched_greeting_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut quest = assembled_quest(&dir);
    let greeting = quest
        .topics
        .iter_mut()
        .find(|t| t.editor_id == "COMClaudeGreetings")
        .expect("greeting topic");
    greeting.branch = Some(FormId::new(0xB00));

    let err = Guardrail::default().validate(&quest).expect_err("branched");
    assert_eq!(
        err,
        GuardrailError::GreetingHasBranch {
            topic: "COMClaudeGreetings".into(),
        }
    );
}

#[test]
fn test_greeting_truth_table_first_match() {
    let dir = tempfile::tempdir().expect("tempdir");
    let quest = assembled_quest(&dir);
    let greeting = quest.topics.last().expect("greeting topic");
    assert_eq!(greeting.responses.len(), 9);

    let select = |ctx: &EvaluationContext| {
        greeting
            .responses
            .iter()
            .find(|r| Condition::all_satisfied(&r.conditions, ctx))
    };

    // Fresh player: everything zero, the first pickup row fires.
    let fresh = EvaluationContext::new();
    let row = select(&fresh).expect("pickup row");
    assert_eq!(row.lines[0].text, "Heading my way?");
    assert!(row.say_once);

    // Current companion with nothing to say: the dismiss row, not pickup.
    let travelling = EvaluationContext::new().with_faction(FormId::new(CURRENT_FACTION), 1.0);
    let row = select(&travelling).expect("dismiss row");
    assert_eq!(row.lines[0].text, "Processing. What is your requirement?");

    // Friendship done, wants to talk: admiration outranks nothing else.
    let admiring = EvaluationContext::new()
        .with_faction(FormId::new(CURRENT_FACTION), 1.0)
        .with_global(FormId::new(WANTS_TO_TALK), 1.0)
        .with_stage_done(quest.id, 406);
    let row = select(&admiring).expect("admiration row");
    assert_eq!(row.start_phase.as_deref(), Some("Loop01"));

    // Strong friendship prompt advances stage 406 through the response.
    let prompted = EvaluationContext::new()
        .with_global(FormId::new(WANTS_TO_TALK), 2.0)
        .with_global(FormId::new(SCENE_TO_PLAY), 1.0);
    let row = select(&prompted).expect("friendship row");
    let effect = row.stage_effect.expect("stage trigger");
    assert_eq!(effect.on_end, 406);
    assert_eq!(effect.on_begin, NO_STAGE);
}

#[test]
fn test_scene_end_effects_and_loop_anchors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let quest = assembled_quest(&dir);

    let admiration = quest
        .scene("COMClaude_02_FriendshipToAdmiration")
        .expect("admiration scene");
    let last = admiration.phases.last().expect("phases");
    assert_eq!(last.stage_effect.expect("end effect").on_end, 420);

    let friendship = quest
        .scene("COMClaude_01_NeutralToFriendship")
        .expect("friendship scene");
    assert!(friendship.phases.iter().all(|p| p.stage_effect.is_none()));
    let names: Vec<&str> = friendship
        .phases
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["", "", "Loop01", "", "Loop02", "", "Loop03", ""]);

    let indices: Vec<u32> = friendship.actions.iter().map(|a| a.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 6, 7, 8, 9]);
}

#[test]
fn test_unknown_scene_in_greeting_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut plan = claude_companion_plan();
    plan.greeting.rows[0].start_scene = Some("COMClaudeNoSuchScene");

    let err = compiler(&dir).assemble(&plan).expect_err("unknown scene");
    assert!(matches!(err, CompileError::UnknownScene(name) if name == "COMClaudeNoSuchScene"));
}

#[test]
fn test_zero_phase_scene_end_stage_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut plan = claude_companion_plan();
    plan.scenes.push(SceneSpec {
        editor_id: "COMClaudeEmptyScene".into(),
        actors: vec![0],
        phases: 0,
        named_phases: Vec::new(),
        end_stage: Some(80),
        elements: Vec::new(),
    });

    let assembly = compiler(&dir).assemble(&plan).expect("assembles");
    let scene = assembly
        .quest
        .scene("COMClaudeEmptyScene")
        .expect("scene kept");
    assert!(scene.phases.is_empty());
}

#[test]
fn test_unresolved_external_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut compiler = Compiler::new(
        StaticResolver::new(),
        SequentialAllocator::new(),
        JsonQuestEmitter::new(dir.path().join("companion.json")),
        FsVoiceCopier::new(dir.path().join("voice_src"), dir.path().join("voice_dst")),
    );
    let err = compiler
        .assemble(&claude_companion_plan())
        .expect_err("empty resolver");
    assert!(matches!(err, CompileError::Domain(_)));
}

#[test]
fn test_voice_misses_do_not_fail_the_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    // No source tree at all: every mapping is a miss.
    let report = compiler(&dir)
        .build(&claude_companion_plan())
        .expect("build succeeds despite misses");

    assert_eq!(report.voice_copied, 0);
    // 37 companion lines plus 27 player lines over two player voice types.
    assert_eq!(report.voice_missed.len(), 91);
    assert!(dir.path().join("companion.json").is_file());
}

mock! {
    Emitter {}
    impl QuestEmitter for Emitter {
        fn emit(&mut self, quest: &Quest) -> Result<(), EmitError>;
    }
}

mock! {
    Copier {}
    impl VoiceCopier for Copier {
        fn copy(&mut self, mappings: &[VoiceMapping]) -> Result<CopyReport, AssetCopyError>;
    }
}

#[test]
fn test_build_emits_validated_quest_then_copies_voice() {
    let mut emitter = MockEmitter::new();
    emitter
        .expect_emit()
        .withf(|quest: &Quest| Guardrail::default().validate(quest).is_ok())
        .times(1)
        .returning(|_| Ok(()));
    let mut copier = MockCopier::new();
    copier
        .expect_copy()
        .with(always())
        .times(1)
        .returning(|mappings| {
            Ok(CopyReport {
                copied: mappings.len(),
                missed: Vec::new(),
            })
        });

    let mut compiler = Compiler::new(resolver(), SequentialAllocator::new(), emitter, copier);
    let report = compiler
        .build(&claude_companion_plan())
        .expect("build succeeds");
    assert_eq!(report.voice_copied, 91);
    assert!(report.voice_missed.is_empty());
}

#[test]
fn test_failed_emission_aborts_before_voice_copy() {
    let mut emitter = MockEmitter::new();
    emitter
        .expect_emit()
        .times(1)
        .returning(|_| Err(EmitError::Serialization("disk full".into())));
    let mut copier = MockCopier::new();
    copier.expect_copy().times(0);

    let mut compiler = Compiler::new(resolver(), SequentialAllocator::new(), emitter, copier);
    let err = compiler
        .build(&claude_companion_plan())
        .expect_err("emission failed");
    assert!(matches!(err, CompileError::Emit(_)));
}

//! Compiles the Claude companion plan end to end and writes the quest
//! graph snapshot to `companion.json` in the working directory.
//!
//! Voice sources are read from `QUESTSMITH_VOICE_SRC` when set; with no
//! source tree every mapping is reported as a miss and the build still
//! succeeds.

use std::env;

use anyhow::Result;

use questsmith_domain::{FormId, RecordKind};
use questsmith_engine::compiler::Compiler;
use questsmith_engine::content::claude_companion_plan;
use questsmith_engine::infrastructure::{
    FsVoiceCopier, JsonQuestEmitter, SequentialAllocator, StaticResolver,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Stand-in ids for the base-content records a load-order scan would
    // normally provide.
    let resolver = StaticResolver::new()
        .register(
            RecordKind::Faction,
            "HasBeenCompanionFaction",
            FormId::new(0x0502_C4),
        )
        .register(
            RecordKind::Faction,
            "CurrentCompanionFaction",
            FormId::new(0x0232_96),
        )
        .register(
            RecordKind::Faction,
            "DisallowedCompanionFaction",
            FormId::new(0x0232_9A),
        )
        .register(RecordKind::Global, "CA_WantsToTalk", FormId::new(0x0FA8_6B))
        .register(
            RecordKind::Global,
            "CA_AffinitySceneToPlay",
            FormId::new(0x0FA8_75),
        )
        .register(
            RecordKind::Global,
            "CA_TCustom2_Friend",
            FormId::new(0x1667_05),
        )
        .register(RecordKind::Quest, "Followers", FormId::new(0x0289_F0));

    let voice_src = env::var("QUESTSMITH_VOICE_SRC").unwrap_or_else(|_| "voice_src".into());

    let mut compiler = Compiler::new(
        resolver,
        SequentialAllocator::with_burn(200),
        JsonQuestEmitter::new("companion.json"),
        FsVoiceCopier::new(voice_src, "voice_out"),
    );

    let report = compiler.build(&claude_companion_plan())?;
    println!(
        "Compiled '{}': {} stages, {} scenes, {} topics; voice copied {}, missed {}.",
        report.quest.editor_id,
        report.quest.stages.len(),
        report.quest.scenes.len(),
        report.quest.topics.len(),
        report.voice_copied,
        report.voice_missed.len(),
    );
    Ok(())
}

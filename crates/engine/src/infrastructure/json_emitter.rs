//! JSON persistence emitter
//!
//! Serializes the validated graph as a JSON snapshot. The real target is a
//! binary plugin container written by external tooling; the snapshot format
//! keeps the whole record set inspectable and diffable in the meantime.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use questsmith_domain::Quest;

use crate::ports::{EmitError, QuestEmitter};

/// Writes the validated quest graph to a JSON file
#[derive(Debug)]
pub struct JsonQuestEmitter {
    output: PathBuf,
}

impl JsonQuestEmitter {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl QuestEmitter for JsonQuestEmitter {
    fn emit(&mut self, quest: &Quest) -> Result<(), EmitError> {
        let file = File::create(&self.output)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, quest)
            .map_err(|e| EmitError::Serialization(e.to_string()))?;
        tracing::info!(
            quest = %quest.editor_id,
            output = %self.output.display(),
            "Quest graph emitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questsmith_domain::{FormId, QuestFlags};

    fn minimal_quest() -> Quest {
        Quest {
            id: FormId::new(0x805),
            editor_id: "COMClaude".into(),
            name: "Claude".into(),
            priority: 70,
            flags: QuestFlags::companion(),
            dialog_conditions: Vec::new(),
            aliases: Vec::new(),
            stages: Vec::new(),
            scenes: Vec::new(),
            topics: Vec::new(),
            script_host: None,
        }
    }

    #[test]
    fn test_emit_writes_parseable_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("companion.json");
        let mut emitter = JsonQuestEmitter::new(&path);
        emitter.emit(&minimal_quest()).expect("emit");

        let raw = std::fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value["editorId"], "COMClaude");
        assert_eq!(value["priority"], 70);
    }
}

//! Filesystem voice-asset copier
//!
//! Copies existing voice lines into the output tree, renamed to the
//! response records they now back. File layout is
//! `<root>/<voice type>/<form id hex>_1.fuz`. A missing source file is
//! logged and skipped; it never fails the build.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ports::{AssetCopyError, AssetCopyMiss, CopyReport, VoiceCopier, VoiceMapping};

/// Copies `.fuz` voice files between two directory trees
#[derive(Debug)]
pub struct FsVoiceCopier {
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl FsVoiceCopier {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    fn file_name(id: questsmith_domain::FormId) -> String {
        format!("{}_1.fuz", id)
    }
}

impl VoiceCopier for FsVoiceCopier {
    fn copy(&mut self, mappings: &[VoiceMapping]) -> Result<CopyReport, AssetCopyError> {
        let mut report = CopyReport::default();
        for mapping in mappings {
            let src: PathBuf = [
                self.source_root.as_path(),
                Path::new(&mapping.voice_type),
                Path::new(&Self::file_name(mapping.source)),
            ]
            .iter()
            .collect();
            if !src.is_file() {
                tracing::warn!(
                    voice_type = %mapping.voice_type,
                    source = %mapping.source,
                    "Voice file missing, skipped"
                );
                report.missed.push(AssetCopyMiss {
                    voice_type: mapping.voice_type.clone(),
                    source: mapping.source,
                });
                continue;
            }
            let dst_dir = self.dest_root.join(&mapping.voice_type);
            fs::create_dir_all(&dst_dir)?;
            fs::copy(&src, dst_dir.join(Self::file_name(mapping.target)))?;
            report.copied += 1;
        }
        tracing::info!(
            copied = report.copied,
            missed = report.missed.len(),
            "Voice copy pass complete"
        );
        Ok(report)
    }
}

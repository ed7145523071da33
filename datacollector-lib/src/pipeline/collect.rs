use super::masking::MaskSet;
use super::path_utils::{slash_path, without_root};
use crate::Result;
use crate::model::AssessmentUnit;
use ohno::{IntoAppError, bail};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "   collect";

/// Copies a unit's declared configuration files into `unit_dir` and masks the copies.
///
/// Each source lands at `<unit_dir>/<absolute source path without its root>`. Declared
/// directories are copied recursively, skipping anything under `output_root` so a walk never
/// picks up its own copies. On success the unit's file list names the copies, one entry per
/// copied file.
pub fn copy_config_files(unit: &mut AssessmentUnit, unit_dir: &Path, output_root: &Path) -> Result<()> {
    let masks = MaskSet::new(&unit.content_masks)?;
    let output_root = std::path::absolute(output_root).into_app_err_with(|| format!("unable to resolve path '{}'", output_root.display()))?;

    let mut copied = Vec::new();
    for declared in &unit.config_files {
        let source = std::path::absolute(declared).into_app_err_with(|| format!("unable to resolve path '{}'", declared.display()))?;

        if source.is_dir() {
            let walker = walkdir::WalkDir::new(&source)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !e.path().starts_with(&output_root));

            for entry in walker {
                let entry = entry.into_app_err_with(|| format!("unable to walk directory '{}'", source.display()))?;
                if entry.file_type().is_file() {
                    copied.push(copy_one(entry.path(), unit_dir)?);
                }
            }
        } else if source.is_file() {
            copied.push(copy_one(&source, unit_dir)?);
        } else {
            bail!("configuration file '{}' does not exist", source.display());
        }
    }

    let mut masked = 0usize;
    for (original, copy) in &copied {
        if masks.apply(&slash_path(original), copy)? {
            masked += 1;
        }
    }

    log::debug!(target: LOG_TARGET, "Copied {} file(s) for '{}', {masked} masked", copied.len(), unit.name);
    unit.config_files = copied.into_iter().map(|(_, copy)| copy).collect();
    Ok(())
}

fn copy_one(source: &Path, unit_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let dest = unit_dir.join(without_root(source));
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let _ = fs::copy(source, &dest).into_app_err_with(|| format!("unable to copy '{}' to '{}'", source.display(), dest.display()))?;
    log::debug!(target: LOG_TARGET, "Copied '{}'", source.display());
    Ok((source.to_path_buf(), dest))
}

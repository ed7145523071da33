use crate::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use ohno::{IntoAppError, app_err};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tar::{Builder, HeaderMode};

const LOG_TARGET: &str = "   archive";

/// Extension of assessment archives.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Location of the archive for `output_dir`: `<parent>/<name>.tar.gz`.
pub fn archive_path(output_dir: &Path) -> Result<PathBuf> {
    let name = output_dir
        .file_name()
        .ok_or_else(|| app_err!("cannot archive '{}': path has no final component", output_dir.display()))?;
    let parent = output_dir.parent().unwrap_or_else(|| Path::new(""));

    let mut file_name = name.to_os_string();
    file_name.push(".");
    file_name.push(ARCHIVE_EXTENSION);
    Ok(parent.join(file_name))
}

/// Writes a fresh gzip-compressed tar of `output_dir` beside it, replacing any earlier archive.
///
/// Entries are rooted at the directory's own name and added in sorted order with
/// deterministic headers, so archiving the same tree twice yields the same bytes.
pub fn archive(output_dir: &Path) -> Result<PathBuf> {
    let path = archive_path(output_dir)?;
    let root = output_dir
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| app_err!("cannot archive '{}': path has no final component", output_dir.display()))?;

    let file = File::create(&path).into_app_err_with(|| format!("unable to create archive '{}'", path.display()))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = Builder::new(encoder);
    builder.mode(HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    let mut entries = 0usize;
    for entry in walkdir::WalkDir::new(output_dir).follow_links(false).sort_by_file_name() {
        let entry = entry.into_app_err_with(|| format!("unable to walk directory '{}'", output_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(output_dir)
            .into_app_err_with(|| format!("unexpected path '{}' while archiving", entry.path().display()))?;
        let name = root.join(relative);

        if entry.file_type().is_dir() {
            builder
                .append_dir(&name, entry.path())
                .into_app_err_with(|| format!("unable to add directory '{}' to archive", entry.path().display()))?;
        } else {
            builder
                .append_path_with_name(entry.path(), &name)
                .into_app_err_with(|| format!("unable to add file '{}' to archive", entry.path().display()))?;
            entries += 1;
        }
    }

    let encoder = builder
        .into_inner()
        .into_app_err_with(|| format!("unable to finish archive '{}'", path.display()))?;
    let mut writer = encoder
        .finish()
        .into_app_err_with(|| format!("unable to compress archive '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush archive '{}'", path.display()))?;

    log::info!(target: LOG_TARGET, "Wrote archive '{}' with {entries} file(s)", path.display());
    Ok(path)
}

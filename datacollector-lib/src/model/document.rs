//! Reading and writing of JSON documents and raw report files.

use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

const LOG_TARGET: &str = "  document";

/// Load a document from a file
pub fn load<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();

    let file = File::open(path).into_app_err_with(|| format!("unable to open file '{}'", path.display()))?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse file '{}'", path.display()))?;

    log::debug!(target: LOG_TARGET, "Loaded '{}'", path.display());
    Ok(data)
}

/// Write a document as pretty-printed JSON, replacing any existing file.
pub fn write<T>(data: &T, path: impl AsRef<Path>) -> Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();
    let writer = create_fresh(path)?;
    let mut writer = BufWriter::new(writer);

    serde_json::to_writer_pretty(&mut writer, data).into_app_err_with(|| format!("unable to write file '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush file '{}'", path.display()))?;

    log::info!(target: LOG_TARGET, "Wrote '{}'", path.display());
    Ok(())
}

/// Write raw bytes, replacing any existing file.
pub fn write_bytes(content: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file = create_fresh(path)?;

    file.write_all(content)
        .into_app_err_with(|| format!("unable to write file '{}'", path.display()))?;

    log::info!(target: LOG_TARGET, "Wrote '{}'", path.display());
    Ok(())
}

fn create_fresh(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    match fs::remove_file(path) {
        Ok(()) => log::debug!(target: LOG_TARGET, "Removed previous '{}'", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e).into_app_err_with(|| format!("unable to delete file '{}'", path.display())),
    }

    File::create(path).into_app_err_with(|| format!("unable to create file '{}'", path.display()))
}

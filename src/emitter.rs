//! Rendering of the generated registries and their atomic placement on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::{ActionCatalog, ManagedPolicyCatalog};
use crate::error::IngestError;

/// Permissions given to written artifacts on unix; temp files start at 0600.
pub const ARTIFACT_MODE: u32 = 0o644;

/// A fully rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Artifact {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Write this artifact atomically; see [`write_atomic`].
    pub fn write(&self) -> Result<(), IngestError> {
        write_atomic(&self.path, self.contents.as_bytes())
    }
}

/// The plain, diffable list: one identifier per line, `\n` separated,
/// nothing else.
pub fn render_methods_list(catalog: &ActionCatalog) -> String {
    catalog
        .identifiers()
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON object keyed by service prefix; values are the full identifier
/// strings for that prefix.
pub fn render_actions_registry(catalog: &ActionCatalog, path: &Path) -> Result<String, IngestError> {
    render_json(&catalog.by_prefix(), path)
}

/// JSON array of the managed policies in catalog order.
pub fn render_managed_policies(
    catalog: &ManagedPolicyCatalog,
    path: &Path,
) -> Result<String, IngestError> {
    render_json(catalog.policies(), path)
}

fn render_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<String, IngestError> {
    let mut rendered = serde_json::to_string_pretty(value).map_err(|e| IngestError::emit(path, e))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Replace `path` with `contents` without ever exposing a partial file.
///
/// The data goes to a temporary file in the destination directory, is
/// synced, and is then renamed over `path`. On any failure the temporary
/// file is removed and `path` is left as it was.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), IngestError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| IngestError::emit(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| IngestError::emit(path, e))?;
    tmp.write_all(contents).map_err(|e| IngestError::emit(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(ARTIFACT_MODE))
            .map_err(|e| IngestError::emit(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| IngestError::emit(path, e))?;
    tmp.persist(path).map_err(|e| IngestError::emit(path, e.error))?;

    debug!(
        event = "Emit",
        phase = "Write",
        path = %path.display(),
        bytes = contents.len()
    );
    Ok(())
}

/// Write every artifact. Rendering is expected to be complete before this
/// is called, so a failure here can only come from the filesystem.
pub fn commit(artifacts: &[Artifact]) -> Result<(), IngestError> {
    for artifact in artifacts {
        artifact.write()?;
    }
    info!(event = "Emit", phase = "Commit", artifacts = artifacts.len());
    Ok(())
}

//! Package extraction
//!
//! A 3MF package is a ZIP archive. The analyzer unpacks it into a uniquely
//! named scratch directory and reads documents from there; the directory is
//! removed when the [`ScratchDir`] guard is dropped, so every return path of
//! a parse call releases it.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Main 3D model document within the package
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Slicer settings overlay (plates, object names, parts)
pub const SETTINGS_PATH: &str = "Metadata/model_settings.config";

/// Slicer project settings (filament list)
pub const PROJECT_SETTINGS_PATH: &str = "Metadata/project_settings.config";

/// Extension of model documents, including sub-assembly files
pub const MODEL_EXTENSION: &str = ".model";

/// Prefix of scratch directory names
const SCRATCH_PREFIX: &str = "3mf_";

/// An extracted package on disk
///
/// Dropping the guard removes the directory. Use [`ScratchDir::cleanup`] to
/// observe removal errors instead of ignoring them.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Root of the extracted file tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting failures
    pub fn cleanup(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(path = %path.display(), "removed scratch directory");
        Ok(())
    }
}

/// Join a package-relative path onto `root`, refusing `..` escapes
///
/// Package paths use `/` separators and frequently start with `/`
/// (`/3D/Objects/object_1.model`); both forms resolve to the same file.
pub fn resolve_in(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative.trim_start_matches(['/', '\\'])).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Extract a package into a new scratch directory under the system temp dir
pub fn extract_archive(archive_path: impl AsRef<Path>) -> Result<ScratchDir> {
    extract_archive_in(archive_path, None)
}

/// Extract a package into a new scratch directory
///
/// # Arguments
///
/// * `archive_path` - The package file
/// * `scratch_root` - Parent directory for the scratch directory, or `None`
///   for the system temp dir
///
/// On any failure the partially written directory is removed before the
/// error is returned.
pub fn extract_archive_in(
    archive_path: impl AsRef<Path>,
    scratch_root: Option<&Path>,
) -> Result<ScratchDir> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path)
        .map_err(|e| Error::in_archive(archive_path.display().to_string(), e))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::in_archive(archive_path.display().to_string(), e))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);
    let dir = match scratch_root {
        Some(root) => builder.tempdir_in(root)?,
        None => builder.tempdir()?,
    };
    let scratch = ScratchDir { dir };

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| Error::UnsafeEntry(name.clone()))?;
        let dest = scratch.path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&dest)?;
        io::copy(&mut entry, &mut out)?;
    }

    tracing::debug!(
        archive = %archive_path.display(),
        scratch = %scratch.path().display(),
        entries = archive.len(),
        "extracted package"
    );

    Ok(scratch)
}

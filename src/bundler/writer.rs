//! Synchronous, checked bundle writes
//!
//! Every artifact of a variant is first written to a temporary file next to
//! its target. Targets are only replaced once all of them were staged, so a
//! failed write leaves the previous bundle files untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_err};

/// A fully rendered artifact waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub content: String,
}

/// Content written to a temporary file, ready to replace its target
struct Staged<'a> {
    file: NamedTempFile,
    target: &'a Path,
}

fn stage(write: &PendingWrite) -> Result<Staged<'_>> {
    let display = write.path.display().to_string();
    let dir = match write.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| fs_err::write_failed(&display, e))?;
    if write.path.is_dir() {
        return Err(fs_err::write_failed(&display, "a directory is in the way"));
    }

    let mut file = NamedTempFile::new_in(dir).map_err(|e| fs_err::write_failed(&display, e))?;
    file.write_all(write.content.as_bytes())
        .map_err(|e| fs_err::write_failed(&display, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| fs_err::write_failed(&display, e))?;
    }

    Ok(Staged {
        file,
        target: &write.path,
    })
}

/// Write one artifact, replacing any previous file
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    write_all(&[PendingWrite {
        path: path.to_path_buf(),
        content: content.to_string(),
    }])
}

/// Write every artifact of a variant, or none of them
///
/// Staging failures (unwritable directory, a directory at the target path)
/// leave every target as it was.
pub fn write_all(writes: &[PendingWrite]) -> Result<()> {
    let staged = writes.iter().map(stage).collect::<Result<Vec<_>>>()?;

    for Staged { file, target } in staged {
        file.persist(target)
            .map_err(|e| fs_err::write_failed(target.display().to_string(), e.error))?;
    }
    Ok(())
}

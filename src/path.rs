//! Path utilities for link generation

use anyhow::{Result, bail};
use std::path::{Component, Path, PathBuf};

/// Makes a path absolute against the current directory.
///
/// The parent directory is canonicalized but the final segment is kept as
/// given, so a symlinked file stays the file the user named rather than its
/// target.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or(absolute),
        _ => absolute.canonicalize().unwrap_or(absolute),
    }
}

/// Expresses a file path relative to the repository root.
///
/// The root and the file's parent directory are canonicalized when they
/// exist so that symlinked locations (e.g., `/tmp` on macOS) agree with the
/// root reported by git. A relative `file` is taken against the current
/// directory. Components are joined with `/` regardless of the host separator.
///
/// # Arguments
///
/// * `root`: Repository work tree
/// * `file`: Path of a file under `root`
///
/// # Returns
///
/// Root relative path without a leading slash. Empty when `file` is `root`.
///
/// # Errors
///
/// Returns error if `file` does not lie under `root` or a component is not
/// valid UTF8.
pub fn relative_path(root: &Path, file: &Path) -> Result<String> {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let file = absolutize(file);

    let Ok(stripped) = file.strip_prefix(&root) else {
        bail!(
            "{} is not inside repository {}",
            file.display(),
            root.display()
        );
    };

    let mut segments = Vec::new();
    for component in stripped.components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(s) => segments.push(s),
                None => bail!("Path contains invalid UTF8: {}", stripped.display()),
            },
            Component::CurDir => {}
            _ => bail!("Path escapes repository root: {}", stripped.display()),
        }
    }

    Ok(segments.join("/"))
}

//! Filesystem probing for build artifacts next to a Q# project.

use std::path::{Path, PathBuf};

use collapse_core::api::PlanningError;

/// Expands a leading `~` in a user supplied path.
pub(crate) fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Case-insensitive extension check.
pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// File stem of the first `*.csproj` (alphabetically) inside `dir`, if any.
pub(crate) fn project_name(dir: &Path) -> Result<Option<String>, PlanningError> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let pattern = format!("{}/*.csproj", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = glob::glob(&pattern).map_err(|e| PlanningError::Discovery {
        path: display(dir),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;

    let mut projects = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PlanningError::Discovery {
            path: display(dir),
            source: std::io::Error::from(e),
        })?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            projects.push(stem.to_string());
        }
    }
    projects.sort();
    Ok(projects.into_iter().next())
}

/// First candidate that exists on disk.
pub(crate) fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_file())
}

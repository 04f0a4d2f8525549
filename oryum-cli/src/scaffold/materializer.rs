//! Writes generated artifacts into a project
//!
//! A target file is never overwritten. The aggregator (`models/__init__.py`,
//! `controllers/__init__.py`) only ever grows: it is created when missing and
//! the registration line is appended, unless the exact line is already there.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::request::GeneratedArtifact;
use crate::error::ScaffoldError;

/// Result of writing an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Absolute path of the written file
    pub path: PathBuf,
    /// Absolute path of the aggregator
    pub aggregator: PathBuf,
    /// `false` when the aggregator already held the registration line
    pub registered: bool,
}

/// Write `artifact` under `root` and register it in its aggregator
///
/// # Errors
///
/// Returns [`ScaffoldError::AlreadyExists`] if the target file exists, in
/// which case nothing is written. Filesystem failures are returned as
/// [`ScaffoldError::Io`].
pub fn materialize(root: &Path, artifact: &GeneratedArtifact) -> Result<Materialized, ScaffoldError> {
    let path = root.join(&artifact.path);
    let aggregator = root.join(&artifact.aggregator);

    if path.exists() {
        return Err(ScaffoldError::AlreadyExists { path });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }

    write_new(&path, &artifact.content)?;
    tracing::debug!(path = %path.display(), bytes = artifact.content.len(), "wrote file");

    let registered = register(&aggregator, &artifact.registration)?;
    if registered {
        tracing::debug!(aggregator = %aggregator.display(), line = %artifact.registration, "registered");
    } else {
        tracing::info!(
            aggregator = %aggregator.display(),
            line = %artifact.registration,
            "registration already present, skipping"
        );
    }

    Ok(Materialized {
        path,
        aggregator,
        registered,
    })
}

/// Create `path` and write `content`, failing if it appeared meanwhile
pub fn write_new(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                ScaffoldError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                ScaffoldError::io(path, e)
            }
        })?;

    file.write_all(content.as_bytes())
        .map_err(|e| ScaffoldError::io(path, e))
}

/// Append `line` to the aggregator unless it is already registered
fn register(aggregator: &Path, line: &str) -> Result<bool, ScaffoldError> {
    // Hand-edited aggregators are not necessarily UTF-8.
    let existing = match fs::read(aggregator) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(ScaffoldError::io(aggregator, e)),
    };

    if String::from_utf8_lossy(&existing)
        .lines()
        .any(|l| l.trim_end() == line)
    {
        return Ok(false);
    }

    let mut entry = String::with_capacity(line.len() + 2);
    if existing.last().is_some_and(|&b| b != b'\n') {
        entry.push('\n');
    }
    entry.push_str(line);
    entry.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(aggregator)
        .map_err(|e| ScaffoldError::io(aggregator, e))?;
    file.write_all(entry.as_bytes())
        .map_err(|e| ScaffoldError::io(aggregator, e))?;

    Ok(true)
}

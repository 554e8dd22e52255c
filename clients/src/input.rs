//! Reading exported certification JSON from a file or a directory tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use skillcert_approvals::adapter::{parse_export_str, AdapterError, ParsedExport};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Errors raised while reading input exports.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input path does not exist.
    #[error("input not found: {0}")]
    NotFound(PathBuf),
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A file is not a usable payload.
    #[error("failed to parse {path}: {source}")]
    Payload {
        /// File that failed.
        path: PathBuf,
        /// Adapter error.
        source: AdapterError,
    },
}

/// Lists the JSON files under `path`, sorted for stable output.
///
/// A file path is returned as-is regardless of its extension.
///
/// # Errors
///
/// Returns [`InputError::NotFound`] if `path` does not exist.
pub fn json_files(path: &Path) -> Result<Vec<PathBuf>, InputError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Reads one export file; rejected rows are tagged with the file path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object or array.
pub fn load_export(path: &Path) -> Result<ParsedExport, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let export = parse_export_str(&text).map_err(|source| InputError::Payload {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        records = export.records.len(),
        rejected = export.rejected.len(),
        "loaded export"
    );
    Ok(export.with_source(&path.display().to_string()))
}

/// Reads every export under `path` into one [`ParsedExport`].
///
/// Files are merged in path order.
///
/// # Errors
///
/// Returns the first read or parse error encountered.
pub fn load_exports(path: &Path) -> Result<ParsedExport, InputError> {
    let files = json_files(path)?;
    if files.is_empty() {
        warn!(path = %path.display(), "no JSON files found");
    }
    let mut merged = ParsedExport::default();
    for file in &files {
        merged.extend(load_export(file)?);
    }
    Ok(merged)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skillcert-input-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let _ = fs::create_dir_all(dir.join("nested"));
        dir
    }

    #[test]
    fn walks_directories_for_json() {
        let dir = scratch("walk");
        let _ = fs::write(
            dir.join("b.json"),
            r#"[{"employee_number":"6685","operation":"OP1","line":"L1"}]"#,
        );
        let _ = fs::write(
            dir.join("nested").join("a.json"),
            r#"{"data":[{"employee_number":"7218","operation":"OP2","line":"L1"},{"line":"L1"}]}"#,
        );
        let _ = fs::write(dir.join("notes.txt"), "ignored");

        let files = json_files(&dir).expect("directory lists");
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.json"));

        let export = load_exports(&dir).expect("exports load");
        assert_eq!(export.records.len(), 2);
        assert_eq!(export.rejected.len(), 1);
        let source = export.rejected[0].source.clone().expect("rejection tagged with file");
        assert!(source.ends_with("a.json"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn scalar_payload_is_an_error() {
        let dir = scratch("scalar");
        let file = dir.join("x.json");
        let _ = fs::write(&file, "42");
        assert!(matches!(
            load_export(&file),
            Err(InputError::Payload { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_input() {
        let path = std::env::temp_dir().join("skillcert-input-does-not-exist");
        assert!(matches!(json_files(&path), Err(InputError::NotFound(_))));
    }
}

//! Writes rendered matrices to disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes a rendered matrix (text, HTML or JSON) to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("skillcert-writer-{}", std::process::id()));
        let path = dir.join("nested").join("matrix.txt");
        assert!(write_text(&path, "Training matrix").is_ok());
        assert_eq!(fs::read_to_string(&path).ok().as_deref(), Some("Training matrix"));
        let _ = fs::remove_dir_all(&dir);
    }
}

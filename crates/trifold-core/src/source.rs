//! Markdown source loading.

use std::path::Path;

use tracing::debug;

use crate::error::{CoreError, Result};

/// Read a UTF-8 markdown source in full
pub fn load_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|e| CoreError::source_not_found(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "loaded source");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n").unwrap();
        assert_eq!(load_source(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, CoreError::SourceNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();
        assert!(matches!(
            load_source(&path),
            Err(CoreError::SourceNotFound { .. })
        ));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(PathBuf),
}

/// Read a markdown note and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a markdown note, creating parent directories as needed
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

/// Checks the extension is `.md` (case-insensitive)
pub fn validate_markdown_path(path: &Path) -> Result<(), IoError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("md") => Ok(()),
        _ => Err(IoError::NotMarkdown(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/note.md");
        write_file(&path, "{日|ひ}\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "{日|ひ}\n");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.md");
        assert!(matches!(read_file(&path), Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_validate_markdown_path() {
        assert!(validate_markdown_path(Path::new("a/b.md")).is_ok());
        assert!(validate_markdown_path(Path::new("B.MD")).is_ok());
        assert!(matches!(
            validate_markdown_path(Path::new("notes.txt")),
            Err(IoError::NotMarkdown(_))
        ));
        assert!(validate_markdown_path(Path::new("README")).is_err());
    }
}

//! Text file access used by the save and load processes.
//!
//! The [`TextFiles`] trait keeps processes independent of the real
//! filesystem; tests swap in an in-memory implementation.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::error::{Error, Result};

pub trait TextFiles {
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> Result<String>;
    fn write_text(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Files on the local disk. Writes go to a temp file and are renamed over
/// the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl TextFiles for LocalFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "reading text file");
        fs::read_to_string(path).map_err(io_error("read", path))
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        debug!(path = %path.display(), bytes = contents.len(), "writing text file");
        write_atomic(path, contents)
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);
    fs::write(tmp_path, contents).map_err(io_error("write temp file", tmp_path))?;
    fs::rename(tmp_path, path).map_err(io_error("replace", path))?;
    Ok(())
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.to_path_buf();
    move |source| Error::Io {
        action,
        path,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("ideas.json");
        assert!(!LocalFiles.exists(&path));

        LocalFiles.write_text(&path, "3{}").expect("write");
        assert!(LocalFiles.exists(&path));
        assert_eq!(LocalFiles.read_text(&path).expect("read"), "3{}");
        assert!(!temp.path().join("nested").join("ideas.json.tmp").exists());
    }

    #[test]
    fn read_missing_is_io_error_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing.json");
        let err = LocalFiles.read_text(&path).expect_err("missing");
        assert!(matches!(err, Error::Io { action: "read", .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}

//! Test-only helpers: in-memory collaborators and small tree builders.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::core::path::IdeaPath;
use crate::core::tree::IdeaTree;
use crate::io::files::TextFiles;
use crate::io::init::BotPaths;
use crate::io::lines::LineSource;

/// Files kept in a map instead of on disk.
#[derive(Debug, Default)]
pub struct MemoryFiles {
    files: RefCell<HashMap<PathBuf, String>>,
}

impl MemoryFiles {
    pub fn insert(&self, path: impl AsRef<Path>, contents: &str) {
        self.files
            .borrow_mut()
            .insert(path.as_ref().to_path_buf(), contents.to_string());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl TextFiles for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| Error::Io {
            action: "read",
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        self.insert(path, contents);
        Ok(())
    }
}

/// Input lines fed from a fixed script; `None` once it runs out.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Tree with root `root` and one leaf per name, in order.
pub fn tree_with_children(names: &[&str]) -> IdeaTree {
    let mut tree = IdeaTree::new("root", "");
    for name in names {
        tree.add_child(&IdeaPath::root(), *name)
            .expect("root always resolves");
    }
    tree
}

/// Temporary directory standing in for a home directory.
///
/// Keep the `TempDir` alive for as long as the paths are used.
pub fn temp_home() -> (tempfile::TempDir, BotPaths) {
    let temp = tempfile::tempdir().expect("tempdir");
    let paths = BotPaths::new(temp.path());
    (temp, paths)
}

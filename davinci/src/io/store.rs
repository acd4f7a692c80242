//! Save and load an idea tree through a [`TextFiles`] collaborator.

use std::path::Path;

use tracing::info;

use crate::core::error::Result;
use crate::core::path::IdeaPath;
use crate::core::tree::IdeaTree;
use crate::io::files::TextFiles;

/// What a load attempt found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was decoded and spliced in; `ideas` counts the loaded subtree.
    Loaded { ideas: usize },
    /// No file at the path. The tree is left as it was.
    Missing,
}

/// Load the codec text at `path` onto the idea at `target`.
///
/// A missing file is not an error: the caller keeps its current tree.
pub fn load_file(
    files: &dyn TextFiles,
    path: &Path,
    tree: &mut IdeaTree,
    target: &IdeaPath,
) -> Result<LoadOutcome> {
    if !files.exists(path) {
        info!(path = %path.display(), "no save file; keeping current ideas");
        return Ok(LoadOutcome::Missing);
    }
    let text = files.read_text(path)?;
    tree.load(target, &text)?;
    let ideas = tree.get(target)?.count();
    info!(path = %path.display(), ideas, next_id = tree.next_id(), "loaded ideas");
    Ok(LoadOutcome::Loaded { ideas })
}

/// Write the subtree at `target` to `path`. Returns how many ideas were saved.
pub fn save_file(
    files: &dyn TextFiles,
    path: &Path,
    tree: &IdeaTree,
    target: &IdeaPath,
) -> Result<usize> {
    let mut text = tree.encode(target)?;
    text.push('\n');
    files.write_text(path, &text)?;
    let ideas = tree.get(target)?.count();
    info!(path = %path.display(), ideas, "saved ideas");
    Ok(ideas)
}

//! Text renderings of ideas: progress bars, detail cards, tree outlines.

use std::fmt::Write as _;

use crate::core::idea::Idea;
use crate::core::span::format_span;

/// Narrowest bar that still fits the `DONE!` banner.
pub const MIN_BAR_WIDTH: usize = 6;

/// `[======>       ]`, with `DONE!` stamped in the middle at 100%.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let width = width.max(MIN_BAR_WIDTH);
    let progress = progress.clamp(0.0, 1.0);
    let current = (progress * width as f64).floor() as usize;

    let mut bar: Vec<char> = (0..width)
        .map(|part| {
            if part < current {
                '='
            } else if part == current {
                '>'
            } else {
                ' '
            }
        })
        .collect();

    if progress >= 1.0 {
        bar[width - 1] = '=';
        let start = width / 2 - 2;
        for (offset, ch) in "DONE!".chars().enumerate() {
            bar[start + offset] = ch;
        }
    }

    format!("[{}]", bar.into_iter().collect::<String>())
}

/// Whole-number percentage.
pub fn percent(progress: f64) -> String {
    format!("{:.0}%", progress.clamp(0.0, 1.0) * 100.0)
}

fn tag_suffix(idea: &Idea) -> String {
    idea.tags().map(|tag| format!(" #{tag}")).collect()
}

fn time_suffix(idea: &Idea) -> String {
    let total = idea.duration();
    if total.is_zero() {
        return String::new();
    }
    format!(
        " ({} left of {})",
        format_span(idea.remaining_duration()),
        format_span(total)
    )
}

/// One outline row: bar, name, tags, time.
pub fn idea_line(idea: &Idea, width: usize) -> String {
    format!(
        "{} {}{}{}",
        progress_bar(idea.progress(), width),
        idea.name(),
        tag_suffix(idea),
        time_suffix(idea)
    )
}

/// Multi-line card for the idea currently being worked on.
pub fn idea_card(idea: &Idea, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{}: {}{}", idea.id(), idea.name(), tag_suffix(idea));
    let _ = writeln!(
        out,
        "{} {}{}",
        progress_bar(idea.progress(), width),
        percent(idea.progress()),
        time_suffix(idea)
    );
    if !idea.description().is_empty() {
        let _ = writeln!(out, "{}", idea.description());
    }
    if !idea.is_leaf() {
        let finished = idea.children().iter().filter(|c| c.is_finished()).count();
        let _ = writeln!(
            out,
            "{} parts ({} finished)",
            idea.children().len(),
            finished
        );
    }
    out
}

/// Restrict an outline to ideas carrying some (or all) of a set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub tags: Vec<String>,
    pub require_all: bool,
}

impl TagFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        let found = idea.has_tags(self.tags.as_slice());
        if self.require_all { found.all } else { found.some }
    }

    fn keeps(&self, idea: &Idea) -> bool {
        self.matches(idea) || idea.children().iter().any(|child| self.keeps(child))
    }
}

/// Indented outline of `root` and its subtree.
///
/// With a filter, a node is shown when it or a descendant matches; the root
/// is always shown.
pub fn outline(root: &Idea, width: usize, filter: &TagFilter) -> String {
    let mut out = String::new();
    outline_inner(root, width, filter, 0, &mut out);
    out
}

fn outline_inner(idea: &Idea, width: usize, filter: &TagFilter, depth: usize, out: &mut String) {
    let _ = writeln!(out, "{}{}", "  ".repeat(depth), idea_line(idea, width));
    for child in idea.children() {
        if filter.keeps(child) {
            outline_inner(child, width, filter, depth + 1, out);
        }
    }
}

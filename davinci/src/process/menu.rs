//! Numbered, keyword-invocable command menus.
//!
//! A menu is an ordered list of commands. Position 0 always holds the quit
//! command, shown as `Q` and never numbered. Words in `[brackets]` inside a
//! description double as keywords, and stay bracketed when rendered so the
//! user can see them.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::Result;
use crate::process::Status;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("keyword pattern is valid"));

const QUIT_LABEL: &str = "Q";
const QUIT_DESCRIPTION: &str = "[Quit]";

/// Lower-cased `[...]` words from a command description.
pub fn bracket_keywords(description: &str) -> Vec<String> {
    BRACKETED
        .captures_iter(description)
        .map(|caps| caps[1].trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct Command<A> {
    description: String,
    keywords: Vec<String>,
    action: A,
}

impl<A> Command<A> {
    pub fn new(description: impl Into<String>, aliases: &[&str], action: A) -> Self {
        let description = description.into();
        let mut keywords: Vec<String> = aliases.iter().map(|alias| alias.to_lowercase()).collect();
        for keyword in bracket_keywords(&description) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Self {
            description,
            keywords,
            action,
        }
    }

    fn answers_to(&self, word: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword == word)
    }
}

/// Result of matching a line against a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<A> {
    Invoke(A),
    Unrecognized(String),
}

#[derive(Debug, Clone)]
pub struct Menu<A> {
    commands: Vec<Command<A>>,
}

impl<A: Copy> Menu<A> {
    pub fn new(quit: A) -> Self {
        Self {
            commands: vec![Command::new(QUIT_DESCRIPTION, &["q"], quit)],
        }
    }

    pub fn with_command(mut self, description: impl Into<String>, aliases: &[&str], action: A) -> Self {
        self.commands.push(Command::new(description, aliases, action));
        self
    }

    /// Pick a command by menu number or keyword.
    ///
    /// `n` selects `commands[n]` for `1 <= n < len`; anything else is
    /// matched case-insensitively against keywords, first match wins.
    pub fn choose(&self, line: &str) -> Choice<A> {
        let word = line.trim().to_lowercase();
        if let Ok(n) = word.parse::<usize>() {
            if (1..self.commands.len()).contains(&n) {
                return Choice::Invoke(self.commands[n].action);
            }
        }
        self.commands
            .iter()
            .find(|command| command.answers_to(&word))
            .map(|command| Choice::Invoke(command.action))
            .unwrap_or_else(|| Choice::Unrecognized(line.trim().to_string()))
    }

    /// Numbered lines, with quit last under the `Q` label.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (n, command) in self.commands.iter().enumerate().skip(1) {
            let _ = writeln!(out, "{n}. {}", command.description);
        }
        let _ = writeln!(out, "{QUIT_LABEL}. {}", self.commands[0].description);
        out
    }
}

/// Notice shown when a line matches no command.
pub fn unrecognized_notice(line: &str) -> String {
    if line.is_empty() {
        "Pick a command by its number or its [keyword].".to_string()
    } else {
        format!("I don't know the command '{line}'. Pick a number or a [keyword].")
    }
}

/// Turn a user-facing failure into a notice and ask again.
///
/// Validation and invalid-state errors become the next screen's notice;
/// anything else propagates.
pub fn recover(result: Result<Status>, notice: &mut Option<String>) -> Result<Status> {
    match result {
        Err(err) if err.is_recoverable() => {
            *notice = Some(format!("Can't do that: {err}"));
            Ok(Status::HasOutput)
        }
        other => other,
    }
}

/// Header, optional notice, then the menu.
pub fn screen<A: Copy>(header: &str, notice: Option<String>, menu: &Menu<A>) -> String {
    let mut out = String::new();
    if let Some(notice) = notice {
        let _ = writeln!(out, "{notice}");
    }
    out.push_str(header);
    if !header.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&menu.render());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Quit,
        Done,
        Parts,
    }

    fn menu() -> Menu<Action> {
        Menu::new(Action::Quit)
            .with_command("Mark this idea [done]", &["finish"], Action::Done)
            .with_command("Work on this idea's [parts]", &[], Action::Parts)
    }

    #[test]
    fn bracketed_words_become_keywords() {
        assert_eq!(bracket_keywords("Mark this idea [done]"), vec!["done"]);
        assert_eq!(
            bracket_keywords("[Break] it, set a [Time]"),
            vec!["break", "time"]
        );
        assert!(bracket_keywords("no hotwords").is_empty());
    }

    #[test]
    fn keyword_and_number_invoke_the_same_command() {
        let menu = menu();
        assert_eq!(menu.choose("1"), Choice::Invoke(Action::Done));
        assert_eq!(menu.choose("done"), Choice::Invoke(Action::Done));
        assert_eq!(menu.choose("DONE"), Choice::Invoke(Action::Done));
        assert_eq!(menu.choose("  Finish "), Choice::Invoke(Action::Done));
        assert_eq!(menu.choose("2"), Choice::Invoke(Action::Parts));
    }

    #[test]
    fn quit_answers_to_q_and_quit_but_not_zero() {
        let menu = menu();
        assert_eq!(menu.choose("q"), Choice::Invoke(Action::Quit));
        assert_eq!(menu.choose("Quit"), Choice::Invoke(Action::Quit));
        assert_eq!(menu.choose("0"), Choice::Unrecognized("0".to_string()));
    }

    #[test]
    fn out_of_range_and_unknown_words_are_unrecognized() {
        let menu = menu();
        assert_eq!(menu.choose("3"), Choice::Unrecognized("3".to_string()));
        assert_eq!(menu.choose("dance"), Choice::Unrecognized("dance".to_string()));
    }

    #[test]
    fn render_numbers_commands_and_labels_quit() {
        assert_eq!(
            menu().render(),
            "1. Mark this idea [done]\n2. Work on this idea's [parts]\nQ. [Quit]\n"
        );
    }

    #[test]
    fn recover_turns_user_errors_into_notice() {
        let mut notice = None;
        let status = recover(Err(Error::validation("too big")), &mut notice).expect("recovered");
        assert_eq!(status, Status::HasOutput);
        assert_eq!(notice.as_deref(), Some("Can't do that: invalid value: too big"));

        let err = recover(Err(Error::parse("bad")), &mut notice).expect_err("propagates");
        assert!(matches!(err, Error::Parse(_)));
    }
}

//! Conversation-level tests driving the main menu through `run_session`.
//!
//! These exercise the process stack end to end: nested menus, auto-popping,
//! aggregation as parts finish, and save/load through a file collaborator.

use davincibot::bot::Bot;
use davincibot::core::path::IdeaPath;
use davincibot::core::tree::IdeaTree;
use davincibot::process::{MainMenuProcess, Settings, Status};
use davincibot::session::{SessionEnd, run_session};
use davincibot::test_support::{MemoryFiles, ScriptedLines};

fn converse(bot: &mut Bot, script: &[&str]) -> String {
    bot.start_process(MainMenuProcess::new()).expect("start menu");
    let mut lines = ScriptedLines::new(script.iter().copied());
    let mut out = Vec::new();
    let end = run_session(bot, &mut lines, &mut out).expect("session");
    assert_eq!(end, SessionEnd::Idle, "script should quit the menu");
    String::from_utf8(out).expect("utf8")
}

/// Add two ideas, plan one, then work through both parts.
///
/// ```text
/// root
/// ├── buy milk   (time 30m, done)
/// └── walk dog   (done)
/// ```
#[test]
fn add_plan_and_finish_every_part() {
    let mut bot = Bot::new(
        IdeaTree::new("root", ""),
        Box::new(MemoryFiles::default()),
        Settings::default(),
    );
    let transcript = converse(
        &mut bot,
        &[
            "add", "buy milk", "walk dog", "quit",
            "work", "parts",
            // buy milk: plan a time estimate, then finish it.
            "plan", "time", "30m", "q", "done",
            // walk dog
            "finish",
            // back on the root, which is now complete
            "q",
            "q",
        ],
    );

    let root = bot.tree().root();
    assert_eq!(root.children().len(), 2);
    assert!(root.is_finished());
    assert_eq!(root.duration().as_secs(), 30 * 60);
    assert!(transcript.contains("buy milk should take 30m."), "{transcript}");
    assert!(transcript.contains("DONE!"), "{transcript}");
    assert_eq!(bot.status(), Status::Idle);
}

#[test]
fn half_finished_part_shows_in_root_progress() {
    let mut bot = Bot::new(
        IdeaTree::new("root", ""),
        Box::new(MemoryFiles::default()),
        Settings::default(),
    );
    converse(&mut bot, &["add", "a", "b", "quit", "q"]);
    bot.tree_mut()
        .get_mut(&IdeaPath::root().child(0))
        .unwrap()
        .set_progress(1.0)
        .unwrap();
    bot.tree_mut()
        .get_mut(&IdeaPath::root().child(1))
        .unwrap()
        .set_progress(0.5)
        .unwrap();
    assert!((bot.tree().root().progress() - 0.75).abs() < 1e-9);

    let transcript = converse(&mut bot, &["show", "q"]);
    assert!(transcript.lines().any(|line| line.ends_with("] b")), "{transcript}");
}

#[test]
fn save_in_one_bot_load_in_another() {
    let files = MemoryFiles::default();
    let settings = Settings {
        save_path: "/home/leo/.davincibot.json".into(),
        ..Settings::default()
    };

    let mut first = Bot::new(IdeaTree::new("root", ""), Box::new(files), settings.clone());
    let transcript = converse(
        &mut first,
        &["add", "buy milk", "walk dog", "quit", "save", "", "q"],
    );
    assert!(transcript.contains("Saved 3 ideas to /home/leo/.davincibot.json."));

    let saved = first.tree().clone();
    let text = saved.encode(&IdeaPath::root()).unwrap();
    let files = MemoryFiles::default();
    files.insert("/home/leo/.davincibot.json", &text);

    let mut second = Bot::new(IdeaTree::new("root", ""), Box::new(files), settings);
    let transcript = converse(&mut second, &["load", "", "add", "feed cat", "quit", "q"]);
    assert!(transcript.contains("Loaded 3 ideas"));

    let names: Vec<&str> = second
        .tree()
        .root()
        .children()
        .iter()
        .map(|idea| idea.name())
        .collect();
    assert_eq!(names, vec!["buy milk", "walk dog", "feed cat"]);
    // New ideas continue the loaded numbering.
    assert_eq!(second.tree().root().children()[2].id(), 3);
}

#[test]
fn unknown_commands_get_an_answer() {
    let mut bot = Bot::new(
        IdeaTree::new("root", ""),
        Box::new(MemoryFiles::default()),
        Settings::default(),
    );
    let transcript = converse(&mut bot, &["dance", "42", "q"]);
    assert!(transcript.contains("I don't know the command 'dance'"));
    assert!(transcript.contains("I don't know the command '42'"));
}

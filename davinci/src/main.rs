//! `davinci`: plan and work through a tree of ideas from the terminal.
//!
//! Ideas live in one save file (`~/.davincibot.json` unless configured).
//! `davinci chat` loads it, runs the conversation on stdin/stdout, and
//! saves it again on the way out.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use davincibot::Error;
use davincibot::bot::Bot;
use davincibot::core::path::IdeaPath;
use davincibot::core::render::{TagFilter, outline};
use davincibot::core::tree::IdeaTree;
use davincibot::exit_codes;
use davincibot::io::config::{BotConfig, load_config};
use davincibot::io::files::LocalFiles;
use davincibot::io::init::{BotPaths, InitOptions, init_config};
use davincibot::io::lines::PromptedLines;
use davincibot::io::store::{LoadOutcome, load_file, save_file};
use davincibot::logging;
use davincibot::process::{MainMenuProcess, Settings};
use davincibot::session::run_session;

#[derive(Parser)]
#[command(
    name = "davinci",
    version,
    about = "Do All the Vastly Impractical Nonsense Conceivable In (short) Bursts Of Time"
)]
struct Cli {
    /// Save file to use instead of the configured one.
    #[arg(long, global = true, env = "DAVINCI_FILE")]
    file: Option<PathBuf>,

    /// Config file (default `~/.davincibot.toml`).
    #[arg(long, global = true, env = "DAVINCI_CONFIG")]
    config: Option<PathBuf>,

    /// Start from an empty tree instead of loading the save file.
    #[arg(long, global = true)]
    no_load: bool,

    /// Do not write the save file when the chat ends.
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Talk to the bot (default).
    Chat,
    /// Print the saved ideas as an outline.
    Tree {
        /// Only show ideas with this tag (repeatable). Ancestors are kept.
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Require every `--tag` instead of any of them.
        #[arg(long)]
        all: bool,
    },
    /// Write a default config file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Parse(_)) => exit_codes::CORRUPT_SAVE,
        _ => exit_codes::FAILED,
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        None | Some(Command::Chat) => cmd_chat(&cli),
        Some(Command::Tree { tags, all }) => cmd_tree(&cli, tags, *all),
        Some(Command::Init { force }) => cmd_init(&cli, *force),
    }
}

/// Config and save file locations after flags, env, and config are applied.
struct Setup {
    config: BotConfig,
    save_path: PathBuf,
}

impl Setup {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config_path = config_path(cli)?;
        let config = load_config(&config_path)?;
        let save_path = match &cli.file {
            Some(path) => path.clone(),
            None => BotPaths::from_home_dir()?.save_path_for(&config),
        };
        info!(
            config = %config_path.display(),
            save = %save_path.display(),
            "resolved paths"
        );
        Ok(Self { config, save_path })
    }

    fn fresh_tree(&self) -> IdeaTree {
        IdeaTree::new(&self.config.root_name, &self.config.root_description)
    }

    fn load_tree(&self) -> Result<IdeaTree> {
        let mut tree = self.fresh_tree();
        load_file(&LocalFiles, &self.save_path, &mut tree, &IdeaPath::root())
            .with_context(|| format!("load {}", self.save_path.display()))?;
        Ok(tree)
    }
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(BotPaths::from_home_dir()?.config_path),
    }
}

fn cmd_chat(cli: &Cli) -> Result<()> {
    let setup = Setup::resolve(cli)?;
    let tree = if setup.config.load_on_start && !cli.no_load {
        setup.load_tree()?
    } else {
        setup.fresh_tree()
    };

    let settings = Settings {
        bar_width: setup.config.progress_bar_width,
        save_path: setup.save_path.clone(),
    };
    let mut bot = Bot::new(tree, Box::new(LocalFiles), settings);
    bot.start_process(MainMenuProcess::new())?;

    let mut lines = PromptedLines::stdin();
    let mut out = io::stdout();
    let end = run_session(&mut bot, &mut lines, &mut out)?;
    info!(?end, ideas = bot.tree().len(), "chat ended");

    if setup.config.save_on_exit && !cli.no_save {
        save_file(&LocalFiles, &setup.save_path, bot.tree(), &IdeaPath::root())
            .with_context(|| format!("save {}", setup.save_path.display()))?;
    }
    Ok(())
}

fn cmd_tree(cli: &Cli, tags: &[String], all: bool) -> Result<()> {
    let setup = Setup::resolve(cli)?;
    let mut tree = setup.fresh_tree();
    let outcome = load_file(&LocalFiles, &setup.save_path, &mut tree, &IdeaPath::root())
        .with_context(|| format!("load {}", setup.save_path.display()))?;
    if outcome == LoadOutcome::Missing {
        eprintln!("no save file at {}", setup.save_path.display());
    }

    let filter = TagFilter {
        tags: tags.to_vec(),
        require_all: all,
    };
    print!(
        "{}",
        outline(tree.root(), setup.config.progress_bar_width, &filter)
    );
    Ok(())
}

fn cmd_init(cli: &Cli, force: bool) -> Result<()> {
    let path = config_path(cli)?;
    init_config(&path, &InitOptions { force })?;
    println!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_command_is_chat() {
        let cli = Cli::parse_from(["davinci"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_load);
    }

    #[test]
    fn parse_chat_flags_after_subcommand() {
        let cli = Cli::parse_from(["davinci", "chat", "--no-save", "--file", "/tmp/x.json"]);
        assert!(matches!(cli.command, Some(Command::Chat)));
        assert!(cli.no_save);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.json")));
    }

    #[test]
    fn parse_tree_tags() {
        let cli = Cli::parse_from(["davinci", "tree", "--tag", "home", "--tag", "errand", "--all"]);
        match cli.command {
            Some(Command::Tree { tags, all }) => {
                assert_eq!(tags, vec!["home", "errand"]);
                assert!(all);
            }
            _ => panic!("expected tree"),
        }
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["davinci", "init", "--force"]);
        assert!(matches!(cli.command, Some(Command::Init { force: true })));
    }

    #[test]
    fn parse_errors_map_to_corrupt_save_code() {
        let err = anyhow::Error::new(Error::parse("bad")).context("load ideas.json");
        assert_eq!(exit_code(&err), exit_codes::CORRUPT_SAVE);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), exit_codes::FAILED);
    }
}

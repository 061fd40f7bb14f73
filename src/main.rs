//! svnlens - typed views over Subversion output
//!
//! Binary entry point. Runs svn, parses its output and prints a plain-text
//! rendering of the result.

use std::path::{Path, PathBuf};

use clap::{Parser as _, Subcommand};
use color_eyre::eyre::{Result, bail};
use tracing_subscriber::EnvFilter;

use svnlens::config::Config;
use svnlens::model::{DiffLineKind, FileStatus, NodeKind};
use svnlens::state::{self, Status};
use svnlens::svn::constants::SVN_COMMAND;
use svnlens::svn::parser::{Parser, infer_node_kind};
use svnlens::tree;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SVNLENS_LOG";

/// svnlens - inspect a Subversion working copy
#[derive(clap::Parser, Debug)]
#[command(name = "svnlens", version, about, long_about = None)]
struct Cli {
    /// Working copy to operate on
    #[arg(short = 'C', long = "working-copy", env = "SVNLENS_WC")]
    working_copy: Option<PathBuf>,

    /// svn binary to run
    #[arg(long = "svn", env = "SVNLENS_SVN", default_value = SVN_COMMAND)]
    svn_command: String,

    /// Parse plain-text output instead of --xml
    #[arg(long)]
    text: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show working-copy status
    Status {
        /// Render as a directory tree
        #[arg(long)]
        tree: bool,
        /// Check the repository for newer revisions
        #[arg(short = 'u', long = "show-updates")]
        show_updates: bool,
        /// Only list items with local changes
        #[arg(long)]
        changed: bool,
    },
    /// Show revision history
    Log {
        target: Option<String>,
        /// Maximum number of entries
        #[arg(short = 'l', long = "limit", env = "SVNLENS_LOG_LIMIT")]
        limit: Option<u32>,
    },
    /// Show local changes
    Diff { target: Option<String> },
    /// Show item details
    Info { target: Option<String> },
    /// List repository entries
    List { target: Option<String> },
    /// Show the actions available for a file status
    Actions {
        /// Status word, e.g. "modified"
        status: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config {
        svn_command: cli.svn_command,
        working_copy: cli.working_copy,
        structured: !cli.text,
        ..Config::default()
    };

    match cli.command {
        Command::Status {
            tree,
            show_updates,
            changed,
        } => status(&config, tree, show_updates, changed),
        Command::Log { target, limit } => {
            config.log_limit = limit;
            log(&config, target.as_deref())
        }
        Command::Diff { target } => diff(&config, target.as_deref()),
        Command::Info { target } => info(&config, target.as_deref()),
        Command::List { target } => list(&config, target.as_deref()),
        Command::Actions { status } => actions(&status),
    }
}

fn status(config: &Config, as_tree: bool, show_updates: bool, changed_only: bool) -> Result<()> {
    let root = config.root();
    let raw = config.executor().status_raw(config.structured, show_updates)?;
    let mut flat = if config.structured {
        resolve_kinds(Parser::parse_status_xml(&raw), &root)
    } else {
        Parser::parse_status_text_in(&raw, &root)
    };
    if changed_only {
        flat.retain(FileStatus::is_changed);
    }

    if as_tree {
        print!("{}", tree::outline(&tree::build(&flat, &root)));
        return Ok(());
    }

    for file in &flat {
        let out_of_date = if file.repository_status.as_char() == ' ' {
            ' '
        } else {
            '*'
        };
        println!(
            "{}{}{} {}",
            file.working_copy_status.as_char(),
            file.property_status.as_char(),
            out_of_date,
            file.path
        );
    }
    Ok(())
}

/// XML status carries no node kind, so ask the filesystem
fn resolve_kinds(mut flat: Vec<FileStatus>, root: &Path) -> Vec<FileStatus> {
    for file in &mut flat {
        if file.node_kind == NodeKind::Unknown {
            file.node_kind = infer_node_kind(&file.path, Some(root));
        }
    }
    flat
}

fn log(config: &Config, target: Option<&str>) -> Result<()> {
    let raw = config
        .executor()
        .log_raw(target, config.log_limit, config.structured)?;
    let entries = if config.structured {
        Parser::parse_log_xml(&raw)
    } else {
        Parser::parse_log_text(&raw)
    };

    for entry in &entries {
        println!(
            "r{} | {} | {} | {}",
            entry.revision,
            entry.author,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.display_summary()
        );
        for changed in &entry.changed_paths {
            match &changed.copy_source {
                Some((from, rev)) => println!(
                    "   {} {} (from {}:{})",
                    changed.action.as_char(),
                    changed.path,
                    from,
                    rev
                ),
                None => println!("   {} {}", changed.action.as_char(), changed.path),
            }
        }
    }
    Ok(())
}

fn diff(config: &Config, target: Option<&str>) -> Result<()> {
    let raw = config.executor().diff_raw(target)?;
    let result = Parser::parse_diff(&raw);

    if let Some(message) = &result.binary_message {
        println!("{message}");
        return Ok(());
    }

    let number = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
    for line in &result.lines {
        let marker = match line.kind {
            DiffLineKind::Addition => "+",
            DiffLineKind::Deletion => "-",
            DiffLineKind::Context => " ",
            DiffLineKind::Header | DiffLineKind::HunkHeader => {
                println!("{}", line.content);
                continue;
            }
        };
        println!(
            "{:>5} {:>5} {}{}",
            number(line.original_line_no),
            number(line.modified_line_no),
            marker,
            line.content
        );
    }
    if result.has_changes() {
        println!(
            "{} insertion(s)(+), {} deletion(s)(-)",
            result.count(DiffLineKind::Addition),
            result.count(DiffLineKind::Deletion)
        );
    }
    Ok(())
}

fn info(config: &Config, target: Option<&str>) -> Result<()> {
    let raw = config.executor().info_raw(target, config.structured)?;
    let info = if config.structured {
        Parser::parse_info_xml(&raw)
    } else {
        Parser::parse_info_text(&raw)
    };

    println!("Path: {}", info.path);
    println!("URL: {}", info.url);
    println!("Repository Root: {}", info.repository_root_url);
    println!("Revision: {}", info.revision);
    println!("Node Kind: {:?}", info.node_kind);
    println!("Last Changed Author: {}", info.last_changed_author);
    println!("Last Changed Rev: {}", info.last_changed_revision);
    if let Some(date) = info.last_changed_date {
        println!("Last Changed Date: {}", date.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(lock) = &info.lock {
        println!("Lock Owner: {}", lock.owner);
    }
    if let Some(tree_conflict) = &info.tree_conflict {
        println!("Tree conflict: {tree_conflict}");
    }
    Ok(())
}

fn list(config: &Config, target: Option<&str>) -> Result<()> {
    let raw = config.executor().list_raw(target, config.structured)?;
    let entries = if config.structured {
        Parser::parse_list_xml(&raw)
    } else {
        Parser::parse_list_text(&raw)
    };

    for entry in &entries {
        let suffix = if entry.node_kind.is_dir() { "/" } else { "" };
        let revision = entry.revision.map(|r| r.to_string()).unwrap_or_default();
        let size = entry.size.map(|s| s.to_string()).unwrap_or_default();
        println!(
            "{:>7} {:<12} {:>9} {}{}",
            revision,
            entry.author.as_deref().unwrap_or(""),
            size,
            entry.name,
            suffix
        );
    }
    Ok(())
}

fn actions(word: &str) -> Result<()> {
    let Some(status) = Status::ALL
        .into_iter()
        .find(|s| s.label().eq_ignore_ascii_case(word.trim()))
    else {
        bail!("unknown status: {word}");
    };

    let valid: Vec<String> = state::valid_actions(status)
        .iter()
        .map(|action| match state::next_state(status, action) {
            Some(next) => format!("{action} -> {next}"),
            None => action.to_string(),
        })
        .collect();
    println!("{status}:");
    for line in &valid {
        println!("  {line}");
    }
    match state::recommended_action(status) {
        Some(action) => println!("recommended: {action}"),
        None => println!("recommended: none"),
    }
    Ok(())
}

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use taskdeck::commands::*;
use taskdeck::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Simple terminal task tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        description: String,
        /// Priority: high, medium or low
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Category, e.g. work or groceries
        #[arg(short, long)]
        category: String,
        /// Due date as "YYYY-MM-DD HH:MM" or YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Initial notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List tasks, optionally searched and filtered
    List {
        /// Search text matched against descriptions and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
        /// Only this priority (HIGH, MEDIUM or LOW)
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Toggle a task's completed flag
    Done {
        /// Position from `list`
        pos: usize,
    },
    /// Remove a task
    Remove {
        /// Position from `list`
        pos: usize,
    },
    /// Overwrite a task's notes
    Notes {
        /// Position from `list`
        pos: usize,
        /// The new notes text
        text: String,
    },
    /// Sort tasks (incomplete first, then due date, priority, category, name)
    Sort,
    /// Show task statistics
    Stats,
    /// List the categories currently in use
    Categories,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { description, priority, category, due, notes }) => {
            cmd_add(description, priority, category, due, notes, false)
        }
        Some(Commands::List { search, category, priority }) => cmd_list(search, category, priority),
        Some(Commands::Done { pos }) => cmd_toggle(pos, false),
        Some(Commands::Remove { pos }) => cmd_remove(pos, false),
        Some(Commands::Notes { pos, text }) => cmd_notes(pos, text, false),
        Some(Commands::Sort) => cmd_sort(false),
        Some(Commands::Stats) => cmd_stats(),
        Some(Commands::Categories) => cmd_categories(),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskdeck", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}

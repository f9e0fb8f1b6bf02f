//! # taskdeck
//!
//! A single-user terminal task tracker. taskdeck combines a fast CLI for quick
//! entry with an interactive TUI for working through the list.
//!
//! ## Features
//!
//! *   **Tasks with texture**: description, priority (HIGH/MEDIUM/LOW),
//!     category, optional due date and free-form notes.
//! *   **Search & filters**: case-insensitive search over descriptions and
//!     notes, plus exact category and priority filters.
//! *   **Dual interface**:
//!     *   **CLI**: scriptable single commands.
//!     *   **TUI**: interactive table with search, filters, notes editing and
//!         a light/dark theme toggle.
//! *   **Statistics**: total / completed / pending / high-priority counts.
//! *   **Data persistence**: the whole list is stored as JSON in the standard
//!     XDG data directory and reloaded on start.
//!
//! ## Usage
//!
//! ### Interactive mode (TUI)
//!
//! Run without arguments to open the interactive UI:
//!
//! ```bash
//! taskdeck
//! # or explicitly
//! taskdeck ui
//! ```
//!
//! #### TUI key bindings
//!
//! *   `q`: quit (saves on exit)
//! *   `a`: add task (description → priority → category → due date)
//! *   `Space`: toggle completed
//! *   `d`: delete selected task
//! *   `n`: edit notes of the selected task
//! *   `/`: search as you type (`Esc` clears)
//! *   `c`: cycle category filter, `p`: cycle priority filter
//! *   `s`: sort tasks
//! *   `m`: toggle dark mode
//!
//! ### Command line interface (CLI)
//!
//! ```bash
//! # Add tasks
//! taskdeck add "Buy milk" --priority high --category groceries
//! taskdeck add "Write report" -p medium -c work --due "2025-12-01 09:00"
//!
//! # List, searched and filtered
//! taskdeck list
//! taskdeck list --search milk --category Groceries --priority HIGH
//!
//! # Operate on list positions
//! taskdeck done 2
//! taskdeck notes 2 "waiting on review"
//! taskdeck remove 2
//!
//! # Order and aggregate
//! taskdeck sort
//! taskdeck stats
//! taskdeck categories
//! ```
//!
//! ## Data storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/taskdeck/tasks.json`
//! *   macOS: `~/Library/Application Support/taskdeck/tasks.json`
//! *   Windows: `%APPDATA%\taskdeck\tasks.json`
//!
//! Override with the `TASKDECK_DB` environment variable.
//!
//! ## Sorting
//!
//! `sort` orders incomplete tasks before completed ones, earlier due dates
//! first when both tasks have one, then priority, category and description by
//! name. Priority compares by its upper-case name, so HIGH sorts before LOW
//! before MEDIUM.

pub mod commands;
pub mod error;
pub mod filter;
pub mod models;
pub mod stats;
pub mod store;
pub mod tui;

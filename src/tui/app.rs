use ratatui::widgets::TableState;

use crate::commands::parse_due;
use crate::filter::Filters;
use crate::models::Priority;
use crate::stats::Stats;
use crate::store::TaskStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    EditingNotes,
    Searching,
}

/// Steps of the "Add Task" wizard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddStep {
    Description,
    Priority,
    Category,
    Due,
}

/// Partial data collected while the "Add Task" wizard runs. Nothing reaches
/// the store until the final step validates.
#[derive(Default)]
pub struct AddState {
    pub description: String,
    pub priority: String,
    pub category: String,
}

impl AddState {
    fn new() -> AddState {
        AddState::default()
    }
}

/// Presentation-side color scheme. The core never sees this; it is purely a
/// property of the terminal front end.
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }
}

pub struct App {
    pub store: TaskStore,
    pub filters: Filters,
    /// Store indices of the rows currently visible, in store order. Keeping
    /// indices (not copies) means a selection always maps back to the right
    /// task even while filters are active.
    pub visible: Vec<usize>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub add_step: AddStep,
    pub add_state: AddState,
    pub input_buffer: String,
    pub theme: Theme,
    /// One-line feedback shown in the help area: validation errors, load/save
    /// warnings. Cleared by the next successful action.
    pub status: Option<String>,
}

impl App {
    /// Creates the app and loads the task database. A load failure is
    /// reported in the status line and leaves an empty, usable store.
    pub fn new() -> App {
        let mut store = TaskStore::new();
        let status = store.load().err().map(|e| format!("Could not load tasks: {}", e));

        let mut app = App {
            store,
            filters: Filters::new(),
            visible: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            add_step: AddStep::Description,
            add_state: AddState::new(),
            input_buffer: String::new(),
            theme: Theme { dark: false },
            status,
        };
        app.refresh();
        app
    }

    /// Recomputes the visible rows from the current store contents and
    /// filters, clamping the selection.
    pub fn refresh(&mut self) {
        self.visible = self
            .filters
            .apply_indexed(self.store.tasks())
            .into_iter()
            .map(|(i, _)| i)
            .collect();

        if self.visible.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.visible.len() {
                self.state.select(Some(self.visible.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::of(self.store.tasks())
    }

    /// Store index of the selected row, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected().and_then(|i| self.visible.get(i)).copied()
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            if let Err(e) = self.store.toggle_complete(index) {
                self.status = Some(e.to_string());
            } else {
                self.status = None;
            }
            self.refresh();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            match self.store.remove(index) {
                Ok(task) => self.status = Some(format!("Removed {}", task)),
                Err(e) => self.status = Some(e.to_string()),
            }
            self.refresh();
        }
    }

    pub fn sort_tasks(&mut self) {
        self.store.sort();
        self.status = None;
        self.refresh();
    }

    /// Cycles the category filter: All -> each known category -> All.
    pub fn cycle_category_filter(&mut self) {
        let categories = self.store.distinct_categories();
        self.filters.category = match &self.filters.category {
            None => categories.first().cloned(),
            Some(current) => {
                let pos = categories.iter().position(|c| c == current);
                match pos {
                    Some(i) if i + 1 < categories.len() => Some(categories[i + 1].clone()),
                    _ => None,
                }
            }
        };
        self.refresh();
    }

    /// Cycles the priority filter: All -> HIGH -> MEDIUM -> LOW -> All.
    pub fn cycle_priority_filter(&mut self) {
        self.filters.priority = match self.filters.priority {
            None => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::Low),
            Some(Priority::Low) => None,
        };
        self.refresh();
    }

    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_step = AddStep::Description;
        self.add_state = AddState::new();
        self.input_buffer.clear();
        self.status = None;
    }

    pub fn start_notes(&mut self) {
        if let Some(index) = self.selected_index() {
            self.input_mode = InputMode::EditingNotes;
            self.input_buffer = self
                .store
                .get(index)
                .map(|t| t.notes.clone())
                .unwrap_or_default();
        }
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
        self.input_buffer = self.filters.search.clone();
    }

    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Searching {
            self.filters.search.clear();
            self.refresh();
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Live-updates the search filter while typing.
    pub fn search_changed(&mut self) {
        self.filters.search = self.input_buffer.clone();
        self.refresh();
    }

    /// Handles Enter in the current input mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::EditingNotes => self.handle_notes_input(),
            InputMode::Searching => {
                // keep the search active, leave input mode
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            InputMode::Normal => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_step {
            AddStep::Description => {
                if !self.input_buffer.is_empty() {
                    self.add_state.description = self.input_buffer.clone();
                    self.add_step = AddStep::Priority;
                    self.input_buffer.clear();
                }
            }
            AddStep::Priority => {
                let raw = if self.input_buffer.is_empty() {
                    "medium".to_string()
                } else {
                    self.input_buffer.clone()
                };
                if raw.parse::<Priority>().is_err() {
                    self.status = Some("Priority must be HIGH, MEDIUM or LOW".into());
                    return;
                }
                self.add_state.priority = raw;
                self.add_step = AddStep::Category;
                self.input_buffer.clear();
                self.status = None;
            }
            AddStep::Category => {
                if !self.input_buffer.is_empty() {
                    self.add_state.category = self.input_buffer.clone();
                    self.add_step = AddStep::Due;
                    self.input_buffer.clear();
                }
            }
            AddStep::Due => {
                let due = if self.input_buffer.is_empty() {
                    None
                } else {
                    match parse_due(&self.input_buffer) {
                        Ok(d) => Some(d),
                        Err(e) => {
                            self.status = Some(e.to_string());
                            return;
                        }
                    }
                };
                match self.store.add_task(
                    &self.add_state.description,
                    &self.add_state.priority,
                    &self.add_state.category,
                    due,
                ) {
                    Ok(task) => self.status = Some(format!("Added {}", task)),
                    Err(e) => self.status = Some(e.to_string()),
                }
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.refresh();
            }
        }
    }

    fn handle_notes_input(&mut self) {
        if let Some(index) = self.selected_index() {
            if let Err(e) = self.store.set_notes(index, &self.input_buffer) {
                self.status = Some(e.to_string());
            } else {
                self.status = None;
            }
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.refresh();
    }

    /// Persists the store. Called on quit; a failure is reported but never
    /// aborts the session.
    pub fn save(&mut self) {
        if let Err(e) = self.store.save() {
            self.status = Some(format!("Could not save tasks: {}", e));
        }
    }
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{AddStep, App, InputMode, Theme};
use crate::models::{CategoryColor, Priority, DUE_FORMAT};

impl Theme {
    pub fn bg(&self) -> Color {
        if self.dark { Color::Rgb(43, 43, 43) } else { Color::White }
    }

    pub fn fg(&self) -> Color {
        if self.dark { Color::White } else { Color::Black }
    }

    pub fn panel_bg(&self) -> Color {
        if self.dark { Color::Rgb(60, 60, 60) } else { Color::White }
    }
}

fn tint(color: CategoryColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let base = Style::default().bg(app.theme.bg()).fg(app.theme.fg());
    f.render_widget(Block::default().style(base), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search + filters
            Constraint::Min(0),    // table + stats
            Constraint::Length(6), // notes of selected task
            Constraint::Length(3), // help / status
        ])
        .split(f.area());

    render_filter_bar(f, app, chunks[0], base);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(chunks[1]);

    render_task_table(f, app, middle[0], base);
    render_stats_panel(f, app, middle[1], base);
    render_notes_panel(f, app, chunks[2], base);
    render_help(f, app, chunks[3], base);

    if matches!(app.input_mode, InputMode::Adding | InputMode::EditingNotes) {
        render_input_popup(f, app, base);
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let category = app.filters.category.as_deref().unwrap_or("All");
    let priority = app
        .filters
        .priority
        .map(|p| p.as_str())
        .unwrap_or("All");
    let search = if app.filters.search.is_empty() {
        "-".to_string()
    } else {
        app.filters.search.clone()
    };
    let text = format!(
        "Search: {}    Category: {}    Priority: {}",
        search, category, priority
    );
    let style = if app.input_mode == InputMode::Searching {
        base.fg(Color::Yellow)
    } else {
        base
    };
    let bar = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    f.render_widget(bar, area);
}

fn render_task_table(f: &mut Frame, app: &mut App, area: Rect, base: Style) {
    let rows: Vec<Row> = app
        .visible
        .iter()
        .filter_map(|&i| app.store.tasks().get(i))
        .map(|t| {
            let priority_color = match t.priority {
                Priority::High => Color::Red,
                Priority::Medium => Color::Yellow,
                Priority::Low => Color::Green,
            };
            let row_style = if t.completed {
                base.fg(Color::DarkGray)
            } else {
                base
            };
            let due = t
                .due_date
                .map(|d| d.format(DUE_FORMAT).to_string())
                .unwrap_or_default();
            let notes_preview: String = t.notes.chars().take(24).collect();

            Row::new(vec![
                Cell::from(if t.completed { "✓" } else { "" }),
                Cell::from(t.priority.as_str()).style(Style::default().fg(priority_color)),
                Cell::from(t.description.clone()),
                Cell::from(t.category.clone())
                    .style(Style::default().fg(tint(t.category_color))),
                Cell::from(due),
                Cell::from(notes_preview),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(17),
        Constraint::Length(26),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Priority", "Description", "Category", "Due", "Notes"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("Taskdeck - Tasks"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_stats_panel(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let stats = app.stats();
    let lines = vec![
        Line::from(format!("Total:     {}", stats.total)),
        Line::from(format!("Completed: {}", stats.completed)),
        Line::from(format!("Pending:   {}", stats.pending)),
        Line::from(format!("High Prio: {}", stats.high_priority)),
    ];
    let panel = Paragraph::new(lines)
        .style(base)
        .block(Block::default().borders(Borders::ALL).title("Statistics"));
    f.render_widget(panel, area);
}

fn render_notes_panel(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let notes = app
        .selected_index()
        .and_then(|i| app.store.get(i).ok())
        .map(|t| t.notes.clone())
        .unwrap_or_default();
    let panel = Paragraph::new(notes)
        .style(base)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Task Notes"));
    f.render_widget(panel, area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect, base: Style) {
    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | a: Add | Space: Toggle Done | d: Del | n: Notes | /: Search | c: Category | p: Priority | s: Sort | m: Dark Mode"
        }
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::EditingNotes => "Enter: Save Notes | Esc: Cancel",
        InputMode::Searching => "Type to search | Enter: Keep | Esc: Clear",
    };
    let text = match &app.status {
        Some(status) => format!("{}\n{}", status, help_text),
        None => help_text.to_string(),
    };
    let help = Paragraph::new(text)
        .style(base.fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn render_input_popup(f: &mut Frame, app: &App, base: Style) {
    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);

    let title = match app.input_mode {
        InputMode::Adding => match app.add_step {
            AddStep::Description => "Add Task: Enter Description",
            AddStep::Priority => "Add Task: Enter Priority (HIGH/MEDIUM/LOW, default MEDIUM)",
            AddStep::Category => "Add Task: Enter Category",
            AddStep::Due => "Add Task: Enter Due Date (YYYY-MM-DD [HH:MM], Optional)",
        },
        InputMode::EditingNotes => "Edit Notes",
        _ => "",
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(base.fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

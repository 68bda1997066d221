use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};
use taskdeck_core::{CategoryRepository, DueStatus, Filter, Priority, TaskRepository};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, PRIORITY_ENTRIES, VIEW_ENTRIES};

pub fn draw<T: TaskRepository, C: CategoryRepository>(f: &mut Frame, app: &mut App<T, C>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input line
            Constraint::Length(1), // Footer / notice
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(main_chunks[1]);

    draw_sidebar(f, app, content_chunks[0]);
    draw_task_table(f, app, content_chunks[1]);
    draw_input(f, app, main_chunks[2]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_header<T: TaskRepository, C: CategoryRepository>(
    f: &mut Frame,
    app: &App<T, C>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(10)])
        .split(area);

    let title = Paragraph::new("TASKDECK")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(title, chunks[0]);

    let counts = &app.view.counts;
    let ratio = if counts.total == 0 {
        0.0
    } else {
        counts.completed as f64 / counts.total as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!("{}/{} done", counts.completed, counts.total));
    f.render_widget(gauge, chunks[1]);
}

fn draw_sidebar<T: TaskRepository, C: CategoryRepository>(
    f: &mut Frame,
    app: &App<T, C>,
    area: Rect,
) {
    let section = |name: &str| {
        Line::from(Span::styled(
            name.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = Vec::new();
    for (i, (label, filter)) in app.sidebar_entries().into_iter().enumerate() {
        if i == 0 {
            lines.push(section("VIEWS"));
        } else if i == VIEW_ENTRIES {
            lines.push(Line::from(""));
            lines.push(section("PRIORITY"));
        } else if i == VIEW_ENTRIES + PRIORITY_ENTRIES {
            lines.push(Line::from(""));
            lines.push(section("CATEGORIES"));
        }

        let active = filter == app.filter;
        let row_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = Vec::new();
        match &filter {
            Filter::Priority(priority) => {
                spans.push(Span::styled("● ", Style::default().fg(priority_color(*priority))));
            }
            Filter::Category(id) => {
                let color = app
                    .view
                    .categories
                    .iter()
                    .find(|c| c.id == *id)
                    .map(|c| hex_color(&c.color))
                    .unwrap_or(Color::White);
                spans.push(Span::styled("● ", Style::default().fg(color)));
            }
            _ => spans.push(Span::raw("  ")),
        }
        spans.push(Span::styled(label, row_style));
        if let Some(count) = app.view.counts.get(&filter) {
            spans.push(Span::styled(
                format!(" {count}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(sidebar, area);
}

fn draw_task_table<T: TaskRepository, C: CategoryRepository>(
    f: &mut Frame,
    app: &mut App<T, C>,
    area: Rect,
) {
    let rows: Vec<Row> = app
        .view
        .tasks
        .iter()
        .map(|dto| {
            let task = &dto.task;
            let status_icon = if task.completed { "✔" } else { "☐" };

            let pri_str = match task.priority {
                Priority::High => "H",
                Priority::Medium => "M",
                Priority::Low => "L",
            };

            let due_span = match (task.due_date, dto.due_status) {
                (None, _) => Span::raw("-".to_string()),
                (Some(_), Some(DueStatus::Today)) => {
                    Span::styled("today".to_string(), Style::default().fg(Color::Yellow))
                }
                (Some(due), Some(DueStatus::Overdue)) => Span::styled(
                    format!("{} !", due.format("%m-%d")),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                (Some(due), _) => Span::raw(due.format("%m-%d").to_string()),
            };

            let title_style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            Row::new(vec![
                Span::raw(status_icon.to_string()),
                Span::styled(pri_str, Style::default().fg(priority_color(task.priority))),
                due_span,
                Span::raw(dto.category_name().to_string()),
                Span::styled(task.title.clone(), title_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Priority
            Constraint::Length(10), // Due
            Constraint::Length(12), // Category
            Constraint::Min(10),    // Title
        ],
    )
    .header(Row::new(vec!["St", "Pr", "Due", "Category", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(format!(" {} ", filter_title(app)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input<T: TaskRepository, C: CategoryRepository>(
    f: &mut Frame,
    app: &App<T, C>,
    area: Rect,
) {
    let (title, hint) = match app.input_mode {
        InputMode::Adding => (" Add task ", "title due:tomorrow cat:Work pri:high"),
        InputMode::Editing => (" Edit task ", "new title and/or key:value tokens"),
        InputMode::Searching => (" Search ", "text to match against title and notes"),
        InputMode::Normal => (" Quick add ", "press a to add, e to edit, / to search"),
    };

    let text = if matches!(app.input_mode, InputMode::Normal) || app.input.is_empty() {
        Span::styled(hint, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let byte_index: usize = app
            .input
            .chars()
            .take(app.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        let x = area.x + 1 + app.input[..byte_index].width() as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_footer<T: TaskRepository, C: CategoryRepository>(
    f: &mut Frame,
    app: &App<T, C>,
    area: Rect,
) {
    let footer = match &app.notice {
        Some(notice) => Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center),
        None => Paragraph::new("j/k: Navigate | Tab: Filter | Space: Toggle | d: Delete | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
    };
    f.render_widget(footer, area);
}

fn filter_title<T: TaskRepository, C: CategoryRepository>(app: &App<T, C>) -> String {
    match &app.filter {
        Filter::All => "All Tasks".to_string(),
        Filter::Today => "Due Today".to_string(),
        Filter::Upcoming => "Upcoming".to_string(),
        Filter::Overdue => "Overdue".to_string(),
        Filter::Completed => "Completed".to_string(),
        Filter::Priority(priority) => format!("{} Priority", priority_label(*priority)),
        Filter::Category(id) => app
            .view
            .categories
            .iter()
            .find(|c| c.id == *id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Category".to_string()),
        Filter::Search(text) => format!("Search: {text}"),
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::White
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use todomaster_core::{IdGenerator, NoticeLevel, Priority};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};
use crate::tui::form::FormField;

pub fn draw<G: IdGenerator>(f: &mut Frame, app: &mut App<G>) {
    let size = f.area();

    // Header and Main Content Split
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "TodoMaster",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your personal task manager",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    // Split Content into Left (List) and Right (Detail)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(main_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);

    // Footer
    let hint = match app.input_mode {
        InputMode::Normal => "a: Add | e/Enter: Edit | d: Delete | j/k: Navigate | q: Quit",
        InputMode::Form => "Tab: Next field | ←/→: Priority | Enter: Submit | Esc: Cancel",
    };
    let footer = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    if let InputMode::Form = app.input_mode {
        draw_form(f, app);
    }

    if let Some(toast) = app.toasts.current() {
        draw_toast(f, &toast.notice.message, toast.notice.level);
    }
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

fn draw_task_list<G: IdGenerator>(f: &mut Frame, app: &mut App<G>, area: Rect) {
    let rows: Vec<Row> = app.tasks.iter().map(|task| {
        let pri_str = match task.priority {
            Priority::High => "H",
            Priority::Medium => "M",
            Priority::Low => "L",
        };

        Row::new(vec![
            Span::styled(pri_str, priority_style(task.priority)),
            Span::raw(task.due_date.format("%Y-%m-%d").to_string()),
            Span::styled(task.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Priority
            Constraint::Length(11), // Due
            Constraint::Min(10),    // Name
        ]
    )
    .header(Row::new(vec!["Pr", "Due", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view<G: IdGenerator>(f: &mut Frame, app: &App<G>, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(task) = app.selected() else {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Blue)),
            Span::styled(&task.name, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Due Date: ", Style::default().fg(Color::Blue)),
            Span::raw(&task.due_display),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Blue)),
            Span::styled(task.priority.label(), priority_style(task.priority)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Description:", Style::default().fg(Color::Blue))),
        Line::from(task.description.as_str()),
    ];

    let detail_block = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(detail_block, area);
}

fn center(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_form<G: IdGenerator>(f: &mut Frame, app: &App<G>) {
    let area = center(f.area(), 60, 12);
    f.render_widget(Clear, area);

    let title = if app.is_editing() { " Edit Task " } else { " Add Task " };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let draft = app.store.draft();
    let label_width = FormField::ORDER
        .iter()
        .map(|field| field.label().width())
        .max()
        .unwrap_or(0) as u16
        + 2;

    let mut constraints = vec![Constraint::Length(1)];
    for _ in FormField::ORDER {
        constraints.push(Constraint::Length(2));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::ORDER.iter().enumerate() {
        let focused = app.form.focus == *field;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value = match field {
            FormField::Name => Span::raw(draft.name.as_str()),
            FormField::Description => Span::raw(draft.description.as_str()),
            FormField::DueDate => Span::raw(app.form.due_input.as_str()),
            FormField::Priority => Span::styled(
                format!("◀ {} ▶", draft.priority.label()),
                priority_style(draft.priority),
            ),
        };

        let line = Line::from(vec![
            Span::styled(format!(" {:<width$}", field.label(), width = label_width as usize - 1), label_style),
            value,
        ]);
        let row = rows[i + 1];
        f.render_widget(Paragraph::new(line), row);

        if focused && field.is_text() {
            let text = app.form.text(draft).unwrap_or("");
            let before: String = text.chars().take(app.form.cursor).collect();
            let x = row.x + label_width + before.width() as u16;
            f.set_cursor_position((x.min(row.right().saturating_sub(1)), row.y));
        }
    }
}

fn draw_toast(f: &mut Frame, message: &str, level: NoticeLevel) {
    let area = f.area();
    let width = (message.width() as u16 + 6).min(area.width.saturating_sub(4));
    let height = 3;
    if area.height < height + 4 || width == 0 {
        return;
    }
    let toast_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height - height - 2,
        width,
        height,
    );

    let color = match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    };

    f.render_widget(Clear, toast_area);
    let toast = Paragraph::new(message)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(toast, toast_area);
}

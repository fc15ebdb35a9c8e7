pub mod app;
pub mod form;
pub mod toast;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use todomaster_core::IdGenerator;

use crate::tui::app::{App, InputMode};

pub fn run<G: IdGenerator>(mut app: App<G>, tick: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("tui started");
    let res = run_app(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "tui exited with error");
    }
    res.map_err(Into::into)
}

fn run_app<B: Backend, G: IdGenerator>(
    terminal: &mut Terminal<B>,
    app: &mut App<G>,
    tick: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, key) {
                    return Ok(());
                }
            }
        }
        app.toasts.update();
    }
}

/// Returns false when the user asked to quit.
fn handle_key<G: IdGenerator>(app: &mut App<G>, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => {
            match key.code {
                KeyCode::Char('q') => return false,
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('a') => app.enter_add_mode(),
                KeyCode::Char('e') | KeyCode::Enter => app.enter_edit_mode(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_task(),
                _ => {}
            }
        },
        InputMode::Form => {
            match key.code {
                KeyCode::Enter => app.submit_form(),
                KeyCode::Esc => app.cancel_form(),
                KeyCode::Tab | KeyCode::Down => app.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_field(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_left(),
                KeyCode::Right => app.move_right(),
                _ => {}
            }
        }
    }
    true
}

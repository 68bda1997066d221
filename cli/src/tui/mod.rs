pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskdeck_core::{CategoryRepository, CategoryService, TaskRepository, TaskService};

use crate::tui::app::{App, InputMode};

pub fn run<T: TaskRepository, C: CategoryRepository>(
    tasks: TaskService<T>,
    categories: CategoryService<C>,
) -> Result<()> {
    // Build the app before touching the terminal so a failing store prints
    // a plain error instead of garbling the screen.
    let mut app = App::new(tasks, categories)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend, T: TaskRepository, C: CategoryRepository>(
    terminal: &mut Terminal<B>,
    app: &mut App<T, C>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('a') => app.enter_add_mode(),
                        KeyCode::Char('e') => app.enter_edit_mode(),
                        KeyCode::Char('/') => app.enter_search_mode(),
                        KeyCode::Tab | KeyCode::Char('l') => app.next_filter(),
                        KeyCode::BackTab | KeyCode::Char('h') => app.previous_filter(),
                        KeyCode::Char('c') => app.clear_filter(),
                        KeyCode::Char('r') => app.refresh(),
                        KeyCode::Esc => app.notice = None,
                        _ => {}
                    },
                    InputMode::Adding | InputMode::Editing | InputMode::Searching => {
                        match key.code {
                            KeyCode::Enter => app.submit_command(),
                            KeyCode::Esc => app.exit_input_mode(),
                            KeyCode::Char(c) => app.input_char(c),
                            KeyCode::Backspace => app.delete_char(),
                            KeyCode::Left => app.move_cursor_left(),
                            KeyCode::Right => app.move_cursor_right(),
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

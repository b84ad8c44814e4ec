use crossterm::event::KeyCode;

use crate::app::App;

/// Work the event loop has to do on behalf of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reload,
}

pub fn handle_input(app: &mut App, key: KeyCode) -> Option<Command> {
    if app.show_help {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?' | 'q')
        ) {
            app.show_help = false;
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected();
        }
        KeyCode::Char('r') if !app.loading => return Some(Command::Reload),
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = true,
        _ => {}
    }

    None
}

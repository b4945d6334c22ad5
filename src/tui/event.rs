use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::time::Duration;

use super::App;

pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // ── Recent-activity modal intercepts all keys while open ──────────
    if app.show_recent {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('7')) {
            app.show_recent = false;
        }
        return;
    }

    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        _ => {}
    }

    match code {
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(7),
        KeyCode::PageUp | KeyCode::Char('p') => app.shift_month(-1),
        KeyCode::PageDown | KeyCode::Char('n') => app.shift_month(1),
        KeyCode::Char('t') => app.jump_to_today(),
        KeyCode::Char('7') => app.toggle_recent(),
        _ => {}
    }
}

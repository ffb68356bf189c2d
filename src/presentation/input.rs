use std::time::Instant;

use crate::application::{App, AppMode, Screen};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        let now = Instant::now();
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers, now),
            AppMode::Search => Self::handle_search_mode(app, key, now),
            AppMode::Filter => Self::handle_filter_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            // Ctrl+C is handled by the main loop
            return;
        }

        match key {
            KeyCode::Char('1') => app.show_employees(),
            KeyCode::Char('2') => app.show_bookmarks(),
            KeyCode::Char('3') => app.show_analytics(now),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => match app.screen {
                Screen::Employees => Self::handle_employees_key(app, key, now),
                Screen::Detail => Self::handle_detail_key(app, key, now),
                Screen::Bookmarks => Self::handle_bookmarks_key(app, key, now),
                Screen::Analytics => Self::handle_analytics_key(app, key, now),
            },
        }
    }

    fn handle_employees_key(app: &mut App, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Enter => app.open_selected(),
            KeyCode::Char('b') => app.toggle_selected_bookmark(),
            KeyCode::Char('p') => app.promote_selected(now),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('f') => app.open_filters(),
            KeyCode::Char('c') => app.clear_filters(),
            KeyCode::Char('r') => app.retry(now),
            KeyCode::Tab => app.show_bookmarks(),
            _ => {}
        }
    }

    fn handle_detail_key(app: &mut App, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Esc | KeyCode::Backspace => app.go_back(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
            KeyCode::Char('b') => app.toggle_selected_bookmark(),
            KeyCode::Char('p') => app.promote_selected(now),
            KeyCode::Char('r') => app.retry(now),
            _ => {}
        }
    }

    fn handle_bookmarks_key(app: &mut App, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Enter => app.open_selected(),
            KeyCode::Char('p') => app.promote_selected(now),
            KeyCode::Char('a') => app.assign_project_selected(now),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_bookmark(),
            KeyCode::Tab => app.show_analytics(now),
            _ => {}
        }
    }

    fn handle_analytics_key(app: &mut App, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('r') => app.retry(now),
            KeyCode::Tab => app.show_employees(),
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.search_backspace(now),
            KeyCode::Delete => app.search_delete(now),
            KeyCode::Left => app.search_cursor_left(),
            KeyCode::Right => app.search_cursor_right(),
            KeyCode::Home => app.cursor_position = 0,
            KeyCode::End => app.cursor_position = app.search_input.chars().count(),
            KeyCode::Char(c) => app.search_insert(c, now),
            _ => {}
        }
    }

    fn handle_filter_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.filter_draft.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.filter_draft.move_down(),
            KeyCode::Char(' ') => app.filter_draft.toggle_current(),
            KeyCode::Enter => app.apply_filters(),
            KeyCode::Char('c') => app.clear_filters(),
            KeyCode::Esc => app.cancel_filters(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

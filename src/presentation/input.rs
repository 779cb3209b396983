use crate::application::{App, FormFocus, RegistrationFocus, TextField};
use crate::infrastructure::read_clipboard_text;
use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers, now: NaiveDateTime) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key, KeyCode::Char('c') | KeyCode::Char('q')) {
            app.should_quit = true;
            return;
        }

        // Nothing is editable while a request is in flight
        if app.is_busy() {
            return;
        }

        if ctrl {
            if key == KeyCode::Char('v') {
                if let Some(text) = read_clipboard_text() {
                    app.paste(&text);
                }
            }
            return;
        }

        if app.is_popup_open() {
            Self::handle_registration_mode(app, key);
        } else {
            Self::handle_form_mode(app, key, now);
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, now: NaiveDateTime) {
        match key {
            KeyCode::Esc => {
                app.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous();
            }
            KeyCode::Enter => {
                app.submit_upload(now);
            }
            KeyCode::Left if Self::on_selector(app) => {
                app.step_selector(-1);
            }
            KeyCode::Right if Self::on_selector(app) => {
                app.step_selector(1);
            }
            KeyCode::PageUp if Self::on_selector(app) => {
                app.step_selector(-10);
            }
            KeyCode::PageDown if Self::on_selector(app) => {
                app.step_selector(10);
            }
            _ => {
                if let Some(field) = app.focused_text_field() {
                    Self::edit_text_field(field, key);
                }
            }
        }
    }

    fn handle_registration_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.close_registration();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous();
            }
            KeyCode::Enter => {
                app.submit_registration();
            }
            KeyCode::Char(' ') if Self::on_agreement(app) => {
                if let Some(form) = app.registration.as_mut() {
                    form.toggle_agreement();
                }
            }
            _ => {
                if let Some(field) = app.focused_text_field() {
                    Self::edit_text_field(field, key);
                }
            }
        }
    }

    fn on_selector(app: &App) -> bool {
        matches!(app.focus, FormFocus::Day | FormFocus::Hour | FormFocus::Minute)
    }

    fn on_agreement(app: &App) -> bool {
        app.registration
            .as_ref()
            .is_some_and(|form| form.focus == RegistrationFocus::Agreement)
    }

    fn edit_text_field(field: &mut TextField, key: KeyCode) {
        match key {
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            KeyCode::Char(c) => field.insert_char(c),
            _ => {}
        }
    }
}

use crate::application::{App, FormFocus, RegistrationFocus, RegistrationForm, TextField, Toast, ToastKind};
use crate::domain::Field;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 56;
const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 17;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_form(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if let Some(form) = app.registration.as_ref() {
        render_registration_popup(f, form);
    }

    render_toasts(f, app.toasts.iter());
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("promo-upload | Kódfeltöltés").style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Kódfeltöltés");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let editable = app.registration.is_none() && !app.is_busy();

    render_text_field(f, "E-mail cím:", &app.email, editable && app.focus == FormFocus::Email, rows[0]);
    render_field_error(f, app.field_errors.message_for(Field::Email), rows[1]);
    render_text_field(f, "Kód:", &app.code, editable && app.focus == FormFocus::Code, rows[2]);
    render_field_error(f, app.field_errors.message_for(Field::Code), rows[3]);

    f.render_widget(
        Paragraph::new("Vásárlás dátuma:").style(Style::default().add_modifier(Modifier::BOLD)),
        rows[4],
    );

    let date_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(2, 3),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
        ])
        .split(rows[5]);

    let day = app.selected_day().map(|option| option.label.clone()).unwrap_or_default();
    render_selector(f, "Nap:", &day, app.focus == FormFocus::Day, date_row[0]);
    render_selector(f, "Óra:", &clock_text(app.hour), app.focus == FormFocus::Hour, date_row[1]);
    render_selector(f, "Perc:", &clock_text(app.minute), app.focus == FormFocus::Minute, date_row[2]);

    let date_error = [Field::Day, Field::Hour, Field::Minute]
        .into_iter()
        .find_map(|field| app.field_errors.message_for(field));
    render_field_error(f, date_error, rows[6]);

    render_button(f, "Kódfeltöltés", app.focus == FormFocus::Submit, app.processing, rows[7]);
}

fn clock_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// The part of `value` shown in a box `width` columns wide so that `cursor` stays
/// visible, with the cursor column inside that part.
fn visible_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    // One column stays free for the cursor after the last character
    let start = (cursor + 1).saturating_sub(width.max(1));
    let text = value.chars().skip(start).take(width).collect();
    (text, cursor - start)
}

fn render_text_field(f: &mut Frame, title: &str, field: &TextField, focused: bool, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let cursor = if focused { field.cursor() } else { 0 };
    let (text, column) = visible_window(field.value(), cursor, width);

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(focused)),
    );
    f.render_widget(input, area);

    if focused {
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        let column = u16::try_from(column).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(column).min(max_x);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_selector(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let text = if focused { format!("◀ {value} ▶") } else { value.to_string() };
    let selector = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(focused)),
    );
    f.render_widget(selector, area);
}

fn render_field_error(f: &mut Frame, message: Option<&str>, area: Rect) {
    if let Some(message) = message {
        f.render_widget(Paragraph::new(message).style(Style::default().fg(Color::Red)), area);
    }
}

fn render_button(f: &mut Frame, label: &str, focused: bool, processing: bool, area: Rect) {
    let (text, style) = if processing {
        ("Feldolgozás...".to_string(), Style::default().fg(Color::DarkGray))
    } else if focused {
        (format!("[ {label} ]"), Style::default().bg(Color::Blue).fg(Color::White))
    } else {
        (format!("[ {label} ]"), Style::default().fg(Color::Green))
    };

    let button = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(focus_style(focused && !processing)));
    f.render_widget(button, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.is_busy() {
        "Feldolgozás folyamatban..."
    } else if app.registration.is_some() {
        "Tab/↑↓: mező | Szóköz: elfogadás | Enter: regisztráció | Esc: bezárás"
    } else {
        "Tab/↑↓: mező | ←→: választás | Enter: küldés | Ctrl+V: beillesztés | Esc: kilépés"
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Állapot"))
        .style(if app.is_busy() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    f.render_widget(status, area);
}

fn render_registration_popup(f: &mut Frame, form: &RegistrationForm) {
    let area = f.area();
    let width = POPUP_WIDTH.min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Regisztráció")
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let email = Paragraph::new(form.email.as_str())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Email cím:"));
    f.render_widget(email, rows[0]);

    let editable = !form.processing;
    render_text_field(f, "Név:", &form.name, editable && form.focus == RegistrationFocus::Name, rows[1]);

    let checkbox = if form.agreement { "[x]" } else { "[ ]" };
    let agreement = Paragraph::new(format!("{checkbox} Elolvastam és elfogadtam a játékszabályzatot."))
        .style(focus_style(form.focus == RegistrationFocus::Agreement));
    f.render_widget(agreement, rows[2]);

    let error = form
        .field_errors
        .message_for(Field::Name)
        .or_else(|| form.field_errors.message_for(Field::Agreement));
    render_field_error(f, error, rows[3]);

    render_button(f, "Regisztrálok", form.focus == RegistrationFocus::Submit, form.processing, rows[5]);
}

fn toast_style(kind: ToastKind) -> Style {
    let color = match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Info => Color::Cyan,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Error => Color::Red,
    };
    Style::default().fg(color)
}

fn toast_title(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "Siker",
        ToastKind::Info => "Infó",
        ToastKind::Warning => "Figyelem",
        ToastKind::Error => "Hiba",
    }
}

fn render_toasts<'a>(f: &mut Frame, toasts: impl Iterator<Item = &'a Toast>) {
    let area = f.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y + 1;

    for toast in toasts {
        if y + 3 > area.y + area.height {
            break;
        }
        let toast_area = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: 3,
        };

        f.render_widget(Clear, toast_area);
        let widget = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(toast_title(toast.kind))
                    .border_style(toast_style(toast.kind)),
            );
        f.render_widget(widget, toast_area);
        y += 3;
    }
}

use crate::ui::app::App;
use crate::ui::navigation::Route;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::info;

pub(super) struct FormField {
    pub(super) label: &'static str,
    pub(super) value: String,
    /// Rendered as bullets.
    pub(super) secret: bool,
}

impl FormField {
    fn new(label: &'static str, secret: bool) -> Self {
        FormField {
            label,
            value: String::new(),
            secret,
        }
    }
}

/// A stack of single-line text fields with one focused at a time.
pub(super) struct Form {
    pub(super) fields: Vec<FormField>,
    pub(super) focus: usize,
}

impl Form {
    pub(super) fn login() -> Self {
        Form {
            fields: vec![FormField::new("Username", false), FormField::new("Password", true)],
            focus: 0,
        }
    }

    pub(super) fn signup() -> Self {
        Form {
            fields: vec![
                FormField::new("Username", false),
                FormField::new("Password", true),
                FormField::new("Confirm password", true),
            ],
            focus: 0,
        }
    }

    pub(super) fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Routes editing keys to the focused field. Returns true if the key was consumed.
    fn edit(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
            }
            _ => return false,
        }
        true
    }

    pub(super) fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.fields
            .iter()
            .enumerate()
            .flat_map(|(i, field)| {
                let shown = if field.secret {
                    "•".repeat(field.value.chars().count())
                } else {
                    field.value.clone()
                };
                let focused = i == self.focus;
                let cursor = if focused { "_" } else { "" };
                let label_style = if focused {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                [
                    Line::from(vec![
                        Span::styled(format!("{:<18}", field.label), label_style),
                        Span::raw(format!("{shown}{cursor}")),
                    ]),
                    Line::from(""),
                ]
            })
            .collect()
    }
}

impl App {
    /// Returns true if the app should quit.
    pub(super) fn handle_login_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('s') {
                self.signup_form.clear();
                self.nav.navigate(Route::Signup);
            }
            return false;
        }
        match code {
            KeyCode::Enter => self.login(),
            KeyCode::Esc => return true,
            other => {
                self.login_form.edit(other);
            }
        }
        false
    }

    pub(super) fn handle_signup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let name = self.signup_form.value(0).trim().to_string();
                info!(user = %name, "account created");
                self.signup_form.clear();
                self.nav.go_back();
                self.status = Some((
                    format!("Account created for {name}. Please sign in."),
                    Color::Green,
                ));
            }
            KeyCode::Esc => {
                self.nav.go_back();
            }
            other => {
                self.signup_form.edit(other);
            }
        }
    }

    pub(super) fn render_login(&self, f: &mut Frame, area: Rect) {
        render_form(
            f,
            area,
            " Sign in ",
            &self.login_form,
            "Enter=sign in  Tab/↑↓=field  Ctrl+S=sign up  Esc=quit",
        );
    }

    pub(super) fn render_signup(&self, f: &mut Frame, area: Rect) {
        render_form(
            f,
            area,
            " Create account ",
            &self.signup_form,
            "Enter=create  Tab/↑↓=field  Esc=back",
        );
    }
}

fn render_form(f: &mut Frame, area: Rect, title: &str, form: &Form, hint: &str) {
    let height = form.fields.len() as u16 * 2 + 4;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(56),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let mut lines = form.lines();
    lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    f.render_widget(p, cols[1]);
}

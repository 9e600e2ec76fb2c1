use crate::data::AppSettings;
use crate::session::Session;
use crate::speech::Speaker;
use crate::ui::login_view::Form;
use crate::ui::navigation::{Navigator, Route, Tab};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum Mode {
    Normal,
    /// Typing a new to-do on the Home tab.
    AddTodo,
    /// The note dialog of the calendar is open.
    Note,
}

pub struct App {
    pub(super) settings: AppSettings,
    pub(super) nav: Navigator,
    pub(super) session: Session,
    pub(super) speaker: Box<dyn Speaker>,
    pub(super) today: NaiveDate,
    pub(super) mode: Mode,
    /// Shared by the to-do input and the note dialog; only one is open at a time.
    pub(super) input_buffer: String,
    pub(super) chat_input: String,
    pub(super) todo_cursor: usize,
    pub(super) login_form: Form,
    pub(super) signup_form: Form,
    pub(super) user: Option<String>,
    /// One-line feedback shown under the screen. Cleared on the next keypress.
    pub(super) status: Option<(String, Color)>,
    pub(super) data_dir: PathBuf,
}

impl App {
    pub fn new(
        settings: AppSettings,
        speaker: Box<dyn Speaker>,
        today: NaiveDate,
        data_dir: PathBuf,
    ) -> Self {
        let session = Session::new(&settings, today);
        App {
            settings,
            nav: Navigator::default(),
            session,
            speaker,
            today,
            mode: Mode::Normal,
            input_buffer: String::new(),
            chat_input: String::new(),
            todo_cursor: 0,
            login_form: Form::login(),
            signup_form: Form::signup(),
            user: None,
            status: None,
            data_dir,
        }
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    /// Delivers chat replies whose delay has elapsed and reaps finished speech.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.speaker.reap();
        self.session.chat.tick(now)
    }

    /// Follows the wall-clock date so "today" stays right past midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            info!(%today, "date changed");
            self.today = today;
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        self.status = None;

        match self.nav.current() {
            Route::Login => self.handle_login_key(code, modifiers),
            Route::Signup => {
                self.handle_signup_key(code);
                false
            }
            Route::Home(tab) => {
                if self.mode == Mode::Normal {
                    match code {
                        KeyCode::Tab => {
                            self.nav.select_tab(tab.next());
                            return false;
                        }
                        KeyCode::BackTab => {
                            self.nav.select_tab(tab.prev());
                            return false;
                        }
                        _ => {}
                    }
                }
                match tab {
                    Tab::Home => self.handle_todo_key(code),
                    Tab::Chatbot => {
                        self.handle_chat_key(code);
                        false
                    }
                    Tab::Schedule => self.handle_calendar_key(code),
                }
            }
            Route::Chatbot => {
                self.handle_chat_key(code);
                false
            }
            Route::Date => self.handle_calendar_key(code),
        }
    }

    pub(super) fn login(&mut self) {
        let name = self.login_form.value(0).trim().to_string();
        info!(user = %name, "signed in");
        self.status = Some((
            if name.is_empty() {
                "Signed in".to_string()
            } else {
                format!("Signed in as {name}")
            },
            Color::Green,
        ));
        self.user = (!name.is_empty()).then_some(name);
        self.login_form.clear();
        self.session = Session::new(&self.settings, self.today);
        self.nav.navigate(Route::Home(Tab::Home));
    }

    /// Ends the session: pending replies are cancelled and all state is dropped.
    pub(super) fn logout(&mut self) {
        self.session.chat.cancel_pending();
        self.session = Session::new(&self.settings, self.today);
        self.mode = Mode::Normal;
        self.input_buffer.clear();
        self.chat_input.clear();
        self.todo_cursor = 0;
        info!(user = self.user.as_deref().unwrap_or(""), "signed out");
        self.user = None;
        self.nav.reset(Route::Login);
        self.status = Some(("Signed out".to_string(), Color::DarkGray));
    }

    /// Esc from a screen: Home tab logs out, other tabs fall back to Home,
    /// pushed routes pop.
    pub(super) fn leave_screen(&mut self) {
        match self.nav.current() {
            Route::Home(Tab::Home) => self.logout(),
            Route::Home(_) => self.nav.select_tab(Tab::Home),
            _ => {
                self.nav.go_back();
            }
        }
    }

    pub(super) fn speak_phrase(&mut self, index: usize) {
        let Some(phrase) = self.settings.speech.phrases.get(index) else {
            return;
        };
        let language = &self.settings.speech.language;
        self.status = Some(match self.speaker.speak(&phrase.text, language) {
            Ok(()) => (format!("Speaking: {}", phrase.label), Color::Green),
            Err(e) => (format!("Speech failed: {e}"), Color::Red),
        });
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title or tab bar
                Constraint::Min(8),    // screen body
                Constraint::Length(1), // status / footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.nav.current() {
            Route::Login => self.render_login(f, chunks[1]),
            Route::Signup => self.render_signup(f, chunks[1]),
            Route::Home(Tab::Home) => self.render_home(f, chunks[1]),
            Route::Home(Tab::Chatbot) | Route::Chatbot => self.render_chat(f, chunks[1]),
            Route::Home(Tab::Schedule) | Route::Date => self.render_calendar(f, chunks[1]),
        }
        self.render_status(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let route = self.nav.current();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", route.name()));
        if let Route::Home(tab) = route {
            let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
            let tabs = Tabs::new(titles)
                .select(tab.index())
                .block(block.title_bottom(" Tab/Shift+Tab=switch "))
                .highlight_style(
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                );
            f.render_widget(tabs, area);
        } else {
            let hint = if self.nav.depth() > 1 { "Esc=back" } else { "" };
            let p = Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(p, area);
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some((msg, color)) => Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            None => {
                let mut spans = Vec::new();
                if let Some(user) = &self.user {
                    spans.push(Span::styled(
                        format!("{user}  "),
                        Style::default().fg(Color::Cyan),
                    ));
                }
                spans.push(Span::styled(
                    "Config  ",
                    Style::default().add_modifier(Modifier::DIM),
                ));
                spans.push(Span::styled(
                    self.data_dir.to_string_lossy().to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
                Line::from(spans)
            }
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(Duration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
        app.set_today(Local::now().date_naive());
        app.tick(Instant::now());
    }
    Ok(())
}

use crate::data::TodoId;
use crate::ui::app::{App, Mode};
use crate::ui::navigation::Route;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::info;

const BUTTON_BG: Color = Color::Rgb(0, 122, 255);

impl App {
    fn selected_todo_id(&self) -> Option<TodoId> {
        self.session.todos.items.get(self.todo_cursor).map(|t| t.id)
    }

    /// Returns true if the app should quit.
    pub(super) fn handle_todo_key(&mut self, code: KeyCode) -> bool {
        if self.mode == Mode::AddTodo {
            match code {
                KeyCode::Enter => {
                    if let Some(id) = self.session.todos.add(&self.input_buffer) {
                        info!(todo = id.0, "to-do added");
                        self.todo_cursor = self.session.todos.len() - 1;
                        self.input_buffer.clear();
                        self.mode = Mode::Normal;
                    }
                }
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.mode = Mode::Normal;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => {
                    self.input_buffer.push(c);
                }
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Up => {
                if self.todo_cursor > 0 {
                    self.todo_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.todo_cursor + 1 < self.session.todos.len() {
                    self.todo_cursor += 1;
                }
            }
            KeyCode::Char('a') => {
                self.mode = Mode::AddTodo;
                self.input_buffer.clear();
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_todo_id() {
                    self.session.todos.toggle(id);
                    if let Some(item) = self.session.todos.get(id) {
                        info!(todo = id.0, completed = item.completed, "to-do toggled");
                    }
                }
            }
            KeyCode::Delete | KeyCode::Char('x') => {
                if let Some(id) = self.selected_todo_id() {
                    self.session.todos.delete(id);
                    if self.todo_cursor > 0 && self.todo_cursor >= self.session.todos.len() {
                        self.todo_cursor -= 1;
                    }
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.speak_phrase(index);
            }
            KeyCode::Char('c') => self.nav.navigate(Route::Chatbot),
            KeyCode::Char('o') => self.nav.navigate(Route::Date),
            KeyCode::Esc | KeyCode::Char('l') => self.leave_screen(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    pub(super) fn render_home(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // to-do table
                Constraint::Length(3), // new to-do input
                Constraint::Length(3), // phrase buttons
                Constraint::Length(2), // key hints
            ])
            .split(area);

        let todos = &self.session.todos;
        let rows: Vec<Row> = todos
            .items
            .iter()
            .map(|t| {
                let (mark, mark_color) = if t.completed {
                    ("✔", Color::Green)
                } else {
                    ("○", Color::Gray)
                };
                let text_style = if t.completed {
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(mark).style(Style::default().fg(mark_color)),
                    Cell::from(t.text.clone()).style(text_style),
                ])
            })
            .collect();

        let mut table_state = TableState::default();
        if !todos.is_empty() {
            table_state.select(Some(self.todo_cursor));
        }
        let title = format!(
            " To Do List  ({}/{} done) ",
            todos.completed_count(),
            todos.len()
        );
        let table = Table::new(rows, [Constraint::Length(3), Constraint::Min(20)])
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(table, chunks[0], &mut table_state);

        let input = if self.mode == Mode::AddTodo {
            Line::from(format!("{}_", self.input_buffer))
        } else {
            Line::from(Span::styled(
                "press a to add a to-do",
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(
            Paragraph::new(input)
                .block(Block::default().borders(Borders::ALL).title(" New to-do ")),
            chunks[1],
        );

        self.render_phrase_buttons(f, chunks[2]);

        let hints = if self.mode == Mode::AddTodo {
            "Enter=add  Esc=cancel"
        } else {
            concat!(
                "↑↓=move  a=add  Space=done  x=delete  1-3=speak  ",
                "c=chat  o=calendar  Esc=sign out  q=quit"
            )
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hints,
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[3],
        );
    }

    fn render_phrase_buttons(&self, f: &mut Frame, area: Rect) {
        let phrases = &self.settings.speech.phrases;
        if phrases.is_empty() {
            return;
        }
        let constraints: Vec<Constraint> = phrases
            .iter()
            .map(|_| Constraint::Ratio(1, phrases.len() as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);
        for (i, (phrase, cell)) in phrases.iter().zip(cells.iter()).enumerate() {
            let button = Paragraph::new(Line::from(format!("[{}] {}", i + 1, phrase.label)))
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(BUTTON_BG)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, *cell);
        }
    }
}

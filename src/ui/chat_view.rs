use crate::chat::Sender;
use crate::ui::app::App;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

const USER_BG: Color = Color::Rgb(220, 248, 198);
const BOT_BG: Color = Color::Rgb(234, 234, 234);

impl App {
    pub(super) fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if self.session.chat.send(&self.chat_input, Instant::now()).is_some() {
                    self.chat_input.clear();
                }
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => {
                self.chat_input.push(c);
            }
            KeyCode::Esc => self.leave_screen(),
            _ => {}
        }
    }

    pub(super) fn render_chat(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // transcript
                Constraint::Length(3), // input
            ])
            .split(area);

        let mut lines: Vec<Line> = Vec::new();
        for message in self.session.chat.messages() {
            let (style, alignment) = match message.sender {
                Sender::User => (Style::default().fg(Color::Black).bg(USER_BG), Alignment::Right),
                Sender::Bot => (Style::default().fg(Color::Black).bg(BOT_BG), Alignment::Left),
            };
            lines.push(
                Line::from(Span::styled(format!(" {} ", message.text), style)).alignment(alignment),
            );
            lines.push(Line::from(""));
        }
        if self.session.chat.pending_replies() > 0 {
            lines.push(Line::from(Span::styled(
                " … ",
                Style::default().fg(Color::DarkGray),
            )));
        }

        // Keep the newest messages in view.
        let visible = chunks[0].height.saturating_sub(2) as usize;
        let skip = lines.len().saturating_sub(visible);
        let transcript = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).title(" Chat "));
        f.render_widget(transcript, chunks[0]);

        let input = Paragraph::new(Line::from(format!("{}_", self.chat_input))).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Message  (Enter=send  Esc=back) "),
        );
        f.render_widget(input, chunks[1]);
    }
}

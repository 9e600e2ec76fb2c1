use crate::calc::{grid_rows, weekday_headers};
use crate::data::date_key;
use crate::ui::app::{App, Mode};
use chrono::{Datelike, Duration};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use tracing::info;

const NOTE_MARK: Color = Color::Green;
const OTHER_MONTH: Color = Color::DarkGray;

impl App {
    /// Returns true if the app should quit.
    pub(super) fn handle_calendar_key(&mut self, code: KeyCode) -> bool {
        if self.mode == Mode::Note {
            match code {
                KeyCode::Enter => {
                    // Blank input leaves the dialog open.
                    if self.session.add_note_to_selected(&self.input_buffer) {
                        info!(date = %self.session.selected_key(), "note added");
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

        let selected = self.session.selected_date();
        match code {
            KeyCode::Left => {
                if let Some(d) = selected.checked_sub_signed(Duration::days(1)) {
                    self.session.select_date(d);
                }
            }
            KeyCode::Right => {
                if let Some(d) = selected.checked_add_signed(Duration::days(1)) {
                    self.session.select_date(d);
                }
            }
            KeyCode::Up => {
                if let Some(d) = selected.checked_sub_signed(Duration::days(7)) {
                    self.session.select_date(d);
                }
            }
            KeyCode::Down => {
                if let Some(d) = selected.checked_add_signed(Duration::days(7)) {
                    self.session.select_date(d);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('>') => self.session.next_month(),
            KeyCode::Char('p') | KeyCode::Char('<') => self.session.prev_month(),
            KeyCode::Char('t') => self.session.select_date(self.today),
            KeyCode::Enter => {
                if self.session.can_annotate_selected() {
                    self.mode = Mode::Note;
                    self.input_buffer.clear();
                }
            }
            KeyCode::Esc => self.leave_screen(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    pub(super) fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(32), // month grid
                Constraint::Min(20),    // notes + help
            ])
            .split(area);

        self.render_month(f, cols[0]);
        self.render_notes_and_help(f, cols[1]);

        if self.mode == Mode::Note {
            self.render_note_dialog(f, area);
        }
    }

    fn render_month(&self, f: &mut Frame, area: Rect) {
        let cursor = self.session.cursor();
        let selected = self.session.selected_date();
        let grid = self.session.grid();

        let mut lines: Vec<Line> = vec![
            Line::from(vec![
                Span::raw("<  "),
                Span::styled(
                    format!("{:^22}", cursor.title()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  >"),
            ]),
            Line::from(""),
            Line::from(
                weekday_headers(self.session.week_start())
                    .iter()
                    .map(|h| format!("{h:>2}  "))
                    .collect::<String>(),
            ),
        ];

        for week in grid_rows(&grid) {
            let mut spans = Vec::new();
            for cell in week {
                let has_notes = self.session.notes.has_notes(&date_key(cell.date));
                let style = calendar_day_style(
                    cell.date == selected,
                    cell.belongs_to_displayed_month,
                    cell.date == self.today,
                    has_notes,
                );
                spans.push(Span::styled(format!("{:>2}", cell.day()), style));
                if has_notes {
                    spans.push(Span::styled("•", Style::default().fg(NOTE_MARK)));
                } else {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let title = match self.session.notes.total_notes() {
            0 => " Schedule ".to_string(),
            n => format!(" Schedule  ({n} note(s)) "),
        };
        let calendar_widget =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(calendar_widget, area);
    }

    fn render_notes_and_help(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // notes for the selected date
                Constraint::Length(6), // key bindings
            ])
            .split(area);

        let selected = self.session.selected_date();
        let mut lines = vec![Line::from(Span::styled(
            format!("Notes for {} ({})", date_key(selected), selected.weekday()),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        let notes = self.session.notes_for_selected();
        if notes.is_empty() {
            lines.push(Line::from("  (no notes)"));
        } else {
            for n in notes {
                lines.push(Line::from(format!("  • {n}")));
            }
        }
        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::NONE));
        f.render_widget(p, chunks[0]);

        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move date", "n / p", "Next/prev month"]),
            Row::new(vec!["Enter", "Add note", "t", "Today"]),
            Row::new(vec!["Esc", "Back", "q/Ctrl+C", "Quit"]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(16),
            ],
        )
        .style(Style::default().fg(Color::DarkGray))
        .column_spacing(1);
        f.render_widget(help_table, chunks[1]);
    }

    fn render_note_dialog(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(area, 50, 14);
        f.render_widget(Clear, popup);

        let mut lines = vec![
            Line::from(format!("> {}_", self.input_buffer)),
            Line::from(""),
            Line::from(Span::styled(
                "Saved notes:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let notes = self.session.notes_for_selected();
        if notes.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (no notes)",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.extend(notes.iter().map(|n| Line::from(format!("  {n}"))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter=add  Esc=cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Add note for {} ", self.session.selected_key())),
        );
        f.render_widget(dialog, popup);
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Determines the ratatui `Style` for a calendar day cell based on its state.
pub(crate) fn calendar_day_style(
    is_selected: bool,
    in_month: bool,
    is_today: bool,
    has_notes: bool,
) -> Style {
    if is_selected {
        let bg = if has_notes { NOTE_MARK } else { Color::White };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if !in_month {
        Style::default().fg(OTHER_MONTH).add_modifier(Modifier::DIM)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if has_notes {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::tests::{d, logged_in_app, press, rendered_text, type_text};
    use crate::ui::navigation::{Route, Tab};

    fn open_schedule(today: chrono::NaiveDate) -> App {
        let (mut app, _) = logged_in_app(today);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.route(), Route::Home(Tab::Schedule));
        app
    }

    // ── calendar_day_style tests ──────────────────────────────────────────────

    #[test]
    fn test_style_selected_plain() {
        let s = calendar_day_style(true, true, false, false);
        assert_eq!(
            s,
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn test_style_selected_with_notes() {
        let s = calendar_day_style(true, true, false, true);
        assert_eq!(
            s,
            Style::default()
                .fg(Color::Black)
                .bg(NOTE_MARK)
                .add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn test_style_other_month_dimmed() {
        let s = calendar_day_style(false, false, true, true);
        assert_eq!(s, Style::default().fg(OTHER_MONTH).add_modifier(Modifier::DIM));
    }

    #[test]
    fn test_style_today() {
        let s = calendar_day_style(false, true, true, false);
        assert_eq!(s, Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));
    }

    #[test]
    fn test_style_has_notes() {
        let s = calendar_day_style(false, true, false, true);
        assert_eq!(s, Style::default().fg(Color::Cyan));
    }

    #[test]
    fn test_style_plain_day() {
        assert_eq!(calendar_day_style(false, true, false, false), Style::default());
    }

    // ── handle_calendar_key tests ─────────────────────────────────────────────

    #[test]
    fn test_arrow_keys_move_selected_date() {
        let mut app = open_schedule(d(2025, 2, 10));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.selected_date(), d(2025, 2, 11));

        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.selected_date(), d(2025, 2, 10));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.selected_date(), d(2025, 2, 17));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.session.selected_date(), d(2025, 2, 10));
    }

    #[test]
    fn test_arrow_past_month_end_follows_into_next_month() {
        let mut app = open_schedule(d(2025, 2, 28));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.selected_date(), d(2025, 3, 1));
        assert_eq!(app.session.cursor().month(), 3);
    }

    #[test]
    fn test_n_and_p_change_month() {
        let mut app = open_schedule(d(2024, 12, 5));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!((app.session.cursor().year(), app.session.cursor().month()), (2025, 1));
        press(&mut app, KeyCode::Char('<'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!((app.session.cursor().year(), app.session.cursor().month()), (2024, 11));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.session.selected_date(), d(2024, 12, 5));
        assert_eq!(app.session.cursor().month(), 12);
    }

    #[test]
    fn test_note_dialog_adds_notes_in_order() {
        let mut app = open_schedule(d(2024, 3, 15));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Note);
        type_text(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "call mom");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.session.notes.notes_for("2024-03-15"),
            ["buy milk", "call mom"]
        );
    }

    #[test]
    fn test_blank_note_keeps_dialog_open() {
        let mut app = open_schedule(d(2024, 3, 15));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Note);
        assert!(!app.session.notes.has_notes("2024-03-15"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.route(), Route::Home(Tab::Schedule));
    }

    #[test]
    fn test_letters_in_dialog_are_text_not_commands() {
        let mut app = open_schedule(d(2024, 3, 15));
        press(&mut app, KeyCode::Enter);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_buffer, "qn");
        assert_eq!(app.session.cursor().month(), 3);
    }

    #[test]
    fn test_esc_returns_to_home_tab() {
        let mut app = open_schedule(d(2024, 3, 15));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::Home(Tab::Home));
    }

    #[test]
    fn test_render_month_and_notes() {
        let mut app = open_schedule(d(2024, 2, 10));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "dentist");
        press(&mut app, KeyCode::Enter);
        let text = rendered_text(&mut app);
        assert!(text.contains("February 2024"));
        assert!(text.contains("Su  Mo  Tu  We  Th  Fr  Sa"));
        assert!(text.contains("29"));
        assert!(text.contains("dentist"));
        assert!(text.contains("Notes for 2024-02-10"));
    }

    #[test]
    fn test_render_dialog_lists_saved_notes() {
        let mut app = open_schedule(d(2024, 2, 10));
        press(&mut app, KeyCode::Enter);
        let text = rendered_text(&mut app);
        assert!(text.contains("Add note for 2024-02-10"));
        assert!(text.contains("(no notes)"));
    }
}

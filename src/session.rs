use crate::calc::{
    advance_month, build_month_grid, retreat_month, CalendarCursor, DayCell, WeekStart,
};
use crate::chat::ChatSession;
use crate::data::{date_key, AppSettings, NoteIndex, TodoList};
use chrono::{Months, NaiveDate};
use tracing::debug;

/// Everything a signed-in user has touched. Lives in memory only and is
/// rebuilt from scratch on logout.
#[derive(Debug, Clone)]
pub struct Session {
    pub todos: TodoList,
    pub notes: NoteIndex,
    pub chat: ChatSession,
    cursor: CalendarCursor,
    selected_date: NaiveDate,
    week_start: WeekStart,
}

impl Session {
    pub fn new(settings: &AppSettings, today: NaiveDate) -> Self {
        Session {
            todos: TodoList::default(),
            notes: NoteIndex::default(),
            chat: ChatSession::new(&settings.chat),
            cursor: CalendarCursor::containing(today),
            selected_date: today,
            week_start: settings.week_start,
        }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_key(&self) -> String {
        date_key(self.selected_date)
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn grid(&self) -> Vec<DayCell> {
        build_month_grid(self.cursor, self.week_start)
    }

    /// Selects `date`; the displayed month follows when the date leaves it.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if !self.cursor.contains(date) {
            self.cursor = CalendarCursor::containing(date);
        }
    }

    /// Shows the next month and moves the selection with it, clamping the day.
    pub fn next_month(&mut self) {
        self.cursor = advance_month(self.cursor);
        if let Some(d) = self.selected_date.checked_add_months(Months::new(1)) {
            self.selected_date = d;
        }
        debug!(month = %self.cursor.title(), "calendar advanced");
    }

    pub fn prev_month(&mut self) {
        self.cursor = retreat_month(self.cursor);
        if let Some(d) = self.selected_date.checked_sub_months(Months::new(1)) {
            self.selected_date = d;
        }
        debug!(month = %self.cursor.title(), "calendar retreated");
    }

    /// Notes can only be attached to days of the displayed month.
    pub fn can_annotate_selected(&self) -> bool {
        self.cursor.contains(self.selected_date)
    }

    pub fn add_note_to_selected(&mut self, text: &str) -> bool {
        let key = self.selected_key();
        self.notes.add_note(&key, text)
    }

    pub fn notes_for_selected(&self) -> &[String] {
        self.notes.notes_for(&date_key(self.selected_date))
    }
}

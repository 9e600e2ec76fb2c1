use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Day of week that begins every row of the month grid.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// The weekday that closes a row, i.e. the day before the week start.
    pub fn last_weekday(self) -> Weekday {
        self.first_weekday().pred()
    }
}

/// The month currently on display. Always anchored on the 1st.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarCursor {
    first: NaiveDate,
}

impl CalendarCursor {
    /// Returns None for a month outside 1..=12 or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| CalendarCursor { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        CalendarCursor {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        let days = days_in_month(self.year(), self.month());
        self.first
            .checked_add_days(Days::new(u64::from(days) - 1))
            .unwrap_or(self.first)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month()), self.year())
    }
}

/// Moves the cursor one month forward, rolling December into January of the next year.
pub fn advance_month(cursor: CalendarCursor) -> CalendarCursor {
    cursor
        .first
        .checked_add_months(Months::new(1))
        .map(|first| CalendarCursor { first })
        .unwrap_or(cursor)
}

/// Moves the cursor one month back, rolling January into December of the previous year.
pub fn retreat_month(cursor: CalendarCursor) -> CalendarCursor {
    cursor
        .first
        .checked_sub_months(Months::new(1))
        .map(|first| CalendarCursor { first })
        .unwrap_or(cursor)
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub belongs_to_displayed_month: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Builds the week-aligned day grid for the cursor's month.
///
/// The grid opens on the `week_start` day at or before the 1st and closes on the
/// last weekday of the row containing the month's final day, so its length is
/// always a multiple of 7 (35 or 42, or 28 for a February that fits exactly).
pub fn build_month_grid(cursor: CalendarCursor, week_start: WeekStart) -> Vec<DayCell> {
    let first = cursor.first_day();
    let last = cursor.last_day();

    let lead = days_between(week_start.first_weekday(), first.weekday());
    let trail = days_between(last.weekday(), week_start.last_weekday());

    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DayCell {
            date,
            belongs_to_displayed_month: date.month() == cursor.month(),
        })
        .collect()
}

/// Splits a grid into 7-day rows for rendering.
pub fn grid_rows(cells: &[DayCell]) -> Vec<&[DayCell]> {
    cells.chunks(7).collect()
}

/// Two-letter weekday headers in grid column order.
pub fn weekday_headers(week_start: WeekStart) -> [&'static str; 7] {
    let mut headers = [""; 7];
    let mut day = week_start.first_weekday();
    for slot in headers.iter_mut() {
        *slot = weekday_abbrev(day);
        day = day.succ();
    }
    headers
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Su",
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
    }
}

/// Forward distance in days from `from` to `to`, in 0..7.
fn days_between(from: Weekday, to: Weekday) -> u64 {
    u64::from((to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7)
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(28)
}

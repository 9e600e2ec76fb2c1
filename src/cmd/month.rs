use crate::calc::{build_month_grid, grid_rows, weekday_headers, CalendarCursor, DayCell, WeekStart};
use crate::data::AppSettings;
use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::Serialize;
use std::io::Write;

pub fn run(month: Option<&str>, json: bool) -> Result<()> {
    let settings = AppSettings::load()?;
    let cursor = match month {
        Some(raw) => parse_month(raw)?,
        None => CalendarCursor::containing(Local::now().date_naive()),
    };
    let out = &mut std::io::stdout();
    if json {
        write_month_json(cursor, settings.week_start, out)
    } else {
        write_month(cursor, settings.week_start, out)
    }
}

/// Parses `YYYY-MM`.
pub(crate) fn parse_month(raw: &str) -> Result<CalendarCursor> {
    let (year, month) = raw
        .trim()
        .split_once('-')
        .with_context(|| format!("invalid month '{raw}', expected YYYY-MM"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("invalid year in '{raw}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("invalid month number in '{raw}'"))?;
    match CalendarCursor::new(year, month) {
        Some(cursor) => Ok(cursor),
        None => bail!("month out of range in '{raw}', expected 01-12"),
    }
}

pub(crate) fn write_month<W: Write>(
    cursor: CalendarCursor,
    week_start: WeekStart,
    out: &mut W,
) -> Result<()> {
    let grid = build_month_grid(cursor, week_start);
    writeln!(out, "{:^27}", cursor.title())?;
    let headers = weekday_headers(week_start);
    writeln!(out, "{}", headers.join("  "))?;
    for week in grid_rows(&grid) {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| {
                if cell.belongs_to_displayed_month {
                    format!("{:>2}", cell.day())
                } else {
                    "  ".to_string()
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MonthJson<'a> {
    year: i32,
    month: u32,
    title: String,
    week_start: WeekStart,
    weekdays: [&'static str; 7],
    weeks: Vec<&'a [DayCell]>,
}

pub(crate) fn write_month_json<W: Write>(
    cursor: CalendarCursor,
    week_start: WeekStart,
    out: &mut W,
) -> Result<()> {
    let grid = build_month_grid(cursor, week_start);
    let doc = MonthJson {
        year: cursor.year(),
        month: cursor.month(),
        title: cursor.title(),
        week_start,
        weekdays: weekday_headers(week_start),
        weeks: grid_rows(&grid),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cursor: CalendarCursor, week_start: WeekStart) -> String {
        let mut buf = Vec::new();
        write_month(cursor, week_start, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_month_valid() {
        let c = parse_month("2024-02").unwrap();
        assert_eq!((c.year(), c.month()), (2024, 2));
        let c = parse_month(" 2025-12 ").unwrap();
        assert_eq!((c.year(), c.month()), (2025, 12));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("abcd-02").is_err());
        assert!(parse_month("2024-xx").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-00").is_err());
    }

    #[test]
    fn test_write_month_february_leap_year() {
        let out = render(CalendarCursor::new(2024, 2).unwrap(), WeekStart::Sunday);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("February 2024"));
        assert_eq!(lines[1], "Su  Mo  Tu  We  Th  Fr  Sa");
        // 2024-02-01 is a Thursday.
        assert_eq!(lines[2], "                 1   2   3");
        assert!(lines.last().unwrap().ends_with("29"));
        assert_eq!(lines.len(), 2 + 5);
    }

    #[test]
    fn test_write_month_monday_start() {
        let out = render(CalendarCursor::new(2024, 2).unwrap(), WeekStart::Monday);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "Mo  Tu  We  Th  Fr  Sa  Su");
        assert_eq!(lines[2], "             1   2   3   4");
    }

    #[test]
    fn test_write_month_exact_four_weeks() {
        // February 2015 starts on a Sunday and has 28 days.
        let out = render(CalendarCursor::new(2015, 2).unwrap(), WeekStart::Sunday);
        assert_eq!(out.lines().count(), 2 + 4);
    }

    #[test]
    fn test_write_month_json() {
        let mut buf = Vec::new();
        let cursor = CalendarCursor::new(2024, 2).unwrap();
        write_month_json(cursor, WeekStart::Sunday, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["year"], 2024);
        assert_eq!(v["month"], 2);
        assert_eq!(v["week_start"], "sunday");
        let weeks = v["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0]["date"], "2024-01-28");
        assert_eq!(weeks[0][0]["belongs_to_displayed_month"], false);
        assert_eq!(weeks[4][4]["date"], "2024-02-29");
        assert_eq!(weeks[4][4]["belongs_to_displayed_month"], true);
    }
}

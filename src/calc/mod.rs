pub mod month_grid;

pub use month_grid::{
    advance_month, build_month_grid, grid_rows, retreat_month, weekday_headers, CalendarCursor,
    DayCell, WeekStart,
};

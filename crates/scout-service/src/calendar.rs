//! Month calendar
//!
//! A fixed 6x7 grid, weeks starting on Monday. Leading cells come from the
//! previous month and trailing cells from the next one, so every month
//! renders with the same 42 cells.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use scout_core::Activity;

use crate::dto::ActivitySummary;

/// Number of cells in every grid
pub const GRID_CELLS: usize = 42;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// `None` unless `month` is 1..=12 and the year is representable
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Month containing the given day
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days(self) -> u32 {
        self.last_day().day()
    }

    /// Move by `delta` months, either direction; saturates at chrono's range
    pub fn shift(self, delta: i32) -> Self {
        let first = self.first_day();
        let shifted = if delta >= 0 {
            first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        shifted.map_or(self, Self::containing)
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn previous(self) -> Self {
        self.shift(-1)
    }

    /// Heading such as "March 2025"
    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Monday on or before the first day of the month
    fn grid_start(self) -> NaiveDate {
        let first = self.first_day();
        let leading = u64::from(first.weekday().num_days_from_monday());
        first.checked_sub_days(Days::new(leading)).unwrap_or(first)
    }
}

/// One day cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    /// Belongs to the previous or next month
    pub other_month: bool,
    pub today: bool,
    pub activities: Vec<ActivitySummary>,
}

/// Rendered month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub month: CalendarMonth,
    pub label: String,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Lay out a month, placing each activity on its day
    ///
    /// Activities outside the month are ignored, including ones that fall
    /// on a leading or trailing cell.
    pub fn build(month: CalendarMonth, today: NaiveDate, activities: &[Activity]) -> Self {
        let cells = month
            .grid_start()
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| {
                let other_month = CalendarMonth::containing(date) != month;
                let activities = if other_month {
                    Vec::new()
                } else {
                    activities
                        .iter()
                        .filter(|a| a.date == date)
                        .map(ActivitySummary::from)
                        .collect()
                };

                CalendarCell {
                    date,
                    day: date.day(),
                    other_month,
                    today: date == today,
                    activities,
                }
            })
            .collect();

        Self {
            month,
            label: month.label(),
            cells,
        }
    }

    /// Cells of the month itself
    pub fn month_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|c| !c.other_month)
    }
}

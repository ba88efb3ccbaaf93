//! Activity entity - a dated event run by a unit

use chrono::{Datelike, NaiveDate};

use crate::value_objects::{RowId, UnitId};

/// One row of an activity's timetable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleSlot {
    /// Free-form time of day, as entered ("09:30")
    pub time: String,
    pub label: String,
    pub description: String,
    /// Who runs this slot
    pub owner: String,
}

impl ScheduleSlot {
    /// A slot where every field is blank carries no information
    pub fn is_blank(&self) -> bool {
        self.time.trim().is_empty()
            && self.label.trim().is_empty()
            && self.description.trim().is_empty()
            && self.owner.trim().is_empty()
    }
}

/// Activity entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: RowId,
    pub unit_id: UnitId,
    pub title: String,
    pub objectives: Option<String>,
    pub date: NaiveDate,
    /// Results achieved, filled in after the event
    pub achieved: Option<String>,
    pub schedule: Vec<ScheduleSlot>,
}

impl Activity {
    /// Whether the activity falls in the given calendar month
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

/// Data needed to insert or fully rewrite an activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub unit_id: UnitId,
    pub title: String,
    pub objectives: Option<String>,
    pub date: NaiveDate,
    pub achieved: Option<String>,
    pub schedule: Vec<ScheduleSlot>,
}

impl ActivityDraft {
    /// Drop timetable rows that were left empty in the form
    pub fn without_blank_slots(mut self) -> Self {
        self.schedule.retain(|slot| !slot.is_blank());
        self
    }
}

//! Activity entity <-> row mapper

use scout_core::entities::{Activity, ActivityDraft, ScheduleSlot};
use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};
use serde::Serialize;

use super::json::{json_elements, non_blank, parse_date};
use crate::models::{ActivityRow, ScheduleSlotRow};

impl From<ScheduleSlotRow> for ScheduleSlot {
    fn from(row: ScheduleSlotRow) -> Self {
        Self {
            time: row.time,
            label: row.label,
            description: row.description,
            owner: row.owner,
        }
    }
}

impl From<&ScheduleSlot> for ScheduleSlotRow {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            time: slot.time.clone(),
            label: slot.label.clone(),
            description: slot.description.clone(),
            owner: slot.owner.clone(),
        }
    }
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let unit_id = row
            .unit_id
            .as_ref()
            .and_then(UnitId::from_json)
            .ok_or_else(|| DomainError::MalformedRecord(format!("activity {} has no unit", row.id)))?;

        let date = row
            .date
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| DomainError::MalformedRecord(format!("activity {} has no date", row.id)))?;

        let schedule = json_elements::<ScheduleSlotRow>(row.schedule.as_ref(), "tabella_oraria")
            .into_iter()
            .map(ScheduleSlot::from)
            .collect();

        Ok(Activity {
            id: RowId::new(row.id),
            unit_id,
            title: row.title.unwrap_or_default().trim().to_string(),
            objectives: non_blank(row.objectives),
            date,
            achieved: non_blank(row.achieved),
            schedule,
        })
    }
}

/// Values written on insert and on full edits
///
/// The timetable is stored as JSON text, the encoding every client of the
/// table understands.
#[derive(Debug, Serialize)]
pub struct ActivityInsert {
    pub unita_id: i64,
    pub titolo: String,
    pub obiettivi: Option<String>,
    pub data: String,
    pub raggiunti: Option<String>,
    pub tabella_oraria: String,
}

impl TryFrom<&ActivityDraft> for ActivityInsert {
    type Error = DomainError;

    fn try_from(draft: &ActivityDraft) -> Result<Self, Self::Error> {
        let slots: Vec<ScheduleSlotRow> = draft.schedule.iter().map(ScheduleSlotRow::from).collect();
        let tabella_oraria = serde_json::to_string(&slots)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        Ok(Self {
            unita_id: draft.unit_id.into_inner(),
            titolo: draft.title.trim().to_string(),
            obiettivi: non_blank(draft.objectives.clone()),
            data: draft.date.format("%Y-%m-%d").to_string(),
            raggiunti: non_blank(draft.achieved.clone()),
            tabella_oraria,
        })
    }
}

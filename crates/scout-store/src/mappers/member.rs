//! Member entity <-> row mapper

use scout_core::entities::{Member, MemberDraft, Objective};
use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};
use serde::Serialize;

use super::json::{json_elements, non_blank, parse_date};
use crate::models::{MemberRow, ObjectiveRow};

impl From<ObjectiveRow> for Objective {
    fn from(row: ObjectiveRow) -> Self {
        Self {
            title: row.title.trim().to_string(),
            date: row.date.as_deref().and_then(parse_date),
        }
    }
}

impl From<&Objective> for ObjectiveRow {
    fn from(objective: &Objective) -> Self {
        Self {
            title: objective.title.clone(),
            date: objective.date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let unit_id = row
            .unit_id
            .as_ref()
            .and_then(UnitId::from_json)
            .ok_or_else(|| DomainError::MalformedRecord(format!("member {} has no unit", row.id)))?;

        let year = row
            .year
            .as_ref()
            .and_then(UnitId::from_json)
            .and_then(|n| i32::try_from(n.into_inner()).ok());

        let objectives = json_elements::<ObjectiveRow>(row.objectives.as_ref(), "obiettivi")
            .into_iter()
            .map(Objective::from)
            .collect();

        Ok(Member {
            id: RowId::new(row.id),
            unit_id,
            first_name: row.first_name.unwrap_or_default().trim().to_string(),
            last_name: row.last_name.unwrap_or_default().trim().to_string(),
            year,
            role: non_blank(row.role),
            objectives,
        })
    }
}

fn objectives_json(objectives: &[Objective]) -> Result<String, DomainError> {
    let rows: Vec<ObjectiveRow> = objectives.iter().map(ObjectiveRow::from).collect();
    serde_json::to_string(&rows).map_err(|e| DomainError::InternalError(e.to_string()))
}

/// Values written on insert and on full edits
#[derive(Debug, Serialize)]
pub struct MemberInsert {
    pub unita_id: i64,
    pub nome: String,
    pub cognome: String,
    pub anno: Option<i32>,
    pub ruolo: Option<String>,
    pub obiettivi: String,
}

impl TryFrom<&MemberDraft> for MemberInsert {
    type Error = DomainError;

    fn try_from(draft: &MemberDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            unita_id: draft.unit_id.into_inner(),
            nome: draft.first_name.trim().to_string(),
            cognome: draft.last_name.trim().to_string(),
            anno: draft.year,
            ruolo: non_blank(draft.role.clone()),
            obiettivi: objectives_json(&draft.objectives)?,
        })
    }
}

/// Replaces only the objective list
#[derive(Debug, Serialize)]
pub struct ObjectivesPatch {
    pub obiettivi: String,
}

impl ObjectivesPatch {
    pub fn new(objectives: &[Objective]) -> Result<Self, DomainError> {
        Ok(Self {
            obiettivi: objectives_json(objectives)?,
        })
    }
}

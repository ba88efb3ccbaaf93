//! Unit entity <-> row mapper

use scout_core::entities::{NewUnit, Unit};
use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};
use serde::Serialize;
use super::json::{non_blank, row_id_from_json};
use crate::models::UnitRow;

impl TryFrom<UnitRow> for Unit {
    type Error = DomainError;

    fn try_from(row: UnitRow) -> Result<Self, Self::Error> {
        let id = UnitId::from_json(&row.id)
            .ok_or_else(|| DomainError::MalformedRecord(format!("unit id {}", row.id)))?;

        let helper_ids = match &row.helpers {
            Some(raw) => UnitId::normalize_all(raw)
                .into_iter()
                .map(|id| RowId::new(id.into_inner()))
                .collect(),
            None => Vec::new(),
        };

        Ok(Unit {
            id,
            name: non_blank(row.name).unwrap_or_default(),
            leader_id: row.leader.as_ref().and_then(row_id_from_json),
            helper_ids,
            member_count: row
                .member_count
                .as_ref()
                .and_then(|v| UnitId::from_json(v).map(UnitId::into_inner))
                .unwrap_or(0),
        })
    }
}

fn helper_values(ids: &[RowId]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// Values for inserting a unit
#[derive(Debug, Serialize)]
pub struct UnitInsert {
    pub nome: String,
    pub capo_unita: Option<i64>,
    pub aiuti: Vec<i64>,
    pub nr_membri: i64,
}

impl From<&NewUnit> for UnitInsert {
    fn from(unit: &NewUnit) -> Self {
        Self {
            nome: unit.name.trim().to_string(),
            capo_unita: unit.leader_id.map(RowId::into_inner),
            aiuti: helper_values(&unit.helper_ids),
            nr_membri: unit.member_count.max(0),
        }
    }
}

/// Values rewritten when a unit is edited
#[derive(Debug, Serialize)]
pub struct UnitUpdate {
    pub nome: String,
    pub capo_unita: Option<i64>,
    pub aiuti: Vec<i64>,
}

impl From<&Unit> for UnitUpdate {
    fn from(unit: &Unit) -> Self {
        Self {
            nome: unit.name.trim().to_string(),
            capo_unita: unit.leader_id.map(RowId::into_inner),
            aiuti: helper_values(&unit.helper_ids),
        }
    }
}

/// Denormalized member count
#[derive(Debug, Serialize)]
pub struct MemberCountPatch {
    pub nr_membri: i64,
}

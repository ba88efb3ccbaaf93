//! Setting entity <-> row mapper

use scout_core::entities::{NewSetting, Setting};
use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};
use serde::Serialize;

use crate::models::SettingRow;

impl TryFrom<SettingRow> for Setting {
    type Error = DomainError;

    fn try_from(row: SettingRow) -> Result<Self, Self::Error> {
        let unit_id = row
            .unit_id
            .as_ref()
            .and_then(UnitId::from_json)
            .ok_or_else(|| DomainError::MalformedRecord(format!("setting {} has no unit", row.id)))?;

        Ok(Setting {
            id: RowId::new(row.id),
            unit_id,
            key: row.key,
            value: row.value.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SettingInsert<'a> {
    pub unita_id: i64,
    pub chiave: &'a str,
    pub valore: &'a str,
}

impl<'a> From<&'a NewSetting> for SettingInsert<'a> {
    fn from(setting: &'a NewSetting) -> Self {
        Self {
            unita_id: setting.unit_id.into_inner(),
            chiave: setting.key.trim(),
            valore: &setting.value,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingValuePatch<'a> {
    pub valore: &'a str,
}

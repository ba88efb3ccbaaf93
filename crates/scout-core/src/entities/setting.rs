//! Setting entity - a key/value pair attached to a unit

use crate::value_objects::{RowId, UnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub id: RowId,
    pub unit_id: UnitId,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSetting {
    pub unit_id: UnitId,
    pub key: String,
    pub value: String,
}

//! Unit row model

use serde::Deserialize;
use serde_json::Value;

/// Row of the `unita` table
#[derive(Debug, Clone, Deserialize)]
pub struct UnitRow {
    pub id: Value,
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "capo_unita")]
    pub leader: Option<Value>,
    #[serde(default, rename = "aiuti")]
    pub helpers: Option<Value>,
    #[serde(default, rename = "nr_membri")]
    pub member_count: Option<Value>,
}

impl UnitRow {
    pub const TABLE: &'static str = "unita";
}

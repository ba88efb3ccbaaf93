//! Setting row model

use serde::Deserialize;
use serde_json::Value;

/// Row of the `impostazioni` table
#[derive(Debug, Clone, Deserialize)]
pub struct SettingRow {
    pub id: i64,
    #[serde(default, rename = "unita_id")]
    pub unit_id: Option<Value>,
    #[serde(rename = "chiave")]
    pub key: String,
    #[serde(default, rename = "valore")]
    pub value: Option<String>,
}

impl SettingRow {
    pub const TABLE: &'static str = "impostazioni";
}

//! Activity row model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row of the `attivita` table
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRow {
    pub id: i64,
    #[serde(default, rename = "unita_id")]
    pub unit_id: Option<Value>,
    #[serde(default, rename = "titolo")]
    pub title: Option<String>,
    #[serde(default, rename = "obiettivi")]
    pub objectives: Option<String>,
    #[serde(default, rename = "data")]
    pub date: Option<String>,
    #[serde(default, rename = "raggiunti")]
    pub achieved: Option<String>,
    /// JSON array of slots, stored either as JSON or as a JSON string
    #[serde(default, rename = "tabella_oraria")]
    pub schedule: Option<Value>,
}

impl ActivityRow {
    pub const TABLE: &'static str = "attivita";
}

/// One element of `tabella_oraria`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleSlotRow {
    #[serde(default, rename = "ora")]
    pub time: String,
    #[serde(default, rename = "titolo")]
    pub label: String,
    #[serde(default, rename = "descrizione")]
    pub description: String,
    #[serde(default, rename = "gestore")]
    pub owner: String,
}

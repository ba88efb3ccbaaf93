//! Member row model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row of the `membri` table
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRow {
    pub id: i64,
    #[serde(default, rename = "unita_id")]
    pub unit_id: Option<Value>,
    #[serde(default, rename = "nome")]
    pub first_name: Option<String>,
    #[serde(default, rename = "cognome")]
    pub last_name: Option<String>,
    #[serde(default, rename = "anno")]
    pub year: Option<Value>,
    #[serde(default, rename = "ruolo")]
    pub role: Option<String>,
    /// JSON array of objectives, stored either as JSON or as a JSON string
    #[serde(default, rename = "obiettivi")]
    pub objectives: Option<Value>,
}

impl MemberRow {
    pub const TABLE: &'static str = "membri";
}

/// One element of `obiettivi`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectiveRow {
    #[serde(default, rename = "titolo")]
    pub title: String,
    #[serde(default, rename = "data")]
    pub date: Option<String>,
}

//! User roster row model

use serde::Deserialize;
use serde_json::Value;

/// Row of the `utenti` table
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: i64,
    #[serde(default)]
    pub auth_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "nome")]
    pub first_name: Option<String>,
    #[serde(default, rename = "cognome")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub admin: Option<bool>,
    #[serde(default, rename = "capo_unita")]
    pub unit_leader: Option<bool>,
    #[serde(default, rename = "aiuto")]
    pub helper: Option<bool>,
    #[serde(default, rename = "unita_id")]
    pub home_unit_id: Option<Value>,
    /// Current name of the visible-units column
    #[serde(default, rename = "unita_visibili")]
    pub visible_units: Option<Value>,
    /// Older name of the same column, still present on some deployments
    #[serde(default, rename = "unita_associate")]
    pub associated_units: Option<Value>,
}

impl UserRow {
    pub const TABLE: &'static str = "utenti";
}

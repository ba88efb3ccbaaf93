//! Unit entity - an organizational sub-group (e.g. a troop)

use crate::value_objects::{RowId, UnitId};

/// Unit entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// Leader (capo unità) roster id
    pub leader_id: Option<RowId>,
    /// Helper (aiuti) roster ids
    pub helper_ids: Vec<RowId>,
    /// Denormalized count of member rows owned by this unit
    pub member_count: i64,
}

impl Unit {
    pub fn new(id: UnitId, name: String) -> Self {
        Self {
            id,
            name,
            leader_id: None,
            helper_ids: Vec::new(),
            member_count: 0,
        }
    }

    #[inline]
    pub fn is_led_by(&self, user_id: RowId) -> bool {
        self.leader_id == Some(user_id)
    }

    #[inline]
    pub fn has_helper(&self, user_id: RowId) -> bool {
        self.helper_ids.contains(&user_id)
    }

    /// Leader or helper of this unit
    pub fn is_staffed_by(&self, user_id: RowId) -> bool {
        self.is_led_by(user_id) || self.has_helper(user_id)
    }
}

/// Data needed to insert a new unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnit {
    pub name: String,
    pub leader_id: Option<RowId>,
    pub helper_ids: Vec<RowId>,
    pub member_count: i64,
}

/// Unit joined with its leader's display name (site administration list)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitWithLeader {
    pub unit: Unit,
    pub leader_name: Option<String>,
}

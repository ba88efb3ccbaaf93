//! Member entity - a youth member belonging to a unit

use chrono::NaiveDate;

use crate::value_objects::{RowId, UnitId};

/// An objective a member has reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub title: String,
    pub date: Option<NaiveDate>,
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: RowId,
    pub unit_id: UnitId,
    pub first_name: String,
    pub last_name: String,
    pub year: Option<i32>,
    pub role: Option<String>,
    pub objectives: Vec<Objective>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Append an objective, keeping insertion order
    pub fn add_objective(&mut self, objective: Objective) {
        self.objectives.push(objective);
    }

    /// Remove the objective at `index`, if any
    pub fn remove_objective(&mut self, index: usize) -> Option<Objective> {
        (index < self.objectives.len()).then(|| self.objectives.remove(index))
    }

    #[inline]
    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }
}

/// Data needed to insert or fully rewrite a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub unit_id: UnitId,
    pub first_name: String,
    pub last_name: String,
    pub year: Option<i32>,
    pub role: Option<String>,
    pub objectives: Vec<Objective>,
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            unit_id: member.unit_id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            year: member.year,
            role: member.role.clone(),
            objectives: member.objectives.clone(),
        }
    }
}

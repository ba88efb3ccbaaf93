//! Entity to DTO mappers
//!
//! Implements `From` conversions between domain entities and DTOs.

use scout_core::entities::{
    Activity, ActivityDraft, Member, MemberDraft, NewSetting, NewUnit, Objective, ScheduleSlot,
    Setting, Unit, UnitWithLeader, User,
};
use scout_core::UserRoles;

use super::requests::{
    ActivityRequest, MemberRequest, ObjectiveRequest, ScheduleSlotRequest, SettingRequest,
    UnitRequest, UpdateAccessRequest,
};
use super::responses::{
    ActivitySummary, ActivityView, ConsoleCapabilities, MemberView, ObjectiveView,
    ScheduleSlotView, SettingView, UnitCard, UnitOption, UserSummary,
};

// ============================================================================
// Requests to domain
// ============================================================================

impl From<ScheduleSlotRequest> for ScheduleSlot {
    fn from(slot: ScheduleSlotRequest) -> Self {
        Self {
            time: slot.time.trim().to_string(),
            label: slot.label.trim().to_string(),
            description: slot.description.trim().to_string(),
            owner: slot.owner.trim().to_string(),
        }
    }
}

impl From<ActivityRequest> for ActivityDraft {
    fn from(request: ActivityRequest) -> Self {
        Self {
            unit_id: request.unit_id,
            title: request.title.trim().to_string(),
            objectives: request.objectives,
            date: request.date,
            achieved: request.achieved,
            schedule: request.schedule.into_iter().map(ScheduleSlot::from).collect(),
        }
        .without_blank_slots()
    }
}

impl From<ObjectiveRequest> for Objective {
    fn from(request: ObjectiveRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            date: request.date,
        }
    }
}

impl From<MemberRequest> for MemberDraft {
    fn from(request: MemberRequest) -> Self {
        Self {
            unit_id: request.unit_id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            year: request.year,
            role: request.role,
            objectives: request.objectives.into_iter().map(Objective::from).collect(),
        }
    }
}

impl From<SettingRequest> for NewSetting {
    fn from(request: SettingRequest) -> Self {
        Self {
            unit_id: request.unit_id,
            key: request.key.trim().to_string(),
            value: request.value,
        }
    }
}

impl From<UnitRequest> for NewUnit {
    fn from(request: UnitRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            leader_id: request.leader_id,
            helper_ids: request.helper_ids,
            member_count: request.member_count.unwrap_or(0),
        }
    }
}

impl UnitRequest {
    /// Apply the form onto an existing unit, keeping its id
    pub fn apply_to(self, unit: &mut Unit) {
        unit.name = self.name.trim().to_string();
        unit.leader_id = self.leader_id;
        unit.helper_ids = self.helper_ids;
        if let Some(count) = self.member_count {
            unit.member_count = count;
        }
    }
}

impl UpdateAccessRequest {
    pub fn roles(&self) -> UserRoles {
        UserRoles::from_flags(self.admin, self.unit_leader, self.helper)
    }
}

// ============================================================================
// Domain to views
// ============================================================================

impl From<&User> for ConsoleCapabilities {
    fn from(user: &User) -> Self {
        Self {
            unit_admin_tab: user.roles.manages_unit(),
            site_admin_tab: user.is_admin(),
            registration_links: user.is_admin(),
        }
    }
}

impl From<&Unit> for UnitOption {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
        }
    }
}

impl From<&UnitWithLeader> for UnitCard {
    fn from(item: &UnitWithLeader) -> Self {
        Self {
            id: item.unit.id,
            name: item.unit.name.clone(),
            leader_name: item.leader_name.clone(),
            helper_count: item.unit.helper_ids.len(),
            member_count: item.unit.member_count,
        }
    }
}

impl From<&ScheduleSlot> for ScheduleSlotView {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            time: slot.time.clone(),
            label: slot.label.clone(),
            description: slot.description.clone(),
            owner: slot.owner.clone(),
        }
    }
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            unit_id: activity.unit_id,
            title: activity.title.clone(),
            objectives: activity.objectives.clone(),
            date: activity.date,
            achieved: activity.achieved.clone(),
            schedule: activity.schedule.iter().map(ScheduleSlotView::from).collect(),
        }
    }
}

impl From<&Activity> for ActivitySummary {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title.clone(),
        }
    }
}

impl From<&Objective> for ObjectiveView {
    fn from(objective: &Objective) -> Self {
        Self {
            title: objective.title.clone(),
            date: objective.date,
        }
    }
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            unit_id: member.unit_id,
            full_name: member.full_name(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            year: member.year,
            role: member.role.clone(),
            objectives: member.objectives.iter().map(ObjectiveView::from).collect(),
        }
    }
}

impl From<&Setting> for SettingView {
    fn from(setting: &Setting) -> Self {
        Self {
            id: setting.id,
            key: setting.key.clone(),
            value: setting.value.clone(),
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name(),
            admin: user.is_admin(),
            unit_leader: user.roles.is_unit_leader(),
            helper: user.roles.is_helper(),
            visible_unit_ids: user.visible_unit_ids.clone(),
        }
    }
}

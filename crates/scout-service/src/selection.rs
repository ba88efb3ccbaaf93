//! Unit selection
//!
//! Selecting a unit loads everything its panels show. Every selection takes
//! a ticket from a [`SelectionTracker`]; a load may only commit its result
//! while its ticket is still the latest one, so a slow load for an earlier
//! selection can never overwrite a newer one.

use chrono::NaiveDate;
use scout_core::{AccessScope, Unit, UnitId};

use crate::calendar::{CalendarGrid, CalendarMonth};
use crate::dto::{ActivityView, MemberView, SettingView};
use crate::services::{
    ActivityService, MemberService, ServiceContext, ServiceResult, SettingService, UnitService,
};

/// Proof of a selection request, ordered by issue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionTicket(u64);

/// Issues tickets and remembers the latest
#[derive(Debug, Default)]
pub struct SelectionTracker {
    latest: u64,
}

impl SelectionTracker {
    /// Take a new ticket, superseding every earlier one
    pub fn issue(&mut self) -> SelectionTicket {
        self.latest += 1;
        SelectionTicket(self.latest)
    }

    #[inline]
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Everything shown for a selected unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPanel {
    pub unit: Unit,
    pub activities: Vec<ActivityView>,
    pub members: Vec<MemberView>,
    pub settings: Vec<SettingView>,
    pub calendar: CalendarGrid,
}

impl UnitPanel {
    /// Load a unit's panels
    ///
    /// The unit is checked against the scope before anything is fetched;
    /// the dependent lists are then loaded concurrently.
    pub async fn load(
        ctx: &ServiceContext,
        scope: &AccessScope,
        unit_id: UnitId,
        month: CalendarMonth,
        today: NaiveDate,
    ) -> ServiceResult<Self> {
        let unit = UnitService::new(ctx).get_unit(scope, unit_id).await?;

        let activity_service = ActivityService::new(ctx);
        let member_service = MemberService::new(ctx);
        let setting_service = SettingService::new(ctx);
        let (activities, month_activities, members, settings) = futures::try_join!(
            activity_service.list(scope, unit_id),
            activity_service.in_month(scope, unit_id, month),
            member_service.list(scope, unit_id),
            setting_service.list(scope, unit_id),
        )?;

        Ok(Self {
            unit,
            activities,
            members,
            settings,
            calendar: CalendarGrid::build(month, today, &month_activities),
        })
    }
}

/// State of the unit picker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitSelection {
    #[default]
    NoUnitSelected,
    LoadingUnit {
        unit_id: UnitId,
        ticket: SelectionTicket,
    },
    UnitSelected(Box<UnitPanel>),
    /// Load failed or the unit was out of scope; nothing from an earlier
    /// selection is kept
    UnitLoadFailed {
        unit_id: Option<UnitId>,
        error: String,
    },
}

impl UnitSelection {
    /// Unit being shown or loaded
    pub fn unit_id(&self) -> Option<UnitId> {
        match self {
            Self::NoUnitSelected => None,
            Self::LoadingUnit { unit_id, .. } => Some(*unit_id),
            Self::UnitSelected(panel) => Some(panel.unit.id),
            Self::UnitLoadFailed { unit_id, .. } => *unit_id,
        }
    }

    pub fn panel(&self) -> Option<&UnitPanel> {
        match self {
            Self::UnitSelected(panel) => Some(panel.as_ref()),
            _ => None,
        }
    }

    pub fn panel_mut(&mut self) -> Option<&mut UnitPanel> {
        match self {
            Self::UnitSelected(panel) => Some(panel.as_mut()),
            _ => None,
        }
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::LoadingUnit { .. })
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::UnitLoadFailed { .. })
    }
}

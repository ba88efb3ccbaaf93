//! # scout-service
//!
//! Application layer: services over the repository and auth traits, view
//! models for the console panels, the month calendar, the unit selection
//! state machine and the [`ConsoleController`] that owns the session.

pub mod calendar;
pub mod console;
pub mod dto;
pub mod selection;
pub mod services;

pub use calendar::{CalendarCell, CalendarGrid, CalendarMonth};
pub use console::{ConsoleController, ConsoleState, LoggedOutReason, SessionContext};
pub use selection::{SelectionTicket, SelectionTracker, UnitPanel, UnitSelection};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};

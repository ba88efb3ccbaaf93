//! Value objects - immutable types that represent domain concepts

mod roles;
mod unit_id;

pub use roles::UserRoles;
pub use unit_id::{RowId, UnitId, UnitIdParseError};

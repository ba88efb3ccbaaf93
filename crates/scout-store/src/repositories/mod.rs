//! Repository implementations
//!
//! REST implementations of the repository traits defined in scout-core.
//! Each repository owns a clone of the shared [`RestClient`](crate::RestClient).

mod activity;
mod error;
mod member;
mod setting;
mod unit;
mod user;

pub use activity::RestActivityRepository;
pub use member::RestMemberRepository;
pub use setting::RestSettingRepository;
pub use unit::RestUnitRepository;
pub use user::RestUserRepository;

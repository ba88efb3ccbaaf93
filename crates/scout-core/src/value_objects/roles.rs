//! Role flags carried on a user profile

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Profile role flags
    ///
    /// Stored in the backend as three independent boolean columns
    /// (`admin`, `capo_unita`, `aiuto`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserRoles: u8 {
        /// Site administrator: unrestricted scope over units and users
        const ADMIN       = 1 << 0;
        /// Leader of a unit (capo unità)
        const UNIT_LEADER = 1 << 1;
        /// Helper of a unit (aiuto)
        const HELPER      = 1 << 2;
    }
}

impl UserRoles {
    /// Build from the three backend columns
    pub fn from_flags(admin: bool, unit_leader: bool, helper: bool) -> Self {
        let mut roles = Self::empty();
        roles.set(Self::ADMIN, admin);
        roles.set(Self::UNIT_LEADER, unit_leader);
        roles.set(Self::HELPER, helper);
        roles
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.contains(Self::ADMIN)
    }

    #[inline]
    pub fn is_unit_leader(&self) -> bool {
        self.contains(Self::UNIT_LEADER)
    }

    #[inline]
    pub fn is_helper(&self) -> bool {
        self.contains(Self::HELPER)
    }

    /// Leaders and helpers get the unit administration panel
    #[inline]
    pub fn manages_unit(&self) -> bool {
        self.intersects(Self::UNIT_LEADER | Self::HELPER)
    }

    /// Get a list of all individual roles that are set
    pub fn list(&self) -> Vec<&'static str> {
        let mut result = Vec::new();
        if self.contains(Self::ADMIN) {
            result.push("ADMIN");
        }
        if self.contains(Self::UNIT_LEADER) {
            result.push("UNIT_LEADER");
        }
        if self.contains(Self::HELPER) {
            result.push("HELPER");
        }
        result
    }
}

impl fmt::Display for UserRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        f.write_str(&self.list().join("|"))
    }
}

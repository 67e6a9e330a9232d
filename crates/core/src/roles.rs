//! Role names, capabilities, and the acting user.
//!
//! Role names must match the `role` claim issued with access tokens.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_TECHNICIAN: &str = "technician";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_TECHNICIAN, ROLE_VIEWER];

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Technician,
    Viewer,
}

impl Role {
    /// Parse a role from its claim name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_MANAGER => Ok(Self::Manager),
            ROLE_TECHNICIAN => Ok(Self::Technician),
            ROLE_VIEWER => Ok(Self::Viewer),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {VALID_ROLES:?}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Manager => ROLE_MANAGER,
            Self::Technician => ROLE_TECHNICIAN,
            Self::Viewer => ROLE_VIEWER,
        }
    }

    /// Field work: ticking checklist items and logging inspections.
    pub fn can_operate(self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Technician)
    }

    /// Creating, editing, trashing and restoring checks.
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Irreversible removal from the recycle bin.
    pub fn can_purge(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    /// Display name, stamped onto history entries.
    pub name: String,
    pub role: Role,
    /// Clubs this actor may see. `None` means every club.
    pub club_ids: Option<Vec<DbId>>,
}

impl Actor {
    pub fn new(user_id: DbId, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
            club_ids: None,
        }
    }

    /// Restrict the actor to the given clubs.
    pub fn with_clubs(mut self, club_ids: Vec<DbId>) -> Self {
        self.club_ids = Some(club_ids);
        self
    }

    /// Whether records of `club_id` are visible to this actor. Admins see all.
    pub fn can_see_club(&self, club_id: DbId) -> bool {
        if self.role == Role::Admin {
            return true;
        }
        match &self.club_ids {
            Some(ids) => ids.contains(&club_id),
            None => true,
        }
    }

    pub fn require_operator(&self) -> Result<(), CoreError> {
        if self.role.can_operate() {
            Ok(())
        } else {
            Err(self.forbidden("Admin, Manager or Technician role required"))
        }
    }

    pub fn require_manager(&self) -> Result<(), CoreError> {
        if self.role.can_manage() {
            Ok(())
        } else {
            Err(self.forbidden("Admin or Manager role required"))
        }
    }

    pub fn require_purge(&self) -> Result<(), CoreError> {
        if self.role.can_purge() {
            Ok(())
        } else {
            Err(self.forbidden("Admin role required"))
        }
    }

    fn forbidden(&self, msg: &str) -> CoreError {
        tracing::warn!(user_id = self.user_id, role = %self.role, "{msg}");
        CoreError::Forbidden(msg.to_string())
    }
}

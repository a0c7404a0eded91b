use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{UserRole, ViewerRole};

/// Authenticated caller identity, produced by an `IdentityResolver`.
///
/// The engine receives identities, never tokens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: UserRole,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    #[must_use]
    pub const fn viewer(&self) -> ViewerRole {
        self.role.viewer()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

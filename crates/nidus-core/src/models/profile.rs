//! Profile domain model and the role vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{NidusError, NidusResult};
use crate::validate::{Validate, invalid, require_nonempty};

/// Program role attached to a profile.
///
/// Determines which dashboard variant the user sees. The stored form is
/// snake_case; parsing is fallible because the external store may hold
/// role values outside this set, which route to the unknown-role state
/// rather than failing the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProgramManager,
    Mentor,
    Investor,
    Founder,
    Support,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::ProgramManager,
        Role::Mentor,
        Role::Investor,
        Role::Founder,
        Role::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ProgramManager => "program_manager",
            Role::Mentor => "mentor",
            Role::Investor => "investor",
            Role::Founder => "founder",
            Role::Support => "support",
        }
    }
}

impl FromStr for Role {
    type Err = NidusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "program_manager" => Ok(Role::ProgramManager),
            "mentor" => Ok(Role::Mentor),
            "investor" => Ok(Role::Investor),
            "founder" => Ok(Role::Founder),
            "support" => Ok(Role::Support),
            other => Err(invalid(format!("unknown role: {other}"))),
        }
    }
}

/// A member of an organization, keyed by the authenticated user id.
///
/// `role` stays a raw string here so records with unrecognized role values
/// still round-trip; routing parses it and falls back to the unknown-role
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Absent until the profile is provisioned into an organization.
    pub organization_id: Option<Uuid>,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    pub organization_id: Option<Uuid>,
    pub email: String,
    pub role: Role,
    pub display_name: Option<String>,
}

/// Fields that can be updated on an existing profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfile {
    pub organization_id: Option<Uuid>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub display_name: Option<String>,
    pub active: Option<bool>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Validate for CreateProfile {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(invalid("email must contain '@'"));
        }
        Ok(())
    }
}

impl Validate for UpdateProfile {
    fn validate(&self) -> NidusResult<()> {
        if let Some(email) = &self.email {
            require_nonempty("email", email)?;
            if !email.contains('@') {
                return Err(invalid("email must contain '@'"));
            }
        }
        Ok(())
    }
}

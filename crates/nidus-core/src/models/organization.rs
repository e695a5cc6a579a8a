//! Organization domain model.
//!
//! Organizations are the tenant boundary in NIDUS: every program entity
//! (startups, cohorts, mentors, investments, events, materials) is scoped
//! by an organization id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, require_nonempty};

/// An organization running an incubation program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `acme-accelerator`).
    pub slug: String,
    /// Primary email/web domain, if the organization claimed one.
    pub domain: Option<String>,
    pub description: Option<String>,
    /// Arbitrary program settings, opaque to this layer.
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub settings: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub settings: Option<serde_json::Value>,
}

impl Validate for CreateOrganization {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("name", &self.name)?;
        require_nonempty("slug", &self.slug)?;
        Ok(())
    }
}

impl Validate for UpdateOrganization {
    fn validate(&self) -> NidusResult<()> {
        if let Some(name) = &self.name {
            require_nonempty("name", name)?;
        }
        if let Some(slug) = &self.slug {
            require_nonempty("slug", slug)?;
        }
        Ok(())
    }
}

//! Startup domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, require_nonempty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStage {
    Idea,
    Mvp,
    EarlyStage,
    Growth,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStatus {
    Active,
    Graduated,
    Withdrawn,
    Suspended,
}

/// A startup enrolled in an organization's program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Startup {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Cohort the startup currently belongs to, if assigned.
    pub cohort_id: Option<Uuid>,
    pub name: String,
    pub industry: String,
    pub stage: StartupStage,
    pub founded_date: Option<NaiveDate>,
    pub employee_count: Option<u32>,
    pub funding_raised: Option<f64>,
    pub status: StartupStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new startup. New startups begin `active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStartup {
    pub organization_id: Uuid,
    pub cohort_id: Option<Uuid>,
    pub name: String,
    pub industry: String,
    pub stage: StartupStage,
    pub founded_date: Option<NaiveDate>,
    pub employee_count: Option<u32>,
    pub funding_raised: Option<f64>,
}

/// Fields that can be updated on an existing startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateStartup {
    /// `Some(Some(id))` = assign, `Some(None)` = unassign, `None` = no change.
    pub cohort_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub stage: Option<StartupStage>,
    pub founded_date: Option<NaiveDate>,
    pub employee_count: Option<u32>,
    pub funding_raised: Option<f64>,
    pub status: Option<StartupStatus>,
}

impl Validate for CreateStartup {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("name", &self.name)?;
        require_nonempty("industry", &self.industry)?;
        Ok(())
    }
}

impl Validate for UpdateStartup {
    fn validate(&self) -> NidusResult<()> {
        if let Some(name) = &self.name {
            require_nonempty("name", name)?;
        }
        if let Some(industry) = &self.industry {
            require_nonempty("industry", industry)?;
        }
        Ok(())
    }
}

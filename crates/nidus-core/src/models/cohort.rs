//! Cohort domain model.
//!
//! A cohort is a time-boxed batch of startups progressing through the
//! program together.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, invalid, require_nonempty};

/// Capacity bounds enforced on form submission, before any query is issued.
pub const MIN_COHORT_CAPACITY: u32 = 1;
pub const MAX_COHORT_CAPACITY: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortStatus {
    Planning,
    Recruiting,
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohort {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CohortStatus,
    pub max_startups: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new cohort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCohort {
    pub organization_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CohortStatus,
    pub max_startups: u32,
}

/// Fields that can be updated on an existing cohort.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCohort {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CohortStatus>,
    pub max_startups: Option<u32>,
}

fn check_capacity(max_startups: u32) -> NidusResult<()> {
    if !(MIN_COHORT_CAPACITY..=MAX_COHORT_CAPACITY).contains(&max_startups) {
        return Err(invalid(format!(
            "max_startups must be between {MIN_COHORT_CAPACITY} and {MAX_COHORT_CAPACITY}, got {max_startups}"
        )));
    }
    Ok(())
}

impl Validate for CreateCohort {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("name", &self.name)?;
        check_capacity(self.max_startups)?;
        if self.end_date < self.start_date {
            return Err(invalid("end_date must not precede start_date"));
        }
        Ok(())
    }
}

impl Validate for UpdateCohort {
    fn validate(&self) -> NidusResult<()> {
        if let Some(name) = &self.name {
            require_nonempty("name", name)?;
        }
        if let Some(max_startups) = self.max_startups {
            check_capacity(max_startups)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(invalid("end_date must not precede start_date"));
            }
        }
        Ok(())
    }
}

//! Mentor domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::Validate;

/// A mentor advising startups within an organization.
///
/// Mentors map 1—1 onto a profile via `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub expertise_areas: Vec<String>,
    pub industries: Vec<String>,
    pub rating: Option<f64>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new mentor. New mentors start available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMentor {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub expertise_areas: Vec<String>,
    pub industries: Vec<String>,
}

/// Fields that can be updated on an existing mentor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateMentor {
    pub expertise_areas: Option<Vec<String>>,
    pub industries: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub available: Option<bool>,
}

impl Validate for CreateMentor {
    fn validate(&self) -> NidusResult<()> {
        Ok(())
    }
}

impl Validate for UpdateMentor {
    fn validate(&self) -> NidusResult<()> {
        Ok(())
    }
}

//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, require_nonempty};

/// A program event: demo day, workshop, office hours, and the like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub event_type: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    pub organization_id: Uuid,
    pub title: String,
    pub event_type: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
}

/// Fields that can be updated on an existing event.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

impl Validate for CreateEvent {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("event_type", &self.event_type)?;
        Ok(())
    }
}

impl Validate for UpdateEvent {
    fn validate(&self) -> NidusResult<()> {
        if let Some(title) = &self.title {
            require_nonempty("title", title)?;
        }
        if let Some(event_type) = &self.event_type {
            require_nonempty("event_type", event_type)?;
        }
        Ok(())
    }
}

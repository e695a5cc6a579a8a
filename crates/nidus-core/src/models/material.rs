//! Material domain model.
//!
//! Materials are metadata rows for files uploaded to the external blob
//! store; the blob itself lives behind the storage boundary and is
//! referenced by its public URL. Materials are the only deletable entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, require_nonempty};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Startup the material belongs to, if it is startup-specific.
    pub startup_id: Option<Uuid>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Public URL of the stored object.
    pub url: String,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to persist upload metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterial {
    pub organization_id: Uuid,
    pub startup_id: Option<Uuid>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub url: String,
    pub uploaded_by: Option<Uuid>,
}

/// Fields that can be updated on an existing material.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateMaterial {
    pub file_name: Option<String>,
    /// `Some(Some(id))` = attach, `Some(None)` = detach, `None` = no change.
    pub startup_id: Option<Option<Uuid>>,
}

impl Validate for CreateMaterial {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("file_name", &self.file_name)?;
        require_nonempty("content_type", &self.content_type)?;
        require_nonempty("url", &self.url)?;
        Ok(())
    }
}

impl Validate for UpdateMaterial {
    fn validate(&self) -> NidusResult<()> {
        if let Some(file_name) = &self.file_name {
            require_nonempty("file_name", file_name)?;
        }
        Ok(())
    }
}

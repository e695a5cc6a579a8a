//! Row mapping and per-startup listing for materials.

use chrono::{DateTime, Utc};
use nidus_core::error::NidusResult;
use nidus_core::models::material::{CreateMaterial, Material, UpdateMaterial};
use nidus_core::repository::{MaterialQueries, PaginatedResult, Pagination};
use surrealdb::Connection;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{
    Fields, SurrealRecord, SurrealStore, parse_opt_uuid, parse_uuid,
};

#[derive(Debug, SurrealValue)]
pub(crate) struct MaterialRow {
    record_id: String,
    organization_id: String,
    startup_id: Option<String>,
    file_name: String,
    content_type: String,
    size_bytes: u64,
    url: String,
    uploaded_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Material {
    type Row = MaterialRow;

    fn from_row(row: MaterialRow) -> Result<Self, DbError> {
        Ok(Material {
            id: parse_uuid("material.id", &row.record_id)?,
            organization_id: parse_uuid("material.organization_id", &row.organization_id)?,
            startup_id: parse_opt_uuid("material.startup_id", row.startup_id.as_deref())?,
            file_name: row.file_name,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            url: row.url,
            uploaded_by: parse_opt_uuid("material.uploaded_by", row.uploaded_by.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateMaterial) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            (
                "startup_id",
                input.startup_id.map(|id| id.to_string()).into_value(),
            ),
            ("file_name", input.file_name.into_value()),
            ("content_type", input.content_type.into_value()),
            ("size_bytes", input.size_bytes.into_value()),
            ("url", input.url.into_value()),
            (
                "uploaded_by",
                input.uploaded_by.map(|id| id.to_string()).into_value(),
            ),
        ]
    }

    fn update_fields(input: UpdateMaterial) -> Fields {
        let mut fields = Fields::new();
        if let Some(file_name) = input.file_name {
            fields.push(("file_name", file_name.into_value()));
        }
        if let Some(startup_id) = input.startup_id {
            // Some(None) detaches the material from its startup.
            fields.push(("startup_id", startup_id.map(|id| id.to_string()).into_value()));
        }
        fields
    }
}

impl<C: Connection> MaterialQueries for SurrealStore<C> {
    async fn list_by_startup(
        &self,
        organization_id: Uuid,
        startup_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<Material>> {
        self.list_where(
            Some("organization_id = $org AND startup_id = $startup"),
            vec![
                ("org", organization_id.to_string().into_value()),
                ("startup", startup_id.to_string().into_value()),
            ],
            pagination,
        )
        .await
    }
}

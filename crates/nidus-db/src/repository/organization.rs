//! Row mapping and global-scope repository for organizations.
//!
//! Organizations are the tenant root, so they sit outside the generic
//! organization-scoped implementation and get a bespoke trait impl with
//! slug lookup and an unfiltered list.

use nidus_core::error::NidusResult;
use nidus_core::models::organization::{
    CreateOrganization, Organization, UpdateOrganization,
};
use nidus_core::repository::{OrganizationRepository, PaginatedResult, Pagination};
use surrealdb::Connection;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{Fields, PROJECTION, SurrealRecord, SurrealStore, parse_uuid};

#[derive(Debug, SurrealValue)]
pub(crate) struct OrganizationRow {
    record_id: String,
    name: String,
    slug: String,
    domain: Option<String>,
    description: Option<String>,
    settings: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl SurrealRecord for Organization {
    type Row = OrganizationRow;

    fn from_row(row: OrganizationRow) -> Result<Self, DbError> {
        Ok(Organization {
            id: parse_uuid("organization.id", &row.record_id)?,
            name: row.name,
            slug: row.slug,
            domain: row.domain,
            description: row.description,
            settings: row.settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateOrganization) -> Fields {
        let settings = input
            .settings
            .unwrap_or(serde_json::Value::Object(Default::default()));
        vec![
            ("name", input.name.into_value()),
            ("slug", input.slug.into_value()),
            ("domain", input.domain.into_value()),
            ("description", input.description.into_value()),
            ("settings", settings.into_value()),
        ]
    }

    fn update_fields(input: UpdateOrganization) -> Fields {
        let mut fields = Fields::new();
        if let Some(name) = input.name {
            fields.push(("name", name.into_value()));
        }
        if let Some(slug) = input.slug {
            fields.push(("slug", slug.into_value()));
        }
        if let Some(domain) = input.domain {
            fields.push(("domain", domain.into_value()));
        }
        if let Some(description) = input.description {
            fields.push(("description", description.into_value()));
        }
        if let Some(settings) = input.settings {
            fields.push(("settings", settings.into_value()));
        }
        fields
    }
}

impl<C: Connection> OrganizationRepository for SurrealStore<C> {
    async fn create(&self, input: CreateOrganization) -> NidusResult<Organization> {
        self.create_record(input).await
    }

    async fn get(&self, id: Uuid) -> NidusResult<Organization> {
        self.get_record(id).await
    }

    async fn get_by_slug(&self, slug: &str) -> NidusResult<Organization> {
        let sql = format!("SELECT {PROJECTION} FROM organization WHERE slug = $slug");

        let mut result = self
            .db
            .query(&sql)
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: format!("slug={slug}"),
        })?;

        Ok(Organization::from_row(row)?)
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> NidusResult<Organization> {
        self.update_record(id, input).await
    }

    async fn list(&self, pagination: Pagination) -> NidusResult<PaginatedResult<Organization>> {
        self.list_where(None, Fields::new(), pagination).await
    }
}

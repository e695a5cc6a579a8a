//! Row mapping and email lookup for profiles.

use chrono::{DateTime, Utc};
use nidus_core::error::NidusResult;
use nidus_core::models::profile::{CreateProfile, Profile, UpdateProfile};
use nidus_core::repository::ProfileQueries;
use surrealdb::Connection;
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::repository::{
    Fields, PROJECTION, SurrealRecord, SurrealStore, parse_opt_uuid, parse_uuid,
};

#[derive(Debug, SurrealValue)]
pub(crate) struct ProfileRow {
    record_id: String,
    organization_id: Option<String>,
    email: String,
    role: String,
    display_name: Option<String>,
    active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Profile {
    type Row = ProfileRow;

    fn from_row(row: ProfileRow) -> Result<Self, DbError> {
        Ok(Profile {
            id: parse_uuid("profile.id", &row.record_id)?,
            organization_id: parse_opt_uuid(
                "profile.organization_id",
                row.organization_id.as_deref(),
            )?,
            email: row.email,
            // Raw role string; routing parses it and handles unknowns.
            role: row.role,
            display_name: row.display_name,
            active: row.active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateProfile) -> Fields {
        vec![
            (
                "organization_id",
                input
                    .organization_id
                    .map(|id| id.to_string())
                    .into_value(),
            ),
            ("email", input.email.into_value()),
            ("role", input.role.as_str().to_string().into_value()),
            ("display_name", input.display_name.into_value()),
        ]
    }

    fn update_fields(input: UpdateProfile) -> Fields {
        let mut fields = Fields::new();
        if let Some(organization_id) = input.organization_id {
            fields.push(("organization_id", organization_id.to_string().into_value()));
        }
        if let Some(email) = input.email {
            fields.push(("email", email.into_value()));
        }
        if let Some(role) = input.role {
            fields.push(("role", role.as_str().to_string().into_value()));
        }
        if let Some(display_name) = input.display_name {
            fields.push(("display_name", display_name.into_value()));
        }
        if let Some(active) = input.active {
            fields.push(("active", active.into_value()));
        }
        if let Some(last_login) = input.last_login {
            fields.push(("last_login", last_login.into_value()));
        }
        fields
    }
}

impl<C: Connection> ProfileQueries for SurrealStore<C> {
    async fn get_by_email(&self, email: &str) -> NidusResult<Profile> {
        let sql = format!("SELECT {PROJECTION} FROM profile WHERE email = $email");

        let mut result = self
            .db
            .query(&sql)
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "profile".into(),
            id: format!("email={email}"),
        })?;

        Ok(Profile::from_row(row)?)
    }
}

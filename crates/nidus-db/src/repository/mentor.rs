//! Row mapping, availability filter, and profile lookup for mentors.

use chrono::{DateTime, Utc};
use nidus_core::error::NidusResult;
use nidus_core::models::mentor::{CreateMentor, Mentor, UpdateMentor};
use nidus_core::repository::{MentorQueries, PaginatedResult, Pagination};
use surrealdb::Connection;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{Fields, SurrealRecord, SurrealStore, parse_uuid};

#[derive(Debug, SurrealValue)]
pub(crate) struct MentorRow {
    record_id: String,
    organization_id: String,
    user_id: String,
    expertise_areas: Vec<String>,
    industries: Vec<String>,
    rating: Option<f64>,
    available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Mentor {
    type Row = MentorRow;

    fn from_row(row: MentorRow) -> Result<Self, DbError> {
        Ok(Mentor {
            id: parse_uuid("mentor.id", &row.record_id)?,
            organization_id: parse_uuid("mentor.organization_id", &row.organization_id)?,
            user_id: parse_uuid("mentor.user_id", &row.user_id)?,
            expertise_areas: row.expertise_areas,
            industries: row.industries,
            rating: row.rating,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateMentor) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            ("user_id", input.user_id.to_string().into_value()),
            ("expertise_areas", input.expertise_areas.into_value()),
            ("industries", input.industries.into_value()),
        ]
    }

    fn update_fields(input: UpdateMentor) -> Fields {
        let mut fields = Fields::new();
        if let Some(expertise_areas) = input.expertise_areas {
            fields.push(("expertise_areas", expertise_areas.into_value()));
        }
        if let Some(industries) = input.industries {
            fields.push(("industries", industries.into_value()));
        }
        if let Some(rating) = input.rating {
            fields.push(("rating", rating.into_value()));
        }
        if let Some(available) = input.available {
            fields.push(("available", available.into_value()));
        }
        fields
    }
}

impl<C: Connection> MentorQueries for SurrealStore<C> {
    async fn list_available(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<Mentor>> {
        self.list_where(
            Some("organization_id = $org AND available = true"),
            vec![("org", organization_id.to_string().into_value())],
            pagination,
        )
        .await
    }

    async fn get_by_user(&self, user_id: Uuid) -> NidusResult<Mentor> {
        let user = user_id.to_string();
        let mentors: Vec<Mentor> = self
            .select_where("user_id = $user", vec![("user", user.clone().into_value())])
            .await?;

        mentors
            .into_iter()
            .next()
            .ok_or_else(|| {
                DbError::NotFound {
                    entity: "mentor".into(),
                    id: format!("user_id={user}"),
                }
                .into()
            })
    }
}

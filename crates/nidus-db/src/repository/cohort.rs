//! Row mapping for cohorts.

use chrono::{DateTime, Utc};
use nidus_core::models::cohort::{Cohort, CohortStatus, CreateCohort, UpdateCohort};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::repository::{Fields, SurrealRecord, parse_date, parse_uuid};

fn parse_status(s: &str) -> Result<CohortStatus, DbError> {
    match s {
        "planning" => Ok(CohortStatus::Planning),
        "recruiting" => Ok(CohortStatus::Recruiting),
        "active" => Ok(CohortStatus::Active),
        "completed" => Ok(CohortStatus::Completed),
        other => Err(DbError::Decode(format!("unknown cohort status: {other}"))),
    }
}

fn status_to_string(status: &CohortStatus) -> &'static str {
    match status {
        CohortStatus::Planning => "planning",
        CohortStatus::Recruiting => "recruiting",
        CohortStatus::Active => "active",
        CohortStatus::Completed => "completed",
    }
}

#[derive(Debug, SurrealValue)]
pub(crate) struct CohortRow {
    record_id: String,
    organization_id: String,
    name: String,
    start_date: String,
    end_date: String,
    status: String,
    max_startups: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Cohort {
    type Row = CohortRow;

    fn from_row(row: CohortRow) -> Result<Self, DbError> {
        Ok(Cohort {
            id: parse_uuid("cohort.id", &row.record_id)?,
            organization_id: parse_uuid("cohort.organization_id", &row.organization_id)?,
            name: row.name,
            start_date: parse_date("cohort.start_date", &row.start_date)?,
            end_date: parse_date("cohort.end_date", &row.end_date)?,
            status: parse_status(&row.status)?,
            max_startups: row.max_startups,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateCohort) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            ("name", input.name.into_value()),
            ("start_date", input.start_date.to_string().into_value()),
            ("end_date", input.end_date.to_string().into_value()),
            (
                "status",
                status_to_string(&input.status).to_string().into_value(),
            ),
            ("max_startups", input.max_startups.into_value()),
        ]
    }

    fn update_fields(input: UpdateCohort) -> Fields {
        let mut fields = Fields::new();
        if let Some(name) = input.name {
            fields.push(("name", name.into_value()));
        }
        if let Some(start_date) = input.start_date {
            fields.push(("start_date", start_date.to_string().into_value()));
        }
        if let Some(end_date) = input.end_date {
            fields.push(("end_date", end_date.to_string().into_value()));
        }
        if let Some(status) = input.status {
            fields.push(("status", status_to_string(&status).to_string().into_value()));
        }
        if let Some(max_startups) = input.max_startups {
            fields.push(("max_startups", max_startups.into_value()));
        }
        fields
    }
}

//! Row mapping and cohort-join queries for startups.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nidus_core::error::NidusResult;
use nidus_core::models::cohort::Cohort;
use nidus_core::models::startup::{
    CreateStartup, Startup, StartupStage, StartupStatus, UpdateStartup,
};
use nidus_core::repository::{
    PaginatedResult, Pagination, StartupQueries, StartupWithCohort,
};
use surrealdb::Connection;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{
    Fields, SurrealRecord, SurrealStore, parse_opt_date, parse_opt_uuid, parse_uuid,
};

fn parse_stage(s: &str) -> Result<StartupStage, DbError> {
    match s {
        "idea" => Ok(StartupStage::Idea),
        "mvp" => Ok(StartupStage::Mvp),
        "early_stage" => Ok(StartupStage::EarlyStage),
        "growth" => Ok(StartupStage::Growth),
        "scale" => Ok(StartupStage::Scale),
        other => Err(DbError::Decode(format!("unknown startup stage: {other}"))),
    }
}

fn stage_to_string(stage: &StartupStage) -> &'static str {
    match stage {
        StartupStage::Idea => "idea",
        StartupStage::Mvp => "mvp",
        StartupStage::EarlyStage => "early_stage",
        StartupStage::Growth => "growth",
        StartupStage::Scale => "scale",
    }
}

fn parse_status(s: &str) -> Result<StartupStatus, DbError> {
    match s {
        "active" => Ok(StartupStatus::Active),
        "graduated" => Ok(StartupStatus::Graduated),
        "withdrawn" => Ok(StartupStatus::Withdrawn),
        "suspended" => Ok(StartupStatus::Suspended),
        other => Err(DbError::Decode(format!("unknown startup status: {other}"))),
    }
}

fn status_to_string(status: &StartupStatus) -> &'static str {
    match status {
        StartupStatus::Active => "active",
        StartupStatus::Graduated => "graduated",
        StartupStatus::Withdrawn => "withdrawn",
        StartupStatus::Suspended => "suspended",
    }
}

#[derive(Debug, SurrealValue)]
pub(crate) struct StartupRow {
    record_id: String,
    organization_id: String,
    cohort_id: Option<String>,
    name: String,
    industry: String,
    stage: String,
    founded_date: Option<String>,
    employee_count: Option<u32>,
    funding_raised: Option<f64>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Startup {
    type Row = StartupRow;

    fn from_row(row: StartupRow) -> Result<Self, DbError> {
        Ok(Startup {
            id: parse_uuid("startup.id", &row.record_id)?,
            organization_id: parse_uuid("startup.organization_id", &row.organization_id)?,
            cohort_id: parse_opt_uuid("startup.cohort_id", row.cohort_id.as_deref())?,
            name: row.name,
            industry: row.industry,
            stage: parse_stage(&row.stage)?,
            founded_date: parse_opt_date("startup.founded_date", row.founded_date.as_deref())?,
            employee_count: row.employee_count,
            funding_raised: row.funding_raised,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateStartup) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            (
                "cohort_id",
                input.cohort_id.map(|id| id.to_string()).into_value(),
            ),
            ("name", input.name.into_value()),
            ("industry", input.industry.into_value()),
            (
                "stage",
                stage_to_string(&input.stage).to_string().into_value(),
            ),
            (
                "founded_date",
                input.founded_date.map(|d| d.to_string()).into_value(),
            ),
            ("employee_count", input.employee_count.into_value()),
            ("funding_raised", input.funding_raised.into_value()),
            // New startups always enter the program active.
            ("status", "active".to_string().into_value()),
        ]
    }

    fn update_fields(input: UpdateStartup) -> Fields {
        let mut fields = Fields::new();
        if let Some(cohort_id) = input.cohort_id {
            // Some(None) clears the assignment.
            fields.push(("cohort_id", cohort_id.map(|id| id.to_string()).into_value()));
        }
        if let Some(name) = input.name {
            fields.push(("name", name.into_value()));
        }
        if let Some(industry) = input.industry {
            fields.push(("industry", industry.into_value()));
        }
        if let Some(stage) = input.stage {
            fields.push(("stage", stage_to_string(&stage).to_string().into_value()));
        }
        if let Some(founded_date) = input.founded_date {
            fields.push(("founded_date", founded_date.to_string().into_value()));
        }
        if let Some(employee_count) = input.employee_count {
            fields.push(("employee_count", employee_count.into_value()));
        }
        if let Some(funding_raised) = input.funding_raised {
            fields.push(("funding_raised", funding_raised.into_value()));
        }
        if let Some(status) = input.status {
            fields.push(("status", status_to_string(&status).to_string().into_value()));
        }
        fields
    }
}

impl<C: Connection> StartupQueries for SurrealStore<C> {
    async fn list_with_cohort(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<StartupWithCohort>> {
        let org = organization_id.to_string();

        let startups: PaginatedResult<Startup> = self
            .list_where(
                Some("organization_id = $org"),
                vec![("org", org.clone().into_value())],
                pagination,
            )
            .await?;

        // Cohort sets per organization are small; join application-side.
        let cohorts: Vec<Cohort> = self
            .select_where("organization_id = $org", vec![("org", org.into_value())])
            .await?;
        let by_id: HashMap<Uuid, Cohort> =
            cohorts.into_iter().map(|c| (c.id, c)).collect();

        let items = startups
            .items
            .into_iter()
            .map(|startup| StartupWithCohort {
                cohort: startup.cohort_id.and_then(|id| by_id.get(&id).cloned()),
                startup,
            })
            .collect();

        Ok(PaginatedResult {
            items,
            total: startups.total,
            offset: startups.offset,
            limit: startups.limit,
        })
    }

    async fn list_by_cohort(
        &self,
        organization_id: Uuid,
        cohort_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<Startup>> {
        self.list_where(
            Some("organization_id = $org AND cohort_id = $cohort"),
            vec![
                ("org", organization_id.to_string().into_value()),
                ("cohort", cohort_id.to_string().into_value()),
            ],
            pagination,
        )
        .await
    }
}

//! Row mapping and per-startup listing for investments.

use chrono::{DateTime, Utc};
use nidus_core::error::NidusResult;
use nidus_core::models::investment::{CreateInvestment, Investment, UpdateInvestment};
use nidus_core::repository::{InvestmentQueries, PaginatedResult, Pagination};
use surrealdb::Connection;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{Fields, SurrealRecord, SurrealStore, parse_date, parse_uuid};

#[derive(Debug, SurrealValue)]
pub(crate) struct InvestmentRow {
    record_id: String,
    organization_id: String,
    startup_id: String,
    investor_id: String,
    amount: f64,
    round: String,
    invested_on: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Investment {
    type Row = InvestmentRow;

    fn from_row(row: InvestmentRow) -> Result<Self, DbError> {
        Ok(Investment {
            id: parse_uuid("investment.id", &row.record_id)?,
            organization_id: parse_uuid(
                "investment.organization_id",
                &row.organization_id,
            )?,
            startup_id: parse_uuid("investment.startup_id", &row.startup_id)?,
            investor_id: parse_uuid("investment.investor_id", &row.investor_id)?,
            amount: row.amount,
            round: row.round,
            invested_on: parse_date("investment.invested_on", &row.invested_on)?,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateInvestment) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            ("startup_id", input.startup_id.to_string().into_value()),
            ("investor_id", input.investor_id.to_string().into_value()),
            ("amount", input.amount.into_value()),
            ("round", input.round.into_value()),
            ("invested_on", input.invested_on.to_string().into_value()),
            ("status", input.status.into_value()),
        ]
    }

    fn update_fields(input: UpdateInvestment) -> Fields {
        let mut fields = Fields::new();
        if let Some(amount) = input.amount {
            fields.push(("amount", amount.into_value()));
        }
        if let Some(round) = input.round {
            fields.push(("round", round.into_value()));
        }
        if let Some(invested_on) = input.invested_on {
            fields.push(("invested_on", invested_on.to_string().into_value()));
        }
        if let Some(status) = input.status {
            fields.push(("status", status.into_value()));
        }
        fields
    }
}

impl<C: Connection> InvestmentQueries for SurrealStore<C> {
    async fn list_by_startup(
        &self,
        organization_id: Uuid,
        startup_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<Investment>> {
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

//! Row mapping for events.

use chrono::{DateTime, Utc};
use nidus_core::models::event::{CreateEvent, Event, UpdateEvent};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::repository::{Fields, SurrealRecord, parse_uuid};

#[derive(Debug, SurrealValue)]
pub(crate) struct EventRow {
    record_id: String,
    organization_id: String,
    title: String,
    event_type: String,
    starts_at: DateTime<Utc>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurrealRecord for Event {
    type Row = EventRow;

    fn from_row(row: EventRow) -> Result<Self, DbError> {
        Ok(Event {
            id: parse_uuid("event.id", &row.record_id)?,
            organization_id: parse_uuid("event.organization_id", &row.organization_id)?,
            title: row.title,
            event_type: row.event_type,
            starts_at: row.starts_at,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn create_fields(input: CreateEvent) -> Fields {
        vec![
            (
                "organization_id",
                input.organization_id.to_string().into_value(),
            ),
            ("title", input.title.into_value()),
            ("event_type", input.event_type.into_value()),
            ("starts_at", input.starts_at.into_value()),
            ("location", input.location.into_value()),
        ]
    }

    fn update_fields(input: UpdateEvent) -> Fields {
        let mut fields = Fields::new();
        if let Some(title) = input.title {
            fields.push(("title", title.into_value()));
        }
        if let Some(event_type) = input.event_type {
            fields.push(("event_type", event_type.into_value()));
        }
        if let Some(starts_at) = input.starts_at {
            fields.push(("starts_at", starts_at.into_value()));
        }
        if let Some(location) = input.location {
            fields.push(("location", location.into_value()));
        }
        fields
    }
}

//! Generic SurrealDB repository over the entity schema.
//!
//! One implementation covers every organization-scoped entity; the
//! per-entity modules contribute only row mapping and field bindings via
//! [`SurrealRecord`]. Statements address records through
//! `type::record('<table>', $id)` and always select with a
//! `meta::id(id) AS record_id` projection so a single row struct per
//! entity serves create, read, update, and list alike.

mod cohort;
mod event;
mod investment;
mod material;
mod mentor;
mod organization;
mod profile;
mod startup;

use chrono::NaiveDate;
use nidus_core::error::NidusResult;
use nidus_core::models::material::Material;
use nidus_core::repository::{
    PaginatedResult, Pagination, Record, Remove, Repository, Scoped,
};
use nidus_core::validate::Validate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::{SurrealValue, Value};
use uuid::Uuid;

use crate::error::DbError;

/// Projection prepended to every read so rows carry their record key as a
/// plain string.
const PROJECTION: &str = "meta::id(id) AS record_id, *";

/// Field bindings for CREATE/UPDATE statements: `(parameter name, value)`.
pub type Fields = Vec<(&'static str, Value)>;

/// Row mapping between an entity and its SurrealDB representation.
pub trait SurrealRecord: Record {
    /// Row shape returned by the standard projection.
    type Row: SurrealValue + Send;

    fn from_row(row: Self::Row) -> Result<Self, DbError>;

    /// Bindings written on insert.
    fn create_fields(input: Self::Create) -> Fields;

    /// Bindings for the supplied update fields only; unsupplied fields
    /// are left untouched.
    fn update_fields(input: Self::Update) -> Fields;
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB-backed implementation of the repository traits.
#[derive(Clone)]
pub struct SurrealStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub(crate) async fn get_record<E: SurrealRecord>(&self, id: Uuid) -> NidusResult<E> {
        let id_str = id.to_string();
        let sql = format!(
            "SELECT {PROJECTION} FROM type::record('{table}', $id)",
            table = E::TABLE,
        );

        let mut result = self
            .db
            .query(&sql)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<E::Row> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: E::TABLE.into(),
            id: id_str,
        })?;

        Ok(E::from_row(row)?)
    }

    pub(crate) async fn create_record<E: SurrealRecord>(
        &self,
        input: E::Create,
    ) -> NidusResult<E> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let fields = E::create_fields(input);

        let sets: Vec<String> = fields
            .iter()
            .map(|(name, _)| format!("{name} = ${name}"))
            .collect();
        // Insert and re-read in one round trip; the second statement
        // carries the standard projection.
        let sql = format!(
            "CREATE type::record('{table}', $id) SET {sets} RETURN NONE; \
             SELECT {PROJECTION} FROM type::record('{table}', $id)",
            table = E::TABLE,
            sets = sets.join(", "),
        );

        let mut builder = self.db.query(&sql).bind(("id", id_str.clone()));
        for (name, value) in fields {
            builder = builder.bind((name, value));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<E::Row> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: E::TABLE.into(),
            id: id_str,
        })?;

        Ok(E::from_row(row)?)
    }

    pub(crate) async fn update_record<E: SurrealRecord>(
        &self,
        id: Uuid,
        input: E::Update,
    ) -> NidusResult<E> {
        input.validate()?;

        let id_str = id.to_string();
        let fields = E::update_fields(input);

        let mut sets: Vec<String> = fields
            .iter()
            .map(|(name, _)| format!("{name} = ${name}"))
            .collect();
        sets.push("updated_at = time::now()".into());

        let sql = format!(
            "UPDATE type::record('{table}', $id) SET {sets} RETURN NONE; \
             SELECT {PROJECTION} FROM type::record('{table}', $id)",
            table = E::TABLE,
            sets = sets.join(", "),
        );

        let mut builder = self.db.query(&sql).bind(("id", id_str.clone()));
        for (name, value) in fields {
            builder = builder.bind((name, value));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        // UPDATE on a missing record is a no-op; the reselect then comes
        // back empty and surfaces as not-found.
        let rows: Vec<E::Row> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: E::TABLE.into(),
            id: id_str,
        })?;

        Ok(E::from_row(row)?)
    }

    pub(crate) async fn delete_record<E: SurrealRecord>(&self, id: Uuid) -> NidusResult<()> {
        let sql = format!("DELETE type::record('{table}', $id)", table = E::TABLE);
        self.db
            .query(&sql)
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    /// Paginated read with an optional filter, plus a matching count.
    pub(crate) async fn list_where<E: SurrealRecord>(
        &self,
        filter: Option<&str>,
        binds: Fields,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<E>> {
        let where_clause = filter
            .map(|f| format!(" WHERE {f}"))
            .unwrap_or_default();

        let count_sql = format!(
            "SELECT count() AS total FROM {table}{where_clause} GROUP ALL",
            table = E::TABLE,
        );
        let mut count_builder = self.db.query(&count_sql);
        for (name, value) in &binds {
            count_builder = count_builder.bind((*name, value.clone()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let sql = format!(
            "SELECT {PROJECTION} FROM {table}{where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $offset",
            table = E::TABLE,
        );
        let mut builder = self
            .db
            .query(&sql)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        for (name, value) in binds {
            builder = builder.bind((name, value));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<E::Row> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    /// Unpaginated filtered read, for small joined collections.
    pub(crate) async fn select_where<E: SurrealRecord>(
        &self,
        filter: &str,
        binds: Fields,
    ) -> NidusResult<Vec<E>> {
        let sql = format!(
            "SELECT {PROJECTION} FROM {table} WHERE {filter}",
            table = E::TABLE,
        );
        let mut builder = self.db.query(&sql);
        for (name, value) in binds {
            builder = builder.bind((name, value));
        }
        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<E::Row> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(E::from_row)
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}

impl<C, E> Repository<E> for SurrealStore<C>
where
    C: Connection,
    E: SurrealRecord + Scoped,
{
    async fn list(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> NidusResult<PaginatedResult<E>> {
        self.list_where(
            Some("organization_id = $org"),
            vec![("org", organization_id.to_string().into_value())],
            pagination,
        )
        .await
    }

    async fn get(&self, id: Uuid) -> NidusResult<E> {
        self.get_record(id).await
    }

    async fn create(&self, input: E::Create) -> NidusResult<E> {
        self.create_record(input).await
    }

    async fn update(&self, id: Uuid, input: E::Update) -> NidusResult<E> {
        self.update_record(id, input).await
    }
}

impl<C: Connection> Remove<Material> for SurrealStore<C> {
    async fn delete(&self, id: Uuid) -> NidusResult<()> {
        self.delete_record::<Material>(id).await
    }
}

// -----------------------------------------------------------------------
// Shared row-decoding helpers
// -----------------------------------------------------------------------

pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value)
        .map_err(|e| DbError::Decode(format!("{field}: invalid UUID '{value}': {e}")))
}

pub(crate) fn parse_opt_uuid(
    field: &str,
    value: Option<&str>,
) -> Result<Option<Uuid>, DbError> {
    value.map(|v| parse_uuid(field, v)).transpose()
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DbError> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| DbError::Decode(format!("{field}: invalid date '{value}': {e}")))
}

pub(crate) fn parse_opt_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, DbError> {
    value.map(|v| parse_date(field, v)).transpose()
}

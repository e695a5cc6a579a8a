//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs and calendar dates are stored as strings. Enums are stored as
//! strings with ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (tenant root, global scope)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD slug ON TABLE organization TYPE string;
DEFINE FIELD domain ON TABLE organization TYPE option<string>;
DEFINE FIELD description ON TABLE organization TYPE option<string>;
DEFINE FIELD settings ON TABLE organization TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_slug ON TABLE organization \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Profiles (organization scope; id doubles as the authenticated user id)
-- =======================================================================
DEFINE TABLE profile SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE profile TYPE option<string>;
DEFINE FIELD email ON TABLE profile TYPE string;
-- role is deliberately unconstrained: values outside the recognized set
-- must round-trip so routing can surface the unknown-role state.
DEFINE FIELD role ON TABLE profile TYPE string;
DEFINE FIELD display_name ON TABLE profile TYPE option<string>;
DEFINE FIELD active ON TABLE profile TYPE bool DEFAULT true;
DEFINE FIELD last_login ON TABLE profile TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_profile_email ON TABLE profile COLUMNS email UNIQUE;

-- =======================================================================
-- Startups (organization scope)
-- =======================================================================
DEFINE TABLE startup SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE startup TYPE string;
DEFINE FIELD cohort_id ON TABLE startup TYPE option<string>;
DEFINE FIELD name ON TABLE startup TYPE string;
DEFINE FIELD industry ON TABLE startup TYPE string;
DEFINE FIELD stage ON TABLE startup TYPE string \
    ASSERT $value IN ['idea', 'mvp', 'early_stage', 'growth', 'scale'];
DEFINE FIELD founded_date ON TABLE startup TYPE option<string>;
DEFINE FIELD employee_count ON TABLE startup TYPE option<int>;
DEFINE FIELD funding_raised ON TABLE startup TYPE option<float>;
DEFINE FIELD status ON TABLE startup TYPE string \
    ASSERT $value IN ['active', 'graduated', 'withdrawn', 'suspended'];
DEFINE FIELD created_at ON TABLE startup TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE startup TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_startup_org ON TABLE startup COLUMNS organization_id;
DEFINE INDEX idx_startup_cohort ON TABLE startup \
    COLUMNS organization_id, cohort_id;

-- =======================================================================
-- Cohorts (organization scope)
-- =======================================================================
DEFINE TABLE cohort SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE cohort TYPE string;
DEFINE FIELD name ON TABLE cohort TYPE string;
DEFINE FIELD start_date ON TABLE cohort TYPE string;
DEFINE FIELD end_date ON TABLE cohort TYPE string;
DEFINE FIELD status ON TABLE cohort TYPE string \
    ASSERT $value IN ['planning', 'recruiting', 'active', 'completed'];
DEFINE FIELD max_startups ON TABLE cohort TYPE int;
DEFINE FIELD created_at ON TABLE cohort TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE cohort TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_cohort_org_name ON TABLE cohort \
    COLUMNS organization_id, name UNIQUE;

-- =======================================================================
-- Mentors (organization scope, 1-1 with a profile)
-- =======================================================================
DEFINE TABLE mentor SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE mentor TYPE string;
DEFINE FIELD user_id ON TABLE mentor TYPE string;
DEFINE FIELD expertise_areas ON TABLE mentor TYPE array;
DEFINE FIELD expertise_areas.* ON TABLE mentor TYPE string;
DEFINE FIELD industries ON TABLE mentor TYPE array;
DEFINE FIELD industries.* ON TABLE mentor TYPE string;
DEFINE FIELD rating ON TABLE mentor TYPE option<float>;
DEFINE FIELD available ON TABLE mentor TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE mentor TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE mentor TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_mentor_user ON TABLE mentor COLUMNS user_id UNIQUE;
DEFINE INDEX idx_mentor_org ON TABLE mentor COLUMNS organization_id;

-- =======================================================================
-- Investments (organization scope)
-- =======================================================================
DEFINE TABLE investment SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE investment TYPE string;
DEFINE FIELD startup_id ON TABLE investment TYPE string;
DEFINE FIELD investor_id ON TABLE investment TYPE string;
DEFINE FIELD amount ON TABLE investment TYPE float;
DEFINE FIELD round ON TABLE investment TYPE string;
DEFINE FIELD invested_on ON TABLE investment TYPE string;
DEFINE FIELD status ON TABLE investment TYPE string;
DEFINE FIELD created_at ON TABLE investment TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE investment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_investment_org ON TABLE investment \
    COLUMNS organization_id;
DEFINE INDEX idx_investment_startup ON TABLE investment \
    COLUMNS organization_id, startup_id;

-- =======================================================================
-- Events (organization scope)
-- =======================================================================
DEFINE TABLE event SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE event TYPE string;
DEFINE FIELD title ON TABLE event TYPE string;
DEFINE FIELD event_type ON TABLE event TYPE string;
DEFINE FIELD starts_at ON TABLE event TYPE datetime;
DEFINE FIELD location ON TABLE event TYPE option<string>;
DEFINE FIELD created_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_event_org_time ON TABLE event \
    COLUMNS organization_id, starts_at;

-- =======================================================================
-- Materials (organization scope, metadata for uploaded files)
-- =======================================================================
DEFINE TABLE material SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE material TYPE string;
DEFINE FIELD startup_id ON TABLE material TYPE option<string>;
DEFINE FIELD file_name ON TABLE material TYPE string;
DEFINE FIELD content_type ON TABLE material TYPE string;
DEFINE FIELD size_bytes ON TABLE material TYPE int;
DEFINE FIELD url ON TABLE material TYPE string;
DEFINE FIELD uploaded_by ON TABLE material TYPE option<string>;
DEFINE FIELD created_at ON TABLE material TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE material TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_material_org ON TABLE material COLUMNS organization_id;
DEFINE INDEX idx_material_startup ON TABLE material \
    COLUMNS organization_id, startup_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );

            db.query(migration.sql)
                .await?
                .check()
                .map_err(|e| DbError::Migration(e.to_string()))?;

            db.query(
                "CREATE _migration SET version = $version, name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_defines_every_entity_table() {
        for table in [
            "organization",
            "profile",
            "startup",
            "cohort",
            "mentor",
            "investment",
            "event",
            "material",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }
}

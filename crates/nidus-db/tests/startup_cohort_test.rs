//! Integration tests for startup and cohort repositories using
//! in-memory SurrealDB.

use chrono::NaiveDate;
use nidus_core::error::NidusError;
use nidus_core::models::cohort::{Cohort, CohortStatus, CreateCohort, UpdateCohort};
use nidus_core::models::startup::{
    CreateStartup, Startup, StartupStage, StartupStatus, UpdateStartup,
};
use nidus_core::repository::{
    OrganizationRepository, Pagination, Repository, StartupQueries,
};
use nidus_db::SurrealStore;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, create an organization.
async fn setup() -> (SurrealStore<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    nidus_db::run_migrations(&db).await.unwrap();

    let store = SurrealStore::new(db);
    let org = OrganizationRepository::create(
        &store,
        nidus_core::models::organization::CreateOrganization {
            name: "Test Org".into(),
            slug: "test-org".into(),
            domain: None,
            description: None,
            settings: None,
        },
    )
    .await
    .unwrap();

    (store, org.id)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cohort_input(org_id: Uuid, name: &str, max_startups: u32) -> CreateCohort {
    CreateCohort {
        organization_id: org_id,
        name: name.into(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 6, 1),
        status: CohortStatus::Planning,
        max_startups,
    }
}

fn startup_input(org_id: Uuid, name: &str) -> CreateStartup {
    CreateStartup {
        organization_id: org_id,
        cohort_id: None,
        name: name.into(),
        industry: "fintech".into(),
        stage: StartupStage::Mvp,
        founded_date: Some(date(2023, 3, 15)),
        employee_count: Some(4),
        funding_raised: None,
    }
}

// -----------------------------------------------------------------------
// Cohort tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_cohort_stamps_organization_and_status() {
    let (store, org_id) = setup().await;

    let cohort = Repository::<Cohort>::create(&store, cohort_input(org_id, "Cohort X", 10))
        .await
        .unwrap();

    assert_eq!(cohort.organization_id, org_id);
    assert_eq!(cohort.status, CohortStatus::Planning);
    assert_eq!(cohort.max_startups, 10);
    assert_eq!(cohort.start_date, date(2024, 1, 1));
    assert_eq!(cohort.end_date, date(2024, 6, 1));
}

#[tokio::test]
async fn cohort_capacity_bounds_reject_before_any_query() {
    let (store, org_id) = setup().await;

    for capacity in [0, 51] {
        let err = Repository::<Cohort>::create(&store, cohort_input(org_id, "Bad", capacity))
            .await
            .unwrap_err();
        assert!(matches!(err, NidusError::Validation { .. }));
    }

    // Rejected submissions never reached the store.
    let page = Repository::<Cohort>::list(&store, org_id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn update_cohort_checks_supplied_capacity() {
    let (store, org_id) = setup().await;

    let cohort = Repository::<Cohort>::create(&store, cohort_input(org_id, "Cohort Y", 10))
        .await
        .unwrap();

    let err = Repository::<Cohort>::update(
        &store,
        cohort.id,
        UpdateCohort {
            max_startups: Some(51),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, NidusError::Validation { .. }));

    let updated = Repository::<Cohort>::update(
        &store,
        cohort.id,
        UpdateCohort {
            status: Some(CohortStatus::Recruiting),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, CohortStatus::Recruiting);
    assert_eq!(updated.max_startups, 10); // unchanged
}

// -----------------------------------------------------------------------
// Startup tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn new_startups_enter_the_program_active() {
    let (store, org_id) = setup().await;

    let startup = Repository::<Startup>::create(&store, startup_input(org_id, "Acme AI"))
        .await
        .unwrap();

    assert_eq!(startup.organization_id, org_id);
    assert_eq!(startup.status, StartupStatus::Active);
    assert_eq!(startup.stage, StartupStage::Mvp);
    assert_eq!(startup.founded_date, Some(date(2023, 3, 15)));
}

#[tokio::test]
async fn updated_stage_is_reflected_in_a_fresh_list() {
    let (store, org_id) = setup().await;

    let startup = Repository::<Startup>::create(&store, startup_input(org_id, "Growable"))
        .await
        .unwrap();

    Repository::<Startup>::update(
        &store,
        startup.id,
        UpdateStartup {
            stage: Some(StartupStage::Growth),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let page = Repository::<Startup>::list(&store, org_id, Pagination::default())
        .await
        .unwrap();
    let listed = page.items.iter().find(|s| s.id == startup.id).unwrap();
    assert_eq!(listed.stage, StartupStage::Growth);
    assert_eq!(listed.name, "Growable"); // untouched by the partial update
}

#[tokio::test]
async fn assign_and_clear_cohort() {
    let (store, org_id) = setup().await;

    let cohort = Repository::<Cohort>::create(&store, cohort_input(org_id, "Spring 24", 20))
        .await
        .unwrap();
    let startup = Repository::<Startup>::create(&store, startup_input(org_id, "Joiner"))
        .await
        .unwrap();

    let assigned = Repository::<Startup>::update(
        &store,
        startup.id,
        UpdateStartup {
            cohort_id: Some(Some(cohort.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(assigned.cohort_id, Some(cohort.id));

    let cleared = Repository::<Startup>::update(
        &store,
        startup.id,
        UpdateStartup {
            cohort_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.cohort_id, None);
}

#[tokio::test]
async fn list_with_cohort_joins_assigned_cohorts() {
    let (store, org_id) = setup().await;

    let cohort = Repository::<Cohort>::create(&store, cohort_input(org_id, "Joined", 20))
        .await
        .unwrap();

    let mut in_cohort = startup_input(org_id, "In Cohort");
    in_cohort.cohort_id = Some(cohort.id);
    let in_cohort = Repository::<Startup>::create(&store, in_cohort).await.unwrap();

    let solo = Repository::<Startup>::create(&store, startup_input(org_id, "Solo"))
        .await
        .unwrap();

    let page = store
        .list_with_cohort(org_id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let joined = page
        .items
        .iter()
        .find(|s| s.startup.id == in_cohort.id)
        .unwrap();
    assert_eq!(joined.cohort.as_ref().unwrap().name, "Joined");

    let unjoined = page.items.iter().find(|s| s.startup.id == solo.id).unwrap();
    assert!(unjoined.cohort.is_none());
}

#[tokio::test]
async fn list_by_cohort_filters_membership() {
    let (store, org_id) = setup().await;

    let cohort = Repository::<Cohort>::create(&store, cohort_input(org_id, "Members", 20))
        .await
        .unwrap();

    let mut member = startup_input(org_id, "Member");
    member.cohort_id = Some(cohort.id);
    Repository::<Startup>::create(&store, member).await.unwrap();
    Repository::<Startup>::create(&store, startup_input(org_id, "Outsider"))
        .await
        .unwrap();

    let page = store
        .list_by_cohort(org_id, cohort.id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Member");
}

#[tokio::test]
async fn startups_are_organization_scoped() {
    let (store, org_a) = setup().await;

    let org_b = OrganizationRepository::create(
        &store,
        nidus_core::models::organization::CreateOrganization {
            name: "Other".into(),
            slug: "other".into(),
            domain: None,
            description: None,
            settings: None,
        },
    )
    .await
    .unwrap();

    Repository::<Startup>::create(&store, startup_input(org_a, "Mine"))
        .await
        .unwrap();
    Repository::<Startup>::create(&store, startup_input(org_b.id, "Theirs"))
        .await
        .unwrap();

    let page = Repository::<Startup>::list(&store, org_a, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Mine");
}

#[tokio::test]
async fn get_missing_startup_is_not_found() {
    let (store, _org_id) = setup().await;

    let err = Repository::<Startup>::get(&store, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, NidusError::NotFound { .. }));
}

//! Integration tests for the client layer: session routing, cached
//! workspace queries, uploads, and provisioning — all against in-memory
//! SurrealDB.

use nidus_client::service::{ProvisionInput, Workspace, bootstrap_demo, provision_workspace};
use nidus_client::session::Sessions;
use nidus_client::upload::{MemoryBlobStore, UploadRequest};
use nidus_core::dashboard::{Dashboard, RouteState};
use nidus_core::error::NidusError;
use nidus_core::models::cohort::{CohortStatus, CreateCohort};
use nidus_core::models::profile::{CreateProfile, Profile, Role, UpdateProfile};
use nidus_core::models::startup::{CreateStartup, StartupStage, UpdateStartup};
use nidus_core::repository::Repository;
use nidus_db::SurrealStore;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type MemStore = SurrealStore<surrealdb::engine::local::Db>;

/// Helper: spin up in-memory DB, run migrations, provision a workspace.
async fn setup() -> (MemStore, Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    nidus_db::run_migrations(&db).await.unwrap();

    let store = SurrealStore::new(db.clone());
    let (org, _admin) = provision_workspace(
        &store,
        ProvisionInput {
            organization_name: "Test Incubator".into(),
            organization_slug: "test".into(),
            admin_email: "admin@test.com".into(),
            admin_name: None,
        },
    )
    .await
    .unwrap();

    (store, db, org.id)
}

fn startup_input(org_id: Uuid, name: &str) -> CreateStartup {
    CreateStartup {
        organization_id: org_id,
        cohort_id: None,
        name: name.into(),
        industry: "climate".into(),
        stage: StartupStage::Idea,
        founded_date: None,
        employee_count: None,
        funding_raised: None,
    }
}

// -----------------------------------------------------------------------
// Provisioning
// -----------------------------------------------------------------------

#[tokio::test]
async fn provisioning_links_admin_to_organization() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    nidus_db::run_migrations(&db).await.unwrap();
    let store = SurrealStore::new(db);

    let (org, admin) = provision_workspace(
        &store,
        ProvisionInput {
            organization_name: "Fresh".into(),
            organization_slug: "fresh".into(),
            admin_email: "boss@fresh.com".into(),
            admin_name: Some("Boss".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(admin.organization_id, Some(org.id));
    assert_eq!(admin.role, "admin");
}

#[tokio::test]
async fn demo_bootstrap_yields_a_routable_admin() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    nidus_db::run_migrations(&db).await.unwrap();
    let store = SurrealStore::new(db);

    let (_org, admin) = bootstrap_demo(&store).await.unwrap();

    let sessions = Sessions::new(store);
    assert_eq!(
        sessions.route(admin.id).await,
        RouteState::Dashboard(Dashboard::Admin)
    );
}

// -----------------------------------------------------------------------
// Session routing
// -----------------------------------------------------------------------

#[tokio::test]
async fn each_role_routes_to_its_dashboard() {
    let (store, _db, org_id) = setup().await;

    for role in Role::ALL {
        let profile = Repository::<Profile>::create(
            &store,
            CreateProfile {
                organization_id: Some(org_id),
                email: format!("{}@roles.test", role.as_str()),
                role,
                display_name: None,
            },
        )
        .await
        .unwrap();

        let sessions = Sessions::new(store.clone());
        assert_eq!(
            sessions.route(profile.id).await,
            RouteState::Dashboard(Dashboard::for_role(role))
        );
    }
}

#[tokio::test]
async fn missing_profile_routes_to_no_profile() {
    let (store, _db, _org_id) = setup().await;

    let sessions = Sessions::new(store);
    assert_eq!(sessions.route(Uuid::new_v4()).await, RouteState::NoProfile);
}

#[tokio::test]
async fn unrecognized_role_routes_to_unknown_role() {
    let (store, db, _org_id) = setup().await;

    let id = Uuid::new_v4();
    db.query(
        "CREATE type::record('profile', $id) SET \
         organization_id = NONE, email = $email, role = 'guest'",
    )
    .bind(("id", id.to_string()))
    .bind(("email", "guest@test.com".to_string()))
    .await
    .unwrap()
    .check()
    .unwrap();

    let sessions = Sessions::new(store);
    assert_eq!(
        sessions.route(id).await,
        RouteState::UnknownRole("guest".into())
    );
}

#[tokio::test]
async fn resolution_is_memoized_per_session() {
    let (store, _db, org_id) = setup().await;

    let profile = Repository::<Profile>::create(
        &store,
        CreateProfile {
            organization_id: Some(org_id),
            email: "memo@test.com".into(),
            role: Role::Admin,
            display_name: None,
        },
    )
    .await
    .unwrap();

    let sessions = Sessions::new(store.clone());
    assert_eq!(
        sessions.route(profile.id).await,
        RouteState::Dashboard(Dashboard::Admin)
    );

    // A role change mid-session does not re-route until the session
    // forgets the profile.
    Repository::<Profile>::update(
        &store,
        profile.id,
        UpdateProfile {
            role: Some(Role::Support),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(
        sessions.route(profile.id).await,
        RouteState::Dashboard(Dashboard::Admin)
    );

    sessions.forget(profile.id);
    assert_eq!(
        sessions.route(profile.id).await,
        RouteState::Dashboard(Dashboard::Support)
    );
}

#[tokio::test]
async fn first_resolution_stamps_last_login() {
    let (store, _db, org_id) = setup().await;

    let profile = Repository::<Profile>::create(
        &store,
        CreateProfile {
            organization_id: Some(org_id),
            email: "stamp@test.com".into(),
            role: Role::Founder,
            display_name: None,
        },
    )
    .await
    .unwrap();
    assert!(profile.last_login.is_none());

    let sessions = Sessions::new(store.clone());
    sessions.route(profile.id).await;

    let fetched = Repository::<Profile>::get(&store, profile.id).await.unwrap();
    assert!(fetched.last_login.is_some());
}

// -----------------------------------------------------------------------
// Workspace queries and cache invalidation
// -----------------------------------------------------------------------

#[tokio::test]
async fn workspace_refuses_nil_organization() {
    let (store, _db, _org_id) = setup().await;

    let err = Workspace::new(store, Uuid::nil()).unwrap_err();
    assert!(matches!(err, NidusError::OrganizationContext));
}

#[tokio::test]
async fn mutations_invalidate_the_cached_list() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store.clone(), org_id).unwrap();

    assert!(workspace.startups().await.unwrap().is_empty());

    let startup = workspace
        .create_startup(startup_input(org_id, "Cached"))
        .await
        .unwrap();
    assert_eq!(workspace.startups().await.unwrap().len(), 1);

    // A write that bypasses the workspace is invisible while the cached
    // list is fresh.
    Repository::<nidus_core::models::startup::Startup>::create(
        &store,
        startup_input(org_id, "Bypass"),
    )
    .await
    .unwrap();
    assert_eq!(workspace.startups().await.unwrap().len(), 1);

    // A workspace mutation invalidates, so the next read refetches and
    // sees both rows plus the update.
    workspace
        .update_startup(
            startup.id,
            UpdateStartup {
                stage: Some(StartupStage::Growth),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = workspace.startups().await.unwrap();
    assert_eq!(listed.len(), 2);
    let updated = listed.iter().find(|s| s.id == startup.id).unwrap();
    assert_eq!(updated.stage, StartupStage::Growth);
}

#[tokio::test]
async fn invalid_cohort_capacity_never_reaches_the_store() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store, org_id).unwrap();

    for capacity in [0, 51] {
        let err = workspace
            .create_cohort(CreateCohort {
                organization_id: org_id,
                name: "Out of bounds".into(),
                start_date: "2024-01-01".parse().unwrap(),
                end_date: "2024-06-01".parse().unwrap(),
                status: CohortStatus::Planning,
                max_startups: capacity,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NidusError::Validation { .. }));
    }

    assert!(workspace.cohorts().await.unwrap().is_empty());
}

#[tokio::test]
async fn created_cohort_carries_workspace_organization() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store, org_id).unwrap();

    let cohort = workspace
        .create_cohort(CreateCohort {
            organization_id: org_id,
            name: "Cohort X".into(),
            start_date: "2024-01-01".parse().unwrap(),
            end_date: "2024-06-01".parse().unwrap(),
            status: CohortStatus::Planning,
            max_startups: 10,
        })
        .await
        .unwrap();

    assert_eq!(cohort.organization_id, org_id);
    assert_eq!(cohort.status, CohortStatus::Planning);
}

#[tokio::test]
async fn member_roster_reflects_workspace_mutations() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store, org_id).unwrap();

    // The admin created at provisioning is already on the roster.
    assert_eq!(workspace.members().await.unwrap().len(), 1);

    let member = workspace
        .create_member(CreateProfile {
            organization_id: Some(org_id),
            email: "newcomer@test.com".into(),
            role: Role::Founder,
            display_name: Some("Newcomer".into()),
        })
        .await
        .unwrap();
    assert_eq!(workspace.members().await.unwrap().len(), 2);

    workspace
        .update_member(
            member.id,
            UpdateProfile {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let roster = workspace.members().await.unwrap();
    let updated = roster.iter().find(|p| p.id == member.id).unwrap();
    assert!(!updated.active);
}

// -----------------------------------------------------------------------
// Uploads
// -----------------------------------------------------------------------

#[tokio::test]
async fn rejected_upload_never_reaches_the_blob_store() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store, org_id).unwrap();
    let blobs = MemoryBlobStore::new();

    let err = workspace
        .upload_material(
            &blobs,
            UploadRequest {
                file_name: "notes.txt".into(),
                content_type: "text/plain".into(),
                bytes: b"plain text".to_vec(),
                startup_id: None,
                uploaded_by: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, NidusError::Upload(_)));
    assert_eq!(blobs.object_count(), 0);
    assert!(workspace.materials().await.unwrap().is_empty());
}

#[tokio::test]
async fn accepted_upload_persists_metadata_with_public_url() {
    let (store, _db, org_id) = setup().await;
    let workspace = Workspace::new(store, org_id).unwrap();
    let blobs = MemoryBlobStore::new();

    let material = workspace
        .upload_material(
            &blobs,
            UploadRequest {
                file_name: "pitch-deck.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![0u8; 2048],
                startup_id: None,
                uploaded_by: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(blobs.object_count(), 1);
    assert!(material.url.starts_with("memory://nidus-materials/"));
    assert_eq!(material.size_bytes, 2048);
    assert_eq!(material.organization_id, org_id);

    let listed = workspace.materials().await.unwrap();
    assert_eq!(listed.len(), 1);

    workspace.delete_material(material.id).await.unwrap();
    assert!(workspace.materials().await.unwrap().is_empty());
}

//! Integration tests for organization and profile repositories using
//! in-memory SurrealDB.

use nidus_core::models::organization::{CreateOrganization, UpdateOrganization};
use nidus_core::models::profile::{CreateProfile, Profile, Role, UpdateProfile};
use nidus_core::repository::{
    OrganizationRepository, Pagination, ProfileQueries, Repository,
};
use nidus_db::SurrealStore;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> (
    SurrealStore<surrealdb::engine::local::Db>,
    Surreal<surrealdb::engine::local::Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    nidus_db::run_migrations(&db).await.unwrap();
    (SurrealStore::new(db.clone()), db)
}

fn org_input(name: &str, slug: &str) -> CreateOrganization {
    CreateOrganization {
        name: name.into(),
        slug: slug.into(),
        domain: None,
        description: None,
        settings: None,
    }
}

// -----------------------------------------------------------------------
// Organization tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_organization() {
    let (store, _db) = setup().await;

    let org = OrganizationRepository::create(&store, org_input("ACME Accelerator", "acme"))
        .await
        .unwrap();

    assert_eq!(org.name, "ACME Accelerator");
    assert_eq!(org.slug, "acme");
    assert!(org.settings.is_object());

    let fetched = OrganizationRepository::get(&store, org.id).await.unwrap();
    assert_eq!(fetched.id, org.id);
    assert_eq!(fetched.name, org.name);
    assert_eq!(fetched.slug, org.slug);
}

#[tokio::test]
async fn get_organization_by_slug() {
    let (store, _db) = setup().await;

    let org = OrganizationRepository::create(&store, org_input("Slug Test", "slug-test"))
        .await
        .unwrap();

    let fetched = store.get_by_slug("slug-test").await.unwrap();
    assert_eq!(fetched.id, org.id);

    assert!(store.get_by_slug("missing").await.is_err());
}

#[tokio::test]
async fn update_organization_writes_only_supplied_fields() {
    let (store, _db) = setup().await;

    let org = OrganizationRepository::create(&store, org_input("Before", "update-test"))
        .await
        .unwrap();

    let updated = OrganizationRepository::update(
        &store,
        org.id,
        UpdateOrganization {
            name: Some("After".into()),
            description: Some("An incubation program".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.id, org.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.slug, "update-test"); // unchanged
    assert_eq!(updated.description.as_deref(), Some("An incubation program"));
    assert!(updated.updated_at >= org.updated_at);
}

#[tokio::test]
async fn list_organizations_with_pagination() {
    let (store, _db) = setup().await;

    for i in 0..3 {
        OrganizationRepository::create(&store, org_input(&format!("Org {i}"), &format!("org-{i}")))
            .await
            .unwrap();
    }

    let page = OrganizationRepository::list(
        &store,
        Pagination {
            offset: 0,
            limit: 2,
        },
    )
    .await
    .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);

    let rest = OrganizationRepository::list(
        &store,
        Pagination {
            offset: 2,
            limit: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(rest.items.len(), 1);
}

// -----------------------------------------------------------------------
// Profile tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_profile() {
    let (store, _db) = setup().await;

    let org = OrganizationRepository::create(&store, org_input("Org", "org"))
        .await
        .unwrap();

    let profile = Repository::<Profile>::create(
        &store,
        CreateProfile {
            organization_id: Some(org.id),
            email: "founder@example.com".into(),
            role: Role::Founder,
            display_name: Some("Ada".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(profile.organization_id, Some(org.id));
    assert_eq!(profile.role, "founder");
    assert!(profile.active);
    assert!(profile.last_login.is_none());

    let fetched = Repository::<Profile>::get(&store, profile.id).await.unwrap();
    assert_eq!(fetched.email, "founder@example.com");
}

#[tokio::test]
async fn get_profile_by_email() {
    let (store, _db) = setup().await;

    let created = Repository::<Profile>::create(
        &store,
        CreateProfile {
            organization_id: None,
            email: "pm@example.com".into(),
            role: Role::ProgramManager,
            display_name: None,
        },
    )
    .await
    .unwrap();

    let fetched = store.get_by_email("pm@example.com").await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert!(fetched.organization_id.is_none());

    assert!(store.get_by_email("nobody@example.com").await.is_err());
}

#[tokio::test]
async fn update_profile_stamps_last_login() {
    let (store, _db) = setup().await;

    let profile = Repository::<Profile>::create(
        &store,
        CreateProfile {
            organization_id: None,
            email: "support@example.com".into(),
            role: Role::Support,
            display_name: None,
        },
    )
    .await
    .unwrap();

    let now = chrono::Utc::now();
    let updated = Repository::<Profile>::update(
        &store,
        profile.id,
        UpdateProfile {
            last_login: Some(now),
            active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(updated.last_login.is_some());
    assert!(!updated.active);
    assert_eq!(updated.email, "support@example.com"); // unchanged
}

#[tokio::test]
async fn list_profiles_is_organization_scoped() {
    let (store, _db) = setup().await;

    let org_a = OrganizationRepository::create(&store, org_input("A", "a"))
        .await
        .unwrap();
    let org_b = OrganizationRepository::create(&store, org_input("B", "b"))
        .await
        .unwrap();

    for (email, org) in [
        ("one@a.com", Some(org_a.id)),
        ("two@a.com", Some(org_a.id)),
        ("one@b.com", Some(org_b.id)),
        ("floating@none.com", None),
    ] {
        Repository::<Profile>::create(
            &store,
            CreateProfile {
                organization_id: org,
                email: email.into(),
                role: Role::Mentor,
                display_name: None,
            },
        )
        .await
        .unwrap();
    }

    let page = Repository::<Profile>::list(&store, org_a.id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|p| p.organization_id == Some(org_a.id)));
}

#[tokio::test]
async fn unrecognized_role_round_trips() {
    // Rows written with roles outside the recognized set must read back
    // unchanged so routing can surface the unknown-role state.
    let (store, db) = setup().await;

    let id = Uuid::new_v4();
    db.query(
        "CREATE type::record('profile', $id) SET \
         organization_id = NONE, email = $email, role = 'guest'",
    )
    .bind(("id", id.to_string()))
    .bind(("email", "guest@example.com".to_string()))
    .await
    .unwrap()
    .check()
    .unwrap();

    let profile = Repository::<Profile>::get(&store, id).await.unwrap();
    assert_eq!(profile.role, "guest");
    assert!(profile.role.parse::<Role>().is_err());
}

//! Workspace service: organization-scoped data access with cache
//! invalidation, plus explicit provisioning.

use std::time::Duration;

use nidus_core::error::{NidusError, NidusResult};
use nidus_core::models::cohort::{Cohort, CreateCohort, UpdateCohort};
use nidus_core::models::event::{CreateEvent, Event, UpdateEvent};
use nidus_core::models::investment::{CreateInvestment, Investment, UpdateInvestment};
use nidus_core::models::material::{CreateMaterial, Material};
use nidus_core::models::mentor::{CreateMentor, Mentor, UpdateMentor};
use nidus_core::models::organization::{CreateOrganization, Organization};
use nidus_core::models::profile::{CreateProfile, Profile, Role, UpdateProfile};
use nidus_core::models::startup::{CreateStartup, Startup, UpdateStartup};
use nidus_core::repository::{
    InvestmentQueries, MaterialQueries, MentorQueries, OrganizationRepository, Pagination,
    Remove, Repository, Scoped, StartupQueries, StartupWithCohort, Store,
};
use tracing::info;
use uuid::Uuid;

use crate::cache::{DEFAULT_STALE_AFTER, QueryCache, fetch_with_retry};
use crate::upload::{BlobStore, UploadPolicy, UploadRequest};

/// Dashboards read whole tenant collections; one generous page bounds a
/// runaway tenant.
const LIST_LIMIT: u64 = 1_000;

fn list_page() -> Pagination {
    Pagination {
        offset: 0,
        limit: LIST_LIMIT,
    }
}

/// One organization-scoped handle over the composed store.
///
/// Every mutation routes through the workspace so the matching cached
/// list is invalidated; reads are served from cache while fresh.
pub struct Workspace<S> {
    store: S,
    organization_id: Uuid,
    upload_policy: UploadPolicy,
    startups: QueryCache<Startup>,
    cohorts: QueryCache<Cohort>,
    mentors: QueryCache<Mentor>,
    investments: QueryCache<Investment>,
    events: QueryCache<Event>,
    materials: QueryCache<Material>,
    members: QueryCache<Profile>,
}

impl<S: Store> Workspace<S> {
    /// Build a workspace with the default stale window and upload policy.
    ///
    /// A nil organization id is refused: without a tenant there is
    /// nothing to query, and callers must not fall through to a
    /// wildcard read.
    pub fn new(store: S, organization_id: Uuid) -> NidusResult<Self> {
        Self::with_config(
            store,
            organization_id,
            DEFAULT_STALE_AFTER,
            UploadPolicy::default(),
        )
    }

    pub fn with_config(
        store: S,
        organization_id: Uuid,
        stale_after: Duration,
        upload_policy: UploadPolicy,
    ) -> NidusResult<Self> {
        if organization_id.is_nil() {
            return Err(NidusError::OrganizationContext);
        }
        Ok(Self {
            store,
            organization_id,
            upload_policy,
            startups: QueryCache::new(stale_after),
            cohorts: QueryCache::new(stale_after),
            mentors: QueryCache::new(stale_after),
            investments: QueryCache::new(stale_after),
            events: QueryCache::new(stale_after),
            materials: QueryCache::new(stale_after),
            members: QueryCache::new(stale_after),
        })
    }

    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn organization(&self) -> NidusResult<Organization> {
        fetch_with_retry(|| OrganizationRepository::get(&self.store, self.organization_id))
            .await
    }

    // -- cached list reads ------------------------------------------------

    pub async fn startups(&self) -> NidusResult<Vec<Startup>> {
        self.cached_list(&self.startups).await
    }

    pub async fn cohorts(&self) -> NidusResult<Vec<Cohort>> {
        self.cached_list(&self.cohorts).await
    }

    pub async fn mentors(&self) -> NidusResult<Vec<Mentor>> {
        self.cached_list(&self.mentors).await
    }

    pub async fn investments(&self) -> NidusResult<Vec<Investment>> {
        self.cached_list(&self.investments).await
    }

    pub async fn events(&self) -> NidusResult<Vec<Event>> {
        self.cached_list(&self.events).await
    }

    pub async fn materials(&self) -> NidusResult<Vec<Material>> {
        self.cached_list(&self.materials).await
    }

    pub async fn members(&self) -> NidusResult<Vec<Profile>> {
        self.cached_list(&self.members).await
    }

    // -- direct reads -----------------------------------------------------

    pub async fn startups_with_cohort(&self) -> NidusResult<Vec<StartupWithCohort>> {
        let page = fetch_with_retry(|| {
            self.store.list_with_cohort(self.organization_id, list_page())
        })
        .await?;
        Ok(page.items)
    }

    pub async fn available_mentors(&self) -> NidusResult<Vec<Mentor>> {
        let page =
            fetch_with_retry(|| self.store.list_available(self.organization_id, list_page()))
                .await?;
        Ok(page.items)
    }

    pub async fn startup_investments(&self, startup_id: Uuid) -> NidusResult<Vec<Investment>> {
        let page = fetch_with_retry(|| {
            InvestmentQueries::list_by_startup(
                &self.store,
                self.organization_id,
                startup_id,
                list_page(),
            )
        })
        .await?;
        Ok(page.items)
    }

    pub async fn startup_materials(&self, startup_id: Uuid) -> NidusResult<Vec<Material>> {
        let page = fetch_with_retry(|| {
            MaterialQueries::list_by_startup(
                &self.store,
                self.organization_id,
                startup_id,
                list_page(),
            )
        })
        .await?;
        Ok(page.items)
    }

    // -- mutations --------------------------------------------------------

    pub async fn create_startup(&self, input: CreateStartup) -> NidusResult<Startup> {
        self.create_entity(&self.startups, input).await
    }

    pub async fn update_startup(&self, id: Uuid, input: UpdateStartup) -> NidusResult<Startup> {
        self.update_entity(&self.startups, id, input).await
    }

    pub async fn create_cohort(&self, input: CreateCohort) -> NidusResult<Cohort> {
        self.create_entity(&self.cohorts, input).await
    }

    pub async fn update_cohort(&self, id: Uuid, input: UpdateCohort) -> NidusResult<Cohort> {
        self.update_entity(&self.cohorts, id, input).await
    }

    pub async fn create_mentor(&self, input: CreateMentor) -> NidusResult<Mentor> {
        self.create_entity(&self.mentors, input).await
    }

    pub async fn update_mentor(&self, id: Uuid, input: UpdateMentor) -> NidusResult<Mentor> {
        self.update_entity(&self.mentors, id, input).await
    }

    pub async fn create_investment(&self, input: CreateInvestment) -> NidusResult<Investment> {
        self.create_entity(&self.investments, input).await
    }

    pub async fn update_investment(
        &self,
        id: Uuid,
        input: UpdateInvestment,
    ) -> NidusResult<Investment> {
        self.update_entity(&self.investments, id, input).await
    }

    pub async fn create_event(&self, input: CreateEvent) -> NidusResult<Event> {
        self.create_entity(&self.events, input).await
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> NidusResult<Event> {
        self.update_entity(&self.events, id, input).await
    }

    /// Add a member to the organization's roster.
    pub async fn create_member(&self, input: CreateProfile) -> NidusResult<Profile> {
        self.create_entity(&self.members, input).await
    }

    pub async fn update_member(&self, id: Uuid, input: UpdateProfile) -> NidusResult<Profile> {
        self.update_entity(&self.members, id, input).await
    }

    /// Validate, store the blob, then persist the metadata row. A
    /// rejected file never reaches the storage boundary.
    pub async fn upload_material<B: BlobStore>(
        &self,
        blobs: &B,
        request: UploadRequest,
    ) -> NidusResult<Material> {
        self.upload_policy.validate(
            &request.file_name,
            &request.content_type,
            request.bytes.len() as u64,
        )?;

        let key = format!(
            "{}/{}/{}",
            self.organization_id,
            Uuid::new_v4(),
            request.file_name
        );
        let size_bytes = request.bytes.len() as u64;
        let url = blobs
            .put(&key, &request.content_type, request.bytes)
            .await?;

        self.create_entity(
            &self.materials,
            CreateMaterial {
                organization_id: self.organization_id,
                startup_id: request.startup_id,
                file_name: request.file_name,
                content_type: request.content_type,
                size_bytes,
                url,
                uploaded_by: request.uploaded_by,
            },
        )
        .await
    }

    pub async fn delete_material(&self, id: Uuid) -> NidusResult<()> {
        Remove::<Material>::delete(&self.store, id).await?;
        self.materials.invalidate(self.organization_id);
        Ok(())
    }
}

impl<S> Workspace<S> {
    /// Fetch one record by id, bypassing the list caches.
    pub async fn get<E>(&self, id: Uuid) -> NidusResult<E>
    where
        S: Repository<E>,
        E: Scoped,
    {
        fetch_with_retry(|| <S as Repository<E>>::get(&self.store, id)).await
    }

    async fn cached_list<E>(&self, cache: &QueryCache<E>) -> NidusResult<Vec<E>>
    where
        S: Repository<E>,
        E: Scoped + Clone,
    {
        if let Some(rows) = cache.fresh(self.organization_id) {
            return Ok(rows);
        }

        let page = fetch_with_retry(|| {
            <S as Repository<E>>::list(&self.store, self.organization_id, list_page())
        })
        .await?;
        cache.store(self.organization_id, page.items.clone());
        Ok(page.items)
    }

    async fn create_entity<E>(&self, cache: &QueryCache<E>, input: E::Create) -> NidusResult<E>
    where
        S: Repository<E>,
        E: Scoped + Clone,
    {
        let created = <S as Repository<E>>::create(&self.store, input).await?;
        cache.invalidate(self.organization_id);
        Ok(created)
    }

    async fn update_entity<E>(
        &self,
        cache: &QueryCache<E>,
        id: Uuid,
        input: E::Update,
    ) -> NidusResult<E>
    where
        S: Repository<E>,
        E: Scoped + Clone,
    {
        let updated = <S as Repository<E>>::update(&self.store, id, input).await?;
        cache.invalidate(self.organization_id);
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// Provisioning
// ---------------------------------------------------------------------------

/// Input for explicit workspace provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionInput {
    pub organization_name: String,
    pub organization_slug: String,
    pub admin_email: String,
    pub admin_name: Option<String>,
}

/// Create an organization and its admin profile.
///
/// Provisioning is a deliberate operation invoked by an operator or by
/// demo-mode bootstrap, never a side effect of authentication; a signed-in
/// user without a profile sees the no-profile route state instead.
pub async fn provision_workspace<S: Store>(
    store: &S,
    input: ProvisionInput,
) -> NidusResult<(Organization, Profile)> {
    let organization = OrganizationRepository::create(
        store,
        CreateOrganization {
            name: input.organization_name,
            slug: input.organization_slug,
            domain: None,
            description: None,
            settings: None,
        },
    )
    .await?;

    let admin = <S as Repository<Profile>>::create(
        store,
        CreateProfile {
            organization_id: Some(organization.id),
            email: input.admin_email,
            role: Role::Admin,
            display_name: input.admin_name,
        },
    )
    .await?;

    info!(organization = %organization.slug, admin = %admin.email, "provisioned workspace");

    Ok((organization, admin))
}

/// Seed the demo workspace used when connection parameters are absent.
pub async fn bootstrap_demo<S: Store>(store: &S) -> NidusResult<(Organization, Profile)> {
    provision_workspace(
        store,
        ProvisionInput {
            organization_name: "Demo Incubator".into(),
            organization_slug: "demo".into(),
            admin_email: "demo@nidus.local".into(),
            admin_name: Some("Demo Admin".into()),
        },
    )
    .await
}

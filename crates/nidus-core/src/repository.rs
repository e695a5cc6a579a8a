//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and return a single typed error;
//! the data-access layer performs no retries and no partial-failure
//! recovery. One generic [`Repository`] covers every organization-scoped
//! entity; per-entity traits exist only for the queries that genuinely
//! differ (joins, filtered reads, alternate keys). Organizations are the
//! tenant root and get their own global-scope trait.

use uuid::Uuid;

use crate::error::NidusResult;
use crate::models::{
    cohort::{Cohort, CreateCohort, UpdateCohort},
    event::{CreateEvent, Event, UpdateEvent},
    investment::{CreateInvestment, Investment, UpdateInvestment},
    material::{CreateMaterial, Material, UpdateMaterial},
    mentor::{CreateMentor, Mentor, UpdateMentor},
    organization::{CreateOrganization, Organization, UpdateOrganization},
    profile::{CreateProfile, Profile, UpdateProfile},
    startup::{CreateStartup, Startup, UpdateStartup},
};
use crate::validate::Validate;

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Associates an entity with its storage table and payload types.
pub trait Record: Sized + Send + Sync + 'static {
    const TABLE: &'static str;
    type Create: Validate + Send + 'static;
    type Update: Validate + Send + 'static;
}

/// Marker for entities scoped by `organization_id`.
pub trait Scoped: Record {}

impl Record for Organization {
    const TABLE: &'static str = "organization";
    type Create = CreateOrganization;
    type Update = UpdateOrganization;
}

impl Record for Profile {
    const TABLE: &'static str = "profile";
    type Create = CreateProfile;
    type Update = UpdateProfile;
}

impl Record for Startup {
    const TABLE: &'static str = "startup";
    type Create = CreateStartup;
    type Update = UpdateStartup;
}

impl Record for Cohort {
    const TABLE: &'static str = "cohort";
    type Create = CreateCohort;
    type Update = UpdateCohort;
}

impl Record for Mentor {
    const TABLE: &'static str = "mentor";
    type Create = CreateMentor;
    type Update = UpdateMentor;
}

impl Record for Investment {
    const TABLE: &'static str = "investment";
    type Create = CreateInvestment;
    type Update = UpdateInvestment;
}

impl Record for Event {
    const TABLE: &'static str = "event";
    type Create = CreateEvent;
    type Update = UpdateEvent;
}

impl Record for Material {
    const TABLE: &'static str = "material";
    type Create = CreateMaterial;
    type Update = UpdateMaterial;
}

impl Scoped for Profile {}
impl Scoped for Startup {}
impl Scoped for Cohort {}
impl Scoped for Mentor {}
impl Scoped for Investment {}
impl Scoped for Event {}
impl Scoped for Material {}

/// Generic repository over an organization-scoped entity.
///
/// `create` and `update` validate their payload before issuing any query,
/// so rejected input never reaches the store. `get` enforces no tenant
/// check; row-level policy is the external store's concern.
pub trait Repository<E: Scoped>: Send + Sync {
    fn list(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<E>>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = NidusResult<E>> + Send;
    fn create(&self, input: E::Create) -> impl Future<Output = NidusResult<E>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: E::Update,
    ) -> impl Future<Output = NidusResult<E>> + Send;
}

/// Deletion capability. Implemented only for entities whose lifecycle
/// includes removal (materials).
pub trait Remove<E: Scoped>: Repository<E> {
    fn delete(&self, id: Uuid) -> impl Future<Output = NidusResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Organization (tenant root, global scope)
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = NidusResult<Organization>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = NidusResult<Organization>> + Send;
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = NidusResult<Organization>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = NidusResult<Organization>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<Organization>>> + Send;
}

// ---------------------------------------------------------------------------
// Per-entity query extensions
// ---------------------------------------------------------------------------

/// A startup together with its cohort, when one is assigned.
#[derive(Debug, Clone)]
pub struct StartupWithCohort {
    pub startup: Startup,
    pub cohort: Option<Cohort>,
}

pub trait ProfileQueries: Repository<Profile> {
    fn get_by_email(&self, email: &str) -> impl Future<Output = NidusResult<Profile>> + Send;
}

pub trait StartupQueries: Repository<Startup> {
    fn list_with_cohort(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<StartupWithCohort>>> + Send;
    fn list_by_cohort(
        &self,
        organization_id: Uuid,
        cohort_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<Startup>>> + Send;
}

pub trait MentorQueries: Repository<Mentor> {
    fn list_available(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<Mentor>>> + Send;
    fn get_by_user(&self, user_id: Uuid) -> impl Future<Output = NidusResult<Mentor>> + Send;
}

pub trait InvestmentQueries: Repository<Investment> {
    fn list_by_startup(
        &self,
        organization_id: Uuid,
        startup_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<Investment>>> + Send;
}

pub trait MaterialQueries: Remove<Material> {
    fn list_by_startup(
        &self,
        organization_id: Uuid,
        startup_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = NidusResult<PaginatedResult<Material>>> + Send;
}

/// The composed data-access surface a full workspace needs.
pub trait Store:
    OrganizationRepository
    + Repository<Profile>
    + ProfileQueries
    + Repository<Startup>
    + StartupQueries
    + Repository<Cohort>
    + Repository<Mentor>
    + MentorQueries
    + Repository<Investment>
    + InvestmentQueries
    + Repository<Event>
    + Repository<Material>
    + Remove<Material>
    + MaterialQueries
{
}

impl<T> Store for T where
    T: OrganizationRepository
        + Repository<Profile>
        + ProfileQueries
        + Repository<Startup>
        + StartupQueries
        + Repository<Cohort>
        + Repository<Mentor>
        + MentorQueries
        + Repository<Investment>
        + InvestmentQueries
        + Repository<Event>
        + Repository<Material>
        + Remove<Material>
        + MaterialQueries
{
}

//! Listing endpoints.
//!
//! Each endpoint fixes the entity and the scope guard; callers only supply
//! the sparse filter, their identity and a page request.

use crate::{
    application::{Application, ApplicationFilterInput},
    job::{Job, JobFilterInput},
    vocab::JobStatus,
};
use jobboard_core::{
    config::ListingConfig,
    db::{
        FilterInput, ListingTarget, Page, PageRequest, Role, ScopeContext, ScopeGuard,
        StorageExecutor, ValidationError, compile_and_execute,
    },
    error::ListingError,
    traits::Listable,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

///
/// Endpoint
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Endpoint {
    /// Anyone may browse active postings.
    PublicJobs,
    /// An employer's own postings in every status.
    EmployerJobs,
    /// Applications to an employer's postings.
    EmployerApplications,
    /// A candidate's own applications.
    CandidateApplications,
}

impl Endpoint {
    #[must_use]
    pub fn target(self) -> ListingTarget {
        match self {
            Self::PublicJobs => ListingTarget::new(
                Job::MODEL,
                ScopeGuard::visibility("status", vec![JobStatus::Active]),
            ),
            Self::EmployerJobs => {
                ListingTarget::new(Job::MODEL, ScopeGuard::owner("employerId", Role::Employer))
            }
            Self::EmployerApplications => ListingTarget::new(
                Application::MODEL,
                ScopeGuard::owner("employerId", Role::Employer),
            ),
            Self::CandidateApplications => ListingTarget::new(
                Application::MODEL,
                ScopeGuard::owner("candidateId", Role::Candidate),
            ),
        }
    }
}

///
/// ListingRequest
/// Wire shape of one listing call: `{ "filter": {...}, "page": {...} }`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingRequest<F> {
    pub filter: F,
    pub page: PageRequest,
}

impl<F> ListingRequest<F> {
    #[must_use]
    pub const fn new(filter: F, page: PageRequest) -> Self {
        Self { filter, page }
    }
}

impl<F: ListingFilter> ListingRequest<F> {
    ///
    /// Decode a JSON request body.
    ///
    /// Decoding failures surface as validation errors: an unknown key is
    /// `UnknownField`, anything else (unknown vocabulary literal, wrong type,
    /// malformed JSON) is `InvalidLiteral`.
    ///
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|err| decode_error(F::Row::MODEL.path, &err))
    }
}

///
/// ListingFilter
/// A filter input that can be decoded from a request for one kind of row.
///

pub trait ListingFilter: FilterInput + DeserializeOwned + Default {
    type Row: Listable;
}

impl ListingFilter for JobFilterInput {
    type Row = Job;
}

impl ListingFilter for ApplicationFilterInput {
    type Row = Application;
}

// serde reports unknown keys as "unknown field `name`, expected ...".
fn decode_error(entity: &'static str, err: &serde_json::Error) -> ValidationError {
    let message = err.to_string();
    let unknown = message
        .strip_prefix("unknown field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field.to_string());

    match unknown {
        Some(field) => ValidationError::UnknownField { entity, field },
        None => ValidationError::InvalidLiteral {
            field: "request".to_string(),
            message,
        },
    }
}

///
/// JobBoard
///
/// Listing facade over one job store and one application store.
///

#[derive(Debug)]
pub struct JobBoard<'a, J: ?Sized, A: ?Sized> {
    jobs: &'a J,
    applications: &'a A,
    config: ListingConfig,
}

impl<'a, J, A> JobBoard<'a, J, A>
where
    J: StorageExecutor<Row = Job> + ?Sized,
    A: StorageExecutor<Row = Application> + ?Sized,
{
    #[must_use]
    pub const fn new(jobs: &'a J, applications: &'a A, config: ListingConfig) -> Self {
        Self {
            jobs,
            applications,
            config,
        }
    }

    /// Active postings, open to anonymous callers.
    pub fn public_jobs(
        &self,
        ctx: &ScopeContext,
        request: &ListingRequest<JobFilterInput>,
    ) -> Result<Page<Job>, ListingError> {
        self.list_jobs(Endpoint::PublicJobs, ctx, request)
    }

    /// The calling employer's postings.
    pub fn employer_jobs(
        &self,
        ctx: &ScopeContext,
        request: &ListingRequest<JobFilterInput>,
    ) -> Result<Page<Job>, ListingError> {
        self.list_jobs(Endpoint::EmployerJobs, ctx, request)
    }

    /// Applications received by the calling employer.
    pub fn employer_applications(
        &self,
        ctx: &ScopeContext,
        request: &ListingRequest<ApplicationFilterInput>,
    ) -> Result<Page<Application>, ListingError> {
        list(Endpoint::EmployerApplications, ctx, request, self.applications, &self.config)
    }

    /// Applications submitted by the calling candidate.
    pub fn candidate_applications(
        &self,
        ctx: &ScopeContext,
        request: &ListingRequest<ApplicationFilterInput>,
    ) -> Result<Page<Application>, ListingError> {
        list(Endpoint::CandidateApplications, ctx, request, self.applications, &self.config)
    }

    fn list_jobs(
        &self,
        endpoint: Endpoint,
        ctx: &ScopeContext,
        request: &ListingRequest<JobFilterInput>,
    ) -> Result<Page<Job>, ListingError> {
        list(endpoint, ctx, request, self.jobs, &self.config)
    }
}

fn list<F, S>(
    endpoint: Endpoint,
    ctx: &ScopeContext,
    request: &ListingRequest<F>,
    store: &S,
    config: &ListingConfig,
) -> Result<Page<S::Row>, ListingError>
where
    F: FilterInput,
    S: StorageExecutor + ?Sized,
{
    compile_and_execute(
        &endpoint.target(),
        &request.filter,
        ctx,
        request.page,
        store,
        config,
    )
}

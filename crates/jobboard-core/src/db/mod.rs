//! Listing engine: filter model, predicate compiler, scope guard, paged
//! executor and the reference storage adapters.
//!
//! `compile_and_execute` is the single entry point that wires them
//! together for one request.

pub mod executor;
pub mod filter;
pub mod predicate;
pub mod response;
pub mod scope;
pub mod store;


use crate::{
    config::ListingConfig,
    error::ListingError,
    model::entity::EntityModel,
    obs::{ListingEvent, sink::record},
};

// re-exports
pub use executor::{PagedQueryExecutor, StorageError, StorageExecutor, StoragePage};
pub use filter::{
    Criterion, FilterInput, FilterSet, Operator, PageRequest, PageWindow, RangeBound, RangeBounds,
    RangeInput, SortDirection, SortKey, SortSpec, ValidationError,
};
pub use predicate::{
    CompiledQuery, FieldPresence, LeafOp, LeafPredicate, Predicate, PredicateCompiler,
    QueryFingerprint, Row, SortDirective, eval,
};
pub use response::Page;
pub use scope::{
    AuthorizationError, Principal, Role, ScopeConstraint, ScopeContext, ScopeGuard, ScopeKind,
};
pub use store::MemoryStore;

///
/// ListingTarget
///
/// What is being listed and under which guard. Chosen by the calling
/// endpoint; request input never influences either part.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingTarget {
    model: &'static EntityModel,
    guard: ScopeGuard,
}

impl ListingTarget {
    #[must_use]
    pub const fn new(model: &'static EntityModel, guard: ScopeGuard) -> Self {
        Self { model, guard }
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub const fn guard(&self) -> &ScopeGuard {
        &self.guard
    }

    ///
    /// Scope, build and compile one request without executing it.
    ///
    /// The guard is checked against the model and then run, both before any
    /// input is validated.
    ///
    pub fn compile<I>(
        &self,
        input: &I,
        ctx: &ScopeContext,
        page: PageRequest,
        config: &ListingConfig,
    ) -> Result<CompiledQuery, ListingError>
    where
        I: FilterInput + ?Sized,
    {
        let result = self.compile_inner(input, ctx, page, config);
        if let Err(err) = &result {
            reject(self.model.path, err);
        }

        result
    }

    fn compile_inner<I>(
        &self,
        input: &I,
        ctx: &ScopeContext,
        page: PageRequest,
        config: &ListingConfig,
    ) -> Result<CompiledQuery, ListingError>
    where
        I: FilterInput + ?Sized,
    {
        self.guard.check(self.model)?;
        let scope = self.guard.constraint(ctx, self.model.path)?;
        let window = page.resolve(config.default_limit)?;
        let filter = input.to_filter_set()?.with_page(window);
        let query = PredicateCompiler::new(self.model).compile(&filter, scope)?;

        record(&ListingEvent::Compiled {
            entity: query.entity(),
            fingerprint: query.fingerprint(),
            leaves: query.predicate().leaf_count(),
            constant_false: query.filter().is_false(),
        });

        Ok(query)
    }
}

///
/// Compile and execute one listing request.
///
/// Errors are reported before any storage call for validation and
/// authorization failures; storage failures propagate unchanged. No error
/// is ever downgraded to an empty page.
///
pub fn compile_and_execute<I, S>(
    target: &ListingTarget,
    input: &I,
    ctx: &ScopeContext,
    page: PageRequest,
    store: &S,
    config: &ListingConfig,
) -> Result<Page<S::Row>, ListingError>
where
    I: FilterInput + ?Sized,
    S: StorageExecutor + ?Sized,
{
    let query = target.compile(input, ctx, page, config)?;

    PagedQueryExecutor::new(store, *config)
        .execute(&query)
        .inspect_err(|err| reject(query.entity(), err))
}

fn reject(entity: &'static str, err: &ListingError) {
    record(&ListingEvent::Rejected {
        entity,
        class: err.class(),
        kind: err.kind(),
        detail: err.detail(),
    });
}

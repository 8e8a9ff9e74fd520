use crate::{
    db::{
        filter::{
            Criterion, FilterSet, Operator, PageWindow, SortDirection, SortKey, SortSpec,
            ValidationError, canonical_set,
        },
        predicate::{Predicate, QueryFingerprint, fingerprint, validate::validate_criterion},
        scope::ScopeConstraint,
    },
    model::entity::EntityModel,
    value::Value,
};

///
/// SortDirective
///
/// Fully resolved ordering: validated caller keys followed by exactly one
/// tie-break on the primary key, which is always the final key.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortDirective {
    keys: Vec<SortKey>,
}

impl SortDirective {
    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// The unique, always-last key.
    #[must_use]
    pub fn tie_break(&self) -> Option<&SortKey> {
        self.keys.last()
    }
}

///
/// CompiledQuery
///
/// Immutable output of the compiler. The root predicate is always
/// `And([scope, filter])`: the scope leaf is present and evaluated even when
/// the caller's part is constant TRUE or FALSE.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledQuery {
    model: &'static EntityModel,
    scope: Predicate,
    filter: Predicate,
    root: Predicate,
    sort: SortDirective,
    page: PageWindow,
    fingerprint: QueryFingerprint,
}

impl CompiledQuery {
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.model.path
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    /// Root tree handed to storage.
    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.root
    }

    /// Mandatory scope part of the root.
    #[must_use]
    pub const fn scope(&self) -> &Predicate {
        &self.scope
    }

    /// Caller-supplied part of the root.
    #[must_use]
    pub const fn filter(&self) -> &Predicate {
        &self.filter
    }

    #[must_use]
    pub const fn sort(&self) -> &SortDirective {
        &self.sort
    }

    #[must_use]
    pub const fn page(&self) -> PageWindow {
        self.page
    }

    /// Stable identity of (entity, predicate, sort); excludes the page window.
    #[must_use]
    pub const fn fingerprint(&self) -> QueryFingerprint {
        self.fingerprint
    }
}

///
/// PredicateCompiler
///
/// Deterministic translation of a FilterSet into a predicate tree plus a
/// sort directive for one entity model. Compilation is all-or-nothing:
/// every criterion and sort key is validated before any tree is built.
///

#[derive(Clone, Copy, Debug)]
pub struct PredicateCompiler {
    model: &'static EntityModel,
}

impl PredicateCompiler {
    #[must_use]
    pub const fn new(model: &'static EntityModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    /// Compile caller filters, compose the scope constraint, resolve ordering.
    pub fn compile(
        &self,
        filter: &FilterSet,
        scope: ScopeConstraint,
    ) -> Result<CompiledQuery, ValidationError> {
        let user = self.compile_filter(filter)?;
        let sort = self.compile_sort(filter.sort())?;
        let scope = scope.into_predicate();
        let root = Predicate::And(vec![scope.clone(), user.clone()]);
        let fingerprint = fingerprint::fingerprint(self.model.path, &root, &sort);

        Ok(CompiledQuery {
            model: self.model,
            scope,
            filter: user,
            root,
            sort,
            page: filter.page(),
            fingerprint,
        })
    }

    ///
    /// Compile the caller part of the tree.
    ///
    /// - no supplied criteria → `True` (everything within scope)
    /// - any match-nothing criterion → `False`
    /// - otherwise `And` of per-criterion groups in criterion-key order
    ///
    pub fn compile_filter(&self, filter: &FilterSet) -> Result<Predicate, ValidationError> {
        let supplied: Vec<&Criterion> = filter
            .criteria()
            .map(|(_, criterion)| criterion)
            .filter(|criterion| !criterion.is_inert())
            .collect();

        for criterion in &supplied {
            validate_criterion(self.model, criterion)?;
        }

        if supplied.is_empty() {
            return Ok(Predicate::True);
        }
        if supplied.iter().any(|criterion| criterion.matches_nothing()) {
            return Ok(Predicate::False);
        }

        let children = supplied.into_iter().map(compile_criterion).collect();

        Ok(Predicate::And(children))
    }

    /// Resolve caller ordering and append the primary-key tie-break.
    pub fn compile_sort(&self, sort: &SortSpec) -> Result<SortDirective, ValidationError> {
        let mut keys = Vec::with_capacity(sort.keys().len() + 1);

        for key in sort.keys() {
            let field = self.model.sortable_field(&key.field).ok_or_else(|| {
                ValidationError::UnknownSortField {
                    entity: self.model.path,
                    field: key.field.clone(),
                }
            })?;

            keys.push(SortKey::new(field.name, key.direction));

            // the primary key already totally orders rows
            if self.model.is_primary_key(field.name) {
                return Ok(SortDirective { keys });
            }
        }

        keys.push(SortKey::new(self.model.primary_key.name, SortDirection::Asc));

        Ok(SortDirective { keys })
    }
}

// Build the predicate group for one validated, non-empty criterion.
fn compile_criterion(criterion: &Criterion) -> Predicate {
    let field = criterion.field();
    let values = criterion.values().unwrap_or_default();

    match criterion.op() {
        Operator::Eq => Predicate::eq(field, values[0].clone()),
        Operator::Gte => Predicate::gte(field, values[0].clone()),
        Operator::Lte => Predicate::lte(field, values[0].clone()),
        Operator::In => Predicate::in_(field, canonical(values)),
        Operator::Range => {
            let mut bounds = Vec::with_capacity(2);
            if !values[0].is_null() {
                bounds.push(Predicate::gte(field, values[0].clone()));
            }
            if !values[1].is_null() {
                bounds.push(Predicate::lte(field, values[1].clone()));
            }
            Predicate::And(bounds)
        }
        Operator::Contains => match canonical(values).as_slice() {
            [single] => Predicate::contains(field, single.clone()),
            many => Predicate::Or(
                many.iter()
                    .map(|value| Predicate::contains(field, value.clone()))
                    .collect(),
            ),
        },
        Operator::Exists => match values.first() {
            Some(Value::Bool(false)) => Predicate::is_null(field),
            _ => Predicate::is_not_null(field),
        },
    }
}

fn canonical(values: &[Value]) -> Vec<Value> {
    canonical_set(values.to_vec())
}

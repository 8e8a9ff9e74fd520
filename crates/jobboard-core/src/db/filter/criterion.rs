use crate::{db::filter::ValidationError, value::Value};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Operator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Eq,
    In,
    Range,
    Contains,
    Gte,
    Lte,
    Exists,
}

impl Operator {
    /// Operators whose empty value set means "match nothing" rather than "absent".
    #[must_use]
    pub const fn requires_value(self) -> bool {
        matches!(self, Self::In | Self::Contains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "EQ",
            Self::In => "IN",
            Self::Range => "RANGE",
            Self::Contains => "CONTAINS",
            Self::Gte => "GTE",
            Self::Lte => "LTE",
            Self::Exists => "EXISTS",
        };
        f.write_str(label)
    }
}

///
/// RangeBounds
/// Whether a RANGE criterion may leave one side open.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RangeBounds {
    #[default]
    Open,
    Closed,
}

///
/// RangeBound
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeBound {
    Lower,
    Upper,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

///
/// Criterion
///
/// One optional filter condition on a single field.
///
/// `values == None` marks the criterion inert: it was never supplied and is
/// excluded from compilation. `Some(vec![])` is meaningful for operators that
/// require a value (IN, CONTAINS) and compiles to a constant-false leaf.
///
/// RANGE stores `[lower, upper]` with `Value::Null` for an open side.
/// EXISTS stores `[Bool(true)]` for "present" or `[Bool(false)]` for "null".
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Criterion {
    field: String,
    op: Operator,
    values: Option<Vec<Value>>,
}

impl Criterion {
    fn new(field: impl Into<String>, op: Operator, values: Option<Vec<Value>>) -> Self {
        Self {
            field: field.into(),
            op,
            values,
        }
    }

    /// A criterion that was not supplied.
    #[must_use]
    pub fn inert(field: impl Into<String>, op: Operator) -> Self {
        Self::new(field, op, None)
    }

    // Null literals mean "not supplied" for single-value operators.
    fn single(field: impl Into<String>, op: Operator, value: Value) -> Self {
        if value.is_null() {
            Self::inert(field, op)
        } else {
            Self::new(field, op, Some(vec![value]))
        }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Eq, value.into())
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Gte, value.into())
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Lte, value.into())
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Contains, value.into())
    }

    /// Membership over a literal set. An empty set matches nothing.
    #[must_use]
    pub fn in_<V: Into<Value>>(field: impl Into<String>, values: Vec<V>) -> Self {
        Self::new(
            field,
            Operator::In,
            Some(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Any-of containment; several values OR together. An empty set matches nothing.
    #[must_use]
    pub fn contains_any<V: Into<Value>>(field: impl Into<String>, values: Vec<V>) -> Self {
        Self::new(
            field,
            Operator::Contains,
            Some(values.into_iter().map(Into::into).collect()),
        )
    }

    #[must_use]
    pub fn exists(field: impl Into<String>, present: bool) -> Self {
        Self::new(field, Operator::Exists, Some(vec![Value::Bool(present)]))
    }

    ///
    /// Build a RANGE criterion.
    ///
    /// - both bounds `Null` → inert
    /// - one bound `Null` under `RangeBounds::Closed` → `MissingRangeBound`
    /// - bounds of different families → `InvalidLiteral`
    /// - `lower > upper` → `InvalidRange`
    ///
    pub fn range(
        field: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
        bounds: RangeBounds,
    ) -> Result<Self, ValidationError> {
        let field = field.into();
        let (lower, upper) = (lower.into(), upper.into());

        match (lower.is_null(), upper.is_null()) {
            (true, true) => return Ok(Self::inert(field, Operator::Range)),
            (true, false) if bounds == RangeBounds::Closed => {
                return Err(ValidationError::MissingRangeBound {
                    field,
                    bound: RangeBound::Lower,
                });
            }
            (false, true) if bounds == RangeBounds::Closed => {
                return Err(ValidationError::MissingRangeBound {
                    field,
                    bound: RangeBound::Upper,
                });
            }
            (false, false) => match lower.cmp_strict(&upper) {
                Some(Ordering::Greater) => {
                    return Err(ValidationError::InvalidRange {
                        field,
                        lower,
                        upper,
                    });
                }
                Some(_) => {}
                None => {
                    return Err(ValidationError::invalid_literal(
                        &field,
                        format!(
                            "range bounds must be comparable, got {} and {}",
                            lower.label(),
                            upper.label()
                        ),
                    ));
                }
            },
            _ => {}
        }

        Ok(Self::new(field, Operator::Range, Some(vec![lower, upper])))
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        self.values.as_deref()
    }

    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.values.is_none()
    }

    /// Supplied with zero values for an operator that needs at least one.
    #[must_use]
    pub fn matches_nothing(&self) -> bool {
        self.op.requires_value() && self.values.as_ref().is_some_and(Vec::is_empty)
    }

    /// Union another value set into this one; used to merge shorthand inputs.
    #[must_use]
    pub(crate) fn union_values(&self, more: Vec<Value>) -> Self {
        let mut values = self.values.clone().unwrap_or_default();
        values.extend(more);

        Self::new(self.field.clone(), self.op, Some(canonical_set(values)))
    }
}

/// Sort by the canonical value order and drop duplicates.
pub(crate) fn canonical_set(mut values: Vec<Value>) -> Vec<Value> {
    values.sort_by(Value::canonical_cmp);
    values.dedup_by(|a, b| a.canonical_cmp(b) == Ordering::Equal);

    values
}

use crate::{
    db::filter::{Criterion, FilterSet, RangeBounds, ValidationError},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// FilterInput
///
/// A sparse, request-shaped filter record (any subset of its fields
/// populated) that knows how to turn itself into a FilterSet. Only fields
/// that were actually supplied may contribute criteria.
///

pub trait FilterInput {
    fn to_filter_set(&self) -> Result<FilterSet, ValidationError>;
}

impl FilterInput for FilterSet {
    fn to_filter_set(&self) -> Result<FilterSet, ValidationError> {
        Ok(self.clone())
    }
}

///
/// RangeInput
///
/// Two optional bounds as they arrive on the wire. Accepts `min`/`max` or
/// the `from`/`to` spelling used by date ranges.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeInput<T> {
    #[serde(alias = "from")]
    pub min: Option<T>,
    #[serde(alias = "to")]
    pub max: Option<T>,
}

impl<T> RangeInput<T> {
    #[must_use]
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }
}

impl<T: Into<Value>> RangeInput<T> {
    /// RANGE criterion over `field`; absent bounds become open sides.
    pub fn criterion(
        self,
        field: impl Into<String>,
        bounds: RangeBounds,
    ) -> Result<Criterion, ValidationError> {
        Criterion::range(field, self.min, self.max, bounds)
    }
}

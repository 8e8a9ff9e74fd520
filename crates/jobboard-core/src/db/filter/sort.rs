use crate::db::filter::ValidationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Asc => 0x01,
            Self::Desc => 0x02,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

///
/// SortKey
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    /// Accepts `field`, `field:asc|desc`, or `field,asc|desc`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ValidationError::InvalidSort {
            input: input.to_string(),
            message: message.to_string(),
        };

        let (field, direction) = match input.split_once([':', ',']) {
            Some((field, direction)) => {
                let direction = match direction.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    _ => return Err(invalid("direction must be 'asc' or 'desc'")),
                };
                (field.trim(), direction)
            }
            None => (input.trim(), SortDirection::Asc),
        };

        if field.is_empty() {
            return Err(invalid("field name is empty"));
        }

        Ok(Self::new(field, direction))
    }
}

///
/// SortSpec
///
/// Caller-requested ordering. A field appears at most once; repeating a
/// field keeps its first position and direction. The tie-break key is
/// appended at compile time, not here.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Parse caller sort strings in order.
    pub fn parse<I, S>(inputs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        inputs
            .into_iter()
            .try_fold(Self::new(), |spec, input| {
                Ok(spec.then(input.as_ref().parse()?))
            })
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.then(SortKey::new(field, SortDirection::Asc))
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.then(SortKey::new(field, SortDirection::Desc))
    }

    #[must_use]
    pub fn then(mut self, key: SortKey) -> Self {
        if !self.keys.iter().any(|existing| existing.field == key.field) {
            self.keys.push(key);
        }
        self
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

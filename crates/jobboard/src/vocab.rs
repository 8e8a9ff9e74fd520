//! Canonical status vocabularies.
//!
//! One enum per resource kind. Each serializes in SCREAMING_SNAKE_CASE,
//! parses case-sensitively, and lowers to `Value::Enum` for filtering.

use jobboard_core::value::Value;
use thiserror::Error as ThisError;

///
/// VocabularyError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{input}' is not a valid {vocabulary}")]
pub struct VocabularyError {
    pub vocabulary: &'static str,
    pub input: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
            serde::Deserialize, serde::Serialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = VocabularyError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                match input {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(VocabularyError {
                        vocabulary: stringify!($name),
                        input: input.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Self::Enum(value.as_str().to_string())
            }
        }
    };
}

vocabulary! {
    /// Lifecycle of a job posting. Only `Active` postings are public.
    JobStatus {
        Draft => "DRAFT",
        Active => "ACTIVE",
        Paused => "PAUSED",
        Closed => "CLOSED",
    }
}

vocabulary! {
    EmploymentType {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Contract => "CONTRACT",
        Internship => "INTERNSHIP",
    }
}

vocabulary! {
    /// Lifecycle of an application, from submission to outcome.
    ApplicationStatus {
        Submitted => "SUBMITTED",
        Reviewing => "REVIEWING",
        Interview => "INTERVIEW",
        Offered => "OFFERED",
        Hired => "HIRED",
        Rejected => "REJECTED",
        Withdrawn => "WITHDRAWN",
    }
}

/// Lower a vocabulary slice into IN literals.
pub(crate) fn values<T: Copy + Into<Value>>(items: &[T]) -> Vec<Value> {
    items.iter().map(|item| (*item).into()).collect()
}

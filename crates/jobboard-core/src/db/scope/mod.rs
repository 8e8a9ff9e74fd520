//! Authorization scoping for listings.
//!
//! A `ScopeGuard` is chosen by the calling context (which endpoint, which
//! role) and turns the caller's identity into a mandatory constraint. The
//! constraint is opaque to filter input: it can only be produced here, and
//! the compiler ANDs it at the root of every tree.

#[cfg(test)]
mod tests;

use crate::{
    db::predicate::Predicate,
    error::ErrorKind,
    model::{entity::EntityModel, field::FieldKind},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;
use ulid::Ulid;

///
/// AuthorizationError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AuthorizationError {
    #[error("listing {entity} requires an authenticated principal")]
    MissingIdentity { entity: &'static str },

    #[error("role {actual} may not list {entity}; requires {required}")]
    Forbidden {
        entity: &'static str,
        required: Role,
        actual: Role,
    },

    #[error("scope field '{field}' of {entity} cannot carry this guard: {message}")]
    InvalidScopeField {
        entity: &'static str,
        field: &'static str,
        message: String,
    },
}

impl AuthorizationError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingIdentity { .. } => ErrorKind::MissingIdentity,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::InvalidScopeField { .. } => ErrorKind::InvalidScope,
        }
    }
}

///
/// Role
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Candidate,
    Employer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Candidate => "CANDIDATE",
            Self::Employer => "EMPLOYER",
            Self::Admin => "ADMIN",
        };
        f.write_str(label)
    }
}

///
/// Principal
/// Identity supplied by the identity provider.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Principal {
    pub id: Ulid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn new(id: Ulid, role: Role) -> Self {
        Self { id, role }
    }
}

///
/// ScopeContext
/// Who is asking. `None` means an anonymous caller.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScopeContext {
    principal: Option<Principal>,
}

impl ScopeContext {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { principal: None }
    }

    #[must_use]
    pub const fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    #[must_use]
    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

///
/// ScopeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    Owner,
    Visibility,
}

///
/// ScopeConstraint
///
/// Mandatory predicate derived from identity. Only `ScopeGuard` can build
/// one, so no filter input can forge, remove, or weaken it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeConstraint {
    kind: ScopeKind,
    predicate: Predicate,
}

impl ScopeConstraint {
    #[must_use]
    pub const fn kind(&self) -> ScopeKind {
        self.kind
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub(crate) fn into_predicate(self) -> Predicate {
        self.predicate
    }
}

///
/// ScopeGuard
///
/// - `Owner`: only rows whose `field` equals the requester's id; requires
///   an identity, and the declared role when one is set.
/// - `Visibility`: only rows whose `field` is one of `visible`; open to
///   anonymous callers.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScopeGuard {
    Owner {
        field: &'static str,
        role: Option<Role>,
    },
    Visibility {
        field: &'static str,
        visible: Vec<Value>,
    },
}

impl ScopeGuard {
    #[must_use]
    pub const fn owner(field: &'static str, role: Role) -> Self {
        Self::Owner {
            field,
            role: Some(role),
        }
    }

    #[must_use]
    pub fn visibility<V: Into<Value>>(field: &'static str, visible: Vec<V>) -> Self {
        Self::Visibility {
            field,
            visible: visible.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Owner { field, .. } | Self::Visibility { field, .. } => *field,
        }
    }

    ///
    /// Check the guard against the listed model.
    ///
    /// - `Owner` needs a `Ulid` field
    /// - `Visibility` needs a field accepting every visible literal
    ///
    pub fn check(&self, model: &EntityModel) -> Result<(), AuthorizationError> {
        let name = self.field();
        let invalid = |message: String| AuthorizationError::InvalidScopeField {
            entity: model.path,
            field: name,
            message,
        };
        let field = model
            .field(name)
            .ok_or_else(|| invalid("no such field".to_string()))?;

        match self {
            Self::Owner { .. } if !matches!(field.kind, FieldKind::Ulid) => {
                Err(invalid(format!("owner field must be ulid, found {}", field.kind)))
            }
            Self::Visibility { visible, .. } => match visible
                .iter()
                .find(|value| !field.kind.accepts(value))
            {
                Some(value) => Err(invalid(format!(
                    "{} literal does not fit {}",
                    value.label(),
                    field.kind
                ))),
                None => Ok(()),
            },
            Self::Owner { .. } => Ok(()),
        }
    }

    /// Compute the constraint for `ctx` listing `entity`.
    pub fn constraint(
        &self,
        ctx: &ScopeContext,
        entity: &'static str,
    ) -> Result<ScopeConstraint, AuthorizationError> {
        match self {
            Self::Owner { field, role } => {
                let principal = ctx
                    .principal()
                    .ok_or(AuthorizationError::MissingIdentity { entity })?;

                if let Some(required) = role
                    && principal.role != *required
                {
                    return Err(AuthorizationError::Forbidden {
                        entity,
                        required: *required,
                        actual: principal.role,
                    });
                }

                Ok(ScopeConstraint {
                    kind: ScopeKind::Owner,
                    predicate: Predicate::eq(*field, Value::Ulid(principal.id)),
                })
            }
            Self::Visibility { field, visible } => Ok(ScopeConstraint {
                kind: ScopeKind::Visibility,
                predicate: Predicate::in_(*field, visible.clone()),
            }),
        }
    }
}

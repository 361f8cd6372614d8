//! Role-based access gate.
//!
//! Policies form a small closed set evaluated once per operation, after
//! identity resolution. Denial is [`CoreError::Forbidden`]; a credential
//! that does not resolve at all is [`CoreError::Unauthenticated`]. The two
//! are distinct outcomes.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::error::{CoreError, Result};

/// A resolved caller.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn of(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Capability required by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    AdminOnly,
    TeacherOnly,
    StudentOnly,
    AdminOrTeacher,
    /// Any resolved identity.
    Authenticated,
}

impl AccessPolicy {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Self::AdminOnly => role == Role::Admin,
            Self::TeacherOnly => role == Role::Teacher,
            Self::StudentOnly => role == Role::Student,
            Self::AdminOrTeacher => matches!(role, Role::Admin | Role::Teacher),
            Self::Authenticated => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::AdminOnly => "requires admin role",
            Self::TeacherOnly => "requires teacher role",
            Self::StudentOnly => "requires student role",
            Self::AdminOrTeacher => "requires admin or teacher role",
            Self::Authenticated => "requires authentication",
        }
    }
}

/// Check a resolved caller against an operation's policy.
pub fn require(caller: &Identity, policy: AccessPolicy) -> Result<()> {
    if policy.allows(caller.role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(policy.describe().to_string()))
    }
}

/// Identity service contract (consumed collaborator).
///
/// Resolves a bearer credential to a caller identity, or fails with
/// [`CoreError::Unauthenticated`].
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, credential: &str) -> Result<Identity>;
}

/// Token-map resolver backing tests and standalone wiring.
#[derive(Default)]
pub struct StaticTokenResolver {
    tokens: RwLock<HashMap<String, Identity>>,
}

impl StaticTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a user.
    pub async fn grant(&self, token: impl Into<String>, user: &User) {
        self.tokens
            .write()
            .await
            .insert(token.into(), Identity::of(user));
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, credential: &str) -> Result<Identity> {
        self.tokens
            .read()
            .await
            .get(credential)
            .cloned()
            .ok_or(CoreError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests;

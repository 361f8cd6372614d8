//! Persistence interfaces.
//!
//! Services depend on these traits only; the in-memory backend under
//! [`memory`] backs tests and standalone use. A database-backed
//! implementation would plug in here without touching the services.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Enrollment, Package, Role, SalarySlip, User};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for enrollments and their embedded schedules.
///
/// `save` writes the whole document back. The read-modify-write cycle on the
/// embedded schedule list is not serialized per enrollment; the last writer
/// wins under concurrent modification.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Persist a newly created enrollment.
    async fn insert(&self, enrollment: Enrollment) -> Result<()>;

    /// Fetch an enrollment by id.
    async fn get(&self, id: Uuid) -> Result<Option<Enrollment>>;

    /// All enrollments, in insertion order.
    async fn list(&self) -> Result<Vec<Enrollment>>;

    /// Write a modified enrollment back, replacing the stored document.
    async fn save(&self, enrollment: &Enrollment) -> Result<()>;

    /// Hard-delete an enrollment and its embedded schedules.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Enrollments purchased by the given student.
    async fn find_by_student(&self, student: Uuid) -> Result<Vec<Enrollment>>;

    /// Enrollments containing at least one schedule for the given teacher.
    async fn find_with_teacher(&self, teacher: Uuid) -> Result<Vec<Enrollment>>;
}

/// Persistence for salary slips, unique per (teacher, month, year).
#[async_trait]
pub trait SalarySlipStore: Send + Sync {
    /// Fetch the slip for a teacher and period, if one exists.
    async fn find_for_period(
        &self,
        teacher: Uuid,
        month: u32,
        year: i32,
    ) -> Result<Option<SalarySlip>>;

    /// Fetch a slip by id.
    async fn get(&self, id: Uuid) -> Result<Option<SalarySlip>>;

    /// All slips.
    async fn list(&self) -> Result<Vec<SalarySlip>>;

    /// Insert or replace a slip by id.
    async fn save(&self, slip: &SalarySlip) -> Result<()>;

    /// Delete a slip by id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Read access to the user directory (external collaborator).
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Fetch a user only when it exists with the expected role.
    async fn find_with_role(&self, id: Uuid, role: Role) -> Result<Option<User>>;
}

/// Read access to the package catalog (external collaborator).
#[async_trait]
pub trait PackageCatalog: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>>;
}

//! In-memory storage backend.
//!
//! Backs the standalone configuration and the test suite. The slip store
//! carries failure toggles so reconciliation failure policy can be exercised
//! without a real backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Enrollment, Package, Role, SalarySlip, User};
use crate::storage::{
    EnrollmentStore, PackageCatalog, Result, SalarySlipStore, StorageError, UserDirectory,
};

/// Enrollment store over a guarded vector, preserving insertion order.
#[derive(Default)]
pub struct InMemoryEnrollmentStore {
    enrollments: RwLock<Vec<Enrollment>>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn insert(&self, enrollment: Enrollment) -> Result<()> {
        self.enrollments.write().await.push(enrollment);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Enrollment>> {
        Ok(self.enrollments.read().await.clone())
    }

    async fn save(&self, enrollment: &Enrollment) -> Result<()> {
        let mut enrollments = self.enrollments.write().await;
        match enrollments.iter_mut().find(|e| e.id == enrollment.id) {
            Some(stored) => {
                *stored = enrollment.clone();
                Ok(())
            }
            None => Err(StorageError::Backend(format!(
                "enrollment {} is not stored",
                enrollment.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.enrollments.write().await.retain(|e| e.id != id);
        Ok(())
    }

    async fn find_by_student(&self, student: Uuid) -> Result<Vec<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .iter()
            .filter(|e| e.student == student)
            .cloned()
            .collect())
    }

    async fn find_with_teacher(&self, teacher: Uuid) -> Result<Vec<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .iter()
            .filter(|e| e.schedules.iter().any(|s| s.teacher == teacher))
            .cloned()
            .collect())
    }
}

/// Salary slip store with injectable failures for policy tests.
#[derive(Default)]
pub struct InMemorySalarySlipStore {
    slips: RwLock<Vec<SalarySlip>>,
    fail_on_save: RwLock<bool>,
    fail_on_find: RwLock<bool>,
}

impl InMemorySalarySlipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.write().await = fail;
    }

    pub async fn set_fail_on_find(&self, fail: bool) {
        *self.fail_on_find.write().await = fail;
    }
}

#[async_trait]
impl SalarySlipStore for InMemorySalarySlipStore {
    async fn find_for_period(
        &self,
        teacher: Uuid,
        month: u32,
        year: i32,
    ) -> Result<Option<SalarySlip>> {
        if *self.fail_on_find.read().await {
            return Err(StorageError::Backend("injected find failure".into()));
        }
        let slips = self.slips.read().await;
        Ok(slips
            .iter()
            .find(|s| s.teacher == teacher && s.month == month && s.year == year)
            .cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<SalarySlip>> {
        let slips = self.slips.read().await;
        Ok(slips.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<SalarySlip>> {
        Ok(self.slips.read().await.clone())
    }

    async fn save(&self, slip: &SalarySlip) -> Result<()> {
        if *self.fail_on_save.read().await {
            return Err(StorageError::Backend("injected save failure".into()));
        }
        let mut slips = self.slips.write().await;
        match slips.iter_mut().find(|s| s.id == slip.id) {
            Some(stored) => *stored = slip.clone(),
            None => slips.push(slip.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.slips.write().await.retain(|s| s.id != id);
        Ok(())
    }
}

/// User directory stand-in, seeded by tests and standalone wiring.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_with_role(&self, id: Uuid, role: Role) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.role == role).cloned())
    }
}

/// Package catalog stand-in, seeded by tests and standalone wiring.
#[derive(Default)]
pub struct InMemoryPackageCatalog {
    packages: RwLock<HashMap<Uuid, Package>>,
}

impl InMemoryPackageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, package: Package) {
        self.packages.write().await.insert(package.id, package);
    }
}

#[async_trait]
impl PackageCatalog for InMemoryPackageCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>> {
        Ok(self.packages.read().await.get(&id).cloned())
    }
}

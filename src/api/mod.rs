//! Capability facade.
//!
//! One method per exposed operation, abstracted from HTTP. Each call
//! resolves the caller's identity, evaluates the operation's access policy
//! once, then delegates to the owning service. Transport adapters serialize
//! the outcome through [`Envelope`].

mod envelope;

pub use envelope::Envelope;

use std::sync::Arc;

use uuid::Uuid;

use crate::access::{require, AccessPolicy, Identity, IdentityResolver};
use crate::domain::{Enrollment, SalarySlip, Schedule};
use crate::error::{CoreError, Result};
use crate::evidence::{EvidenceError, EvidenceStore};
use crate::services::{
    EnrollmentService, NewEnrollment, NewSchedule, PayrollService, SchedulePatch, ScheduleRow,
    ScheduleService,
};
use crate::storage::{
    EnrollmentStore, PackageCatalog, SalarySlipStore, StorageError, UserDirectory,
};

/// Raw photo upload attached to an attendance record.
#[derive(Debug, Clone)]
pub struct EvidenceUpload {
    pub content: Vec<u8>,
    pub extension: String,
}

/// Attendance mutation accepted from the boundary.
#[derive(Debug, Clone)]
pub struct AttendanceUpdate {
    /// One of the five recognized attendance values.
    pub status: String,
    pub note: Option<String>,
    /// Optional photo; when absent the previously stored reference is kept.
    pub evidence: Option<EvidenceUpload>,
}

/// Entry point wiring identity resolution, access policies and services.
pub struct Api {
    identity: Arc<dyn IdentityResolver>,
    evidence: Arc<dyn EvidenceStore>,
    enrollments: EnrollmentService,
    schedules: ScheduleService,
    payroll: Arc<PayrollService>,
}

impl Api {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        evidence: Arc<dyn EvidenceStore>,
        enrollment_store: Arc<dyn EnrollmentStore>,
        slip_store: Arc<dyn SalarySlipStore>,
        users: Arc<dyn UserDirectory>,
        packages: Arc<dyn PackageCatalog>,
    ) -> Self {
        let payroll = Arc::new(PayrollService::new(slip_store, Arc::clone(&users)));
        let enrollments = EnrollmentService::new(
            Arc::clone(&enrollment_store),
            Arc::clone(&users),
            Arc::clone(&packages),
            Arc::clone(&payroll),
        );
        let schedules = ScheduleService::new(enrollment_store, users, packages, Arc::clone(&payroll));
        Self {
            identity,
            evidence,
            enrollments,
            schedules,
            payroll,
        }
    }

    async fn authorize(&self, credential: &str, policy: AccessPolicy) -> Result<Identity> {
        let caller = self.identity.resolve(credential).await?;
        require(&caller, policy)?;
        Ok(caller)
    }

    // ---- enrollments (admin) ----

    pub async fn create_enrollment(
        &self,
        credential: &str,
        draft: NewEnrollment,
    ) -> Result<Enrollment> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.enrollments.create(draft).await
    }

    pub async fn list_enrollments(&self, credential: &str) -> Result<Vec<Enrollment>> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.enrollments.list().await
    }

    pub async fn enrollment_detail(&self, credential: &str, id: Uuid) -> Result<Enrollment> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.enrollments.get(id).await
    }

    pub async fn delete_enrollment(&self, credential: &str, id: Uuid) -> Result<()> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.enrollments.delete(id).await
    }

    // ---- schedules ----

    pub async fn add_schedule(
        &self,
        credential: &str,
        enrollment_id: Uuid,
        draft: NewSchedule,
    ) -> Result<Enrollment> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.schedules.add_schedule(enrollment_id, draft).await
    }

    pub async fn update_schedule(
        &self,
        credential: &str,
        enrollment_id: Uuid,
        schedule_id: Uuid,
        patch: SchedulePatch,
    ) -> Result<Schedule> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.schedules
            .update_schedule(enrollment_id, schedule_id, patch)
            .await
    }

    pub async fn delete_schedule(
        &self,
        credential: &str,
        enrollment_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<()> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.schedules
            .delete_schedule(enrollment_id, schedule_id)
            .await
    }

    /// Record the outcome of a lesson occurrence.
    ///
    /// Gated to admins and teachers at the route level; the schedule
    /// ownership check (assigned teacher or admin) happens in the lifecycle
    /// manager. A supplied photo is stored first and only its reference is
    /// handed on.
    pub async fn record_attendance(
        &self,
        credential: &str,
        enrollment_id: Uuid,
        schedule_id: Uuid,
        update: AttendanceUpdate,
    ) -> Result<Schedule> {
        let caller = self
            .authorize(credential, AccessPolicy::AdminOrTeacher)
            .await?;

        let reference = match update.evidence {
            Some(upload) => Some(
                self.evidence
                    .put(&upload.content, &upload.extension)
                    .await
                    .map_err(|err| match err {
                        EvidenceError::UnsupportedExtension(_) => {
                            CoreError::validation(err.to_string())
                        }
                        other => CoreError::Storage(StorageError::Backend(other.to_string())),
                    })?,
            ),
            None => None,
        };

        self.schedules
            .update_attendance(
                enrollment_id,
                schedule_id,
                &caller,
                &update.status,
                update.note,
                reference,
            )
            .await
    }

    pub async fn list_all_schedules(&self, credential: &str) -> Result<Vec<ScheduleRow>> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.schedules.list_all().await
    }

    /// The calling teacher's schedules.
    pub async fn my_teaching_schedules(&self, credential: &str) -> Result<Vec<ScheduleRow>> {
        let caller = self
            .authorize(credential, AccessPolicy::TeacherOnly)
            .await?;
        self.schedules.list_for_teacher(caller.id).await
    }

    /// The calling student's schedules.
    pub async fn my_lesson_schedules(&self, credential: &str) -> Result<Vec<ScheduleRow>> {
        let caller = self
            .authorize(credential, AccessPolicy::StudentOnly)
            .await?;
        self.schedules.list_for_student(caller.id).await
    }

    // ---- salary slips ----

    pub async fn list_salary_slips(&self, credential: &str) -> Result<Vec<SalarySlip>> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.payroll.list_slips().await
    }

    pub async fn salary_slip_for_period(
        &self,
        credential: &str,
        teacher: Uuid,
        month: u32,
        year: i32,
    ) -> Result<SalarySlip> {
        self.authorize(credential, AccessPolicy::Authenticated)
            .await?;
        self.payroll.slip_for_period(teacher, month, year).await
    }

    pub async fn delete_salary_slip(&self, credential: &str, id: Uuid) -> Result<()> {
        self.authorize(credential, AccessPolicy::AdminOnly).await?;
        self.payroll.delete_slip(id).await
    }
}

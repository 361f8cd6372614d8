//! Business services.
//!
//! Every schedule-mutating operation persists the enrollment first and then
//! reconciles the affected occurrence into the teacher's salary slip.
//! Persist-then-reconcile is not atomic: there is no rollback when
//! reconciliation fails, only the per-operation failure policy (swallowed
//! after creations, propagated after updates).

pub mod enrollment;
pub mod payroll;
pub mod schedule;

pub use enrollment::{EnrollmentService, NewEnrollment};
pub use payroll::PayrollService;
pub use schedule::{NewSchedule, SchedulePatch, ScheduleRow, ScheduleService};

use crate::domain::{Enrollment, Schedule};
use crate::error::{CoreError, Result};
use crate::storage::{PackageCatalog, UserDirectory};

/// Resolve the student name and package instrument for an occurrence, then
/// upsert it into the owning teacher's slip.
///
/// Every failure mode maps to [`CoreError::Reconciliation`]; whether that is
/// swallowed or propagated is the caller's policy.
pub(crate) async fn reconcile_occurrence(
    users: &dyn UserDirectory,
    packages: &dyn PackageCatalog,
    payroll: &PayrollService,
    enrollment: &Enrollment,
    schedule: &Schedule,
) -> Result<()> {
    let student = users
        .find_by_id(enrollment.student)
        .await
        .map_err(|e| CoreError::Reconciliation(e.to_string()))?
        .ok_or_else(|| {
            CoreError::Reconciliation(format!("student {} does not resolve", enrollment.student))
        })?;
    let package = packages
        .find_by_id(enrollment.package)
        .await
        .map_err(|e| CoreError::Reconciliation(e.to_string()))?
        .ok_or_else(|| {
            CoreError::Reconciliation(format!("package {} does not resolve", enrollment.package))
        })?;

    payroll
        .reconcile(schedule.teacher, schedule, &student.name, &package.instrument)
        .await
}

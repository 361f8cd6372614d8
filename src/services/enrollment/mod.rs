//! Enrollment store front.
//!
//! Creation validates the payment status and the student reference, then
//! fans the supplied schedules out to payroll reconciliation with the
//! swallow-on-creation failure policy. Deletion is a hard delete of the
//! enrollment and its embedded schedules; salary slips already derived from
//! those schedules are left as they are.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{DatePeriod, Enrollment, PaymentStatus, Role};
use crate::error::{CoreError, Result};
use crate::services::{reconcile_occurrence, NewSchedule, PayrollService};
use crate::storage::{EnrollmentStore, PackageCatalog, UserDirectory};

/// Fields accepted when creating an enrollment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEnrollment {
    pub student: Uuid,
    pub package: Uuid,
    /// One of `Unpaid`, `Paid`, `Cancelled`.
    pub payment_status: String,
    pub payment_total: i64,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub date_periode: Vec<DatePeriod>,
    #[serde(default)]
    pub schedules: Vec<NewSchedule>,
}

/// Persists enrollments and serves their single-entity queries.
pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentStore>,
    users: Arc<dyn UserDirectory>,
    packages: Arc<dyn PackageCatalog>,
    payroll: Arc<PayrollService>,
}

impl EnrollmentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentStore>,
        users: Arc<dyn UserDirectory>,
        packages: Arc<dyn PackageCatalog>,
        payroll: Arc<PayrollService>,
    ) -> Self {
        Self {
            enrollments,
            users,
            packages,
            payroll,
        }
    }

    /// Create an enrollment from a draft.
    ///
    /// The payment status must be one of the three recognized values and the
    /// student must exist in the directory with the student role. Supplied
    /// schedules are materialized in order, each starting at NotYetHeld.
    /// After the enrollment is persisted each schedule is reconciled into
    /// its teacher's slip; failures there are logged and swallowed.
    pub async fn create(&self, draft: NewEnrollment) -> Result<Enrollment> {
        let payment_status = PaymentStatus::parse(&draft.payment_status).ok_or_else(|| {
            CoreError::validation(format!("invalid payment status: {}", draft.payment_status))
        })?;

        self.users
            .find_with_role(draft.student, Role::Student)
            .await?
            .ok_or_else(|| {
                CoreError::validation("student not found or invalid user type".to_string())
            })?;

        let schedules = draft
            .schedules
            .into_iter()
            .map(NewSchedule::materialize)
            .collect::<Result<Vec<_>>>()?;

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student: draft.student,
            package: draft.package,
            payment_status,
            payment_total: draft.payment_total,
            payment_date: draft.payment_date,
            date_periode: draft.date_periode,
            schedules,
        };
        self.enrollments.insert(enrollment.clone()).await?;
        info!(
            enrollment = %enrollment.id,
            student = %enrollment.student,
            schedules = enrollment.schedules.len(),
            "created enrollment"
        );

        for schedule in &enrollment.schedules {
            if let Err(err) = reconcile_occurrence(
                self.users.as_ref(),
                self.packages.as_ref(),
                &self.payroll,
                &enrollment,
                schedule,
            )
            .await
            {
                warn!(
                    enrollment = %enrollment.id,
                    schedule = %schedule.id,
                    error = %err,
                    "salary slip reconciliation failed after enrollment creation; continuing"
                );
            }
        }

        Ok(enrollment)
    }

    /// Fetch one enrollment.
    pub async fn get(&self, id: Uuid) -> Result<Enrollment> {
        self.enrollments
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("enrollment"))
    }

    /// All enrollments.
    pub async fn list(&self) -> Result<Vec<Enrollment>> {
        Ok(self.enrollments.list().await?)
    }

    /// Hard-delete an enrollment and its embedded schedules.
    ///
    /// Salary slip line items derived from those schedules are not cleaned
    /// up.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.enrollments
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("enrollment"))?;
        self.enrollments.delete(id).await?;
        info!(enrollment = %id, "deleted enrollment");
        Ok(())
    }
}

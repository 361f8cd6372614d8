//! Payroll reconciliation.
//!
//! Salary slips are a derived read model: one slip per (teacher, month,
//! year), each line item a snapshot of one schedule occurrence. The
//! reconciler upserts line items; it never removes them, so slips can go
//! stale when schedules or enrollments are deleted.

use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{SalaryDetail, SalarySlip, Schedule};
use crate::error::{CoreError, Result};
use crate::storage::{SalarySlipStore, UserDirectory};

/// Upserts schedule occurrences into salary slips and serves slip queries.
pub struct PayrollService {
    slips: Arc<dyn SalarySlipStore>,
    users: Arc<dyn UserDirectory>,
}

impl PayrollService {
    pub fn new(slips: Arc<dyn SalarySlipStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { slips, users }
    }

    /// Upsert one schedule occurrence into the teacher's slip for the month
    /// of the occurrence, creating the slip when absent.
    ///
    /// The line item is keyed by (date, room) within the slip; re-reconciling
    /// the same occurrence replaces its line item in place. `total_salary` is
    /// recomputed on every call. All failures map to
    /// [`CoreError::Reconciliation`].
    pub async fn reconcile(
        &self,
        teacher: Uuid,
        schedule: &Schedule,
        student_name: &str,
        instrument: &str,
    ) -> Result<()> {
        self.users
            .find_by_id(teacher)
            .await
            .map_err(|e| CoreError::Reconciliation(e.to_string()))?
            .ok_or_else(|| {
                CoreError::Reconciliation(format!("teacher {teacher} does not resolve"))
            })?;

        let month = schedule.date.month();
        let year = schedule.date.year();

        let mut slip = self
            .slips
            .find_for_period(teacher, month, year)
            .await
            .map_err(|e| CoreError::Reconciliation(e.to_string()))?
            .unwrap_or_else(|| SalarySlip::new(teacher, month, year));

        slip.upsert_detail(SalaryDetail {
            student_name: student_name.to_string(),
            instrument: instrument.to_string(),
            date: schedule.date,
            room: schedule.room.clone(),
            attendance_status: schedule.attendance_status,
            fee_class: schedule.teacher_fee,
            fee_transport: schedule.transport_fee,
            total_fee: schedule.teacher_fee + schedule.transport_fee,
        });

        self.slips
            .save(&slip)
            .await
            .map_err(|e| CoreError::Reconciliation(e.to_string()))?;

        debug!(
            teacher = %teacher,
            month,
            year,
            total_salary = slip.total_salary,
            details = slip.details.len(),
            "reconciled salary slip"
        );
        Ok(())
    }

    /// All slips.
    pub async fn list_slips(&self) -> Result<Vec<SalarySlip>> {
        Ok(self.slips.list().await?)
    }

    /// The slip for a teacher and period.
    pub async fn slip_for_period(
        &self,
        teacher: Uuid,
        month: u32,
        year: i32,
    ) -> Result<SalarySlip> {
        self.slips
            .find_for_period(teacher, month, year)
            .await?
            .ok_or_else(|| CoreError::not_found("salary slip"))
    }

    /// Delete a slip by id.
    pub async fn delete_slip(&self, id: Uuid) -> Result<()> {
        self.slips
            .get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("salary slip"))?;
        self.slips.delete(id).await?;
        Ok(())
    }
}

//! Teacher salary slips.
//!
//! A slip is derived data: one record per (teacher, month, year), rebuilt
//! line by line from schedule occurrences by the payroll reconciler. The
//! schedule list stays the source of truth.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AttendanceStatus;

/// Snapshot of one schedule occurrence at reconciliation time.
///
/// No schedule id is stored; within a slip a line item is identified by its
/// (date, room) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryDetail {
    pub student_name: String,
    pub instrument: String,
    pub date: NaiveDate,
    pub room: String,
    pub attendance_status: AttendanceStatus,
    pub fee_class: i64,
    pub fee_transport: i64,
    pub total_fee: i64,
}

/// A teacher's payroll record for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlip {
    pub id: Uuid,
    pub teacher: Uuid,
    /// Calendar month, 1-12.
    pub month: u32,
    pub year: i32,
    /// Sum of `total_fee` across all details. Recomputed on every upsert.
    pub total_salary: i64,
    pub details: Vec<SalaryDetail>,
}

impl SalarySlip {
    /// Create an empty slip for a teacher and period.
    pub fn new(teacher: Uuid, month: u32, year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            teacher,
            month,
            year,
            total_salary: 0,
            details: Vec::new(),
        }
    }

    /// Insert or replace the line item matching the detail's (date, room)
    /// key, then recompute the slip total.
    ///
    /// Re-reconciling the same occurrence replaces its existing line item in
    /// place rather than appending a duplicate.
    pub fn upsert_detail(&mut self, detail: SalaryDetail) {
        match self
            .details
            .iter_mut()
            .find(|d| d.date == detail.date && d.room == detail.room)
        {
            Some(existing) => *existing = detail,
            None => self.details.push(detail),
        }
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_salary = self.details.iter().map(|d| d.total_fee).sum();
    }
}

//! Enrollments and their embedded lesson schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    /// Parse a payment status from a boundary string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Unpaid" => Some(Self::Unpaid),
            "Paid" => Some(Self::Paid),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Recorded outcome of a lesson occurrence.
///
/// Every schedule starts at [`AttendanceStatus::NotYetHeld`]; transitions
/// between the other values are unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    NotYetHeld,
    Success,
    StudentExcused,
    TeacherExcused,
    Reschedule,
}

impl AttendanceStatus {
    /// Parse an attendance status from a boundary string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NotYetHeld" => Some(Self::NotYetHeld),
            "Success" => Some(Self::Success),
            "StudentExcused" => Some(Self::StudentExcused),
            "TeacherExcused" => Some(Self::TeacherExcused),
            "Reschedule" => Some(Self::Reschedule),
            _ => None,
        }
    }
}

/// One validity window of an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One concrete lesson occurrence, owned by its enrollment.
///
/// Schedules never exist outside an [`Enrollment`]; their id is only
/// meaningful within the owning enrollment's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub teacher: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub room: String,
    pub transport_fee: i64,
    pub teacher_fee: i64,
    pub attendance_status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_photo: Option<String>,
}

/// A student's purchase of a lesson package together with its schedule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student: Uuid,
    pub package: Uuid,
    pub payment_status: PaymentStatus,
    pub payment_total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Validity windows, in the order supplied at creation.
    pub date_periode: Vec<DatePeriod>,
    /// Schedules in insertion order. Removal is by id, not by date.
    pub schedules: Vec<Schedule>,
}

impl Enrollment {
    pub fn schedule(&self, schedule_id: Uuid) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == schedule_id)
    }

    pub fn schedule_mut(&mut self, schedule_id: Uuid) -> Option<&mut Schedule> {
        self.schedules.iter_mut().find(|s| s.id == schedule_id)
    }

    /// Remove the schedule with the given id, leaving the rest untouched.
    ///
    /// Returns the removed schedule, or `None` when no schedule matches.
    pub fn remove_schedule(&mut self, schedule_id: Uuid) -> Option<Schedule> {
        let index = self.schedules.iter().position(|s| s.id == schedule_id)?;
        Some(self.schedules.remove(index))
    }
}

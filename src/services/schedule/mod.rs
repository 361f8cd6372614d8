//! Schedule lifecycle manager.
//!
//! All mutations of the embedded schedule list go through here: the
//! enrollment is persisted first, then the affected occurrence is reconciled
//! into its teacher's salary slip. Reconciliation failure is swallowed after
//! `add_schedule` and propagated after the update operations, with the
//! schedule write already committed either way.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::access::Identity;
use crate::domain::{AttendanceStatus, Enrollment, Schedule};
use crate::error::{CoreError, Result};
use crate::services::{reconcile_occurrence, PayrollService};
use crate::storage::{EnrollmentStore, PackageCatalog, UserDirectory};

/// Calendar date format accepted at the boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown in flattened listings for absent optional fields.
const PLACEHOLDER: &str = "-";

/// Fields accepted when creating a schedule.
///
/// `attendance_status` is not accepted: every schedule starts at
/// [`AttendanceStatus::NotYetHeld`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewSchedule {
    pub teacher: Uuid,
    /// Calendar date, `%Y-%m-%d`.
    pub date: String,
    pub time: String,
    pub room: String,
    #[serde(default)]
    pub transport_fee: i64,
    pub teacher_fee: i64,
}

impl NewSchedule {
    /// Turn the draft into a stored schedule.
    ///
    /// Fails with a ValidationError when the date is not a valid calendar
    /// date.
    pub(crate) fn materialize(self) -> Result<Schedule> {
        let date = parse_date(&self.date)?;
        Ok(Schedule {
            id: Uuid::new_v4(),
            teacher: self.teacher,
            date,
            time: self.time,
            room: self.room,
            transport_fee: self.transport_fee,
            teacher_fee: self.teacher_fee,
            attendance_status: AttendanceStatus::NotYetHeld,
            note: None,
            activity_photo: None,
        })
    }
}

/// Partial schedule update. Absent fields are left unchanged; there is no
/// implicit clearing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulePatch {
    pub teacher: Option<Uuid>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub room: Option<String>,
    pub transport_fee: Option<i64>,
    pub teacher_fee: Option<i64>,
}

/// One schedule in a flattened listing, annotated with its parent
/// enrollment. Read-only presentation: the placeholders for note and photo
/// are never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub enrollment: Uuid,
    pub id: Uuid,
    pub teacher: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub room: String,
    pub transport_fee: i64,
    pub teacher_fee: i64,
    pub attendance_status: AttendanceStatus,
    pub note: String,
    pub activity_photo: String,
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CoreError::validation(format!("invalid date format: {value}")))
}

fn project(enrollment: Uuid, schedule: &Schedule) -> ScheduleRow {
    ScheduleRow {
        enrollment,
        id: schedule.id,
        teacher: schedule.teacher,
        date: schedule.date,
        time: schedule.time.clone(),
        room: schedule.room.clone(),
        transport_fee: schedule.transport_fee,
        teacher_fee: schedule.teacher_fee,
        attendance_status: schedule.attendance_status,
        note: schedule.note.clone().unwrap_or_else(|| PLACEHOLDER.into()),
        activity_photo: schedule
            .activity_photo
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.into()),
    }
}

/// Creates, updates, records attendance on and removes lesson occurrences
/// inside an enrollment.
pub struct ScheduleService {
    enrollments: Arc<dyn EnrollmentStore>,
    users: Arc<dyn UserDirectory>,
    packages: Arc<dyn PackageCatalog>,
    payroll: Arc<PayrollService>,
}

impl ScheduleService {
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

    async fn load(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        self.enrollments
            .get(enrollment_id)
            .await?
            .ok_or_else(|| CoreError::not_found("enrollment"))
    }

    /// Append a new occurrence to the enrollment's schedule list.
    ///
    /// The occurrence starts at NotYetHeld. Payroll reconciliation is
    /// attempted afterwards; a failure there is logged and swallowed, the
    /// schedule is still considered successfully added.
    pub async fn add_schedule(&self, enrollment_id: Uuid, draft: NewSchedule) -> Result<Enrollment> {
        let mut enrollment = self.load(enrollment_id).await?;
        let schedule = draft.materialize()?;
        enrollment.schedules.push(schedule.clone());
        self.enrollments.save(&enrollment).await?;

        if let Err(err) = reconcile_occurrence(
            self.users.as_ref(),
            self.packages.as_ref(),
            &self.payroll,
            &enrollment,
            &schedule,
        )
        .await
        {
            warn!(
                enrollment = %enrollment.id,
                schedule = %schedule.id,
                error = %err,
                "salary slip reconciliation failed after schedule creation; continuing"
            );
        }

        Ok(enrollment)
    }

    /// Apply a partial update to one occurrence.
    ///
    /// Reconciliation failure propagates; the schedule update itself is
    /// already persisted when that happens.
    pub async fn update_schedule(
        &self,
        enrollment_id: Uuid,
        schedule_id: Uuid,
        patch: SchedulePatch,
    ) -> Result<Schedule> {
        let date = patch.date.as_deref().map(parse_date).transpose()?;

        let mut enrollment = self.load(enrollment_id).await?;
        let schedule = enrollment
            .schedule_mut(schedule_id)
            .ok_or_else(|| CoreError::not_found("schedule"))?;

        if let Some(teacher) = patch.teacher {
            schedule.teacher = teacher;
        }
        if let Some(date) = date {
            schedule.date = date;
        }
        if let Some(time) = patch.time {
            schedule.time = time;
        }
        if let Some(room) = patch.room {
            schedule.room = room;
        }
        if let Some(transport_fee) = patch.transport_fee {
            schedule.transport_fee = transport_fee;
        }
        if let Some(teacher_fee) = patch.teacher_fee {
            schedule.teacher_fee = teacher_fee;
        }
        let schedule = schedule.clone();

        self.enrollments.save(&enrollment).await?;
        reconcile_occurrence(
            self.users.as_ref(),
            self.packages.as_ref(),
            &self.payroll,
            &enrollment,
            &schedule,
        )
        .await?;

        Ok(schedule)
    }

    /// Record the outcome of an occurrence.
    ///
    /// The caller must be the assigned teacher or an admin. The status
    /// string must be one of the five recognized values; this is checked
    /// before any lookup. The activity photo is only replaced when an
    /// evidence reference is supplied. Reconciliation failure propagates.
    pub async fn update_attendance(
        &self,
        enrollment_id: Uuid,
        schedule_id: Uuid,
        caller: &Identity,
        status: &str,
        note: Option<String>,
        evidence: Option<String>,
    ) -> Result<Schedule> {
        let status = AttendanceStatus::parse(status)
            .ok_or_else(|| CoreError::validation(format!("invalid attendance status: {status}")))?;

        let mut enrollment = self.load(enrollment_id).await?;
        let schedule = enrollment
            .schedule_mut(schedule_id)
            .ok_or_else(|| CoreError::not_found("schedule"))?;

        if !caller.is_admin() && schedule.teacher != caller.id {
            return Err(CoreError::Forbidden(
                "not authorized to update this schedule".to_string(),
            ));
        }

        schedule.attendance_status = status;
        schedule.note = note;
        if let Some(reference) = evidence {
            schedule.activity_photo = Some(reference);
        }
        let schedule = schedule.clone();

        self.enrollments.save(&enrollment).await?;
        reconcile_occurrence(
            self.users.as_ref(),
            self.packages.as_ref(),
            &self.payroll,
            &enrollment,
            &schedule,
        )
        .await?;

        Ok(schedule)
    }

    /// Remove one occurrence by id, leaving all others untouched.
    ///
    /// The corresponding salary slip line item is intentionally left alone;
    /// slips are derived data without tombstone propagation.
    pub async fn delete_schedule(&self, enrollment_id: Uuid, schedule_id: Uuid) -> Result<()> {
        let mut enrollment = self.load(enrollment_id).await?;
        enrollment
            .remove_schedule(schedule_id)
            .ok_or_else(|| CoreError::not_found("schedule"))?;
        self.enrollments.save(&enrollment).await?;
        Ok(())
    }

    /// Every schedule of every enrollment, flattened and annotated with the
    /// parent enrollment id.
    pub async fn list_all(&self) -> Result<Vec<ScheduleRow>> {
        let enrollments = self.enrollments.list().await?;
        Ok(enrollments
            .iter()
            .flat_map(|e| e.schedules.iter().map(|s| project(e.id, s)))
            .collect())
    }

    /// Schedules assigned to the given teacher.
    pub async fn list_for_teacher(&self, teacher: Uuid) -> Result<Vec<ScheduleRow>> {
        let enrollments = self.enrollments.find_with_teacher(teacher).await?;
        Ok(enrollments
            .iter()
            .flat_map(|e| {
                e.schedules
                    .iter()
                    .filter(|s| s.teacher == teacher)
                    .map(|s| project(e.id, s))
            })
            .collect())
    }

    /// Schedules belonging to the given student's enrollments.
    pub async fn list_for_student(&self, student: Uuid) -> Result<Vec<ScheduleRow>> {
        let enrollments = self.enrollments.find_by_student(student).await?;
        Ok(enrollments
            .iter()
            .flat_map(|e| e.schedules.iter().map(|s| project(e.id, s)))
            .collect())
    }
}

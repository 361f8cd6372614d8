//! Shared fixture builders for unit tests.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    AttendanceStatus, Enrollment, Package, PaymentStatus, Role, Schedule, User,
};

pub fn admin() -> User {
    User::new("Admin Test", "admin@test.com", Role::Admin)
}

pub fn teacher() -> User {
    let mut user = User::new("Teacher Test", "teacher@test.com", Role::Teacher);
    user.instruments = vec!["Piano".to_string()];
    user
}

pub fn student() -> User {
    User::new("Student Test", "student@test.com", Role::Student)
}

pub fn piano_package() -> Package {
    Package {
        id: Uuid::new_v4(),
        name: "Piano Basic".to_string(),
        description: "Monthly piano package".to_string(),
        duration: 30,
        price: 100_000,
        session_count: 4,
        instrument: "Piano".to_string(),
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn schedule_on(teacher: Uuid, day: &str, room: &str) -> Schedule {
    Schedule {
        id: Uuid::new_v4(),
        teacher,
        date: date(day),
        time: "10:00".to_string(),
        room: room.to_string(),
        transport_fee: 0,
        teacher_fee: 50_000,
        attendance_status: AttendanceStatus::NotYetHeld,
        note: None,
        activity_photo: None,
    }
}

pub fn enrollment_with(student: Uuid, package: Uuid, schedules: Vec<Schedule>) -> Enrollment {
    Enrollment {
        id: Uuid::new_v4(),
        student,
        package,
        payment_status: PaymentStatus::Paid,
        payment_total: 100_000,
        payment_date: Some(date("2024-06-01")),
        date_periode: vec![],
        schedules,
    }
}

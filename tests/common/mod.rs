//! Shared fixture for facade-level integration tests.

use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use fermata::api::Api;
use fermata::config::Config;
use fermata::domain::{Package, Role, User};
use fermata::services::{NewEnrollment, NewSchedule};
use fermata::standalone::Standalone;
use fermata::storage::memory::InMemorySalarySlipStore;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const TEACHER_TOKEN: &str = "teacher-token";
pub const STUDENT_TOKEN: &str = "student-token";

pub struct TestContext {
    pub api: Api,
    pub slips: Arc<InMemorySalarySlipStore>,
    pub teacher: User,
    pub student: User,
    pub package: Package,
    _evidence_dir: TempDir,
}

/// A standalone stack with one admin, one teacher, one student and one piano
/// package seeded, and a token per user.
pub async fn context() -> TestContext {
    let evidence_dir = TempDir::new().unwrap();
    let mut config = Config::for_test();
    config.evidence.base_path = evidence_dir.path().display().to_string();

    let stack = Standalone::from_config(&config).await.unwrap();

    let admin = User::new("Admin Test", "admin@test.com", Role::Admin);
    let mut teacher = User::new("Teacher Test", "teacher@test.com", Role::Teacher);
    teacher.instruments = vec!["Piano".to_string()];
    let student = User::new("Student Test", "student@test.com", Role::Student);

    stack.resolver.grant(ADMIN_TOKEN, &admin).await;
    stack.resolver.grant(TEACHER_TOKEN, &teacher).await;
    stack.resolver.grant(STUDENT_TOKEN, &student).await;
    stack.users.insert(admin).await;
    stack.users.insert(teacher.clone()).await;
    stack.users.insert(student.clone()).await;

    let package = Package {
        id: Uuid::new_v4(),
        name: "Piano Basic".to_string(),
        description: "Monthly piano package".to_string(),
        duration: 30,
        price: 100_000,
        session_count: 4,
        instrument: "Piano".to_string(),
    };
    stack.packages.insert(package.clone()).await;

    TestContext {
        api: stack.api,
        slips: stack.slips,
        teacher,
        student,
        package,
        _evidence_dir: evidence_dir,
    }
}

pub fn schedule_draft(
    teacher: Uuid,
    date: &str,
    room: &str,
    teacher_fee: i64,
    transport_fee: i64,
) -> NewSchedule {
    NewSchedule {
        teacher,
        date: date.to_string(),
        time: "10:00".to_string(),
        room: room.to_string(),
        transport_fee,
        teacher_fee,
    }
}

pub fn enrollment_draft(ctx: &TestContext, schedules: Vec<NewSchedule>) -> NewEnrollment {
    NewEnrollment {
        student: ctx.student.id,
        package: ctx.package.id,
        payment_status: "Paid".to_string(),
        payment_total: 100_000,
        payment_date: None,
        date_periode: vec![],
        schedules,
    }
}

//! End-to-end reconciliation scenarios through the capability facade.

mod common;

use common::{context, enrollment_draft, schedule_draft, ADMIN_TOKEN, TEACHER_TOKEN};
use fermata::api::AttendanceUpdate;
use fermata::services::SchedulePatch;
use fermata::CoreError;

#[tokio::test]
async fn one_schedule_builds_the_monthly_slip() {
    let ctx = context().await;

    ctx.api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();

    let slip = ctx
        .api
        .salary_slip_for_period(ADMIN_TOKEN, ctx.teacher.id, 6, 2024)
        .await
        .unwrap();
    assert_eq!(slip.details.len(), 1);
    assert_eq!(slip.details[0].total_fee, 50_000);
    assert_eq!(slip.details[0].student_name, "Student Test");
    assert_eq!(slip.details[0].instrument, "Piano");
    assert_eq!(slip.total_salary, 50_000);
}

#[tokio::test]
async fn second_room_same_month_accumulates_on_the_same_slip() {
    let ctx = context().await;
    let created = ctx
        .api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();

    ctx.api
        .add_schedule(
            ADMIN_TOKEN,
            created.id,
            schedule_draft(ctx.teacher.id, "2024-06-17", "B", 60_000, 10_000),
        )
        .await
        .unwrap();

    let slip = ctx
        .api
        .salary_slip_for_period(ADMIN_TOKEN, ctx.teacher.id, 6, 2024)
        .await
        .unwrap();
    assert_eq!(slip.details.len(), 2);
    assert_eq!(slip.total_salary, 50_000 + 70_000);
}

#[tokio::test]
async fn fee_update_replaces_the_line_item_in_place() {
    let ctx = context().await;
    let created = ctx
        .api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();
    let schedule_id = created.schedules[0].id;

    ctx.api
        .update_schedule(
            ADMIN_TOKEN,
            created.id,
            schedule_id,
            SchedulePatch {
                teacher_fee: Some(80_000),
                transport_fee: Some(5_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let slip = ctx
        .api
        .salary_slip_for_period(ADMIN_TOKEN, ctx.teacher.id, 6, 2024)
        .await
        .unwrap();
    assert_eq!(slip.details.len(), 1, "no duplicate line item for the key");
    assert_eq!(slip.details[0].total_fee, 85_000);
    assert_eq!(slip.total_salary, 85_000);
}

#[tokio::test]
async fn reschedule_without_evidence_keeps_the_photo() {
    let ctx = context().await;
    let created = ctx
        .api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();
    let schedule_id = created.schedules[0].id;

    let with_photo = ctx
        .api
        .record_attendance(
            TEACHER_TOKEN,
            created.id,
            schedule_id,
            AttendanceUpdate {
                status: "Success".to_string(),
                note: Some("Great class!".to_string()),
                evidence: Some(fermata::api::EvidenceUpload {
                    content: b"jpeg-bytes".to_vec(),
                    extension: "jpg".to_string(),
                }),
            },
        )
        .await
        .unwrap();
    let reference = with_photo.activity_photo.clone().unwrap();

    let rescheduled = ctx
        .api
        .record_attendance(
            TEACHER_TOKEN,
            created.id,
            schedule_id,
            AttendanceUpdate {
                status: "Reschedule".to_string(),
                note: None,
                evidence: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(rescheduled.activity_photo.as_deref(), Some(reference.as_str()));
}

#[tokio::test]
async fn creation_swallows_slip_failures_but_updates_propagate_them() {
    let ctx = context().await;
    let created = ctx
        .api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();
    let schedule_id = created.schedules[0].id;

    ctx.slips.set_fail_on_save(true).await;

    // add: swallowed, the schedule is still added
    let enrollment = ctx
        .api
        .add_schedule(
            ADMIN_TOKEN,
            created.id,
            schedule_draft(ctx.teacher.id, "2024-06-17", "B", 50_000, 0),
        )
        .await
        .unwrap();
    assert_eq!(enrollment.schedules.len(), 2);

    // update: propagated, with the schedule change already committed
    let err = ctx
        .api
        .update_schedule(
            ADMIN_TOKEN,
            created.id,
            schedule_id,
            SchedulePatch {
                teacher_fee: Some(90_000),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Reconciliation(_)));

    ctx.slips.set_fail_on_save(false).await;
    let stored = ctx
        .api
        .enrollment_detail(ADMIN_TOKEN, created.id)
        .await
        .unwrap();
    assert_eq!(stored.schedules[0].teacher_fee, 90_000);
}

#[tokio::test]
async fn deleting_the_enrollment_leaves_the_slip_behind() {
    let ctx = context().await;
    let created = ctx
        .api
        .create_enrollment(
            ADMIN_TOKEN,
            enrollment_draft(
                &ctx,
                vec![schedule_draft(ctx.teacher.id, "2024-06-10", "A", 50_000, 0)],
            ),
        )
        .await
        .unwrap();

    ctx.api
        .delete_enrollment(ADMIN_TOKEN, created.id)
        .await
        .unwrap();

    // One-way derivation: the slip survives its source.
    let slip = ctx
        .api
        .salary_slip_for_period(ADMIN_TOKEN, ctx.teacher.id, 6, 2024)
        .await
        .unwrap();
    assert_eq!(slip.details.len(), 1);
}

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{BUYER, OTHER_BUYER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::AppointmentStatus,
    requests::appointment::{
        CreateAppointmentRequest, FindAppointments, FindSellerAppointments,
        UpdateAppointmentRequest, UpdateAppointmentStatusRequest,
    },
    schedule::{ClockTime, DayOfWeek, OperatingHours},
};
use shared::errors::ServiceError;

fn weekday_hours() -> Vec<OperatingHours> {
    vec![OperatingHours {
        day: DayOfWeek::Monday,
        open: ClockTime::hm(8, 0).unwrap(),
        close: ClockTime::hm(17, 0).unwrap(),
    }]
}

// 2030-01-07 is a Monday.
fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, 7)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn booking(location_id: i64, at: NaiveDateTime) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        seller_id: SELLER,
        location_id,
        scheduled_at: at,
        purpose: "Ambil pesanan ikan".into(),
        notes: None,
    }
}

fn status(status: AppointmentStatus) -> UpdateAppointmentStatusRequest {
    UpdateAppointmentStatusRequest { status }
}

#[tokio::test]
async fn bookings_must_fall_inside_operating_hours() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, weekday_hours()).await;
    let appointments = &app.services.appointment_service;
    let buyer = Actor::buyer(BUYER);

    let evening = appointments
        .create_appointment(&buyer, &booking(location, monday_at(20, 0)))
        .await;
    let Err(ServiceError::Rejected { message, details }) = evening else {
        panic!("evening booking must be rejected");
    };
    assert_eq!(message, "outside operating hours (08:00 - 17:00)");
    assert_eq!(details["violation"], "outside_hours");
    assert_eq!(details["day"], "monday");
    assert_eq!(details["windows"][0]["open"], "08:00");
    assert_eq!(details["windows"][0]["close"], "17:00");

    let tuesday = NaiveDate::from_ymd_opt(2030, 1, 8)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let closed = appointments
        .create_appointment(&buyer, &booking(location, tuesday))
        .await;
    let Err(ServiceError::Rejected { message, details }) = closed else {
        panic!("tuesday booking must be rejected");
    };
    assert!(message.starts_with("location is closed on"));
    assert_eq!(details["violation"], "closed_on_day");
    assert_eq!(details["day"], "tuesday");

    let at_closing = appointments
        .create_appointment(&buyer, &booking(location, monday_at(17, 0)))
        .await
        .expect("closing time is inside the window")
        .data;
    assert_eq!(at_closing.status, AppointmentStatus::Waiting);
    assert_eq!(at_closing.buyer_id, BUYER);
}

#[tokio::test]
async fn past_times_and_self_bookings_are_invalid() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, weekday_hours()).await;
    let appointments = &app.services.appointment_service;

    let past = NaiveDate::from_ymd_opt(2020, 1, 6)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let result = appointments
        .create_appointment(&Actor::buyer(BUYER), &booking(location, past))
        .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let own = appointments
        .create_appointment(&Actor::seller(SELLER), &booking(location, monday_at(10, 0)))
        .await;
    assert!(matches!(own, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn status_changes_follow_party_rules() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, weekday_hours()).await;
    let appointments = &app.services.appointment_service;
    let buyer = Actor::buyer(BUYER);
    let seller = Actor::seller(SELLER);

    let booked = appointments
        .create_appointment(&buyer, &booking(location, monday_at(9, 30)))
        .await
        .expect("book")
        .data;

    let buyer_confirms = appointments
        .update_appointment_status(&buyer, booked.id, &status(AppointmentStatus::Confirmed))
        .await;
    assert!(matches!(buyer_confirms, Err(ServiceError::Forbidden(_))));

    let outsider = appointments
        .update_appointment_status(
            &Actor::buyer(OTHER_BUYER),
            booked.id,
            &status(AppointmentStatus::Canceled),
        )
        .await;
    assert!(matches!(outsider, Err(ServiceError::Forbidden(_))));

    let confirmed = appointments
        .update_appointment_status(&seller, booked.id, &status(AppointmentStatus::Confirmed))
        .await
        .expect("confirm")
        .data;
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let delete_confirmed = appointments.delete_appointment(&buyer, booked.id).await;
    assert!(matches!(delete_confirmed, Err(ServiceError::Conflict(_))));

    appointments
        .update_appointment_status(&seller, booked.id, &status(AppointmentStatus::Completed))
        .await
        .expect("complete");

    let reopen = appointments
        .update_appointment_status(&seller, booked.id, &status(AppointmentStatus::Canceled))
        .await;
    assert!(matches!(reopen, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn rescheduling_resets_to_waiting_and_rechecks_hours() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, weekday_hours()).await;
    let appointments = &app.services.appointment_service;
    let buyer = Actor::buyer(BUYER);

    let booked = appointments
        .create_appointment(&buyer, &booking(location, monday_at(9, 0)))
        .await
        .expect("book")
        .data;
    appointments
        .update_appointment_status(
            &Actor::seller(SELLER),
            booked.id,
            &status(AppointmentStatus::Confirmed),
        )
        .await
        .expect("confirm");

    let too_late = appointments
        .update_appointment(
            &buyer,
            booked.id,
            &UpdateAppointmentRequest {
                scheduled_at: Some(monday_at(18, 0)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(too_late, Err(ServiceError::Rejected { .. })));

    let moved = appointments
        .update_appointment(
            &buyer,
            booked.id,
            &UpdateAppointmentRequest {
                scheduled_at: Some(monday_at(15, 0)),
                ..Default::default()
            },
        )
        .await
        .expect("reschedule")
        .data;
    assert_eq!(moved.status, AppointmentStatus::Waiting);

    let by_seller = appointments
        .update_appointment(
            &Actor::seller(SELLER),
            booked.id,
            &UpdateAppointmentRequest {
                purpose: Some("Lihat lokasi".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(by_seller, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn listings_split_by_party_and_date() {
    let app = TestApp::new().await;
    let location = app.location(SELLER, weekday_hours()).await;
    let appointments = &app.services.appointment_service;

    appointments
        .create_appointment(&Actor::buyer(BUYER), &booking(location, monday_at(10, 0)))
        .await
        .expect("book");

    let upcoming = appointments
        .list_appointments(&Actor::buyer(BUYER), &FindAppointments::default())
        .await
        .expect("buyer list");
    assert_eq!(upcoming.pagination.total_items, 1);

    let seller_day = appointments
        .seller_appointments(
            &Actor::seller(SELLER),
            &FindSellerAppointments {
                from: NaiveDate::from_ymd_opt(2030, 1, 7),
                to: NaiveDate::from_ymd_opt(2030, 1, 7),
                ..Default::default()
            },
        )
        .await
        .expect("seller list");
    assert_eq!(seller_day.data.len(), 1);

    let next_week = appointments
        .seller_appointments(
            &Actor::seller(SELLER),
            &FindSellerAppointments {
                from: NaiveDate::from_ymd_opt(2030, 1, 14),
                ..Default::default()
            },
        )
        .await
        .expect("seller list");
    assert!(next_week.data.is_empty());

    let buyer_as_seller = appointments
        .seller_appointments(&Actor::buyer(BUYER), &FindSellerAppointments::default())
        .await;
    assert!(matches!(buyer_as_seller, Err(ServiceError::Forbidden(_))));
}

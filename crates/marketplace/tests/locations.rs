mod common;

use chrono::NaiveDate;
use common::{BUYER, OTHER_SELLER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::SellerType,
    requests::{
        PageRequest,
        appointment::CreateAppointmentRequest,
        seller_location::{
            CreateSellerLocationRequest, FindSellerLocations, UpdateSellerLocationRequest,
        },
    },
    schedule::{ClockTime, DayOfWeek, OperatingHours},
};
use shared::errors::{RepositoryError, ServiceError};

fn hours(day: DayOfWeek, open: u32, close: u32) -> OperatingHours {
    OperatingHours {
        day,
        open: ClockTime::hm(open, 0).unwrap(),
        close: ClockTime::hm(close, 0).unwrap(),
    }
}

fn stall(name: &str, city: &str, hours: Vec<OperatingHours>) -> CreateSellerLocationRequest {
    CreateSellerLocationRequest {
        business_name: name.into(),
        description: None,
        address: "Jl. Nelayan No. 3".into(),
        province: "Sulawesi Selatan".into(),
        city: city.into(),
        district: None,
        postal_code: None,
        phone: None,
        photos: vec![],
        seller_type: SellerType::Wholesale,
        operating_hours: hours,
        active: true,
    }
}

#[tokio::test]
async fn closing_must_come_after_opening() {
    let app = TestApp::new().await;
    let locations = &app.services.seller_location_service;
    let seller = Actor::seller(SELLER);

    let inverted = locations
        .create_location(
            &seller,
            &stall(
                "Lapak Subuh",
                "Makassar",
                vec![
                    hours(DayOfWeek::Monday, 5, 11),
                    hours(DayOfWeek::Tuesday, 17, 8),
                ],
            ),
        )
        .await;
    let Err(ServiceError::Validation(errors)) = inverted else {
        panic!("inverted hours must be rejected");
    };
    assert_eq!(errors.len(), 1);

    let zero_length = locations
        .create_location(
            &seller,
            &stall("Lapak Subuh", "Makassar", vec![hours(DayOfWeek::Friday, 9, 9)]),
        )
        .await;
    assert!(matches!(zero_length, Err(ServiceError::Validation(_))));

    let id = app.location(SELLER, vec![hours(DayOfWeek::Monday, 5, 11)]).await;
    let bad_update = locations
        .update_location(
            &seller,
            id,
            &UpdateSellerLocationRequest {
                operating_hours: Some(vec![hours(DayOfWeek::Monday, 12, 6)]),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(bad_update, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn only_the_owner_manages_a_location() {
    let app = TestApp::new().await;
    let locations = &app.services.seller_location_service;
    let id = app.location(SELLER, vec![]).await;
    let rival = Actor::seller(OTHER_SELLER);

    let by_buyer = locations
        .create_location(&Actor::buyer(BUYER), &stall("Lapak", "Makassar", vec![]))
        .await;
    assert!(matches!(by_buyer, Err(ServiceError::Forbidden(_))));

    let edit = locations
        .update_location(
            &rival,
            id,
            &UpdateSellerLocationRequest {
                business_name: Some("Diambil alih".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(edit, Err(ServiceError::Forbidden(_))));

    let delete = locations.delete_location(&rival, id).await;
    assert!(matches!(delete, Err(ServiceError::Forbidden(_))));

    let renamed = locations
        .update_location(
            &Actor::seller(SELLER),
            id,
            &UpdateSellerLocationRequest {
                business_name: Some("Lapak Baru".into()),
                ..Default::default()
            },
        )
        .await
        .expect("owner edits")
        .data;
    assert_eq!(renamed.business_name, "Lapak Baru");
    assert_eq!(renamed.city, "Makassar");
}

#[tokio::test]
async fn inactive_locations_are_hidden_from_the_public() {
    let app = TestApp::new().await;
    let locations = &app.services.seller_location_service;
    let open = app.location(SELLER, vec![]).await;
    let closed = locations
        .create_location(
            &Actor::seller(SELLER),
            &CreateSellerLocationRequest {
                active: false,
                ..stall("Gudang Lama", "Parepare", vec![])
            },
        )
        .await
        .expect("create inactive")
        .data
        .id;

    locations.find_location(open).await.expect("active is visible");
    let hidden = locations.find_location(closed).await;
    assert!(matches!(hidden, Err(ServiceError::NotFound(_))));

    let public = locations
        .list_locations(&FindSellerLocations::default())
        .await
        .expect("public list");
    let ids: Vec<i64> = public.data.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![open]);

    let mine = locations
        .my_locations(&Actor::seller(SELLER), &PageRequest::default())
        .await
        .expect("own list");
    assert_eq!(mine.pagination.total_items, 2);
}

#[tokio::test]
async fn public_list_filters_by_city_and_search() {
    let app = TestApp::new().await;
    let locations = &app.services.seller_location_service;

    for (name, city) in [
        ("Tambak Udang Maros", "Maros"),
        ("Pelelangan Paotere", "Makassar"),
        ("Lapak Rajungan", "makassar"),
    ] {
        locations
            .create_location(&Actor::seller(SELLER), &stall(name, city, vec![]))
            .await
            .expect("create");
    }

    let makassar = locations
        .list_locations(&FindSellerLocations {
            city: Some("MAKASSAR".into()),
            ..Default::default()
        })
        .await
        .expect("by city");
    assert_eq!(makassar.pagination.total_items, 2);

    let search = locations
        .list_locations(&FindSellerLocations {
            search: "udang".into(),
            ..Default::default()
        })
        .await
        .expect("by search");
    assert_eq!(search.data.len(), 1);
    assert_eq!(search.data[0].business_name, "Tambak Udang Maros");
}

#[tokio::test]
async fn location_with_appointments_cannot_be_deleted() {
    let app = TestApp::new().await;
    let id = app
        .location(SELLER, vec![hours(DayOfWeek::Monday, 8, 17)])
        .await;

    app.services
        .appointment_service
        .create_appointment(
            &Actor::buyer(BUYER),
            &CreateAppointmentRequest {
                seller_id: SELLER,
                location_id: id,
                scheduled_at: NaiveDate::from_ymd_opt(2030, 1, 7)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                purpose: "Lihat hasil tangkapan".into(),
                notes: None,
            },
        )
        .await
        .expect("book");

    let result = app
        .services
        .seller_location_service
        .delete_location(&Actor::seller(SELLER), id)
        .await;
    assert!(matches!(
        result,
        Err(ServiceError::Repo(RepositoryError::ForeignKey(_)))
    ));
}

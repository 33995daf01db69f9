mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;
use wanderstay_backend::domain::ports::BookingRepository;
use wanderstay_backend::domain::models::booking::{
    Booking, BookingDetailsInput, BookingKind, BookingQuery, GuestDetails, ListingSnapshot,
    NewBookingParams, PaymentRecord, PropertySnapshot, SortField, SortOrder, TripSnapshot,
};

fn snapshot(kind: BookingKind, title: &str) -> ListingSnapshot {
    match kind {
        BookingKind::Property => ListingSnapshot::Property(PropertySnapshot {
            id: "prop_1".to_string(),
            title: title.to_string(),
            location: "Goa".to_string(),
            images: vec![],
            cancellation_policy: None,
        }),
        _ => ListingSnapshot::Trip(TripSnapshot {
            id: "trip_1".to_string(),
            title: title.to_string(),
            location: "Himachal".to_string(),
            images: vec![],
            duration_days: 3,
        }),
    }
}

fn make_booking(
    user_id: &str,
    guest_name: &str,
    owner_id: &str,
    kind: BookingKind,
    title: &str,
    check_in: DateTime<Utc>,
) -> Booking {
    Booking::new(NewBookingParams {
        info_details: snapshot(kind, title),
        booking_details: BookingDetailsInput {
            check_in,
            check_out: check_in + Duration::days(3),
            adults: 2,
            children: 0,
            rooms_detail: vec![],
            subtotal: 100.0,
            service_fee: 10.0,
            taxes: 18.0,
            total_price: 128.0,
            currency: "INR".to_string(),
        },
        guest_details: GuestDetails {
            user_id: user_id.to_string(),
            name: guest_name.to_string(),
            email: format!("{}@example.com", user_id),
            phone: None,
        },
        recipients: vec![format!("{}@example.com", user_id)],
        owner_id: owner_id.to_string(),
        payment: PaymentRecord {
            provider: "razorpay".to_string(),
            order_id: format!("order_{}", user_id),
            payment_id: format!("pay_{}", user_id),
            status: "succeeded".to_string(),
        },
    })
}

async fn seed_bookings(app: &TestApp) {
    let base = Utc::now() + Duration::days(10);
    let rows = vec![
        make_booking("u1", "Asha Rao", "owner_a", BookingKind::Property, "Seaside Villa", base),
        make_booking("u1", "Asha Rao", "owner_a", BookingKind::Trip, "Spiti Circuit", base + Duration::days(1)),
        make_booking("u2", "Ravi Kumar", "owner_a", BookingKind::Property, "Hilltop Cottage", base + Duration::days(2)),
        make_booking("u2", "Ravi Kumar", "owner_b", BookingKind::Trip, "Backwater Cruise", base + Duration::days(3)),
        make_booking("u3", "Meera Pillai", "owner_b", BookingKind::Property, "Seaside Villa", base + Duration::days(4)),
    ];
    for row in &rows {
        app.state.booking_repo.create(row).await.unwrap();
    }
}

#[tokio::test]
async fn count_matches_unpaginated_query_for_every_filter() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;

    let filters = vec![
        BookingQuery::default(),
        BookingQuery { user_id: Some("u1".to_string()), ..Default::default() },
        BookingQuery { owner_id: Some("owner_a".to_string()), ..Default::default() },
        BookingQuery { kind: Some(BookingKind::Property), ..Default::default() },
        BookingQuery { search: Some("Seaside".to_string()), ..Default::default() },
        BookingQuery { search: Some("Ravi".to_string()), ..Default::default() },
        BookingQuery {
            owner_id: Some("owner_a".to_string()),
            kind: Some(BookingKind::Trip),
            ..Default::default()
        },
        BookingQuery { search: Some("no such listing".to_string()), ..Default::default() },
    ];

    for filter in filters {
        let listed = app.state.booking_repo.query(&filter).await.unwrap();
        let counted = app.state.booking_repo.count(&filter).await.unwrap();
        assert_eq!(listed.len() as i64, counted, "filter {:?} disagrees", filter);
    }
}

#[tokio::test]
async fn search_covers_title_and_guest_name() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;

    let by_title = app
        .state
        .booking_repo
        .query(&BookingQuery { search: Some("Seaside".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_title.len(), 2);

    let by_guest = app
        .state
        .booking_repo
        .query(&BookingQuery { search: Some("Meera".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_guest.len(), 1);
    assert_eq!(by_guest[0].guest_details.name, "Meera Pillai");
}

#[tokio::test]
async fn pagination_and_sort_are_deterministic() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;

    let sorted = BookingQuery {
        sort_by: SortField::CheckIn,
        sort_order: SortOrder::Asc,
        ..Default::default()
    };
    let all = app.state.booking_repo.query(&sorted).await.unwrap();
    assert_eq!(all.len(), 5);
    for pair in all.windows(2) {
        assert!(pair[0].booking_details.check_in <= pair[1].booking_details.check_in);
    }

    let page = app
        .state
        .booking_repo
        .query(&BookingQuery {
            sort_by: SortField::CheckIn,
            sort_order: SortOrder::Asc,
            limit: Some(2),
            skip: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, all[2].id);
    assert_eq!(page[1].id, all[3].id);
}

#[tokio::test]
async fn my_bookings_endpoint_is_scoped_to_the_requester() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;
    let token = app.token_for("u1", "customer");

    let res = app.request("GET", "/api/v1/bookings", Some(&token), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let bookings = parse_body(res).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    for b in bookings {
        assert_eq!(b["guest_details"]["user_id"], "u1");
    }

    let res = app
        .request("GET", "/api/v1/bookings?type=trip", Some(&token), None)
        .await;
    let bookings = parse_body(res).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn manager_listing_and_count_agree() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;
    let token = app.token_for("owner_a", "manager");

    let res = app
        .request("GET", "/api/v1/manager/bookings", Some(&token), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed = parse_body(res).await;
    let listed = listed.as_array().unwrap().len();

    let res = app
        .request("GET", "/api/v1/manager/bookings/count", Some(&token), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let counted = parse_body(res).await;
    assert_eq!(counted["count"], json!(listed));
    assert_eq!(listed, 3);
}

#[tokio::test]
async fn manager_endpoints_reject_customers() {
    let app = TestApp::new().await;
    let token = app.token_for("u1", "customer");

    let res = app
        .request("GET", "/api/v1/manager/bookings", Some(&token), None)
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn booking_fetch_enforces_guest_or_owner_access() {
    let app = TestApp::new().await;
    seed_bookings(&app).await;

    let u1_bookings = app
        .state
        .booking_repo
        .query(&BookingQuery { user_id: Some("u1".to_string()), ..Default::default() })
        .await
        .unwrap();
    let id = u1_bookings[0].id.clone();

    let guest = app.token_for("u1", "customer");
    let owner = app.token_for("owner_a", "manager");
    let other = app.token_for("u9", "customer");

    let res = app
        .request("GET", &format!("/api/v1/bookings/{}", id), Some(&guest), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .request("GET", &format!("/api/v1/bookings/{}", id), Some(&owner), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .request("GET", &format!("/api/v1/bookings/{}", id), Some(&other), None)
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

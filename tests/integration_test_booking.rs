mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use common::{parse_body, seed_tenant, TestApp};
use serde_json::json;

/// Next Monday strictly after today, so booked times are always in the
/// future regardless of when the suite runs.
fn next_monday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while date.weekday() != Weekday::Mon {
        date += Duration::days(1);
    }
    date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

async fn create_service(app: &TestApp, tenant_id: &str, duration: i32, buffer: i32) -> String {
    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/{}/services", tenant_id),
            Some(json!({
                "name": "Haircut",
                "duration_min": duration,
                "buffer_min": buffer,
                "price": 25.0
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn create_staff(app: &TestApp, tenant_id: &str, email: &str) -> String {
    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/{}/staff", tenant_id),
            Some(json!({
                "first_name": "Sam",
                "last_name": "Ward",
                "email": email,
                "working_hours": {
                    "monday": [{"start": "09:00", "end": "17:00"}]
                }
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn book(
    app: &TestApp,
    tenant_id: &str,
    customer_id: &str,
    service_id: &str,
    staff_id: Option<&str>,
    start: DateTime<Utc>,
) -> axum::response::Response {
    app.request(
        Method::POST,
        &format!("/api/v1/{}/bookings", tenant_id),
        Some(json!({
            "customer_id": customer_id,
            "service_id": service_id,
            "staff_id": staff_id,
            "start_time": start.to_rfc3339()
        })),
    )
    .await
}

#[tokio::test]
async fn overlapping_booking_is_rejected_with_conflicts() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "conflict-shop").await;
    let sid = create_service(&app, &tid, 30, 10).await;
    let staff = create_staff(&app, &tid, "sam@example.com").await;

    let start = next_monday_at(10, 0);
    let res = book(&app, &tid, &cid, &sid, Some(&staff), start).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["status"], "pending");

    // 10:30 overlaps the occupied 10:00-10:40 interval.
    let res = book(&app, &tid, &cid, &sid, Some(&staff), start + Duration::minutes(30)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    let conflicts = body["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);

    // 10:40 is adjacent to the buffered end and must be accepted.
    let res = book(&app, &tid, &cid, &sid, Some(&staff), start + Duration::minutes(40)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn end_time_includes_buffer() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "buffer-shop").await;
    let sid = create_service(&app, &tid, 30, 10).await;

    let start = next_monday_at(10, 0);
    let res = book(&app, &tid, &cid, &sid, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking = parse_body(res).await;

    let end = DateTime::parse_from_rfc3339(booking["end_time"].as_str().unwrap()).unwrap();
    assert_eq!(end.with_timezone(&Utc), start + Duration::minutes(40));
}

#[tokio::test]
async fn different_staff_do_not_conflict() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "two-chairs").await;
    let sid = create_service(&app, &tid, 30, 0).await;
    let staff_a = create_staff(&app, &tid, "a@example.com").await;
    let staff_b = create_staff(&app, &tid, "b@example.com").await;

    let start = next_monday_at(11, 0);
    let res = book(&app, &tid, &cid, &sid, Some(&staff_a), start).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = book(&app, &tid, &cid, &sid, Some(&staff_b), start).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unassigned_bookings_form_their_own_bucket() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "walk-ins").await;
    let sid = create_service(&app, &tid, 30, 0).await;
    let staff = create_staff(&app, &tid, "sam@example.com").await;

    let start = next_monday_at(11, 0);
    let res = book(&app, &tid, &cid, &sid, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);

    // A staff-assigned booking at the same time is a different bucket.
    let res = book(&app, &tid, &cid, &sid, Some(&staff), start).await;
    assert_eq!(res.status(), StatusCode::OK);

    // But a second unassigned booking collides.
    let res = book(&app, &tid, &cid, &sid, None, start).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn tenants_are_isolated() {
    let app = TestApp::new().await;
    let (tid_a, cid_a) = seed_tenant(&app, "shop-a").await;
    let (tid_b, cid_b) = seed_tenant(&app, "shop-b").await;
    let sid_a = create_service(&app, &tid_a, 30, 0).await;
    let sid_b = create_service(&app, &tid_b, 30, 0).await;

    let start = next_monday_at(11, 0);
    let res = book(&app, &tid_a, &cid_a, &sid_a, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = book(&app, &tid_b, &cid_b, &sid_b, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn cancelled_booking_frees_the_slot() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "free-again").await;
    let sid = create_service(&app, &tid, 30, 0).await;

    let start = next_monday_at(14, 0);
    let res = book(&app, &tid, &cid, &sid, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/{}/bookings/{}/cancel", tid, booking_id),
            Some(json!({ "reason": "Customer called" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = book(&app, &tid, &cid, &sid, None, start).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn booking_window_is_enforced() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "windowed").await;

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/{}/services", tid),
            Some(json!({
                "name": "Consultation",
                "duration_min": 60,
                "price": 100.0,
                "booking_window": { "min_advance_hours": 24, "max_advance_days": 7 }
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let sid = parse_body(res).await["id"].as_str().unwrap().to_string();

    // Under the 24h minimum.
    let res = book(&app, &tid, &cid, &sid, None, Utc::now() + Duration::hours(2)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Beyond the 7 day maximum.
    let res = book(&app, &tid, &cid, &sid, None, Utc::now() + Duration::days(30)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Inside the window.
    let res = book(&app, &tid, &cid, &sid, None, Utc::now() + Duration::days(3)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_customer_is_rejected() {
    let app = TestApp::new().await;
    let (tid, _) = seed_tenant(&app, "no-such-customer").await;
    let sid = create_service(&app, &tid, 30, 0).await;

    let res = book(&app, &tid, "missing", &sid, None, next_monday_at(10, 0)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_customer_cannot_book() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "tombstoned").await;
    let sid = create_service(&app, &tid, 30, 0).await;

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/{}/customers/{}", tid, cid),
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = book(&app, &tid, &cid, &sid, None, next_monday_at(10, 0)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_filters_by_status() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "listing").await;
    let sid = create_service(&app, &tid, 30, 0).await;

    let first = next_monday_at(9, 0);
    let second = next_monday_at(10, 0);
    let id_a = parse_body(book(&app, &tid, &cid, &sid, None, first).await).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    book(&app, &tid, &cid, &sid, None, second).await;

    app.request(
        Method::POST,
        &format!("/api/v1/{}/bookings/{}/cancel", tid, id_a),
        Some(json!({})),
    )
    .await;

    let res = app
        .request(
            Method::GET,
            &format!("/api/v1/{}/bookings?status=pending", tid),
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let list = body["bookings"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn listing_pages_and_reports_total() {
    let app = TestApp::new().await;
    let (tid, cid) = seed_tenant(&app, "paged").await;
    let sid = create_service(&app, &tid, 30, 0).await;

    for hour in 9..12 {
        let res = book(&app, &tid, &cid, &sid, None, next_monday_at(hour, 0)).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app
        .request(
            Method::GET,
            &format!("/api/v1/{}/bookings?limit=2&offset=0", tid),
            None,
        )
        .await;
    let body = parse_body(res).await;
    let page = body["bookings"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(body["total"], 3);

    let res = app
        .request(
            Method::GET,
            &format!("/api/v1/{}/bookings?limit=2&offset=2", tid),
            None,
        )
        .await;
    let body = parse_body(res).await;
    let page = body["bookings"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(body["total"], 3);

    // Oversized limits are clamped to the cap, not honored verbatim.
    let res = app
        .request(
            Method::GET,
            &format!("/api/v1/{}/bookings?limit=5000", tid),
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["bookings"].as_array().unwrap().len(), 3);
}

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use innkeep_api::middleware::AdminClaims;
use innkeep_api::{app, state::{AppState, AuthConfig}};
use innkeep_shared::models::{Booking, BookingStatus, PaymentStatus, Room};
use innkeep_shared::Masked;
use innkeep_store::app_config::BookingRules;
use innkeep_store::{MemoryStore, Repositories};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const PASSWORD: &str = "front-desk";
const SECRET: &str = "test-secret";

fn room(slug: &str, price: i64, total_units: Option<i64>, is_available: bool) -> Room {
    Room {
        id: Uuid::new_v4(),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: String::new(),
        price_per_night: price,
        capacity: 2,
        beds: 1,
        size_sq_ft: Some(320),
        image_urls: vec![],
        amenities: vec!["wifi".to_string()],
        is_available,
        total_units,
        tax_percent: None,
    }
}

fn confirmed(room_id: Uuid, check_in: &str, check_out: &str) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        room_id,
        room_name: "Room".to_string(),
        guest_name: "Guest".to_string(),
        guest_email: Masked("guest@example.com".to_string()),
        guest_phone: Masked("0000".to_string()),
        check_in_date: NaiveDate::parse_from_str(check_in, "%Y-%m-%d").unwrap(),
        check_out_date: NaiveDate::parse_from_str(check_out, "%Y-%m-%d").unwrap(),
        number_of_guests: 2,
        number_of_nights: 2,
        room_price: 0,
        tax_amount: 0,
        total_amount: 0,
        booking_status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        payment_id: None,
        special_requests: None,
        created_at: now,
        updated_at: now,
    }
}

fn test_app(store: &Arc<MemoryStore>) -> Router {
    let state = AppState::new(
        Repositories::memory(store.clone()),
        AuthConfig {
            secret: SECRET.to_string(),
            expiration: 3600,
            admin_password: PASSWORD.to_string(),
        },
        &BookingRules::default(),
    );
    app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Logs in and returns the `name=value` pair to send back as a cookie.
async fn admin_cookie(app: &Router) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/admin/session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "password": PASSWORD }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    set_cookie.split(';').next().unwrap().to_string()
}

fn availability_body(room_id: Uuid, check_in: &str, check_out: &str) -> Value {
    json!({
        "roomId": room_id.to_string(),
        "checkInDate": check_in,
        "checkOutDate": check_out,
    })
}

// ============================================================================
// Guest availability
// ============================================================================

#[tokio::test]
async fn test_availability_partial_overlap() {
    let store = Arc::new(MemoryStore::new());
    let deluxe = room("deluxe", 350_000, Some(3), true);
    store.insert_room(deluxe.clone()).await;
    store.insert_booking(confirmed(deluxe.id, "2024-06-01", "2024-06-03")).await;
    let app = test_app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(availability_body(deluxe.id, "2024-06-02", "2024-06-05")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "available": true, "availableUnits": 2, "totalUnits": 3, "bookedUnits": 1 })
    );
}

#[tokio::test]
async fn test_availability_single_unit_fully_booked() {
    let store = Arc::new(MemoryStore::new());
    let suite = room("suite", 900_000, Some(1), true);
    store.insert_room(suite.clone()).await;
    store.insert_booking(confirmed(suite.id, "2024-06-01", "2024-06-10")).await;
    let app = test_app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(availability_body(suite.id, "2024-06-03", "2024-06-04")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookedUnits"], 1);
    assert_eq!(body["availableUnits"], 0);
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn test_availability_missing_fields() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(json!({ "roomId": Uuid::new_v4().to_string(), "checkInDate": "2024-06-01" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn test_availability_failures_are_500_with_message() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(availability_body(Uuid::new_v4(), "2024-06-01", "2024-06-02")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Room not found"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/check-availability")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Admin session
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_session() {
    let store = Arc::new(MemoryStore::new());
    let block = room("garden-villa", 500_000, Some(5), true);
    store.insert_room(block.clone()).await;
    let app = test_app(&store);
    let body = availability_body(block.id, "2024-07-05", "2024-07-06");

    let (status, json_body) =
        send(&app, Method::POST, "/api/admin/rooms/availability", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body, json!({ "error": "Unauthorized" }));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/availability",
        Some(body),
        Some("admin-session=not-a-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Signs a session token directly, bypassing the login route.
fn session_cookie(secret: &str, role: &str, expires_in_secs: i64) -> String {
    let claims = AdminClaims {
        sub: "admin".to_string(),
        role: role.to_string(),
        exp: (Utc::now().timestamp() + expires_in_secs) as usize,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap();
    format!("admin-session={token}")
}

#[tokio::test]
async fn test_session_token_must_verify() {
    let store = Arc::new(MemoryStore::new());
    let suite = room("suite", 900_000, Some(2), true);
    store.insert_room(suite.clone()).await;
    let app = test_app(&store);
    let body = availability_body(suite.id, "2024-07-05", "2024-07-06");

    let rejected = [
        ("wrong secret", session_cookie("another-secret", "ADMIN", 3600)),
        ("guest role", session_cookie(SECRET, "GUEST", 3600)),
        ("expired two hours ago", session_cookie(SECRET, "ADMIN", -7200)),
        ("expired thirty seconds ago", session_cookie(SECRET, "ADMIN", -30)),
    ];
    for (case, cookie) in rejected {
        let (status, json_body) = send(
            &app,
            Method::POST,
            "/api/admin/rooms/availability",
            Some(body.clone()),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{case}");
        assert_eq!(json_body, json!({ "error": "Unauthorized" }), "{case}");
    }

    let (status, json_body) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/availability",
        Some(body),
        Some(&session_cookie(SECRET, "ADMIN", 3600)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body, json!({ "available": true, "availableUnits": 2 }));
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);
    let cookie = admin_cookie(&app).await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/admin/session")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("admin-session=;"), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "{set_cookie}");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/session",
        Some(json!({ "password": "guess" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::POST, "/api/admin/session", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_block_closes_room_type_for_admin_only() {
    let store = Arc::new(MemoryStore::new());
    let villa = room("garden-villa", 500_000, Some(5), true);
    store.insert_room(villa.clone()).await;
    let app = test_app(&store);
    let cookie = admin_cookie(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/blocks/create",
        Some(json!({
            "roomId": villa.id.to_string(),
            "roomName": villa.name,
            "startDate": "2024-07-01",
            "endDate": "2024-07-10T00:00:00Z",
            "reason": "Maintenance",
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["ok"], true);
    assert_eq!(created["block"]["endDate"], "2024-07-10");

    let query = availability_body(villa.id, "2024-07-05", "2024-07-06");
    let (status, admin_view) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/availability",
        Some(query.clone()),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin_view, json!({ "available": false, "availableUnits": 0 }));

    let (_, guest_view) = send(&app, Method::POST, "/api/check-availability", Some(query.clone()), None).await;
    assert_eq!(guest_view["availableUnits"], 5);

    let block_id = created["block"]["id"].as_str().unwrap().to_string();
    let (status, deleted) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/blocks/delete",
        Some(json!({ "blockId": block_id })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "ok": true }));

    let (_, admin_view) =
        send(&app, Method::POST, "/api/admin/rooms/availability", Some(query), Some(&cookie)).await;
    assert_eq!(admin_view, json!({ "available": true, "availableUnits": 5 }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/blocks/delete",
        Some(json!({ "blockId": block_id })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room block not found");
}

#[tokio::test]
async fn test_block_create_validation() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);
    let cookie = admin_cookie(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/blocks/create",
        Some(json!({ "roomId": Uuid::new_v4().to_string(), "reason": "Event" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/rooms/blocks/create",
        Some(json!({
            "roomId": Uuid::new_v4().to_string(),
            "roomName": "Suite",
            "startDate": "someday",
            "endDate": "2024-07-10",
            "reason": "Event",
        })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create room block");
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn test_booking_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let deluxe = room("deluxe", 350_000, Some(2), true);
    store.insert_room(deluxe.clone()).await;
    let app = test_app(&store);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(json!({
            "roomId": deluxe.id.to_string(),
            "guestName": "A. Menon",
            "guestEmail": "menon@example.com",
            "guestPhone": "98450 00000",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03",
            "numberOfGuests": 2,
            "totalAmount": 1,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bookingStatus"], "pending");
    assert_eq!(created["paymentStatus"], "pending");
    assert_eq!(created["numberOfNights"], 2);
    assert_eq!(created["roomPrice"], 700_000);
    assert_eq!(created["taxAmount"], 84_000);
    assert_eq!(created["totalAmount"], 784_000);
    assert_eq!(created["guestEmail"], "menon@example.com");

    // Pending bookings hold nothing
    let (_, availability) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(availability_body(deluxe.id, "2024-06-01", "2024-06-03")),
        None,
    )
    .await;
    assert_eq!(availability["bookedUnits"], 0);

    let id = created["id"].as_str().unwrap().to_string();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/bookings/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);

    let cookie = admin_cookie(&app).await;
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/bookings/{id}/status"),
        Some(json!({ "bookingStatus": "confirmed", "paymentStatus": "paid", "paymentId": "pay_123" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["bookingStatus"], "confirmed");
    assert_eq!(updated["paymentId"], "pay_123");

    let (_, availability) = send(
        &app,
        Method::POST,
        "/api/check-availability",
        Some(availability_body(deluxe.id, "2024-06-02", "2024-06-04")),
        None,
    )
    .await;
    assert_eq!(availability["bookedUnits"], 1);
    assert_eq!(availability["availableUnits"], 1);
}

#[tokio::test]
async fn test_booking_rejections() {
    let store = Arc::new(MemoryStore::new());
    let deluxe = room("deluxe", 350_000, None, true);
    store.insert_room(deluxe.clone()).await;
    let app = test_app(&store);

    let mut body = json!({
        "roomId": deluxe.id.to_string(),
        "guestName": "A. Menon",
        "guestEmail": "menon@example.com",
        "guestPhone": "98450 00000",
        "checkInDate": "2024-06-03",
        "checkOutDate": "2024-06-03",
    });
    let (status, _) = send(&app, Method::POST, "/api/bookings", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    body["roomId"] = json!(Uuid::new_v4().to_string());
    body["checkOutDate"] = json!("2024-06-05");
    let (status, error) = send(&app, Method::POST, "/api/bookings", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Room not found");

    body["numberOfGuests"] = json!(40);
    body["roomId"] = json!(deluxe.id.to_string());
    let (status, error) = send(&app, Method::POST, "/api/bookings", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "deluxe sleeps at most 2 guests");

    body["numberOfGuests"] = json!(2);
    body["guestPhone"] = json!("");
    let (status, _) = send(&app, Method::POST, "/api/bookings", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, error) =
        send(&app, Method::GET, &format!("/api/bookings/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Booking not found");
}

// ============================================================================
// Rooms and forms
// ============================================================================

#[tokio::test]
async fn test_room_catalogue() {
    let store = Arc::new(MemoryStore::new());
    store.insert_room(room("suite", 900_000, Some(1), true)).await;
    store.insert_room(room("standard", 200_000, Some(8), true)).await;
    store.insert_room(room("penthouse", 2_000_000, Some(1), false)).await;
    let app = test_app(&store);

    let (status, rooms) = send(&app, Method::GET, "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["standard", "suite"]);

    let (status, suite) = send(&app, Method::GET, "/api/rooms/suite", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suite["pricePerNight"], 900_000);

    let (status, _) = send(&app, Method::GET, "/api/rooms/penthouse", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enquiry_forms() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);

    let (status, table) = send(
        &app,
        Method::POST,
        "/api/table-bookings",
        Some(json!({
            "guestName": "R. Iyer",
            "guestPhone": "99999",
            "bookingDate": "2024-08-15",
            "bookingTime": "19:30",
            "numberOfGuests": 4,
            "venue": "restaurant",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(table["status"], "requested");

    let (status, banquet) = send(
        &app,
        Method::POST,
        "/api/banquet-enquiries",
        Some(json!({
            "name": "K. Das",
            "phone": "88888",
            "eventDate": "2024-12-20",
            "eventType": "Wedding reception",
            "expectedGuests": 250,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(banquet["status"], "pending");

    let (status, contact) = send(
        &app,
        Method::POST,
        "/api/contact-messages",
        Some(json!({
            "name": "S. Rao",
            "email": "s@example.com",
            "subject": "Parking",
            "message": "Is valet parking available?",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contact["status"], "unread");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/table-bookings",
        Some(json!({ "guestName": "R. Iyer", "venue": "restaurant" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/table-bookings",
        Some(json!({
            "guestName": "R. Iyer",
            "guestPhone": "99999",
            "bookingDate": "2024-08-15",
            "bookingTime": "19:30",
            "numberOfGuests": 4,
            "venue": "rooftop",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.table_bookings().await.len(), 1);
    assert_eq!(store.banquet_enquiries().await.len(), 1);
    assert_eq!(store.contact_messages().await.len(), 1);
}

#[tokio::test]
async fn test_health() {
    let store = Arc::new(MemoryStore::new());
    let app = test_app(&store);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

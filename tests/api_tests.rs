mod common;

use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Registration & Login ────────────────────────────────────────

#[tokio::test]
async fn register_returns_token_pair() {
    let app = common::spawn_app().await;

    let (body, status) = app.register("user@test.com", "Passw0rd1", "User").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;

    let (body, status) = app.register("user@test.com", "Passw0rd1", "Again").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_enforces_password_policy() {
    let app = common::spawn_app().await;

    // Too short
    let (_, status) = app.register("a@test.com", "a1", "A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No digit
    let (_, status) = app.register("a@test.com", "password", "A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No letter
    let (_, status) = app.register("a@test.com", "12345678", "A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_vendor_creates_profile() {
    let app = common::spawn_app().await;
    let token = app.vendor_token("vendor@test.com").await;

    let (body, status) = app.get_auth("/api/v1/vendors/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business_category"], "photography");

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_vendor_rejects_bad_phone() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .post(
            "/api/v1/auth/register-vendor",
            &json!({
                "email": "v@test.com",
                "password": "Passw0rd1",
                "user_name": "V",
                "business_name": "Studio",
                "business_category": "photography",
                "service_types": ["photography"],
                "phone_number": "12ab",
                "country": "India",
                "city": "Mumbai",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_valid_and_invalid_credentials() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;

    let (body, status) = app.login("user@test.com", "Passw0rd1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    let (_, status) = app.login("user@test.com", "WrongPass1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, status) = app.login("nobody@test.com", "Passw0rd1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Auth middleware ─────────────────────────────────────────────

#[tokio::test]
async fn missing_bearer_halts_request_before_handler() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;

    let (body, status) = app.get("/api/v1/events").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Missing"));

    // No handler side effects: nothing was created anywhere
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = common::spawn_app().await;

    let (_, status) = app.get_auth("/api/v1/events", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn access_token_works_via_cookie() {
    let app = common::spawn_app().await;
    let token = app.user_token("user@test.com").await;

    let resp = app
        .client
        .get(app.url("/api/v1/events"))
        .header("cookie", format!("access_token={token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    common::cleanup(app).await;
}

// ── Refresh ─────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_issues_new_access_token() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;
    let (login_body, _) = app.login("user@test.com", "Passw0rd1").await;
    let refresh = login_body["refresh_token"].as_str().unwrap();

    let resp = app
        .client
        .post(app.url("/api/v1/auth/refresh"))
        .header("cookie", format!("refresh_token={refresh}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let new_access = body["access_token"].as_str().unwrap();

    // The new access token is usable
    let (_, status) = app.get_auth("/api/v1/events", new_access).await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn refresh_rejects_access_token() {
    // Cross-purpose rejection, end to end: an access token presented as a
    // refresh token fails because the purposes use distinct secrets.
    let app = common::spawn_app().await;
    let access = app.user_token("user@test.com").await;

    let resp = app
        .client
        .post(app.url("/api/v1/auth/refresh"))
        .header("cookie", format!("refresh_token={access}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn refresh_without_cookie_is_rejected() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/v1/auth/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Role gates ──────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_reject_user_and_vendor() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let (_, status) = app.get_auth("/api/v1/admin/accounts", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app.get_auth("/api/v1/admin/accounts", &vendor).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

#[tokio::test]
async fn admin_routes_admit_admin() {
    let app = common::spawn_app().await;
    let admin = app.admin_token("admin@test.com").await;

    let (body, status) = app.get_auth("/api/v1/admin/accounts", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().len() >= 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn vendor_routes_reject_user() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;

    let (_, status) = app.get_auth("/api/v1/vendors/me", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app
        .post_auth(
            "/api/v1/services",
            &user,
            &json!({ "title": "X", "category": "y", "price": 1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

#[tokio::test]
async fn role_update_requires_super_admin_for_admin_grants() {
    let app = common::spawn_app().await;
    let admin = app.admin_token("admin@test.com").await;
    app.user_token("user@test.com").await;
    let user_id = app.account_id("user@test.com").await;

    // A plain admin may not grant ADMIN
    let (_, status) = app
        .put_auth(
            &format!("/api/v1/admin/accounts/{user_id}/role"),
            &admin,
            &json!({ "role": "ADMIN" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Role names parse case-insensitively
    let (body, status) = app
        .put_auth(
            &format!("/api/v1/admin/accounts/{user_id}/role"),
            &admin,
            &json!({ "role": "vendor" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["role"], "VENDOR");

    common::cleanup(app).await;
}

// ── Password reset flow ─────────────────────────────────────────

#[tokio::test]
async fn forgot_password_unknown_email_is_not_found() {
    let app = common::spawn_app().await;

    let (_, status) = app
        .post(
            "/api/v1/auth/forgot-password",
            &json!({ "email": "nobody@test.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn password_reset_end_to_end() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;

    // Request: token gets issued and stored on the account
    let (_, status) = app
        .post(
            "/api/v1/auth/forgot-password",
            &json!({ "email": "user@test.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = app.stored_reset_token("user@test.com").await.unwrap();

    // A token that never came from us fails
    let (_, status) = app
        .post(
            "/api/v1/auth/reset-password",
            &json!({ "token": "bogus", "password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Confirm with the real token
    let (_, status) = app
        .post(
            "/api/v1/auth/reset-password",
            &json!({ "token": token, "password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Password changed, stored token cleared
    let (_, status) = app.login("user@test.com", "NewPassw0rd").await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.login("user@test.com", "Passw0rd1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.stored_reset_token("user@test.com").await.is_none());

    // Replay of the consumed token fails
    let (body, status) = app
        .post(
            "/api/v1/auth/reset-password",
            &json!({ "token": token, "password": "OtherPassw0rd1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid or expired"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn second_reset_request_invalidates_first_token() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;

    app.post(
        "/api/v1/auth/forgot-password",
        &json!({ "email": "user@test.com" }),
    )
    .await;
    let first = app.stored_reset_token("user@test.com").await.unwrap();

    // Distinct expiry second, so the reissued token differs from the first
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    app.post(
        "/api/v1/auth/forgot-password",
        &json!({ "email": "user@test.com" }),
    )
    .await;
    let second = app.stored_reset_token("user@test.com").await.unwrap();
    assert_ne!(first, second);

    // Last-issued-wins: the superseded token no longer confirms
    let (_, status) = app
        .post(
            "/api/v1/auth/reset-password",
            &json!({ "token": first, "password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app
        .post(
            "/api/v1/auth/reset-password",
            &json!({ "token": second, "password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn change_password_requires_current_password() {
    let app = common::spawn_app().await;
    let token = app.user_token("user@test.com").await;

    let (_, status) = app
        .post_auth(
            "/api/v1/auth/change-password",
            &token,
            &json!({ "current_password": "Wrong1pass", "new_password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, status) = app
        .post_auth(
            "/api/v1/auth/change-password",
            &token,
            &json!({ "current_password": "Passw0rd1", "new_password": "NewPassw0rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.login("user@test.com", "NewPassw0rd").await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

// ── Email verification ──────────────────────────────────────────

#[tokio::test]
async fn verify_email_with_minted_token() {
    let app = common::spawn_app().await;
    app.user_token("user@test.com").await;
    let id = app.account_id("user@test.com").await;

    let claims = evenda::auth::token::TokenClaims::EmailVerification {
        sub: id,
        email: "user@test.com".to_string(),
    };
    let token = evenda::auth::token::issue(&claims, &common::test_secrets()).unwrap();

    let (_, status) = app
        .post("/api/v1/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let verified: bool =
        sqlx::query_scalar("SELECT email_verified FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(verified);

    common::cleanup(app).await;
}

#[tokio::test]
async fn verify_email_rejects_wrong_purpose_token() {
    let app = common::spawn_app().await;
    let access = app.user_token("user@test.com").await;

    let (_, status) = app
        .post("/api/v1/auth/verify-email", &json!({ "token": access }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

// ── Services ────────────────────────────────────────────────────

#[tokio::test]
async fn service_crud_is_vendor_scoped() {
    let app = common::spawn_app().await;
    let vendor = app.vendor_token("vendor@test.com").await;
    let other = app.vendor_token("other@test.com").await;

    let service = app.create_service(&vendor, "Wedding Shoot").await;
    let id = service["id"].as_str().unwrap();

    // Another vendor cannot update or delete it
    let (_, status) = app
        .put_auth(
            &format!("/api/v1/services/{id}"),
            &other,
            &json!({ "title": "Stolen", "category": "photography", "price": 1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app.delete_auth(&format!("/api/v1/services/{id}"), &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner can
    let (body, status) = app
        .put_auth(
            &format!("/api/v1/services/{id}"),
            &vendor,
            &json!({ "title": "Wedding Shoot Deluxe", "category": "photography", "price": 40000.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Wedding Shoot Deluxe");

    let (_, status) = app.delete_auth(&format!("/api/v1/services/{id}"), &vendor).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.get(&format!("/api/v1/services/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn service_views_count_only_user_viewers() {
    let app = common::spawn_app().await;
    let vendor = app.vendor_token("vendor@test.com").await;
    let user = app.user_token("user@test.com").await;

    let service = app.create_service(&vendor, "Catering").await;
    let id = service["id"].as_str().unwrap();

    // Anonymous and vendor views do not count
    let (body, _) = app.get(&format!("/api/v1/services/{id}")).await;
    assert_eq!(body["views"], 0);
    let (body, _) = app.get_auth(&format!("/api/v1/services/{id}"), &vendor).await;
    assert_eq!(body["views"], 0);

    // USER views upsert-increment
    app.get_auth(&format!("/api/v1/services/{id}"), &user).await;
    let (body, _) = app.get_auth(&format!("/api/v1/services/{id}"), &user).await;
    assert_eq!(body["views"], 2);

    common::cleanup(app).await;
}

#[tokio::test]
async fn service_list_filters_by_category() {
    let app = common::spawn_app().await;
    let vendor = app.vendor_token("vendor@test.com").await;

    app.create_service(&vendor, "Shoot").await;
    let (body, status) = app
        .post_auth(
            "/api/v1/services",
            &vendor,
            &json!({ "title": "Buffet", "category": "Catering", "price": 500.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (body, _) = app.get("/api/v1/services?category=catering").await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Buffet");

    let (body, _) = app.get("/api/v1/services").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    common::cleanup(app).await;
}

#[tokio::test]
async fn service_feedback_requires_user_role() {
    let app = common::spawn_app().await;
    let vendor = app.vendor_token("vendor@test.com").await;
    let user = app.user_token("user@test.com").await;

    let service = app.create_service(&vendor, "Decor").await;
    let id = service["id"].as_str().unwrap();

    // Vendors cannot leave feedback
    let (_, status) = app
        .post_auth(
            &format!("/api/v1/services/{id}/feedback"),
            &vendor,
            &json!({ "rating": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Rating is range-checked
    let (_, status) = app
        .post_auth(
            &format!("/api/v1/services/{id}/feedback"),
            &user,
            &json!({ "rating": 6 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/services/{id}/feedback"),
            &user,
            &json!({ "rating": 4, "comment": "Lovely work" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);

    let (body, _) = app.get(&format!("/api/v1/services/{id}/feedback")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

// ── Events ──────────────────────────────────────────────────────

#[tokio::test]
async fn event_planning_flow() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let (event, status) = app
        .post_auth(
            "/api/v1/events",
            &user,
            &json!({ "name": "Wedding", "budget": 500000.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let event_id = event["id"].as_str().unwrap();

    // Sub-event
    let (sub, status) = app
        .post_auth(
            &format!("/api/v1/events/{event_id}/sub-events"),
            &user,
            &json!({ "name": "Reception" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let sub_id = sub["id"].as_str().unwrap();

    // Task scoped to the sub-event
    let (task, status) = app
        .post_auth(
            &format!("/api/v1/events/{event_id}/tasks"),
            &user,
            &json!({ "title": "Book DJ", "sub_event_id": sub_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let task_id = task["id"].as_str().unwrap();

    let (task, status) = app
        .put_auth(
            &format!("/api/v1/tasks/{task_id}"),
            &user,
            &json!({ "title": "Book DJ", "done": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["done"], true);

    // Attach a vendor service, duplicates rejected
    let service = app.create_service(&vendor, "DJ Set").await;
    let service_id = service["id"].as_str().unwrap();

    let (_, status) = app
        .post_auth(
            &format!("/api/v1/events/{event_id}/vendors"),
            &user,
            &json!({ "service_id": service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/events/{event_id}/vendors"),
            &user,
            &json!({ "service_id": service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already added"));

    // Detail view assembles everything
    let (detail, status) = app.get_auth(&format!("/api/v1/events/{event_id}"), &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["sub_events"].as_array().unwrap().len(), 1);
    assert_eq!(detail["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(detail["vendors"].as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn events_are_owner_scoped() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let other = app.user_token("other@test.com").await;

    let (event, _) = app
        .post_auth("/api/v1/events", &user, &json!({ "name": "Private" }))
        .await;
    let event_id = event["id"].as_str().unwrap();

    let (_, status) = app.get_auth(&format!("/api/v1/events/{event_id}"), &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app.delete_auth(&format!("/api/v1/events/{event_id}"), &other).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Bookings ────────────────────────────────────────────────────

#[tokio::test]
async fn booking_lifecycle_and_permissions() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let service = app.create_service(&vendor, "Venue").await;
    let service_id = service["id"].as_str().unwrap();

    let (booking, status) = app
        .post_auth(
            "/api/v1/bookings",
            &user,
            &json!({ "service_id": service_id, "event_date": "2026-12-01T10:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "pending");
    let booking_id = booking["id"].as_str().unwrap();

    // The vendor sees it on their side
    let (list, _) = app.get_auth("/api/v1/bookings", &vendor).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // The user may not confirm their own booking
    let (_, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &user,
            &json!({ "status": "confirmed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown status values are rejected outright
    let (_, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &vendor,
            &json!({ "status": "postponed" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Vendor confirms, then completes
    let (body, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &vendor,
            &json!({ "status": "confirmed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &vendor,
            &json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // A completed booking is terminal
    let (_, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &vendor,
            &json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

#[tokio::test]
async fn user_can_cancel_pending_booking() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let service = app.create_service(&vendor, "Venue").await;
    let service_id = service["id"].as_str().unwrap();

    let (booking, _) = app
        .post_auth(
            "/api/v1/bookings",
            &user,
            &json!({ "service_id": service_id, "event_date": "2026-12-01T10:00:00Z" }),
        )
        .await;
    let booking_id = booking["id"].as_str().unwrap();

    let (body, status) = app
        .put_auth(
            &format!("/api/v1/bookings/{booking_id}/status"),
            &user,
            &json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    common::cleanup(app).await;
}

// ── Plans & subscriptions ───────────────────────────────────────

#[tokio::test]
async fn plan_management_is_admin_only() {
    let app = common::spawn_app().await;
    let admin = app.admin_token("admin@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let (_, status) = app
        .post_auth(
            "/api/v1/plans",
            &vendor,
            &json!({ "name": "Gold", "price": 999.0, "duration_days": 30 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (plan, status) = app
        .post_auth(
            "/api/v1/plans",
            &admin,
            &json!({ "name": "Gold", "price": 999.0, "duration_days": 30 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let plan_id = plan["id"].as_str().unwrap();

    // Public listing
    let (body, status) = app.get("/api/v1/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Vendor subscribes
    let (sub, status) = app
        .post_auth("/api/v1/subscriptions", &vendor, &json!({ "plan_id": plan_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sub["status"], "active");
    let sub_id = sub["id"].as_str().unwrap();

    let (mine, _) = app.get_auth("/api/v1/subscriptions", &vendor).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    // Cancel, then cancelling again fails
    let (_, status) = app
        .post_auth(&format!("/api/v1/subscriptions/{sub_id}/cancel"), &vendor, &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app
        .post_auth(&format!("/api/v1/subscriptions/{sub_id}/cancel"), &vendor, &json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Payments ────────────────────────────────────────────────────

#[tokio::test]
async fn payment_settles_exactly_once() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let vendor = app.vendor_token("vendor@test.com").await;

    let service = app.create_service(&vendor, "Venue").await;
    let service_id = service["id"].as_str().unwrap();
    let (booking, _) = app
        .post_auth(
            "/api/v1/bookings",
            &user,
            &json!({ "service_id": service_id, "event_date": "2026-12-01T10:00:00Z" }),
        )
        .await;
    let booking_id = booking["id"].as_str().unwrap();

    // Must reference exactly one target
    let (_, status) = app
        .post_auth(
            "/api/v1/payments",
            &user,
            &json!({ "amount": 25000.0, "provider": "razorpay" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (payment, status) = app
        .post_auth(
            "/api/v1/payments",
            &user,
            &json!({ "booking_id": booking_id, "amount": 25000.0, "provider": "razorpay" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payment["status"], "created");
    let payment_id = payment["id"].as_str().unwrap();

    let (settled, status) = app
        .post_auth(
            &format!("/api/v1/payments/{payment_id}/settle"),
            &user,
            &json!({ "status": "succeeded", "provider_ref": "pay_123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settled["status"], "succeeded");

    // Double settle is a conflict
    let (_, status) = app
        .post_auth(
            &format!("/api/v1/payments/{payment_id}/settle"),
            &user,
            &json!({ "status": "failed" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Another user cannot read it
    let other = app.user_token("other@test.com").await;
    let (_, status) = app.get_auth(&format!("/api/v1/payments/{payment_id}"), &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

// ── Invitation templates ────────────────────────────────────────

#[tokio::test]
async fn invitation_templates_admin_crud_public_read() {
    let app = common::spawn_app().await;
    let admin = app.admin_token("admin@test.com").await;
    let user = app.user_token("user@test.com").await;

    let (_, status) = app
        .post_auth(
            "/api/v1/invitation-templates",
            &user,
            &json!({ "name": "Floral", "category": "wedding", "body": "<html></html>" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (template, status) = app
        .post_auth(
            "/api/v1/invitation-templates",
            &admin,
            &json!({ "name": "Floral", "category": "Wedding", "body": "<html></html>" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = template["id"].as_str().unwrap();

    let (body, status) = app.get("/api/v1/invitation-templates?category=wedding").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (body, status) = app.get(&format!("/api/v1/invitation-templates/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Floral");

    let (_, status) = app
        .delete_auth(&format!("/api/v1/invitation-templates/{id}"), &admin)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

// ── Partner applications ────────────────────────────────────────

#[tokio::test]
async fn partner_application_review_flow() {
    let app = common::spawn_app().await;
    let admin = app.admin_token("admin@test.com").await;
    let user = app.user_token("user@test.com").await;

    // Anonymous submission
    let (application, status) = app
        .post(
            "/api/v1/partners",
            &json!({
                "name": "Decor Co",
                "email": "owner@decor.co",
                "phone_number": "9876543210",
                "work_sample_urls": ["https://cdn.example.com/a.jpg"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(application["status"], "pending");
    let id = application["id"].as_str().unwrap();

    // Review is admin-only
    let (_, status) = app.get_auth("/api/v1/partners", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (list, status) = app.get_auth("/api/v1/partners?status=pending", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, status) = app
        .patch_auth(
            &format!("/api/v1/partners/{id}/status"),
            &admin,
            &json!({ "status": "shortlisted" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (updated, status) = app
        .patch_auth(
            &format!("/api/v1/partners/{id}/status"),
            &admin,
            &json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "approved");

    common::cleanup(app).await;
}

// ── Editor assets ───────────────────────────────────────────────

#[tokio::test]
async fn editor_assets_are_account_scoped() {
    let app = common::spawn_app().await;
    let user = app.user_token("user@test.com").await;
    let other = app.user_token("other@test.com").await;

    let (saved, status) = app
        .post_auth(
            "/api/v1/editor/assets",
            &user,
            &json!({ "urls": ["https://cdn.example.com/1.png", "https://cdn.example.com/2.png"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved.as_array().unwrap().len(), 2);
    let asset_id = saved[0]["id"].as_str().unwrap();

    let (mine, _) = app.get_auth("/api/v1/editor/assets", &user).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);

    // Another account sees nothing and cannot delete
    let (theirs, _) = app.get_auth("/api/v1/editor/assets", &other).await;
    assert_eq!(theirs.as_array().unwrap().len(), 0);
    let (_, status) = app
        .delete_auth(&format!("/api/v1/editor/assets/{asset_id}"), &other)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app
        .delete_auth(&format!("/api/v1/editor/assets/{asset_id}"), &user)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

pub mod admin;
pub mod assets;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod invitations;
pub mod partners;
pub mod payments;
pub mod services;
pub mod subscriptions;
pub mod vendors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post, put};

use crate::middleware::guard;
use crate::state::SharedState;

/// Route table. Role allow-lists are attached here, per route or per group;
/// gated methods never reach a handler for a caller outside the list.
pub fn api_routes(state: SharedState) -> Router<SharedState> {
    let authed = || from_fn_with_state(state.clone(), guard::require_auth);
    let user = || from_fn_with_state(state.clone(), guard::require_user);
    let vendor = || from_fn_with_state(state.clone(), guard::require_vendor);
    let admin = || from_fn_with_state(state.clone(), guard::require_admin);

    let events = Router::new()
        .route("/api/v1/events", get(events::list).post(events::create))
        .route(
            "/api/v1/events/{id}",
            get(events::get).put(events::update).delete(events::delete),
        )
        .route("/api/v1/events/{id}/sub-events", post(events::create_sub_event))
        .route(
            "/api/v1/sub-events/{id}",
            put(events::update_sub_event).delete(events::delete_sub_event),
        )
        .route("/api/v1/events/{id}/tasks", post(events::create_task))
        .route(
            "/api/v1/tasks/{id}",
            put(events::update_task).delete(events::delete_task),
        )
        .route("/api/v1/events/{id}/vendors", post(events::add_vendor))
        .route(
            "/api/v1/events/{id}/vendors/{service_id}",
            delete(events::remove_vendor),
        )
        .route_layer(user());

    let admin_area = Router::new()
        .route("/api/v1/admin/accounts", get(admin::list_accounts))
        .route("/api/v1/admin/accounts/{id}", delete(admin::delete_account))
        .route("/api/v1/admin/accounts/{id}/role", put(admin::update_role))
        .route("/api/v1/partners/{id}", get(partners::get))
        .route("/api/v1/partners/{id}/status", patch(partners::update_status))
        .route_layer(admin());

    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/register-vendor", post(auth::register_vendor))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        .route("/api/v1/auth/verify-email", post(auth::verify_email))
        .route(
            "/api/v1/auth/resend-verification",
            post(auth::resend_verification).layer(authed()),
        )
        .route(
            "/api/v1/auth/change-password",
            post(auth::change_password).layer(authed()),
        )
        // Vendors
        .route("/api/v1/vendors", get(vendors::list))
        .route(
            "/api/v1/vendors/me",
            get(vendors::me).put(vendors::update_me).layer(vendor()),
        )
        .route(
            "/api/v1/vendors/me/services",
            get(services::list_mine).layer(vendor()),
        )
        .route("/api/v1/vendors/{id}", get(vendors::get))
        // Services
        .route(
            "/api/v1/services",
            get(services::list).merge(post(services::create).layer(vendor())),
        )
        .route(
            "/api/v1/services/{id}",
            get(services::get).merge(
                put(services::update)
                    .delete(services::delete)
                    .layer(vendor()),
            ),
        )
        .route(
            "/api/v1/services/{id}/feedback",
            get(services::list_feedback).merge(post(services::add_feedback).layer(user())),
        )
        // Bookings
        .route(
            "/api/v1/bookings",
            get(bookings::list)
                .layer(authed())
                .merge(post(bookings::create).layer(user())),
        )
        .route("/api/v1/bookings/{id}", get(bookings::get).layer(authed()))
        .route(
            "/api/v1/bookings/{id}/status",
            put(bookings::update_status).layer(authed()),
        )
        // Subscription plans
        .route(
            "/api/v1/plans",
            get(subscriptions::list_plans).merge(post(subscriptions::create_plan).layer(admin())),
        )
        .route(
            "/api/v1/plans/{id}",
            put(subscriptions::update_plan)
                .delete(subscriptions::delete_plan)
                .layer(admin()),
        )
        // Subscriptions
        .route(
            "/api/v1/subscriptions",
            get(subscriptions::list_mine)
                .post(subscriptions::subscribe)
                .layer(vendor()),
        )
        .route(
            "/api/v1/subscriptions/{id}/cancel",
            post(subscriptions::cancel).layer(vendor()),
        )
        // Payments
        .route(
            "/api/v1/payments",
            get(payments::list).post(payments::create).layer(authed()),
        )
        .route("/api/v1/payments/{id}", get(payments::get).layer(authed()))
        .route(
            "/api/v1/payments/{id}/settle",
            post(payments::settle).layer(authed()),
        )
        // Invitation templates
        .route(
            "/api/v1/invitation-templates",
            get(invitations::list).merge(post(invitations::create).layer(admin())),
        )
        .route(
            "/api/v1/invitation-templates/{id}",
            get(invitations::get).merge(
                put(invitations::update)
                    .delete(invitations::delete)
                    .layer(admin()),
            ),
        )
        // Partner applications (admin review routes live in admin_area)
        .route(
            "/api/v1/partners",
            post(partners::create).merge(get(partners::list).layer(admin())),
        )
        // Editor assets
        .route(
            "/api/v1/editor/assets",
            get(assets::list).post(assets::save).layer(authed()),
        )
        .route(
            "/api/v1/editor/assets/{id}",
            delete(assets::delete).layer(authed()),
        )
        .merge(events)
        .merge(admin_area)
}

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use mol_core::health::{healthz, readyz};
use mol_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    accounts::{
        account_status, change_password, login, logout, register, reset_password,
        send_password_reset_email, send_verification_email, verify_account,
    },
    admin::{get_user, list_users, set_user_active, set_user_password, user_statistics},
    blog::{create_post, delete_post, get_post, list_posts, update_post},
    contact::submit_contact,
    courses::{create_course, delete_course, get_course, list_courses, update_course},
    newsletter::{subscribe, verify_subscription},
    profile::{get_profile, update_profile},
    team::{
        create_team_member, delete_team_member, get_team_member, list_team, update_team_member,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/api/accounts/auth/register/", post(register))
        .route("/api/accounts/auth/token/", post(login))
        .route("/api/accounts/auth/logout/", post(logout))
        .route("/api/accounts/account-status/", get(account_status))
        .route(
            "/api/accounts/send-verification-email/",
            post(send_verification_email),
        )
        .route("/api/accounts/verify/{token}/", post(verify_account))
        .route(
            "/api/accounts/send-password-reset-email/",
            post(send_password_reset_email),
        )
        .route("/api/accounts/reset-password/{token}/", post(reset_password))
        .route("/api/accounts/user/change-password/", put(change_password))
        // Profile
        .route(
            "/api/user-profile/user/profile/",
            get(get_profile).put(update_profile),
        )
        // Newsletter
        .route("/api/newsletter/register/", post(subscribe))
        .route(
            "/api/newsletter/verify/{token}/",
            get(verify_subscription).post(verify_subscription),
        )
        // Contact
        .route("/api/contact/general/", post(submit_contact))
        // Courses
        .route("/api/course/", get(list_courses))
        .route("/api/course/create/", post(create_course))
        .route("/api/course/{id}/", get(get_course))
        .route("/api/course/{id}/update/", put(update_course))
        .route("/api/course/{id}/delete/", delete(delete_course))
        // Team
        .route("/api/team/", get(list_team))
        .route("/api/team/create/", post(create_team_member))
        .route("/api/team/{id}/", get(get_team_member))
        .route("/api/team/{id}/update/", put(update_team_member))
        .route("/api/team/{id}/delete/", delete(delete_team_member))
        // Blog
        .route("/api/blog/", get(list_posts))
        .route("/api/blog/create/", post(create_post))
        .route("/api/blog/{id}/", get(get_post))
        .route("/api/blog/{id}/update/", put(update_post))
        .route("/api/blog/{id}/delete/", delete(delete_post))
        // Admin
        .route("/api/admin/users/", get(list_users))
        .route("/api/admin/users/statistics/", get(user_statistics))
        .route("/api/admin/users/get/", get(get_user))
        .route("/api/admin/users/{id}/block/", put(set_user_active))
        .route("/api/admin/users/{id}/password/", put(set_user_password))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

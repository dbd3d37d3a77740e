use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::{
    protocol::{looks_like_email, ContactRequest, DemoRequest, NewsletterRequest},
    ContactMessage, DemoBooking, NewsletterSignup,
};
use tracing::info;

use crate::auth::require_admin;
use crate::error::{bad_request, internal, ApiError};
use crate::state::AppState;

fn check_email(email: &str) -> Result<(), ApiError> {
    if looks_like_email(email) {
        Ok(())
    } else {
        Err(bad_request(format!("Invalid email address: {}", email)))
    }
}

pub async fn post_newsletter(
    State(state): State<AppState>,
    Json(payload): Json<NewsletterRequest>,
) -> Result<(StatusCode, Json<NewsletterSignup>), ApiError> {
    check_email(&payload.email)?;
    let signup = state
        .db
        .add_newsletter_signup(&payload.email)
        .await
        .map_err(internal)?;
    info!("Newsletter signup {}", signup.id);
    Ok((StatusCode::CREATED, Json(signup)))
}

pub async fn list_newsletter(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<NewsletterSignup>>, ApiError> {
    require_admin(&headers, &state.admin_token)?;
    Ok(Json(state.db.list_newsletter_signups().await.map_err(internal)?))
}

pub async fn post_demo(
    State(state): State<AppState>,
    Json(payload): Json<DemoRequest>,
) -> Result<(StatusCode, Json<DemoBooking>), ApiError> {
    check_email(&payload.email)?;
    let booking = state.db.add_demo_booking(&payload).await.map_err(internal)?;
    info!("Demo booking {}", booking.id);
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list_demos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<DemoBooking>>, ApiError> {
    require_admin(&headers, &state.admin_token)?;
    Ok(Json(state.db.list_demo_bookings().await.map_err(internal)?))
}

pub async fn post_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    check_email(&payload.email)?;
    let message = state
        .db
        .add_contact_message(&payload)
        .await
        .map_err(internal)?;
    info!("Contact message {}", message.id);
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    require_admin(&headers, &state.admin_token)?;
    Ok(Json(state.db.list_contact_messages().await.map_err(internal)?))
}

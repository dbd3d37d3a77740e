use axum::http::StatusCode;
use domain::DomainError;

pub type ApiError = (StatusCode, String);

pub fn internal(e: anyhow::Error) -> ApiError {
    tracing::error!("Request failed: {:?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
}

/// Domain rule violations surface as 400, anything else as 500.
pub fn from_storage(e: anyhow::Error) -> ApiError {
    match e.downcast_ref::<DomainError>() {
        Some(domain_err) => (StatusCode::BAD_REQUEST, domain_err.to_string()),
        None => internal(e),
    }
}

pub fn bad_request(e: impl ToString) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

pub fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

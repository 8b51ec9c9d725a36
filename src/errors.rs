use crate::models::booking::BookingStatus;

/// Failure taxonomy shared by the pricing, lifecycle and storage layers.
/// Route handlers match on the variant to pick an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    NotFound(&'static str),
    StorageUnavailable(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "Invalid status transition: {} -> {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            ApiError::NotFound(kind) => write!(f, "{} not found", kind),
            ApiError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Map the failure onto the HTTP layer: validation -> 400, rejected
    /// transition -> 409, missing record -> 404, storage trouble -> 503.
    pub fn to_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            ApiError::Validation(_) => HttpResponse::BadRequest().json(body),
            ApiError::InvalidTransition { .. } => HttpResponse::Conflict().json(body),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(body),
            ApiError::StorageUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        }
    }
}

use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{Error as ErrorBody, ErrorCode, ValidationError};
use thiserror::Error;

/// Operator-facing configuration problems. While one is present no store
/// operation is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("DATABASE_URL is invalid: {0}")]
    InvalidDatabaseUrl(String),
    #[error("Invalid item configuration: {0}")]
    InvalidItems(#[from] ValidationError),
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Vote store unreachable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    Query(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ValidationError),
    #[error("Vote store lock poisoned")]
    LockFailed,
}

// Postgres `query_canceled`, raised when statement_timeout expires.
const QUERY_CANCELED: &str = "57014";

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let unavailable = match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => true,
            sqlx::Error::Database(db) => db.code().as_deref() == Some(QUERY_CANCELED),
            _ => false,
        };

        if unavailable {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Query(e.to_string())
        }
    }
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Config(e) => ErrorBody::with_details(
                ErrorCode::Configuration,
                "The poll is not configured",
                e.to_string(),
            ),
            ApiError::Store(StoreError::UnknownItem(id)) => ErrorBody::new(
                ErrorCode::NotFound,
                format!("No vote counter exists for item {id}"),
            ),
            ApiError::Store(StoreError::InvalidItem(e)) => ErrorBody::new(ErrorCode::InvalidInput, e.to_string()),
            ApiError::Store(e @ (StoreError::Unavailable(_) | StoreError::LockFailed)) => ErrorBody::with_details(
                ErrorCode::StoreUnavailable,
                "The vote store is currently unreachable",
                e.to_string(),
            ),
            ApiError::Store(e @ StoreError::Query(_)) => ErrorBody::with_details(
                ErrorCode::SystemError,
                "The vote store rejected the request",
                e.to_string(),
            ),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let body = self.body();
        let status = Status::from_code(body.code.status()).unwrap_or(Status::InternalServerError);

        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}

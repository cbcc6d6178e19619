use axum::http::StatusCode;
use thiserror::Error;

pub const FETCH_UNREACHABLE: &str = "Failed to fetch data from the server.";
pub const SAVE_UNREACHABLE: &str = "Failed to save data. Please check your connection.";
pub const LOAD_REJECTED_DEFAULT: &str = "Error loading data from the record store.";
pub const SAVE_REJECTED_DEFAULT: &str = "Failed to update record.";

/// Failures talking to the record store. The display text is what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport, status or decoding failure; the store never answered usefully.
    #[error("{0}")]
    Unreachable(&'static str),
    /// The store answered and refused the request.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("No teacher is selected.")]
    NoSelection,
    #[error("Choose a different centre before saving.")]
    NothingToSave,
    #[error("That centre has no slots available for this teacher.")]
    IneligibleCentre,
    #[error("A save is already in progress.")]
    SaveInFlight,
    #[error("The roster is still loading.")]
    LoadInFlight,
    #[error("The portal is closed. Centre assignments can no longer be changed.")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STORE_URL must be set to the record store endpoint")]
    MissingStoreUrl,
    #[error("PORTAL_CLOSES_AT must be an RFC 3339 timestamp, got {value:?}")]
    InvalidCutoff {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        let status = match err {
            PortalError::NoSelection
            | PortalError::NothingToSave
            | PortalError::IneligibleCentre => StatusCode::BAD_REQUEST,
            PortalError::SaveInFlight | PortalError::LoadInFlight => StatusCode::CONFLICT,
            PortalError::Closed => StatusCode::FORBIDDEN,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

use salvo::Scribe;
use salvo::prelude::*;
use thiserror::Error;
use tracing::{debug, error};

use crate::db::DatabaseError;

/// Every way a request can fail, each mapped to one status and a short
/// plaintext body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid item ID")]
    InvalidId,
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Item not found")]
    NotFound,
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
    #[error("Service state unavailable")]
    StateMissing,
}

impl ApiError {
    pub fn storage(context: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| ApiError::Storage { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } | ApiError::StateMissing => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match &self {
            ApiError::Storage { context, source } => error!("{}: {}", context, source),
            ApiError::StateMissing => error!("web state is not injected into the depot"),
            ApiError::InvalidBody(detail) => debug!("rejected request body: {}", detail),
            _ => {}
        }
        res.status_code(self.status_code());
        res.render(Text::Plain(self.to_string()));
    }
}

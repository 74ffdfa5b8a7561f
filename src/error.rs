//! Error types for the roster and the HTTP service.
//!
//! The settlement engine itself never fails: it is total over well-formed
//! input. Errors only arise when maintaining couple links or loading
//! configuration.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::schemas::PersonId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} cannot be linked to themselves")]
    SelfLink(PersonId),

    #[error("{id} is already linked to {partner}")]
    AlreadyLinked { id: PersonId, partner: PersonId },

    #[error("no participant with id {0}")]
    UnknownPerson(PersonId),

    #[error("{id} points at {partner} but the link is not reciprocated")]
    AsymmetricLink { id: PersonId, partner: PersonId },

    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl Error {
    fn code(&self) -> &'static str {
        match self {
            Error::SelfLink(_) => "SELF_LINK",
            Error::AlreadyLinked { .. } => "ALREADY_LINKED",
            Error::UnknownPerson(_) => "UNKNOWN_PERSON",
            Error::AsymmetricLink { .. } => "ASYMMETRIC_LINK",
            Error::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}

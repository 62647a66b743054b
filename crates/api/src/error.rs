use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Notification run failed. Error message: `{0}`")]
    NotificationRunFailed(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl NotifierError {
    /// The message exposed to the caller. Details only go to the logs.
    fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "Unauthorized",
            Self::NotificationRunFailed(_) => "Failed to process notifications",
        }
    }
}

impl actix_web::error::ResponseError for NotifierError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotificationRunFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Rejections, answered with a plain-text body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Username is already taken!")]
    UsernameTaken,

    #[error("Invalid username or password!")]
    InvalidCredentials,

    /// Missing todos and other users' todos look the same.
    #[error("Not allowed to {0} this todo!")]
    Forbidden(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UsernameTaken | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        (status, self.to_string()).into_response()
    }
}

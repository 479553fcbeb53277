use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Failures of the HTTP gateway that are not part of the normal form flow.
///
/// Missing uploads and unknown downloads are answered with a page or a text
/// body instead, so they have no variant here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid upload: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        log::error!("{self}");

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let response = Error::BadRequest("broken multipart".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_io_error_status() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let response = Error::from(io).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

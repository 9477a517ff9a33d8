//! JSON responses and the mapping of failures to HTTP status codes.

use clubchain_sui::{
    wallet_error::{friendly_error, WalletErrorKind},
    Error,
};
use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use serde_json::{json, Value};
use tracing::error;

/// Response body type of the gateway.
pub(crate) type Body = Full<Bytes>;

/// A request that could not be served.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),
    /// Caller lacks the required badge.
    #[error("{0}")]
    Forbidden(String),
    /// Route or object does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Chain or configuration failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code of the error.
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{ "error": "<message>" }` response.
    pub(crate) fn into_response(self) -> Response<Body> {
        json_response(self.status(), &json!({ "error": self.to_string() }))
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ObjectNotFound(id) => Self::NotFound(format!("Object `{id}` not found")),
            err @ Error::InvalidArgument { .. } => Self::BadRequest(err.to_string()),
            Error::Rpc { ref message, .. }
                if WalletErrorKind::classify(message) != WalletErrorKind::Other =>
            {
                Self::BadRequest(friendly_error(message))
            },
            err => {
                error!(%err, "request failed");
                Self::Internal(err.to_string())
            },
        }
    }
}

/// JSON response with `status`.
pub(crate) fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// 200 with a JSON body.
pub(crate) fn ok(body: &Value) -> Response<Body> {
    json_response(StatusCode::OK, body)
}

/// 404 for unknown routes.
pub(crate) fn not_found() -> Response<Body> {
    ApiError::NotFound("Not Found".to_string()).into_response()
}

use axum::{response::IntoResponse, http::{StatusCode, header}};

#[derive(Debug, thiserror::Error)]
pub enum GitviewError {
    #[error("template error: {0}")]
    LiquidError(#[from] liquid::Error),
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("upstream returned {0}")]
    UpstreamStatus(StatusCode),
    #[error("not found")]
    NotFound,
    #[error("redirect to: {0}")]
    Redirect(String),
    #[error("missing config")]
    MissingConfig,
    #[error("io error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("toml parser error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl IntoResponse for GitviewError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{}", self);
        let (status, body) = match self {
            GitviewError::LiquidError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "templating error"),
            GitviewError::RequestError(_) => (StatusCode::BAD_GATEWAY, "upstream error"),
            GitviewError::UpstreamStatus(_) => (StatusCode::BAD_GATEWAY, "upstream error"),
            GitviewError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            GitviewError::Redirect(target) => {
                return (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, target)]).into_response();
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        };
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GitviewError>;

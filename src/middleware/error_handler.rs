use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, Error, HttpRequest,
};

use crate::core::AppError;

/// Renders malformed JSON bodies in the service's error format
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), "Rejected JSON body: {}", err);
    AppError::invalid_argument(format!("Invalid request body: {}", err)).into()
}

/// Renders malformed query strings in the service's error format
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), "Rejected query string: {}", err);
    AppError::invalid_argument(format!("Invalid query string: {}", err)).into()
}

/// Extractor configs wired to the handlers above
pub fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

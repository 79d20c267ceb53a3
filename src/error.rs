//! Error taxonomy and the handler-to-envelope bridge.
//!
//! Three kinds of failure reach the boundary:
//!
//! - [`AppError::Domain`]: expected business-rule violation carrying an
//!   explicit [`ResultCode`], raised at the violation point
//! - [`AppError::Validation`]: field-level request validation failures,
//!   carried as message keys and joined with commas after localization
//! - [`AppError::Unmapped`]: anything a handler did not anticipate; mapped
//!   through the route's declared fallback code when one exists, otherwise
//!   the process-wide default `ResultCode::Error`
//!
//! `AppError::into_response` logs the failure, renders a default-message
//! envelope and stashes a [`Failure`] in the response extensions. The
//! boundary middleware in `api` picks the `Failure` up and re-renders the
//! body with the message localized for the request's locale. Nothing ever
//! propagates to the transport layer as a raw fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::codes::ResultCode;
use crate::i18n::{Locale, MessageCatalog};
use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// Business-rule violation with an explicit result code.
    #[error("{}", .code.default_message())]
    Domain { code: ResultCode },

    /// Request validation failure; entries are message-catalog keys.
    #[error("validation failed: {}", .errors.join(","))]
    Validation { errors: Vec<String> },

    /// Unanticipated error escaping a handler.
    #[error("unhandled error: {cause}")]
    Unmapped {
        cause: anyhow::Error,
        fallback: Option<ResultCode>,
    },
}

impl AppError {
    pub fn domain(code: ResultCode) -> Self {
        Self::Domain { code }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn unmapped(cause: anyhow::Error) -> Self {
        Self::Unmapped {
            cause,
            fallback: None,
        }
    }

    /// Unanticipated error with an explicit fallback code, for call sites
    /// that want to pin the envelope code without a route declaration.
    pub fn unmapped_with(code: ResultCode, cause: anyhow::Error) -> Self {
        Self::Unmapped {
            cause,
            fallback: Some(code),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(cause: anyhow::Error) -> Self {
        Self::unmapped(cause)
    }
}

/// What failed, stripped down to the data the boundary middleware needs to
/// build the localized envelope. Stored in response extensions, so it must
/// stay cheap to clone.
#[derive(Debug, Clone)]
pub enum Failure {
    Domain { code: ResultCode },
    Validation { errors: Vec<String> },
    Unmapped { fallback: Option<ResultCode> },
}

impl Failure {
    /// Envelope code and localized message for this failure.
    ///
    /// Branches in handler-specificity order: domain first, then
    /// validation, then the catch-all; exactly one fires. Validation keys
    /// unknown to the catalog fall back to the raw key so the joined
    /// message never loses an entry.
    pub fn render(&self, catalog: &MessageCatalog, locale: &Locale) -> (i32, String) {
        match self {
            Failure::Domain { code } => (code.code(), catalog.resolve_code(*code, locale)),
            Failure::Validation { errors } => {
                let joined = errors
                    .iter()
                    .map(|key| {
                        catalog
                            .resolve(key, locale, &[])
                            .unwrap_or_else(|_| key.clone())
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                (ResultCode::Error.code(), joined)
            }
            Failure::Unmapped { fallback } => {
                let code = fallback.unwrap_or(ResultCode::Error);
                (code.code(), catalog.resolve_code(code, locale))
            }
        }
    }

    /// Catalog-free rendering with default messages. Only used as the body
    /// seed in `into_response`; the middleware replaces it.
    fn render_default(&self) -> (i32, String) {
        match self {
            Failure::Domain { code } => (code.code(), code.default_message().to_string()),
            Failure::Validation { errors } => (ResultCode::Error.code(), errors.join(",")),
            Failure::Unmapped { fallback } => {
                let code = fallback.unwrap_or(ResultCode::Error);
                (code.code(), code.default_message().to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let failure = match self {
            AppError::Domain { code } => {
                warn!(
                    "domain error: {} ({})",
                    code.default_message(),
                    code.code()
                );
                Failure::Domain { code }
            }
            AppError::Validation { errors } => {
                info!("request validation failed: {}", errors.join(","));
                Failure::Validation { errors }
            }
            AppError::Unmapped { cause, fallback } => {
                error!("unhandled handler error: {:#}", cause);
                Failure::Unmapped { fallback }
            }
        };

        let (code, message) = failure.render_default();
        let mut response =
            (StatusCode::OK, Json(ApiResponse::<()>::error(code, message))).into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::builtin(Locale::new("en"))
    }

    #[test]
    fn test_render_domain_default_locale() {
        let failure = Failure::Domain {
            code: ResultCode::BusinessException,
        };
        let (code, message) = failure.render(&catalog(), &Locale::new("en"));
        assert_eq!(code, 502);
        assert_eq!(message, "business exception");
    }

    #[test]
    fn test_render_domain_localized() {
        let failure = Failure::Domain {
            code: ResultCode::BusinessException,
        };
        let (code, message) = failure.render(&catalog(), &Locale::new("es"));
        assert_eq!(code, 502);
        assert_eq!(message, "excepción de negocio");
    }

    #[test]
    fn test_render_validation_joins_with_commas() {
        let failure = Failure::Validation {
            errors: vec![
                "username_not_empty".to_string(),
                "password_not_empty".to_string(),
            ],
        };
        let (code, message) = failure.render(&catalog(), &Locale::new("en"));
        assert_eq!(code, 500);
        assert_eq!(
            message,
            "username must not be empty,password must not be empty"
        );
    }

    #[test]
    fn test_render_validation_unknown_key_keeps_raw_key() {
        let failure = Failure::Validation {
            errors: vec!["mystery_key".to_string()],
        };
        let (_, message) = failure.render(&catalog(), &Locale::new("en"));
        assert_eq!(message, "mystery_key");
    }

    #[test]
    fn test_render_unmapped_uses_declared_fallback() {
        let failure = Failure::Unmapped {
            fallback: Some(ResultCode::BusinessException),
        };
        let (code, message) = failure.render(&catalog(), &Locale::new("en"));
        assert_eq!(code, 502);
        assert_eq!(message, "business exception");
    }

    #[test]
    fn test_render_unmapped_without_declaration_uses_process_default() {
        let failure = Failure::Unmapped { fallback: None };
        let (code, message) = failure.render(&catalog(), &Locale::new("en"));
        assert_eq!(code, 500);
        assert_eq!(message, "error");
    }

    #[test]
    fn test_anyhow_errors_become_unmapped() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(
            err,
            AppError::Unmapped { fallback: None, .. }
        ));
    }

    #[test]
    fn test_into_response_stashes_failure_and_keeps_status_200() {
        let response = AppError::domain(ResultCode::BusinessException).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(matches!(
            response.extensions().get::<Failure>(),
            Some(Failure::Domain {
                code: ResultCode::BusinessException
            })
        ));
    }
}

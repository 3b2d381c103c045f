//! Shared HTTP plumbing for the source adapters.

use std::time::Duration;
use vte_application::SourceError;
use vte_domain::truncate;

const MAX_ERROR_BODY: usize = 300;

const USER_AGENT: &str = concat!("vte/", env!("CARGO_PKG_VERSION"));

/// One client shared by every source, with a per-request timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SourceError::RequestFailed(e.to_string()))
}

pub(crate) fn request_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::RequestFailed(format!("timed out: {}", e))
    } else {
        SourceError::RequestFailed(e.to_string())
    }
}

/// Map a non-2xx status. 403 and 400 get their own variants.
pub(crate) fn status_error(status: u16, body: &str) -> SourceError {
    let message = truncate(body.trim(), MAX_ERROR_BODY);
    match status {
        403 => SourceError::Forbidden(message),
        400 => SourceError::BadRequest(message),
        _ => SourceError::Status { status, message },
    }
}

/// Read the body, failing on non-2xx statuses.
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, SourceError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(request_error)?;
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(status_error(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_variants() {
        assert!(matches!(status_error(403, "bad key"), SourceError::Forbidden(m) if m == "bad key"));
        assert!(matches!(status_error(400, "bad q"), SourceError::BadRequest(_)));
        assert!(matches!(
            status_error(503, "down"),
            SourceError::Status { status: 503, .. }
        ));
    }

    #[test]
    fn test_status_error_truncates_long_bodies() {
        let body = "x".repeat(1000);
        match status_error(500, &body) {
            SourceError::Status { message, .. } => {
                assert_eq!(message.len(), MAX_ERROR_BODY);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug)]
pub enum AiError {
    /// Quota exhausted, either via HTTP 429 or a RESOURCE_EXHAUSTED payload.
    RateLimited,
    /// The service rejected the request for any other reason.
    Api(StatusCode, String),
    /// Transport-level failure.
    Http(reqwest::Error),
    /// The service answered 200 but produced no usable content.
    EmptyResponse,
}

impl From<reqwest::Error> for AiError {
    fn from(value: reqwest::Error) -> Self {
        AiError::Http(value)
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::RateLimited => write!(f, "Rate limited by the AI service"),
            AiError::Api(status, message) => write!(f, "({}) {}", status, message),
            AiError::Http(e) => write!(f, "HTTP error: {}", e),
            AiError::EmptyResponse => write!(f, "The AI service returned an empty response"),
        }
    }
}

impl std::error::Error for AiError {}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
    pub status: String,
}

/// Maps a non-success response onto the error enum. Quota errors surface
/// both as HTTP 429 and as a RESOURCE_EXHAUSTED status in the body, so
/// both are folded into `RateLimited`.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> AiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AiError::RateLimited;
    }
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) if parsed.error.status == "RESOURCE_EXHAUSTED" => AiError::RateLimited,
        Ok(parsed) => AiError::Api(status, parsed.error.message),
        Err(_) => AiError::Api(status, body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_is_rate_limited() {
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, AiError::RateLimited));
    }

    #[test]
    fn resource_exhausted_payload_is_rate_limited() {
        let body = r#"{
            "error": {
                "code": 429,
                "message": "Quota exceeded for requests per minute",
                "status": "RESOURCE_EXHAUSTED"
            }
        }"#;
        let err = classify_failure(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, AiError::RateLimited));
    }

    #[test]
    fn other_payloads_keep_status_and_message() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "Invalid argument",
                "status": "INVALID_ARGUMENT"
            }
        }"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        match err {
            AiError::Api(status, message) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid argument");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_raw_text() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
        match err {
            AiError::Api(status, message) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

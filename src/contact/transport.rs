use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gloo_net::http::Request;
use log::debug;
use serde::{Deserialize, Serialize};

use super::error::SubmissionError;

/// Body posted to the submission endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub service: String,
    pub budget: String,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Same shape as `Date.prototype.toISOString`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EndpointResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait(?Send)]
pub trait SubmissionTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<EndpointResponse, SubmissionError>;
}

/// Posts JSON to Web3Forms (or anything that answers the same way).
pub struct Web3FormsTransport {
    endpoint: String,
}

impl Web3FormsTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl SubmissionTransport for Web3FormsTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<EndpointResponse, SubmissionError> {
        debug!("Posting contact form to {}", self.endpoint);
        let response = Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|e| SubmissionError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<EndpointResponse>()
            .await
            .map_err(|e| e.to_string());
        interpret_response(status, body)
    }
}

/// A 2xx answer is handed back as-is so the caller can look at `success`.
pub fn interpret_response(
    status: u16,
    body: Result<EndpointResponse, String>,
) -> Result<EndpointResponse, SubmissionError> {
    if (200..300).contains(&status) {
        body.map_err(SubmissionError::Decode)
    } else {
        Err(SubmissionError::Http {
            status,
            message: body.ok().and_then(|b| b.message),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            access_key: "key".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            service: "web-app".to_string(),
            budget: "1000-2500".to_string(),
            message: "Please build me an engine".to_string(),
            timestamp: "2024-03-01T12:30:05.042Z".to_string(),
            subject: None,
        }
    }

    #[test]
    fn test_timestamp_matches_iso_string() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_timestamp(at), "2024-03-01T12:30:05.042Z");
    }

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(json["access_key"], "key");
        assert_eq!(json["service"], "web-app");
        assert_eq!(json["timestamp"], "2024-03-01T12:30:05.042Z");
        assert!(json.get("subject").is_none());

        let with_subject = SubmissionPayload {
            subject: Some("New lead".to_string()),
            ..payload()
        };
        assert_eq!(serde_json::to_value(with_subject).unwrap()["subject"], "New lead");
    }

    #[test]
    fn test_response_without_message() {
        let response: EndpointResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_interpret_ok_passes_body_through() {
        let rejected = EndpointResponse {
            success: false,
            message: Some("Invalid access key".to_string()),
        };
        assert_eq!(interpret_response(200, Ok(rejected.clone())), Ok(rejected));
    }

    #[test]
    fn test_interpret_undecodable_success_body() {
        assert_eq!(
            interpret_response(200, Err("expected value".to_string())),
            Err(SubmissionError::Decode("expected value".to_string()))
        );
    }

    #[test]
    fn test_interpret_http_error_keeps_endpoint_message() {
        let body = EndpointResponse {
            success: false,
            message: Some("Too many requests".to_string()),
        };
        assert_eq!(
            interpret_response(429, Ok(body)),
            Err(SubmissionError::Http {
                status: 429,
                message: Some("Too many requests".to_string()),
            })
        );
        assert_eq!(
            interpret_response(502, Err("html".to_string())),
            Err(SubmissionError::Http { status: 502, message: None })
        );
    }
}

//! Client for the campaign's remote API.
//!
//! Both endpoints answer with the same envelope: an optional list of
//! error codes and an optional data payload. Bodies are decoded whatever
//! the HTTP status is.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{Registration, Submission};

/// Base URL of the campaign API.
pub const DEFAULT_BASE_URL: &str = "https://ncp-dummy.staging.moonproject.io/api/mohacsi-akos";

const UPLOAD_ENDPOINT: &str = "code/upload";
const REGISTER_ENDPOINT: &str = "user/register";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRequest {
    pub email: String,
    pub code: String,
    pub purchase_time: String,
}

impl From<&Submission> for UploadRequest {
    fn from(submission: &Submission) -> Self {
        Self {
            email: submission.email.clone(),
            code: submission.code.clone(),
            purchase_time: submission.purchase_time(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
}

impl From<&Registration> for RegisterRequest {
    fn from(registration: &Registration) -> Self {
        Self {
            email: registration.email.clone(),
            name: registration.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorItem {
    pub code: String,
}

/// Response envelope shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse<T> {
    pub errors: Option<Vec<ApiErrorItem>>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(data: T) -> Self {
        Self { errors: None, data: Some(data) }
    }

    pub fn with_errors<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            errors: Some(codes.into_iter().map(|code| ApiErrorItem { code: code.into() }).collect()),
            data: None,
        }
    }

    pub fn has_error(&self, code: &str) -> bool {
        self.errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|error| error.code == code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegisterData {
    #[serde(default)]
    pub success: bool,
}

/// Transport and decoding failures. The UI treats them alike.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("cannot parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two calls the form makes against the campaign API.
pub trait PromoApi {
    fn upload_code(&self, request: &UploadRequest) -> Result<ApiResponse<UploadData>, ApiError>;
    fn register_user(&self, request: &RegisterRequest) -> Result<ApiResponse<RegisterData>, ApiError>;
}

/// Blocking HTTP implementation of [`PromoApi`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.endpoint_url(endpoint);
        tracing::info!(url = %url, "sending request");

        let response = self.http.post(&url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;
        tracing::debug!(url = %url, status = %status, body = %text, "received response");

        decode_response(&text)
    }
}

impl Default for HttpApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PromoApi for HttpApiClient {
    fn upload_code(&self, request: &UploadRequest) -> Result<ApiResponse<UploadData>, ApiError> {
        self.post_json(UPLOAD_ENDPOINT, request)
    }

    fn register_user(&self, request: &RegisterRequest) -> Result<ApiResponse<RegisterData>, ApiError> {
        self.post_json(REGISTER_ENDPOINT, request)
    }
}

/// Decodes a response body into the shared envelope.
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ApiError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_upload_request_body() {
        let submission = Submission {
            email: "a@example.com".to_string(),
            code: "ABCD1234".to_string(),
            purchase_day: NaiveDate::from_ymd_opt(2022, 8, 2).unwrap(),
            purchase_hour: 14,
            purchase_minute: 7,
        };

        let body = serde_json::to_value(UploadRequest::from(&submission)).unwrap();
        assert_eq!(
            body,
            json!({"email": "a@example.com", "code": "ABCD1234", "purchase_time": "2022-08-02 14:07"})
        );
    }

    #[test]
    fn test_register_request_body() {
        let registration = Registration {
            email: "a@example.com".to_string(),
            name: "Nagy Péter".to_string(),
        };

        let body = serde_json::to_value(RegisterRequest::from(&registration)).unwrap();
        assert_eq!(body, json!({"email": "a@example.com", "name": "Nagy Péter"}));
    }

    #[test]
    fn test_decode_error_list() {
        let response: ApiResponse<UploadData> =
            decode_response(r#"{"errors":[{"code":"email:not_found"},{"code":"code:invalid"}]}"#).unwrap();

        assert!(response.has_error("email:not_found"));
        assert!(response.has_error("code:invalid"));
        assert!(!response.has_error("code:required"));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_decode_data_payloads() {
        let won: ApiResponse<UploadData> = decode_response(r#"{"data":{"won":true}}"#).unwrap();
        assert_eq!(won.data, Some(UploadData { won: true }));
        assert!(won.errors.is_none());

        let registered: ApiResponse<RegisterData> = decode_response(r#"{"data":{"success":true}}"#).unwrap();
        assert_eq!(registered.data, Some(RegisterData { success: true }));

        // A payload without the flag counts as false
        let empty: ApiResponse<UploadData> = decode_response(r#"{"data":{}}"#).unwrap();
        assert_eq!(empty.data, Some(UploadData { won: false }));
    }

    #[test]
    fn test_decode_malformed_body() {
        let result = decode_response::<UploadData>("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_endpoint_urls() {
        let client = HttpApiClient::new("https://api.example.com/campaign/");
        assert_eq!(client.endpoint_url(UPLOAD_ENDPOINT), "https://api.example.com/campaign/code/upload");
        assert_eq!(client.endpoint_url(REGISTER_ENDPOINT), "https://api.example.com/campaign/user/register");

        let default = HttpApiClient::default();
        assert!(default.endpoint_url(UPLOAD_ENDPOINT).starts_with(DEFAULT_BASE_URL));
    }
}

//! Response envelopes for the blog API.
//!
//! Failures are reported as RFC 7807 problem details
//! (https://datatracker.ietf.org/doc/html/rfc7807).

use serde::{Deserialize, Serialize};

/// Envelope around a successful payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Problem details body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Problem type URI; `about:blank` means the status code says it all.
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Path of the request that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// A problem titled with the reason phrase of `status`.
    pub fn for_status(status: u16) -> Self {
        let title = match status {
            400 => "Bad Request",
            404 => "Not Found",
            409 => "Conflict",
            503 => "Service Unavailable",
            _ => "Internal Server Error",
        };
        Self {
            problem_type: "about:blank".to_string(),
            title: title.to_string(),
            status,
            detail: None,
            instance: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_shape() {
        let error = ErrorResponse::for_status(404)
            .with_detail("Post 'missing' not found")
            .with_instance("/api/blog/posts/missing")
            .with_request_id("abc-123");

        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["status"], 404);
        assert_eq!(json["instance"], "/api/blog/posts/missing");
        assert_eq!(json["request_id"], "abc-123");
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::for_status(500)).unwrap();

        assert_eq!(json["title"], "Internal Server Error");
        assert!(json.get("detail").is_none());
        assert!(json.get("request_id").is_none());
    }

    #[test]
    fn test_envelope() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"][1], 2);
    }
}

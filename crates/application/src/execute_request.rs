//! Execute Request Use Case
//!
//! Validates a request and sends it through the `HttpClient` port.

use std::sync::Arc;

use objects_contract_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;
use tracing::debug;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// Use case for executing HTTP requests.
///
/// Each call is awaited to completion before the caller continues; there
/// is no retry and no cancellation.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the result.
    ///
    /// # Validation
    ///
    /// - URL must not be empty
    /// - URL must start with http:// or https://
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or HTTP failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        Self::validate(request)?;

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.client.execute(request).await?;
        debug!(
            status = response.status,
            duration = %response.duration_display(),
            "received response"
        );

        Ok(response)
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        if request.url.trim().is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Mock HTTP client for testing.
    struct MockHttpClient {
        response: Result<ResponseSpec, HttpClientError>,
    }

    impl MockHttpClient {
        fn success() -> Self {
            Self {
                response: Ok(ResponseSpec::new(
                    200u16,
                    HashMap::new(),
                    b"{}".to_vec(),
                    Duration::from_millis(50),
                )),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self { response: Err(err) }
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(
            &self,
            _request: &RequestSpec,
        ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>
        {
            let result = self.response.clone();
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::success()));

        let request = RequestSpec::get("Get", "https://api.example.com/objects/1");
        let response = use_case.execute(&request).await.expect("should be ok");

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_execute_empty_url() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::success()));

        let request = RequestSpec::get("Get", "  ");
        let result = use_case.execute(&request).await;

        assert_eq!(result, Err(ExecuteRequestError::EmptyUrl));
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::success()));

        let request = RequestSpec::get("Get", "ftp://api.example.com/objects");
        let result = use_case.execute(&request).await;

        assert!(matches!(result, Err(ExecuteRequestError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_execute_http_error() {
        let use_case = ExecuteRequest::new(Arc::new(MockHttpClient::error(
            HttpClientError::DnsError {
                host: "api.example.com".to_string(),
                message: "failed to lookup address information".to_string(),
            },
        )));

        let request = RequestSpec::get("Get", "https://api.example.com/objects");
        let result = use_case.execute(&request).await;

        assert_eq!(
            result,
            Err(ExecuteRequestError::HttpError(HttpClientError::DnsError {
                host: "api.example.com".to_string(),
                message: "failed to lookup address information".to_string(),
            }))
        );
    }
}

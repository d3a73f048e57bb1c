//! Request/response capture.
//!
//! Every exchange of a scenario is kept in memory. Full detail is only
//! written to the log when the scenario fails.

use objects_contract_domain::{request::RequestSpec, response::ResponseSpec};
use serde::Serialize;
use tracing::warn;

/// One request and whatever came back for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    /// The request as sent.
    pub request: RequestSpec,
    /// The response, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSpec>,
    /// Transport error, when no response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Exchange {
    /// Renders the request half the way it went over the wire.
    #[must_use]
    pub fn request_detail(&self) -> String {
        let mut out = format!("{} {}", self.request.method, self.request.url);
        for header in self.request.headers.iter() {
            out.push_str(&format!("\n{}: {}", header.name, header.value));
        }
        if let Some(body) = self.request.body.content() {
            out.push_str("\n\n");
            out.push_str(body);
        }
        out
    }

    /// Renders the response half, or the transport error.
    #[must_use]
    pub fn response_detail(&self) -> String {
        match (&self.response, &self.error) {
            (Some(response), _) => {
                let mut headers: Vec<_> = response.headers_map.iter().collect();
                headers.sort();
                let mut out = format!(
                    "{} {} ({})",
                    response.status,
                    response.status_text,
                    response.duration_display()
                );
                for (name, value) in headers {
                    out.push_str(&format!("\n{name}: {value}"));
                }
                if !response.body.is_empty() {
                    out.push_str("\n\n");
                    out.push_str(&response.body);
                }
                out
            }
            (None, Some(error)) => format!("<no response: {error}>"),
            (None, None) => "<no response>".to_string(),
        }
    }
}

/// Exchanges recorded during a single scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExchangeLog {
    exchanges: Vec<Exchange>,
}

impl ExchangeLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exchanges: Vec::new(),
        }
    }

    /// Records a completed exchange.
    pub fn record_response(&mut self, request: RequestSpec, response: ResponseSpec) {
        self.exchanges.push(Exchange {
            request,
            response: Some(response),
            error: None,
        });
    }

    /// Records a request that produced no response.
    pub fn record_error(&mut self, request: RequestSpec, error: impl Into<String>) {
        self.exchanges.push(Exchange {
            request,
            response: None,
            error: Some(error.into()),
        });
    }

    /// Returns the recorded exchanges in send order.
    #[must_use]
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Returns the number of recorded exchanges.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Returns true if nothing was sent.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Logs every exchange in full. Called only for failed scenarios.
    pub fn emit_failure_detail(&self, scenario: &str) {
        for (index, exchange) in self.exchanges.iter().enumerate() {
            warn!(
                scenario,
                exchange = index + 1,
                request = %exchange.request_detail(),
                response = %exchange.response_detail(),
                "request/response of failed scenario"
            );
        }
    }
}

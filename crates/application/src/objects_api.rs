//! Request builders for the `objects` resource.
//!
//! Every request carrying a body declares `Content-Type: application/json`.
//! Identifiers are pushed as a single path segment, so they are
//! percent-encoded rather than interpreted as path syntax.

use objects_contract_domain::request::{HttpMethod, RequestBody, RequestSpec};
use objects_contract_domain::{DomainError, DomainResult};
use url::Url;

const RESOURCE: &str = "objects";

/// Builds requests against `{base}/objects` and `{base}/objects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectsEndpoint {
    base: Url,
}

impl ObjectsEndpoint {
    /// Creates an endpoint rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or cannot carry a path.
    pub fn new(base_url: &str) -> DomainResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        if base.cannot_be_a_base() {
            return Err(DomainError::InvalidUrl(format!(
                "URL cannot be used as a base: {base_url}"
            )));
        }
        Ok(Self { base })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// `POST objects`.
    #[must_use]
    pub fn create(&self, body: RequestBody) -> RequestSpec {
        Self::with_json(
            RequestSpec::new("Create object", HttpMethod::Post, self.collection_url()),
            body,
        )
    }

    /// `GET objects/{id}`.
    #[must_use]
    pub fn get(&self, id: &str) -> RequestSpec {
        RequestSpec::new("Get object", HttpMethod::Get, self.item_url(id))
    }

    /// `PUT objects/{id}`.
    #[must_use]
    pub fn replace(&self, id: &str, body: RequestBody) -> RequestSpec {
        Self::with_json(
            RequestSpec::new("Replace object", HttpMethod::Put, self.item_url(id)),
            body,
        )
    }

    /// `PATCH objects/{id}`.
    #[must_use]
    pub fn patch(&self, id: &str, body: RequestBody) -> RequestSpec {
        Self::with_json(
            RequestSpec::new("Patch object", HttpMethod::Patch, self.item_url(id)),
            body,
        )
    }

    /// `DELETE objects/{id}`.
    #[must_use]
    pub fn delete(&self, id: &str) -> RequestSpec {
        RequestSpec::new("Delete object", HttpMethod::Delete, self.item_url(id))
    }

    fn with_json(request: RequestSpec, body: RequestBody) -> RequestSpec {
        match body.content_type() {
            Some(content_type) => request
                .with_header("Content-Type", content_type)
                .with_body(body),
            None => request.with_body(body),
        }
    }

    fn collection_url(&self) -> String {
        self.url_with_segments(&[RESOURCE])
    }

    fn item_url(&self, id: &str) -> String {
        self.url_with_segments(&[RESOURCE, id])
    }

    fn url_with_segments(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

//! Fixture values and payload shapes for the objects resource.
//!
//! The suite submits the same applicant record in every scenario that creates
//! an object, so the fixture is a plain immutable value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier that no object on the server is expected to carry.
pub const MISSING_OBJECT_ID: &str = "fgdfgfsfdhgfhsfhg";

/// Applicant record used to populate request payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplicant {
    name: String,
    year: i64,
    office: String,
    company: String,
}

impl JobApplicant {
    /// Creates a fully populated applicant.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        year: i64,
        office: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            year,
            office: office.into(),
            company: company.into(),
        }
    }

    /// The applicant submitted by every create call.
    #[must_use]
    pub fn default_fixture() -> Self {
        Self::new("Francieli Desafio", 2024, "Quality Assurance", "NtConsult")
    }

    /// Second applicant, only sent as part of the rejected array body.
    #[must_use]
    pub fn second_fixture() -> Self {
        Self::new("Francieli Bedin", 2023, "Quality Assurance Senior", "NtConsult")
    }

    /// Applicant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Year of application.
    #[must_use]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Office the applicant applies for.
    #[must_use]
    pub fn office(&self) -> &str {
        &self.office
    }

    /// Hiring company.
    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }
}

impl Default for JobApplicant {
    fn default() -> Self {
        Self::default_fixture()
    }
}

/// Nested `data` object of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectData {
    /// Year of application.
    pub year: i64,
    /// Office, omitted when a caller wants to test replacement semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    /// Company, omitted when a caller wants to test replacement semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Request body for POST and PUT on the objects resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPayload {
    /// Object name.
    pub name: String,
    /// Nested attributes.
    pub data: ObjectData,
}

impl ObjectPayload {
    /// Replaces the year, keeping every other field.
    #[must_use]
    pub const fn with_year(mut self, year: i64) -> Self {
        self.data.year = year;
        self
    }

    /// Drops office and company so only `name` and `data.year` are sent.
    #[must_use]
    pub fn without_office_and_company(mut self) -> Self {
        self.data.office = None;
        self.data.company = None;
        self
    }

    /// Serializes the payload as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

impl From<&JobApplicant> for ObjectPayload {
    fn from(applicant: &JobApplicant) -> Self {
        Self {
            name: applicant.name.clone(),
            data: ObjectData {
                year: applicant.year,
                office: Some(applicant.office.clone()),
                company: Some(applicant.company.clone()),
            },
        }
    }
}

/// Server-assigned identifier of an object created during a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatedObjectHandle(String);

impl CreatedObjectHandle {
    /// Wraps an identifier returned by the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank.
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "object id must not be blank".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatedObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Objects Contract Domain - Core types
//!
//! This crate defines the domain model for the objects API contract suite.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod fixture;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use fixture::{CreatedObjectHandle, JobApplicant, MISSING_OBJECT_ID, ObjectData, ObjectPayload};
pub use testing::{Assertion, AssertionResult, TestResults, TestSuite};

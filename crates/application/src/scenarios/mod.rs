//! Contract scenarios for the objects resource.
//!
//! A scenario sends one or more requests and checks status codes and body
//! fields. Scenarios that need an existing object create it themselves
//! through [`ScenarioContext::create_object`]; nothing is shared between
//! scenarios.

mod catalog;
mod context;
pub mod messages;

pub use catalog::run;
pub use context::{ScenarioContext, ScenarioError};

use std::fmt;

/// Every scenario the suite knows, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScenarioKind {
    /// POST a single object and check the echo.
    PostCreatesObject,
    /// POST a JSON array instead of an object.
    PostRejectsArrayBody,
    /// GET an object created in the same scenario.
    GetReturnsCreatedObject,
    /// GET an id that does not exist.
    GetUnknownIdNotFound,
    /// PUT a full replacement with a changed year.
    PutReplacesObject,
    /// PUT to an id that does not exist.
    PutUnknownIdNotFound,
    /// PATCH only the name.
    PatchUpdatesNameOnly,
    /// PATCH a field the schema does not know.
    PatchRejectsUnknownField,
    /// DELETE an object created in the same scenario.
    DeleteRemovesObject,
    /// DELETE an id that does not exist.
    DeleteUnknownIdNotFound,
    /// Created ids can be used verbatim as a path segment.
    CreatedIdIsPathSafe,
    /// Two GETs return the same fields as the POST.
    GetIsIdempotent,
    /// PUT does not keep fields left out of the body.
    PutDropsOmittedFields,
    /// A second DELETE of the same id is a 404.
    DeleteIsSingleUse,
}

impl ScenarioKind {
    /// All scenarios, ordered.
    pub const ALL: [Self; 14] = [
        Self::PostCreatesObject,
        Self::PostRejectsArrayBody,
        Self::GetReturnsCreatedObject,
        Self::GetUnknownIdNotFound,
        Self::PutReplacesObject,
        Self::PutUnknownIdNotFound,
        Self::PatchUpdatesNameOnly,
        Self::PatchRejectsUnknownField,
        Self::DeleteRemovesObject,
        Self::DeleteUnknownIdNotFound,
        Self::CreatedIdIsPathSafe,
        Self::GetIsIdempotent,
        Self::PutDropsOmittedFields,
        Self::DeleteIsSingleUse,
    ];

    /// 1-based execution order.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::PostCreatesObject => 1,
            Self::PostRejectsArrayBody => 2,
            Self::GetReturnsCreatedObject => 3,
            Self::GetUnknownIdNotFound => 4,
            Self::PutReplacesObject => 5,
            Self::PutUnknownIdNotFound => 6,
            Self::PatchUpdatesNameOnly => 7,
            Self::PatchRejectsUnknownField => 8,
            Self::DeleteRemovesObject => 9,
            Self::DeleteUnknownIdNotFound => 10,
            Self::CreatedIdIsPathSafe => 11,
            Self::GetIsIdempotent => 12,
            Self::PutDropsOmittedFields => 13,
            Self::DeleteIsSingleUse => 14,
        }
    }

    /// Stable snake_case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PostCreatesObject => "post_creates_object",
            Self::PostRejectsArrayBody => "post_rejects_array_body",
            Self::GetReturnsCreatedObject => "get_returns_created_object",
            Self::GetUnknownIdNotFound => "get_unknown_id_not_found",
            Self::PutReplacesObject => "put_replaces_object",
            Self::PutUnknownIdNotFound => "put_unknown_id_not_found",
            Self::PatchUpdatesNameOnly => "patch_updates_name_only",
            Self::PatchRejectsUnknownField => "patch_rejects_unknown_field",
            Self::DeleteRemovesObject => "delete_removes_object",
            Self::DeleteUnknownIdNotFound => "delete_unknown_id_not_found",
            Self::CreatedIdIsPathSafe => "created_id_is_path_safe",
            Self::GetIsIdempotent => "get_is_idempotent",
            Self::PutDropsOmittedFields => "put_drops_omitted_fields",
            Self::DeleteIsSingleUse => "delete_is_single_use",
        }
    }

    /// Human-readable title used in logs and reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PostCreatesObject => "POST creates an object and echoes every field",
            Self::PostRejectsArrayBody => "POST rejects an array of objects with 400",
            Self::GetReturnsCreatedObject => "GET returns the object by id",
            Self::GetUnknownIdNotFound => "GET returns 404 for an unknown id",
            Self::PutReplacesObject => "PUT replaces every field of the object",
            Self::PutUnknownIdNotFound => "PUT returns 404 for an unknown id",
            Self::PatchUpdatesNameOnly => "PATCH updates only the fields sent",
            Self::PatchRejectsUnknownField => "PATCH rejects fields the object does not have",
            Self::DeleteRemovesObject => "DELETE removes the object by id",
            Self::DeleteUnknownIdNotFound => "DELETE returns 404 for an unknown id",
            Self::CreatedIdIsPathSafe => "Created ids are usable as a path segment",
            Self::GetIsIdempotent => "Repeated GETs return the POSTed fields unchanged",
            Self::PutDropsOmittedFields => "PUT drops fields left out of the body",
            Self::DeleteIsSingleUse => "Deleting the same id twice yields 200 then 404",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.order(), self.name())
    }
}

/// An ordered selection of scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kinds: Vec<ScenarioKind>,
}

impl Catalog {
    /// The ten request/response contract scenarios.
    #[must_use]
    pub fn core() -> Self {
        Self::from_kinds(ScenarioKind::ALL.into_iter().filter(|k| k.order() <= 10))
    }

    /// The core scenarios followed by the property scenarios.
    #[must_use]
    pub fn full() -> Self {
        Self::from_kinds(ScenarioKind::ALL)
    }

    /// Builds a catalog from any selection. Order is always ascending and
    /// duplicates are dropped.
    #[must_use]
    pub fn from_kinds(kinds: impl IntoIterator<Item = ScenarioKind>) -> Self {
        let mut kinds: Vec<_> = kinds.into_iter().collect();
        kinds.sort_by_key(|k| k.order());
        kinds.dedup();
        Self { kinds }
    }

    /// Scenarios in execution order.
    pub fn iter(&self) -> impl Iterator<Item = ScenarioKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Number of scenarios.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

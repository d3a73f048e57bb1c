//! Scenario bodies.

use objects_contract_domain::request::RequestBody;
use objects_contract_domain::{Assertion, JobApplicant, MISSING_OBJECT_ID, ObjectPayload};

use super::context::{ScenarioContext, ScenarioError, extract_value};
use super::{ScenarioKind, messages};
use crate::ports::HttpClient;

const UPDATED_YEAR: i64 = 2025;
const UPDATED_NAME: &str = "Francieli Atualizada";
const PATH_SAFE_ID: &str = "^[A-Za-z0-9_-]+$";

/// Runs one scenario to completion or to its first failure.
///
/// # Errors
///
/// Returns the first failed check or transport error.
pub async fn run<C: HttpClient>(
    kind: ScenarioKind,
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    match kind {
        ScenarioKind::PostCreatesObject => post_creates_object(ctx).await,
        ScenarioKind::PostRejectsArrayBody => post_rejects_array_body(ctx).await,
        ScenarioKind::GetReturnsCreatedObject => get_returns_created_object(ctx).await,
        ScenarioKind::GetUnknownIdNotFound => get_unknown_id_not_found(ctx).await,
        ScenarioKind::PutReplacesObject => put_replaces_object(ctx).await,
        ScenarioKind::PutUnknownIdNotFound => put_unknown_id_not_found(ctx).await,
        ScenarioKind::PatchUpdatesNameOnly => patch_updates_name_only(ctx).await,
        ScenarioKind::PatchRejectsUnknownField => patch_rejects_unknown_field(ctx).await,
        ScenarioKind::DeleteRemovesObject => delete_removes_object(ctx).await,
        ScenarioKind::DeleteUnknownIdNotFound => delete_unknown_id_not_found(ctx).await,
        ScenarioKind::CreatedIdIsPathSafe => created_id_is_path_safe(ctx).await,
        ScenarioKind::GetIsIdempotent => get_is_idempotent(ctx).await,
        ScenarioKind::PutDropsOmittedFields => put_drops_omitted_fields(ctx).await,
        ScenarioKind::DeleteIsSingleUse => delete_is_single_use(ctx).await,
    }
}

/// Equality checks for every field present in `payload`.
fn echoes(payload: &ObjectPayload) -> Vec<Assertion> {
    let mut assertions = vec![
        Assertion::json_eq("$.name", payload.name.as_str()),
        Assertion::json_eq("$.data.year", payload.data.year),
    ];
    if let Some(office) = &payload.data.office {
        assertions.push(Assertion::json_eq("$.data.office", office.as_str()));
    }
    if let Some(company) = &payload.data.company {
        assertions.push(Assertion::json_eq("$.data.company", company.as_str()));
    }
    assertions
}

fn payload_body(payload: &ObjectPayload) -> RequestBody {
    RequestBody::from_value(&payload.to_json())
}

async fn post_creates_object<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let payload = ObjectPayload::from(ctx.fixture());
    let request = ctx.endpoint().create(payload_body(&payload));
    let response = ctx.send(request).await?;

    let mut assertions = vec![
        Assertion::status(200),
        Assertion::json_not_null("$.id"),
        Assertion::json_not_null("$.createdAt"),
    ];
    assertions.extend(echoes(&payload));
    ctx.verify("create object", &response, assertions)
}

async fn post_rejects_array_body<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let body = serde_json::json!([
        ObjectPayload::from(ctx.fixture()).to_json(),
        ObjectPayload::from(&JobApplicant::second_fixture()).to_json(),
    ]);
    let request = ctx.endpoint().create(RequestBody::from_value(&body));
    let response = ctx.send(request).await?;

    ctx.verify(
        "create objects from array",
        &response,
        [
            Assertion::status(400),
            Assertion::json_eq("$.error", messages::BAD_REQUEST_BODY),
        ],
    )
}

async fn get_returns_created_object<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let request = ctx.endpoint().get(handle.as_str());
    let response = ctx.send(request).await?;

    let mut assertions = vec![
        Assertion::status(200),
        Assertion::json_eq("$.id", handle.as_str()),
    ];
    assertions.extend(echoes(&ObjectPayload::from(ctx.fixture())));
    ctx.verify("get object", &response, assertions)
}

async fn get_unknown_id_not_found<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let request = ctx.endpoint().get(MISSING_OBJECT_ID);
    let response = ctx.send(request).await?;

    ctx.verify(
        "get unknown object",
        &response,
        [
            Assertion::status(404),
            Assertion::json_eq("$.error", messages::get_not_found(MISSING_OBJECT_ID)),
        ],
    )
}

async fn put_replaces_object<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let payload = ObjectPayload::from(ctx.fixture()).with_year(UPDATED_YEAR);
    let request = ctx
        .endpoint()
        .replace(handle.as_str(), payload_body(&payload));
    let response = ctx.send(request).await?;

    let mut assertions = vec![
        Assertion::status(200),
        Assertion::json_not_null("$.id"),
        Assertion::json_not_null("$.updatedAt"),
    ];
    assertions.extend(echoes(&payload));
    ctx.verify("replace object", &response, assertions)
}

async fn put_unknown_id_not_found<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let payload = ObjectPayload::from(ctx.fixture()).with_year(UPDATED_YEAR);
    let request = ctx
        .endpoint()
        .replace(MISSING_OBJECT_ID, payload_body(&payload));
    let response = ctx.send(request).await?;

    ctx.verify(
        "replace unknown object",
        &response,
        [
            Assertion::status(404),
            Assertion::json_eq("$.error", messages::put_not_found(MISSING_OBJECT_ID)),
        ],
    )
}

async fn patch_updates_name_only<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let body = serde_json::json!({ "name": UPDATED_NAME });
    let request = ctx
        .endpoint()
        .patch(handle.as_str(), RequestBody::from_value(&body));
    let response = ctx.send(request).await?;

    let mut expected = ObjectPayload::from(ctx.fixture());
    expected.name = UPDATED_NAME.to_string();

    let mut assertions = vec![
        Assertion::status(200),
        Assertion::json_not_null("$.id"),
        Assertion::json_not_null("$.updatedAt"),
    ];
    assertions.extend(echoes(&expected));
    ctx.verify("patch object name", &response, assertions)
}

async fn patch_rejects_unknown_field<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let body = serde_json::json!({ "fullName": UPDATED_NAME });
    let request = ctx
        .endpoint()
        .patch(handle.as_str(), RequestBody::from_value(&body));
    let response = ctx.send(request).await?;

    ctx.verify(
        "patch unknown field",
        &response,
        [
            Assertion::status(404),
            Assertion::json_eq("$.error", messages::NO_VALID_FIELDS),
        ],
    )
}

async fn delete_removes_object<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let request = ctx.endpoint().delete(handle.as_str());
    let response = ctx.send(request).await?;

    ctx.verify(
        "delete object",
        &response,
        [
            Assertion::status(200),
            Assertion::json_eq("$.message", messages::deleted(handle.as_str())),
        ],
    )
}

async fn delete_unknown_id_not_found<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let request = ctx.endpoint().delete(MISSING_OBJECT_ID);
    let response = ctx.send(request).await?;

    ctx.verify(
        "delete unknown object",
        &response,
        [
            Assertion::status(404),
            Assertion::json_eq("$.error", messages::delete_not_found(MISSING_OBJECT_ID)),
        ],
    )
}

async fn created_id_is_path_safe<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let payload = ObjectPayload::from(ctx.fixture());
    let request = ctx.endpoint().create(payload_body(&payload));
    let response = ctx.send(request).await?;

    ctx.verify(
        "create object for id format",
        &response,
        [
            Assertion::status(200),
            Assertion::json_not_null("$.id"),
            Assertion::json_matches("$.id", PATH_SAFE_ID),
        ],
    )
}

async fn get_is_idempotent<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let payload = ObjectPayload::from(ctx.fixture());

    let request = ctx.endpoint().get(handle.as_str());
    let first = ctx.send(request).await?;
    let mut assertions = vec![Assertion::status(200)];
    assertions.extend(echoes(&payload));
    ctx.verify("first read", &first, assertions)?;

    let name = extract_value("first read", &first, "name")?;
    let data = extract_value("first read", &first, "data")?;

    let request = ctx.endpoint().get(handle.as_str());
    let second = ctx.send(request).await?;
    ctx.verify(
        "second read",
        &second,
        [
            Assertion::status(200),
            Assertion::json_eq("$.id", handle.as_str()),
            Assertion::json_eq("$.name", name),
            Assertion::json_eq("$.data", data),
        ],
    )
}

async fn put_drops_omitted_fields<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;
    let payload = ObjectPayload::from(ctx.fixture()).without_office_and_company();
    let request = ctx
        .endpoint()
        .replace(handle.as_str(), payload_body(&payload));
    let response = ctx.send(request).await?;

    let mut assertions = vec![
        Assertion::status(200),
        Assertion::json_not_null("$.updatedAt"),
    ];
    assertions.extend(echoes(&payload));
    assertions.push(Assertion::json_absent("$.data.office"));
    assertions.push(Assertion::json_absent("$.data.company"));
    ctx.verify("replace object partially", &response, assertions)
}

async fn delete_is_single_use<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> Result<(), ScenarioError> {
    let handle = ctx.create_object().await?;

    let request = ctx.endpoint().delete(handle.as_str());
    let first = ctx.send(request).await?;
    ctx.verify(
        "first delete",
        &first,
        [
            Assertion::status(200),
            Assertion::json_eq("$.message", messages::deleted(handle.as_str())),
        ],
    )?;

    let request = ctx.endpoint().delete(handle.as_str());
    let second = ctx.send(request).await?;
    ctx.verify(
        "second delete",
        &second,
        [
            Assertion::status(404),
            Assertion::json_eq("$.error", messages::delete_not_found(handle.as_str())),
        ],
    )
}

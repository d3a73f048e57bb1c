//! Error and confirmation messages returned by the objects API.
//!
//! These are the server's strings, spelling included ("Oject").

/// `error` of a POST whose body is not a single JSON object.
pub const BAD_REQUEST_BODY: &str =
    "400 Bad Request. If you are trying to create or update the data, potential issue is that you are sending incorrect body json or it is missing at all.";

/// `error` of a PATCH that names no known field.
pub const NO_VALID_FIELDS: &str =
    "No valid field(s) to update have been passed as part of a request body.";

/// `error` of a GET for an unknown id.
#[must_use]
pub fn get_not_found(id: &str) -> String {
    format!("Oject with id={id} was not found.")
}

/// `error` of a PUT for an unknown id.
#[must_use]
pub fn put_not_found(id: &str) -> String {
    format!(
        "The Object with id = {id} doesn't exist. Please provide an object id which exists or generate a new Object using POST request and capture the id of it to use it as part of PUT request after that."
    )
}

/// `message` of a successful DELETE.
#[must_use]
pub fn deleted(id: &str) -> String {
    format!("Object with id = {id} has been deleted.")
}

/// `error` of a DELETE for an unknown id.
#[must_use]
pub fn delete_not_found(id: &str) -> String {
    format!("Object with id = {id} doesn't exist.")
}

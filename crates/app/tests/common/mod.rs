//! In-memory fake of the restful-api.dev `objects` resource.
//!
//! Mirrors the public API closely enough for the whole catalog to pass:
//! same status codes, same error strings (typo included), `createdAt` on
//! create and `updatedAt` on update. A [`Quirk`] breaks one behavior on
//! purpose so tests can check how failures are reported.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use objects_contract_application::scenarios::messages;
use serde_json::{Map, Value, json};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// A deliberate deviation from the real API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quirk {
    /// GET 404 spells "Object" correctly.
    CorrectedTypo,
    /// PUT keeps `data` fields missing from the body.
    PutMergesData,
    /// DELETE answers 200 even for unknown ids.
    DeleteAlwaysSucceeds,
    /// POST answers with `"id": null`.
    CreateWithoutId,
    /// `data.year` is echoed back as a string.
    YearAsString,
}

/// One request as the fake saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    objects: HashMap<String, StoredObject>,
    next_id: u64,
    seen: Vec<SeenRequest>,
}

#[derive(Debug, Clone)]
struct StoredObject {
    name: Value,
    data: Value,
}

/// Stateful wiremock responder for `/objects` and `/objects/{id}`.
#[derive(Clone, Default)]
pub struct FakeObjectsApi {
    state: Arc<Mutex<State>>,
    quirk: Option<Quirk>,
}

impl FakeObjectsApi {
    /// A fake that behaves like the real API.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake with one behavior broken.
    pub fn with_quirk(quirk: Quirk) -> Self {
        Self {
            quirk: Some(quirk),
            ..Self::default()
        }
    }

    /// Starts a mock server answering with this fake.
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(path_regex(r"^/objects(/[^/]*)?$"))
            .respond_with(self.clone())
            .mount(&server)
            .await;
        server
    }

    /// Requests received so far, in order.
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.lock().expect("fake state lock").seen.clone()
    }

    /// Number of objects currently stored.
    pub fn stored(&self) -> usize {
        self.state.lock().expect("fake state lock").objects.len()
    }

    fn has(&self, quirk: Quirk) -> bool {
        self.quirk == Some(quirk)
    }

    fn create(&self, state: &mut State, body: Option<Map<String, Value>>) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, messages::BAD_REQUEST_BODY);
        };
        state.next_id += 1;
        let id = format!("ff8081819782e69e{:016x}", state.next_id);
        let object = StoredObject {
            name: body.get("name").cloned().unwrap_or(Value::Null),
            data: body.get("data").cloned().unwrap_or(Value::Null),
        };
        let mut rendered = self.render(&id, &object);
        rendered.insert("createdAt".to_string(), Value::String(timestamp()));
        if self.has(Quirk::CreateWithoutId) {
            rendered.insert("id".to_string(), Value::Null);
        }
        state.objects.insert(id, object);
        ResponseTemplate::new(200).set_body_json(Value::Object(rendered))
    }

    fn get(&self, state: &State, id: &str) -> ResponseTemplate {
        match state.objects.get(id) {
            Some(object) => {
                ResponseTemplate::new(200).set_body_json(Value::Object(self.render(id, object)))
            }
            None if self.has(Quirk::CorrectedTypo) => {
                error(404, &format!("Object with id={id} was not found."))
            }
            None => error(404, &messages::get_not_found(id)),
        }
    }

    fn replace(
        &self,
        state: &mut State,
        id: &str,
        body: Option<Map<String, Value>>,
    ) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, messages::BAD_REQUEST_BODY);
        };
        let merge = self.has(Quirk::PutMergesData);
        let Some(object) = state.objects.get_mut(id) else {
            return error(404, &messages::put_not_found(id));
        };
        object.name = body.get("name").cloned().unwrap_or(Value::Null);
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        object.data = match (merge, &object.data, data) {
            (true, Value::Object(old), Value::Object(new)) => {
                let mut merged = old.clone();
                merged.extend(new);
                Value::Object(merged)
            }
            (_, _, data) => data,
        };
        let object = object.clone();
        self.updated(id, &object)
    }

    fn patch(
        &self,
        state: &mut State,
        id: &str,
        body: Option<Map<String, Value>>,
    ) -> ResponseTemplate {
        let Some(body) = body else {
            return error(400, messages::BAD_REQUEST_BODY);
        };
        let Some(object) = state.objects.get_mut(id) else {
            return error(404, &messages::put_not_found(id));
        };
        if !body.contains_key("name") && !body.contains_key("data") {
            return error(404, messages::NO_VALID_FIELDS);
        }
        if let Some(name) = body.get("name") {
            object.name = name.clone();
        }
        if let Some(data) = body.get("data") {
            object.data = data.clone();
        }
        let object = object.clone();
        self.updated(id, &object)
    }

    fn delete(&self, state: &mut State, id: &str) -> ResponseTemplate {
        if state.objects.remove(id).is_some() || self.has(Quirk::DeleteAlwaysSucceeds) {
            ResponseTemplate::new(200).set_body_json(json!({ "message": messages::deleted(id) }))
        } else {
            error(404, &messages::delete_not_found(id))
        }
    }

    fn updated(&self, id: &str, object: &StoredObject) -> ResponseTemplate {
        let mut rendered = self.render(id, object);
        rendered.insert("updatedAt".to_string(), Value::String(timestamp()));
        ResponseTemplate::new(200).set_body_json(Value::Object(rendered))
    }

    fn render(&self, id: &str, object: &StoredObject) -> Map<String, Value> {
        let mut data = object.data.clone();
        if self.has(Quirk::YearAsString) {
            if let Some(year) = data.get_mut("year") {
                *year = Value::String(year.to_string());
            }
        }
        let mut rendered = Map::new();
        rendered.insert("id".to_string(), Value::String(id.to_string()));
        rendered.insert("name".to_string(), object.name.clone());
        rendered.insert("data".to_string(), data);
        rendered
    }
}

impl Respond for FakeObjectsApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().expect("fake state lock");
        let method = request.method.as_str().to_string();
        state.seen.push(SeenRequest {
            method: method.clone(),
            path: request.url.path().to_string(),
            content_type: request
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        });

        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let body = serde_json::from_slice::<Value>(&request.body)
            .ok()
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            });

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["objects"]) => self.create(&mut state, body),
            ("GET", ["objects", id]) => self.get(&state, id),
            ("PUT", ["objects", id]) => self.replace(&mut state, id, body),
            ("PATCH", ["objects", id]) => self.patch(&mut state, id, body),
            ("DELETE", ["objects", id]) => self.delete(&mut state, id),
            _ => ResponseTemplate::new(405),
        }
    }
}

fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": message }))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Shared mock-server helpers for the Etherpad client tests

#![allow(dead_code)]

use etherpad_lite::{ClientConfig, EtherpadClient};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const API_KEY: &str = "8e2d3a1030753d0e481f179fc450b126";
pub const API_ROOT: &str = "/api/1.2.12";

/// Envelope for a successful call
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 0,
        "message": "ok",
        "data": data,
    }))
}

/// Envelope for a failed call
pub fn fail(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": code,
        "message": message,
        "data": null,
    }))
}

pub fn function_path(function: &str) -> String {
    format!("{}/{}", API_ROOT, function)
}

/// Mock for `function`, matched on path and API key
pub fn api_mock(function: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(function_path(function)))
        .and(query_param("apikey", API_KEY))
}

/// Client pointed at the mock server, with a trailing slash on the base URL
pub fn client_for(server: &MockServer) -> EtherpadClient {
    EtherpadClient::new(format!("{}{}/", server.uri(), API_ROOT), API_KEY)
        .expect("client should build")
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> EtherpadClient {
    let config = ClientConfig::builder()
        .base_url(format!("{}{}", server.uri(), API_ROOT))
        .api_key(API_KEY)
        .timeout(timeout)
        .build()
        .expect("config should build");
    EtherpadClient::with_config(config).expect("client should build")
}

/// Start a mock server that answers `function` with `data`
pub async fn serve(server: &MockServer, function: &str, data: Value) {
    api_mock(function).respond_with(ok(data)).mount(server).await;
}

// ============================================================================
// Stateful fake
// ============================================================================

#[derive(Default)]
struct FakeState {
    next_id: u64,
    groups: BTreeSet<String>,
    group_mappers: BTreeMap<String, String>,
    pads: BTreeMap<String, String>,
}

/// In-memory stand-in for the parts of Etherpad that keep state between calls:
/// groups and pad text.
#[derive(Clone, Default)]
pub struct FakeEtherpad {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEtherpad {
    pub async fn start() -> (MockServer, EtherpadClient) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(FakeEtherpad::default())
            .mount(&server)
            .await;
        let client = client_for(&server);
        (server, client)
    }
}

fn param(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

impl Respond for FakeEtherpad {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if param(request, "apikey").as_deref() != Some(API_KEY) {
            return ResponseTemplate::new(401).set_body_json(json!({
                "code": 4,
                "message": "no or wrong API Key",
                "data": null,
            }));
        }

        let function = request
            .url
            .path()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let mut state = self.state.lock().unwrap();

        match function.as_str() {
            "createGroup" => {
                state.next_id += 1;
                let id = format!("g.{:016}", state.next_id);
                state.groups.insert(id.clone());
                ok(json!({ "groupID": id }))
            }
            "createGroupIfNotExistsFor" => {
                let Some(mapper) = param(request, "groupMapper") else {
                    return fail(1, "groupMapper is not a string");
                };
                if let Some(id) = state.group_mappers.get(&mapper) {
                    return ok(json!({ "groupID": id }));
                }
                state.next_id += 1;
                let id = format!("g.{:016}", state.next_id);
                state.groups.insert(id.clone());
                state.group_mappers.insert(mapper, id.clone());
                ok(json!({ "groupID": id }))
            }
            "listAllGroups" => ok(json!({ "groupIDs": state.groups })),
            "deleteGroup" => {
                let Some(id) = param(request, "groupID") else {
                    return fail(1, "groupID does not exist");
                };
                if !state.groups.remove(&id) {
                    return fail(1, "groupID does not exist");
                }
                state.group_mappers.retain(|_, v| *v != id);
                ok(Value::Null)
            }
            "createPad" => {
                let Some(id) = param(request, "padID") else {
                    return fail(1, "padID is missing");
                };
                if state.pads.contains_key(&id) {
                    return fail(1, "padID does already exist");
                }
                let text = param(request, "text").unwrap_or_default();
                state.pads.insert(id, text);
                ok(Value::Null)
            }
            "setText" => {
                let (Some(id), Some(text)) = (param(request, "padID"), param(request, "text"))
                else {
                    return fail(1, "text is not a string");
                };
                match state.pads.get_mut(&id) {
                    Some(slot) => {
                        *slot = text;
                        ok(Value::Null)
                    }
                    None => fail(1, "padID does not exist"),
                }
            }
            "getText" => match param(request, "padID").and_then(|id| state.pads.get(&id)) {
                // The real server normalises trailing whitespace to one newline
                Some(text) => ok(json!({ "text": format!("{}\n", text.trim_end()) })),
                None => fail(1, "padID does not exist"),
            },
            "movePad" | "copyPad" => {
                let (Some(source), Some(destination)) =
                    (param(request, "sourceID"), param(request, "destinationID"))
                else {
                    return fail(1, "sourceID or destinationID missing");
                };
                let force = param(request, "force").as_deref() == Some("true");
                if state.pads.contains_key(&destination) && !force {
                    return fail(1, "destinationID already exists");
                }
                let Some(text) = state.pads.get(&source).cloned() else {
                    return fail(1, "padID does not exist");
                };
                if function == "movePad" {
                    state.pads.remove(&source);
                }
                state.pads.insert(destination, text);
                ok(Value::Null)
            }
            "deletePad" => match param(request, "padID") {
                Some(id) if state.pads.remove(&id).is_some() => ok(Value::Null),
                _ => fail(1, "padID does not exist"),
            },
            "listAllPads" => ok(json!({ "padIDs": state.pads.keys().collect::<Vec<_>>() })),
            _ => fail(3, "no such function"),
        }
    }
}

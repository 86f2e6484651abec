//! In-memory transport and JSON builders shared by the integration tests.
#![allow(dead_code)]

use crestwalk::{FetchError, Transport};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

pub const BASE: &str = "http://catalog.test";

enum Reply {
    Body(Vec<u8>),
    Refused,
    Status(u16),
}

/// Canned responses keyed by URL; unknown URLs answer 404. Records every request in order.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.replies
            .insert(url.to_string(), Reply::Body(body.to_string().into_bytes()));
        self
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.replies
            .insert(url.to_string(), Reply::Body(body.as_bytes().to_vec()));
        self
    }

    pub fn with_refused(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Refused);
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.replies.insert(url.to_string(), Reply::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|u| u == url)
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Refused) => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn url(path: &str) -> String {
    format!("{BASE}/{path}")
}

pub fn item(id: u64, name: &str, href: &str) -> Value {
    json!({ "href": href, "id": id, "id_str": id.to_string(), "name": name })
}

pub fn page(items: Vec<Value>, next: Option<&str>) -> Value {
    let mut v = json!({ "pageCount": 1, "totalCount": items.len(), "items": items });
    if let Some(next) = next {
        v["next"] = json!({ "href": next });
    }
    v
}

pub fn category(published: bool, groups: Vec<Value>) -> Value {
    json!({ "published": published, "name": "ignored", "groups": groups })
}

pub fn group(published: bool, types: Vec<Value>) -> Value {
    json!({ "published": published, "types": types })
}

pub fn names<'a>(items: impl IntoIterator<Item = &'a crestwalk::Item>) -> Vec<String> {
    items.into_iter().map(|i| i.name.clone()).collect()
}

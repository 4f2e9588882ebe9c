//! In-memory transport for unit tests

use super::transport::Transport;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) type Call = (Method, String, Option<Value>);

/// Replays queued responses in order and records every request
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub(crate) fn respond(&self, value: Value) {
        self.responses.lock().unwrap().push_back(value);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method, url.to_string(), body.cloned()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("API request failed: no response queued"))
    }
}

//! In-memory transports for unit tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::fetcher::{HttpResponse, Transport};

type Recorded = (String, Vec<(String, String)>);

/// Replays queued responses in order; an empty queue answers 500.
/// With a gate set, every request waits for one `notify_one` before answering.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    queue: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<Recorded>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub(crate) fn gated(gate: Arc<Notify>) -> Self { Self { gate: Some(gate), ..Default::default() } }

    pub(crate) fn push_ok(&self, status: u16, body: &str) {
        let reason = match status {
            200 => "OK",
            403 => "Forbidden",
            404 => "Not Found",
            _ => "",
        };
        self.queue.lock().unwrap().push_back(Ok(HttpResponse { status, reason: reason.to_string(), body: body.to_string() }));
    }

    pub(crate) fn push_err(&self, msg: &str) {
        self.queue.lock().unwrap().push_back(Err(anyhow!(msg.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> { self.requests.lock().unwrap().clone() }

    pub(crate) fn calls(&self) -> usize { self.requests.lock().unwrap().len() }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push((url.to_string(), headers.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.queue.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(HttpResponse { status: 500, reason: "Internal Server Error".into(), body: String::new() }))
    }
}

/// A contents API body for `manifest`, base64 wrapped at 60 columns like GitHub does.
pub(crate) fn contents_body(manifest: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(manifest.as_bytes());
    let wrapped: Vec<String> = encoded.as_bytes().chunks(60).map(|c| String::from_utf8_lossy(c).into_owned()).collect();
    serde_json::json!({ "name": "content.json", "encoding": "base64", "content": wrapped.join("\n") + "\n" }).to_string()
}

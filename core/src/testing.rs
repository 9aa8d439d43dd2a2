//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub(crate) struct Scripted {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    pub(crate) seen: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Scripted {
    pub(crate) fn reply(self, status: u16, body: Value) -> Self {
        self.reply_raw(status, &body.to_string())
    }

    pub(crate) fn reply_raw(self, status: u16, body: &str) -> Self {
        self.responses.lock().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.responses.lock().push_back(Err(err));
        self
    }
}

impl Transport for Scripted {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no scripted response".into())))
    }
}

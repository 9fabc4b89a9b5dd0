//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::Failure;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Replays queued outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, Failure>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Err(Failure::network(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Failure> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Failure::network("no scripted response left".to_string())))
    }
}

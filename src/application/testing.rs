//! In-memory doubles for the remote API and the operator dialogs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::dialogs::Dialogs;
use crate::application::repos::{ApiError, ResourceApi, ResourceKind};
use crate::domain::entities::{Post, User};

pub(crate) fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase().replace(' ', "."),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
    }
}

pub(crate) fn post(id: i64, user_id: i64, title: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
    }
}

/// Serves fixed collections and records every call as `"METHOD path"`.
pub(crate) struct FakeApi {
    users: Result<Value, ApiError>,
    posts: Result<Value, ApiError>,
    write_error: Option<ApiError>,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Value>>,
}

impl FakeApi {
    pub(crate) fn new(users: &[User], posts: &[Post]) -> Self {
        Self {
            users: Ok(json!(users)),
            posts: Ok(json!(posts)),
            write_error: None,
            calls: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_list(mut self, resource: ResourceKind, error: ApiError) -> Self {
        match resource {
            ResourceKind::Users => self.users = Err(error),
            ResourceKind::Posts => self.posts = Err(error),
        }
        self
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.write_error = Some(ApiError::Transport("connection reset".into()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().expect("bodies lock").clone()
    }

    fn record(&self, call: String, body: Option<Value>) {
        self.calls.lock().expect("calls lock").push(call);
        if let Some(body) = body {
            self.bodies.lock().expect("bodies lock").push(body);
        }
    }

    fn write_result(&self, echo: Value) -> Result<Value, ApiError> {
        match &self.write_error {
            Some(err) => Err(err.clone()),
            None => Ok(echo),
        }
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn list(&self, resource: ResourceKind) -> Result<Value, ApiError> {
        self.record(format!("GET /{resource}"), None);
        match resource {
            ResourceKind::Users => self.users.clone(),
            ResourceKind::Posts => self.posts.clone(),
        }
    }

    async fn create(&self, resource: ResourceKind, payload: Value) -> Result<Value, ApiError> {
        self.record(format!("POST /{resource}"), Some(payload.clone()));
        // The demo API always answers with id 101 for new records.
        let mut echo = payload;
        echo["id"] = json!(101);
        self.write_result(echo)
    }

    async fn update(
        &self,
        resource: ResourceKind,
        id: i64,
        payload: Value,
    ) -> Result<Value, ApiError> {
        self.record(format!("PUT /{resource}/{id}"), Some(payload.clone()));
        self.write_result(payload)
    }

    async fn delete(&self, resource: ResourceKind, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE /{resource}/{id}"), None);
        self.write_result(json!({})).map(|_| ())
    }
}

/// Answers dialogs from queues; unanswered confirms are declined and
/// unanswered prompts cancelled.
#[derive(Debug, Default)]
pub(crate) struct ScriptedDialogs {
    confirms: VecDeque<bool>,
    prompts: VecDeque<Option<String>>,
    pub(crate) asked: Vec<String>,
    pub(crate) alerts: Vec<String>,
}

impl ScriptedDialogs {
    pub(crate) fn confirming(answer: bool) -> Self {
        Self {
            confirms: VecDeque::from([answer]),
            ..Self::default()
        }
    }

    pub(crate) fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            prompts: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    async fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.asked.push(format!("{message} [{default}]"));
        self.prompts.pop_front().flatten()
    }

    async fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

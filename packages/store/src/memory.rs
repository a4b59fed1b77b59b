use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::json;

use crate::backend::{AiResponse, Backend, Navigator, OAuthStart};
use crate::error::{Result, StoreError};
use crate::models::{Channel, Settings, UserId, UserRecord};
use crate::tool::Tool;
use crate::users::UserStore;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory `users` table for testing and local development.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<BTreeMap<String, UserRecord>>>,
    inserts: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let store = Self::new();
        lock(&store.users).extend(records.into_iter().map(|r| (r.name.clone(), r)));
        store
    }

    pub fn get(&self, name: &str) -> Option<UserRecord> {
        lock(&self.users).get(name).cloned()
    }

    /// Number of successful inserts so far.
    pub fn insert_count(&self) -> usize {
        *lock(&self.inserts)
    }

    /// Make the next operation fail with a datastore error.
    pub fn fail_next(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    fn take_failure(&self) -> Result<()> {
        match lock(&self.failure).take() {
            Some(message) => Err(StoreError::Datastore(message)),
            None => Ok(()),
        }
    }
}

impl UserStore for MemoryStore {
    async fn find_by_name(&self, name: &UserId) -> Result<Option<UserRecord>> {
        self.take_failure()?;
        Ok(lock(&self.users).get(name.as_str()).cloned())
    }

    async fn insert(&self, record: &UserRecord) -> Result<()> {
        self.take_failure()?;
        let mut users = lock(&self.users);
        if users.contains_key(&record.name) {
            return Err(StoreError::Datastore(format!(
                "duplicate key value violates unique constraint: {}",
                record.name
            )));
        }
        users.insert(record.name.clone(), record.clone());
        *lock(&self.inserts) += 1;
        Ok(())
    }

    async fn update_settings(&self, name: &UserId, settings: &Settings) -> Result<()> {
        self.take_failure()?;
        let mut users = lock(&self.users);
        let record = users
            .get_mut(name.as_str())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        record.channel_id = Some(settings.channel_id.clone());
        record.message_format = Some(settings.message_format.clone());
        Ok(())
    }
}

/// A request seen by [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    ListChannels(String),
    StartOAuth(String, Tool),
    AiAction(String, String),
}

/// Scripted backend that records every request.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    channels: Vec<Channel>,
    redirects: HashMap<Tool, String>,
    ai_response: AiResponse,
    calls: Arc<Mutex<Vec<BackendCall>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            redirects: HashMap::new(),
            ai_response: AiResponse {
                status: 200,
                body: json!({ "result": "No text response" }),
            },
            calls: Arc::default(),
            failure: Arc::default(),
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_redirect(mut self, tool: Tool, url: &str) -> Self {
        self.redirects.insert(tool, url.to_string());
        self
    }

    pub fn with_ai_response(mut self, response: AiResponse) -> Self {
        self.ai_response = response;
        self
    }

    /// Make the next request fail with a backend error.
    pub fn fail_next(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        lock(&self.calls).push(call);
        match lock(&self.failure).take() {
            Some(message) => Err(StoreError::Backend(message)),
            None => Ok(()),
        }
    }
}

impl Backend for MemoryBackend {
    async fn list_channels(&self, user: &UserId) -> Result<Vec<Channel>> {
        self.record(BackendCall::ListChannels(user.to_string()))?;
        Ok(self.channels.clone())
    }

    async fn start_oauth(&self, user: &UserId, tool: Tool) -> Result<OAuthStart> {
        self.record(BackendCall::StartOAuth(user.to_string(), tool))?;
        Ok(OAuthStart {
            redirect_url: self.redirects.get(&tool).cloned(),
        })
    }

    async fn run_ai_action(&self, user: &UserId, prompt: &str) -> Result<AiResponse> {
        self.record(BackendCall::AiAction(user.to_string(), prompt.to_string()))?;
        Ok(self.ai_response.clone())
    }
}

/// Navigator that only remembers where it was sent.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        lock(&self.visited).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        lock(&self.visited).push(url.to_string());
    }
}

//! In-memory Talkoo server shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::StatusCode;

use talkoo_tui::api::{DictEntry, DictionaryService, EntriesResponse, UploadOutcome};
use talkoo_tui::error::{ApiError, ApiResult};
use talkoo_tui::model::dictionary::DictionaryCollection;
use talkoo_tui::model::Model;
use talkoo_tui::services::{ApiRequest, ApiResponse};
use talkoo_tui::{app, services::ConfirmOverwrite};

#[derive(Default)]
struct ServerState {
    names: Vec<String>,
    selected: Option<String>,
    entries: HashMap<String, Vec<DictEntry>>,
    /// (filename, overwrite) for every upload call
    upload_calls: Vec<(String, bool)>,
    fail_select: bool,
}

#[derive(Default)]
pub struct FakeServer {
    state: Mutex<ServerState>,
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

impl FakeServer {
    pub fn new(names: &[&str], selected: Option<&str>) -> Self {
        let server = Self::default();
        {
            let mut state = server.state.lock().unwrap();
            state.names = names.iter().map(|s| s.to_string()).collect();
            state.selected = selected.map(str::to_string);
        }
        server
    }

    pub fn set_entries(&self, name: &str, entries: Vec<DictEntry>) {
        self.state
            .lock()
            .unwrap()
            .entries
            .insert(name.to_string(), entries);
    }

    pub fn fail_select(&self) {
        self.state.lock().unwrap().fail_select = true;
    }

    /// Change the server list behind the client's back
    pub fn set_names(&self, names: &[&str]) {
        self.state.lock().unwrap().names = names.iter().map(|s| s.to_string()).collect();
    }

    pub fn names(&self) -> Vec<String> {
        self.state.lock().unwrap().names.clone()
    }

    pub fn upload_calls(&self) -> Vec<(String, bool)> {
        self.state.lock().unwrap().upload_calls.clone()
    }
}

#[async_trait]
impl DictionaryService for FakeServer {
    async fn collection(&self) -> ApiResult<DictionaryCollection> {
        let state = self.state.lock().unwrap();
        Ok(DictionaryCollection::new(
            state.names.clone(),
            state.selected.clone(),
        ))
    }

    async fn select(&self, name: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_select {
            return Err(server_error());
        }
        state.selected = Some(name.to_string());
        Ok(())
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.names.retain(|n| n != name);
        Ok(())
    }

    async fn upload(
        &self,
        filename: &str,
        _content_base64: &str,
        overwrite: bool,
    ) -> ApiResult<UploadOutcome> {
        let mut state = self.state.lock().unwrap();
        state.upload_calls.push((filename.to_string(), overwrite));
        if filename.starts_with("broken") {
            return Err(server_error());
        }
        if state.names.iter().any(|n| n == filename) {
            if !overwrite {
                return Ok(UploadOutcome::Conflict);
            }
        } else {
            state.names.push(filename.to_string());
        }
        Ok(UploadOutcome::Uploaded)
    }

    async fn entries(&self, filename: &str) -> ApiResult<EntriesResponse> {
        let state = self.state.lock().unwrap();
        if !state.names.iter().any(|n| n == filename) {
            return Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                body: "no such dictionary".to_string(),
            });
        }
        Ok(EntriesResponse {
            filename: filename.to_string(),
            main_fuzzy: Some(80),
            entries: state.entries.get(filename).cloned().unwrap_or_default(),
        })
    }
}

/// Answers every overwrite question the same way and records the questions
pub struct ScriptedConfirm {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmOverwrite for ScriptedConfirm {
    async fn confirm_overwrite(&self, filename: &str) -> bool {
        self.asked.lock().unwrap().push(filename.to_string());
        self.answer
    }
}

/// Run one dictionary request against the fake, like the worker does
pub async fn execute(server: &FakeServer, request: ApiRequest) -> Option<ApiResponse> {
    let response = match request {
        ApiRequest::FetchDictionaries { generation } => ApiResponse::DictionariesResult {
            generation,
            result: server.collection().await,
        },
        ApiRequest::SelectDictionary { name, generation } => {
            let result = server.select(&name).await;
            ApiResponse::SelectResult {
                name,
                generation,
                result,
            }
        }
        ApiRequest::DeleteDictionary { name, generation } => {
            let result = server.delete(&name).await;
            ApiResponse::DeleteResult {
                name,
                generation,
                result,
            }
        }
        ApiRequest::FetchEntries {
            filename,
            generation,
        } => {
            let result = server.entries(&filename).await;
            ApiResponse::EntriesResult {
                filename,
                generation,
                result,
            }
        }
        _ => return None,
    };
    Some(response)
}

/// Execute requests in order, feeding every response (and the requests it
/// produces) back into the model until nothing is left
pub async fn settle(model: &mut Model, server: &FakeServer, requests: Vec<ApiRequest>, now: Instant) {
    let mut queue: VecDeque<ApiRequest> = requests.into();
    while let Some(request) = queue.pop_front() {
        if let Some(response) = execute(server, request).await {
            queue.extend(app::handle_response(model, response, now));
        }
    }
}

pub fn entry(word: &str, kor: &str, fuzzy: Option<i64>) -> DictEntry {
    DictEntry {
        word: word.to_string(),
        kor: kor.to_string(),
        fuzzy,
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, Duration};

use crate::api::{DictionaryService, EntriesResponse, TalkooClient, TranslationResponse};
use crate::error::ApiResult;
use crate::logic::settings::SettingsTab;
use crate::model::dictionary::DictionaryCollection;

use super::upload::{run_upload, ConfirmOverwrite, UploadReport};

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User-initiated actions (select, delete, translate, save)
    Medium, // Data for the visible screen
    Low,    // Long-running background work
}

/// Identifies an in-flight request for concurrency tracking
pub(crate) type RequestId = u64;

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Snapshot of dictionary names + selected
    FetchDictionaries { generation: u64 },

    SelectDictionary { name: String, generation: u64 },

    DeleteDictionary { name: String, generation: u64 },

    /// Entries of one dictionary for the viewer
    FetchEntries { filename: String, generation: u64 },

    /// Upload files one by one (conflicts prompt the user)
    UploadDictionaries { paths: Vec<PathBuf> },

    FetchSettings { tab: SettingsTab, generation: u64 },

    /// Post the settings, then reload the model
    SaveSettings {
        tab: SettingsTab,
        values: Map<String, Value>,
    },

    Translate { text: String, generation: u64 },
}

impl ApiRequest {
    /// Extract priority from request
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::FetchDictionaries { .. }
            | ApiRequest::FetchEntries { .. }
            | ApiRequest::FetchSettings { .. } => Priority::Medium,
            ApiRequest::UploadDictionaries { .. } => Priority::Low,
            _ => Priority::High,
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    DictionariesResult {
        generation: u64,
        result: ApiResult<DictionaryCollection>,
    },

    SelectResult {
        name: String,
        generation: u64,
        result: ApiResult<()>,
    },

    DeleteResult {
        name: String,
        generation: u64,
        result: ApiResult<()>,
    },

    EntriesResult {
        filename: String,
        generation: u64,
        result: ApiResult<EntriesResponse>,
    },

    /// The upload hit an existing name; the worker waits on `reply`
    OverwriteRequested {
        filename: String,
        reply: OverwriteReply,
    },

    UploadFinished { report: UploadReport },

    SettingsResult {
        tab: SettingsTab,
        generation: u64,
        result: ApiResult<Map<String, Value>>,
    },

    SettingsSaved {
        tab: SettingsTab,
        result: ApiResult<()>,
    },

    TranslateResult {
        generation: u64,
        result: ApiResult<TranslationResponse>,
    },
}

/// One-shot answer to an overwrite question.
///
/// Cloneable so the pending question can live in the model; only the first
/// answer is delivered.
#[derive(Clone, Debug)]
pub struct OverwriteReply(Arc<Mutex<Option<oneshot::Sender<bool>>>>);

impl OverwriteReply {
    pub fn new(tx: oneshot::Sender<bool>) -> Self {
        Self(Arc::new(Mutex::new(Some(tx))))
    }

    pub fn send(&self, overwrite: bool) {
        if let Ok(mut slot) = self.0.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(overwrite);
            }
        }
    }
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestId),
}

/// Routes overwrite questions to the UI loop and waits for the answer
struct PromptConfirm {
    response_tx: mpsc::UnboundedSender<ApiResponse>,
}

#[async_trait]
impl ConfirmOverwrite for PromptConfirm {
    async fn confirm_overwrite(&self, filename: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let prompt = ApiResponse::OverwriteRequested {
            filename: filename.to_string(),
            reply: OverwriteReply::new(reply),
        };
        if self.response_tx.send(prompt).is_err() {
            return false;
        }
        // Dropped sender (app shutting down) counts as "no"
        answer.await.unwrap_or(false)
    }
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: TalkooClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<RequestId>,
    next_id: RequestId,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    pub(crate) fn new(
        client: TalkooClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            next_id: 0,
            response_tx,
            completion_tx,
            max_concurrent: 4,
        }
    }

    /// Add a request to the queue
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();

        // Insert based on priority (high priority at front)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight.insert(id);

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No retries: every failure is reported to the user once
        tokio::spawn(async move {
            tracing::debug!("[API Service] start {:?}", request);
            let response = Self::execute_request(&client, request, &response_tx).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(id));
        });
    }

    /// Execute an API request and return the response
    async fn execute_request(
        client: &TalkooClient,
        request: ApiRequest,
        response_tx: &mpsc::UnboundedSender<ApiResponse>,
    ) -> ApiResponse {
        match request {
            ApiRequest::FetchDictionaries { generation } => ApiResponse::DictionariesResult {
                generation,
                result: client.collection().await,
            },

            ApiRequest::SelectDictionary { name, generation } => {
                let result = client.select_dictionary(&name).await;
                ApiResponse::SelectResult {
                    name,
                    generation,
                    result,
                }
            }

            ApiRequest::DeleteDictionary { name, generation } => {
                let result = client.delete_dictionary(&name).await;
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
                let result = client.get_entries(&filename).await;
                ApiResponse::EntriesResult {
                    filename,
                    generation,
                    result,
                }
            }

            ApiRequest::UploadDictionaries { paths } => {
                let confirm = PromptConfirm {
                    response_tx: response_tx.clone(),
                };
                let report = run_upload(client, &paths, &confirm).await;
                ApiResponse::UploadFinished { report }
            }

            ApiRequest::FetchSettings { tab, generation } => ApiResponse::SettingsResult {
                tab,
                generation,
                result: client.get_settings(tab).await,
            },

            ApiRequest::SaveSettings { tab, values } => {
                let result = match client.post_settings(tab, &values).await {
                    Ok(_) => {
                        // Reload failures are not the user's concern; the
                        // settings themselves are stored.
                        if let Err(e) = client.reload_model().await {
                            tracing::warn!("Model reload after save failed: {}", e);
                        }
                        Ok(())
                    }
                    Err(e) => Err(e),
                };
                ApiResponse::SettingsSaved { tab, result }
            }

            ApiRequest::Translate { text, generation } => ApiResponse::TranslateResult {
                generation,
                result: client.translate(&text).await,
            },
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: TalkooClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                // Receive new requests
                Some(request) = request_rx.recv() => {
                    service.enqueue(request);
                }

                // Handle completion notifications
                Some(InternalMessage::Completed(id)) = completion_rx.recv() => {
                    service.in_flight.remove(&id);
                    if !service.in_flight.is_empty() {
                        tracing::debug!("[API Service] {} in flight", service.in_flight.len());
                    }
                }

                // Process queue at regular intervals
                _ = tick.tick() => {
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use crate::logic::settings::SettingsTab;
use crate::model::dictionary::DictionaryCollection;

/// Translation settings as served by `/setting/trans/`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransSettings {
    #[serde(default)]
    pub nomal_trans: bool,
    #[serde(default)]
    pub per_post_trans: bool,
    #[serde(default)]
    pub gemini_integration: bool,
    #[serde(default)]
    pub gemini_api: Option<String>,
    #[serde(default)]
    pub tkdic_path: Option<String>,
    #[serde(default)]
    pub tkdic_list: Option<Vec<String>>,
    #[serde(default)]
    pub tkdic_select: Option<String>,
}

impl TransSettings {
    /// Dictionary part of the settings. A null list is treated as empty.
    pub fn collection(&self) -> DictionaryCollection {
        DictionaryCollection::new(
            self.tkdic_list.clone().unwrap_or_default(),
            self.tkdic_select.clone().filter(|s| !s.is_empty()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DictEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub kor: String,
    #[serde(default)]
    pub fuzzy: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntriesResponse {
    pub filename: String,
    #[serde(default)]
    pub main_fuzzy: Option<i64>,
    #[serde(default)]
    pub entries: Vec<DictEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "modelTrans", default)]
    pub model_trans: Option<String>,
    #[serde(rename = "prePostTrans", default)]
    pub pre_post_trans: Option<String>,
    #[serde(rename = "geminiReson", default)]
    pub gemini_reason: Option<String>,
    #[serde(rename = "geminiIntegra", default)]
    pub gemini_integra: Option<String>,
}

/// Result of a single upload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    /// Name already taken and `overwrite` was false
    Conflict,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    filename: &'a str,
    content_base64: &'a str,
    overwrite: bool,
}

/// Dictionary operations of the Talkoo server.
///
/// Implemented by [`TalkooClient`]; tests use an in-memory fake.
#[async_trait]
pub trait DictionaryService: Send + Sync {
    /// Current collection snapshot (names + selected)
    async fn collection(&self) -> ApiResult<DictionaryCollection>;

    async fn select(&self, name: &str) -> ApiResult<()>;

    async fn delete(&self, name: &str) -> ApiResult<()>;

    async fn upload(
        &self,
        filename: &str,
        content_base64: &str,
        overwrite: bool,
    ) -> ApiResult<UploadOutcome>;

    async fn entries(&self, filename: &str) -> ApiResult<EntriesResponse>;
}

#[derive(Clone)]
pub struct TalkooClient {
    base_url: String,
    client: Client,
}

impl TalkooClient {
    /// Build a client. `timeout` of `None` means requests may wait forever.
    pub fn new(base_url: String, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into `ApiError::Status`
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Status { status, body })
    }

    pub async fn get_trans_settings(&self) -> ApiResult<TransSettings> {
        let response = self.client.get(self.url("/setting/trans/")).send().await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Raw settings values for a tab
    pub async fn get_settings(&self, tab: SettingsTab) -> ApiResult<Map<String, Value>> {
        let response = self.client.get(self.url(tab.endpoint())).send().await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn post_settings(
        &self,
        tab: SettingsTab,
        values: &Map<String, Value>,
    ) -> ApiResult<Map<String, Value>> {
        let response = self
            .client
            .post(self.url(tab.endpoint()))
            .json(values)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Ask the server to reload its translation model
    pub async fn reload_model(&self) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("/setting/reload/model/"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn select_dictionary(&self, name: &str) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("/dict/select/"))
            .json(&serde_json::json!({ "filename": name }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn delete_dictionary(&self, name: &str) -> ApiResult<()> {
        let url = self.url(&format!("/dict/{}", urlencoding::encode(name)));
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn upload_dictionary(
        &self,
        filename: &str,
        content_base64: &str,
        overwrite: bool,
    ) -> ApiResult<UploadOutcome> {
        let response = self
            .client
            .post(self.url("/dict/upload/"))
            .json(&UploadRequest {
                filename,
                content_base64,
                overwrite,
            })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Ok(UploadOutcome::Conflict);
        }
        Self::check(response).await?;
        Ok(UploadOutcome::Uploaded)
    }

    pub async fn get_entries(&self, filename: &str) -> ApiResult<EntriesResponse> {
        let url = self.url(&format!("/dict/entries/{}", urlencoding::encode(filename)));
        let response = self.client.get(url).send().await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn translate(&self, text: &str) -> ApiResult<TranslationResponse> {
        let response = self
            .client
            .post(self.url("/translate/"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DictionaryService for TalkooClient {
    async fn collection(&self) -> ApiResult<DictionaryCollection> {
        Ok(self.get_trans_settings().await?.collection())
    }

    async fn select(&self, name: &str) -> ApiResult<()> {
        self.select_dictionary(name).await
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        self.delete_dictionary(name).await
    }

    async fn upload(
        &self,
        filename: &str,
        content_base64: &str,
        overwrite: bool,
    ) -> ApiResult<UploadOutcome> {
        self.upload_dictionary(filename, content_base64, overwrite)
            .await
    }

    async fn entries(&self, filename: &str) -> ApiResult<EntriesResponse> {
        self.get_entries(filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trans_settings_null_list_is_empty_collection() {
        let settings: TransSettings = serde_json::from_str(
            r#"{"nomal_trans":true,"per_post_trans":false,"gemini_integration":false,
                "tkdic_list":null,"tkdic_select":null}"#,
        )
        .unwrap();
        let collection = settings.collection();
        assert!(collection.names.is_empty());
        assert!(collection.selected.is_none());
    }

    #[test]
    fn test_trans_settings_collection() {
        let settings: TransSettings = serde_json::from_str(
            r#"{"tkdic_list":["a.tkdic","b.tkdic"],"tkdic_select":"b.tkdic"}"#,
        )
        .unwrap();
        let collection = settings.collection();
        assert_eq!(collection.names, vec!["a.tkdic", "b.tkdic"]);
        assert_eq!(collection.selected.as_deref(), Some("b.tkdic"));
    }

    #[test]
    fn test_entries_response_missing_fuzzy() {
        let resp: EntriesResponse = serde_json::from_str(
            r#"{"filename":"x.tkdic","main_fuzzy":null,
                "entries":[{"word":"stone","kor":"돌","fuzzy":null},{"word":"bird","kor":"새","fuzzy":90}]}"#,
        )
        .unwrap();
        assert_eq!(resp.main_fuzzy, None);
        assert_eq!(resp.entries[0].fuzzy, None);
        assert_eq!(resp.entries[1].fuzzy, Some(90));
    }

    #[test]
    fn test_translation_response_field_names() {
        let resp: TranslationResponse = serde_json::from_str(
            r#"{"status":"success","modelTrans":"a","prePostTrans":"b","geminiReson":"c","geminiIntegra":"d"}"#,
        )
        .unwrap();
        assert_eq!(resp.model_trans.as_deref(), Some("a"));
        assert_eq!(resp.pre_post_trans.as_deref(), Some("b"));
        assert_eq!(resp.gemini_reason.as_deref(), Some("c"));
        assert_eq!(resp.gemini_integra.as_deref(), Some("d"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TalkooClient::new("http://127.0.0.1:8000/".to_string(), None).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.url("/dict/select/"), "http://127.0.0.1:8000/dict/select/");
    }
}

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::{ErrorBody, ServiceError, ServiceResult},
    protocol::{
        ConvertDiagramRequest, DownloadRequest, ExtractDiagramsRequest, ExtractDiagramsResponse,
        SummarizeRequest, SummarizeResponse, CONVERT_DIAGRAM_PATH, DOWNLOAD_PATH,
        EXTRACT_DIAGRAMS_PATH, SUMMARIZE_PATH,
    },
};
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod messages;
pub mod render;
pub mod view;

pub use controller::{SubmitOutcome, SummarySessionController};
pub use messages::{Locale, Messages};
pub use render::{summary_blocks, SummaryBlock};
pub use view::{Control, DiagramMenuEntry, SummaryView};

/// Remote collaborator that summarizes text and converts the results.
///
/// Every call decodes its response once, at this boundary, into either the
/// typed payload or a [`ServiceError`].
#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn summarize(&self, news_text: &str) -> ServiceResult<String>;
    async fn extract_diagrams(&self, summary: &str) -> ServiceResult<Vec<String>>;
    async fn download_summary(&self, summary: &str) -> ServiceResult<Vec<u8>>;
    async fn convert_diagram(
        &self,
        mermaid_code: &str,
        diagram_index: usize,
    ) -> ServiceResult<Vec<u8>>;
}

pub struct HttpSummaryService {
    http: Client,
    server_url: String,
}

impl HttpSummaryService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> ServiceResult<Response> {
        let url = format!("{}{path}", self.server_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(%url, "summarizer request failed to send: {err}");
                ServiceError::Transport(err.to_string())
            })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let err = rejection(response).await;
        warn!(%url, "summarizer rejected request: {err}");
        Err(err)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.post(path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|err| ServiceError::Decode(err.to_string()))
    }

    async fn post_bytes<B: Serialize + Sync>(&self, path: &str, body: &B) -> ServiceResult<Vec<u8>> {
        let bytes = self
            .post(path, body)
            .await?
            .bytes()
            .await
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

async fn rejection(response: Response) -> ServiceError {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error),
        Err(_) => None,
    };
    ServiceError::rejected(status, message)
}

#[async_trait]
impl SummaryService for HttpSummaryService {
    async fn summarize(&self, news_text: &str) -> ServiceResult<String> {
        let response: SummarizeResponse = self
            .post_json(
                SUMMARIZE_PATH,
                &SummarizeRequest {
                    news_text: news_text.to_string(),
                },
            )
            .await?;
        info!(chars = response.summary.len(), "summary received");
        Ok(response.summary)
    }

    async fn extract_diagrams(&self, summary: &str) -> ServiceResult<Vec<String>> {
        let response: ExtractDiagramsResponse = self
            .post_json(
                EXTRACT_DIAGRAMS_PATH,
                &ExtractDiagramsRequest {
                    summary: summary.to_string(),
                },
            )
            .await?;
        info!(
            diagrams = response.mermaid_diagrams.len(),
            "diagram extraction finished"
        );
        Ok(response.mermaid_diagrams)
    }

    async fn download_summary(&self, summary: &str) -> ServiceResult<Vec<u8>> {
        self.post_bytes(
            DOWNLOAD_PATH,
            &DownloadRequest {
                summary: summary.to_string(),
            },
        )
        .await
    }

    async fn convert_diagram(
        &self,
        mermaid_code: &str,
        diagram_index: usize,
    ) -> ServiceResult<Vec<u8>> {
        self.post_bytes(
            CONVERT_DIAGRAM_PATH,
            &ConvertDiagramRequest {
                mermaid_code: mermaid_code.to_string(),
                diagram_index,
            },
        )
        .await
    }
}

/// Builds a controller talking HTTP to `server_url`.
pub fn connect<V: SummaryView>(
    server_url: &str,
    messages: Messages,
    view: V,
) -> Result<SummarySessionController<HttpSummaryService, V>> {
    let server_url = config::prepare_server_url(server_url)?;
    Ok(SummarySessionController::new(
        HttpSummaryService::new(server_url),
        view,
        messages,
    ))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

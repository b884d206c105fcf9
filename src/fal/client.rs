//! Queue-based client for fal image endpoints.
//!
//! - `enqueue` posts a job input to `{queue_url}/{model}`.
//! - `await_completion` polls the ticket's status URL until the job reports
//!   `COMPLETED`, then fetches the result from the response URL.
//! - `subscribe` wraps the three steps into one suspending call, the way the
//!   HTTP handlers consume it; `subscribe_with_updates` additionally forwards
//!   every observed status over a channel for callers that want progress.
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::fal::models::{ImageBatch, QueueTicket, QueueUpdate};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(500);
const SUBSCRIBE_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct FalClient {
    client: Client,
    queue_url: String,
    api_key: Option<String>,
}

impl FalClient {
    pub fn new(config: &Config) -> Self {
        FalClient {
            client: Client::new(),
            queue_url: config.fal_queue_url.trim_end_matches('/').to_string(),
            api_key: config.fal_api_key.clone(),
        }
    }

    fn auth_header(&self) -> AppResult<String> {
        self.api_key
            .as_deref()
            .map(|key| format!("Key {}", key))
            .ok_or(AppError::MissingApiKey("fal"))
    }

    /// Submit a job and suspend until the provider reports completion.
    pub async fn subscribe<T: Serialize>(&self, model: &str, input: &T) -> AppResult<ImageBatch> {
        self.subscribe_with_updates(model, input, None).await
    }

    /// Like [`subscribe`](Self::subscribe), forwarding every observed queue
    /// status over `updates`. A closed receiver does not fail the job.
    pub async fn subscribe_with_updates<T: Serialize>(
        &self,
        model: &str,
        input: &T,
        updates: Option<UnboundedSender<QueueUpdate>>,
    ) -> AppResult<ImageBatch> {
        let ticket = self.enqueue(model, input).await?;
        self.await_completion(&ticket, updates).await?;
        self.fetch_result(&ticket).await
    }

    /// Queue a job with the provider and return its ticket.
    pub async fn enqueue<T: Serialize>(&self, model: &str, input: &T) -> AppResult<QueueTicket> {
        let auth = self.auth_header()?;
        let url = format!("{}/{}", self.queue_url, model);
        tracing::info!("Queueing job at {}", url);

        let response = self.client.post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(input)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("failed to queue job for {}. Status: {}, Body: {}", model, status, error_body);
            tracing::error!("{}", error_message);
            return Err(AppError::Fal(error_message));
        }

        let ticket: QueueTicket = response.json().await.map_err(AppError::HttpClient)?;
        tracing::debug!("Job {} queued", ticket.request_id);
        Ok(ticket)
    }

    async fn await_completion(
        &self,
        ticket: &QueueTicket,
        updates: Option<UnboundedSender<QueueUpdate>>,
    ) -> AppResult<()> {
        let deadline = Instant::now() + SUBSCRIBE_TIMEOUT;
        loop {
            let status = self.poll_status(ticket).await?;
            match &status {
                QueueUpdate::InQueue { queue_position } => {
                    tracing::debug!("Job {} in queue (position {:?})", ticket.request_id, queue_position);
                }
                QueueUpdate::InProgress { logs } => {
                    for line in logs {
                        tracing::debug!("Job {}: {}", ticket.request_id, line.message);
                    }
                }
                QueueUpdate::Completed { .. } => {
                    tracing::info!("Job {} completed", ticket.request_id);
                }
            }
            let completed = status.is_completed();
            if let Some(tx) = &updates {
                let _ = tx.send(status);
            }
            if completed {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(AppError::QueueTimeout(
                    ticket.request_id.clone(),
                    SUBSCRIBE_TIMEOUT.as_secs(),
                ));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn poll_status(&self, ticket: &QueueTicket) -> AppResult<QueueUpdate> {
        let auth = self.auth_header()?;
        let response = self.client.get(&ticket.status_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .query(&[("logs", "1")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AppError::Fal(format!(
                "failed to poll job {}. Status: {}, Body: {}",
                ticket.request_id, status, error_body
            )));
        }

        response.json().await.map_err(AppError::HttpClient)
    }

    async fn fetch_result(&self, ticket: &QueueTicket) -> AppResult<ImageBatch> {
        let auth = self.auth_header()?;
        let response = self.client.get(&ticket.response_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AppError::Fal(format!(
                "failed to fetch result for job {}. Status: {}, Body: {}",
                ticket.request_id, status, error_body
            )));
        }

        response.json().await.map_err(AppError::HttpClient)
    }
}

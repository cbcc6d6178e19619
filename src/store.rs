use crate::errors::{
    FETCH_UNREACHABLE, LOAD_REJECTED_DEFAULT, SAVE_REJECTED_DEFAULT, SAVE_UNREACHABLE, StoreError,
};
use crate::models::{Envelope, EnvelopeStatus, Roster, UpdateRequest};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP client for the spreadsheet-backed record store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    url: String,
}

impl StoreClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_all(&self) -> Result<Roster, StoreError> {
        let envelope: Envelope<Roster> = self
            .exchange(self.http.get(&self.url), FETCH_UNREACHABLE)
            .await?;

        match envelope {
            Envelope {
                status: EnvelopeStatus::Success,
                data: Some(roster),
                ..
            } => {
                debug!(
                    teachers = roster.teachers.len(),
                    centres = roster.centres.len(),
                    "fetched roster"
                );
                Ok(roster)
            }
            Envelope { message, .. } => Err(rejected(message, LOAD_REJECTED_DEFAULT)),
        }
    }

    pub async fn update_centre(&self, hrms_code: &str, centre: &str) -> Result<(), StoreError> {
        let body = UpdateRequest {
            action: "update",
            hrms_code,
            centre,
        };
        let envelope: Envelope<serde_json::Value> = self
            .exchange(self.http.post(&self.url).json(&body), SAVE_UNREACHABLE)
            .await?;

        match envelope.status {
            EnvelopeStatus::Success => {
                debug!(
                    hrms_code,
                    centre,
                    message = envelope.message.as_deref().unwrap_or_default(),
                    "store accepted update"
                );
                Ok(())
            }
            EnvelopeStatus::Error => Err(rejected(envelope.message, SAVE_REJECTED_DEFAULT)),
        }
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        unreachable: &'static str,
    ) -> Result<Envelope<T>, StoreError> {
        let response = request.send().await.map_err(|err| {
            error!("store request failed: {err}");
            StoreError::Unreachable(unreachable)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("store answered with status {status}");
            return Err(StoreError::Unreachable(unreachable));
        }

        let bytes = response.bytes().await.map_err(|err| {
            error!("failed to read store response: {err}");
            StoreError::Unreachable(unreachable)
        })?;

        serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse store response: {err}");
            StoreError::Unreachable(unreachable)
        })
    }
}

fn rejected(message: Option<String>, fallback: &str) -> StoreError {
    let message = message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    error!("store rejected request: {message}");
    StoreError::Rejected(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_store_message_verbatim() {
        assert_eq!(
            rejected(Some("419255 not found".into()), SAVE_REJECTED_DEFAULT),
            StoreError::Rejected("419255 not found".into())
        );
    }

    #[test]
    fn rejected_falls_back_when_message_is_blank() {
        assert_eq!(
            rejected(Some("  ".into()), LOAD_REJECTED_DEFAULT),
            StoreError::Rejected(LOAD_REJECTED_DEFAULT.into())
        );
        assert_eq!(
            rejected(None, SAVE_REJECTED_DEFAULT),
            StoreError::Rejected(SAVE_REJECTED_DEFAULT.into())
        );
    }

    #[tokio::test]
    async fn unreachable_store_maps_to_fetch_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client =
            StoreClient::new(format!("http://127.0.0.1:{port}/"), Duration::from_secs(2)).unwrap();
        assert_eq!(
            client.fetch_all().await.unwrap_err(),
            StoreError::Unreachable(FETCH_UNREACHABLE)
        );
        assert_eq!(
            client.update_centre("1", "ABC").await.unwrap_err(),
            StoreError::Unreachable(SAVE_UNREACHABLE)
        );
    }
}

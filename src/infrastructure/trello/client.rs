//! # Trello Client
//!
//! Implements `BoardService` over the Trello REST API. Credentials travel as query
//! parameters, so error messages are built from the error kind, never from the URL.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::wire::{WireBoard, WireCard, WireList};
use crate::domain::config::TrelloConfig;
use crate::domain::errors::TrackerError;
use crate::domain::traits::BoardService;
use crate::domain::types::{BacklogItem, BoardRef, ListRef};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CARD_FIELDS: &str = "name,desc,labels,due";

pub struct TrelloClient {
    http: Client,
    base_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(config: &TrelloConfig) -> Result<Self, TrackerError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|_| TrackerError::Unavailable("failed to build HTTP client".to_string()))?;
        Ok(Self {
            http,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            key: config.key.clone(),
            token: config.token.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TrackerError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("Trello GET {}", path);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| TrackerError::Unavailable(describe_transport_error(&e)))?;

        if let Some(err) = classify_status(response.status(), path) {
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|_| TrackerError::Unavailable(format!("malformed response from {path}")))
    }

    async fn lists(&self, board_id: &str, with_cards: bool) -> Result<Vec<WireList>, TrackerError> {
        let path = format!("boards/{board_id}/lists");
        let cards = if with_cards { "open" } else { "none" };
        self.get(
            &path,
            &[("cards", cards), ("card_fields", CARD_FIELDS), ("fields", "name")],
        )
        .await
    }
}

/// Maps a non-success status to a tracker error; `None` for success.
pub fn classify_status(status: StatusCode, path: &str) -> Option<TrackerError> {
    if status.is_success() {
        return None;
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            Some(TrackerError::NotFound(format!("{path} ({status})")))
        }
        _ => Some(TrackerError::Unavailable(format!("{path} returned {status}"))),
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        "request failed".to_string()
    }
}

#[async_trait]
impl BoardService for TrelloClient {
    async fn boards(&self) -> Result<Vec<BoardRef>, TrackerError> {
        let boards: Vec<WireBoard> = self
            .get("members/me/boards", &[("fields", "name"), ("filter", "open")])
            .await?;
        Ok(boards.into_iter().map(BoardRef::from).collect())
    }

    async fn board_cards(&self, board_id: &str) -> Result<Vec<BacklogItem>, TrackerError> {
        Ok(self
            .lists(board_id, true)
            .await?
            .into_iter()
            .flat_map(WireList::into_items)
            .collect())
    }

    async fn board_lists(&self, board_id: &str) -> Result<Vec<ListRef>, TrackerError> {
        Ok(self
            .lists(board_id, false)
            .await?
            .iter()
            .map(WireList::list_ref)
            .collect())
    }

    async fn list_cards(&self, list: &ListRef) -> Result<Vec<BacklogItem>, TrackerError> {
        let path = format!("lists/{}/cards", list.id);
        let cards: Vec<WireCard> = self.get(&path, &[("fields", CARD_FIELDS)]).await?;
        Ok(cards
            .into_iter()
            .map(|card| card.into_item(&list.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: Option<&str>) -> TrelloConfig {
        TrelloConfig {
            key: "key".to_string(),
            token: "token".to_string(),
            interval: 300,
            notify_channel: None,
            base_url: base_url.map(str::to_string),
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify_status(StatusCode::OK, "boards"), None);
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "boards"),
            Some(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "boards/x/lists"),
            Some(TrackerError::NotFound(_))
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "boards"),
            Some(TrackerError::Unavailable(_))
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "boards"),
            Some(TrackerError::Unavailable(_))
        ));
    }

    #[test]
    fn test_base_url_defaults_and_trims() {
        let client = TrelloClient::new(&config(None)).unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        let client = TrelloClient::new(&config(Some("http://localhost:9000/1/"))).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/1");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = TrelloClient::new(&config(Some("http://127.0.0.1:9"))).unwrap();
        let err = client.boards().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!err.to_string().contains("token"));
    }
}

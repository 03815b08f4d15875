use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Board;
use crate::config::LinkConfig;
use crate::error::TrelloError;
use crate::model::attachment::Attachment;
use crate::model::card_ref::CardRef;

pub struct TrelloClient {
    api_key: String,
    token: String,
    base: String,
    client: reqwest::Client,
}

impl TrelloClient {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            token: config.token.clone(),
            base: config.api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.api_key), ("token", &self.token)]
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, TrelloError> {
        let response = request
            .query(&self.auth_params())
            .send()
            .await
            .map_err(|source| TrelloError::Request {
                url: url.to_string(),
                source: source.without_url(),
            })?;

        let status = response.status();
        debug!(%url, %status, "Trello responded");
        if !status.is_success() {
            return Err(TrelloError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

#[derive(Deserialize)]
struct Card {
    id: String,
}

#[derive(Serialize)]
struct NewAttachment<'a> {
    url: &'a str,
    name: &'a str,
}

#[async_trait]
impl Board for TrelloClient {
    async fn get_card_on_board(
        &self,
        board_id: &str,
        card_ref: &CardRef,
    ) -> Result<String, TrelloError> {
        info!(board_id, card_ref = %card_ref, "Looking up card on board");
        let url = format!(
            "{}/boards/{}/cards/{}",
            self.base,
            urlencoding::encode(board_id),
            urlencoding::encode(card_ref.as_str())
        );

        let card: Card = self
            .send(&url, self.client.get(&url))
            .await?
            .json()
            .await
            .map_err(|source| TrelloError::Decode {
                url: url.clone(),
                source: source.without_url(),
            })?;
        Ok(card.id)
    }

    async fn list_attachments(&self, card_id: &str) -> Result<Vec<Attachment>, TrelloError> {
        info!(card_id, "Fetching card attachments");
        let url = format!("{}/cards/{}/attachments", self.base, urlencoding::encode(card_id));

        self.send(&url, self.client.get(&url))
            .await?
            .json()
            .await
            .map_err(|source| TrelloError::Decode {
                url: url.clone(),
                source: source.without_url(),
            })
    }

    async fn create_attachment(
        &self,
        card_id: &str,
        link: &str,
        name: &str,
    ) -> Result<bool, TrelloError> {
        info!(card_id, link, "Adding attachment to card");
        let url = format!("{}/cards/{}/attachments", self.base, urlencoding::encode(card_id));

        let body = NewAttachment { url: link, name };
        let response = self.send(&url, self.client.post(&url).json(&body)).await?;
        Ok(response.status() == StatusCode::OK)
    }
}

//! HipChat REST transport.

use crate::{Authorizer, Notification, RoomMessenger, SharedMessenger};
use async_trait::async_trait;
use cinema_error::{HttpError, SinkError};
use cinema_playback::RoomId;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const SEND_NOTIFICATION_SCOPE: &str = "send_notification";

/// OAuth access token issued for an installation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// Bearer token
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}

/// Sends notifications to one HipChat room.
#[derive(Debug, Clone)]
pub struct RoomClient {
    http: reqwest::Client,
    api_base: String,
    room: RoomId,
    token: String,
}

impl RoomClient {
    /// Create a client for `room` using `token`.
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        room: RoomId,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            room,
            token: token.into(),
        }
    }

    /// Endpoint notifications are posted to.
    pub fn notification_url(&self) -> String {
        format!(
            "{}/v2/room/{}/notification",
            self.api_base.trim_end_matches('/'),
            self.room
        )
    }
}

#[async_trait]
impl RoomMessenger for RoomClient {
    #[instrument(skip(self, notification), fields(room = %self.room, from = %notification.from()))]
    async fn send(&self, notification: &Notification) -> Result<(), SinkError> {
        let response = self
            .http
            .post(self.notification_url())
            .bearer_auth(&self.token)
            .json(notification)
            .send()
            .await
            .map_err(|e| SinkError::new(format!("Notification request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "Notification sent");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, body = %body, "Notification rejected");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Err(
                SinkError::fatal(format!("Room rejected notification ({}): {}", status, body)),
            ),
            _ => Err(SinkError::new(format!(
                "Notification failed ({}): {}",
                status, body
            ))),
        }
    }
}

/// Authorizer that exchanges add-on credentials for a HipChat token.
#[derive(Debug, Clone)]
pub struct HipChatAuthorizer {
    http: reqwest::Client,
    api_base: String,
}

impl HipChatAuthorizer {
    /// Create an authorizer against `api_base`.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Request a token with the `send_notification` scope.
    #[instrument(skip(self, client_secret))]
    pub async fn generate_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, HttpError> {
        let url = format!("{}/v2/oauth/token", self.api_base.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", SEND_NOTIFICATION_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::new(format!(
                "Token request rejected ({}): {}",
                status, body
            )));
        }

        let token = response
            .json::<AccessToken>()
            .await
            .map_err(|e| HttpError::new(format!("Invalid token response: {}", e)))?;
        debug!(expires_in = ?token.expires_in, "Token issued");
        Ok(token)
    }
}

#[async_trait]
impl Authorizer for HipChatAuthorizer {
    async fn authorize(
        &self,
        client_id: &str,
        client_secret: &str,
        room: &RoomId,
    ) -> Result<SharedMessenger, HttpError> {
        let token = self.generate_token(client_id, client_secret).await?;
        Ok(Arc::new(RoomClient::new(
            self.http.clone(),
            self.api_base.clone(),
            room.clone(),
            token.access_token,
        )))
    }
}

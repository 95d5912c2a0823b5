//! Room notifications and the playback sink built on them.

use async_trait::async_trait;
use cinema_core::{Color, Line, Scene};
use cinema_error::{HttpError, SinkError};
use cinema_playback::{EmitSink, RoomId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Sender shown on scene intros.
const NARRATOR: &str = "Cinema";

/// A colored, attributed message for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Notification {
    /// Message body
    message: String,
    /// Body format, always `html`
    message_format: String,
    /// Background color
    color: Color,
    /// Display name of the sender
    from: String,
    /// Whether the room should be alerted
    notify: bool,
}

impl Notification {
    /// Create an HTML notification.
    pub fn new(message: impl Into<String>, color: Color, from: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_format: "html".to_string(),
            color,
            from: from.into(),
            notify: false,
        }
    }

    /// Notification for one line of a scene.
    ///
    /// Dialogue is sent in the actor's scene color under the actor's name;
    /// intros go out in gray from the narrator.
    pub fn for_line(scene: &Scene, line: &Line) -> Self {
        if line.is_intro() {
            return Self::new(line.text().clone(), Color::Gray, NARRATOR);
        }
        let color = scene.color_of(line.actor()).unwrap_or(Color::Gray);
        Self::new(line.text().clone(), color, line.actor().clone())
    }
}

/// Sends notifications to one room.
#[async_trait]
pub trait RoomMessenger: Send + Sync {
    /// Deliver a notification.
    ///
    /// # Errors
    ///
    /// A fatal [`SinkError`] means the room can no longer be reached.
    async fn send(&self, notification: &Notification) -> Result<(), SinkError>;
}

/// Shareable messenger handle.
pub type SharedMessenger = Arc<dyn RoomMessenger>;

/// Playback sink that turns lines into room notifications.
pub struct RoomSink {
    messenger: SharedMessenger,
}

impl RoomSink {
    /// Wrap a messenger.
    pub fn new(messenger: SharedMessenger) -> Self {
        Self { messenger }
    }
}

#[async_trait]
impl EmitSink for RoomSink {
    async fn emit(&self, scene: &Scene, line: &Line) -> Result<(), SinkError> {
        self.messenger
            .send(&Notification::for_line(scene, line))
            .await
    }
}

/// Messenger that only logs, for running without a chat service.
#[derive(Debug, Clone)]
pub struct LogMessenger {
    room: RoomId,
}

impl LogMessenger {
    /// Create a logging messenger for `room`.
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomMessenger for LogMessenger {
    async fn send(&self, notification: &Notification) -> Result<(), SinkError> {
        info!(
            room = %self.room,
            from = %notification.from,
            color = %notification.color,
            message = %notification.message,
            "Notification"
        );
        Ok(())
    }
}

/// Exchanges installation credentials for a room messenger.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Authorize the add-on for `room`.
    async fn authorize(
        &self,
        client_id: &str,
        client_secret: &str,
        room: &RoomId,
    ) -> Result<SharedMessenger, HttpError>;
}

/// Authorizer that accepts every installation and logs instead of sending.
#[derive(Debug, Clone, Default)]
pub struct DryRunAuthorizer;

#[async_trait]
impl Authorizer for DryRunAuthorizer {
    async fn authorize(
        &self,
        client_id: &str,
        _client_secret: &str,
        room: &RoomId,
    ) -> Result<SharedMessenger, HttpError> {
        info!(client_id, %room, "Dry run authorization");
        Ok(Arc::new(LogMessenger::new(room.clone())))
    }
}

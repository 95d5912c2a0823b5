//! Shared fakes for server tests.

#![allow(dead_code)]

use async_trait::async_trait;
use cinema_core::Color;
use cinema_error::{HttpError, SinkError};
use cinema_playback::{RoomId, Scheduler, Theater};
use cinema_script::{FixedColor, MovieLibrary, ScriptParser};
use cinema_server::{Authorizer, Cinema, Notification, RoomMessenger, SharedMessenger};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const HOLY_GRAIL: &str = "\
SCENE: A bridge over the Gorge of Eternal Peril
Bridgekeeper: What... is your name?
Arthur: It is Arthur, King of the Britons.
SCENE: The Black Knight
Black Knight: 'Tis but a scratch.
";

/// Records every notification sent to any room.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent().iter().map(|n| n.message().clone()).collect()
    }
}

#[async_trait]
impl RoomMessenger for RecordingMessenger {
    async fn send(&self, notification: &Notification) -> Result<(), SinkError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Hands out the same recording messenger for every room, or refuses.
pub struct FakeAuthorizer {
    pub messenger: Arc<RecordingMessenger>,
    pub refuse: bool,
}

#[async_trait]
impl Authorizer for FakeAuthorizer {
    async fn authorize(
        &self,
        _client_id: &str,
        client_secret: &str,
        _room: &RoomId,
    ) -> Result<SharedMessenger, HttpError> {
        if self.refuse || client_secret.is_empty() {
            return Err(HttpError::new("401 Unauthorized"));
        }
        Ok(self.messenger.clone() as SharedMessenger)
    }
}

pub fn write_movie(root: &Path, id: &str, script: &str) {
    let dir = root.join(id);
    std::fs::create_dir_all(&dir).expect("movie dir");
    std::fs::write(dir.join("script.txt"), script).expect("script");
}

/// A bot over `root` allowing `hackers` and `the_holy_grail`, playing with
/// the given delay scale.
pub fn cinema(root: &Path, delay_scale: f64) -> (Cinema, Arc<RecordingMessenger>) {
    let messenger = Arc::new(RecordingMessenger::default());
    let library = MovieLibrary::new(root, ["hackers", "the_holy_grail"])
        .with_parser(ScriptParser::new(FixedColor(Color::Yellow)));
    let cinema = Cinema::with_library(
        library,
        Theater::new(Scheduler::with_delay_scale(delay_scale)),
        Arc::new(FakeAuthorizer {
            messenger: Arc::clone(&messenger),
            refuse: false,
        }),
    )
    .with_bot_name("Hipchat Cinema")
    .with_base_url("https://cinema.example.com/");
    (cinema, messenger)
}

//! Room installations and command handling.

use crate::{Authorizer, Command, Notification, RoomSink, ServerConfig, SharedMessenger};
use cinema_core::Color;
use cinema_error::CinemaResult;
use cinema_playback::{RoomId, Scheduler, StopStatus, Theater};
use cinema_script::MovieLibrary;
use derive_getters::Getters;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// A message the bot sent back to a room.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reply {
    /// Message body
    message: String,
    /// Green for information, red for errors
    color: Color,
}

impl Reply {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            color: Color::Green,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            color: Color::Red,
        }
    }
}

/// Whether a reply still has to be delivered.
enum Outcome {
    Pending(Reply),
    Sent(Reply),
}

#[derive(Clone)]
struct Installation {
    room: RoomId,
    messenger: SharedMessenger,
}

/// The running bot: installed rooms, the movie library and the theater.
///
/// Installations are keyed by the add-on's OAuth client id, which is what
/// webhook calls identify themselves with.
#[derive(Clone)]
pub struct Cinema {
    theater: Theater,
    library: MovieLibrary,
    authorizer: Arc<dyn Authorizer>,
    installations: Arc<Mutex<HashMap<String, Installation>>>,
    bot_name: String,
    base_url: String,
}

impl Cinema {
    /// Build the bot from configuration.
    pub fn new(config: &ServerConfig, authorizer: Arc<dyn Authorizer>) -> Self {
        let library = MovieLibrary::new(config.movies_dir().clone(), config.allowed_movies().clone());
        Self::with_library(
            library,
            Theater::new(Scheduler::with_delay_scale(*config.delay_scale())),
            authorizer,
        )
        .with_bot_name(config.bot_name().clone())
        .with_base_url(config.base_url().clone())
    }

    /// Build the bot from explicit parts.
    pub fn with_library(
        library: MovieLibrary,
        theater: Theater,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            theater,
            library,
            authorizer,
            installations: Arc::new(Mutex::new(HashMap::new())),
            bot_name: "Hipchat Cinema".to_string(),
            base_url: String::new(),
        }
    }

    /// Set the sender name used on replies.
    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    /// Set the public URL advertised in the descriptor.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Public URL of the add-on.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sender name used on replies.
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Playback registry.
    pub fn theater(&self) -> &Theater {
        &self.theater
    }

    /// Allowed movies.
    pub fn library(&self) -> &MovieLibrary {
        &self.library
    }

    /// Room installed under `client_id`.
    pub fn room_for(&self, client_id: &str) -> Option<RoomId> {
        self.installations
            .lock()
            .get(client_id)
            .map(|i| i.room.clone())
    }

    /// Register an installation and its room.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials cannot be exchanged for a token.
    #[instrument(skip(self, client_secret))]
    pub async fn install(
        &self,
        client_id: &str,
        client_secret: &str,
        room: RoomId,
    ) -> CinemaResult<()> {
        let messenger = self
            .authorizer
            .authorize(client_id, client_secret, &room)
            .await?;

        self.theater
            .install(room.clone(), Arc::new(RoomSink::new(Arc::clone(&messenger))));

        let abandoned = {
            let mut installations = self.installations.lock();
            let previous = installations.insert(
                client_id.to_string(),
                Installation {
                    room: room.clone(),
                    messenger,
                },
            );
            previous.map(|p| p.room).filter(|previous_room| {
                *previous_room != room && !installations.values().any(|i| i.room == *previous_room)
            })
        };

        if let Some(previous_room) = abandoned {
            self.theater.uninstall(&previous_room);
            info!(%previous_room, "Moved installation to a new room");
        }
        info!("Installation registered");
        Ok(())
    }

    /// Remove an installation, stopping any movie in its room.
    ///
    /// Returns whether the client was registered.
    #[instrument(skip(self))]
    pub fn uninstall(&self, client_id: &str) -> bool {
        let removed = self.installations.lock().remove(client_id);
        match removed {
            Some(installation) => {
                self.theater.uninstall(&installation.room);
                info!(room = %installation.room, "Installation removed");
                true
            }
            None => {
                warn!("Not a registered client id");
                false
            }
        }
    }

    /// Handle a chat message sent to the bot.
    ///
    /// Returns the reply sent to the room, or `None` if the client is not
    /// registered. Nothing here fails the request: load errors and policy
    /// conflicts become replies.
    #[instrument(skip(self))]
    pub async fn handle_message(&self, client_id: &str, message: &str) -> Option<Reply> {
        let Some(installation) = self.installations.lock().get(client_id).cloned() else {
            warn!("Client id is not registered");
            return None;
        };

        let outcome = match Command::parse(message) {
            Some(command) => {
                info!(%command, room = %installation.room, "Received command");
                self.run_command(&installation, command).await
            }
            None => Outcome::Pending(Reply::info(format!(
                "Unknown command: {}",
                message.trim()
            ))),
        };

        match outcome {
            Outcome::Sent(reply) => Some(reply),
            Outcome::Pending(reply) => {
                self.send_reply(&installation, &reply).await;
                Some(reply)
            }
        }
    }

    async fn run_command(&self, installation: &Installation, command: Command) -> Outcome {
        let room = &installation.room;
        match command {
            Command::Stop => Outcome::Pending(match self.theater.stop(room) {
                Ok(StopStatus::Stopped { .. }) => Reply::info("Movie stopped"),
                Ok(StopStatus::NotPlaying) => Reply::info("Movie is not playing!"),
                Err(e) => {
                    error!(error = %e, "Stop failed");
                    Reply::error("Room is not registered!")
                }
            }),
            Command::Play(identifier) => self.play(installation, &identifier).await,
        }
    }

    async fn play(&self, installation: &Installation, identifier: &str) -> Outcome {
        let room = &installation.room;

        if self.theater.is_playing(room) {
            return Outcome::Pending(Reply::info("Movie is already playing!"));
        }

        if !self.library.is_allowed(identifier) {
            return Outcome::Pending(Reply::info(format!(
                "Allowed movies are [{}]",
                self.library.allowed().join(", ")
            )));
        }

        let movie = match self.library.load(identifier).await {
            Ok(movie) => Arc::new(movie),
            Err(e) => {
                error!(error = %e, movie = identifier, "Failed to load movie");
                return Outcome::Pending(Reply::error("Error parsing movie file!"));
            }
        };

        // Only the request holding the reservation may confirm, and the
        // confirmation has to reach the room before the first scene does.
        let title = movie.title().clone();
        let reservation = match self.theater.reserve(room, &title) {
            Ok(reservation) => reservation,
            Err(e) if e.is_policy() => {
                return Outcome::Pending(Reply::info("Movie is already playing!"));
            }
            Err(e) => {
                error!(error = %e, "Failed to reserve room");
                return Outcome::Pending(Reply::error("Room is not registered!"));
            }
        };

        let confirmation = Reply::info(format!("Got it, now playing \"{}\"", title));
        self.send_reply(installation, &confirmation).await;

        let ticket = reservation.start(movie);
        info!(run = ticket.run_id(), %title, "Movie started");
        Outcome::Sent(confirmation)
    }

    async fn send_reply(&self, installation: &Installation, reply: &Reply) {
        let notification = Notification::new(reply.message.clone(), reply.color, &self.bot_name);
        if let Err(e) = installation.messenger.send(&notification).await {
            warn!(error = %e, room = %installation.room, "Failed to send reply");
        }
    }
}

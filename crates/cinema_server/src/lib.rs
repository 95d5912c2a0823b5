//! Webhook server for Cinema.
//!
//! Rooms install the bot through the HipChat add-on flow. Users then type
//! `/play <movie>` or `/stop`, and the bot narrates the movie into the room
//! one colored notification at a time.
//!
//! # Architecture
//!
//! - **Commands**: [`Command`] parses `/play` and `/stop`
//! - **Messaging**: [`RoomMessenger`] sends notifications, [`RoomSink`]
//!   adapts it to playback
//! - **Authorization**: [`Authorizer`] turns an installation into a messenger
//! - **Application**: [`Cinema`] ties rooms, the movie library and the
//!   [`cinema_playback::Theater`] together
//! - **HTTP**: [`create_router`] exposes the add-on endpoints

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod app;
mod command;
mod config;
mod hipchat;
mod messenger;

pub use api::{HookItem, HookMessage, HookPayload, InstallPayload, create_router, descriptor};
pub use app::{Cinema, Reply};
pub use command::Command;
pub use config::{ServerConfig, ServerConfigBuilder};
pub use hipchat::{AccessToken, HipChatAuthorizer, RoomClient};
pub use messenger::{
    Authorizer, DryRunAuthorizer, LogMessenger, Notification, RoomMessenger, RoomSink,
    SharedMessenger,
};

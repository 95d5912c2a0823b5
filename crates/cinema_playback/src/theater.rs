//! Per-room playback registry.

use crate::{PlaybackReport, Scheduler, SharedSink, StopHandle, StopSignal, stop_signal};
use cinema_core::Movie;
use cinema_error::{PlaybackError, PlaybackErrorKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

/// Chat room a movie plays in.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, derive_more::From,
)]
#[display("{}", _0)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Result of a stop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopStatus {
    /// A run was active and has been told to stop
    Stopped {
        /// Title of the movie that was playing
        title: String,
    },
    /// Nothing was playing; nothing changed
    NotPlaying,
}

/// Handle to a run started by [`Theater::play`].
#[derive(Debug)]
pub struct PlayTicket {
    run_id: u64,
    task: JoinHandle<PlaybackReport>,
}

impl PlayTicket {
    /// Identifier of the run, unique within the theater.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Wait for the run to end.
    ///
    /// Returns `None` if the playback task panicked or was aborted.
    pub async fn finished(self) -> Option<PlaybackReport> {
        match self.task.await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(run = self.run_id, error = %e, "Playback task did not finish");
                None
            }
        }
    }
}

struct ActiveRun {
    id: u64,
    title: String,
    stop: StopHandle,
}

struct Room {
    sink: SharedSink,
    run: Option<ActiveRun>,
}

struct TheaterInner {
    rooms: Mutex<HashMap<RoomId, Room>>,
    next_run: AtomicU64,
    scheduler: Scheduler,
}

impl TheaterInner {
    /// Clear the room's run if it is still the one that just ended.
    fn finish(&self, room: &RoomId, run_id: u64) {
        let mut rooms = self.rooms.lock();
        if let Some(entry) = rooms.get_mut(room)
            && entry.run.as_ref().is_some_and(|run| run.id == run_id)
        {
            entry.run = None;
            debug!(%room, run = run_id, "Room is idle");
        }
    }
}

/// A room claimed by [`Theater::reserve`].
///
/// The room stays busy for as long as this value lives. It moves into the
/// playback task on [`Reservation::start`], so the room is freed when the
/// run ends, whether it completes, is stopped or panics.
#[must_use = "dropping a reservation frees the room"]
pub struct Reservation {
    inner: Arc<TheaterInner>,
    room: RoomId,
    run_id: u64,
    sink: SharedSink,
    signal: StopSignal,
}

impl Reservation {
    /// Identifier of the run, unique within the theater.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Room this reservation holds.
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Play `movie` on its own task. Must be called from within a Tokio
    /// runtime.
    ///
    /// A stop requested while the room was only reserved is honored: the
    /// run ends before its first line.
    pub fn start(self, movie: Arc<Movie>) -> PlayTicket {
        let run_id = self.run_id;
        let span = info_span!("playback", room = %self.room, run = run_id, title = %movie.title());
        let task = tokio::spawn(
            async move {
                let report = self
                    .inner
                    .scheduler
                    .play(&movie, &self.signal, &*self.sink)
                    .await;
                drop(self);
                report
            }
            .instrument(span),
        );

        info!(run = run_id, "Playback scheduled");
        PlayTicket { run_id, task }
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.inner.finish(&self.room, self.run_id);
    }
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("room", &self.room)
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}

/// Registry of installed rooms and their in-flight playback.
///
/// Each room has at most one active run. Every read and write of room state
/// goes through one lock, so two concurrent reservations cannot both succeed
/// and a run finishing on its own never clears a newer run.
///
/// Cloning is cheap; clones share the same rooms.
#[derive(Clone)]
pub struct Theater {
    inner: Arc<TheaterInner>,
}

impl Theater {
    /// Create an empty theater that plays movies with `scheduler`.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(TheaterInner {
                rooms: Mutex::new(HashMap::new()),
                next_run: AtomicU64::new(1),
                scheduler,
            }),
        }
    }

    /// Register a room. Reinstalling stops the room's current run.
    #[instrument(skip(self, sink))]
    pub fn install(&self, room: RoomId, sink: SharedSink) {
        let mut rooms = self.inner.rooms.lock();
        if let Some(previous) = rooms.insert(room, Room { sink, run: None })
            && let Some(run) = previous.run
        {
            run.stop.stop();
            info!(title = %run.title, "Stopped playback of reinstalled room");
        }
        info!("Room installed");
    }

    /// Remove a room, stopping its run. Returns whether it was installed.
    #[instrument(skip(self))]
    pub fn uninstall(&self, room: &RoomId) -> bool {
        let removed = self.inner.rooms.lock().remove(room);
        match removed {
            Some(entry) => {
                if let Some(run) = entry.run {
                    run.stop.stop();
                }
                info!("Room uninstalled");
                true
            }
            None => {
                debug!("Room was not installed");
                false
            }
        }
    }

    /// Whether `room` is installed.
    pub fn is_installed(&self, room: &RoomId) -> bool {
        self.inner.rooms.lock().contains_key(room)
    }

    /// Installed rooms, sorted.
    pub fn rooms(&self) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self.inner.rooms.lock().keys().cloned().collect();
        rooms.sort();
        rooms
    }

    /// Whether a movie is playing in `room`.
    pub fn is_playing(&self, room: &RoomId) -> bool {
        self.now_playing(room).is_some()
    }

    /// Title of the movie playing in `room`.
    pub fn now_playing(&self, room: &RoomId) -> Option<String> {
        self.inner
            .rooms
            .lock()
            .get(room)
            .and_then(|entry| entry.run.as_ref().map(|run| run.title.clone()))
    }

    /// Claim `room` for a movie titled `title` without starting it.
    ///
    /// From here until the reservation is dropped the room reports as
    /// playing and further reservations are rejected. Dropping it without
    /// calling [`Reservation::start`] frees the room.
    ///
    /// # Errors
    ///
    /// - `UnknownRoom` if the room was never installed
    /// - `AlreadyPlaying` if a run is active or reserved in the room
    #[instrument(skip(self))]
    pub fn reserve(&self, room: &RoomId, title: &str) -> Result<Reservation, PlaybackError> {
        let (handle, signal) = stop_signal();

        let mut rooms = self.inner.rooms.lock();
        let entry = rooms
            .get_mut(room)
            .ok_or_else(|| PlaybackError::new(PlaybackErrorKind::UnknownRoom(room.0.clone())))?;

        if let Some(run) = &entry.run {
            warn!(playing = %run.title, "Rejected play, room is busy");
            return Err(PlaybackError::new(PlaybackErrorKind::AlreadyPlaying(
                room.0.clone(),
            )));
        }

        let run_id = self.inner.next_run.fetch_add(1, Ordering::Relaxed);
        entry.run = Some(ActiveRun {
            id: run_id,
            title: title.to_string(),
            stop: handle,
        });
        debug!(run = run_id, "Room reserved");

        Ok(Reservation {
            inner: Arc::clone(&self.inner),
            room: room.clone(),
            run_id,
            sink: Arc::clone(&entry.sink),
            signal,
        })
    }

    /// Start playing `movie` in `room` on its own task.
    ///
    /// Shorthand for [`Theater::reserve`] followed by [`Reservation::start`].
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`Theater::reserve`].
    pub fn play(&self, room: &RoomId, movie: Arc<Movie>) -> Result<PlayTicket, PlaybackError> {
        let reservation = self.reserve(room, movie.title())?;
        Ok(reservation.start(movie))
    }

    /// Ask the run in `room` to stop.
    ///
    /// Stopping an idle room is a no-op reported as
    /// [`StopStatus::NotPlaying`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownRoom` if the room was never installed.
    #[instrument(skip(self))]
    pub fn stop(&self, room: &RoomId) -> Result<StopStatus, PlaybackError> {
        let mut rooms = self.inner.rooms.lock();
        let entry = rooms
            .get_mut(room)
            .ok_or_else(|| PlaybackError::new(PlaybackErrorKind::UnknownRoom(room.0.clone())))?;

        match entry.run.take() {
            Some(run) => {
                run.stop.stop();
                info!(title = %run.title, run = run.id, "Playback stop requested");
                Ok(StopStatus::Stopped { title: run.title })
            }
            None => {
                debug!("Stop requested but nothing is playing");
                Ok(StopStatus::NotPlaying)
            }
        }
    }
}

impl Default for Theater {
    fn default() -> Self {
        Self::new(Scheduler::new())
    }
}

impl std::fmt::Debug for Theater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theater")
            .field("rooms", &self.rooms())
            .field("scheduler", &self.inner.scheduler)
            .finish()
    }
}

//! Where emitted lines go.

use async_trait::async_trait;
use cinema_core::{Line, Scene};
use cinema_error::SinkError;
use std::sync::Arc;
use tracing::info;

/// Delivers one line of a movie to its audience.
///
/// Recoverable errors are logged and playback moves on. A fatal
/// [`SinkError`] ends the run.
#[async_trait]
pub trait EmitSink: Send + Sync {
    /// Deliver `line`, which belongs to `scene`.
    ///
    /// Intro lines are passed too; check [`Line::is_intro`].
    async fn emit(&self, scene: &Scene, line: &Line) -> Result<(), SinkError>;
}

/// Shareable sink handle, as stored per room.
pub type SharedSink = Arc<dyn EmitSink>;

#[async_trait]
impl<T> EmitSink for Arc<T>
where
    T: EmitSink + ?Sized,
{
    async fn emit(&self, scene: &Scene, line: &Line) -> Result<(), SinkError> {
        (**self).emit(scene, line).await
    }
}

/// Sink that writes lines to the log.
///
/// Used for dry runs where no chat service is configured.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

#[async_trait]
impl EmitSink for TracingSink {
    async fn emit(&self, scene: &Scene, line: &Line) -> Result<(), SinkError> {
        if line.is_intro() {
            info!(text = %line.text(), "Scene");
        } else {
            let color = scene
                .color_of(line.actor())
                .map(|c| c.as_str())
                .unwrap_or("gray");
            info!(actor = %line.actor(), color, text = %line.text(), "Line");
        }
        Ok(())
    }
}

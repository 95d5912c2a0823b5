//! Sequential, cancellable playback of one movie.

use crate::{EmitSink, StopSignal};
use cinema_core::Movie;
use derive_getters::Getters;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlaybackOutcome {
    /// Every line was emitted
    #[display("completed")]
    Completed,
    /// The stop signal ended the run
    #[display("stopped")]
    Stopped,
    /// The sink reported a fatal error
    #[display("aborted")]
    Aborted,
}

/// Summary of a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PlaybackReport {
    /// How the run ended
    outcome: PlaybackOutcome,
    /// Scene intros handed to the sink
    intros: usize,
    /// Dialogue lines handed to the sink
    lines: usize,
    /// Emissions the sink reported as failed
    sink_failures: usize,
}

impl PlaybackReport {
    fn started() -> Self {
        Self {
            outcome: PlaybackOutcome::Completed,
            intros: 0,
            lines: 0,
            sink_failures: 0,
        }
    }

    fn finish(mut self, outcome: PlaybackOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Intros plus dialogue lines.
    pub fn emitted(&self) -> usize {
        self.intros + self.lines
    }
}

/// Walks a movie line by line.
///
/// For every scene the intro goes out first, then the dialogue in script
/// order. The stop signal is checked before each emission, and each pause
/// races the signal so a stop never waits out a long line. Intros carry no
/// delay.
///
/// The scheduler holds no per-run state; give every run its own
/// [`StopSignal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduler {
    delay_scale: f64,
}

impl Scheduler {
    /// Scheduler that honors line delays as written.
    pub fn new() -> Self {
        Self { delay_scale: 1.0 }
    }

    /// Scheduler that multiplies every delay by `scale`.
    ///
    /// Negative or non-finite scales fall back to `1.0`.
    pub fn with_delay_scale(scale: f64) -> Self {
        let delay_scale = if scale.is_finite() && scale >= 0.0 {
            scale
        } else {
            1.0
        };
        Self { delay_scale }
    }

    /// Multiplier applied to line delays.
    pub fn delay_scale(&self) -> f64 {
        self.delay_scale
    }

    fn pause_for(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.delay_scale)
    }

    /// Emit every line of `movie` through `sink` until done or stopped.
    #[instrument(skip_all, fields(title = %movie.title()))]
    pub async fn play(
        &self,
        movie: &Movie,
        stop: &StopSignal,
        sink: &dyn EmitSink,
    ) -> PlaybackReport {
        info!(scenes = movie.scenes().len(), "Playback started");
        let mut report = PlaybackReport::started();

        for (scene_index, scene) in movie.scenes().iter().enumerate() {
            debug!(scene = scene_index, "Scene");

            for line in scene.script() {
                if stop.is_stopped() {
                    info!(emitted = report.emitted(), "Playback stopped");
                    return report.finish(PlaybackOutcome::Stopped);
                }

                if line.is_intro() {
                    report.intros += 1;
                } else {
                    report.lines += 1;
                }

                if let Err(e) = sink.emit(scene, line).await {
                    report.sink_failures += 1;
                    if e.is_fatal() {
                        error!(error = %e, actor = %line.actor(), "Sink failed, aborting playback");
                        return report.finish(PlaybackOutcome::Aborted);
                    }
                    warn!(error = %e, actor = %line.actor(), "Sink failed, continuing");
                }

                let pause = self.pause_for(*line.delay());
                if pause.is_zero() {
                    continue;
                }

                tokio::select! {
                    biased;
                    _ = stop.stopped() => {
                        info!(emitted = report.emitted(), "Playback stopped during pause");
                        return report.finish(PlaybackOutcome::Stopped);
                    }
                    _ = sleep(pause) => {}
                }
            }
        }

        info!(
            intros = report.intros,
            lines = report.lines,
            sink_failures = report.sink_failures,
            "Playback completed"
        );
        report.finish(PlaybackOutcome::Completed)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_scales_fall_back_to_real_time() {
        assert_eq!(Scheduler::with_delay_scale(-1.0).delay_scale(), 1.0);
        assert_eq!(Scheduler::with_delay_scale(f64::NAN).delay_scale(), 1.0);
        assert_eq!(Scheduler::with_delay_scale(0.0).delay_scale(), 0.0);
    }

    #[test]
    fn scale_applies_to_pauses() {
        let scheduler = Scheduler::with_delay_scale(0.5);
        assert_eq!(
            scheduler.pause_for(Duration::from_secs(4)),
            Duration::from_secs(2)
        );
    }
}

//! Actor color assignment policies.

use cinema_core::Color;
use rand::seq::SliceRandom;

/// Picks the color for an actor the first time they speak in a scene.
///
/// `scene_index` is the scene's position in the movie and `actor_index` is
/// how many actors the scene had already colored.
pub trait ColorPolicy: Send + Sync {
    /// Choose a color for `actor`.
    fn assign(&self, scene_index: usize, actor_index: usize, actor: &str) -> Color;
}

impl<F> ColorPolicy for F
where
    F: Fn(usize, usize, &str) -> Color + Send + Sync,
{
    fn assign(&self, scene_index: usize, actor_index: usize, actor: &str) -> Color {
        self(scene_index, actor_index, actor)
    }
}

/// Uniformly random color from the palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColors;

impl ColorPolicy for RandomColors {
    fn assign(&self, _scene_index: usize, _actor_index: usize, _actor: &str) -> Color {
        Color::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(Color::Gray)
    }
}

/// Walks the palette in order of first appearance within a scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclingColors;

impl ColorPolicy for CyclingColors {
    fn assign(&self, _scene_index: usize, actor_index: usize, _actor: &str) -> Color {
        Color::ALL[actor_index % Color::ALL.len()]
    }
}

/// Same color for everyone.
#[derive(Debug, Clone, Copy)]
pub struct FixedColor(pub Color);

impl ColorPolicy for FixedColor {
    fn assign(&self, _scene_index: usize, _actor_index: usize, _actor: &str) -> Color {
        self.0
    }
}

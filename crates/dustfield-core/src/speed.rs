//! Animation speed presets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often the host advances the animation.
///
/// Particle motion is expressed per tick, so speed is a frame rate rather
/// than a velocity multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Frames per second for this preset.
    pub fn frames_per_second(self) -> u32 {
        match self {
            AnimationSpeed::Slow => 30,
            AnimationSpeed::Normal => 60,
            AnimationSpeed::Fast => 90,
        }
    }

    /// Time budget for one frame.
    pub fn frame_interval(self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second()
    }

    /// Get the next speed preset in the cycle.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}

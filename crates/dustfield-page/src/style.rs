//! Inline reveal styles and their transitions.

use std::fmt;
use std::time::Duration;

/// Timing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Fast start, gentle landing (cubic).
    #[default]
    EaseOut,
}

impl Easing {
    /// Map linear progress in [0, 1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }

    fn css_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOut => "ease-out",
        }
    }
}

/// How opacity and offset animate when a style changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Eased progress `elapsed` into the transition.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .apply(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.duration.as_secs_f32();
        let easing = self.easing.css_name();
        write!(f, "opacity {secs}s {easing}, transform {secs}s {easing}")
    }
}

/// The inline style a reveal element carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0 is invisible, 1 fully visible.
    pub opacity: f32,
    /// Downward shift in pixels.
    pub offset_px: f32,
    /// Declared transition; `None` means changes apply instantly.
    pub transition: Option<Transition>,
}

impl Default for RevealStyle {
    /// An unstyled element: visible, in place, no transition.
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset_px: 0.0,
            transition: None,
        }
    }
}

impl RevealStyle {
    /// Opacity and offset actually shown `elapsed` after changing from
    /// `previous` to `self`.
    pub fn sample(&self, previous: &RevealStyle, elapsed: Duration) -> (f32, f32) {
        let t = self
            .transition
            .map_or(1.0, |transition| transition.progress(elapsed));
        (
            lerp(previous.opacity, self.opacity, t),
            lerp(previous.offset_px, self.offset_px, t),
        )
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

//! Scroll reveal: fade content blocks in the first time they scroll into view.

use std::collections::HashSet;
use std::time::Duration;

use crate::document::{Document, ElementId};
use crate::style::{Easing, RevealStyle, Transition};

/// Content blocks that take part in scroll reveal.
pub const REVEAL_SELECTORS: [&str; 5] = [
    "section",
    ".timeline-item",
    ".log-box",
    ".quote-box",
    ".conclusion-box",
];

/// Visible fraction at which an element counts as intersecting.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// How far below its resting place a hidden element sits.
pub const REVEAL_OFFSET_PX: f32 = 20.0;

const REVEAL_TRANSITION: Transition = Transition::new(Duration::from_millis(600), Easing::EaseOut);

/// One visibility report for a watched element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Fraction of the element inside the viewport, in [0, 1].
    pub ratio: f32,
}

impl IntersectionEntry {
    pub fn is_intersecting(&self, threshold: f32) -> bool {
        self.ratio > 0.0 && self.ratio >= threshold
    }
}

/// Fraction of a vertical span `[top, top + height)` inside
/// `[view_top, view_top + view_height)`.
pub fn intersection_ratio(top: f32, height: f32, view_top: f32, view_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let start = top.max(view_top);
    let end = (top + height).min(view_top + view_height);
    ((end - start) / height).clamp(0.0, 1.0)
}

/// Watches every reveal element of a document through a single watcher.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    threshold: f32,
    /// Watched elements in document order.
    watched: Vec<ElementId>,
    revealed: HashSet<ElementId>,
}

impl ScrollReveal {
    /// Hide every reveal element in `document` and start watching them.
    ///
    /// An element matching several selectors is watched once.
    pub fn attach<D: Document + ?Sized>(document: &mut D) -> Self {
        let mut watched: Vec<ElementId> = REVEAL_SELECTORS
            .iter()
            .flat_map(|selector| document.query_selector_all(selector))
            .collect();
        watched.sort_unstable();
        watched.dedup();

        let hidden = RevealStyle {
            opacity: 0.0,
            offset_px: REVEAL_OFFSET_PX,
            transition: Some(REVEAL_TRANSITION),
        };
        for &id in &watched {
            document.set_style(id, hidden);
        }
        log::debug!("scroll reveal watching {} elements", watched.len());

        Self {
            threshold: REVEAL_THRESHOLD,
            watched,
            revealed: HashSet::new(),
        }
    }

    /// Watched elements, in document order.
    pub fn watched(&self) -> &[ElementId] {
        &self.watched
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.revealed.contains(&id)
    }

    /// Watched elements that have not been revealed yet.
    pub fn pending(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.watched
            .iter()
            .copied()
            .filter(|id| !self.revealed.contains(id))
    }

    /// Apply a batch of visibility reports.
    ///
    /// Each watched element that is intersecting for the first time is set
    /// fully visible and in place. Revealing is one-way: later reports,
    /// intersecting or not, leave it alone. Returns the newly revealed
    /// elements in report order.
    pub fn notify<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        entries: &[IntersectionEntry],
    ) -> Vec<ElementId> {
        let mut newly = Vec::new();
        for entry in entries {
            if !entry.is_intersecting(self.threshold)
                || self.watched.binary_search(&entry.target).is_err()
                || !self.revealed.insert(entry.target)
            {
                continue;
            }

            let style = document.style(entry.target).unwrap_or_default();
            document.set_style(
                entry.target,
                RevealStyle {
                    opacity: 1.0,
                    offset_px: 0.0,
                    ..style
                },
            );
            log::debug!("revealed element {:?}", entry.target);
            newly.push(entry.target);
        }
        newly
    }
}

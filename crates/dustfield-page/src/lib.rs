//! Document-level effects: scroll reveal and the sidebar toggle.
//!
//! Both work against the [`Document`] trait rather than a concrete page,
//! so hosts inject whatever element store they render from.
//! [`MemoryDocument`] is the in-process implementation.

mod document;
mod reveal;
mod sidebar;
mod style;

pub use document::{Document, ElementId, MemoryDocument, Selector};
pub use reveal::{
    IntersectionEntry, REVEAL_OFFSET_PX, REVEAL_SELECTORS, REVEAL_THRESHOLD, ScrollReveal,
    intersection_ratio,
};
pub use sidebar::{SIDEBAR_ACTIVE_CLASS, SIDEBAR_SELECTOR, UiController};
pub use style::{Easing, RevealStyle, Transition};

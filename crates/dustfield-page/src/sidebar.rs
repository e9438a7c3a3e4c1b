//! Sidebar visibility control.

use crate::document::Document;

/// Selector of the sidebar element.
pub const SIDEBAR_SELECTOR: &str = ".sidebar";
/// Class that marks the sidebar as shown.
pub const SIDEBAR_ACTIVE_CLASS: &str = "open";

/// Page controls other triggers (buttons, key bindings) call into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiController {
    sidebar_selector: String,
    active_class: String,
}

impl Default for UiController {
    fn default() -> Self {
        Self::new(SIDEBAR_SELECTOR, SIDEBAR_ACTIVE_CLASS)
    }
}

impl UiController {
    pub fn new(sidebar_selector: &str, active_class: &str) -> Self {
        Self {
            sidebar_selector: sidebar_selector.to_string(),
            active_class: active_class.to_string(),
        }
    }

    /// Flip the sidebar's active class.
    ///
    /// Returns whether the sidebar is now active, or `None` when the
    /// document has no sidebar.
    pub fn toggle_sidebar<D: Document + ?Sized>(&self, document: &mut D) -> Option<bool> {
        let sidebar = document.query_selector(&self.sidebar_selector)?;
        let active = document.toggle_class(sidebar, &self.active_class);
        log::debug!("sidebar {}", if active { "opened" } else { "closed" });
        Some(active)
    }

    /// Whether the sidebar exists and is active.
    pub fn is_sidebar_open<D: Document + ?Sized>(&self, document: &D) -> bool {
        document
            .query_selector(&self.sidebar_selector)
            .is_some_and(|sidebar| document.has_class(sidebar, &self.active_class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn test_default_toggles_open_class() {
        let mut doc = MemoryDocument::new();
        let sidebar = doc.create_element("nav", &["sidebar"]);
        UiController::default().toggle_sidebar(&mut doc);
        assert_eq!(SIDEBAR_ACTIVE_CLASS, "open");
        assert!(doc.has_class(sidebar, "open"));
        assert!(!doc.has_class(sidebar, "active"));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut doc = MemoryDocument::new();
        doc.create_element("section", &[]);
        let sidebar = doc.create_element("nav", &["sidebar"]);
        let ui = UiController::default();

        assert!(!ui.is_sidebar_open(&doc));
        assert_eq!(ui.toggle_sidebar(&mut doc), Some(true));
        assert!(doc.has_class(sidebar, SIDEBAR_ACTIVE_CLASS));
        assert_eq!(ui.toggle_sidebar(&mut doc), Some(false));
        assert!(!doc.has_class(sidebar, SIDEBAR_ACTIVE_CLASS));
        assert!(doc.has_class(sidebar, "sidebar"));
    }

    #[test]
    fn test_toggle_starting_open() {
        let mut doc = MemoryDocument::new();
        doc.create_element("nav", &["sidebar", "open"]);
        let ui = UiController::default();

        assert!(ui.is_sidebar_open(&doc));
        assert_eq!(ui.toggle_sidebar(&mut doc), Some(false));
        assert_eq!(ui.toggle_sidebar(&mut doc), Some(true));
        assert!(ui.is_sidebar_open(&doc));
    }

    #[test]
    fn test_missing_sidebar_is_noop() {
        let mut doc = MemoryDocument::new();
        let section = doc.create_element("section", &[]);
        let ui = UiController::default();

        assert_eq!(ui.toggle_sidebar(&mut doc), None);
        assert!(!doc.has_class(section, SIDEBAR_ACTIVE_CLASS));
        assert!(!ui.is_sidebar_open(&doc));
    }

    #[test]
    fn test_custom_selector() {
        let mut doc = MemoryDocument::new();
        let drawer = doc.create_element("aside", &["drawer"]);
        let ui = UiController::new(".drawer", "expanded");

        assert_eq!(ui.toggle_sidebar(&mut doc), Some(true));
        assert!(doc.has_class(drawer, "expanded"));
    }
}

//! Element lookup and mutation.

use std::time::Duration;

use crate::style::RevealStyle;

/// Handle to an element within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A simple selector: a tag name (`section`) or a single class (`.card`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
}

impl Selector {
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        match selector.strip_prefix('.') {
            Some(class) => Selector::Class(class.to_string()),
            None => Selector::Tag(selector.to_ascii_lowercase()),
        }
    }
}

/// The element store effects operate on.
///
/// Lookups return elements in document order.
pub trait Document {
    /// Every element matching `selector`.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Current inline style, or `None` for an unknown element.
    fn style(&self, id: ElementId) -> Option<RevealStyle>;

    /// Replace the inline style. Unknown elements are ignored.
    fn set_style(&mut self, id: ElementId, style: RevealStyle);

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    /// Add `class` if absent, remove it if present. Returns whether the
    /// element has the class afterwards.
    fn toggle_class(&mut self, id: ElementId, class: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    style: RevealStyle,
    /// Style in effect before the last `set_style`.
    previous: RevealStyle,
    /// Document clock reading when `style` was set.
    changed_at: Duration,
    /// Whether `set_style` has been called yet.
    styled: bool,
}

impl Element {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Tag(tag) => self.tag == *tag,
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
        }
    }
}

/// An in-memory document.
///
/// Besides the [`Document`] operations it keeps a clock, advanced by the
/// host, so style transitions can be sampled with [`MemoryDocument::appearance`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    now: Duration,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its handle.
    pub fn create_element(&mut self, tag: &str, classes: &[&str]) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            style: RevealStyle::default(),
            previous: RevealStyle::default(),
            changed_at: self.now,
            styled: false,
        });
        id
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Move the document clock forward to `now`. The clock never goes back.
    pub fn set_clock(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Opacity and offset currently shown for `id`, mid-transition included.
    pub fn appearance(&self, id: ElementId) -> Option<(f32, f32)> {
        let element = self.elements.get(id.0)?;
        let elapsed = self.now.saturating_sub(element.changed_at);
        Some(element.style.sample(&element.previous, elapsed))
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let selector = Selector::parse(selector);
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.matches(&selector))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn style(&self, id: ElementId) -> Option<RevealStyle> {
        self.elements.get(id.0).map(|element| element.style)
    }

    fn set_style(&mut self, id: ElementId, style: RevealStyle) {
        let now = self.now;
        if let Some(element) = self.elements.get_mut(id.0) {
            // The first style applies immediately; there is nothing to
            // transition from.
            element.previous = if element.styled { element.style } else { style };
            element.style = style;
            element.changed_at = now;
            element.styled = true;
        }
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id.0)
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        if let Some(pos) = element.classes.iter().position(|c| c == class) {
            element.classes.remove(pos);
            false
        } else {
            element.classes.push(class.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::style::{Easing, Transition};

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse(".card"), Selector::Class("card".into()));
        assert_eq!(Selector::parse(" Section "), Selector::Tag("section".into()));
    }

    #[test]
    fn test_query_in_document_order() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_element("section", &[]);
        let b = doc.create_element("div", &["card"]);
        let c = doc.create_element("section", &["card", "wide"]);

        assert_eq!(doc.query_selector_all("section"), vec![a, c]);
        assert_eq!(doc.query_selector_all(".card"), vec![b, c]);
        assert_eq!(doc.query_selector(".wide"), Some(c));
        assert_eq!(doc.query_selector(".sidebar"), None);
    }

    #[test]
    fn test_toggle_class() {
        let mut doc = MemoryDocument::new();
        let id = doc.create_element("aside", &["sidebar"]);

        assert!(doc.toggle_class(id, "active"));
        assert!(doc.has_class(id, "active"));
        assert!(!doc.toggle_class(id, "active"));
        assert!(!doc.has_class(id, "active"));
        assert!(doc.has_class(id, "sidebar"));
        assert!(!doc.toggle_class(ElementId(99), "active"));
    }

    #[test]
    fn test_appearance_follows_transition() {
        let mut doc = MemoryDocument::new();
        let id = doc.create_element("section", &[]);
        let transition = Some(Transition::new(Duration::from_millis(400), Easing::Linear));

        doc.set_style(
            id,
            RevealStyle {
                opacity: 0.0,
                offset_px: 20.0,
                transition,
            },
        );
        doc.set_clock(Duration::from_secs(1));
        doc.set_style(
            id,
            RevealStyle {
                opacity: 1.0,
                offset_px: 0.0,
                transition,
            },
        );

        assert_eq!(doc.appearance(id), Some((0.0, 20.0)));
        doc.set_clock(Duration::from_millis(1_100));
        assert_eq!(doc.appearance(id), Some((0.25, 15.0)));
        doc.set_clock(Duration::from_secs(5));
        assert_eq!(doc.appearance(id), Some((1.0, 0.0)));
        assert_eq!(doc.appearance(ElementId(7)), None);
    }

    #[test]
    fn test_first_style_applies_without_transition() {
        let mut doc = MemoryDocument::new();
        let id = doc.create_element("section", &[]);
        let hidden = RevealStyle {
            opacity: 0.0,
            offset_px: 20.0,
            transition: Some(Transition::new(Duration::from_millis(600), Easing::EaseOut)),
        };

        doc.set_style(id, hidden);
        assert_eq!(doc.appearance(id), Some((0.0, 20.0)));
        doc.set_clock(Duration::from_millis(300));
        assert_eq!(doc.appearance(id), Some((0.0, 20.0)));
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut doc = MemoryDocument::new();
        doc.set_clock(Duration::from_secs(2));
        doc.set_clock(Duration::from_secs(1));
        let id = doc.create_element("section", &[]);
        doc.set_style(id, RevealStyle::default());
        doc.set_clock(Duration::from_secs(2));
        assert_eq!(doc.appearance(id), Some((1.0, 0.0)));
    }
}

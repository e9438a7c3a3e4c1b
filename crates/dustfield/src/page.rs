//! The scrollable document shown over the dust field.

use std::time::Duration;

use dustfield_background::{CELL_HEIGHT_PX, to_color};
use dustfield_core::Rgb;
use dustfield_page::{
    Document, ElementId, IntersectionEntry, MemoryDocument, ScrollReveal, UiController,
    intersection_ratio,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Clear, List, Paragraph, Widget},
};

/// Widest the content column grows, in cells.
const CONTENT_WIDTH: u16 = 64;
/// Width of the navigation sidebar, in cells.
const SIDEBAR_WIDTH: u16 = 26;
/// Blank rows between blocks.
const BLOCK_GAP: u16 = 1;
/// Text dimmer than this is not drawn at all.
const MIN_VISIBLE_OPACITY: f32 = 0.05;
/// Color of body text before blending.
const TEXT: Rgb = Rgb(220, 220, 230);

/// Static description of one content block.
struct BlockSpec {
    tag: &'static str,
    classes: &'static [&'static str],
    title: &'static str,
    body: &'static str,
}

const BLOCKS: &[BlockSpec] = &[
    BlockSpec {
        tag: "header",
        classes: &[],
        title: "dustfield",
        body: "Drifting motes behind a document that fades in as you read.\n\
               Scroll down to reveal the sections below.",
    },
    BlockSpec {
        tag: "section",
        classes: &["about"],
        title: "About",
        body: "Every mote drifts in a straight line, fades in after it\n\
               spawns and fades out before it expires. Expired motes\n\
               respawn in place, so the population never changes size.",
    },
    BlockSpec {
        tag: "div",
        classes: &["log-box"],
        title: "Density",
        body: "One mote per 15000 square pixels of viewport.\n\
               Resize the terminal and the whole field is rebuilt.",
    },
    BlockSpec {
        tag: "section",
        classes: &["log"],
        title: "Log",
        body: "Blocks start hidden and twenty pixels low.",
    },
    BlockSpec {
        tag: "div",
        classes: &["log-box"],
        title: "Particle field",
        body: "Update, then draw, for every mote, every frame.\n\
               The host decides when a frame happens.",
    },
    BlockSpec {
        tag: "div",
        classes: &["log-box"],
        title: "Scroll reveal",
        body: "A block is revealed once a tenth of it is on screen.\n\
               Once revealed it stays revealed.",
    },
    BlockSpec {
        tag: "section",
        classes: &["notes"],
        title: "Notes",
        body: "Each block below matches a reveal selector.",
    },
    BlockSpec {
        tag: "div",
        classes: &["quote-box"],
        title: "Drift",
        body: "Horizontal speed within 0.2 either way,\n\
               vertical between 0.2 down and 0.3 up.",
    },
    BlockSpec {
        tag: "div",
        classes: &["quote-box"],
        title: "Fade",
        body: "Opacity never passes one half.",
    },
    BlockSpec {
        tag: "section",
        classes: &["timeline"],
        title: "Timeline",
        body: "A mote's life, in ticks.",
    },
    BlockSpec {
        tag: "div",
        classes: &["timeline-item"],
        title: "Spawn",
        body: "Life drawn from 100 to 200 ticks.\n\
               Half of all respawns start on the bottom edge.",
    },
    BlockSpec {
        tag: "div",
        classes: &["timeline-item"],
        title: "Expire",
        body: "Out of life, faded out, or off screen: respawn.",
    },
    BlockSpec {
        tag: "div",
        classes: &["conclusion-box"],
        title: "Conclusion",
        body: "The dust never stops; the page only reveals itself once.",
    },
];

/// A laid-out content block.
#[derive(Debug)]
struct ContentBlock {
    id: ElementId,
    title: &'static str,
    body: &'static str,
    /// First row within the document.
    top: u16,
    height: u16,
}

/// Document, layout and scroll position.
#[derive(Debug)]
pub struct Page {
    document: MemoryDocument,
    reveal: ScrollReveal,
    blocks: Vec<ContentBlock>,
    scroll: u16,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Build the document and attach scroll reveal to it.
    pub fn new() -> Self {
        let mut document = MemoryDocument::new();
        let mut blocks = Vec::with_capacity(BLOCKS.len());
        let mut top = 0;
        for spec in BLOCKS {
            let id = document.create_element(spec.tag, spec.classes);
            let height = spec.body.lines().count() as u16 + 2;
            blocks.push(ContentBlock {
                id,
                title: spec.title,
                body: spec.body,
                top,
                height,
            });
            top += height + BLOCK_GAP;
        }
        document.create_element("nav", &["sidebar"]);

        let reveal = ScrollReveal::attach(&mut document);
        Self {
            document,
            reveal,
            blocks,
            scroll: 0,
        }
    }

    /// The underlying document, for controllers that act on it.
    pub fn document_mut(&mut self) -> &mut MemoryDocument {
        &mut self.document
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    /// Total rows the blocks occupy.
    pub fn content_height(&self) -> u16 {
        self.blocks
            .last()
            .map_or(0, |block| block.top + block.height)
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Scroll by `delta` rows, keeping the last block reachable.
    pub fn scroll_by(&mut self, delta: i32, view_height: u16) {
        let max = self.content_height().saturating_sub(view_height);
        self.scroll = (self.scroll as i32 + delta).clamp(0, max as i32) as u16;
    }

    /// Advance the document clock that drives reveal transitions.
    pub fn set_clock(&mut self, now: Duration) {
        self.document.set_clock(now);
    }

    /// Report the visibility of every unrevealed block to scroll reveal.
    /// Returns how many blocks were revealed.
    pub fn update_visibility(&mut self, view_height: u16) -> usize {
        let entries: Vec<IntersectionEntry> = self
            .reveal
            .pending()
            .filter_map(|id| self.blocks.iter().find(|block| block.id == id))
            .map(|block| IntersectionEntry {
                target: block.id,
                ratio: intersection_ratio(
                    block.top as f32 - self.scroll as f32,
                    block.height as f32,
                    0.0,
                    view_height as f32,
                ),
            })
            .collect();
        if entries.is_empty() {
            return 0;
        }
        self.reveal.notify(&mut self.document, &entries).len()
    }

    /// Whether every reveal block has been shown.
    pub fn fully_revealed(&self) -> bool {
        self.reveal.pending().next().is_none()
    }

    /// Draw the blocks, and the sidebar if it is open.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        ui: &UiController,
        accent: Rgb,
        background: Rgb,
    ) {
        let content_area = if ui.is_sidebar_open(&self.document) {
            let [sidebar, rest] =
                Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                    .areas(area);
            self.render_sidebar(frame, sidebar, accent);
            rest
        } else {
            area
        };

        let width = content_area.width.min(CONTENT_WIDTH);
        let column = Rect {
            x: content_area.x + (content_area.width - width) / 2,
            width,
            ..content_area
        };
        for block in &self.blocks {
            self.render_block(frame.buffer_mut(), column, block, accent, background);
        }
    }

    fn render_block(
        &self,
        buf: &mut Buffer,
        column: Rect,
        block: &ContentBlock,
        accent: Rgb,
        background: Rgb,
    ) {
        let Some((opacity, offset_px)) = self.document.appearance(block.id) else {
            return;
        };
        if opacity < MIN_VISIBLE_OPACITY || column.width == 0 {
            return;
        }

        let offset_rows = (offset_px / CELL_HEIGHT_PX).round() as i32;
        let top = block.top as i32 - self.scroll as i32 + offset_rows;
        let bottom = top + block.height as i32;
        if bottom <= 0 || top >= column.height as i32 {
            return;
        }

        // Render off-screen at full size, then copy the visible rows.
        let fade = |rgb: Rgb| to_color(rgb.with_alpha(opacity).over(background));
        let mut scratch = Buffer::empty(Rect::new(0, 0, column.width, block.height));
        let widget = Paragraph::new(block.body)
            .style(Style::new().fg(fade(TEXT)))
            .block(
                Block::bordered()
                    .border_style(Style::new().fg(fade(accent)))
                    .title(Line::from(block.title).bold()),
            );
        Clear.render(scratch.area, &mut scratch);
        widget.render(scratch.area, &mut scratch);

        let first = top.max(0);
        let last = bottom.min(column.height as i32);
        for row in first..last {
            let src_row = (row - top) as u16;
            for col in 0..column.width {
                let dst = (column.x + col, column.y + row as u16);
                if let Some(cell) = buf.cell_mut(dst) {
                    *cell = scratch[(col, src_row)].clone();
                }
            }
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect, accent: Rgb) {
        let sections = self.document.query_selector_all("section");
        let titles: Vec<Line> = self
            .blocks
            .iter()
            .filter(|block| sections.contains(&block.id))
            .map(|block| Line::from(format!("  {}", block.title)))
            .collect();
        let list = List::new(titles).block(
            Block::bordered()
                .border_style(Style::new().fg(to_color(accent)))
                .title(" Navigate "),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(list, area);
    }
}

//! Terminal cell canvas for the particle field.

use dustfield_core::{Rgb, Rgba, Surface, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::chars::DUST_CHARS;
use crate::color::to_color;

/// Virtual pixels covered by one terminal cell horizontally.
pub const CELL_WIDTH_PX: f32 = 8.0;
/// Virtual pixels covered by one terminal cell vertically.
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// The brightest mote painted into a cell this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Dot {
    color: Rgba,
    size: f32,
}

/// A grid of terminal cells the particle field paints into.
///
/// Each cell keeps only the most opaque mote that touched it. Render the
/// canvas with `frame.render_widget(&canvas, area)`.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    /// Color the dust is blended against.
    background: Rgb,
    cells: Vec<Option<Dot>>,
}

impl CellCanvas {
    /// Create an empty canvas of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16, background: Rgb) -> Self {
        Self {
            cols,
            rows,
            background,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Change the grid size, discarding anything painted.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols as usize * rows as usize];
    }

    /// Size in cells.
    pub fn dimensions(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// The canvas expressed in virtual pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.cols as f32 * CELL_WIDTH_PX,
            self.rows as f32 * CELL_HEIGHT_PX,
        )
    }

    /// Number of cells holding a mote.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Terminal glyph and color for the cell at (`col`, `row`), if lit.
    pub fn cell(&self, col: u16, row: u16) -> Option<(char, Rgb)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[self.index(col, row)]
            .map(|dot| (glyph(dot.size), dot.color.over(self.background)))
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}

/// Pick a glyph by mote size.
fn glyph(size: f32) -> char {
    if size < 5.0 / 3.0 {
        DUST_CHARS[0]
    } else if size < 7.0 / 3.0 {
        DUST_CHARS[1]
    } else {
        DUST_CHARS[2]
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let bounds = self.viewport();
        let right = x + width;
        let bottom = y + height;
        if right <= 0.0 || bottom <= 0.0 || x >= bounds.width || y >= bounds.height {
            return;
        }

        let first_col = (x.max(0.0) / CELL_WIDTH_PX) as u16;
        let first_row = (y.max(0.0) / CELL_HEIGHT_PX) as u16;
        let last_col = ((right / CELL_WIDTH_PX).ceil() as u16).min(self.cols);
        let last_row = ((bottom / CELL_HEIGHT_PX).ceil() as u16).min(self.rows);

        let dot = Dot {
            color,
            size: width.max(height),
        };
        for row in first_row..last_row {
            for col in first_col..last_col {
                let index = self.index(col, row);
                let cell = &mut self.cells[index];
                if cell.is_none_or(|existing| existing.color.alpha < color.alpha) {
                    *cell = Some(dot);
                }
            }
        }
    }
}

impl Widget for &CellCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let Some((ch, rgb)) = self.cell(col, row) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(ch).set_fg(to_color(rgb));
                }
            }
        }
    }
}

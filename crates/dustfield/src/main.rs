use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dustfield_background::{CellCanvas, FieldOptions, ParticleField};
use dustfield_config::Config;
use dustfield_core::{AnimationSpeed, DustPalette};
use dustfield_page::UiController;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

use crate::page::Page;

mod logging;
mod page;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    let config = Config::load_or_default();
    log::info!(
        "starting with palette {} at {} speed (log: {:?})",
        config.palette.name(),
        config.animation_speed.name(),
        log_path
    );

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Current dust palette.
    palette: DustPalette,
    /// Current frame rate preset.
    speed: AnimationSpeed,
    /// Dust behind the page.
    field: ParticleField,
    /// Terminal cells the field paints into.
    canvas: CellCanvas,
    page: Page,
    ui: UiController,
    /// Rows available to the page in the last frame.
    view_height: u16,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// The field starts empty; the first frame sizes it to the terminal.
    pub fn new(config: Config) -> Self {
        let canvas = CellCanvas::new(0, 0, config.background);
        let options = FieldOptions {
            palette: config.palette,
            density_divisor: config.density_divisor,
        };
        let field = match config.seed {
            Some(seed) => ParticleField::with_seed(canvas.viewport(), options, seed),
            None => ParticleField::new(canvas.viewport(), options),
        };

        Self {
            running: false,
            palette: config.palette,
            speed: config.animation_speed,
            config,
            field,
            canvas,
            page: Page::new(),
            ui: UiController::default(),
            view_height: 0,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    ///
    /// Each iteration draws one frame, then handles events until the next
    /// frame is due.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_due = Instant::now() + self.speed.frame_interval();
            terminal.draw(|frame| self.render(frame))?;
            while self.running {
                let remaining = frame_due.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                self.handle_crossterm_events(remaining)?;
            }
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.resize(area.width, area.height);

        self.field.tick(&mut self.canvas);
        frame.render_widget(&self.canvas, area);

        let [body, help] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        self.view_height = body.height;
        self.page.scroll_by(0, body.height);
        self.page.set_clock(self.started.elapsed());
        self.page.update_visibility(body.height);

        let accent = self.palette.colors()[0];
        self.page.render(frame, body, &self.ui, accent, self.config.background);

        let color = dustfield_background::to_color(accent);
        let menu = if self.ui.is_sidebar_open(self.page.document()) {
            " close  "
        } else {
            " menu  "
        };
        let mut keys = vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "↑↓".bold().fg(color),
            " scroll  ".dark_gray(),
            "m".bold().fg(color),
            menu.dark_gray(),
            "c".bold().fg(color),
            format!(" {}  ", self.palette.name()).dark_gray(),
            "s".bold().fg(color),
            format!(" {} ({} motes)", self.speed.name(), self.field.len()).dark_gray(),
        ];
        if !self.page.fully_revealed() {
            keys.push("  ↓ more".dark_gray());
        }
        frame.render_widget(Line::from(keys).centered(), help);
    }

    /// Match the canvas and the field to the terminal size.
    fn resize(&mut self, cols: u16, rows: u16) {
        if self.canvas.dimensions() == (cols, rows) {
            return;
        }
        self.canvas.resize(cols, rows);
        self.field.resize(self.canvas.viewport());
        log::debug!("resized to {cols}x{rows}, {} particles", self.field.len());
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` for an event.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page_rows = self.view_height.saturating_sub(1).max(1) as i32;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll(-1),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll(1),
            (_, KeyCode::PageUp) => self.scroll(-page_rows),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll(page_rows),
            (_, KeyCode::Char('m')) => self.toggle_sidebar(),
            (_, KeyCode::Char('c')) => self.cycle_palette(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            _ => {}
        }
    }

    /// Scroll the page and report newly visible blocks.
    fn scroll(&mut self, delta: i32) {
        self.page.scroll_by(delta, self.view_height);
        self.page.update_visibility(self.view_height);
    }

    /// Show or hide the navigation sidebar.
    fn toggle_sidebar(&mut self) {
        if self.ui.toggle_sidebar(self.page.document_mut()).is_none() {
            log::warn!("no sidebar in document");
        }
    }

    /// Cycle through the dust palettes.
    fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.field.set_palette(self.palette);
    }

    /// Cycle through the frame rate presets.
    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, SeedableRng};

use crate::cell::Cell;
use crate::color::{self, Hsl};
use crate::column::Tuning;
use crate::frame::Frame;
use crate::grid::Grid;
use crate::ramp;
use crate::runtime::{BoldMode, ColorMode};

pub const SPEED_MIN: f32 = 5.0;
pub const SPEED_MAX: f32 = 150.0;
pub const SPEED_STEP: f32 = 5.0;
pub const DEFAULT_SPEED: f32 = 20.0;

/// The whole downpour: the grid of columns, the shared speed parameter and
/// the glyph-cell-to-terminal-cell translation. Driven once per frame by
/// the main loop.
pub struct Rain {
    pub raining: bool,
    pub pause: bool,

    grid: Grid,
    glyphs_per_sec: f32,
    tuning: Tuning,
    alphabet: Vec<char>,

    color_mode: ColorMode,
    bold_mode: BoldMode,
    bg: Option<crossterm::style::Color>,

    rng: StdRng,
}

impl Rain {
    pub fn new(
        cols: u16,
        rows: u16,
        alphabet: Vec<char>,
        tuning: Tuning,
        color_mode: ColorMode,
        bold_mode: BoldMode,
        seed: u64,
    ) -> Self {
        let mut alphabet = alphabet;
        if alphabet.is_empty() {
            alphabet.extend(['0', '1']);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::new(cols, rows, &alphabet, tuning, &mut rng);

        Self {
            raining: true,
            pause: false,
            grid,
            glyphs_per_sec: DEFAULT_SPEED,
            tuning,
            alphabet,
            color_mode,
            bold_mode,
            bg: color::background(color_mode),
            rng,
        }
    }

    pub fn glyphs_per_sec(&self) -> f32 {
        self.glyphs_per_sec
    }

    /// The single write path for the shared speed parameter; every column
    /// reads the new value on the next tick.
    pub fn set_glyphs_per_sec(&mut self, v: f32) {
        self.glyphs_per_sec = v.clamp(SPEED_MIN, SPEED_MAX);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn toggle_pause(&mut self) {
        self.pause = !self.pause;
    }

    /// Rebuild the grid for a new viewport (or the same one, to re-seed the
    /// glyphs and restart every trail).
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.grid = Grid::new(cols, rows, &self.alphabet, self.tuning, &mut self.rng);
    }

    pub fn advance(&mut self, dt_s: f32) {
        if self.pause {
            return;
        }
        self.grid
            .update(dt_s, self.glyphs_per_sec, self.tuning, &mut self.rng);
    }

    pub fn render(&self, frame: &mut Frame) {
        for (x, column) in self.grid.columns().iter().enumerate() {
            for (y, cell) in column.cells().iter().enumerate() {
                let out = if cell.opacity > 0.0 {
                    Cell {
                        ch: cell.ch,
                        fg: self.styled_fg(cell.color, cell.opacity),
                        bg: self.bg,
                        bold: self.is_bold(cell.color, cell.opacity),
                    }
                } else {
                    Cell::blank_with_bg(self.bg)
                };
                frame.set(x as u16, y as u16, out);
            }
        }
    }

    fn styled_fg(&self, color: Hsl, opacity: f32) -> Option<crossterm::style::Color> {
        let rgb = color::fade_rgb(color::hsl_to_rgb(color), opacity);
        color::terminal_color(self.color_mode, rgb)
    }

    fn is_bold(&self, color: Hsl, opacity: f32) -> bool {
        match self.bold_mode {
            BoldMode::Off => false,
            BoldMode::All => opacity > 0.0,
            BoldMode::Head => opacity > 0.0 && color.l > ramp::BASE_LIGHTNESS,
        }
    }
}

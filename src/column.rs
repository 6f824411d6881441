// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng};

use crate::color::Hsl;
use crate::ramp;

/// Shortest trail a reset may roll.
pub const MIN_TRAIL: f32 = 4.0;

pub const DEFAULT_MAX_TRAIL: f32 = 30.0;
pub const DEFAULT_JITTER: f32 = 40.0;

#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    pub max_trail: f32,
    pub start_jitter: f32,
    pub base_hue: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_trail: DEFAULT_MAX_TRAIL,
            start_jitter: DEFAULT_JITTER,
            base_hue: ramp::BASE_HUE,
        }
    }
}

/// One drawable slot in a column. The glyph is drawn once at construction;
/// only opacity and color change afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphCell {
    pub ch: char,
    pub opacity: f32,
    pub color: Hsl,
}

impl GlyphCell {
    fn new(ch: char) -> Self {
        Self {
            ch,
            opacity: 0.0,
            color: Hsl::new(0.0, 0.0, 0.0),
        }
    }
}

/// A vertical run of glyph cells and the scroll state of its trail: a
/// window of `trail_len` cells whose leading edge sits at `offset`
/// (negative while the trail has not yet entered from the top, past the
/// cell count once it has fully left through the bottom).
#[derive(Clone, Debug)]
pub struct Column {
    cells: Vec<GlyphCell>,
    trail_len: f32,
    offset: f32,
    colors: Vec<Hsl>,
    opacities: Vec<f32>,
}

impl Column {
    pub fn new(len: usize, alphabet: &[char], tuning: Tuning, rng: &mut StdRng) -> Self {
        let cells = (0..len)
            .map(|_| GlyphCell::new(alphabet[rng.random_range(0..alphabet.len())]))
            .collect();

        let mut column = Self {
            cells,
            trail_len: 0.0,
            offset: 0.0,
            colors: Vec::new(),
            opacities: Vec::new(),
        };
        column.reroll(tuning, rng);
        column.repaint();
        column
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[GlyphCell] {
        &self.cells
    }

    #[allow(dead_code)]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance the trail by `dt_s * glyphs_per_sec` cells, restart it above
    /// the top once it has scrolled out, and restyle every cell. Zero (or
    /// negative) elapsed time is a strict no-op, so a paused clock leaves
    /// the column untouched.
    pub fn update(&mut self, dt_s: f32, glyphs_per_sec: f32, tuning: Tuning, rng: &mut StdRng) {
        if dt_s <= 0.0 {
            return;
        }

        self.offset += dt_s * glyphs_per_sec;

        if self.offset > self.cells.len() as f32 {
            self.reroll(tuning, rng);
        }

        self.repaint();
    }

    fn reroll(&mut self, tuning: Tuning, rng: &mut StdRng) {
        let max = tuning.max_trail.max(MIN_TRAIL + 1.0);
        self.trail_len = rng.random_range(MIN_TRAIL..max);
        self.colors = ramp::color_ramp(tuning.base_hue, self.trail_len);
        self.opacities = ramp::opacity_ramp(self.trail_len);

        let jitter = if tuning.start_jitter > 0.0 {
            rng.random_range(0.0..tuning.start_jitter)
        } else {
            0.0
        };
        self.offset = -self.trail_len - jitter;
    }

    /// A cell at index i is painted iff `offset < i < offset + trail_len`;
    /// everything else is fully transparent. The ramp index is
    /// `floor(i - offset)`, clamped so float rounding at the window edges
    /// can never read past the ramp.
    fn repaint(&mut self) {
        if self.opacities.is_empty() {
            for cell in &mut self.cells {
                cell.opacity = 0.0;
            }
            return;
        }

        let last = self.opacities.len() - 1;
        let head = self.offset + self.trail_len;

        for (i, cell) in self.cells.iter_mut().enumerate() {
            let pos = i as f32;
            if pos <= self.offset || pos >= head {
                cell.opacity = 0.0;
                continue;
            }

            let idx = ((pos - self.offset).floor() as usize).min(last);
            cell.opacity = self.opacities[idx];
            cell.color = self.colors[idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    const ALPHABET: [char; 2] = ['0', '1'];

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn column(len: usize) -> Column {
        Column::new(len, &ALPHABET, Tuning::default(), &mut test_rng())
    }

    /// Pin the scroll state so a scenario is exact instead of rolled.
    fn place(column: &mut Column, trail_len: f32, offset: f32) {
        column.trail_len = trail_len;
        column.colors = ramp::color_ramp(ramp::BASE_HUE, trail_len);
        column.opacities = ramp::opacity_ramp(trail_len);
        column.offset = offset;
        column.repaint();
    }

    #[test]
    fn new_column_starts_above_the_top() {
        let col = column(40);
        assert!(col.trail_len >= MIN_TRAIL && col.trail_len < DEFAULT_MAX_TRAIL);
        assert!(col.offset <= -col.trail_len);
        assert!(col.cells.iter().all(|c| c.opacity == 0.0));
    }

    #[test]
    fn offset_advances_by_exactly_speed_times_elapsed() {
        let mut col = column(40);
        place(&mut col, 10.0, -30.0);
        col.update(0.5, 20.0, Tuning::default(), &mut test_rng());
        assert_eq!(col.offset, -20.0);
    }

    #[test]
    fn zero_elapsed_time_changes_nothing() {
        let mut col = column(40);
        place(&mut col, 10.0, 41.0);
        let before = col.clone();

        col.update(0.0, 20.0, Tuning::default(), &mut test_rng());

        assert_eq!(col.offset, before.offset);
        assert_eq!(col.trail_len, before.trail_len);
        assert_eq!(col.colors, before.colors);
        assert_eq!(col.opacities, before.opacities);
        assert_eq!(col.cells, before.cells);
    }

    #[test]
    fn scrolling_past_the_bottom_rerolls_the_trail() {
        let mut col = column(40);
        place(&mut col, 10.0, 39.0);
        let mut rng = test_rng();

        // 0.2s at 20 glyphs/s pushes the offset to 43, past the 40 cells.
        col.update(0.2, 20.0, Tuning::default(), &mut rng);

        assert!(col.offset <= -MIN_TRAIL, "offset was {}", col.offset);
        assert!(col.trail_len >= MIN_TRAIL && col.trail_len < DEFAULT_MAX_TRAIL);
        assert_eq!(col.colors.len(), ramp::ramp_len(col.trail_len));
        assert_eq!(col.opacities.len(), ramp::ramp_len(col.trail_len));
    }

    #[test]
    fn stranded_offset_resets_on_the_next_live_update() {
        let mut col = column(40);
        place(&mut col, 10.0, 41.0);
        let mut rng = test_rng();

        col.update(0.0, 20.0, Tuning::default(), &mut rng);
        assert_eq!(col.offset, 41.0);

        // Any positive elapsed time fires the guard; 41 was already past 40.
        col.update(0.0001, 20.0, Tuning::default(), &mut rng);
        assert!(col.offset <= -MIN_TRAIL);
    }

    #[test]
    fn only_cells_strictly_inside_the_window_are_painted() {
        let mut col = column(40);
        place(&mut col, 10.0, 14.5);

        for (i, cell) in col.cells().iter().enumerate() {
            let pos = i as f32;
            let inside = pos > 14.5 && pos < 24.5;
            if inside {
                let idx = (pos - 14.5).floor() as usize;
                assert_eq!(cell.opacity, col.opacities[idx]);
                assert_eq!(cell.color, col.colors[idx]);
            } else {
                assert_eq!(cell.opacity, 0.0);
            }
        }
    }

    #[test]
    fn negative_offset_maps_cells_to_the_ramp_tail() {
        let mut col = column(40);
        place(&mut col, 10.0, -3.0);

        // Active cells are 0..=6; cell 0 reads ramp entry 3, cell 6 entry 9.
        assert_eq!(col.cells()[0].opacity, col.opacities[3]);
        assert_eq!(col.cells()[0].color, col.colors[3]);
        assert_eq!(col.cells()[6].opacity, col.opacities[9]);
        assert_eq!(col.cells()[6].color, col.colors[9]);
        for cell in &col.cells()[7..] {
            assert_eq!(cell.opacity, 0.0);
        }
    }

    #[test]
    fn glyphs_never_change_after_construction() {
        let mut col = column(40);
        let glyphs: Vec<char> = col.cells().iter().map(|c| c.ch).collect();
        let mut rng = test_rng();

        for _ in 0..500 {
            col.update(0.05, 150.0, Tuning::default(), &mut rng);
        }

        let after: Vec<char> = col.cells().iter().map(|c| c.ch).collect();
        assert_eq!(glyphs, after);
        assert!(glyphs.iter().all(|ch| ALPHABET.contains(ch)));
    }
}

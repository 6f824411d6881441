// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;

use crate::column::{Column, Tuning};

/// Every column the viewport holds, one per terminal column, each cell one
/// terminal row. Built once and rebuilt wholesale on resize; the animators
/// only restyle cells, they never add or remove them.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: Vec<Column>,
    rows: u16,
}

impl Grid {
    pub fn new(cols: u16, rows: u16, alphabet: &[char], tuning: Tuning, rng: &mut StdRng) -> Self {
        let columns = (0..cols)
            .map(|_| Column::new(rows as usize, alphabet, tuning, rng))
            .collect();
        Self { columns, rows }
    }

    pub fn cols(&self) -> u16 {
        self.columns.len() as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn update(&mut self, dt_s: f32, glyphs_per_sec: f32, tuning: Tuning, rng: &mut StdRng) {
        for column in &mut self.columns {
            column.update(dt_s, glyphs_per_sec, tuning, rng);
        }
    }
}

//! Positional fairness statistics for the board generator.
//!
//! A fair generator places every color in every cell about as often as that color
//! appears overall. `FrequencyTable` counts colors per cell over many boards and
//! reports how far the worst cell strays from the overall share.
use crate::board::{generate_board, Board, Color, Layout};
use rand::Rng;
use std::collections::BTreeMap;

/// Per-cell color counts over a set of boards of the same size.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyTable {
    grid_size: usize,
    boards: usize,
    cells: Vec<BTreeMap<Color, usize>>,
}

impl FrequencyTable {
    pub fn new(grid_size: usize) -> Self {
        FrequencyTable {
            grid_size,
            boards: 0,
            cells: vec![BTreeMap::new(); grid_size * grid_size],
        }
    }

    /// Adds one board's colors to the table. Boards of another size are ignored.
    pub fn record(&mut self, board: &Board) {
        if board.grid_size() != self.grid_size || board.len() != self.cells.len() {
            return;
        }
        for (cell, marker) in self.cells.iter_mut().zip(board.markers()) {
            *cell.entry(marker.color).or_insert(0) += 1;
        }
        self.boards += 1;
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of boards recorded.
    pub fn boards(&self) -> usize {
        self.boards
    }

    /// How many recorded boards had `color` at (`row`, `col`).
    pub fn count(&self, row: usize, col: usize, color: Color) -> usize {
        self.cells
            .get(row * self.grid_size + col)
            .and_then(|cell| cell.get(&color))
            .copied()
            .unwrap_or(0)
    }

    /// Share of recorded boards with `color` at (`row`, `col`).
    pub fn frequency(&self, row: usize, col: usize, color: Color) -> f64 {
        if self.boards == 0 {
            return 0.0;
        }
        self.count(row, col, color) as f64 / self.boards as f64
    }

    /// Share of all recorded cells holding `color`.
    pub fn overall_frequency(&self, color: Color) -> f64 {
        let total = self.boards * self.cells.len();
        if total == 0 {
            return 0.0;
        }
        let hits: usize = self.cells.iter().filter_map(|cell| cell.get(&color)).sum();
        hits as f64 / total as f64
    }

    /// Colors seen anywhere in the table, in palette order.
    pub fn colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = self.cells.iter().flat_map(|cell| cell.keys().copied()).collect();
        colors.sort();
        colors.dedup();
        colors
    }

    /// Largest `|cell share - overall share| / overall share` over all cells and colors.
    ///
    /// Near 0 for a fair generator given enough boards; a generator that always puts
    /// the same color in the same cell scores 1 or more.
    pub fn max_relative_deviation(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for color in self.colors() {
            let overall = self.overall_frequency(color);
            if overall == 0.0 {
                continue;
            }
            for row in 0..self.grid_size {
                for col in 0..self.grid_size {
                    let deviation = (self.frequency(row, col, color) - overall).abs() / overall;
                    worst = worst.max(deviation);
                }
            }
        }
        worst
    }
}

/// Generates `boards` boards and tallies their colors per cell.
pub fn sample_positional_frequencies<R: Rng + ?Sized>(
    grid_size: usize,
    palette: &[Color],
    boards: usize,
    rng: &mut R,
) -> FrequencyTable {
    let mut table = FrequencyTable::new(grid_size);
    for _ in 0..boards {
        let board = generate_board(grid_size, palette, Layout::default(), rng);
        table.record(&board);
    }
    table
}

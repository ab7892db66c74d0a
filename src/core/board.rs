//! Board module - grid storage, collision and line clearing
//!
//! The board is a `width x height` visible playfield with a hidden vanish
//! zone of [`VANISH_ROWS`] rows above it. Storage is a flat row-major
//! `Vec<Cell>` covering the vanish zone and the visible field for cache
//! locality. Coordinates: `x` in `0..width` (left to right), `y` in
//! `-VANISH_ROWS..height` (top to bottom); negative `y` is hidden.
//!
//! Vanish-zone cells collide exactly like visible cells but are never
//! reported by line-completion checks.
//!
//! Every board-producing operation returns a new value; the one
//! pointer-identity exception is the [`Board::clear_lines`] empty-set fast
//! path, which hands back the unchanged board.

use serde::{Deserialize, Serialize};

use crate::core::pieces::ActivePiece;
use crate::types::{Cell, VANISH_ROWS};

/// The game board, hidden vanish zone included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    vanish_rows: u8,
    /// Flat array of cells, row-major order ((y + vanish) * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the given visible dimensions.
    pub fn new(width: u8, height: u8) -> Self {
        let total = (width as usize) * (height as usize + VANISH_ROWS as usize);
        Self {
            width,
            height,
            vanish_rows: VANISH_ROWS,
            cells: vec![None; total],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < -(self.vanish_rows as i8) || y >= self.height as i8
        {
            return None;
        }
        let row = (y + self.vanish_rows as i8) as usize;
        Some(row * self.width as usize + x as usize)
    }

    /// Visible playfield width
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Visible playfield height (vanish zone excluded)
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of hidden rows above the visible field
    pub fn vanish_rows(&self) -> u8 {
        self.vanish_rows
    }

    /// Total stored rows (visible + vanish)
    pub fn total_height(&self) -> u8 {
        self.height + self.vanish_rows
    }

    /// Get cell at position (x, y); None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds, vanish zone included, and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// True iff every mino of the piece lands on a valid empty cell.
    pub fn can_place(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_valid(x, y))
    }

    /// The piece shifted by (dx, dy) iff that placement is legal.
    ///
    /// Never mutates the board.
    pub fn try_move(&self, piece: &ActivePiece, dx: i8, dy: i8) -> Option<ActivePiece> {
        let moved = piece.translated(dx, dy);
        self.can_place(&moved).then_some(moved)
    }

    /// Shift the piece horizontally until it hits a wall or stack.
    ///
    /// Returns the original piece value when no step was possible.
    pub fn move_to_wall(&self, piece: &ActivePiece, dir: i8) -> ActivePiece {
        debug_assert!(dir == -1 || dir == 1);
        let mut current = *piece;
        while let Some(moved) = self.try_move(&current, dir, 0) {
            current = moved;
        }
        current
    }

    /// True iff the piece cannot move down one more cell.
    pub fn is_at_bottom(&self, piece: &ActivePiece) -> bool {
        self.try_move(piece, 0, 1).is_none()
    }

    /// Move the piece down until it rests on the stack or floor.
    pub fn drop_to_bottom(&self, piece: &ActivePiece) -> ActivePiece {
        let mut current = *piece;
        while let Some(moved) = self.try_move(&current, 0, 1) {
            current = moved;
        }
        current
    }

    /// Landing preview for the piece. Identical to [`Board::drop_to_bottom`].
    pub fn ghost_position(&self, piece: &ActivePiece) -> ActivePiece {
        self.drop_to_bottom(piece)
    }

    /// Write the piece's minos into the board with its piece-class code.
    ///
    /// Minos above the top of the vanish zone are silently skipped; locking
    /// never fails.
    pub fn lock_piece(mut self, piece: &ActivePiece) -> Board {
        for (x, y) in piece.cells() {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(piece.kind);
            }
        }
        self
    }

    /// Check if a visible row is completely filled
    fn is_row_full(&self, y: u8) -> bool {
        let row = (y as usize + self.vanish_rows as usize) * self.width as usize;
        self.cells[row..row + self.width as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Visible rows (ascending) where every cell is filled.
    ///
    /// Vanish rows are never reported, even when full.
    pub fn completed_lines(&self) -> Vec<u8> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given visible rows and compact the stack downward.
    ///
    /// Rows are de-duplicated and filtered to valid visible indices first;
    /// an empty result returns the board unchanged (same allocation).
    /// Vanish-zone content is pulled down into the vacated space; whatever
    /// would overflow past the top of storage is replaced with empty rows.
    pub fn clear_lines(mut self, rows: &[u8]) -> Board {
        let mut cleared: Vec<u8> = rows.iter().copied().filter(|&y| y < self.height).collect();
        cleared.sort_unstable();
        cleared.dedup();

        if cleared.is_empty() {
            return self;
        }

        let width = self.width as usize;
        let total = self.total_height() as usize;

        // Two-pointer compaction over the whole storage (vanish included),
        // scanning bottom to top and skipping removed rows.
        let mut write = total;
        for read in (0..total).rev() {
            let visible_y = read as i8 - self.vanish_rows as i8;
            if visible_y >= 0 && cleared.binary_search(&(visible_y as u8)).is_ok() {
                continue;
            }
            write -= 1;
            if write != read {
                let src = read * width;
                let dst = write * width;
                self.cells.copy_within(src..src + width, dst);
            }
        }

        // Freed rows at the top of storage become empty.
        for cell in &mut self.cells[..write * width] {
            *cell = None;
        }

        self
    }

    /// Shift every row up by one and write `row` into the bottom visible
    /// row. The topmost vanish row's content is discarded; missing entries
    /// in `row` are treated as empty. Used for incoming external garbage.
    pub fn shift_up_and_insert_row(mut self, row: &[Cell]) -> Board {
        let width = self.width as usize;
        let total = self.total_height() as usize;

        self.cells.copy_within(width.., 0);

        let bottom = (total - 1) * width;
        for x in 0..width {
            self.cells[bottom + x] = row.get(x).copied().flatten();
        }

        self
    }

    /// Get a reference to the internal cells array (vanish rows first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

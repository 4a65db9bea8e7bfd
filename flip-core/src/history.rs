//! Undo stack of pre-move snapshots.
//!
//! Entry 0 always holds the board as it was loaded, so restarting is just
//! restoring the oldest entry. The number of entries is the move counter.

use crate::grid::Grid;
use crate::piece::Piece;

/// Board state captured right before a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Where the moving piece stood before the move.
    pub previous: (i32, i32),
    pub grid: Grid,
    pub pieces: Vec<Piece>,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a deep copy of the live state.
    pub fn record(&mut self, previous: (i32, i32), grid: &Grid, pieces: &[Piece]) {
        self.entries.push(Snapshot {
            previous,
            grid: grid.clone(),
            pieces: pieces.to_vec(),
        });
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    /// Snapshot of the state before the first move.
    pub fn first(&self) -> Option<&Snapshot> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

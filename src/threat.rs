//! Per-cell defender exposure, aggregated once per attack decision.
//!
//! The map is rebuilt from scratch every time it is needed and treated as
//! immutable for the remainder of the turn's decision pass. Out-of-arena
//! cells carry no value; every playable cell carries the summed per-shot
//! damage of the enemy stationary attackers that cover it.

use crate::board::Board;
use crate::grid::*;
use crate::units::Side;

pub struct ThreatMap {
    cells: GridArray<Option<u32>>,
}

impl ThreatMap {
    /// Build the full-board exposure map from the current snapshot.
    pub fn generate(board: &dyn Board) -> ThreatMap {
        let mut cells = GridArray::new(None);
        for y in 0..ARENA_SIZE {
            for x in 0..ARENA_SIZE {
                let cell = Cell::new(x, y);
                if !board.in_bounds(cell) {
                    continue;
                }
                let threat = board
                    .attackers_in_range(cell, Side::Friendly)
                    .iter()
                    .sum();
                cells.set(cell, Some(threat));
            }
        }
        ThreatMap { cells }
    }

    /// Wrap a prebuilt grid. Intended for fixtures with pinned values.
    pub fn from_grid(cells: GridArray<Option<u32>>) -> ThreatMap {
        ThreatMap { cells }
    }

    /// Exposure at a cell; `None` outside the playable region.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<u32> {
        *self.cells.get(cell)
    }

    /// Total exposure along a path. Cells without a value contribute zero.
    pub fn path_threat(&self, path: &[Cell]) -> u32 {
        path.iter()
            .map(|&cell| self.get(cell).unwrap_or(0))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<u32>)> + '_ {
        self.cells.iter().map(|(cell, v)| (cell, *v))
    }
}

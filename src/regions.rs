//! Sector-level threat totals over the enemy half of the board.
//!
//! The enemy half is partitioned into five fixed sectors by pre-enumerated
//! cell lists carried in the strategy profile; the lists encode defensible
//! zones for the 28-wide arena and must be re-supplied for other grids.
//! Callers take the minimum-total sector as the weakest attack lane.

use crate::grid::Cell;
use crate::threat::ThreatMap;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Sector {
    LeftCorner,
    RightCorner,
    MidLeft,
    MidRight,
    Center,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::LeftCorner,
        Sector::RightCorner,
        Sector::MidLeft,
        Sector::MidRight,
        Sector::Center,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Sector::LeftCorner => 0,
            Sector::RightCorner => 1,
            Sector::MidLeft => 2,
            Sector::MidRight => 3,
            Sector::Center => 4,
        }
    }
}

/// The five sector cell lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorTable {
    pub left_corner: Vec<Cell>,
    pub right_corner: Vec<Cell>,
    pub mid_left: Vec<Cell>,
    pub mid_right: Vec<Cell>,
    pub center: Vec<Cell>,
}

impl SectorTable {
    pub fn cells(&self, sector: Sector) -> &[Cell] {
        match sector {
            Sector::LeftCorner => &self.left_corner,
            Sector::RightCorner => &self.right_corner,
            Sector::MidLeft => &self.mid_left,
            Sector::MidRight => &self.mid_right,
            Sector::Center => &self.center,
        }
    }
}

/// Summed threat per sector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectorThreat {
    totals: [u64; 5],
}

impl SectorThreat {
    pub fn total(&self, sector: Sector) -> u64 {
        self.totals[sector.index()]
    }

    /// The minimum-total sector; earlier sectors win ties.
    pub fn weakest(&self) -> Sector {
        let mut weakest = Sector::LeftCorner;
        for sector in Sector::ALL {
            if self.total(sector) < self.total(weakest) {
                weakest = sector;
            }
        }
        weakest
    }
}

/// Sum the threat map over each sector's member cells.
pub fn threat_by_sector(threat_map: &ThreatMap, table: &SectorTable) -> SectorThreat {
    let mut summary = SectorThreat::default();
    for sector in Sector::ALL {
        summary.totals[sector.index()] = table
            .cells(sector)
            .iter()
            .map(|&cell| threat_map.get(cell).unwrap_or(0) as u64)
            .sum();
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridArray;

    #[test]
    fn weakest_prefers_earlier_sectors_on_ties() {
        let mut grid = GridArray::new(None);
        grid.set(Cell::new(3, 17), Some(4u32));
        let map = ThreatMap::from_grid(grid);

        let table = SectorTable {
            left_corner: vec![Cell::new(3, 17)],
            right_corner: vec![Cell::new(23, 17)],
            mid_left: vec![Cell::new(6, 20)],
            mid_right: vec![Cell::new(20, 20)],
            center: vec![Cell::new(13, 20)],
        };

        let summary = threat_by_sector(&map, &table);
        assert_eq!(summary.total(Sector::LeftCorner), 4);
        assert_eq!(summary.weakest(), Sector::RightCorner);
    }
}

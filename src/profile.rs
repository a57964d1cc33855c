//! Declarative strategy configuration.
//!
//! Everything tunable about the engine lives here as data: threshold
//! constants, the turn-0 blueprint, the build queues, the sector partition
//! of the enemy half, and the fixed geometry of each attack play. The
//! decision algorithms never embed coordinates; swapping this profile runs
//! the same engine against a different blueprint. [`StrategyProfile::standard`]
//! is the shipped layout; [`StrategyProfile::from_json`] loads an external one.

use crate::grid::Cell;
use crate::queue::BuildItem;
use crate::regions::{Sector, SectorTable};
use crate::units::UnitKind;
use serde::{Deserialize, Serialize};

const fn at(x: u8, y: u8) -> Cell {
    Cell::new(x, y)
}

fn row(cells: &[(u8, u8)]) -> Vec<Cell> {
    cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

/// Attack threshold constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackTuning {
    /// Floor on the mobile-point threshold.
    pub min_attack_size: u32,
    /// Cap on the turn-scaled threshold.
    pub max_attack_wait: u32,
    /// Threshold growth per turn.
    pub growth_per_turn: f64,
    /// Minimum mobile points before the corner sneak is considered.
    pub corner_attack_min_mp: u32,
    /// How many turns a launched attack's lane stays protected.
    pub lane_hold_turns: i32,
}

/// One split-rush lane: where to deploy, the companion cell one step back,
/// and the opposite lane's rebuild cells to keep clear of construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitLane {
    pub deploy: Cell,
    pub companion: Cell,
    pub shielded_rebuild: Vec<Cell>,
}

/// Corner sneak geometry. The watch cell's occupant sizes the waves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerSneak {
    pub watch_cell: Cell,
    pub wave_cell: Cell,
    pub second_wave_cell: Cell,
    pub guard_wall: Cell,
    pub demolisher_cell: Cell,
    pub demolisher_lane_wall: Cell,
    /// Launch corridor cells excepted from construction.
    pub corridor: Vec<Cell>,
}

/// Defensive interceptor trigger settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterceptorTrigger {
    pub deploy_cells: Vec<Cell>,
    /// One interceptor per this many enemy mobile points.
    pub per_enemy_mp: u32,
    pub base_threshold: u32,
    pub threshold_cap: u32,
    /// Threshold growth per turn once the core defense is fully built.
    pub growth_per_turn: f64,
    pub repair_wall: Cell,
    pub shielded_cells: Vec<Cell>,
}

/// How much of the mobile budget goes to demolishers in a base-clear play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemolisherShare {
    /// Half the budget on demolishers, the rest on scouts.
    HalfBudget,
    /// The entire budget as demolishers.
    FullBudget,
}

/// Fixed base-clear play for one sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorAssault {
    /// Thin wall screen placed in front of the demolishers.
    pub screen_walls: Vec<Cell>,
    pub demolisher_cell: Cell,
    /// Scout wave launch cell; absent for demolisher-only plays.
    pub scout_cell: Option<Cell>,
    pub share: DemolisherShare,
}

/// Base-clear plays keyed by sector. Sectors without a play are skipped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAssaults {
    pub left_corner: Option<SectorAssault>,
    pub right_corner: Option<SectorAssault>,
    pub mid_left: Option<SectorAssault>,
    pub mid_right: Option<SectorAssault>,
    pub center: Option<SectorAssault>,
}

impl SectorAssaults {
    pub fn get(&self, sector: Sector) -> Option<&SectorAssault> {
        match sector {
            Sector::LeftCorner => self.left_corner.as_ref(),
            Sector::RightCorner => self.right_corner.as_ref(),
            Sector::MidLeft => self.mid_left.as_ref(),
            Sector::MidRight => self.mid_right.as_ref(),
            Sector::Center => self.center.as_ref(),
        }
    }
}

/// The full data-driven strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub tuning: AttackTuning,
    /// Exclude candidates whose route never reaches the enemy edge.
    pub filter_blocked_paths: bool,
    pub initial_turrets: Vec<Cell>,
    pub initial_walls: Vec<Cell>,
    pub core_queue: Vec<BuildItem>,
    pub supplementary_queue: Vec<BuildItem>,
    /// Wall placed beside a launched rush lane when the lane leaves it free.
    pub rush_guard_wall: Option<Cell>,
    /// Split-rush lanes; the first is the fallback when evaluation fails.
    pub split_lanes: Vec<SplitLane>,
    pub sneak: CornerSneak,
    pub interceptors: InterceptorTrigger,
    pub sectors: SectorTable,
    pub assaults: SectorAssaults,
}

impl StrategyProfile {
    pub fn from_json(json: &str) -> Result<StrategyProfile, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The shipped blueprint for the 28-wide diamond arena.
    pub fn standard() -> StrategyProfile {
        StrategyProfile {
            tuning: AttackTuning {
                min_attack_size: 6,
                max_attack_wait: 16,
                growth_per_turn: 0.8,
                corner_attack_min_mp: 12,
                lane_hold_turns: 0,
            },
            filter_blocked_paths: true,
            initial_turrets: row(&[
                (3, 12),
                (24, 12),
                (4, 11),
                (23, 11),
                (5, 10),
                (22, 10),
                (8, 7),
                (19, 7),
                (12, 6),
                (15, 6),
            ]),
            initial_walls: row(&[
                (0, 13),
                (1, 13),
                (2, 13),
                (3, 13),
                (24, 13),
                (25, 13),
                (26, 13),
                (27, 13),
                (5, 12),
                (22, 12),
            ]),
            core_queue: Self::core_queue(),
            supplementary_queue: Self::supplementary_queue(),
            rush_guard_wall: Some(at(14, 1)),
            split_lanes: vec![
                SplitLane {
                    deploy: at(7, 6),
                    companion: at(6, 7),
                    shielded_rebuild: row(&[(21, 9), (21, 10), (20, 10)]),
                },
                SplitLane {
                    deploy: at(20, 6),
                    companion: at(21, 7),
                    shielded_rebuild: row(&[(6, 9), (6, 10), (7, 10)]),
                },
            ],
            sneak: CornerSneak {
                watch_cell: at(0, 14),
                wave_cell: at(15, 1),
                second_wave_cell: at(16, 2),
                guard_wall: at(16, 3),
                demolisher_cell: at(4, 9),
                demolisher_lane_wall: at(6, 9),
                corridor: row(&[(0, 13), (1, 13), (1, 12), (2, 12)]),
            },
            interceptors: InterceptorTrigger {
                deploy_cells: row(&[(10, 3), (17, 3)]),
                per_enemy_mp: 12,
                base_threshold: 9,
                threshold_cap: 30,
                growth_per_turn: 0.7,
                repair_wall: at(13, 1),
                shielded_cells: vec![at(6, 9)],
            },
            sectors: Self::sector_table(),
            assaults: SectorAssaults {
                left_corner: Some(SectorAssault {
                    screen_walls: Vec::new(),
                    demolisher_cell: at(0, 13),
                    scout_cell: Some(at(14, 0)),
                    share: DemolisherShare::HalfBudget,
                }),
                right_corner: Some(SectorAssault {
                    screen_walls: Vec::new(),
                    demolisher_cell: at(27, 13),
                    scout_cell: Some(at(13, 0)),
                    share: DemolisherShare::HalfBudget,
                }),
                mid_left: Some(SectorAssault {
                    screen_walls: row(&[(21, 10), (20, 10), (19, 10), (18, 10), (17, 10)]),
                    demolisher_cell: at(22, 8),
                    scout_cell: None,
                    share: DemolisherShare::FullBudget,
                }),
                mid_right: Some(SectorAssault {
                    screen_walls: row(&[(6, 10), (7, 10), (8, 10), (9, 10), (10, 10)]),
                    demolisher_cell: at(5, 8),
                    scout_cell: None,
                    share: DemolisherShare::FullBudget,
                }),
                center: None,
            },
        }
    }

    /// Core defense: cheap placements first, upgrades as budget allows.
    fn core_queue() -> Vec<BuildItem> {
        let turret_line = row(&[
            (2, 12),
            (25, 12),
            (3, 12),
            (24, 12),
            (5, 10),
            (22, 10),
            (7, 8),
            (20, 8),
            (9, 6),
            (18, 6),
            (15, 6),
            (12, 6),
        ]);
        vec![
            BuildItem::place(
                UnitKind::Wall,
                row(&[
                    (0, 13),
                    (27, 13),
                    (1, 13),
                    (26, 13),
                    (2, 13),
                    (25, 13),
                    (3, 13),
                    (24, 13),
                    (4, 12),
                    (23, 12),
                ]),
            ),
            BuildItem::place(UnitKind::Turret, turret_line.clone()),
            BuildItem::upgrade(turret_line),
            BuildItem::upgrade(row(&[(0, 13), (27, 13), (1, 13), (26, 13)])),
            BuildItem::place(UnitKind::Wall, row(&[(5, 11), (22, 11), (7, 9), (20, 9)])),
            BuildItem::upgrade(row(&[(5, 11), (22, 11), (7, 9), (20, 9)])),
        ]
    }

    /// Supplementary defense, in priority order: funnel, corner
    /// reinforcement, center chokepoint, perimeter walls, supports.
    fn supplementary_queue() -> Vec<BuildItem> {
        let mut queue = Vec::new();

        // Funnel
        queue.push(BuildItem::place(
            UnitKind::Wall,
            row(&[(6, 10), (21, 10), (8, 8), (19, 8)]),
        ));
        queue.push(BuildItem::place(
            UnitKind::Turret,
            row(&[(4, 11), (23, 11), (6, 9), (21, 9), (8, 7), (19, 7)]),
        ));
        queue.push(BuildItem::upgrade(row(&[(4, 11), (23, 11), (8, 7), (19, 7)])));
        queue.push(BuildItem::upgrade(row(&[(4, 12), (23, 12), (8, 8), (19, 8)])));

        // Corner reinforcement
        queue.push(BuildItem::place(UnitKind::Wall, row(&[(4, 13), (23, 13)])));
        queue.push(BuildItem::upgrade(row(&[(4, 13), (23, 13)])));
        queue.push(BuildItem::place(UnitKind::Turret, row(&[(1, 12), (26, 12)])));
        queue.push(BuildItem::upgrade(row(&[(1, 12), (26, 12)])));
        queue.push(BuildItem::upgrade(row(&[(2, 13), (25, 13), (3, 13), (24, 13)])));

        // Center chokepoint
        queue.push(BuildItem::place(
            UnitKind::Wall,
            row(&[(10, 7), (17, 7), (11, 7), (16, 7), (13, 7), (14, 7)]),
        ));
        queue.push(BuildItem::upgrade(row(&[
            (9, 8),
            (18, 8),
            (15, 8),
            (12, 8),
            (10, 7),
            (17, 7),
            (11, 7),
            (16, 7),
            (13, 7),
            (14, 7),
        ])));

        // Perimeter walls
        queue.push(BuildItem::place(
            UnitKind::Wall,
            row(&[
                (5, 12),
                (22, 12),
                (6, 11),
                (21, 11),
                (7, 10),
                (20, 10),
                (8, 9),
                (19, 9),
            ]),
        ));
        queue.push(BuildItem::upgrade(row(&[
            (5, 12),
            (22, 12),
            (6, 11),
            (21, 11),
            (8, 9),
            (19, 9),
        ])));

        // Supports
        queue.push(BuildItem::place(
            UnitKind::Support,
            row(&[
                (10, 5),
                (11, 5),
                (12, 5),
                (13, 5),
                (14, 5),
                (15, 5),
                (16, 5),
                (17, 5),
                (13, 4),
                (14, 4),
                (10, 3),
                (11, 3),
                (13, 3),
                (14, 3),
                (16, 3),
                (17, 3),
                (11, 2),
                (16, 2),
                (12, 1),
                (13, 1),
                (14, 1),
                (15, 1),
                (13, 0),
                (14, 0),
            ]),
        ));

        queue
    }

    /// Fixed partition of the enemy half into five defensible zones.
    fn sector_table() -> SectorTable {
        SectorTable {
            left_corner: row(&[
                (3, 17),
                (4, 17),
                (2, 16),
                (3, 16),
                (4, 16),
                (5, 16),
                (1, 15),
                (2, 15),
                (3, 15),
                (4, 15),
                (5, 15),
                (6, 15),
                (0, 14),
                (1, 14),
                (2, 14),
                (3, 14),
                (4, 14),
                (5, 14),
                (6, 14),
                (7, 14),
            ]),
            right_corner: row(&[
                (23, 17),
                (24, 17),
                (22, 16),
                (23, 16),
                (24, 16),
                (25, 16),
                (21, 15),
                (22, 15),
                (23, 15),
                (24, 15),
                (25, 15),
                (26, 15),
                (20, 14),
                (21, 14),
                (22, 14),
                (23, 14),
                (24, 14),
                (25, 14),
                (26, 14),
                (27, 14),
            ]),
            mid_left: row(&[
                (6, 20),
                (7, 20),
                (5, 19),
                (6, 19),
                (7, 19),
                (8, 19),
                (4, 18),
                (5, 18),
                (6, 18),
                (7, 18),
                (8, 18),
                (9, 18),
                (5, 17),
                (6, 17),
                (7, 17),
                (8, 17),
                (9, 17),
                (10, 17),
                (6, 16),
                (7, 16),
                (8, 16),
                (9, 16),
                (10, 16),
                (11, 16),
                (7, 15),
                (8, 15),
                (9, 15),
                (10, 15),
                (11, 15),
                (12, 15),
                (8, 14),
                (9, 14),
                (10, 14),
                (11, 14),
                (12, 14),
                (13, 14),
            ]),
            mid_right: row(&[
                (20, 20),
                (21, 20),
                (19, 19),
                (20, 19),
                (21, 19),
                (22, 19),
                (18, 18),
                (19, 18),
                (20, 18),
                (21, 18),
                (22, 18),
                (23, 18),
                (17, 17),
                (18, 17),
                (19, 17),
                (20, 17),
                (21, 17),
                (22, 17),
                (16, 16),
                (17, 16),
                (18, 16),
                (19, 16),
                (20, 16),
                (21, 16),
                (15, 15),
                (16, 15),
                (17, 15),
                (18, 15),
                (19, 15),
                (20, 15),
                (14, 14),
                (15, 14),
                (16, 14),
                (17, 14),
                (18, 14),
                (19, 14),
            ]),
            center: row(&[
                (13, 27),
                (14, 27),
                (12, 26),
                (13, 26),
                (14, 26),
                (15, 26),
                (11, 25),
                (12, 25),
                (13, 25),
                (14, 25),
                (15, 25),
                (16, 25),
                (10, 24),
                (11, 24),
                (12, 24),
                (13, 24),
                (14, 24),
                (15, 24),
                (16, 24),
                (17, 24),
                (9, 23),
                (10, 23),
                (11, 23),
                (12, 23),
                (13, 23),
                (14, 23),
                (15, 23),
                (16, 23),
                (17, 23),
                (18, 23),
                (8, 22),
                (9, 22),
                (10, 22),
                (11, 22),
                (12, 22),
                (13, 22),
                (14, 22),
                (15, 22),
                (16, 22),
                (17, 22),
                (18, 22),
                (19, 22),
                (7, 21),
                (8, 21),
                (9, 21),
                (10, 21),
                (11, 21),
                (12, 21),
                (13, 21),
                (14, 21),
                (15, 21),
                (16, 21),
                (17, 21),
                (18, 21),
                (19, 21),
                (20, 21),
                (8, 20),
                (9, 20),
                (10, 20),
                (11, 20),
                (12, 20),
                (13, 20),
                (14, 20),
                (15, 20),
                (16, 20),
                (17, 20),
                (18, 20),
                (19, 20),
                (9, 19),
                (10, 19),
                (11, 19),
                (12, 19),
                (13, 19),
                (14, 19),
                (15, 19),
                (16, 19),
                (17, 19),
                (18, 19),
                (10, 18),
                (11, 18),
                (12, 18),
                (13, 18),
                (14, 18),
                (15, 18),
                (16, 18),
                (17, 18),
                (11, 17),
                (12, 17),
                (13, 17),
                (14, 17),
                (15, 17),
                (16, 17),
                (12, 16),
                (13, 16),
                (14, 16),
                (15, 16),
                (13, 15),
                (14, 15),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_roundtrips_through_json() {
        let profile = StrategyProfile::standard();
        let json = serde_json::to_string(&profile).unwrap();
        let back = StrategyProfile::from_json(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn standard_sector_partition_covers_the_enemy_half() {
        let table = StrategyProfile::standard().sectors;
        let total: usize = Sector::ALL
            .into_iter()
            .map(|s| table.cells(s).len())
            .sum();
        assert_eq!(total, 20 + 20 + 36 + 36 + 98);
        for sector in Sector::ALL {
            for cell in table.cells(sector) {
                assert!(
                    cell.y() >= 14,
                    "sector cell ({}, {}) is not on the enemy half",
                    cell.x(),
                    cell.y()
                );
            }
        }
    }
}

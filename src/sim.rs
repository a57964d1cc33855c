//! Offline board implementation.
//!
//! A self-contained [`Board`] for native testing and benchmarking, so the
//! engine runs without the game process. Movement is simplified to what the
//! engine actually consumes: a shortest cardinal route to the far edge
//! (blocked by any stationary unit), overridable per deploy cell for
//! deterministic fixtures. Action requests enforce budget and placement
//! legality and report accepted counts, mirroring the live engine's
//! best-effort contract.

use crate::board::{Board, Edges};
use crate::grid::*;
use crate::units::*;
use fnv::{FnvHashMap, FnvHashSet};
use pathfinding::prelude::bfs;

/// One accepted mobile deployment, for test assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRecord {
    pub kind: UnitKind,
    pub cell: Cell,
    pub count: u32,
}

pub struct SimBoard {
    catalog: UnitCatalog,
    units: GridArray<Option<StationaryUnit>>,
    // [side][resource] whole-point pools
    resources: [[u32; 2]; 2],
    edges: Edges,
    scripted_paths: FnvHashMap<Cell, Vec<Cell>>,
    spawns: Vec<SpawnRecord>,
    pending_removals: Vec<Cell>,
    removal_set: FnvHashSet<Cell>,
}

impl SimBoard {
    pub fn new(catalog: UnitCatalog) -> Self {
        SimBoard {
            catalog,
            units: GridArray::new(None),
            resources: [[0; 2]; 2],
            edges: Self::build_edges(),
            scripted_paths: FnvHashMap::default(),
            spawns: Vec::new(),
            pending_removals: Vec::new(),
            removal_set: FnvHashSet::default(),
        }
    }

    fn build_edges() -> Edges {
        let run = |f: &dyn Fn(u8) -> (u8, u8)| -> Vec<Cell> {
            (0..HALF_ARENA)
                .map(|n| {
                    let (x, y) = f(n);
                    Cell::new(x, y)
                })
                .collect()
        };
        Edges::new(
            run(&|n| (13 - n, n)),
            run(&|n| (14 + n, n)),
            run(&|n| (13 - n, 27 - n)),
            run(&|n| (14 + n, 27 - n)),
        )
    }

    fn arena_contains(cell: Cell) -> bool {
        let x = cell.x() as i16;
        let y = cell.y() as i16;
        x + y >= 13 && x + y <= 41 && x - y <= 14 && y - x <= 14
    }

    fn side_index(side: Side) -> usize {
        match side {
            Side::Friendly => 0,
            Side::Enemy => 1,
        }
    }

    fn resource_index(resource: Resource) -> usize {
        match resource {
            Resource::Structure => 0,
            Resource::Mobile => 1,
        }
    }

    pub fn set_resources(&mut self, side: Side, structure: u32, mobile: u32) {
        self.resources[Self::side_index(side)] = [structure, mobile];
    }

    /// Drop a stationary unit onto the grid directly (fixture setup; no
    /// budget or legality checks).
    pub fn place_stationary(&mut self, side: Side, kind: UnitKind, cell: Cell, upgraded: bool) {
        self.units
            .set(cell, Some(StationaryUnit { kind, side, upgraded }));
    }

    /// Pin the route reported for a deploy cell.
    pub fn script_path(&mut self, from: Cell, path: Vec<Cell>) {
        self.scripted_paths.insert(from, path);
    }

    pub fn spawns(&self) -> &[SpawnRecord] {
        &self.spawns
    }

    pub fn pending_removals(&self) -> &[Cell] {
        &self.pending_removals
    }

    fn try_spend(&mut self, side: Side, resource: Resource, cost: u32) -> bool {
        let pool = &mut self.resources[Self::side_index(side)][Self::resource_index(resource)];
        if *pool >= cost {
            *pool -= cost;
            true
        } else {
            false
        }
    }

    fn open(&self, cell: Cell) -> bool {
        Self::arena_contains(cell) && self.units.get(cell).is_none()
    }

    /// The edge a unit starting in this quadrant moves toward.
    fn target_edge(&self, from: Cell) -> &[Cell] {
        let left_half = from.x() < HALF_ARENA;
        if from.y() < HALF_ARENA {
            if left_half {
                &self.edges.enemy_right
            } else {
                &self.edges.enemy_left
            }
        } else if left_half {
            &self.edges.friendly_right
        } else {
            &self.edges.friendly_left
        }
    }

    fn compute_path(&self, from: Cell) -> Vec<Cell> {
        if !self.open(from) {
            return Vec::new();
        }
        let targets: FnvHashSet<Cell> = self.target_edge(from).iter().copied().collect();
        let route = bfs(
            &from,
            |&cell| {
                NEIGHBORS_4
                    .iter()
                    .filter_map(|&(dx, dy)| cell.offset(dx, dy))
                    .filter(|&next| self.open(next))
                    .collect::<Vec<Cell>>()
            },
            |cell| targets.contains(cell),
        );
        match route {
            Some(path) => path,
            // No way through: the unit walks back out over its own edge.
            None => vec![from],
        }
    }
}

impl Board for SimBoard {
    fn in_bounds(&self, cell: Cell) -> bool {
        Self::arena_contains(cell)
    }

    fn unit_at(&self, cell: Cell) -> Option<StationaryUnit> {
        *self.units.get(cell)
    }

    fn attackers_in_range(&self, cell: Cell, victim: Side) -> Vec<u32> {
        let attacker_side = victim.opponent();
        self.units
            .iter()
            .filter_map(|(at, unit)| (*unit).map(|u| (at, u)))
            .filter(|(_, unit)| {
                unit.side == attacker_side && self.catalog.is_stationary_attacker(unit.kind)
            })
            .filter(|(at, unit)| {
                let dx = at.x() as f32 - cell.x() as f32;
                let dy = at.y() as f32 - cell.y() as f32;
                let range = self.catalog.range(unit.kind, unit.upgraded);
                dx * dx + dy * dy <= range * range
            })
            .map(|(_, unit)| self.catalog.damage(unit.kind, unit.upgraded))
            .collect()
    }

    fn resource_count(&self, resource: Resource, side: Side) -> u32 {
        self.resources[Self::side_index(side)][Self::resource_index(resource)]
    }

    fn path_to_far_edge(&self, from: Cell) -> Vec<Cell> {
        if let Some(path) = self.scripted_paths.get(&from) {
            return path.clone();
        }
        self.compute_path(from)
    }

    fn edges(&self) -> &Edges {
        &self.edges
    }

    fn request_place(&mut self, kind: UnitKind, cells: &[Cell], count_per_cell: u32) -> u32 {
        let stationary = self.catalog.is_stationary(kind);
        let resource = self.catalog.resource(kind);
        let cost = self.catalog.cost(kind);
        let mut total_accepted = 0;

        for &cell in cells {
            let legal = if stationary {
                Self::arena_contains(cell)
                    && cell.y() < HALF_ARENA
                    && self.units.get(cell).is_none()
            } else {
                self.edges.is_friendly_edge(cell) && self.units.get(cell).is_none()
            };
            if !legal {
                continue;
            }

            let mut accepted_here = 0;
            for _ in 0..count_per_cell {
                if !self.try_spend(Side::Friendly, resource, cost) {
                    break;
                }
                accepted_here += 1;
                if stationary {
                    self.units.set(
                        cell,
                        Some(StationaryUnit {
                            kind,
                            side: Side::Friendly,
                            upgraded: false,
                        }),
                    );
                    break; // one structure per cell
                }
            }
            if !stationary && accepted_here > 0 {
                self.spawns.push(SpawnRecord {
                    kind,
                    cell,
                    count: accepted_here,
                });
            }
            total_accepted += accepted_here;
        }

        total_accepted
    }

    fn request_upgrade(&mut self, cells: &[Cell]) -> u32 {
        let mut accepted = 0;
        for &cell in cells {
            let unit = match self.units.get(cell) {
                Some(unit) if unit.side == Side::Friendly && !unit.upgraded => *unit,
                _ => continue,
            };
            let cost = self.catalog.upgrade_cost(unit.kind);
            if !self.try_spend(Side::Friendly, Resource::Structure, cost) {
                continue;
            }
            self.units.set(
                cell,
                Some(StationaryUnit {
                    upgraded: true,
                    ..unit
                }),
            );
            accepted += 1;
        }
        accepted
    }

    fn request_remove(&mut self, cells: &[Cell]) -> u32 {
        let mut accepted = 0;
        for &cell in cells {
            match self.units.get(cell) {
                Some(unit) if unit.side == Side::Friendly => {}
                _ => continue,
            }
            if self.removal_set.insert(cell) {
                self.pending_removals.push(cell);
            }
            accepted += 1;
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SimBoard {
        SimBoard::new(UnitCatalog::standard())
    }

    #[test]
    fn arena_is_the_expected_diamond() {
        let board = board();
        assert!(board.in_bounds(Cell::new(0, 13)));
        assert!(board.in_bounds(Cell::new(13, 0)));
        assert!(board.in_bounds(Cell::new(27, 14)));
        assert!(board.in_bounds(Cell::new(13, 13)));
        assert!(!board.in_bounds(Cell::new(0, 0)));
        assert!(!board.in_bounds(Cell::new(0, 12)));
        assert!(!board.in_bounds(Cell::new(27, 27)));
    }

    #[test]
    fn empty_board_routes_reach_the_enemy_edge() {
        let board = board();
        let path = board.path_to_far_edge(Cell::new(13, 0));
        let end = *path.last().unwrap();
        assert!(board.edges().is_enemy_edge(end));
        assert_eq!(path.first(), Some(&Cell::new(13, 0)));
    }

    #[test]
    fn walled_off_routes_end_on_the_friendly_edge() {
        let mut board = board();
        // Seal the full row above the friendly half.
        for x in 0..ARENA_SIZE {
            let cell = Cell::new(x, 14);
            if SimBoard::arena_contains(cell) {
                board.place_stationary(Side::Enemy, UnitKind::Wall, cell, false);
            }
        }
        let path = board.path_to_far_edge(Cell::new(13, 0));
        let end = *path.last().unwrap();
        assert!(!board.edges().is_enemy_edge(end));
    }

    #[test]
    fn placement_respects_budget_and_occupancy() {
        let mut board = board();
        board.set_resources(Side::Friendly, 3, 0);
        let cells = [
            Cell::new(0, 13),
            Cell::new(1, 13),
            Cell::new(2, 13),
            Cell::new(3, 13),
        ];
        let accepted = board.request_place(UnitKind::Wall, &cells, 1);
        assert_eq!(accepted, 3, "three walls fit a 3 SP budget");
        assert_eq!(board.request_place(UnitKind::Wall, &cells, 1), 0);
        assert_eq!(board.resource_count(Resource::Structure, Side::Friendly), 0);
    }

    #[test]
    fn mobile_units_deploy_only_from_open_edge_cells() {
        let mut board = board();
        board.set_resources(Side::Friendly, 0, 10);
        assert_eq!(board.request_place(UnitKind::Scout, &[Cell::new(13, 5)], 3), 0);
        let accepted = board.request_place(UnitKind::Scout, &[Cell::new(13, 0)], 3);
        assert_eq!(accepted, 3);
        assert_eq!(
            board.spawns(),
            &[SpawnRecord {
                kind: UnitKind::Scout,
                cell: Cell::new(13, 0),
                count: 3,
            }]
        );
        assert_eq!(board.resource_count(Resource::Mobile, Side::Friendly), 7);
    }
}

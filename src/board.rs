//! Contract between the decision engine and the external game engine.
//!
//! The engine never talks to the game directly. Everything it learns about
//! the current turn snapshot, and every placement/upgrade/removal it wants,
//! goes through the [`Board`] trait. Implementations exist for the live game
//! process (out of scope here) and for offline simulation ([`crate::sim`]).

use crate::grid::*;
use crate::units::*;
use fnv::FnvHashSet;

/// The four diagonal edge runs of the diamond arena.
pub struct Edges {
    pub friendly_left: Vec<Cell>,
    pub friendly_right: Vec<Cell>,
    pub enemy_left: Vec<Cell>,
    pub enemy_right: Vec<Cell>,
    friendly_set: FnvHashSet<Cell>,
    enemy_set: FnvHashSet<Cell>,
}

impl Edges {
    pub fn new(
        friendly_left: Vec<Cell>,
        friendly_right: Vec<Cell>,
        enemy_left: Vec<Cell>,
        enemy_right: Vec<Cell>,
    ) -> Self {
        let friendly_set = friendly_left
            .iter()
            .chain(friendly_right.iter())
            .copied()
            .collect();
        let enemy_set = enemy_left.iter().chain(enemy_right.iter()).copied().collect();
        Edges {
            friendly_left,
            friendly_right,
            enemy_left,
            enemy_right,
            friendly_set,
            enemy_set,
        }
    }

    /// Both friendly edge runs, left then right.
    pub fn friendly(&self) -> impl Iterator<Item = Cell> + '_ {
        self.friendly_left
            .iter()
            .chain(self.friendly_right.iter())
            .copied()
    }

    /// Both enemy edge runs, left then right.
    pub fn enemy(&self) -> impl Iterator<Item = Cell> + '_ {
        self.enemy_left
            .iter()
            .chain(self.enemy_right.iter())
            .copied()
    }

    pub fn is_friendly_edge(&self, cell: Cell) -> bool {
        self.friendly_set.contains(&cell)
    }

    pub fn is_enemy_edge(&self, cell: Cell) -> bool {
        self.enemy_set.contains(&cell)
    }
}

/// Read and action interface over one turn's board snapshot.
///
/// Read methods are pure with respect to the snapshot. Action requests are
/// best-effort: each returns the number of units actually accepted, which
/// may be less than requested when budget or placement legality runs out,
/// and never fails. The implementor owns the commit protocol -- accumulated
/// accepted requests are submitted to the wider system exactly once, after
/// the turn's full decision pass, never mid-pass.
pub trait Board {
    /// Whether the cell lies inside the playable diamond.
    fn in_bounds(&self, cell: Cell) -> bool;

    /// The stationary unit occupying a cell, if any.
    fn unit_at(&self, cell: Cell) -> Option<StationaryUnit>;

    /// Per-shot damage of every stationary attacker belonging to the
    /// opponent of `victim` whose range covers `cell`.
    fn attackers_in_range(&self, cell: Cell, victim: Side) -> Vec<u32>;

    /// Current whole-point count of the given resource pool.
    fn resource_count(&self, resource: Resource, side: Side) -> u32;

    /// The route a unit deployed at `from` would take toward the far edge.
    /// Empty when no route is available. A route whose final cell is not on
    /// an enemy edge is blocked by this game's movement convention.
    fn path_to_far_edge(&self, from: Cell) -> Vec<Cell>;

    fn edges(&self) -> &Edges;

    /// Request `count_per_cell` units of `kind` at each cell, in order.
    fn request_place(&mut self, kind: UnitKind, cells: &[Cell], count_per_cell: u32) -> u32;

    /// Request an upgrade of whatever friendly structure occupies each cell.
    fn request_upgrade(&mut self, cells: &[Cell]) -> u32;

    /// Mark the friendly structure at each cell for removal.
    fn request_remove(&mut self, cells: &[Cell]) -> u32;
}

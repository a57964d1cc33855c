//! Public turn driver.
//!
//! One full decision pass per turn, in a fixed order: core defense build,
//! attack decision, supplementary build, then maintenance. Attack decisions
//! therefore see the post-core-build board. Turn 0 only lays down the
//! initial blueprint. The maintenance pass marks every own un-upgraded
//! structure for removal -- deliberate churn that trades the refund cycle
//! for a freshly re-optimized layout next turn.

use crate::attack::{AttackPlanner, AttackState};
use crate::board::Board;
use crate::grid::*;
use crate::profile::StrategyProfile;
use crate::queue::apply_queue;
use crate::units::*;
use itertools::iproduct;
use log::*;

/// What kind of turn the higher-level caller wants.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Directive {
    /// The normal per-turn attack evaluation.
    #[default]
    Standard,
    /// Commit this turn's mobile budget to the sector-driven base-clear play.
    ClearBase,
}

pub struct Tactician {
    catalog: UnitCatalog,
    profile: StrategyProfile,
    attack: AttackPlanner,
}

impl Tactician {
    pub fn new(catalog: UnitCatalog, profile: StrategyProfile) -> Self {
        Tactician {
            catalog,
            profile,
            attack: AttackPlanner::new(),
        }
    }

    /// Engine with the shipped catalog and blueprint.
    pub fn standard() -> Self {
        Tactician::new(UnitCatalog::standard(), StrategyProfile::standard())
    }

    pub fn attack_state(&self) -> AttackState {
        self.attack.state()
    }

    pub fn attack_delay(&self) -> i32 {
        self.attack.delay()
    }

    pub fn profile(&self) -> &StrategyProfile {
        &self.profile
    }

    /// Run one full decision pass against the turn snapshot.
    pub fn play_turn(&mut self, board: &mut dyn Board, turn: u32, directive: Directive) {
        debug!("turn {}: starting decision pass", turn);

        if turn == 0 {
            self.build_initial_defenses(board);
            self.retire_stale_structures(board);
            return;
        }

        apply_queue(board, &self.profile.core_queue, self.attack.exceptions());

        match directive {
            Directive::Standard => {
                self.attack
                    .decide(board, &self.catalog, &self.profile, turn);
            }
            Directive::ClearBase => {
                self.attack.clear_base(board, &self.catalog, &self.profile);
            }
        }

        apply_queue(
            board,
            &self.profile.supplementary_queue,
            self.attack.exceptions(),
        );
        self.retire_stale_structures(board);
    }

    fn build_initial_defenses(&self, board: &mut dyn Board) {
        let turrets = &self.profile.initial_turrets;
        let accepted = board.request_place(UnitKind::Turret, turrets, 1);
        if (accepted as usize) < turrets.len() {
            error!(
                "turn: placed {} of {} initial turrets",
                accepted,
                turrets.len()
            );
        }

        let walls = &self.profile.initial_walls;
        let accepted = board.request_place(UnitKind::Wall, walls, 1);
        if (accepted as usize) < walls.len() {
            error!("turn: placed {} of {} initial walls", accepted, walls.len());
        }
    }

    /// Mark every own un-upgraded structure for removal.
    fn retire_stale_structures(&self, board: &mut dyn Board) {
        let stale: Vec<Cell> = iproduct!(0..ARENA_SIZE, 0..ARENA_SIZE)
            .map(|(x, y)| Cell::new(x, y))
            .filter(|&cell| board.in_bounds(cell))
            .filter(|&cell| {
                matches!(
                    board.unit_at(cell),
                    Some(unit) if unit.side == Side::Friendly && !unit.upgraded
                )
            })
            .collect();

        let accepted = board.request_remove(&stale);
        if (accepted as usize) < stale.len() {
            debug!(
                "maintenance: marked {} of {} stale structures for removal",
                accepted,
                stale.len()
            );
        }
    }
}

//! Per-turn attack strategy selection.
//!
//! One transition evaluation per turn over a small state machine. A launched
//! attack records its lane as a build exception set and arms a delay window;
//! while the window is open no new decision is made, and when it expires the
//! machine drops back to no-attack with a cleared exception set. Every
//! failure path lands on "do nothing offensive this turn".

use crate::board::Board;
use crate::deploy::{is_path_blocked, safest_deployment};
use crate::grid::Cell;
use crate::profile::{AttackTuning, DemolisherShare, SplitLane, StrategyProfile};
use crate::regions::threat_by_sector;
use crate::threat::ThreatMap;
use crate::units::{Resource, Side, UnitCatalog, UnitKind};
use fnv::FnvHashSet;
use log::*;

/// Current posture of the attack machine. No state is terminal; the machine
/// re-evaluates every turn.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AttackState {
    NoAttack,
    WaitingToAttack,
    BasicScoutAttack,
    SplitScoutAttack,
    DemolisherAttack,
}

/// The mobile-point bar an attack must clear on the given turn.
pub fn attack_threshold(tuning: &AttackTuning, turn: u32) -> f64 {
    let scaled = (tuning.growth_per_turn * turn as f64).min(tuning.max_attack_wait as f64);
    (tuning.min_attack_size as f64).max(scaled)
}

pub struct AttackPlanner {
    state: AttackState,
    delay: i32,
    exceptions: FnvHashSet<Cell>,
}

impl Default for AttackPlanner {
    fn default() -> Self {
        AttackPlanner::new()
    }
}

impl AttackPlanner {
    pub fn new() -> Self {
        AttackPlanner {
            state: AttackState::NoAttack,
            delay: 0,
            exceptions: FnvHashSet::default(),
        }
    }

    pub fn state(&self) -> AttackState {
        self.state
    }

    pub fn delay(&self) -> i32 {
        self.delay
    }

    /// Cells the build queues must leave untouched this turn.
    pub fn exceptions(&self) -> &FnvHashSet<Cell> {
        &self.exceptions
    }

    /// Run the per-turn transition. Turn 0 never reaches this.
    pub fn decide(
        &mut self,
        board: &mut dyn Board,
        catalog: &UnitCatalog,
        profile: &StrategyProfile,
        turn: u32,
    ) {
        // A prior attack's lane-protection window is still open: hold.
        self.delay -= 1;
        if self.delay >= 0 {
            self.state = AttackState::WaitingToAttack;
            return;
        }
        self.state = AttackState::NoAttack;
        self.exceptions.clear();

        let mp = board.resource_count(Resource::Mobile, Side::Friendly);
        let enemy_mp = board.resource_count(Resource::Mobile, Side::Enemy);
        let threshold = attack_threshold(&profile.tuning, turn);

        if (mp as f64) >= threshold {
            let threat_map = ThreatMap::generate(board);
            let deployment =
                safest_deployment(board, &threat_map, None, profile.filter_blocked_paths);
            let blocked = match deployment.cell {
                None => true,
                Some(cell) => {
                    !profile.filter_blocked_paths && is_path_blocked(board, cell)
                }
            };

            if !blocked && (deployment.threat as f64) < mp as f64 / 2.0 {
                // A relatively safe lane exists: commit everything to it.
                if let Some(cell) = deployment.cell {
                    self.basic_rush(board, profile, cell, &deployment.path, mp);
                }
            } else if blocked {
                self.split_rush(board, catalog, profile, &threat_map, mp);
            } else if mp > profile.tuning.corner_attack_min_mp {
                self.corner_sneak(board, catalog, profile, mp);
            } else {
                debug!(
                    "attack: safest lane too exposed ({} threat) for {} MP, holding",
                    deployment.threat, mp
                );
            }
        }

        // Defensive trigger, independent of our own budget: meet a massing
        // enemy mobile force with interceptors on even turns.
        if self.state == AttackState::NoAttack && turn % 2 == 0 {
            let bar = self.interceptor_threshold(board, profile, turn);
            if enemy_mp >= bar {
                self.deploy_interceptors(board, profile, enemy_mp);
            }
        }
    }

    /// Single-lane rush: the full mobile budget as one scout stack.
    fn basic_rush(
        &mut self,
        board: &mut dyn Board,
        profile: &StrategyProfile,
        cell: Cell,
        path: &[Cell],
        mp: u32,
    ) {
        debug!(
            "attack: single-lane rush from ({}, {}) with {} scouts",
            cell.x(),
            cell.y(),
            mp
        );
        let accepted = board.request_place(UnitKind::Scout, &[cell], mp);
        if accepted < mp {
            error!("attack: deployed {} of {} rush scouts", accepted, mp);
        }
        self.exceptions = path.iter().copied().collect();
        if let Some(guard) = profile.rush_guard_wall {
            if !self.exceptions.contains(&guard) {
                board.request_place(UnitKind::Wall, &[guard], 1);
            }
        }
        self.delay = profile.tuning.lane_hold_turns;
        self.state = AttackState::BasicScoutAttack;
    }

    /// Split-lane rush against a walled-off opponent: half the budget at
    /// each of two adjacent cells on the safer fallback lane.
    fn split_rush(
        &mut self,
        board: &mut dyn Board,
        catalog: &UnitCatalog,
        profile: &StrategyProfile,
        threat_map: &ThreatMap,
        mp: u32,
    ) {
        let candidates: Vec<Cell> = profile.split_lanes.iter().map(|lane| lane.deploy).collect();
        let pick = safest_deployment(
            board,
            threat_map,
            Some(&candidates),
            profile.filter_blocked_paths,
        );

        let lane: &SplitLane = match pick.cell {
            None => {
                let Some(fallback) = profile.split_lanes.first() else {
                    error!("attack: no split lanes configured, abandoning attack");
                    return;
                };
                warn!(
                    "attack: no viable split lane, falling back to ({}, {})",
                    fallback.deploy.x(),
                    fallback.deploy.y()
                );
                fallback
            }
            Some(cell) => match profile.split_lanes.iter().find(|lane| lane.deploy == cell) {
                Some(lane) => lane,
                None => {
                    // The search returned a cell outside the candidate set it
                    // was given. Abandon the attack rather than guess.
                    error!(
                        "attack: split search returned unexpected cell ({}, {}), abandoning attack",
                        cell.x(),
                        cell.y()
                    );
                    return;
                }
            },
        };

        debug!(
            "attack: split-lane rush at ({}, {})",
            lane.deploy.x(),
            lane.deploy.y()
        );
        self.exceptions = lane.shielded_rebuild.iter().copied().collect();
        let stack = mp / 2 / catalog.cost(UnitKind::Scout);
        board.request_place(UnitKind::Scout, &[lane.deploy], stack);
        let accepted = board.request_place(UnitKind::Scout, &[lane.companion], stack);
        if accepted < stack {
            error!("attack: deployed {} of {} split scouts", accepted, stack);
        }
        self.delay = profile.tuning.lane_hold_turns;
        self.state = AttackState::SplitScoutAttack;
    }

    /// Corner sneak: waves sized by the watched corner cell's occupant.
    fn corner_sneak(
        &mut self,
        board: &mut dyn Board,
        catalog: &UnitCatalog,
        profile: &StrategyProfile,
        mp: u32,
    ) {
        let sneak = &profile.sneak;
        let occupant = board.unit_at(sneak.watch_cell);

        // An undefended or lightly-held corner falls to a small first wave;
        // a hardened one needs most of the budget, and a fully upgraded
        // obstacle needs demolishers to crack it.
        let (first_wave, use_demolishers) = match occupant {
            None => (mp / 3 + 1, false),
            Some(unit)
                if unit.kind == UnitKind::Support
                    || (unit.kind == UnitKind::Turret && !unit.upgraded) =>
            {
                (mp / 3 + 1, false)
            }
            Some(unit)
                if (unit.kind == UnitKind::Wall && !unit.upgraded)
                    || unit.kind == UnitKind::Turret =>
            {
                (mp * 3 / 4 + 1, false)
            }
            Some(_) => (mp * 3 / 4 / catalog.cost(UnitKind::Demolisher), true),
        };

        debug!(
            "attack: corner sneak, first wave {} ({})",
            first_wave,
            if use_demolishers { "demolishers" } else { "scouts" }
        );

        self.exceptions = sneak.corridor.iter().copied().collect();
        self.delay = profile.tuning.lane_hold_turns;
        board.request_place(UnitKind::Wall, &[sneak.guard_wall], 1);

        if use_demolishers {
            board.request_place(UnitKind::Wall, &[sneak.demolisher_lane_wall], 1);
            board.request_place(UnitKind::Demolisher, &[sneak.demolisher_cell], first_wave);
            let remainder = mp - first_wave * catalog.cost(UnitKind::Demolisher);
            board.request_place(UnitKind::Scout, &[sneak.wave_cell], remainder);
            self.state = AttackState::DemolisherAttack;
        } else {
            board.request_place(UnitKind::Scout, &[sneak.wave_cell], first_wave);
            board.request_place(UnitKind::Scout, &[sneak.second_wave_cell], mp - first_wave);
            self.state = AttackState::SplitScoutAttack;
        }
    }

    /// Enemy-MP bar for the interceptor trigger. Grows with the turn number
    /// only once the core defense is fully built.
    fn interceptor_threshold(
        &self,
        board: &dyn Board,
        profile: &StrategyProfile,
        turn: u32,
    ) -> u32 {
        let core_built = profile
            .core_queue
            .iter()
            .flat_map(|item| item.cells.iter())
            .all(|&cell| board.unit_at(cell).is_some());
        let scaled = if core_built {
            (turn as f64 * profile.interceptors.growth_per_turn) as u32
        } else {
            0
        };
        profile
            .interceptors
            .base_threshold
            .max(scaled.min(profile.interceptors.threshold_cap))
    }

    fn deploy_interceptors(&mut self, board: &mut dyn Board, profile: &StrategyProfile, enemy_mp: u32) {
        let trigger = &profile.interceptors;
        let count = (enemy_mp / trigger.per_enemy_mp).max(1);
        debug!(
            "attack: intercepting {} enemy MP with {} per deploy cell",
            enemy_mp, count
        );
        board.request_place(UnitKind::Wall, &[trigger.repair_wall], 1);
        self.exceptions = trigger.shielded_cells.iter().copied().collect();
        board.request_place(UnitKind::Interceptor, &trigger.deploy_cells, count);
    }

    /// Sector-driven base-clear play, chosen explicitly by the caller
    /// instead of the per-turn rush evaluation: aim a demolisher wave at
    /// the weakest sector of the enemy half.
    pub fn clear_base(
        &mut self,
        board: &mut dyn Board,
        catalog: &UnitCatalog,
        profile: &StrategyProfile,
    ) {
        let threat_map = ThreatMap::generate(board);
        let sector = threat_by_sector(&threat_map, &profile.sectors).weakest();
        let Some(plan) = profile.assaults.get(sector) else {
            warn!("attack: no base-clear play for {:?} sector, holding", sector);
            return;
        };

        let mp = board.resource_count(Resource::Mobile, Side::Friendly);
        let demolisher_cost = catalog.cost(UnitKind::Demolisher);
        let demolishers = match plan.share {
            DemolisherShare::HalfBudget => mp / 2 / demolisher_cost,
            DemolisherShare::FullBudget => mp / demolisher_cost,
        };

        debug!(
            "attack: clearing {:?} sector with {} demolishers",
            sector, demolishers
        );
        if !plan.screen_walls.is_empty() {
            board.request_place(UnitKind::Wall, &plan.screen_walls, 1);
        }
        board.request_place(UnitKind::Demolisher, &[plan.demolisher_cell], demolishers);
        if let Some(scout_cell) = plan.scout_cell {
            let remainder = mp - demolishers * demolisher_cost;
            board.request_place(UnitKind::Scout, &[scout_cell], remainder);
        }
        self.delay = profile.tuning.lane_hold_turns;
        self.state = AttackState::DemolisherAttack;
    }
}

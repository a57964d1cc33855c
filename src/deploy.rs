//! Deployment search over the current threat map.
//!
//! Candidates are friendly edge cells; each candidate is scored by the total
//! exposure along the route the board predicts for it. The search keeps the
//! minimum-exposure candidate, breaking ties toward the shorter route. A
//! route that would end back on a friendly edge is blocked; whether blocked
//! candidates are excluded up front is a strategy-profile choice, since both
//! behaviors exist in the wild.

use crate::board::Board;
use crate::grid::Cell;
use crate::threat::ThreatMap;
use log::*;

/// Exposure reported when no candidate has a usable route.
pub const UNREACHABLE_THREAT: u32 = u32::MAX;

/// Outcome of a deployment search.
pub struct Deployment {
    /// Winning deploy cell, or `None` when nothing was viable.
    pub cell: Option<Cell>,
    /// The winner's predicted route (empty when `cell` is `None`).
    pub path: Vec<Cell>,
    /// Total exposure along the route, [`UNREACHABLE_THREAT`] when none.
    pub threat: u32,
}

/// Friendly edge cells not already occupied by a stationary unit.
pub fn viable_deploy_cells(board: &dyn Board) -> Vec<Cell> {
    board
        .edges()
        .friendly()
        .filter(|&cell| board.unit_at(cell).is_none())
        .collect()
}

/// Find the candidate whose route minimizes total exposure.
///
/// With no explicit candidate list, all viable friendly edge cells are
/// considered. Candidates without a route are logged and skipped; with
/// `filter_blocked`, candidates whose route does not reach an enemy edge
/// are skipped as well.
pub fn safest_deployment(
    board: &dyn Board,
    threat_map: &ThreatMap,
    candidates: Option<&[Cell]>,
    filter_blocked: bool,
) -> Deployment {
    let default_candidates;
    let candidates = match candidates {
        Some(cells) if !cells.is_empty() => cells,
        _ => {
            default_candidates = viable_deploy_cells(board);
            &default_candidates[..]
        }
    };

    let mut best: Option<(Cell, Vec<Cell>, u32)> = None;
    for &candidate in candidates {
        let path = board.path_to_far_edge(candidate);
        let end = match path.last() {
            Some(&end) => end,
            None => {
                debug!(
                    "deploy: no route from ({}, {}), skipping candidate",
                    candidate.x(),
                    candidate.y()
                );
                continue;
            }
        };
        if filter_blocked && !board.edges().is_enemy_edge(end) {
            continue;
        }
        let threat = threat_map.path_threat(&path);
        let better = match &best {
            None => true,
            Some((_, best_path, best_threat)) => {
                threat < *best_threat || (threat == *best_threat && path.len() < best_path.len())
            }
        };
        if better {
            best = Some((candidate, path, threat));
        }
    }

    match best {
        Some((cell, path, threat)) => Deployment {
            cell: Some(cell),
            path,
            threat,
        },
        None => Deployment {
            cell: None,
            path: Vec::new(),
            threat: UNREACHABLE_THREAT,
        },
    }
}

/// Whether a unit deployed at `from` would fail to reach the enemy edge.
pub fn is_path_blocked(board: &dyn Board, from: Cell) -> bool {
    let path = board.path_to_far_edge(from);
    match path.last() {
        Some(&end) => !board.edges().is_enemy_edge(end),
        None => true,
    }
}

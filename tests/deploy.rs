use arena_tactician::deploy::{is_path_blocked, safest_deployment, viable_deploy_cells, UNREACHABLE_THREAT};
use arena_tactician::*;

fn board() -> SimBoard {
    SimBoard::new(UnitCatalog::standard())
}

fn pinned_threat(values: &[(Cell, u32)]) -> ThreatMap {
    let mut grid = GridArray::new(None);
    for &(cell, threat) in values {
        grid.set(cell, Some(threat));
    }
    ThreatMap::from_grid(grid)
}

const A: Cell = Cell::new(0, 13);
const B: Cell = Cell::new(13, 0);
const C: Cell = Cell::new(12, 1);

#[test]
fn picks_the_minimum_threat_path_with_shorter_tie_break() {
    let mut board = board();
    let map = pinned_threat(&[
        (Cell::new(5, 15), 10),
        (Cell::new(6, 16), 2),
        (Cell::new(7, 17), 2),
        (Cell::new(8, 18), 4),
    ]);

    board.script_path(A, vec![A, Cell::new(5, 15), Cell::new(0, 14)]);
    board.script_path(
        B,
        vec![B, Cell::new(6, 16), Cell::new(7, 17), Cell::new(13, 27)],
    );
    board.script_path(C, vec![C, Cell::new(8, 18), Cell::new(14, 27)]);

    let candidates = [A, B, C];
    let result = safest_deployment(&board, &map, Some(&candidates), true);

    // B and C tie at threat 4; C's route is shorter.
    assert_eq!(result.cell, Some(C));
    assert_eq!(result.threat, 4);
    assert_eq!(result.path.len(), 3);
}

#[test]
fn blocked_candidates_are_excluded_only_when_filtering() {
    let mut board = board();
    let map = pinned_threat(&[(Cell::new(8, 18), 4)]);

    // A's route is threat-free but curls back onto our own edge.
    board.script_path(A, vec![A, Cell::new(1, 12), Cell::new(13, 0)]);
    board.script_path(C, vec![C, Cell::new(8, 18), Cell::new(14, 27)]);

    let candidates = [A, C];
    let strict = safest_deployment(&board, &map, Some(&candidates), true);
    assert_eq!(
        strict.cell,
        Some(C),
        "a blocked route must not win under the strict filter"
    );

    let permissive = safest_deployment(&board, &map, Some(&candidates), false);
    assert_eq!(permissive.cell, Some(A));
    assert_eq!(permissive.threat, 0);
}

#[test]
fn candidates_without_a_route_are_skipped() {
    let mut board = board();
    let map = pinned_threat(&[]);

    board.script_path(A, Vec::new());
    board.script_path(B, vec![B, Cell::new(13, 27)]);

    let candidates = [A, B];
    let result = safest_deployment(&board, &map, Some(&candidates), true);
    assert_eq!(result.cell, Some(B));
}

#[test]
fn reports_none_when_every_route_is_blocked() {
    let mut board = board();
    let map = pinned_threat(&[]);

    board.script_path(A, vec![A]);
    board.script_path(B, vec![B]);

    let candidates = [A, B];
    let result = safest_deployment(&board, &map, Some(&candidates), true);
    assert_eq!(result.cell, None);
    assert_eq!(result.threat, UNREACHABLE_THREAT);
    assert!(result.path.is_empty());
}

#[test]
fn default_candidates_are_unoccupied_friendly_edge_cells() {
    let mut board = board();
    board.place_stationary(Side::Friendly, UnitKind::Wall, A, false);

    let viable = viable_deploy_cells(&board);
    assert_eq!(viable.len(), 27, "one of the 28 edge cells is occupied");
    assert!(!viable.contains(&A));
    assert!(viable.contains(&B));
}

#[test]
fn path_blocked_means_not_ending_on_the_enemy_edge() {
    let mut board = board();
    board.script_path(A, vec![A, Cell::new(1, 12)]);
    board.script_path(B, vec![B, Cell::new(13, 27)]);
    board.script_path(C, Vec::new());

    assert!(is_path_blocked(&board, A));
    assert!(!is_path_blocked(&board, B));
    assert!(is_path_blocked(&board, C));
}

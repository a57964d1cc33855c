use arena_tactician::*;

fn board() -> SimBoard {
    SimBoard::new(UnitCatalog::standard())
}

#[test]
fn threat_is_the_sum_of_covering_attacker_damage() {
    let mut board = board();
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(13, 14), false);
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(14, 16), true);
    // A friendly turret must not contribute to our own exposure.
    board.place_stationary(Side::Friendly, UnitKind::Turret, Cell::new(13, 10), true);

    let map = ThreatMap::generate(&board);

    // (13, 16) sits within range of both enemy turrets: 5 + 15.
    assert_eq!(map.get(Cell::new(13, 16)), Some(20));
    // (13, 12) is covered only by the base turret two cells away.
    assert_eq!(map.get(Cell::new(13, 12)), Some(5));
    // Far corner of the arena is covered by nothing.
    assert_eq!(map.get(Cell::new(27, 13)), Some(0));
}

#[test]
fn every_cell_matches_the_board_attacker_query() {
    let mut board = board();
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(5, 15), false);
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(20, 17), true);

    let map = ThreatMap::generate(&board);

    for y in 0..ARENA_SIZE {
        for x in 0..ARENA_SIZE {
            let cell = Cell::new(x, y);
            if !board.in_bounds(cell) {
                assert_eq!(map.get(cell), None, "({}, {}) should be invalid", x, y);
                continue;
            }
            let expected: u32 = board.attackers_in_range(cell, Side::Friendly).iter().sum();
            assert_eq!(map.get(cell), Some(expected), "({}, {})", x, y);
        }
    }
}

#[test]
fn regeneration_over_the_same_snapshot_is_identical() {
    let mut board = board();
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(10, 18), false);
    board.place_stationary(Side::Enemy, UnitKind::Turret, Cell::new(17, 20), true);

    let first = ThreatMap::generate(&board);
    let second = ThreatMap::generate(&board);

    for (cell, value) in first.iter() {
        assert_eq!(second.get(cell), value);
    }
}

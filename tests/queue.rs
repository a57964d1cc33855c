use arena_tactician::*;
use fnv::FnvHashSet;

fn cells(list: &[(u8, u8)]) -> Vec<Cell> {
    list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

/// Board double that only tracks the structure budget and which requests
/// were issued, so the halt contract is observable directly.
struct RecordingBoard {
    sp: u32,
    edges: Edges,
    placements: Vec<Vec<Cell>>,
    upgrades: Vec<Vec<Cell>>,
}

impl RecordingBoard {
    fn new(sp: u32) -> Self {
        RecordingBoard {
            sp,
            edges: Edges::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()),
            placements: Vec::new(),
            upgrades: Vec::new(),
        }
    }
}

impl Board for RecordingBoard {
    fn in_bounds(&self, _cell: Cell) -> bool {
        true
    }

    fn unit_at(&self, _cell: Cell) -> Option<StationaryUnit> {
        None
    }

    fn attackers_in_range(&self, _cell: Cell, _victim: Side) -> Vec<u32> {
        Vec::new()
    }

    fn resource_count(&self, resource: Resource, _side: Side) -> u32 {
        match resource {
            Resource::Structure => self.sp,
            Resource::Mobile => 0,
        }
    }

    fn path_to_far_edge(&self, _from: Cell) -> Vec<Cell> {
        Vec::new()
    }

    fn edges(&self) -> &Edges {
        &self.edges
    }

    fn request_place(&mut self, _kind: UnitKind, cells: &[Cell], _count_per_cell: u32) -> u32 {
        let accepted = (cells.len() as u32).min(self.sp);
        self.sp -= accepted;
        self.placements.push(cells.to_vec());
        accepted
    }

    fn request_upgrade(&mut self, cells: &[Cell]) -> u32 {
        self.upgrades.push(cells.to_vec());
        0
    }

    fn request_remove(&mut self, _cells: &[Cell]) -> u32 {
        0
    }
}

#[test]
fn halts_after_the_item_that_drains_the_budget() {
    // Three batches wanting 10 placements against 6 SP: the engine must
    // stop after the second batch and never issue the third.
    let mut board = RecordingBoard::new(6);
    let queue = vec![
        BuildItem::place(UnitKind::Wall, cells(&[(0, 13), (1, 13), (2, 13), (3, 13)])),
        BuildItem::place(UnitKind::Wall, cells(&[(24, 13), (25, 13)])),
        BuildItem::place(UnitKind::Wall, cells(&[(10, 3), (11, 3), (12, 3), (13, 3)])),
    ];

    apply_queue(&mut board, &queue, &FnvHashSet::default());

    assert_eq!(board.placements.len(), 2, "third batch must never be requested");
    assert_eq!(board.sp, 0);
}

#[test]
fn halts_before_later_upgrade_items_too() {
    let mut board = RecordingBoard::new(2);
    let queue = vec![
        BuildItem::place(UnitKind::Wall, cells(&[(0, 13), (1, 13)])),
        BuildItem::upgrade(cells(&[(0, 13), (1, 13)])),
    ];

    apply_queue(&mut board, &queue, &FnvHashSet::default());

    assert!(
        board.upgrades.is_empty(),
        "zero SP halts the queue even though upgrades come next"
    );
}

#[test]
fn excepted_cells_are_left_untouched() {
    let mut board = SimBoard::new(UnitCatalog::standard());
    board.set_resources(Side::Friendly, 10, 0);

    let queue = vec![BuildItem::place(
        UnitKind::Wall,
        cells(&[(0, 13), (1, 13), (2, 13), (3, 13)]),
    )];
    let exceptions: FnvHashSet<Cell> = cells(&[(1, 13), (2, 13)]).into_iter().collect();

    apply_queue(&mut board, &queue, &exceptions);

    assert!(board.unit_at(Cell::new(0, 13)).is_some());
    assert!(board.unit_at(Cell::new(1, 13)).is_none());
    assert!(board.unit_at(Cell::new(2, 13)).is_none());
    assert!(board.unit_at(Cell::new(3, 13)).is_some());
}

#[test]
fn upgrade_batches_upgrade_existing_structures() {
    let mut board = SimBoard::new(UnitCatalog::standard());
    board.set_resources(Side::Friendly, 10, 0);

    let line = cells(&[(0, 13), (1, 13)]);
    let queue = vec![
        BuildItem::place(UnitKind::Wall, line.clone()),
        BuildItem::upgrade(line.clone()),
    ];

    apply_queue(&mut board, &queue, &FnvHashSet::default());

    for cell in line {
        let unit = board.unit_at(cell).expect("wall placed");
        assert!(unit.upgraded, "({}, {}) should be upgraded", cell.x(), cell.y());
    }
}

#[test]
fn kindless_placement_batches_are_skipped_not_fatal() {
    let mut board = SimBoard::new(UnitCatalog::standard());
    board.set_resources(Side::Friendly, 10, 0);

    let queue = vec![
        BuildItem {
            kind: None,
            upgrade: false,
            cells: cells(&[(0, 13)]),
        },
        BuildItem::place(UnitKind::Wall, cells(&[(1, 13)])),
    ];

    apply_queue(&mut board, &queue, &FnvHashSet::default());

    assert!(board.unit_at(Cell::new(0, 13)).is_none());
    assert!(board.unit_at(Cell::new(1, 13)).is_some());
}

use fleet::{Board, Cell, Coordinate, MAX_SHIPS};

fn at(token: &str) -> Coordinate {
    token.parse().unwrap()
}

#[test]
fn test_place_ship_sets_cell_and_counts() {
    let mut board = Board::new();
    assert!(board.place_ship(2, 3));
    assert_eq!(board.cell(Coordinate::new(2, 3).unwrap()), Cell::ShipPresent);
    assert_eq!(board.live_ships(), 1);
    assert_eq!(board.ships_placed(), 1);
}

#[test]
fn test_sixth_placement_rejected() {
    let mut board = Board::new();
    for col in 0..MAX_SHIPS {
        assert!(board.place_ship(0, col));
    }
    assert!(board.fleet_complete());
    assert!(!board.place_ship(5, 5));
    assert_eq!(board.cell(Coordinate::new(5, 5).unwrap()), Cell::Empty);
    assert_eq!(board.live_ships(), MAX_SHIPS);
}

#[test]
fn test_occupied_cell_rejected() {
    let mut board = Board::new();
    assert!(board.place_ship(4, 4));
    assert!(!board.place_ship(4, 4));
    assert_eq!(board.ships_placed(), 1);
}

#[test]
fn test_out_of_range_rejected() {
    let mut board = Board::new();
    assert!(!board.place_ship(10, 0));
    assert!(!board.place_ship(0, 10));
    assert_eq!(board.ships_placed(), 0);
}

#[test]
fn test_quota_counts_placements_not_survivors() {
    let mut board = Board::new();
    for col in 0..MAX_SHIPS {
        board.place_ship(0, col);
    }
    board.fire(at("A1"));
    assert_eq!(board.live_ships(), MAX_SHIPS - 1);
    assert!(!board.place_ship(9, 9));
}

#[test]
fn test_fire_miss_then_repeat() {
    let mut board = Board::new();
    board.place_ship(0, 0);
    assert_eq!(board.fire(at("B2")), Cell::WaterHit);
    assert_eq!(board.fire(at("B2")), Cell::WaterHit);
    assert_eq!(board.live_ships(), 1);
}

#[test]
fn test_fired_cells_are_marked() {
    let mut board = Board::new();
    board.place_ship(0, 0);
    assert!(!board.cell(at("A1")).is_fired());
    assert!(!board.cell(at("C3")).is_fired());
    board.fire(at("A1"));
    board.fire(at("C3"));
    assert!(board.cell(at("A1")).is_fired());
    assert!(board.cell(at("C3")).is_fired());
    assert!(!board.cell(at("D4")).is_fired());
}

#[test]
fn test_fire_hit_is_idempotent() {
    let mut board = Board::new();
    board.place_ship(0, 0);
    board.place_ship(0, 1);
    assert_eq!(board.fire(at("A1")), Cell::ShipHit);
    assert_eq!(board.live_ships(), 1);
    assert_eq!(board.fire(at("A1")), Cell::ShipHit);
    assert_eq!(board.live_ships(), 1);
    assert!(!board.all_ships_destroyed());
}

#[test]
fn test_all_ships_destroyed() {
    let mut board = Board::new();
    for col in 0..MAX_SHIPS {
        board.place_ship(3, col);
    }
    for col in 0..MAX_SHIPS {
        assert!(!board.all_ships_destroyed());
        board.fire(Coordinate::new(3, col).unwrap());
    }
    assert!(board.all_ships_destroyed());
    assert_eq!(board.live_ships(), 0);
}

use fleet::{parse_cell, Coordinate, GameError, BOARD_SIZE};
use proptest::prelude::*;

#[test]
fn test_corner_cells() {
    assert_eq!(parse_cell("A1").unwrap(), Coordinate::new(0, 0).unwrap());
    assert_eq!(parse_cell("J10").unwrap(), Coordinate::new(9, 9).unwrap());
    assert_eq!(parse_cell("J1").unwrap(), Coordinate::new(0, 9).unwrap());
    assert_eq!(parse_cell("A10").unwrap(), Coordinate::new(9, 0).unwrap());
}

#[test]
fn test_case_and_whitespace_insensitive() {
    assert_eq!(parse_cell("c7").unwrap(), parse_cell("C7").unwrap());
    assert_eq!(parse_cell("  b2 \t").unwrap(), Coordinate::new(1, 1).unwrap());
}

#[test]
fn test_leading_zero_row_accepted() {
    assert_eq!(parse_cell("A01").unwrap(), Coordinate::new(0, 0).unwrap());
}

#[test]
fn test_rejects_malformed_and_out_of_range() {
    for token in [
        "", "A", "1", "1A", "A0", "A11", "K1", "Z5", "AA1", "A1B", "A-1", "A 1", "-A1", "A1.",
        "É1", "A99999999999999999999999",
    ] {
        match parse_cell(token) {
            Err(GameError::InvalidCoordinate(_)) => {}
            other => panic!("{:?} should be rejected, got {:?}", token, other),
        }
    }
}

#[test]
fn test_from_str_matches_parse_cell() {
    let cell: Coordinate = "e5".parse().unwrap();
    assert_eq!(cell, Coordinate::new(4, 4).unwrap());
    assert!("k5".parse::<Coordinate>().is_err());
}

#[test]
fn test_every_cell_round_trips_through_canonical_form() {
    let mut seen = 0;
    for cell in Coordinate::all() {
        let canonical = cell.to_string();
        assert_eq!(parse_cell(&canonical).unwrap(), cell);
        assert_eq!(parse_cell(&canonical.to_lowercase()).unwrap(), cell);
        seen += 1;
    }
    assert_eq!(seen, BOARD_SIZE * BOARD_SIZE);
}

#[test]
fn test_new_rejects_out_of_board() {
    assert!(Coordinate::new(BOARD_SIZE, 0).is_none());
    assert!(Coordinate::new(0, BOARD_SIZE).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parsed_cells_are_always_on_board(token in "\\PC{0,6}") {
        if let Ok(cell) = parse_cell(&token) {
            prop_assert!(cell.row() < BOARD_SIZE && cell.col() < BOARD_SIZE);
            prop_assert_eq!(parse_cell(&cell.to_string()).unwrap(), cell);
        }
    }

    #[test]
    fn letter_digit_tokens_accept_exactly_the_board(col in 0u8..26, row in 0u32..30) {
        let token = format!("{}{}", (b'A' + col) as char, row);
        let valid = (col as usize) < BOARD_SIZE && row >= 1 && row as usize <= BOARD_SIZE;
        prop_assert_eq!(parse_cell(&token).is_ok(), valid);
    }
}

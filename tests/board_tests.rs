//! Board tests - geometry, vanish zone, line clearing, garbage

use blockfall_core::core::ActivePiece;
use blockfall_core::types::{Cell, VANISH_ROWS};
use blockfall_core::{Board, PieceKind, Rotation};

const WIDTH: u8 = 10;
const HEIGHT: u8 = 20;

fn board() -> Board {
    Board::new(WIDTH, HEIGHT)
}

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..WIDTH as i8 {
        assert!(board.set(x, y, Some(kind)));
    }
}

#[test]
fn test_new_board_dimensions() {
    let b = board();
    assert_eq!(b.width(), WIDTH);
    assert_eq!(b.height(), HEIGHT);
    assert_eq!(b.vanish_rows(), VANISH_ROWS);
    assert_eq!(b.total_height(), HEIGHT + VANISH_ROWS);
    assert_eq!(
        b.cells().len(),
        WIDTH as usize * (HEIGHT + VANISH_ROWS) as usize
    );
    assert!(b.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_vanish_rows_are_collidable_storage() {
    let mut b = board();
    // The full vertical range, vanish included, accepts cells.
    assert!(b.set(0, -(VANISH_ROWS as i8), Some(PieceKind::I)));
    assert!(b.set(9, HEIGHT as i8 - 1, Some(PieceKind::I)));
    // One above and one below do not.
    assert!(!b.set(0, -(VANISH_ROWS as i8) - 1, Some(PieceKind::I)));
    assert!(!b.set(0, HEIGHT as i8, Some(PieceKind::I)));

    // A piece overlapping the occupied vanish cell cannot be placed.
    let piece = ActivePiece {
        kind: PieceKind::I,
        rotation: Rotation::North,
        x: 0,
        y: -(VANISH_ROWS as i8) - 1,
    };
    assert!(!b.can_place(&piece));
}

#[test]
fn test_completed_lines_never_report_vanish_rows() {
    let mut b = board();
    for y in -(VANISH_ROWS as i8)..0 {
        fill_row(&mut b, y, PieceKind::L);
    }
    assert!(b.completed_lines().is_empty());

    fill_row(&mut b, 0, PieceKind::L);
    fill_row(&mut b, HEIGHT as i8 - 1, PieceKind::L);
    assert_eq!(b.completed_lines(), vec![0, HEIGHT - 1]);
}

#[test]
fn test_clear_lines_empty_set_returns_same_allocation() {
    let b = board();
    let ptr = b.cells().as_ptr();

    let b = b.clear_lines(&[]);
    assert_eq!(b.cells().as_ptr(), ptr);

    // Rows that filter to nothing hit the same fast path.
    let b = b.clear_lines(&[HEIGHT, HEIGHT + 3, u8::MAX]);
    assert_eq!(b.cells().as_ptr(), ptr);
}

#[test]
fn test_clear_lines_compaction_counts_rows_below() {
    let mut b = board();
    b.set(2, 14, Some(PieceKind::T));
    fill_row(&mut b, 15, PieceKind::I);
    b.set(3, 16, Some(PieceKind::S));
    fill_row(&mut b, 17, PieceKind::I);
    b.set(4, 18, Some(PieceKind::Z));

    let b = b.clear_lines(&[15, 17]);

    // Content above both cleared rows falls by two.
    assert_eq!(b.get(2, 16), Some(Some(PieceKind::T)));
    // Content between the cleared rows falls by one.
    assert_eq!(b.get(3, 17), Some(Some(PieceKind::S)));
    // Content below both cleared rows stays put.
    assert_eq!(b.get(4, 18), Some(Some(PieceKind::Z)));
    assert!(b.completed_lines().is_empty());
}

#[test]
fn test_clear_lines_vanish_overflow_is_discarded() {
    let mut b = board();
    // Fill the whole vanish zone and clear a single visible row: only one
    // vanish row fits into the vacated space, the rest shifts down within
    // the vanish zone and the top row becomes empty.
    for y in -(VANISH_ROWS as i8)..0 {
        fill_row(&mut b, y, PieceKind::J);
    }
    fill_row(&mut b, 0, PieceKind::I);

    let b = b.clear_lines(&[0]);

    // Visible top row now holds the bottom vanish row's content.
    assert_eq!(b.get(0, 0), Some(Some(PieceKind::J)));
    // The topmost vanish row is empty again.
    for x in 0..WIDTH as i8 {
        assert_eq!(b.get(x, -(VANISH_ROWS as i8)), Some(None));
    }
    // Nothing visible beyond row 0 appeared.
    assert_eq!(b.get(0, 1), Some(None));
}

#[test]
fn test_lock_piece_writes_kind_and_skips_above_storage() {
    let b = board();
    let piece = ActivePiece {
        kind: PieceKind::L,
        rotation: Rotation::North,
        x: 3,
        y: 10,
    };
    let b = b.lock_piece(&piece);
    for (x, y) in piece.cells() {
        assert_eq!(b.get(x, y), Some(Some(PieceKind::L)));
    }

    // Locking with minos poking above the vanish zone silently drops them.
    let high = ActivePiece {
        kind: PieceKind::I,
        rotation: Rotation::East,
        x: 0,
        y: -(VANISH_ROWS as i8) - 2,
    };
    let b = b.lock_piece(&high);
    let written = b
        .cells()
        .iter()
        .filter(|c| **c == Some(PieceKind::I))
        .count();
    assert_eq!(written, 2);
}

#[test]
fn test_shift_up_inserts_garbage_at_bottom() {
    let mut b = board();
    b.set(5, 0, Some(PieceKind::T));
    b.set(5, -(VANISH_ROWS as i8), Some(PieceKind::Z)); // will be discarded

    let mut garbage: Vec<Cell> = vec![Some(PieceKind::J); WIDTH as usize];
    garbage[2] = None;
    let b = b.shift_up_and_insert_row(&garbage);

    // Everything moved up one row, including into the vanish zone.
    assert_eq!(b.get(5, -1), Some(Some(PieceKind::T)));
    assert_eq!(b.get(5, 0), Some(None));
    // The old top vanish row is gone.
    assert!(b
        .cells()
        .iter()
        .all(|c| *c != Some(PieceKind::Z)));
    // New bottom row matches the garbage pattern.
    assert_eq!(b.get(2, HEIGHT as i8 - 1), Some(None));
    assert_eq!(b.get(0, HEIGHT as i8 - 1), Some(Some(PieceKind::J)));
}

#[test]
fn test_try_move_and_walls() {
    let b = board();
    let piece = ActivePiece::spawn(PieceKind::T, 3, 5);

    assert!(b.try_move(&piece, -1, 0).is_some());
    assert!(b.try_move(&piece, 0, 1).is_some());
    assert!(b.try_move(&piece, 0, -20).is_none());

    let left = b.move_to_wall(&piece, -1);
    assert_eq!(left.x, 0);
    let right = b.move_to_wall(&piece, 1);
    assert_eq!(right.x, WIDTH as i8 - 3); // T occupies a 3-wide box

    // Blocked in place: same value comes back.
    assert_eq!(b.move_to_wall(&left, -1), left);
}

#[test]
fn test_drop_to_bottom_rests_on_stack() {
    let mut b = board();
    fill_row(&mut b, HEIGHT as i8 - 1, PieceKind::I);

    let piece = ActivePiece::spawn(PieceKind::O, 4, -2);
    let dropped = b.drop_to_bottom(&piece);
    assert!(b.is_at_bottom(&dropped));
    assert_eq!(dropped, b.ghost_position(&piece));
    // O minos sit at y+1 at the lowest; they rest on the filled row.
    assert_eq!(dropped.y + 1, HEIGHT as i8 - 2);
}

//! Piece catalog and collision checker tests

use mini_tetris::core::pieces::{piece, I_PIECE, L_PIECE, O_PIECE, S_PIECE, Z_PIECE};
use mini_tetris::core::{can_place, pick_random, Board, SimpleRng, ALL_PIECES};
use mini_tetris::types::{PieceColor, PieceKind, Position};

// ============== Catalog ==============

#[test]
fn test_catalog_has_seven_distinct_pieces() {
    assert_eq!(ALL_PIECES.len(), 7);
    for (i, a) in ALL_PIECES.iter().enumerate() {
        for b in &ALL_PIECES[i + 1..] {
            assert_ne!(a.kind, b.kind);
            assert_ne!(a.color, b.color);
        }
    }
}

#[test]
fn test_every_shape_has_four_unique_blocks() {
    for p in ALL_PIECES {
        let mut blocks = p.shape.to_vec();
        blocks.sort();
        blocks.dedup();
        assert_eq!(blocks.len(), 4, "{:?}", p.kind);
        assert!(blocks.iter().all(|&(dx, dy)| dx >= 0 && dy >= 0));
    }
}

#[test]
fn test_shapes() {
    assert_eq!(I_PIECE.shape, [(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(O_PIECE.shape, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(S_PIECE.shape, [(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(Z_PIECE.shape, [(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(L_PIECE.shape, [(2, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(piece(PieceKind::T).color, PieceColor::Purple);
}

#[test]
fn test_pick_random_is_deterministic_per_seed() {
    let mut a = SimpleRng::new(77);
    let mut b = SimpleRng::new(77);
    for _ in 0..50 {
        assert_eq!(pick_random(&mut a), pick_random(&mut b));
    }
}

#[test]
fn test_pick_random_is_roughly_uniform() {
    let mut rng = SimpleRng::new(31337);
    let mut counts = [0u32; 7];
    for _ in 0..7000 {
        let kind = pick_random(&mut rng).kind;
        counts[PieceKind::ALL.iter().position(|&k| k == kind).unwrap()] += 1;
    }
    for c in counts {
        assert!((800..=1200).contains(&c), "counts = {:?}", counts);
    }
}

// ============== Collision ==============

#[test]
fn test_can_place_matches_bounds_and_occupancy_everywhere() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceColor::Red));
    board.set(0, 19, Some(PieceColor::Red));

    for p in ALL_PIECES {
        for y in -2..22 {
            for x in -4..12 {
                let at = Position::new(x, y);
                let expected = p.blocks_at(at).all(|b| {
                    (0..10).contains(&b.x) && (0..20).contains(&b.y) && !board.is_occupied(b.x, b.y)
                });
                assert_eq!(can_place(&board, &p, at), expected, "{:?} at {:?}", p.kind, at);
            }
        }
    }
}

#[test]
fn test_can_place_rejects_single_overlap() {
    let mut board = Board::new();
    board.set(3, 0, Some(PieceColor::Blue));
    assert!(!can_place(&board, &I_PIECE, Position::new(0, 0)));
    assert!(can_place(&board, &I_PIECE, Position::new(4, 0)));
}

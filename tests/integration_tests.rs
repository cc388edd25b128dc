//! Integration tests for the game state machine driven through its public API

use mini_tetris::core::{GameEvent, GameState, TickOutcome, Timing};
use mini_tetris::types::{GameAction, GameStatus};

fn fast_timing() -> Timing {
    Timing {
        gravity_ms: 10,
        clear_delay_ms: 5,
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Idle);

    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.status(), GameStatus::Playing);
    assert!(state.active().is_some());

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.status(), GameStatus::Idle);
    assert!(state.active().is_none());
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_tick_moves_down_and_keeps_board() {
    let mut state = GameState::new(7);
    state.start();
    let before = state.active().unwrap();

    assert_eq!(state.tick(), TickOutcome::Fell);

    let after = state.active().unwrap();
    assert_eq!(after.position.x, before.position.x);
    assert_eq!(after.position.y, before.position.y + 1);
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_move_left_stops_at_wall() {
    let mut state = GameState::new(3);
    state.start();

    for _ in 0..12 {
        state.apply_action(GameAction::MoveLeft);
    }
    let at_wall = state.active().unwrap();
    assert_eq!(at_wall.position.x, 0);

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.active().unwrap(), at_wall);
}

#[test]
fn test_move_right_stops_at_wall() {
    let mut state = GameState::new(4);
    state.start();

    while state.apply_action(GameAction::MoveRight) {}
    let active = state.active().unwrap();
    assert_eq!(active.position.x + active.piece.width(), 10);
}

#[test]
fn test_move_down_until_floor_then_tick_locks() {
    let mut state = GameState::new(11);
    state.start();
    let first = state.active().unwrap();

    while state.apply_action(GameAction::MoveDown) {}
    let landed = state.active().unwrap();
    assert_eq!(landed.position.y + landed.piece.height(), 20);

    assert_eq!(state.tick(), TickOutcome::Locked);
    assert_eq!(state.board().occupied_count(), 4);
    for b in landed.blocks() {
        assert_eq!(state.board().get(b.x, b.y), Some(Some(first.piece.color)));
    }
    assert_eq!(state.active().unwrap().position.y, 0);
}

#[test]
fn test_stacking_without_moves_eventually_ends_game() {
    let mut state = GameState::with_timing(99, fast_timing());
    state.start();

    let mut steps = 0;
    while state.status() == GameStatus::Playing {
        state.advance(10);
        steps += 1;
        assert!(steps < 100_000, "game never ended");
    }

    assert_eq!(state.status(), GameStatus::GameOver);
    assert!(state.active().is_none());
    assert!(!state.advance(10));
    assert!(!state.apply_action(GameAction::MoveDown));
    assert!(!state.apply_action(GameAction::Start));

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.status(), GameStatus::Idle);
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_full_game_keeps_board_invariants() {
    // Spread pieces across the width so rows actually complete sometimes.
    let mut state = GameState::with_timing(2024, fast_timing());
    state.start();

    for step in 0..20_000u32 {
        if state.status() != GameStatus::Playing {
            break;
        }
        if state.active().map(|a| a.position.y == 0).unwrap_or(false) {
            let action = match step % 3 {
                0 => GameAction::MoveLeft,
                1 => GameAction::MoveRight,
                _ => GameAction::MoveDown,
            };
            for _ in 0..(step % 6) {
                state.apply_action(action);
            }
        }
        state.advance(5);

        // No full rows linger once the clear has been applied.
        if state.pending_clear().is_none() {
            assert!(state.board().full_rows().is_empty());
        }
        for event in state.take_events() {
            match event {
                // A piece spans at most two rows, so it can complete at most two.
                GameEvent::Locked { full_rows, .. } => assert!(full_rows <= 2),
                GameEvent::LinesCleared { count } => assert!((1..=2).contains(&count)),
                _ => {}
            }
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut state = GameState::with_timing(seed, fast_timing());
        state.start();
        let mut trace = Vec::new();
        for _ in 0..500 {
            state.advance(10);
            trace.push(state.active().map(|a| (a.kind(), a.position)));
        }
        trace
    };
    assert_eq!(run(5), run(5));
}

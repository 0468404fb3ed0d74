//! Integration tests for the tetris engine through the facade crate.

use canvas_arcade::tetris::{GameState, GameStatus, TetrisConfig, TetrisEvent, Tetromino};
use canvas_arcade::types::{tick_interval_ms, GameAction, PieceKind, Rgba};

const FILL: Rgba = Rgba::rgb(200, 200, 200);

fn started() -> GameState {
    let mut game = GameState::new(TetrisConfig::default());
    game.start();
    game.drain_events();
    game
}

/// Fill `row` except the two rightmost columns.
fn fill_row_leaving_gap(game: &mut GameState, row: i32) {
    let width = game.board().width() as i32;
    for x in 0..width - 2 {
        assert!(game.board_mut().set(x, row, Some(FILL)));
    }
}

fn drop_o_into_gap(game: &mut GameState) -> Option<u32> {
    let width = game.board().width() as i32;
    assert!(game.set_current(Tetromino::new(PieceKind::O), width - 2, 0));
    game.hard_drop()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(TetrisConfig::default());
    assert_eq!(game.status(), GameStatus::Idle);
    assert!(game.current().is_none());
    assert!(!game.tick());

    game.start();
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.current().is_some());
    assert!(game.next_piece().is_some());
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert!(game.timer().is_running());

    let events = game.drain_events();
    assert!(matches!(
        events.first(),
        Some(TetrisEvent::GameStart { level: 1, interval_ms: 1000 })
    ));

    game.reset();
    assert_eq!(game.status(), GameStatus::Idle);
    assert!(!game.timer().is_running());
    assert!(game.current().is_none());
}

#[test]
fn test_spawn_is_centered_at_top() {
    let game = started();
    let piece = game.current().unwrap();
    let (x, y) = game.current_position();
    assert_eq!(y, 0);
    assert_eq!(x, (10 - piece.shape.size() as i32).div_euclid(2));
}

#[test]
fn test_bottom_row_clear_end_to_end() {
    let mut game = started();
    fill_row_leaving_gap(&mut game, 19);

    // O lands on rows 18-19 after 18 rows of travel.
    assert_eq!(drop_o_into_gap(&mut game), Some(18));

    let hard = 18 * 2;
    assert_eq!(game.score(), hard + 100);
    assert_eq!(game.lines(), 1);

    // The upper half of the O shifted down into the bottom row.
    let board = game.board();
    assert_eq!(board.get(8, 19), Some(Some(PieceKind::O.color())));
    assert_eq!(board.get(9, 19), Some(Some(PieceKind::O.color())));
    assert_eq!(board.get(0, 19), Some(None));
    assert_eq!(board.filled_count(), 2);

    let events = game.drain_events();
    let lock_at = events
        .iter()
        .position(|e| matches!(e, TetrisEvent::PieceLock { piece: PieceKind::O, x: 8, y: 18 }))
        .expect("piece lock event");
    let clear_at = events
        .iter()
        .position(|e| {
            *e == TetrisEvent::LineClear {
                lines: 1,
                total_lines: 1,
                score: hard + 100,
            }
        })
        .expect("line clear event");
    assert!(lock_at < clear_at);
    assert!(events.contains(&TetrisEvent::ScoreUpdate {
        score: hard,
        previous: 0,
        delta: hard,
    }));
    assert!(events.contains(&TetrisEvent::ScoreUpdate {
        score: hard + 100,
        previous: hard,
        delta: 100,
    }));
}

#[test]
fn test_level_up_after_ten_lines() {
    let mut game = started();
    for round in 0..5 {
        fill_row_leaving_gap(&mut game, 18);
        fill_row_leaving_gap(&mut game, 19);
        drop_o_into_gap(&mut game);
        assert_eq!(game.board().filled_count(), 0, "round {}", round);
    }

    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.lines_until_next_level(), 20);
    assert_eq!(game.interval_ms(), tick_interval_ms(1000, 2));
    assert_eq!(game.timer().interval_ms(), Some(920));

    let events = game.drain_events();
    let level_ups: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, TetrisEvent::LevelUp { .. }))
        .collect();
    assert_eq!(
        level_ups,
        vec![&TetrisEvent::LevelUp {
            level: 2,
            interval_ms: 920,
            lines: 10
        }]
    );
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut game = started();
    for y in 0..3 {
        for x in 2..8 {
            game.board_mut().set(x, y, Some(FILL));
        }
    }
    assert!(game.set_current(Tetromino::new(PieceKind::O), 0, 0));
    game.hard_drop();

    assert!(game.game_over());
    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(!game.timer().is_running());
    assert!(!game.tick());
    assert!(!game.move_left());
    assert_eq!(game.hard_drop(), None);

    let events = game.drain_events();
    assert!(matches!(events.last(), Some(TetrisEvent::GameOver { level: 1, .. })));
}

#[test]
fn test_gravity_follows_elapsed_time() {
    let mut game = started();
    let (_, y0) = game.current_position();
    assert!(!game.update(999));
    assert_eq!(game.current_position().1, y0);
    assert!(game.update(1));
    assert_eq!(game.current_position().1, y0 + 1);

    // A long stall still produces a single tick.
    assert!(game.update(10_000));
    assert_eq!(game.current_position().1, y0 + 2);
}

#[test]
fn test_pause_blocks_input_and_time() {
    let mut game = started();
    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.status(), GameStatus::Paused);
    let pos = game.current_position();
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.update(5_000));
    assert_eq!(game.current_position(), pos);

    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.apply_action(GameAction::MoveLeft));
}

#[test]
fn test_rotation_kicks_off_the_wall() {
    let mut game = started();
    // Vertical I against the right wall: rotating back to horizontal needs a kick.
    let vertical = Tetromino::new(PieceKind::I).rotated();
    let cols: Vec<i32> = vertical.cells().iter().map(|&(dx, _)| dx).collect();
    let col = cols[0];
    assert!(cols.iter().all(|&c| c == col));
    assert!(game.set_current(vertical, 9 - col, 5));

    assert!(game.rotate());
    let (x, _) = game.current_position();
    let piece = game.current().unwrap();
    assert!(piece.cells().iter().all(|&(dx, _)| (0..10).contains(&(x + dx))));
}

#[test]
fn test_soft_drop_scores_only_on_movement() {
    let mut game = started();
    assert!(game.set_current(Tetromino::new(PieceKind::O), 0, 17));
    assert!(game.soft_drop());
    assert_eq!(game.score(), 1);
    game.take_redraw();

    assert!(!game.soft_drop());
    assert_eq!(game.score(), 1);
    assert!(game.take_redraw());
}

#[test]
fn test_restart_action_starts_fresh() {
    let mut game = started();
    fill_row_leaving_gap(&mut game, 19);
    drop_o_into_gap(&mut game);
    assert!(game.score() > 0);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_same_seed_same_pieces() {
    let config = TetrisConfig {
        seed: 42,
        ..TetrisConfig::default()
    };
    let mut a = GameState::new(config);
    let mut b = GameState::new(config);
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.current().map(|p| p.kind), b.current().map(|p| p.kind));
        a.hard_drop();
        b.hard_drop();
    }
}

#[test]
fn test_snapshot_json_shape() {
    let game = started();
    let snap = game.snapshot();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["width"], 10);
    assert_eq!(json["height"], 20);
    assert_eq!(json["status"], "playing");
    assert!(json["linesUntilNextLevel"].is_number());
    assert_eq!(json["board"].as_array().unwrap().len(), 20);
}

//! Engine integration tests: full turn-controller scenarios through the
//! public API.

use gridfall::core::GameEngine;
use gridfall::types::{GameConfig, PieceKind};

/// An engine whose first spawned piece is `kind`, found by scanning seeds.
fn engine_with_first(kind: PieceKind, config: GameConfig) -> GameEngine {
    for seed in 1..10_000 {
        let engine = GameEngine::new(config, seed);
        if engine.active().kind == kind {
            return engine;
        }
    }
    panic!("no seed produced {kind:?} as the first piece");
}

#[test]
fn o_piece_hard_drop_locks_on_the_floor() {
    let mut engine = engine_with_first(PieceKind::O, GameConfig::default());
    let x = engine.active().x;
    assert_eq!(x, 4);

    engine.hard_drop();

    // The O block occupies the bottom two rows at the spawn columns.
    for y in 18..20 {
        assert_eq!(engine.board().get(x, y), Some(2));
        assert_eq!(engine.board().get(x + 1, y), Some(2));
    }
    assert_eq!(engine.board().get(x, 17), Some(0));

    // Two cells per row on a 10-wide board never fill a row.
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.take_flash(), None);
}

#[test]
fn vertical_i_completes_four_rows_at_once() {
    let mut engine = engine_with_first(PieceKind::I, GameConfig::default());
    // The I column occupies x + 1; leave that column open in the garbage.
    let gap = (engine.active().x + 1) as usize;
    assert_eq!(gap, 4);

    let mut row = [8u8; 10];
    row[gap] = 0;
    engine.load_garbage_rows(&[&row, &row, &row, &row]);

    engine.hard_drop();

    // A Tetris: all four rows cleared in one lock.
    assert_eq!(engine.lines(), 4);
    assert_eq!(engine.score(), 1200);
    assert_eq!(engine.level(), 1);

    let flash = engine.take_flash().expect("clears flash once");
    assert_eq!(flash.rows, 4);
    assert!(!flash.t_spin);

    // Nothing but the garbage and the piece was on the board, so the sweep
    // leaves it empty.
    assert!(engine.board().cells().iter().all(|&c| c == 0));
}

#[test]
fn single_row_clear_scores_forty_at_level_one() {
    let mut engine = engine_with_first(PieceKind::I, GameConfig::default());
    let gap = (engine.active().x + 1) as usize;

    let mut row = [8u8; 10];
    row[gap] = 0;
    engine.load_garbage_rows(&[&row]);

    engine.hard_drop();

    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.score(), 40);
}

#[test]
fn t_spin_single_scores_eighty_at_level_one() {
    let mut engine = engine_with_first(PieceKind::T, GameConfig::default());

    // Point the T's stem right and slide to the wall: the piece sits flush
    // at x = -1 with its filled cells in board columns 0 and 1.
    assert!(engine.rotate_ccw());
    while engine.move_left() {}
    assert_eq!(engine.active().x, -1);

    // Bottom row open only where the piece's column lands.
    engine.load_garbage_rows(&[&[0, 8, 8, 8, 8, 8, 8, 8, 8, 8]]);

    engine.hard_drop();

    // Corners of the 3x3 footprint: two in the wall, one in garbage. The
    // lock is a T-spin, doubling the single-row clear at level 1.
    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.score(), 80);

    let flash = engine.take_flash().expect("clears flash once");
    assert_eq!(flash.rows, 1);
    assert!(flash.t_spin);
}

#[test]
fn hold_twice_in_a_row_changes_nothing() {
    let mut engine = GameEngine::new(GameConfig::default(), 1);
    let first = engine.active().kind;

    assert!(engine.hold());
    let held = engine.hold_piece();
    let active = (engine.active().kind, engine.active().x, engine.active().y);
    assert_eq!(held, Some(first));

    assert!(!engine.hold());
    assert_eq!(engine.hold_piece(), held);
    assert_eq!(
        (engine.active().kind, engine.active().x, engine.active().y),
        active
    );
}

#[test]
fn stack_out_soft_resets_score_and_grid() {
    let mut engine = GameEngine::new(GameConfig::default(), 3);

    // Flood the whole board except one column so no row can sweep away.
    let row = [0u8, 8, 8, 8, 8, 8, 8, 8, 8, 8];
    let rows: Vec<&[u8]> = (0..20).map(|_| &row[..]).collect();
    engine.load_garbage_rows(&rows);

    // The active piece locks on top of the stack and the next spawn is
    // blocked.
    engine.hard_drop();

    assert!(engine.board().cells().iter().all(|&c| c == 0));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.drop_interval_ms(), 1000);
}

#[test]
fn bag_cycle_covers_all_seven_kinds() {
    let config = GameConfig::default().with_preview_depth(7);
    let engine = GameEngine::new(config, 123);

    // First draw plus the first six of the preview form one full bag cycle.
    let mut cycle = vec![engine.active().kind];
    cycle.extend_from_slice(&engine.next_queue()[..6]);

    for kind in PieceKind::ALL {
        assert_eq!(
            cycle.iter().filter(|&&k| k == kind).count(),
            1,
            "{kind:?} should appear exactly once in a bag cycle"
        );
    }
}

#[test]
fn seeded_games_are_reproducible() {
    let mut a = GameEngine::new(GameConfig::default(), 777);
    let mut b = GameEngine::new(GameConfig::default(), 777);

    for _ in 0..10 {
        assert_eq!(a.active().kind, b.active().kind);
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.board().cells(), b.board().cells());
}

#[test]
fn moves_and_rotations_are_all_or_nothing() {
    let mut engine = GameEngine::new(GameConfig::default(), 42);

    // Walk into the left wall; the failed move leaves x unchanged.
    while engine.move_left() {}
    let x = engine.active().x;
    let shape = engine.active().shape;
    assert!(!engine.move_left());
    assert_eq!(engine.active().x, x);
    assert_eq!(engine.active().shape, shape);
}

#[test]
fn gravity_locks_a_piece_left_alone() {
    let mut engine = GameEngine::new(GameConfig::default(), 5);
    let first_kind = engine.active().kind;

    // Enough ticks for the piece to fall the whole board and lock.
    for _ in 0..2_000 {
        engine.tick(16);
    }

    let value = first_kind.cell_value();
    assert!(engine.board().cells().iter().any(|&c| c == value));
}

#[test]
fn wider_boards_spawn_centered() {
    let config = GameConfig::new(12, 20);
    let engine = GameEngine::new(config, 1);
    let active = engine.active();
    assert_eq!(active.x, 6 - (active.shape.width() / 2) as i8);
    assert_eq!(engine.board().width(), 12);
}

#[test]
fn restart_gives_a_clean_slate() {
    let mut engine = GameEngine::new(GameConfig::default(), 11);
    engine.hold();
    engine.hard_drop();
    engine.hard_drop();

    engine.restart();

    assert!(engine.board().cells().iter().all(|&c| c == 0));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.hold_piece(), None);
    assert_eq!(engine.active().y, 0);
}

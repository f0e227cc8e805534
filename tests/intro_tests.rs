//! Intro sequence integration tests.
//!
//! The intro previews every tile in board order, one step per
//! `intro_step_ms`, and only then opens the board for clicks.

use std::rc::Rc;
use std::time::Duration;

use memory_match::core::SessionConfig;
use memory_match::runtime::{
    Blob, ManualScheduler, RecordingView, StaticAssets, TileView, ViewEvent,
};
use memory_match::session::{Collaborators, GameSession, Phase};
use memory_match::tile::HiddenFace;

const HIDDEN_LABEL: &str = "icon pergunta";

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

struct Board {
    session: GameSession,
    scheduler: Rc<ManualScheduler>,
    assets: Rc<StaticAssets>,
    views: Vec<Rc<RecordingView>>,
}

fn board_with(config: SessionConfig, assets: StaticAssets, tiles: usize) -> Board {
    let scheduler = Rc::new(ManualScheduler::new());
    let assets = Rc::new(assets);
    let views: Vec<Rc<RecordingView>> = (0..tiles)
        .map(|_| Rc::new(RecordingView::new()))
        .collect();

    let session = GameSession::new(
        config,
        views.iter().map(|v| Rc::clone(v) as Rc<dyn TileView>).collect(),
        Collaborators {
            fetcher: assets.clone(),
            scheduler: scheduler.clone(),
            hidden: HiddenFace::new(),
        },
    )
    .unwrap();

    Board {
        session,
        scheduler,
        assets,
        views,
    }
}

fn config() -> SessionConfig {
    SessionConfig::default().with_vocabulary(["a", "b"]).with_seed(3)
}

fn board(tiles: usize) -> Board {
    let config = config();
    let assets = StaticAssets::with_placeholders(&config);
    board_with(config, assets, tiles)
}

fn face_label(board: &Board, index: usize) -> String {
    format!("icon {}", board.session.tile(index).unwrap().identity())
}

fn shows(view: &RecordingView) -> usize {
    view.count(|e| matches!(e, ViewEvent::Show { .. }))
}

#[test]
fn test_previews_tiles_in_board_order() {
    let b = board(4);
    b.session.start();

    // Step 0 runs synchronously with the deal.
    assert_eq!(b.views[0].current_label(), Some(face_label(&b, 0)));
    assert!((1..4).all(|i| b.views[i].current_label().is_none()));

    for i in 1..4 {
        b.scheduler.advance(ms(50));
        assert_eq!(b.views[i - 1].current_label().as_deref(), Some(HIDDEN_LABEL));
        assert_eq!(b.views[i].current_label(), Some(face_label(&b, i)));
        assert!((i + 1..4).all(|j| b.views[j].current_label().is_none()));
        assert_eq!(b.session.phase(), Phase::Priming);
    }

    b.scheduler.advance(ms(49));
    assert!(!b.session.input_enabled());

    b.scheduler.advance(ms(1));
    assert!(b.session.input_enabled());
    assert_eq!(b.session.phase(), Phase::Idle);
    assert!(b
        .views
        .iter()
        .all(|v| v.current_label().as_deref() == Some(HIDDEN_LABEL)));
}

#[test]
fn test_tiles_disabled_until_intro_ends() {
    let b = board(4);
    b.session.start();

    for i in 0..4 {
        assert!(!b.session.tile(i).unwrap().is_interactable());
        assert!(!b.views[i].is_interactive());
    }

    b.scheduler.run_until_idle();
    for i in 0..4 {
        assert!(b.session.tile(i).unwrap().is_interactable());
        assert!(b.views[i].is_interactive());
    }
    assert_eq!(b.scheduler.now(), ms(200));
}

#[test]
fn test_step_delay_is_configurable() {
    let config = config().with_intro_step(10);
    let assets = StaticAssets::with_placeholders(&config);
    let b = board_with(config, assets, 4);

    b.session.start();
    b.scheduler.run_until_idle();
    assert!(b.session.input_enabled());
    assert_eq!(b.scheduler.now(), ms(40));
}

#[test]
fn test_each_step_waits_for_its_face() {
    let b = board(4);
    b.assets.set_deferred(true);
    b.session.start();

    // Placeholder first, then the deal asks for tile 0's face.
    assert_eq!(b.session.tile_count(), 0);
    assert_eq!(b.assets.flush(), 1);
    assert_eq!(b.session.tile_count(), 4);
    assert_eq!(b.assets.queued(), 1);

    b.scheduler.advance(ms(1000));
    assert_eq!(shows(&b.views[0]), 0);
    assert_eq!(b.session.phase(), Phase::Priming);

    for i in 0..4 {
        assert_eq!(b.assets.flush(), 1);
        assert_eq!(b.views[i].current_label(), Some(face_label(&b, i)));
        b.scheduler.advance(ms(50));
    }
    assert!(b.session.input_enabled());
}

#[test]
fn test_restart_abandons_running_intro() {
    let b = board(4);
    b.session.start();
    b.scheduler.advance(ms(75));

    b.session.on_restart_requested();
    assert_eq!(b.session.phase(), Phase::Priming);

    b.scheduler.run_until_idle();
    assert_eq!(b.scheduler.now(), ms(275));
    assert!(b.session.input_enabled());

    // Only the second chain ever enabled input.
    for view in &b.views {
        assert_eq!(view.count(|e| *e == ViewEvent::Interactive(true)), 1);
    }
}

#[test]
fn test_face_arriving_after_restart_is_dropped() {
    let b = board(4);
    b.assets.set_deferred(true);
    b.session.start();
    b.assets.flush();

    b.session.on_restart_requested();
    assert_eq!(b.assets.queued(), 2);

    b.assets.flush();
    assert_eq!(shows(&b.views[0]), 1);
    assert_eq!(b.scheduler.pending(), 1);
}

#[test]
fn test_repeated_start_deals_once() {
    let b = board(4);
    b.assets.set_deferred(true);
    b.session.start();
    b.session.start();
    assert_eq!(b.assets.queued(), 1);

    assert_eq!(b.assets.flush(), 1);
    assert_eq!(b.session.generation(), 1);

    // A start after the deal is also ignored.
    b.session.start();
    assert_eq!(b.session.generation(), 1);
}

#[test]
fn test_restart_before_placeholder_waits_for_it() {
    let b = board(4);
    b.assets.set_deferred(true);
    b.session.start();
    b.session.on_restart_requested();
    assert_eq!(b.session.tile_count(), 0);

    // Both requests share the one deal that follows the placeholder.
    assert_eq!(b.assets.flush(), 1);
    assert_eq!(b.session.generation(), 1);
    b.assets.set_deferred(false);
    b.assets.flush();
    b.scheduler.run_until_idle();

    assert!(b.session.input_enabled());
    for view in &b.views {
        assert_eq!(view.current_label().as_deref(), Some(HIDDEN_LABEL));
    }
}

#[test]
fn test_restart_without_start_deals_after_placeholder() {
    let b = board(4);
    b.assets.set_deferred(true);
    b.session.on_restart_requested();
    assert_eq!(b.session.generation(), 0);

    b.assets.flush();
    assert_eq!(b.session.generation(), 1);
}

#[test]
fn test_missing_placeholder_never_deals() {
    let b = board_with(config(), StaticAssets::new(), 4);
    b.session.start();
    b.scheduler.run_until_idle();

    assert_eq!(b.session.tile_count(), 0);
    assert_eq!(b.session.generation(), 0);
    assert_eq!(b.session.phase(), Phase::Priming);
}

#[test]
fn test_missing_face_stalls_intro() {
    let config = config();
    let assets = StaticAssets::new()
        .with_asset(config.hidden_path(), Blob::from("?"))
        .with_asset(config.icon_path("a"), Blob::from("a"));
    let b = board_with(config, assets, 4);

    b.session.start();
    b.scheduler.run_until_idle();

    let stall = (0..4)
        .find(|&i| b.session.tile(i).unwrap().identity() == "b")
        .unwrap();
    assert!(!b.session.input_enabled());
    assert!(!b.session.tile(stall).unwrap().has_face());
    assert!((stall..4).all(|i| shows(&b.views[i]) == 0));
    if stall > 0 {
        assert_eq!(b.views[stall - 1].current_label().as_deref(), Some(HIDDEN_LABEL));
    }
}

#[test]
fn test_placeholder_fetched_once_across_restarts() {
    let b = board(4);
    b.session.start();
    for _ in 0..3 {
        b.session.on_restart_requested();
    }
    b.scheduler.run_until_idle();

    let hidden = b.session.config().hidden_path();
    assert_eq!(b.assets.request_count(&hidden), 1);
    assert_eq!(b.session.generation(), 4);
}

//! Death and rewind through the game layer

use dashline_ecs::{Event, Timestep};
use dashline_foundation::KeyCode;
use dashline_engine::{Layer, Transform};
use dashline_game::{CheckpointReason, GameConfig, GameLayer, GameLogicSystem, PlayerState};

const DT: Timestep = Timestep::from_seconds(1.0 / 60.0);

fn layer() -> GameLayer {
    GameLayer::new(GameConfig::testing()).unwrap()
}

fn run_until_death(layer: &mut GameLayer, limit: usize) {
    let deaths = layer.stats().deaths;
    for _ in 0..limit {
        layer.on_update(DT).unwrap();
        if layer.stats().deaths > deaths {
            return;
        }
    }
    panic!("player survived {limit} frames");
}

#[test]
fn death_without_checkpoint_restarts_the_level() {
    let mut layer = layer();
    // Walk left off the first floor tile.
    layer.on_event(&Event::key_pressed(KeyCode::Left)).unwrap();
    run_until_death(&mut layer, 600);

    assert!(layer.history().is_empty());
    assert_eq!(layer.world().frame(), 0);
    let position = layer
        .world()
        .component::<Transform>(layer.player())
        .unwrap()
        .position;
    assert_eq!(position.x, 0.0);
    assert!(layer.player_alive());
}

#[test]
fn repeated_deaths_return_to_the_same_checkpoint() {
    let mut layer = layer();
    layer.on_event(&Event::key_pressed(KeyCode::Right)).unwrap();

    run_until_death(&mut layer, 600);
    let first = layer.world().frame();
    run_until_death(&mut layer, 600);

    assert_eq!(layer.stats().deaths, 2);
    assert_eq!(layer.world().frame(), first);
    // The flag was visited before the checkpoint was taken, so it never fires again.
    assert_eq!(layer.history().len(), 1);
    assert_eq!(layer.stats().checkpoints_saved, 1);
    assert!(matches!(
        layer.history().latest().unwrap().reason(),
        CheckpointReason::Reached(_)
    ));
}

#[test]
fn manual_checkpoint_beats_the_flag() {
    let mut layer = layer();
    layer.on_event(&Event::key_pressed(KeyCode::Right)).unwrap();
    for _ in 0..150 {
        layer.on_update(DT).unwrap();
    }
    layer.on_event(&Event::key_pressed(KeyCode::X)).unwrap();
    let saved = layer.world().frame();

    run_until_death(&mut layer, 600);
    assert_eq!(layer.world().frame(), saved);
    assert_eq!(layer.history().len(), 2);
}

#[test]
fn rewind_keeps_checkpoint_untouched() {
    let mut layer = layer();
    for _ in 0..30 {
        layer.on_update(DT).unwrap();
    }
    layer.on_event(&Event::key_pressed(KeyCode::X)).unwrap();
    let saved = layer.history().latest().unwrap().world().frame();

    for _ in 0..30 {
        layer.on_update(DT).unwrap();
    }
    layer.on_event(&Event::key_pressed(KeyCode::Z)).unwrap();
    layer.on_update(DT).unwrap();
    layer.on_event(&Event::key_pressed(KeyCode::Z)).unwrap();

    assert_eq!(layer.world().frame(), saved);
    assert_eq!(
        layer.history().latest().unwrap().world().frame(),
        saved
    );
    assert_eq!(layer.stats().rewinds, 2);
}

#[test]
fn dead_player_state_never_checkpointed() {
    let mut layer = layer();
    layer.on_event(&Event::key_pressed(KeyCode::Right)).unwrap();
    run_until_death(&mut layer, 600);

    for checkpoint in layer.history().iter() {
        let state = checkpoint
            .world()
            .component::<PlayerState>(layer.player())
            .unwrap();
        assert!(state.alive);
    }
    assert!(
        layer
            .world()
            .system::<GameLogicSystem>()
            .unwrap()
            .player()
            .is_some()
    );
}

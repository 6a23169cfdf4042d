//! Same inputs, same game

use dashline::engine::{DrawCommand, Layer};
use dashline::foundation::{Event, KeyCode, Timestep};
use dashline::game::{GameConfig, GameLayer};

const DT: Timestep = Timestep::from_seconds(1.0 / 60.0);

/// Presses and releases keys on fixed frames and records every draw list.
fn play(seed: u64) -> Vec<Vec<DrawCommand>> {
    let mut layer = GameLayer::new(GameConfig::testing().with_seed(seed)).unwrap();
    let script = [
        (0, Event::key_pressed(KeyCode::Right)),
        (60, Event::key_pressed(KeyCode::Space)),
        (62, Event::key_released(KeyCode::Space)),
        (90, Event::key_pressed(KeyCode::X)),
    ];

    let mut frames = Vec::new();
    for frame in 0..300 {
        for (at, event) in &script {
            if *at == frame {
                layer.on_event(event).unwrap();
            }
        }
        layer.on_update(DT).unwrap();
        frames.push(layer.draw_list().commands().to_vec());
    }
    frames
}

#[test]
fn replays_are_identical() {
    assert_eq!(play(3), play(3));
}

#[test]
fn seed_only_changes_particles() {
    let a = play(1);
    let b = play(2);
    let without_particles = |frames: &[Vec<DrawCommand>]| -> Vec<Vec<DrawCommand>> {
        frames
            .iter()
            .map(|list| {
                list.iter()
                    .filter(|c| !matches!(c, DrawCommand::RotatedQuad { .. }))
                    .copied()
                    .collect()
            })
            .collect()
    };
    assert_eq!(without_particles(&a), without_particles(&b));
    assert_ne!(a, b);
}

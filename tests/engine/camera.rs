//! Orthographic camera tests

use dashline_engine::{InputState, OrthographicCamera};
use dashline_foundation::{Event, KeyCode};
use glam::Vec3;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn bounds_map_to_clip_corners() {
    let camera = OrthographicCamera::new(-4.0, 4.0, -2.0, 2.0);
    assert!(close(camera.to_clip(Vec3::new(4.0, 2.0, 0.0)), Vec3::new(1.0, 1.0, 0.0)));
    assert!(close(camera.to_clip(Vec3::new(-4.0, -2.0, 0.0)), Vec3::new(-1.0, -1.0, 0.0)));
}

#[test]
fn moving_the_camera_moves_the_world_the_other_way() {
    let mut camera = OrthographicCamera::new(-1.0, 1.0, -1.0, 1.0);
    camera.set_position(Vec3::new(0.5, 0.0, 0.0));
    assert!(close(camera.to_clip(Vec3::new(0.5, 0.0, 0.0)), Vec3::ZERO));

    camera.set_position(Vec3::ZERO);
    camera.set_rotation(90.0);
    assert!(close(camera.to_clip(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn input_follows_key_events() {
    let mut input = InputState::new();
    assert!(input.on_event(&Event::key_pressed(KeyCode::Left)));
    assert!(input.on_event(&Event::key_pressed(KeyCode::Space)));
    assert!(input.on_event(&Event::key_released(KeyCode::Left)));

    assert!(input.is_pressed(KeyCode::Space));
    assert!(!input.is_pressed(KeyCode::Left));
    assert_eq!(input.pressed().collect::<Vec<_>>(), vec![KeyCode::Space]);
}

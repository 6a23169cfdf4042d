//! Particle emitter tests

use dashline_ecs::Timestep;
use dashline_engine::{DrawList, ParticleEmitter, ParticleProps};
use glam::Vec3;

fn props() -> ParticleProps {
    ParticleProps {
        position: Vec3::new(1.0, 2.0, 0.5),
        lifetime: 0.5,
        ..ParticleProps::default()
    }
}

#[test]
fn same_seed_same_particles() {
    let mut a = ParticleEmitter::new(32, 7);
    let mut b = ParticleEmitter::new(32, 7);
    a.burst(&props(), 10);
    b.burst(&props(), 10);

    let (mut da, mut db) = (DrawList::new(), DrawList::new());
    a.draw(&mut da);
    b.draw(&mut db);
    assert_eq!(da.commands(), db.commands());
}

#[test]
fn cloned_emitters_diverge_independently() {
    let mut original = ParticleEmitter::new(8, 1);
    original.burst(&props(), 3);
    let mut copy = original.clone();

    copy.burst(&props(), 5);
    assert_eq!(original.active_count(), 3);
    assert_eq!(copy.active_count(), 8);
}

#[test]
fn particles_expire() {
    let mut emitter = ParticleEmitter::new(16, 0);
    emitter.burst(&props(), 4);

    for _ in 0..4 {
        emitter.on_update(Timestep::from_seconds(0.2));
    }
    assert_eq!(emitter.active_count(), 0);
}

#[test]
fn full_pool_recycles_oldest() {
    let mut emitter = ParticleEmitter::new(4, 0);
    emitter.burst(&props(), 10);
    assert_eq!(emitter.active_count(), 4);
    assert_eq!(emitter.capacity(), 4);
}

//! Snapshot and restore tests

use dashline_ecs::{Entity, Signature, Timestep, World};
use proptest::prelude::*;

use crate::common::{Health, Living, Position, world_with_living};

/// Everything observable about the fixture world.
#[derive(Debug, PartialEq)]
struct Fingerprint {
    entities: Vec<(Entity, Signature)>,
    positions: Vec<(Entity, Position)>,
    health: Vec<(Entity, Health)>,
    members: Vec<Entity>,
    updates: u32,
    frame: u64,
}

fn fingerprint(world: &World) -> Fingerprint {
    let mut positions: Vec<_> = world
        .iter::<Position>()
        .unwrap()
        .map(|(e, p)| (e, p.clone()))
        .collect();
    positions.sort_by_key(|(e, _)| *e);
    let mut health: Vec<_> = world
        .iter::<Health>()
        .unwrap()
        .map(|(e, h)| (e, h.clone()))
        .collect();
    health.sort_by_key(|(e, _)| *e);

    Fingerprint {
        entities: world
            .entities()
            .map(|e| (e, world.signature(e).unwrap()))
            .collect(),
        positions,
        health,
        members: world.system_members::<Living>().unwrap().to_vec(),
        updates: world.system::<Living>().unwrap().updates,
        frame: world.frame(),
    }
}

fn populated() -> (World, Vec<Entity>) {
    let mut world = world_with_living();
    let mut entities = Vec::new();
    for i in 0..5u8 {
        let entity = world.create_entity().unwrap();
        world
            .add_component(entity, Position::new(f32::from(i), 0.0))
            .unwrap();
        if i % 2 == 0 {
            world.add_component(entity, Health { hp: 1.0 }).unwrap();
        }
        entities.push(entity);
    }
    (world, entities)
}

#[test]
fn snapshot_keeps_old_health() {
    let mut world = world_with_living();
    let a = world.create_entity().unwrap();
    world.add_component(a, Position::new(0.0, 0.0)).unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();

    let snapshot = world.snapshot();
    world.component_mut::<Health>(a).unwrap().hp = 0.0;

    assert_eq!(snapshot.component::<Health>(a).unwrap().hp, 1.0);
    assert_eq!(world.component::<Health>(a).unwrap().hp, 0.0);
}

#[test]
fn mutating_the_copy_leaves_the_original() {
    let (world, entities) = populated();
    let before = fingerprint(&world);

    let mut copy = world.snapshot();
    copy.destroy_entity(entities[0]).unwrap();
    copy.remove_component::<Position>(entities[2]).unwrap();
    copy.add_component(entities[1], Health { hp: 5.0 }).unwrap();
    copy.on_update(Timestep::from_seconds(0.1)).unwrap();
    copy.create_entity().unwrap();

    assert_eq!(fingerprint(&world), before);
    assert_ne!(fingerprint(&copy), before);
}

#[test]
fn restore_rolls_everything_back() {
    let (mut world, entities) = populated();
    let checkpoint = world.snapshot();
    let before = fingerprint(&world);

    world.on_update(Timestep::from_seconds(0.1)).unwrap();
    world.destroy_entity(entities[4]).unwrap();
    world.remove_component::<Health>(entities[2]).unwrap();
    assert_ne!(fingerprint(&world), before);

    world.restore(&checkpoint);
    assert_eq!(fingerprint(&world), before);
    assert!(world.is_alive(entities[4]));

    // The snapshot can be restored again after the world moves on.
    world.on_update(Timestep::from_seconds(0.1)).unwrap();
    world.restore(&checkpoint);
    assert_eq!(fingerprint(&world), before);
}

#[test]
fn restored_systems_see_restored_membership() {
    let (mut world, entities) = populated();
    let checkpoint = world.snapshot();

    world.destroy_entity(entities[0]).unwrap();
    assert!(
        world
            .system::<Living>()
            .unwrap()
            .log
            .iter()
            .any(|change| change.entity() == entities[0])
    );

    world.restore(&checkpoint);
    let living = world.system::<Living>().unwrap();
    assert_eq!(living.log.len(), 3);
    assert!(world.system_members::<Living>().unwrap().contains(entities[0]));
}

proptest! {
    #[test]
    fn snapshots_are_independent(picks in prop::collection::vec(0usize..5, 1..20), frames in 0u32..4) {
        let (world, entities) = populated();
        let before = fingerprint(&world);
        let mut copy = world.snapshot();

        for pick in picks {
            let entity = entities[pick];
            if copy.is_alive(entity) {
                if copy.has_component::<Health>(entity).unwrap() {
                    copy.component_mut::<Health>(entity).unwrap().hp += 1.0;
                } else {
                    copy.destroy_entity(entity).unwrap();
                }
            }
        }
        for _ in 0..frames {
            copy.on_update(Timestep::from_seconds(0.1)).unwrap();
        }

        prop_assert_eq!(fingerprint(&world), before);
    }
}

//! Entity lifecycle tests

use std::collections::HashSet;

use dashline_ecs::{Entity, EntityRegistry, ErrorKind, World, WorldConfig};
use proptest::prelude::*;

use crate::common::{Health, Position, world};

#[test]
fn limit_is_enforced_and_recovers() {
    let mut world = World::with_config(WorldConfig::default().with_max_entities(3)).unwrap();
    let a = world.create_entity().unwrap();
    world.create_entity().unwrap();
    world.create_entity().unwrap();

    let err = world.create_entity().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EntityLimitReached { limit: 3 }));
    assert!(err.is_invariant_violation());

    world.destroy_entity(a).unwrap();
    assert!(world.create_entity().is_ok());
}

#[test]
fn destroyed_ids_are_reused_last() {
    let mut registry = EntityRegistry::with_capacity(4);
    let a = registry.create().unwrap();
    let b = registry.create().unwrap();
    registry.destroy(a).unwrap();

    let c = registry.create().unwrap();
    let d = registry.create().unwrap();
    let e = registry.create().unwrap();
    assert_eq!([c.index, d.index], [2, 3]);
    assert_eq!(e.index, a.index);
    assert_ne!(e, a);
    assert!(registry.is_alive(b));
}

#[test]
fn stale_handles_never_alias() {
    let mut world = world();
    let old = world.create_entity().unwrap();
    world.add_component(old, Health { hp: 1.0 }).unwrap();
    world.destroy_entity(old).unwrap();

    // Cycle through the compact pool until the index comes back.
    let mut fresh = world.create_entity().unwrap();
    while fresh.index != old.index {
        fresh = world.create_entity().unwrap();
    }
    world.add_component(fresh, Health { hp: 9.0 }).unwrap();

    assert!(!world.is_alive(old));
    let err = world.component::<Health>(old).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(e) if e == old));
    assert_eq!(world.component::<Health>(fresh).unwrap().hp, 9.0);
}

#[test]
fn destroy_removes_every_component() {
    let mut world = world();
    let a = world.create_entity().unwrap();
    let b = world.create_entity().unwrap();
    world.add_component(a, Position::new(1.0, 1.0)).unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();
    world.add_component(b, Position::new(2.0, 2.0)).unwrap();

    world.destroy_entity(a).unwrap();

    assert_eq!(world.component_count::<Position>().unwrap(), 1);
    assert_eq!(world.component_count::<Health>().unwrap(), 0);
    assert_eq!(world.component::<Position>(b).unwrap(), &Position::new(2.0, 2.0));
    assert!(world.destroy_entity(a).is_err());
}

#[derive(Clone, Debug)]
enum Op {
    Create,
    Destroy(usize),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![Just(Op::Create), any::<usize>().prop_map(Op::Destroy)],
        0..200,
    )
}

proptest! {
    #[test]
    fn live_ids_are_unique(ops in ops()) {
        let mut registry = EntityRegistry::with_capacity(16);
        let mut live: Vec<Entity> = Vec::new();

        for op in ops {
            match op {
                Op::Create => match registry.create() {
                    Ok(entity) => live.push(entity),
                    Err(_) => prop_assert_eq!(live.len(), 16),
                },
                Op::Destroy(pick) if !live.is_empty() => {
                    let entity = live.swap_remove(pick % live.len());
                    registry.destroy(entity).unwrap();
                }
                Op::Destroy(_) => {}
            }

            let indices: HashSet<u32> = live.iter().map(|e| e.index).collect();
            prop_assert_eq!(indices.len(), live.len());
            prop_assert_eq!(registry.len(), live.len());
            prop_assert!(live.iter().all(|&e| registry.is_alive(e)));
        }
    }
}

//! Component storage tests

use dashline_ecs::{ComponentArray, Entity, ErrorKind};
use proptest::prelude::*;

use crate::common::{Health, Position, world};

#[test]
fn add_get_remove() {
    let mut world = world();
    let a = world.create_entity().unwrap();

    world.add_component(a, Position::new(3.0, 4.0)).unwrap();
    assert!(world.has_component::<Position>(a).unwrap());
    assert_eq!(world.component::<Position>(a).unwrap(), &Position::new(3.0, 4.0));

    world.component_mut::<Position>(a).unwrap().x = 7.0;
    assert_eq!(world.remove_component::<Position>(a).unwrap(), Position::new(7.0, 4.0));
    assert!(!world.has_component::<Position>(a).unwrap());
}

#[test]
fn removing_the_middle_keeps_the_rest() {
    let mut world = world();
    let a = world.create_entity().unwrap();
    let b = world.create_entity().unwrap();
    let c = world.create_entity().unwrap();
    world.add_component(a, Position::new(1.0, 1.0)).unwrap();
    world.add_component(b, Position::new(2.0, 2.0)).unwrap();
    world.add_component(c, Position::new(3.0, 3.0)).unwrap();

    world.remove_component::<Position>(b).unwrap();

    assert_eq!(world.component::<Position>(a).unwrap(), &Position::new(1.0, 1.0));
    assert_eq!(world.component::<Position>(c).unwrap(), &Position::new(3.0, 3.0));
    assert!(!world.has_component::<Position>(b).unwrap());
    // C moved into B's slot.
    let positions = world.components::<Position>().unwrap();
    assert_eq!(positions.entities(), &[a, c]);
    assert_eq!(positions.slot_of(c), Some(1));
}

#[test]
fn contract_breaches_are_reported() {
    let mut world = world();
    let a = world.create_entity().unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();

    let twice = world.add_component(a, Health { hp: 2.0 }).unwrap_err();
    assert!(matches!(twice.kind, ErrorKind::ComponentAlreadyPresent { .. }));
    assert_eq!(world.component::<Health>(a).unwrap().hp, 1.0);

    let absent = world.remove_component::<Position>(a).unwrap_err();
    assert!(matches!(absent.kind, ErrorKind::ComponentMissing { .. }));

    #[derive(Clone)]
    struct Unregistered;
    let unknown = world.add_component(a, Unregistered).unwrap_err();
    assert!(matches!(unknown.kind, ErrorKind::ComponentNotRegistered(_)));
    assert!(unknown.is_invariant_violation());

    let again = world.register_component::<Health>().unwrap_err();
    assert!(matches!(again.kind, ErrorKind::ComponentAlreadyRegistered(_)));
}

#[test]
fn kinds_get_sequential_types() {
    let world = world();
    assert_eq!(world.component_type::<Position>().unwrap().index(), 0);
    assert_eq!(world.component_type::<Health>().unwrap().index(), 1);
    let name = world
        .component_name(world.component_type::<Health>().unwrap())
        .unwrap();
    assert!(name.ends_with("Health"));
}

#[test]
fn typed_iteration_is_dense_order() {
    let mut world = world();
    let entities: Vec<Entity> = (0..4).map(|_| world.create_entity().unwrap()).collect();
    for (i, &entity) in entities.iter().enumerate() {
        world.add_component(entity, Health { hp: f32::from(u8::try_from(i).unwrap()) }).unwrap();
    }
    world.remove_component::<Health>(entities[0]).unwrap();

    let seen: Vec<(Entity, f32)> = world
        .iter::<Health>()
        .unwrap()
        .map(|(entity, health)| (entity, health.hp))
        .collect();
    assert_eq!(
        seen,
        vec![(entities[3], 3.0), (entities[1], 1.0), (entities[2], 2.0)]
    );

    for (_, health) in world.iter_mut::<Health>().unwrap() {
        health.hp *= 10.0;
    }
    assert_eq!(world.component::<Health>(entities[2]).unwrap().hp, 20.0);
}

proptest! {
    #[test]
    fn survivors_keep_their_markers(count in 1usize..64, removals in prop::collection::vec(any::<usize>(), 0..32)) {
        let mut array = ComponentArray::new();
        let mut live: Vec<Entity> = Vec::new();
        for i in 0..count {
            let entity = Entity::new(u32::try_from(i).unwrap(), 1);
            array.insert(entity, i).unwrap();
            live.push(entity);
        }

        for pick in removals {
            if live.is_empty() {
                break;
            }
            let entity = live.remove(pick % live.len());
            prop_assert_eq!(array.remove(entity).unwrap(), entity.slot());
        }

        prop_assert_eq!(array.len(), live.len());
        for entity in &live {
            prop_assert_eq!(*array.get(*entity).unwrap(), entity.slot());
        }
    }
}

//! System registry and membership tests

use dashline_ecs::{
    Entity, ErrorKind, Event, MembershipChange, Result, Signature, System, SystemContext,
    Timestep, World,
};
use proptest::prelude::*;

use crate::common::{Health, Living, Position, living_signature, world, world_with_living};

const DT: Timestep = Timestep::from_seconds(0.1);

#[test]
fn membership_scenario() {
    let mut world = world_with_living();
    let a = world.create_entity().unwrap();

    world.add_component(a, Position::new(0.0, 0.0)).unwrap();
    assert!(world.system_members::<Living>().unwrap().is_empty());

    world.add_component(a, Health { hp: 1.0 }).unwrap();
    assert_eq!(world.system_members::<Living>().unwrap().to_vec(), vec![a]);
    assert_eq!(
        world.system::<Living>().unwrap().log,
        vec![MembershipChange::Added(a)]
    );

    world.remove_component::<Health>(a).unwrap();
    assert!(world.system_members::<Living>().unwrap().is_empty());
    assert_eq!(
        world.system::<Living>().unwrap().log,
        vec![MembershipChange::Added(a), MembershipChange::Removed(a)]
    );
}

#[test]
fn destroying_a_member_notifies() {
    let mut world = world_with_living();
    let a = world.create_entity().unwrap();
    world.add_component(a, Position::new(0.0, 0.0)).unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();

    world.destroy_entity(a).unwrap();
    assert_eq!(
        world.system::<Living>().unwrap().log,
        vec![MembershipChange::Added(a), MembershipChange::Removed(a)]
    );
}

#[test]
fn late_registration_sees_existing_entities() {
    let mut world = world();
    let a = world.create_entity().unwrap();
    world.add_component(a, Position::new(0.0, 0.0)).unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();

    let signature = living_signature(&world);
    world
        .register_system_with_signature(Living::default(), signature)
        .unwrap();
    assert_eq!(world.system_members::<Living>().unwrap().to_vec(), vec![a]);

    // A narrower signature still matches.
    let position = world.component_type::<Position>().unwrap();
    world
        .set_system_signature::<Living>(Signature::of(&[position]))
        .unwrap();
    assert_eq!(world.system_members::<Living>().unwrap().len(), 1);
}

#[test]
fn register_and_deregister() {
    let mut world = world_with_living();
    let err = world.register_system(Living::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SystemAlreadyRegistered(_)));

    let removed = world.deregister_system::<Living>().unwrap();
    assert_eq!(removed.updates, 0);
    assert!(!world.has_system::<Living>());
    let err = world.deregister_system::<Living>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SystemNotRegistered(_)));
    assert!(world.set_system_signature::<Living>(Signature::EMPTY).is_err());
}

/// Records the frame and order it ran in.
#[derive(Clone, Default)]
struct Recorder<const ID: u8> {
    order: Vec<(u64, u8)>,
}

impl<const ID: u8> System for Recorder<ID> {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, _ts: Timestep) -> Result<()> {
        self.order.push((ctx.frame(), ID));
        Ok(())
    }

    fn on_event(&mut self, _ctx: &mut SystemContext<'_>, event: &Event) -> Result<()> {
        if let Event::MouseScrolled { y_offset, .. } = event {
            self.order.push((u64::from(*y_offset as u8), ID));
        }
        Ok(())
    }
}

/// Reads the other recorders' logs to prove registration order.
#[derive(Clone, Default)]
struct Auditor {
    seen: Vec<usize>,
}

impl System for Auditor {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, _ts: Timestep) -> Result<()> {
        self.seen.push(ctx.system::<Recorder<1>>()?.order.len());
        self.seen.push(ctx.system::<Recorder<2>>()?.order.len());
        Ok(())
    }
}

#[test]
fn systems_run_in_registration_order() {
    let mut world = World::new();
    world.register_system(Recorder::<1>::default()).unwrap();
    world.register_system(Auditor::default()).unwrap();
    world.register_system(Recorder::<2>::default()).unwrap();

    world.on_update(DT).unwrap();
    world.on_update(DT).unwrap();

    assert_eq!(world.system::<Recorder<1>>().unwrap().order, vec![(1, 1), (2, 1)]);
    assert_eq!(world.system::<Recorder<2>>().unwrap().order, vec![(1, 2), (2, 2)]);
    // Recorder 1 already ran this frame, recorder 2 not yet.
    assert_eq!(world.system::<Auditor>().unwrap().seen, vec![1, 0, 2, 1]);

    world
        .on_event(&Event::MouseScrolled {
            x_offset: 0.0,
            y_offset: 9.0,
        })
        .unwrap();
    assert_eq!(world.system::<Recorder<2>>().unwrap().order.last(), Some(&(9, 2)));
}

#[test]
fn update_drives_components() {
    let mut world = world_with_living();
    let a = world.create_entity().unwrap();
    world.add_component(a, Position::new(0.0, 0.0)).unwrap();
    world.add_component(a, Health { hp: 1.0 }).unwrap();

    world.on_update(DT).unwrap();
    world.on_update(DT).unwrap();
    assert_eq!(world.component::<Health>(a).unwrap().hp, 0.0);
    assert_eq!(world.system::<Living>().unwrap().updates, 2);
    assert_eq!(world.frame(), 2);
}

#[derive(Clone, Debug)]
enum Op {
    Create,
    Destroy(usize),
    AddPosition(usize),
    AddHealth(usize),
    RemovePosition(usize),
    RemoveHealth(usize),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            Just(Op::Create),
            any::<usize>().prop_map(Op::Destroy),
            any::<usize>().prop_map(Op::AddPosition),
            any::<usize>().prop_map(Op::AddHealth),
            any::<usize>().prop_map(Op::RemovePosition),
            any::<usize>().prop_map(Op::RemoveHealth),
        ],
        0..120,
    )
}

fn pick(live: &[Entity], n: usize) -> Option<Entity> {
    (!live.is_empty()).then(|| live[n % live.len()])
}

proptest! {
    #[test]
    fn membership_matches_signatures(ops in ops()) {
        let mut world = world_with_living();
        let required = living_signature(&world);
        let position = world.component_type::<Position>().unwrap();
        let health = world.component_type::<Health>().unwrap();
        let mut live: Vec<Entity> = Vec::new();

        for op in ops {
            // Errors (double add, missing remove) are expected and harmless.
            match op {
                Op::Create => {
                    if let Ok(entity) = world.create_entity() {
                        live.push(entity);
                    }
                }
                Op::Destroy(n) => {
                    if let Some(entity) = pick(&live, n) {
                        world.destroy_entity(entity).unwrap();
                        live.retain(|&e| e != entity);
                    }
                }
                Op::AddPosition(n) => {
                    if let Some(entity) = pick(&live, n) {
                        let _ = world.add_component(entity, Position::new(0.0, 0.0));
                    }
                }
                Op::AddHealth(n) => {
                    if let Some(entity) = pick(&live, n) {
                        let _ = world.add_component(entity, Health { hp: 1.0 });
                    }
                }
                Op::RemovePosition(n) => {
                    if let Some(entity) = pick(&live, n) {
                        let _ = world.remove_component::<Position>(entity);
                    }
                }
                Op::RemoveHealth(n) => {
                    if let Some(entity) = pick(&live, n) {
                        let _ = world.remove_component::<Health>(entity);
                    }
                }
            }

            let members = world.system_members::<Living>().unwrap();
            for &entity in &live {
                let signature = world.signature(entity).unwrap();
                prop_assert_eq!(members.contains(entity), signature.matches(required));
                prop_assert_eq!(
                    signature.contains(position),
                    world.components::<Position>().unwrap().contains(entity)
                );
                prop_assert_eq!(
                    signature.contains(health),
                    world.components::<Health>().unwrap().contains(entity)
                );
            }
            prop_assert!(members.iter().all(|e| live.contains(&e)));
        }
    }
}

//! Shared fixtures: two plain components and a hook-recording system.

use dashline_ecs::{
    Entity, MembershipChange, Result, Signature, System, SystemContext, Timestep, World,
    WorldConfig,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Health {
    pub hp: f32,
}

/// Requires Position + Health; records hooks and drains health each frame.
#[derive(Clone, Debug, Default)]
pub struct Living {
    pub log: Vec<MembershipChange>,
    pub updates: u32,
}

impl System for Living {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, _ts: Timestep) -> Result<()> {
        self.updates += 1;
        for entity in &ctx.members() {
            ctx.component_mut::<Health>(entity)?.hp -= 0.5;
        }
        Ok(())
    }

    fn on_entity_added(&mut self, entity: Entity) {
        self.log.push(MembershipChange::Added(entity));
    }

    fn on_entity_removed(&mut self, entity: Entity) {
        self.log.push(MembershipChange::Removed(entity));
    }
}

pub fn world() -> World {
    let mut world = World::with_config(WorldConfig::compact()).unwrap();
    world.register_component::<Position>().unwrap();
    world.register_component::<Health>().unwrap();
    world
}

pub fn living_signature(world: &World) -> Signature {
    Signature::of(&[
        world.component_type::<Position>().unwrap(),
        world.component_type::<Health>().unwrap(),
    ])
}

pub fn world_with_living() -> World {
    let mut world = world();
    let signature = living_signature(&world);
    world
        .register_system_with_signature(Living::default(), signature)
        .unwrap();
    world
}

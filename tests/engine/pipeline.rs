//! Physics and rendering through the World

use dashline_ecs::{Timestep, World};
use dashline_engine::{
    AssetRegistry, DrawCommand, Gravity, PhysicsSystem, QuadBuilder, RenderSystem, RigidBody,
    TextureHandle, register_engine_components, register_engine_systems,
};
use glam::{Vec2, Vec3, Vec4};

const DT: Timestep = Timestep::from_seconds(0.5);

fn world() -> World {
    let mut world = World::new();
    register_engine_components(&mut world).unwrap();
    register_engine_systems(&mut world).unwrap();
    world
}

#[test]
fn falling_quad_is_drawn_where_it_lands() {
    let mut world = world();
    let body = QuadBuilder::new(Vec3::new(0.0, 10.0, 0.0), Vec2::ONE)
        .color(Vec4::new(1.0, 0.0, 0.0, 1.0))
        .build(&mut world)
        .unwrap();
    world
        .add_component(
            body,
            Gravity {
                force: Vec3::new(0.0, -4.0, 0.0),
            },
        )
        .unwrap();
    world
        .add_component(
            body,
            RigidBody {
                mass: 2.0,
                ..RigidBody::default()
            },
        )
        .unwrap();

    assert_eq!(world.system_members::<PhysicsSystem>().unwrap().len(), 1);
    world.on_update(DT).unwrap();

    // a = -2, v = -1, p = 10 - 0.5
    let list = world.system::<RenderSystem>().unwrap().draw_list();
    assert_eq!(
        list.commands(),
        &[DrawCommand::Quad {
            position: Vec3::new(0.0, 9.5, 0.0),
            size: Vec2::ONE,
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
        }]
    );
}

#[test]
fn immovable_bodies_stay_put() {
    let mut world = world();
    let wall = QuadBuilder::new(Vec3::ZERO, Vec2::ONE).build(&mut world).unwrap();
    world
        .add_component(wall, Gravity { force: Vec3::NEG_Y })
        .unwrap();
    world
        .add_component(
            wall,
            RigidBody {
                movable: false,
                ..RigidBody::default()
            },
        )
        .unwrap();

    world.on_update(DT).unwrap();
    assert_eq!(
        world
            .component::<dashline_engine::Transform>(wall)
            .unwrap()
            .position,
        Vec3::ZERO
    );
}

#[test]
fn render_picks_variants() {
    let mut world = world();
    let mut assets = AssetRegistry::new();
    let crate_texture = assets.intern("crate.png");

    QuadBuilder::new(Vec3::ZERO, Vec2::ONE)
        .rotation(45.0)
        .build(&mut world)
        .unwrap();
    QuadBuilder::new(Vec3::ZERO, Vec2::ONE)
        .texture(crate_texture, 2.0)
        .build(&mut world)
        .unwrap();
    QuadBuilder::new(Vec3::ZERO, Vec2::ONE)
        .triangle()
        .build(&mut world)
        .unwrap();

    world.on_update(DT).unwrap();
    let list = world.system::<RenderSystem>().unwrap().draw_list();
    assert_eq!(list.len(), 3);
    assert!(matches!(list.commands()[0], DrawCommand::RotatedQuad { rotation, .. } if rotation == 45.0));
    assert_eq!(list.commands()[1].texture(), Some(crate_texture));
    assert!(matches!(list.commands()[2], DrawCommand::Triangle { .. }));
    assert_ne!(crate_texture, TextureHandle::WHITE);
}

#[test]
fn draw_list_is_rebuilt_each_frame() {
    let mut world = world();
    let quad = QuadBuilder::new(Vec3::ZERO, Vec2::ONE).build(&mut world).unwrap();

    world.on_update(DT).unwrap();
    assert_eq!(world.system::<RenderSystem>().unwrap().draw_list().len(), 1);

    world.destroy_entity(quad).unwrap();
    world.on_update(DT).unwrap();
    assert!(world.system::<RenderSystem>().unwrap().draw_list().is_empty());
}

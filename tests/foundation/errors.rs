//! Error classification and context tests

use dashline_foundation::{Entity, Error, ErrorContext, ErrorKind, Event, KeyCode};

#[test]
fn every_ecs_contract_breach_is_fatal() {
    let entity = Entity::new(3, 1);
    let fatal = [
        Error::entity_limit(5000),
        Error::entity_out_of_range(entity, 256),
        Error::entity_not_found(entity),
        Error::stale_entity(entity),
        Error::component_present(entity, "Health"),
        Error::component_missing(entity, "Health"),
        Error::component_not_registered("Health"),
        Error::new(ErrorKind::ComponentAlreadyRegistered("Health")),
        Error::new(ErrorKind::ComponentLimitReached {
            limit: 32,
            component: "Health",
        }),
        Error::new(ErrorKind::SystemAlreadyRegistered("Camera")),
        Error::system_not_registered("Camera"),
    ];
    for err in &fatal {
        assert!(err.is_invariant_violation(), "{err}");
    }
    assert!(!Error::new(ErrorKind::Config("max_entities".into())).is_invariant_violation());
}

#[test]
fn context_renders_operation_frame_and_stack() {
    let err = Error::component_missing(Entity::new(1, 1), "RigidBody")
        .with_context(ErrorContext::new().with_operation("component"))
        .in_layer("GameLogicSystem", 42)
        .in_layer("MainGame", 42);

    let context = err.context.as_ref().unwrap();
    let text = context.to_string();
    assert!(text.starts_with("in component at frame 42"));
    assert!(text.contains("via GameLogicSystem"));
    assert!(text.ends_with("via MainGame"));
}

#[test]
fn key_events_expose_their_key() {
    assert_eq!(
        Event::key_pressed(KeyCode::Space).key(),
        Some(KeyCode::Space)
    );
    assert_eq!(Event::key_released(KeyCode::Z).key(), Some(KeyCode::Z));
    assert_eq!(
        Event::WindowResized {
            width: 1,
            height: 1
        }
        .key(),
        None
    );
}

//! Signature and entity handle tests

use dashline_foundation::{ComponentType, Entity, MAX_COMPONENTS, Signature};
use proptest::prelude::*;

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn system_match_is_and_equals() {
    let transform = ComponentType::new(1);
    let drawable = ComponentType::new(5);
    let colored = ComponentType::new(3);

    let required = Signature::of(&[transform, drawable]);
    let entity = Signature::of(&[transform, drawable, colored]);

    assert!(entity.matches(required));
    assert_eq!(entity & required, required);
    assert!(!Signature::of(&[transform]).matches(required));
    assert!(Signature::EMPTY.matches(Signature::EMPTY));
    assert!(entity.matches(Signature::EMPTY));
}

#[test]
fn iteration_is_ascending() {
    let signature: Signature = [9, 0, 31, 4]
        .into_iter()
        .map(ComponentType::new)
        .collect();
    let kinds: Vec<usize> = signature.iter().map(ComponentType::index).collect();
    assert_eq!(kinds, vec![0, 4, 9, 31]);
    assert_eq!(signature.len(), 4);
}

#[test]
fn null_entity_is_distinct() {
    assert!(Entity::null().is_null());
    assert!(Entity::default().is_null());
    assert_ne!(Entity::new(0, 1), Entity::null());
    assert!(Entity::new(2, 1) < Entity::new(2, 3));
    assert!(Entity::new(1, 9) < Entity::new(2, 1));
}

proptest! {
    #[test]
    fn matches_agrees_with_bits(entity in any::<u32>(), required in any::<u32>()) {
        let e = Signature::from_bits(entity);
        let r = Signature::from_bits(required);
        prop_assert_eq!(e.matches(r), entity & required == required);
    }

    #[test]
    fn set_and_clear(bits in any::<u32>(), index in 0usize..MAX_COMPONENTS) {
        let ty = ComponentType::try_new(index).unwrap();
        let mut signature = Signature::from_bits(bits);
        signature.set(ty);
        prop_assert!(signature.contains(ty));
        signature.clear(ty);
        prop_assert!(!signature.contains(ty));
        prop_assert_eq!(signature.bits(), bits & !(1 << index));
    }
}

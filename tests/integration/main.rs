//! Cross-layer integration tests for dashline
//!
//! Tests that drive the whole stack, from console commands down to the ECS.

mod determinism;

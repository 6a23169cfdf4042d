//! Integration tests for Layer 1: ECS
//!
//! Tests for entity allocation, component storage, system membership, and
//! world snapshots.

mod common;
mod components;
mod entities;
mod snapshots;
mod systems;

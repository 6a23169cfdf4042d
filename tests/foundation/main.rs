//! Integration tests for Layer 0: Foundation
//!
//! Tests for entity handles, signatures, events, and errors.

mod errors;
mod signatures;

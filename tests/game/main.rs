//! Integration tests for Layer 3: Game
//!
//! Tests for the demo level, checkpoint history, and death rewind.

mod history;
mod rewind;

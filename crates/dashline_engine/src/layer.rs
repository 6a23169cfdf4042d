//! Application layers.

use dashline_foundation::{Event, Result, Timestep};

/// A slice of the application driven once per frame.
///
/// The application attaches layers in order, updates them every frame, and
/// hands them every event.
pub trait Layer {
    /// Name used in logs and error context.
    fn name(&self) -> &str;

    /// Called once when the layer is pushed.
    ///
    /// # Errors
    ///
    /// Setup failures abort the attach.
    fn on_attach(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once when the layer is popped.
    fn on_detach(&mut self) {}

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// Errors stop the frame loop.
    fn on_update(&mut self, ts: Timestep) -> Result<()>;

    /// Handles an input or window event.
    ///
    /// # Errors
    ///
    /// Errors stop the frame loop.
    fn on_event(&mut self, event: &Event) -> Result<()>;
}

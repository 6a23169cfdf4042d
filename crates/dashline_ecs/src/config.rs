//! World configuration.

use dashline_foundation::{Error, ErrorKind, MAX_ENTITIES, Result};

/// Configuration for a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Maximum number of simultaneously live entities.
    ///
    /// Never larger than [`MAX_ENTITIES`].
    pub max_entities: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
        }
    }
}

impl WorldConfig {
    /// Creates a small world configuration, handy for tests and tools.
    #[must_use]
    pub fn compact() -> Self {
        Self { max_entities: 256 }
    }

    /// Builder method to set the entity limit.
    #[must_use]
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns a config error if the entity limit is zero or above
    /// [`MAX_ENTITIES`].
    pub fn validate(&self) -> Result<()> {
        if self.max_entities == 0 || self.max_entities > MAX_ENTITIES {
            return Err(Error::new(ErrorKind::Config(format!(
                "max_entities must be within 1..={MAX_ENTITIES}, got {}",
                self.max_entities
            ))));
        }
        Ok(())
    }
}

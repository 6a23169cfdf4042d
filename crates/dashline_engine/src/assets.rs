//! Texture name interning.
//!
//! The registry never touches the disk: it maps asset names to small
//! handles so components can refer to textures by value.

use std::collections::HashMap;
use std::fmt;

use log::trace;

/// Opaque reference to a texture known to an [`AssetRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// The built-in 1x1 white texture.
    pub const WHITE: Self = Self(0);

    /// Returns the raw handle value.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// Name -> [`TextureHandle`] interning service.
#[derive(Clone, Debug)]
pub struct AssetRegistry {
    handles: HashMap<String, TextureHandle>,
    names: Vec<String>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry {
    /// Name of the built-in white texture.
    pub const WHITE_NAME: &'static str = "white";

    /// Creates a registry holding only the white texture.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            handles: HashMap::new(),
            names: Vec::new(),
        };
        registry.intern(Self::WHITE_NAME);
        registry
    }

    /// Returns the handle for `name`, creating one on first use.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intern(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.handles.get(name) {
            return handle;
        }
        let handle = TextureHandle(self.names.len() as u32);
        trace!("interned texture {name} as {handle}");
        self.handles.insert(name.to_owned(), handle);
        self.names.push(name.to_owned());
        handle
    }

    /// Looks up an already interned texture.
    #[must_use]
    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.handles.get(name).copied()
    }

    /// Returns the name behind a handle.
    #[must_use]
    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    /// Returns the number of known textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the white texture is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

//! Components attached to scene objects.

/// Range of vertices inside the shared mesh buffer that an object draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MeshRange {
    pub start: u32,
    pub count: u32,
}

impl MeshRange {
    /// Range that draws nothing.
    pub const EMPTY: Self = Self { start: 0, count: 0 };

    pub fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }
}

/// Name an object was authored with in the scene file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

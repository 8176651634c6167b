pub mod cube;
pub mod icosphere;
pub mod mesh;
pub mod square;

/// The geometries the demo can show, keyed by the names the controls use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Icosphere,
    Cube,
    Square,
}

impl GeometryKind {
    /// Unknown names yield `None`; the caller decides how to degrade.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "icosphere" => Some(Self::Icosphere),
            "cube" => Some(Self::Cube),
            "square" => Some(Self::Square),
            _ => None,
        }
    }
}

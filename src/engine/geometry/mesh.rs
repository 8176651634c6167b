/// CPU-side mesh: a triangle-list index buffer plus flat vec4 vertex
/// streams. Positions carry w=1, normals w=0 (directions only). Colors are
/// optional and empty for the built-in generators.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub indices: Vec<u32>,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Structural invariants: whole triangles, whole vec4s, every index in
    /// bounds, and normals (when present) parallel to positions.
    pub fn is_valid(&self) -> bool {
        if self.indices.len() % 3 != 0 || self.positions.len() % 4 != 0 {
            return false;
        }
        let vertex_count = self.vertex_count() as u32;
        if self.indices.iter().any(|&i| i >= vertex_count) {
            return false;
        }
        if !self.normals.is_empty() && self.normals.len() != self.positions.len() {
            return false;
        }
        if !self.colors.is_empty() && self.colors.len() != self.positions.len() {
            return false;
        }
        true
    }
}

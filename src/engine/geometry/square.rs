use super::mesh::MeshData;

/// Unit quad in the xy plane facing +z, as two triangles.
pub fn generate(center: [f32; 3], size: f32) -> MeshData {
    let h = size * 0.5;
    let corners = [[-h, -h], [h, -h], [h, h], [-h, h]];

    let mut positions = Vec::with_capacity(16);
    let mut normals = Vec::with_capacity(16);
    for [x, y] in corners {
        positions.extend_from_slice(&[center[0] + x, center[1] + y, center[2], 1.0]);
        normals.extend_from_slice(&[0.0, 0.0, 1.0, 0.0]);
    }

    MeshData {
        indices: vec![0, 1, 2, 0, 2, 3],
        positions,
        normals,
        colors: Vec::new(),
    }
}

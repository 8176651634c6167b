use super::mesh::MeshData;

/// Axis-aligned cube: 8 shared corner vertices at `center ± radius` per
/// axis, 12 triangles. Normals point along the corner diagonals so the
/// streams stay parallel with one normal per vertex.
pub fn generate(center: [f32; 3], radius: f32) -> MeshData {
    let r = radius;
    let corners: [[f32; 3]; 8] = [
        [r, -r, r],
        [r, -r, -r],
        [r, r, -r],
        [r, r, r],
        [-r, -r, r],
        [-r, r, r],
        [-r, r, -r],
        [-r, -r, -r],
    ];

    let indices = vec![
        0, 1, 2,
        0, 2, 3,
        2, 6, 5,
        2, 5, 3,
        6, 7, 4,
        6, 4, 5,
        0, 4, 7,
        0, 7, 1,
        0, 3, 5,
        0, 5, 4,
        1, 7, 6,
        1, 6, 2,
    ];

    let inv_len = 1.0 / 3.0_f32.sqrt();
    let mut positions = Vec::with_capacity(corners.len() * 4);
    let mut normals = Vec::with_capacity(corners.len() * 4);
    for corner in corners {
        positions.extend_from_slice(&[
            center[0] + corner[0],
            center[1] + corner[1],
            center[2] + corner[2],
            1.0,
        ]);
        normals.extend_from_slice(&[
            corner[0].signum() * inv_len,
            corner[1].signum() * inv_len,
            corner[2].signum() * inv_len,
            0.0,
        ]);
    }

    MeshData {
        indices,
        positions,
        normals,
        colors: Vec::new(),
    }
}

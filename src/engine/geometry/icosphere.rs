use std::collections::HashMap;

use super::mesh::MeshData;

// golden ratio
const T: f32 = 1.618_034;

/// Icosphere: a regular icosahedron whose faces are split `subdivisions`
/// times (four children per triangle), with every vertex pushed out to the
/// radius. Normals are the unit vertex directions. Shared edges reuse their
/// midpoint vertex, so the mesh stays watertight.
pub fn generate(center: [f32; 3], radius: f32, subdivisions: u32) -> MeshData {
    let mut verts: Vec<[f32; 3]> = vec![
        [-1.0, T, 0.0],
        [1.0, T, 0.0],
        [-1.0, -T, 0.0],
        [1.0, -T, 0.0],
        [0.0, -1.0, T],
        [0.0, 1.0, T],
        [0.0, -1.0, -T],
        [0.0, 1.0, -T],
        [T, 0.0, -1.0],
        [T, 0.0, 1.0],
        [-T, 0.0, -1.0],
        [-T, 0.0, 1.0],
    ];
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut split = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut verts, &mut midpoints, a, b);
            let bc = midpoint(&mut verts, &mut midpoints, b, c);
            let ca = midpoint(&mut verts, &mut midpoints, c, a);
            split.push([a, ab, ca]);
            split.push([b, bc, ab]);
            split.push([c, ca, bc]);
            split.push([ab, bc, ca]);
        }
        faces = split;
    }

    let mut positions = Vec::with_capacity(verts.len() * 4);
    let mut normals = Vec::with_capacity(verts.len() * 4);
    for v in &verts {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        let dir = [v[0] / len, v[1] / len, v[2] / len];
        positions.extend_from_slice(&[
            center[0] + dir[0] * radius,
            center[1] + dir[1] * radius,
            center[2] + dir[2] * radius,
            1.0,
        ]);
        normals.extend_from_slice(&[dir[0], dir[1], dir[2], 0.0]);
    }

    MeshData {
        indices: faces.iter().flatten().copied().collect(),
        positions,
        normals,
        colors: Vec::new(),
    }
}

fn midpoint(
    verts: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let va = verts[a as usize];
    let vb = verts[b as usize];
    let idx = verts.len() as u32;
    verts.push([
        (va[0] + vb[0]) * 0.5,
        (va[1] + vb[1]) * 0.5,
        (va[2] + vb[2]) * 0.5,
    ]);
    cache.insert(key, idx);
    idx
}

use bytemuck::cast_slice;
use log::error;

use super::gl_api::GlApi;
use crate::engine::geometry::mesh::MeshData;

/// Capability contract for anything the shader program can draw: per-stream
/// buffer binding plus the metadata for one indexed draw call. A `bind_*`
/// returning `false` means the stream does not exist for this drawable and
/// the caller skips the attribute.
pub trait Drawable<G: GlApi> {
    fn bind_index(&self, gl: &G) -> bool;
    fn bind_position(&self, gl: &G) -> bool;
    fn bind_normal(&self, gl: &G) -> bool;
    fn bind_color(&self, gl: &G) -> bool;
    fn element_count(&self) -> i32;
    fn draw_mode(&self) -> u32;
}

/// GPU-side copy of one mesh: at most one buffer per stream. Buffers are
/// plain GL handles with single ownership here; they are released only
/// through `destroy` (or the implicit destroy at the start of `create`),
/// never by dropping.
pub struct GpuMesh<G: GlApi> {
    buf_idx: Option<G::Buffer>,
    buf_pos: Option<G::Buffer>,
    buf_nor: Option<G::Buffer>,
    buf_col: Option<G::Buffer>,
    count: i32,
    mode: u32,
}

impl<G: GlApi> GpuMesh<G> {
    pub fn new() -> Self {
        Self {
            buf_idx: None,
            buf_pos: None,
            buf_nor: None,
            buf_col: None,
            count: 0,
            mode: glow::TRIANGLES,
        }
    }

    /// Upload the mesh streams that are present. Any buffers still held from
    /// an earlier `create` are released first, so regenerating geometry never
    /// leaks the previous allocation.
    pub fn create(&mut self, gl: &G, mesh: &MeshData) {
        debug_assert!(mesh.is_valid(), "mesh violates index/normal invariants");
        self.destroy(gl);

        self.buf_idx = upload(gl, glow::ELEMENT_ARRAY_BUFFER, cast_slice(&mesh.indices));
        if !mesh.positions.is_empty() {
            self.buf_pos = upload(gl, glow::ARRAY_BUFFER, cast_slice(&mesh.positions));
        }
        if !mesh.normals.is_empty() {
            self.buf_nor = upload(gl, glow::ARRAY_BUFFER, cast_slice(&mesh.normals));
        }
        if !mesh.colors.is_empty() {
            self.buf_col = upload(gl, glow::ARRAY_BUFFER, cast_slice(&mesh.colors));
        }
        self.count = mesh.indices.len() as i32;
    }

    /// Release all GPU buffers. Safe to call repeatedly; an already-released
    /// mesh is simply empty.
    pub fn destroy(&mut self, gl: &G) {
        for buf in [
            self.buf_idx.take(),
            self.buf_pos.take(),
            self.buf_nor.take(),
            self.buf_col.take(),
        ]
        .into_iter()
        .flatten()
        {
            gl.delete_buffer(buf);
        }
        self.count = 0;
    }
}

impl<G: GlApi> Default for GpuMesh<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GlApi> Drawable<G> for GpuMesh<G> {
    fn bind_index(&self, gl: &G) -> bool {
        bind(gl, glow::ELEMENT_ARRAY_BUFFER, self.buf_idx)
    }

    fn bind_position(&self, gl: &G) -> bool {
        bind(gl, glow::ARRAY_BUFFER, self.buf_pos)
    }

    fn bind_normal(&self, gl: &G) -> bool {
        bind(gl, glow::ARRAY_BUFFER, self.buf_nor)
    }

    fn bind_color(&self, gl: &G) -> bool {
        bind(gl, glow::ARRAY_BUFFER, self.buf_col)
    }

    fn element_count(&self) -> i32 {
        self.count
    }

    fn draw_mode(&self) -> u32 {
        self.mode
    }
}

fn upload<G: GlApi>(gl: &G, target: u32, data: &[u8]) -> Option<G::Buffer> {
    match gl.create_buffer() {
        Ok(buf) => {
            gl.bind_buffer(target, Some(buf));
            gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
            Some(buf)
        }
        Err(e) => {
            error!("buffer allocation failed: {e}");
            None
        }
    }
}

fn bind<G: GlApi>(gl: &G, target: u32, buf: Option<G::Buffer>) -> bool {
    match buf {
        Some(buf) => {
            gl.bind_buffer(target, Some(buf));
            true
        }
        None => false,
    }
}

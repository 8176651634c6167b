use super::drawable::Drawable;
use super::gl_api::GlApi;
use super::render_context::RenderContext;
use crate::engine::error::ShaderError;
use crate::engine::utils::math::{mat4x4_invert, mat4x4_transpose, Mat4x4};

/// A compiled and linked GPU program with its attribute and uniform handles
/// resolved once up front. A handle that resolves to `None` means the shader
/// does not use that input; every setter checks for it and quietly skips the
/// upload, matching GL's own contract for missing locations.
#[derive(Debug)]
pub struct ShaderProgram<G: GlApi> {
    program: G::Program,

    attr_pos: Option<u32>,
    attr_nor: Option<u32>,
    attr_col: Option<u32>,

    unif_model: Option<G::UniformLocation>,
    unif_model_inv_tr: Option<G::UniformLocation>,
    unif_view_proj: Option<G::UniformLocation>,
    unif_color: Option<G::UniformLocation>,
    unif_time: Option<G::UniformLocation>,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Compile both stages and link. Either failure is fatal and carries the
    /// driver's diagnostic verbatim; partially created GL objects are
    /// released on every error path.
    pub fn new(gl: &G, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vs = compile_stage(gl, glow::VERTEX_SHADER, vertex_src, "vertex")?;
        let fs = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src, "fragment") {
            Ok(fs) => fs,
            Err(e) => {
                gl.delete_shader(vs);
                return Err(e);
            }
        };

        let program = match gl.create_program() {
            Ok(p) => p,
            Err(log) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(ShaderError::Link { log });
            }
        };
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        Ok(Self {
            attr_pos: gl.get_attrib_location(program, "vs_Pos"),
            attr_nor: gl.get_attrib_location(program, "vs_Nor"),
            attr_col: gl.get_attrib_location(program, "vs_Col"),
            unif_model: gl.get_uniform_location(program, "u_Model"),
            unif_model_inv_tr: gl.get_uniform_location(program, "u_ModelInvTr"),
            unif_view_proj: gl.get_uniform_location(program, "u_ViewProj"),
            unif_color: gl.get_uniform_location(program, "u_Color"),
            unif_time: gl.get_uniform_location(program, "u_Time"),
            program,
        })
    }

    /// Activate this program, deduplicated through the render context.
    pub fn bind(&self, gl: &G, ctx: &mut RenderContext<G>) {
        ctx.bind_program(gl, self.program);
    }

    /// Upload the model matrix and its inverse-transpose (needed for normals
    /// under non-uniform scale). A singular matrix skips the second upload.
    pub fn set_model_matrix(&self, gl: &G, ctx: &mut RenderContext<G>, model: Mat4x4) {
        self.bind(gl, ctx);
        if let Some(loc) = &self.unif_model {
            gl.uniform_matrix_4_f32_slice(Some(loc), true, &model);
        }
        if let Some(loc) = &self.unif_model_inv_tr {
            if let Some(inv_tr) = mat4x4_invert(mat4x4_transpose(model)) {
                gl.uniform_matrix_4_f32_slice(Some(loc), true, &inv_tr);
            }
        }
    }

    pub fn set_view_proj_matrix(&self, gl: &G, ctx: &mut RenderContext<G>, view_proj: Mat4x4) {
        self.bind(gl, ctx);
        if let Some(loc) = &self.unif_view_proj {
            gl.uniform_matrix_4_f32_slice(Some(loc), true, &view_proj);
        }
    }

    pub fn set_color(&self, gl: &G, ctx: &mut RenderContext<G>, color: [f32; 4]) {
        self.bind(gl, ctx);
        if let Some(loc) = &self.unif_color {
            gl.uniform_4_f32_slice(Some(loc), &color);
        }
    }

    pub fn set_time(&self, gl: &G, ctx: &mut RenderContext<G>, time: f32) {
        self.bind(gl, ctx);
        if let Some(loc) = &self.unif_time {
            gl.uniform_1_f32(Some(loc), time);
        }
    }

    /// Issue one indexed draw for the drawable. An attribute is fed only when
    /// the program declares it and the drawable provides the stream; enabled
    /// arrays are disabled again after every draw, unconditionally.
    pub fn draw(&self, gl: &G, ctx: &mut RenderContext<G>, drawable: &dyn Drawable<G>) {
        self.bind(gl, ctx);

        if let Some(loc) = self.attr_pos {
            if drawable.bind_position(gl) {
                gl.enable_vertex_attrib_array(loc);
                gl.vertex_attrib_pointer_f32(loc, 4, glow::FLOAT, false, 0, 0);
            }
        }
        if let Some(loc) = self.attr_nor {
            if drawable.bind_normal(gl) {
                gl.enable_vertex_attrib_array(loc);
                gl.vertex_attrib_pointer_f32(loc, 4, glow::FLOAT, false, 0, 0);
            }
        }
        if let Some(loc) = self.attr_col {
            if drawable.bind_color(gl) {
                gl.enable_vertex_attrib_array(loc);
                gl.vertex_attrib_pointer_f32(loc, 4, glow::FLOAT, false, 0, 0);
            }
        }

        drawable.bind_index(gl);
        gl.draw_elements(
            drawable.draw_mode(),
            drawable.element_count(),
            glow::UNSIGNED_INT,
            0,
        );

        if let Some(loc) = self.attr_pos {
            gl.disable_vertex_attrib_array(loc);
        }
        if let Some(loc) = self.attr_nor {
            gl.disable_vertex_attrib_array(loc);
        }
        if let Some(loc) = self.attr_col {
            gl.disable_vertex_attrib_array(loc);
        }
    }

    /// Delete the GL program. Consumes the wrapper; the handle has single
    /// ownership and must not outlive this call.
    pub fn destroy(self, gl: &G, ctx: &mut RenderContext<G>) {
        ctx.invalidate(self.program);
        gl.delete_program(self.program);
    }
}

fn compile_stage<G: GlApi>(
    gl: &G,
    stage_type: u32,
    source: &str,
    stage: &'static str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl
        .create_shader(stage_type)
        .map_err(|log| ShaderError::Compile { stage, log })?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader)
}

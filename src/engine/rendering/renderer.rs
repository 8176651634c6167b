use super::drawable::Drawable;
use super::gl_api::GlApi;
use super::render_context::RenderContext;
use super::shader_program::ShaderProgram;
use crate::engine::camera::Camera;
use crate::engine::utils::math::mat4x4_identity;

/// Owns the context-global render state: clear color and viewport size.
/// Per-frame work is clear + a batch of draws through one program.
pub struct Renderer {
    clear_color: [f32; 4],
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            width,
            height,
        }
    }

    /// One-time context setup. Depth testing stays on for the lifetime of
    /// the context; it is not toggled per frame.
    pub fn init<G: GlApi>(&self, gl: &G) {
        gl.enable(glow::DEPTH_TEST);
        gl.depth_func(glow::LESS);
    }

    pub fn set_clear_color<G: GlApi>(&mut self, gl: &G, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
        gl.clear_color(r, g, b, a);
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn apply_viewport<G: GlApi>(&self, gl: &G) {
        gl.viewport(0, 0, self.width as i32, self.height as i32);
    }

    pub fn clear<G: GlApi>(&self, gl: &G) {
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }

    /// Draw one frame's worth of geometry. View-projection, time and color
    /// are per-frame uniforms and go up once; the model matrix is per
    /// drawable and is uploaded immediately before each draw.
    pub fn render<G: GlApi>(
        &self,
        gl: &G,
        ctx: &mut RenderContext<G>,
        camera: &Camera,
        time: f32,
        color: [f32; 4],
        program: &ShaderProgram<G>,
        drawables: &[&dyn Drawable<G>],
    ) {
        program.set_view_proj_matrix(gl, ctx, camera.view_proj());
        program.set_time(gl, ctx, time);
        program.set_color(gl, ctx, color);

        for drawable in drawables {
            program.set_model_matrix(gl, ctx, mat4x4_identity());
            program.draw(gl, ctx, *drawable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::cube;
    use crate::engine::rendering::drawable::GpuMesh;
    use crate::engine::rendering::test_gl::{GlCall, RecordingGl};

    #[test]
    fn init_enables_depth_testing_once() {
        let gl = RecordingGl::new();
        let renderer = Renderer::new(640, 480);
        renderer.init(&gl);
        assert_eq!(gl.calls(), vec![
            GlCall::Enable(glow::DEPTH_TEST),
            GlCall::DepthFunc(glow::LESS),
        ]);
    }

    #[test]
    fn clear_color_is_stored_and_applied() {
        let gl = RecordingGl::new();
        let mut renderer = Renderer::new(640, 480);
        renderer.set_clear_color(&gl, 0.2, 0.2, 0.2, 1.0);
        assert_eq!(renderer.clear_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(gl.count(|c| matches!(c, GlCall::ClearColor(_))), 1);
    }

    #[test]
    fn viewport_follows_set_size() {
        let gl = RecordingGl::new();
        let mut renderer = Renderer::new(640, 480);
        renderer.set_size(800, 600);
        renderer.apply_viewport(&gl);
        assert_eq!(gl.calls(), vec![GlCall::Viewport(0, 0, 800, 600)]);
    }

    /// The full per-frame contract from a fake GPU's point of view: one
    /// clear, one upload per frame uniform, one model matrix and one indexed
    /// draw for the single cube.
    #[test]
    fn renders_unit_cube_with_expected_call_counts() {
        let gl = RecordingGl::new();
        let renderer = Renderer::new(640, 480);
        let program = ShaderProgram::new(&gl, "vert", "frag").unwrap();
        let mut ctx = RenderContext::new();
        let mut cube_mesh = GpuMesh::new();
        cube_mesh.create(&gl, &cube::generate([0.0; 3], 1.0));
        let camera = Camera::new([0.0; 3], 5.0);
        gl.take_calls();

        renderer.clear(&gl);
        renderer.render(
            &gl,
            &mut ctx,
            &camera,
            0.0,
            [1.0, 0.0, 0.0, 1.0],
            &program,
            &[&cube_mesh],
        );

        assert_eq!(gl.count(|c| matches!(c, GlCall::Clear(_))), 1);
        let view_proj = gl.uniform("u_ViewProj");
        let model = gl.uniform("u_Model");
        let inv_tr = gl.uniform("u_ModelInvTr");
        let uploads = gl.matrix_uploads();
        assert_eq!(uploads.iter().filter(|(l, _)| *l == view_proj).count(), 1);
        assert_eq!(uploads.iter().filter(|(l, _)| *l == model).count(), 1);
        assert_eq!(uploads.iter().filter(|(l, _)| *l == inv_tr).count(), 1);
        assert_eq!(gl.count(|c| matches!(c, GlCall::Uniform4 { .. })), 1);
        assert_eq!(gl.count(|c| matches!(c, GlCall::Uniform1 { .. })), 1);
        assert_eq!(
            gl.filter(|c| matches!(c, GlCall::DrawElements { .. })),
            vec![GlCall::DrawElements {
                mode: glow::TRIANGLES,
                count: 36,
                element_type: glow::UNSIGNED_INT,
            }]
        );
        // the whole frame ran on a single program activation
        assert_eq!(gl.count(|c| matches!(c, GlCall::UseProgram(_))), 1);
    }

    #[test]
    fn frame_uniforms_precede_model_and_draw() {
        let gl = RecordingGl::new();
        let renderer = Renderer::new(640, 480);
        let program = ShaderProgram::new(&gl, "vert", "frag").unwrap();
        let mut ctx = RenderContext::new();
        let mut mesh = GpuMesh::new();
        mesh.create(&gl, &cube::generate([0.0; 3], 1.0));
        let camera = Camera::new([0.0; 3], 5.0);
        gl.take_calls();

        renderer.render(&gl, &mut ctx, &camera, 1.0, [0.0; 4], &program, &[&mesh]);

        let calls = gl.calls();
        let view_proj = gl.uniform("u_ViewProj");
        let model = gl.uniform("u_Model");
        let vp_at = calls
            .iter()
            .position(|c| matches!(c, GlCall::UniformMatrix { location, .. } if *location == view_proj))
            .unwrap();
        let model_at = calls
            .iter()
            .position(|c| matches!(c, GlCall::UniformMatrix { location, .. } if *location == model))
            .unwrap();
        let draw_at = calls
            .iter()
            .position(|c| matches!(c, GlCall::DrawElements { .. }))
            .unwrap();
        assert!(vp_at < model_at && model_at < draw_at);
    }
}

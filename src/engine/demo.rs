use log::{debug, info};

use crate::engine::camera::Camera;
use crate::engine::controls::Controls;
use crate::engine::error::ShaderError;
use crate::engine::geometry::GeometryKind;
use crate::engine::rendering::drawable::Drawable;
use crate::engine::rendering::gl_api::GlApi;
use crate::engine::rendering::render_context::RenderContext;
use crate::engine::rendering::renderer::Renderer;
use crate::engine::rendering::shader_program::ShaderProgram;
use crate::engine::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShaderKind {
    Lambert,
    Deform,
}

impl ShaderKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lambert" => Some(Self::Lambert),
            "deform" => Some(Self::Deform),
            _ => None,
        }
    }
}

/// The whole demo behind the window: both shader programs, the geometry
/// cache, camera, controls and the frame counter. One `tick` is one frame.
pub struct Demo<G: GlApi> {
    ctx: RenderContext<G>,
    renderer: Renderer,
    lambert: ShaderProgram<G>,
    deform: ShaderProgram<G>,
    scene: Scene<G>,
    camera: Camera,
    controls: Controls,
    time: u32,
}

impl<G: GlApi> Demo<G> {
    /// Set up GL state, compile both shader pairs and upload the initial
    /// geometry. A compile or link failure aborts startup; anything already
    /// allocated is released before the error propagates.
    pub fn new(gl: &G, width: u32, height: u32) -> Result<Self, ShaderError> {
        let mut ctx = RenderContext::new();
        let mut renderer = Renderer::new(width, height);
        renderer.init(gl);
        renderer.set_clear_color(gl, 0.2, 0.2, 0.2, 1.0);

        let lambert = ShaderProgram::new(
            gl,
            include_str!("../assets/shaders/vertex_lambert.glsl"),
            include_str!("../assets/shaders/fragment_lambert.glsl"),
        )?;
        let deform = match ShaderProgram::new(
            gl,
            include_str!("../assets/shaders/vertex_deform.glsl"),
            include_str!("../assets/shaders/fragment_deform.glsl"),
        ) {
            Ok(program) => program,
            Err(e) => {
                lambert.destroy(gl, &mut ctx);
                return Err(e);
            }
        };
        info!("shader programs compiled and linked");

        let controls = Controls::default();
        let scene = Scene::new(gl, &controls);
        let mut camera = Camera::new([0.0; 3], 5.0);
        camera.set_aspect(width, height);
        info!("scene loaded");

        Ok(Self {
            ctx,
            renderer,
            lambert,
            deform,
            scene,
            camera,
            controls,
            time: 0,
        })
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.set_size(width, height);
        self.camera.set_aspect(width, height);
    }

    /// Reload the scene: restore the default controls and regenerate every
    /// geometry from them.
    pub fn reset(&mut self, gl: &G) {
        self.controls = Controls::default();
        self.scene.rebuild(gl, &self.controls);
        info!("scene reloaded");
    }

    /// One frame: advance the camera, clear, resolve the current selections
    /// and draw. An unknown shader name falls back to lambert; an unknown
    /// geometry name skips drawing for just this frame. The frame counter
    /// advances either way.
    pub fn tick(&mut self, gl: &G) {
        self.camera.update();
        self.renderer.apply_viewport(gl);
        self.renderer.clear(gl);

        let program = match ShaderKind::from_name(&self.controls.shader) {
            Some(ShaderKind::Deform) => &self.deform,
            Some(ShaderKind::Lambert) => &self.lambert,
            None => &self.lambert,
        };
        let color = self.controls.color_f32();

        self.scene.sync(gl, &self.controls);
        if let Some(kind) = GeometryKind::from_name(&self.controls.geometry) {
            let drawable: &dyn Drawable<G> = self.scene.drawable(kind);
            self.renderer.render(
                gl,
                &mut self.ctx,
                &self.camera,
                self.time as f32,
                color,
                program,
                &[drawable],
            );
        } else {
            debug!("unknown geometry '{}', skipping frame", self.controls.geometry);
        }

        self.time = self.time.wrapping_add(1);
    }

    /// Release every GPU resource the demo owns. Call with the GL context
    /// still current, before the surface goes away.
    pub fn destroy(mut self, gl: &G) {
        self.scene.destroy(gl);
        self.lambert.destroy(gl, &mut self.ctx);
        self.deform.destroy(gl, &mut self.ctx);
    }
}

use super::gl_api::GlApi;

/// Tracks the last program activated on the GL context so consecutive binds
/// of the same program issue at most one `use_program` call. Threaded
/// explicitly through every bind/draw instead of living in a global.
pub struct RenderContext<G: GlApi> {
    active: Option<G::Program>,
}

impl<G: GlApi> RenderContext<G> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn bind_program(&mut self, gl: &G, program: G::Program) {
        if self.active != Some(program) {
            gl.use_program(Some(program));
            self.active = Some(program);
        }
    }

    /// Forget a program that is about to be deleted.
    pub fn invalidate(&mut self, program: G::Program) {
        if self.active == Some(program) {
            self.active = None;
        }
    }
}

impl<G: GlApi> Default for RenderContext<G> {
    fn default() -> Self {
        Self::new()
    }
}

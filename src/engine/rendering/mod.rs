pub mod drawable;
pub mod gl_api;
pub mod render_context;
pub mod renderer;
pub mod shader_program;

#[cfg(test)]
pub mod test_gl;

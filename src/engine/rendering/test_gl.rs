//! Call-recording stand-in for the GL context, used to assert on the exact
//! sequence of GPU calls the renderer issues.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::gl_api::GlApi;

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader { shader: u32, shader_type: u32 },
    DeleteShader(u32),
    CreateProgram(u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    CreateBuffer(u32),
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, len: usize },
    DeleteBuffer(u32),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer { index: u32, size: i32 },
    DrawElements { mode: u32, count: i32, element_type: u32 },
    UniformMatrix { location: u32, value: [f32; 16] },
    Uniform4 { location: u32, value: [f32; 4] },
    Uniform1 { location: u32, value: f32 },
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    Enable(u32),
    DepthFunc(u32),
}

/// Fake GL context with integer handles. Attribute and uniform names resolve
/// through configurable tables, so tests can model shaders that do not use a
/// given input.
#[derive(Debug)]
pub struct RecordingGl {
    next_handle: Cell<u32>,
    calls: RefCell<Vec<GlCall>>,
    attribs: RefCell<HashMap<String, u32>>,
    uniforms: RefCell<HashMap<String, u32>>,
    compile_ok: Cell<bool>,
    link_ok: Cell<bool>,
    info_log: RefCell<String>,
}

impl RecordingGl {
    /// A context whose "driver" knows every attribute and uniform the demo
    /// shaders declare.
    pub fn new() -> Self {
        let attribs = [("vs_Pos", 0), ("vs_Nor", 1), ("vs_Col", 2)];
        let uniforms = [
            ("u_Model", 10),
            ("u_ModelInvTr", 11),
            ("u_ViewProj", 12),
            ("u_Color", 13),
            ("u_Time", 14),
        ];
        Self {
            next_handle: Cell::new(1),
            calls: RefCell::new(Vec::new()),
            attribs: RefCell::new(
                attribs.iter().map(|(n, l)| (n.to_string(), *l)).collect(),
            ),
            uniforms: RefCell::new(
                uniforms.iter().map(|(n, l)| (n.to_string(), *l)).collect(),
            ),
            compile_ok: Cell::new(true),
            link_ok: Cell::new(true),
            info_log: RefCell::new(String::new()),
        }
    }

    /// Remove an attribute or uniform name, as if the compiled shader did not
    /// use it.
    pub fn without(self, name: &str) -> Self {
        self.attribs.borrow_mut().remove(name);
        self.uniforms.borrow_mut().remove(name);
        self
    }

    pub fn fail_compile(&self, log: &str) {
        self.compile_ok.set(false);
        *self.info_log.borrow_mut() = log.to_string();
    }

    pub fn fail_link(&self, log: &str) {
        self.link_ok.set(false);
        *self.info_log.borrow_mut() = log.to_string();
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    /// Drain the recorded calls, so a test can scope assertions to the code
    /// under test rather than the setup.
    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn filter(&self, pred: impl Fn(&GlCall) -> bool) -> Vec<GlCall> {
        self.calls.borrow().iter().filter(|c| pred(c)).cloned().collect()
    }

    /// Matrix uploads in issue order as `(location, value)` pairs.
    pub fn matrix_uploads(&self) -> Vec<(u32, [f32; 16])> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                GlCall::UniformMatrix { location, value } => Some((*location, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn uniform(&self, name: &str) -> u32 {
        self.uniforms.borrow()[name]
    }

    fn handle(&self) -> u32 {
        let h = self.next_handle.get();
        self.next_handle.set(h + 1);
        h
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self::new()
    }
}

impl GlApi for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let h = self.handle();
        self.record(GlCall::CreateShader { shader: h, shader_type });
        Ok(h)
    }

    fn shader_source(&self, _shader: u32, _source: &str) {}

    fn compile_shader(&self, _shader: u32) {}

    fn get_shader_compile_status(&self, _shader: u32) -> bool {
        self.compile_ok.get()
    }

    fn get_shader_info_log(&self, _shader: u32) -> String {
        self.info_log.borrow().clone()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let h = self.handle();
        self.record(GlCall::CreateProgram(h));
        Ok(h)
    }

    fn attach_shader(&self, _program: u32, _shader: u32) {}

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
    }

    fn get_program_link_status(&self, _program: u32) -> bool {
        self.link_ok.get()
    }

    fn get_program_info_log(&self, _program: u32) -> String {
        self.info_log.borrow().clone()
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(GlCall::UseProgram(program));
    }

    fn get_attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attribs.borrow().get(name).copied()
    }

    fn get_uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.uniforms.borrow().get(name).copied()
    }

    fn uniform_matrix_4_f32_slice(&self, location: Option<&u32>, _transpose: bool, value: &[f32]) {
        if let Some(&location) = location {
            self.record(GlCall::UniformMatrix {
                location,
                value: value.try_into().expect("expected a 4x4 matrix"),
            });
        }
    }

    fn uniform_4_f32_slice(&self, location: Option<&u32>, value: &[f32]) {
        if let Some(&location) = location {
            self.record(GlCall::Uniform4 {
                location,
                value: value.try_into().expect("expected a vec4"),
            });
        }
    }

    fn uniform_1_f32(&self, location: Option<&u32>, value: f32) {
        if let Some(&location) = location {
            self.record(GlCall::Uniform1 { location, value });
        }
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let h = self.handle();
        self.record(GlCall::CreateBuffer(h));
        Ok(h)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(GlCall::BindBuffer { target, buffer });
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], _usage: u32) {
        self.record(GlCall::BufferData { target, len: data.len() });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableAttrib(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::DisableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        _data_type: u32,
        _normalized: bool,
        _stride: i32,
        _offset: i32,
    ) {
        self.record(GlCall::AttribPointer { index, size });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, _offset: i32) {
        self.record(GlCall::DrawElements { mode, count, element_type });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(GlCall::Clear(mask));
    }

    fn enable(&self, cap: u32) {
        self.record(GlCall::Enable(cap));
    }

    fn depth_func(&self, func: u32) {
        self.record(GlCall::DepthFunc(func));
    }
}

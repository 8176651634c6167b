use crate::engine::utils::math::{
    mat4x4_look_at, mat4x4_mul, mat4x4_perspective, Mat4x4,
};

/// Orbit camera: sits at `distance` from the target along a yaw/pitch
/// direction and always looks at the target. The combined view-projection
/// matrix is cached and refreshed by `update`.
pub struct Camera {
    target: [f32; 3],
    distance: f32,
    yaw: f32,
    pitch: f32,
    fovy: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view_proj: Mat4x4,
}

impl Camera {
    pub fn new(target: [f32; 3], distance: f32) -> Self {
        let mut camera = Self {
            target,
            distance,
            yaw: 0.0,
            pitch: 0.0,
            fovy: 45.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            view_proj: [0.0; 16],
        };
        camera.update();
        camera
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
        self.update();
    }

    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        // stay short of straight up/down to keep the view basis stable
        self.pitch = (self.pitch + pitch_delta).clamp(-1.5, 1.5);
        self.update();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(0.5, 100.0);
        self.update();
    }

    pub fn update(&mut self) {
        let eye = [
            self.target[0] + self.distance * self.pitch.cos() * self.yaw.sin(),
            self.target[1] + self.distance * self.pitch.sin(),
            self.target[2] + self.distance * self.pitch.cos() * self.yaw.cos(),
        ];
        let view = mat4x4_look_at(eye, self.target, [0.0, 1.0, 0.0]);
        let proj = mat4x4_perspective(self.fovy, self.aspect, self.near, self.far);
        self.view_proj = mat4x4_mul(proj, view);
    }

    pub fn view_proj(&self) -> Mat4x4 {
        self.view_proj
    }
}

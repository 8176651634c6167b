/// Current values of the user-facing tuning parameters. The render core only
/// reads this; mutation happens in the host's keyboard handler. Shader and
/// geometry stay as free-form names on purpose: an unrecognized value must
/// degrade gracefully downstream instead of failing here.
pub struct Controls {
    pub tessellations: u32,
    pub radius: f32,
    pub shader: String,
    pub geometry: String,
    pub color: [u8; 3],
}

const GEOMETRIES: [&str; 3] = ["icosphere", "cube", "square"];
const SHADERS: [&str; 2] = ["lambert", "deform"];
const COLOR_PRESETS: [[u8; 3]; 4] = [
    [221, 163, 32],
    [66, 134, 244],
    [196, 46, 46],
    [92, 196, 90],
];

impl Default for Controls {
    fn default() -> Self {
        Self {
            tessellations: 5,
            radius: 1.0,
            shader: SHADERS[0].to_string(),
            geometry: GEOMETRIES[0].to_string(),
            color: COLOR_PRESETS[0],
        }
    }
}

impl Controls {
    pub fn cycle_geometry(&mut self) {
        self.geometry = cycle(&GEOMETRIES, &self.geometry).to_string();
    }

    pub fn cycle_shader(&mut self) {
        self.shader = cycle(&SHADERS, &self.shader).to_string();
    }

    pub fn cycle_color(&mut self) {
        let at = COLOR_PRESETS.iter().position(|c| *c == self.color);
        self.color = COLOR_PRESETS[at.map_or(0, |i| (i + 1) % COLOR_PRESETS.len())];
    }

    pub fn step_radius(&mut self, delta: f32) {
        self.radius = (self.radius + delta).clamp(0.0, 10.0);
    }

    pub fn step_tessellations(&mut self, delta: i32) {
        self.tessellations = self.tessellations.saturating_add_signed(delta).min(8);
    }

    /// Channels scaled from 0-255 to the 0-1 floats the shader expects,
    /// alpha fixed at 1.
    pub fn color_f32(&self) -> [f32; 4] {
        [
            self.color[0] as f32 / 255.0,
            self.color[1] as f32 / 255.0,
            self.color[2] as f32 / 255.0,
            1.0,
        ]
    }
}

fn cycle<'a>(options: &[&'a str], current: &str) -> &'a str {
    let at = options.iter().position(|o| *o == current);
    options[at.map_or(0, |i| (i + 1) % options.len())]
}

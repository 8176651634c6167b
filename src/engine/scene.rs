use log::debug;

use crate::engine::controls::Controls;
use crate::engine::geometry::{cube, icosphere, square, GeometryKind};
use crate::engine::rendering::drawable::GpuMesh;
use crate::engine::rendering::gl_api::GlApi;

const ORIGIN: [f32; 3] = [0.0; 3];

/// Holds the GPU copy of each selectable geometry and regenerates one when
/// its driving parameter changes. `GpuMesh::create` releases the previous
/// buffers before allocating, so a parameter change swaps the allocation
/// instead of leaking it.
pub struct Scene<G: GlApi> {
    icosphere: GpuMesh<G>,
    cube: GpuMesh<G>,
    square: GpuMesh<G>,
    prev_tessellations: u32,
    prev_radius: f32,
}

impl<G: GlApi> Scene<G> {
    pub fn new(gl: &G, controls: &Controls) -> Self {
        let mut scene = Self {
            icosphere: GpuMesh::new(),
            cube: GpuMesh::new(),
            square: GpuMesh::new(),
            prev_tessellations: controls.tessellations,
            prev_radius: controls.radius,
        };
        scene.rebuild(gl, controls);
        scene
    }

    /// Regenerate every geometry from the given parameters, regardless of
    /// what changed. Used at startup and when the scene is reloaded.
    pub fn rebuild(&mut self, gl: &G, controls: &Controls) {
        self.prev_tessellations = controls.tessellations;
        self.prev_radius = controls.radius;
        self.icosphere
            .create(gl, &icosphere::generate(ORIGIN, 1.0, controls.tessellations));
        self.cube.create(gl, &cube::generate(ORIGIN, controls.radius));
        self.square.create(gl, &square::generate(ORIGIN, 1.0));
    }

    /// Re-upload exactly the geometries whose parameters changed since the
    /// last call; a no-op when nothing did.
    pub fn sync(&mut self, gl: &G, controls: &Controls) {
        if controls.tessellations != self.prev_tessellations {
            self.prev_tessellations = controls.tessellations;
            self.icosphere
                .create(gl, &icosphere::generate(ORIGIN, 1.0, controls.tessellations));
            debug!("rebuilt icosphere at {} subdivisions", controls.tessellations);
        }
        if controls.radius != self.prev_radius {
            self.prev_radius = controls.radius;
            self.cube.create(gl, &cube::generate(ORIGIN, controls.radius));
            debug!("rebuilt cube with radius {}", controls.radius);
        }
    }

    pub fn drawable(&self, kind: GeometryKind) -> &GpuMesh<G> {
        match kind {
            GeometryKind::Icosphere => &self.icosphere,
            GeometryKind::Cube => &self.cube,
            GeometryKind::Square => &self.square,
        }
    }

    pub fn destroy(&mut self, gl: &G) {
        self.icosphere.destroy(gl);
        self.cube.destroy(gl);
        self.square.destroy(gl);
    }
}

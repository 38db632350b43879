use crate::camera::Camera;
use crate::scene_graph::scene::Scene;

/// Counters for one drawn frame, consumed by the performance monitor.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub nodes_drawn: usize,
    pub primitives_drawn: usize,
    pub triangles_drawn: u32,
}

/// Headless draw pass: per-frame distance selection over the attached LOD
/// nodes. This is the only part of the scene the renderer touches after
/// assembly, and it only reads.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, scene: &Scene, camera: &Camera) -> RenderStats {
        let mut stats = RenderStats::default();

        for node in scene.lods() {
            let distance = camera.distance_to(node.transform().translation);
            let Some(level) = node.select(distance) else {
                continue;
            };

            stats.nodes_drawn += 1;
            stats.primitives_drawn += 1;
            if let Some(mesh) = scene.mesh(level.primitive.mesh) {
                stats.triangles_drawn += mesh.triangle_count();
            }
            log::trace!(
                "{} at {:.1} wu -> {}",
                node.name,
                distance,
                level.primitive.name
            );
        }

        stats
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

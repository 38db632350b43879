use glam::Mat4;
use id_arena::Id;

use crate::model::MeshId;
use crate::scene_graph::transform::Transform;

/// A primitive re-homed under a LOD node. Its local transform is always
/// identity after assembly, so only the owning node's transform contributes
/// to final placement.
pub struct LodPrimitive {
    pub name: String,
    pub mesh: MeshId,
    #[allow(dead_code)]
    pub local: Transform,
}

pub struct LodLevel {
    pub threshold: f32,
    pub primitive: LodPrimitive,
}

pub type LodNodeId = Id<LodNode>;

/// One distance-switched object: a world transform plus its resolution
/// levels, ascending by distance threshold. Immutable once attached to the
/// scene.
pub struct LodNode {
    pub name: String,
    transform: Transform,
    levels: Vec<LodLevel>,
}

impl LodNode {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            levels: Vec::new(),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[allow(dead_code)]
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// Inserts a level, keeping the list ascending by threshold. Levels with
    /// equal thresholds keep insertion order.
    pub fn add_level(&mut self, threshold: f32, primitive: LodPrimitive) {
        let at = self
            .levels
            .partition_point(|level| level.threshold <= threshold);
        self.levels.insert(at, LodLevel { threshold, primitive });
    }

    #[allow(dead_code)]
    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    #[allow(dead_code)]
    pub fn primitive_count(&self) -> usize {
        self.levels.len()
    }

    /// Picks the level with the largest threshold not exceeding the viewer
    /// distance, falling back to the finest level when the viewer is closer
    /// than every threshold.
    pub fn select(&self, distance: f32) -> Option<&LodLevel> {
        let mut chosen = None;
        for level in &self.levels {
            if level.threshold <= distance {
                chosen = Some(level);
            } else {
                break;
            }
        }
        chosen.or_else(|| self.levels.first())
    }
}

use id_arena::Arena;

use crate::lod::builder::Assembly;
use crate::lod::node::{LodNode, LodNodeId};
use crate::model::{Mesh, MeshId};

/// The scene container owned by the frame-loop driver. Holds the mesh data
/// and the attached LOD nodes; one assembly is attached per session.
pub struct Scene {
    meshes: Arena<Mesh>,
    lods: Arena<LodNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: Arena::new(),
            lods: Arena::new(),
        }
    }

    /// Moves a finished assembly into the scene. Runs to completion before
    /// the frame loop reads the scene again, so readers never observe a
    /// half-attached assembly.
    pub fn attach(&mut self, assembly: Assembly) -> Vec<LodNodeId> {
        self.meshes = assembly.meshes;
        assembly
            .nodes
            .into_iter()
            .map(|node| self.lods.alloc(node))
            .collect()
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    #[allow(dead_code)]
    pub fn lod(&self, id: LodNodeId) -> Option<&LodNode> {
        self.lods.get(id)
    }

    pub fn lods(&self) -> impl Iterator<Item = &LodNode> {
        self.lods.iter().map(|(_, node)| node)
    }

    pub fn lod_count(&self) -> usize {
        self.lods.len()
    }

    #[allow(dead_code)]
    pub fn get_lod_by_name(&self, name: &str) -> Option<LodNodeId> {
        self.lods
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

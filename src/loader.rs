use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;

use crate::model::{Mesh, MeshId};
use crate::scene_graph::node::{SourceNode, SourceNodeId};
use crate::scene_graph::transform::Transform;

/// One named mesh instance from the loaded document, in traversal order.
/// The compound name carries the logical object and its resolution tier,
/// e.g. `"pump;hires"`.
pub struct Primitive {
    pub name: String,
    pub mesh: MeshId,
    pub node: SourceNodeId,
    pub local: Transform,
}

impl Primitive {
    /// Composes the full ancestor chain into a world-space matrix.
    pub fn world_matrix(&self, nodes: &Arena<SourceNode>) -> Mat4 {
        compose_world_matrix(nodes, self.node)
    }
}

fn compose_world_matrix(nodes: &Arena<SourceNode>, node: SourceNodeId) -> Mat4 {
    let mut chain = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        chain.push(id);
        current = nodes[id].parent;
    }

    let mut matrix = Mat4::IDENTITY;
    for id in chain.iter().rev() {
        matrix *= nodes[*id].transform.matrix();
    }
    matrix
}

/// The flat result of a single load: mesh data, the source node hierarchy and
/// the mesh-bearing primitives in document traversal order.
pub struct LoadedModel {
    nodes: Arena<SourceNode>,
    meshes: Arena<Mesh>,
    primitives: Vec<Primitive>,
}

pub struct LoadedModelParts {
    pub nodes: Arena<SourceNode>,
    pub meshes: Arena<Mesh>,
    pub primitives: Vec<Primitive>,
}

impl LoadedModel {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            meshes: Arena::new(),
            primitives: Vec::new(),
        }
    }

    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<SourceNodeId>,
    ) -> SourceNodeId {
        self.nodes.alloc(SourceNode {
            name: name.into(),
            transform,
            parent,
        })
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.alloc(mesh)
    }

    pub fn add_primitive(&mut self, mesh: MeshId, node: SourceNodeId) {
        let source = &self.nodes[node];
        self.primitives.push(Primitive {
            name: source.name.clone(),
            mesh,
            node,
            local: source.transform,
        });
    }

    #[allow(dead_code)]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    #[allow(dead_code)]
    pub fn world_matrix(&self, node: SourceNodeId) -> Mat4 {
        compose_world_matrix(&self.nodes, node)
    }

    pub fn into_parts(self) -> LoadedModelParts {
        LoadedModelParts {
            nodes: self.nodes,
            meshes: self.meshes,
            primitives: self.primitives,
        }
    }
}

impl Default for LoadedModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_gltf(path: &Path) -> anyhow::Result<LoadedModel> {
    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("No scenes in glTF document")?;

    let mut model = LoadedModel::new();
    let mut gltf_mesh_ids: HashMap<usize, MeshId> = HashMap::new();

    for node in scene.nodes() {
        visit_gltf_node(&mut model, &mut gltf_mesh_ids, &buffers, &node, None)?;
    }

    log::info!(
        "loaded {}: {} meshes, {} primitives",
        path.display(),
        gltf_mesh_ids.len(),
        model.primitive_count()
    );

    Ok(model)
}

fn visit_gltf_node(
    model: &mut LoadedModel,
    gltf_mesh_ids: &mut HashMap<usize, MeshId>,
    buffers: &[gltf::buffer::Data],
    node: &gltf::Node,
    parent: Option<SourceNodeId>,
) -> anyhow::Result<()> {
    let name = node
        .name()
        .map(String::from)
        .or_else(|| node.mesh().and_then(|mesh| mesh.name().map(String::from)))
        .unwrap_or_else(|| format!("node-{}", node.index()));

    let (translation, rotation, scale) = node.transform().decomposed();
    let transform = Transform::new(
        Vec3::from(translation),
        Quat::from_array(rotation),
        Vec3::from(scale),
    );

    let node_id = model.add_node(name.clone(), transform, parent);

    if let Some(mesh) = node.mesh() {
        let mesh_index = mesh.index();

        let mesh_id = match gltf_mesh_ids.get(&mesh_index).copied() {
            Some(mesh_id) => mesh_id,
            None => {
                let data = Mesh::from_gltf(name, mesh, buffers)?;
                log::debug!(
                    "mesh {}: {} vertices, {} triangles",
                    data.name,
                    data.vertex_count(),
                    data.triangle_count()
                );
                let mesh_id = model.add_mesh(data);
                gltf_mesh_ids.insert(mesh_index, mesh_id);
                mesh_id
            }
        };

        model.add_primitive(mesh_id, node_id);
    }

    for child in node.children() {
        visit_gltf_node(model, gltf_mesh_ids, buffers, &child, Some(node_id))?;
    }

    Ok(())
}

/// Runs the load on a background thread. The returned channel delivers the
/// result exactly once; the frame loop polls it with `try_recv`.
pub fn spawn_load(path: PathBuf) -> mpsc::Receiver<anyhow::Result<LoadedModel>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = load_gltf(&path);
        // The receiver going away means the session already ended.
        let _ = tx.send(result);
    });

    rx
}

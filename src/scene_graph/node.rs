use id_arena::Id;

use crate::scene_graph::transform::Transform;

pub type SourceNodeId = Id<SourceNode>;

/// A node of the loaded document hierarchy. Kept around after loading so the
/// accumulated world transform of any node can be recomputed on demand.
pub struct SourceNode {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<SourceNodeId>,
}

pub mod builder;
pub mod grouping;
pub mod name;
pub mod node;

use thiserror::Error;

use crate::lod::name::ResolutionTag;

/// A per-object problem found while assembling LOD nodes. Issues never abort
/// the pass; the affected object (or primitive) is skipped and its siblings
/// are assembled normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyIssue {
    #[error("primitive name {name:?} does not split into \"object;resolution\"")]
    MalformedName { name: String },

    #[error("object {object:?} has no \"hires\" entry, skipping it")]
    MissingCanonicalResolution { object: String },

    #[error("object {object:?} has more than one {tag} primitive, keeping the later one")]
    DuplicateResolutionOverwrite { object: String, tag: ResolutionTag },
}

/// Summary of one assembly pass over a loaded primitive list.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub primitives_in: usize,
    pub nodes_built: usize,
    pub primitives_placed: usize,
    pub issues: Vec<AssemblyIssue>,
}

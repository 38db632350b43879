use std::collections::HashMap;

use crate::loader::Primitive;
use crate::lod::name::{parse_compound_name, ResolutionTag};
use crate::lod::AssemblyIssue;

/// All primitives of one logical object, keyed by resolution tag in
/// first-seen order. Inserting an already present tag replaces the primitive
/// in place and keeps its original slot, so level order is stable under
/// overwrites.
pub struct ObjectGroup {
    pub object: String,
    levels: Vec<(ResolutionTag, Primitive)>,
}

impl ObjectGroup {
    fn new(object: String) -> Self {
        Self {
            object,
            levels: Vec::new(),
        }
    }

    /// Last write wins; returns the replaced primitive, if any.
    pub fn insert(&mut self, tag: ResolutionTag, primitive: Primitive) -> Option<Primitive> {
        match self.levels.iter_mut().find(|(existing, _)| *existing == tag) {
            Some((_, slot)) => Some(std::mem::replace(slot, primitive)),
            None => {
                self.levels.push((tag, primitive));
                None
            }
        }
    }

    pub fn hires(&self) -> Option<&Primitive> {
        self.levels
            .iter()
            .find(|(tag, _)| tag.is_hires())
            .map(|(_, primitive)| primitive)
    }

    #[allow(dead_code)]
    pub fn levels(&self) -> &[(ResolutionTag, Primitive)] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<(ResolutionTag, Primitive)> {
        self.levels
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Immutable result of one grouping pass: groups in first-seen object order
/// plus the per-primitive issues hit along the way.
pub struct Grouping {
    pub groups: Vec<ObjectGroup>,
    pub issues: Vec<AssemblyIssue>,
}

/// Folds the primitive list into per-object groups. Consumes the list in
/// loader traversal order; a malformed name skips that primitive only.
pub fn group_primitives(primitives: Vec<Primitive>) -> Grouping {
    let mut groups: Vec<ObjectGroup> = Vec::new();
    let mut issues = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for primitive in primitives {
        let (object, tag) = match parse_compound_name(&primitive.name) {
            Ok(parsed) => parsed,
            Err(issue) => {
                issues.push(issue);
                continue;
            }
        };

        let slot = *slots.entry(object.clone()).or_insert_with(|| {
            groups.push(ObjectGroup::new(object.clone()));
            groups.len() - 1
        });

        if groups[slot].insert(tag.clone(), primitive).is_some() {
            issues.push(AssemblyIssue::DuplicateResolutionOverwrite { object, tag });
        }
    }

    Grouping { groups, issues }
}

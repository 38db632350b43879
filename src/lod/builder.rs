use id_arena::Arena;

use crate::loader::LoadedModel;
use crate::lod::grouping::{group_primitives, Grouping};
use crate::lod::name::ResolutionTag;
use crate::lod::node::{LodNode, LodPrimitive};
use crate::lod::{AssemblyIssue, AssemblyReport};
use crate::model::Mesh;
use crate::scene_graph::transform::Transform;

/// Distance band table. The canonical resolution is always shown up close;
/// every other tag shares one coarser band.
pub const HIRES_DISTANCE: f32 = 0.0;
pub const LOWRES_DISTANCE: f32 = 5.0;

pub fn band_distance(tag: &ResolutionTag) -> f32 {
    match tag {
        ResolutionTag::Hires => HIRES_DISTANCE,
        ResolutionTag::Lowres(_) => LOWRES_DISTANCE,
    }
}

/// Everything the scene needs from one load: the mesh data, the finished LOD
/// nodes and a report of what happened along the way.
pub struct Assembly {
    pub meshes: Arena<Mesh>,
    pub nodes: Vec<LodNode>,
    pub report: AssemblyReport,
}

/// Groups the loaded primitives by object and builds one LOD node per group
/// that has a hires entry. The node takes its placement from the hires
/// primitive's accumulated world transform; every member primitive is
/// re-homed to an identity local transform. Per-object failures skip that
/// object only.
pub fn assemble(model: LoadedModel) -> Assembly {
    let parts = model.into_parts();
    let primitives_in = parts.primitives.len();

    let Grouping { groups, mut issues } = group_primitives(parts.primitives);

    let mut nodes = Vec::new();
    let mut primitives_placed = 0;

    for group in groups {
        let placement = match group.hires() {
            Some(hires) => Transform::from_matrix(hires.world_matrix(&parts.nodes)),
            None => {
                issues.push(AssemblyIssue::MissingCanonicalResolution {
                    object: group.object.clone(),
                });
                continue;
            }
        };

        let mut node = LodNode::new(group.object.clone(), placement);
        for (tag, mut primitive) in group.into_levels() {
            // Re-home: the node transform alone places the primitive now.
            primitive.local = Transform::IDENTITY;
            node.add_level(
                band_distance(&tag),
                LodPrimitive {
                    name: primitive.name,
                    mesh: primitive.mesh,
                    local: primitive.local,
                },
            );
            primitives_placed += 1;
        }
        nodes.push(node);
    }

    let report = AssemblyReport {
        primitives_in,
        nodes_built: nodes.len(),
        primitives_placed,
        issues,
    };

    Assembly {
        meshes: parts.meshes,
        nodes,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeshPrimitive;
    use glam::{Mat4, Quat, Vec3};
    use std::f32::consts::FRAC_PI_4;

    fn test_mesh(name: &str) -> Mesh {
        Mesh {
            name: name.to_string(),
            primitives: vec![MeshPrimitive {
                index: 0,
                vertices: Vec::new(),
                indices: vec![0, 1, 2],
            }],
        }
    }

    fn model_with(primitives: &[(&str, Transform)]) -> LoadedModel {
        let mut model = LoadedModel::new();
        for (name, transform) in primitives {
            let node = model.add_node(*name, *transform, None);
            let mesh = model.add_mesh(test_mesh(name));
            model.add_primitive(mesh, node);
        }
        model
    }

    fn pump_transform() -> Transform {
        Transform::new(
            Vec3::new(12.0, 0.0, -3.0),
            Quat::from_axis_angle(Vec3::Y, FRAC_PI_4),
            Vec3::new(1.0, 2.0, 1.0),
        )
    }

    #[test]
    fn builds_one_node_with_both_bands() {
        // Scenario: one object with a hires and a lowres primitive.
        let model = model_with(&[
            ("pump;hires", pump_transform()),
            ("pump;lowres", Transform::from_translation(Vec3::ONE)),
        ]);

        let assembly = assemble(model);

        assert!(assembly.report.issues.is_empty());
        assert_eq!(assembly.nodes.len(), 1);

        let node = &assembly.nodes[0];
        assert_eq!(node.name, "pump");
        assert_eq!(node.primitive_count(), 2);

        let thresholds: Vec<f32> = node.levels().iter().map(|level| level.threshold).collect();
        assert_eq!(thresholds, vec![HIRES_DISTANCE, LOWRES_DISTANCE]);
        assert_eq!(node.levels()[0].primitive.name, "pump;hires");
        assert_eq!(node.levels()[1].primitive.name, "pump;lowres");

        // Placement comes from the hires world transform.
        let expected = pump_transform();
        assert!(node
            .transform()
            .translation
            .abs_diff_eq(expected.translation, 1e-5));
        assert!(node.transform().rotation.abs_diff_eq(expected.rotation, 1e-5));
        assert!(node.transform().scale.abs_diff_eq(expected.scale, 1e-5));

        // Members are re-homed to identity.
        assert!(node.levels().iter().all(|l| l.primitive.local.is_identity()));
    }

    #[test]
    fn object_without_hires_is_skipped_without_disturbing_siblings() {
        let model = model_with(&[
            ("valve;lowres", Transform::IDENTITY),
            ("pump;hires", pump_transform()),
        ]);

        let assembly = assemble(model);

        assert_eq!(assembly.nodes.len(), 1);
        assert_eq!(assembly.nodes[0].name, "pump");
        assert_eq!(
            assembly.report.issues,
            vec![AssemblyIssue::MissingCanonicalResolution {
                object: "valve".to_string()
            }]
        );
    }

    #[test]
    fn malformed_only_object_produces_nothing_and_disrupts_nothing() {
        let model = model_with(&[
            ("orphan", Transform::IDENTITY),
            ("tank;hires", Transform::IDENTITY),
        ]);

        let assembly = assemble(model);

        assert_eq!(assembly.nodes.len(), 1);
        assert_eq!(assembly.nodes[0].name, "tank");
        assert_eq!(assembly.report.primitives_in, 2);
        assert_eq!(assembly.report.primitives_placed, 1);
        assert_eq!(
            assembly.report.issues,
            vec![AssemblyIssue::MalformedName {
                name: "orphan".to_string()
            }]
        );
    }

    #[test]
    fn duplicate_hires_keeps_only_the_later_primitive() {
        let model = model_with(&[
            ("tank;hires", Transform::from_translation(Vec3::X)),
            ("tank;hires", Transform::from_translation(Vec3::Z * 9.0)),
        ]);

        let assembly = assemble(model);

        assert_eq!(assembly.nodes.len(), 1);
        let node = &assembly.nodes[0];
        assert_eq!(node.primitive_count(), 1);
        // The later primitive's transform anchors the node.
        assert!(node
            .transform()
            .translation
            .abs_diff_eq(Vec3::Z * 9.0, 1e-5));
        assert!(assembly
            .report
            .issues
            .contains(&AssemblyIssue::DuplicateResolutionOverwrite {
                object: "tank".to_string(),
                tag: ResolutionTag::Hires,
            }));
    }

    #[test]
    fn node_count_matches_objects_with_valid_hires() {
        let model = model_with(&[
            ("pump;hires", Transform::IDENTITY),
            ("pump;lowres", Transform::IDENTITY),
            ("tank;hires", Transform::IDENTITY),
            ("valve;lowres", Transform::IDENTITY),
            ("rail;mid", Transform::IDENTITY),
            ("rail;hires", Transform::IDENTITY),
        ]);

        let assembly = assemble(model);

        assert_eq!(assembly.nodes.len(), 3);
        // Count conserved among valid groups: pump 2, tank 1, rail 2.
        let placed: usize = assembly
            .nodes
            .iter()
            .map(|node| node.primitive_count())
            .sum();
        assert_eq!(placed, 5);
        assert_eq!(assembly.report.primitives_placed, 5);
    }

    #[test]
    fn non_hires_tags_collapse_into_one_band() {
        let model = model_with(&[
            ("rail;hires", Transform::IDENTITY),
            ("rail;mid", Transform::IDENTITY),
            ("rail;low", Transform::IDENTITY),
        ]);

        let assembly = assemble(model);
        let node = &assembly.nodes[0];

        assert_eq!(node.primitive_count(), 3);
        assert!(node.levels()[1..]
            .iter()
            .all(|level| level.threshold == LOWRES_DISTANCE));
    }

    #[test]
    fn assembly_is_idempotent_over_identical_input() {
        let build = || {
            assemble(model_with(&[
                ("pump;hires", pump_transform()),
                ("pump;lowres", Transform::IDENTITY),
                ("tank;hires", Transform::from_translation(Vec3::Y * 4.0)),
            ]))
        };

        let first = build();
        let second = build();

        assert_eq!(first.nodes.len(), second.nodes.len());
        for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.primitive_count(), b.primitive_count());
            assert_eq!(a.transform(), b.transform());
        }
    }

    #[test]
    fn rehomed_hires_keeps_its_original_world_placement() {
        // The hires primitive hangs off a parent chain; after assembly the
        // node transform alone must reproduce its original world placement.
        let mut model = LoadedModel::new();
        let root = model.add_node(
            "rack",
            Transform::new(
                Vec3::new(3.0, 1.0, 0.0),
                Quat::from_axis_angle(Vec3::Z, FRAC_PI_4),
                Vec3::splat(2.0),
            ),
            None,
        );
        let leaf = model.add_node(
            "pump;hires",
            Transform::from_translation(Vec3::new(0.0, 0.5, 0.0)),
            Some(root),
        );
        let mesh = model.add_mesh(test_mesh("pump;hires"));
        model.add_primitive(mesh, leaf);

        let original_world = model.world_matrix(leaf);
        let assembly = assemble(model);
        let node = &assembly.nodes[0];

        let reproduced: Mat4 =
            node.world_matrix() * node.levels()[0].primitive.local.matrix();

        let probe = Vec3::new(1.0, -2.0, 0.5);
        assert!(reproduced
            .transform_point3(probe)
            .abs_diff_eq(original_world.transform_point3(probe), 1e-4));
    }
}

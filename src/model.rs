use glam::{Vec2, Vec3};
use gltf::buffer;
use id_arena::Id;
use itertools::izip;

#[derive(Copy, Clone, Debug)]
#[allow(dead_code)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

/// One glTF primitive (a single material slice of a mesh).
pub struct MeshPrimitive {
    #[allow(dead_code)]
    pub index: usize,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

pub struct Mesh {
    pub name: String,
    pub primitives: Vec<MeshPrimitive>,
}

pub type MeshId = Id<Mesh>;

pub type Buffers<'a> = &'a [buffer::Data];

impl Mesh {
    pub fn from_gltf(
        name: impl Into<String>,
        mesh: gltf::Mesh,
        buffers: Buffers,
    ) -> anyhow::Result<Mesh> {
        let mut model = Mesh {
            name: name.into(),
            primitives: Vec::new(),
        };

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                return Err(anyhow::anyhow!(
                    "Unsupported primitive mode: {:?}",
                    primitive.mode()
                ));
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions = reader
                .read_positions()
                .ok_or_else(|| anyhow::anyhow!("Primitive without positions: {}", model.name))?
                .collect::<Vec<[f32; 3]>>();

            // Normals and texture coordinates are optional in the source files.
            let normals = reader
                .read_normals()
                .map(|normals| normals.collect::<Vec<[f32; 3]>>())
                .unwrap_or_else(|| vec![[0.0; 3]; positions.len()]);
            let tex_coords = reader
                .read_tex_coords(0)
                .map(|tex_coords| tex_coords.into_f32().collect::<Vec<[f32; 2]>>())
                .unwrap_or_else(|| vec![[0.0; 2]; positions.len()]);

            let vertices = izip!(positions, normals, tex_coords)
                .map(|(position, normal, tex_coords)| Vertex {
                    position: Vec3::from(position),
                    normal: Vec3::from(normal),
                    tex_coords: Vec2::from(tex_coords),
                })
                .collect::<Vec<Vertex>>();

            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect::<Vec<u32>>(),
                None => (0..vertices.len() as u32).collect(),
            };

            model.primitives.push(MeshPrimitive {
                index: primitive.index(),
                vertices,
                indices,
            });
        }

        if model.primitives.is_empty() {
            return Err(anyhow::anyhow!("Mesh without primitives: {}", model.name));
        }

        Ok(model)
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|primitive| primitive.vertices.len())
            .sum()
    }

    pub fn triangle_count(&self) -> u32 {
        self.primitives
            .iter()
            .map(|primitive| primitive.indices.len() as u32 / 3)
            .sum()
    }
}

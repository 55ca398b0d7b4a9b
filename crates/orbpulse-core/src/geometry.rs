//! CPU-side mesh builders for the orb and the logo quad.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed line list.
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl WireMesh {
    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

const PHI: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[u16; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

// A lattice point identified by integer barycentric weights over base corners.
// Sorting by corner makes points on shared edges/corners compare equal across faces.
type LatticeKey = [(u16, u32); 3];

fn lattice_key(weights: [(u16, u32); 3]) -> LatticeKey {
    let mut key = [(u16::MAX, 0u32); 3];
    let mut n = 0;
    for (corner, w) in weights {
        if w > 0 {
            key[n] = (corner, w);
            n += 1;
        }
    }
    key[..n].sort_unstable();
    key
}

fn lattice_position(key: &LatticeKey, segments: u32, radius: f32) -> [f32; 3] {
    let mut p = Vec3::ZERO;
    for &(corner, w) in key.iter().filter(|(_, w)| *w > 0) {
        p += Vec3::from_array(ICOSAHEDRON_VERTICES[corner as usize]) * (w as f32 / segments as f32);
    }
    (p.normalize() * radius).to_array()
}

/// Geodesic sphere: every icosahedron face split into `(detail + 1)^2`
/// triangles, projected onto `radius`. Vertices and edges are unique.
pub fn icosahedron(radius: f32, detail: u32) -> WireMesh {
    let cols = detail + 1;
    let mut mesh = WireMesh::default();
    let mut vertex_ids: FnvHashMap<LatticeKey, u32> = FnvHashMap::default();
    let mut edges: FnvHashSet<(u32, u32)> = FnvHashSet::default();

    let mut vertex = |mesh: &mut WireMesh, key: LatticeKey| -> u32 {
        *vertex_ids.entry(key).or_insert_with(|| {
            mesh.positions.push(lattice_position(&key, cols, radius));
            (mesh.positions.len() - 1) as u32
        })
    };

    for [a, b, c] in ICOSAHEDRON_FACES {
        // grid[i][j]: weights (rows - j) on a, j on b, i on c
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols as usize + 1);
        for i in 0..=cols {
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| vertex(&mut mesh, lattice_key([(a, rows - j), (b, j), (c, i)])))
                .collect();
            grid.push(row);
        }

        let mut add_edge = |mesh: &mut WireMesh, p: u32, q: u32| {
            let e = (p.min(q), p.max(q));
            if edges.insert(e) {
                mesh.indices.extend_from_slice(&[e.0, e.1]);
            }
        };
        for i in 0..cols as usize {
            let span = 2 * (cols as usize - i) - 1;
            for j in 0..span {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                add_edge(&mut mesh, tri[0], tri[1]);
                add_edge(&mut mesh, tri[1], tri[2]);
                add_edge(&mut mesh, tri[2], tri[0]);
            }
        }
    }
    mesh
}

/// Centered square in the XY plane, `v = 0` at the top edge.
pub fn quad(size: f32) -> ([TexturedVertex; 4], [u16; 6]) {
    let h = size / 2.0;
    (
        [
            TexturedVertex {
                position: [-h, h, 0.0],
                uv: [0.0, 0.0],
            },
            TexturedVertex {
                position: [h, h, 0.0],
                uv: [1.0, 0.0],
            },
            TexturedVertex {
                position: [h, -h, 0.0],
                uv: [1.0, 1.0],
            },
            TexturedVertex {
                position: [-h, -h, 0.0],
                uv: [0.0, 1.0],
            },
        ],
        [0, 3, 2, 0, 2, 1],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_has_twelve_vertices_thirty_edges() {
        let mesh = icosahedron(1.0, 0);
        assert_eq!(mesh.positions.len(), 12);
        assert_eq!(mesh.edge_count(), 30);
    }

    #[test]
    fn subdivision_counts_follow_euler() {
        for detail in [1u32, 2, 5, 30] {
            let n = (detail + 1) as usize;
            let mesh = icosahedron(4.0, detail);
            assert_eq!(mesh.positions.len(), 10 * n * n + 2, "detail {detail}");
            assert_eq!(mesh.edge_count(), 30 * n * n, "detail {detail}");
        }
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let mesh = icosahedron(4.0, 6);
        for p in &mesh.positions {
            assert!((Vec3::from_array(*p).length() - 4.0).abs() < 1e-4);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn quad_spans_requested_size() {
        let (verts, idx) = quad(2.5);
        assert_eq!(verts[0].position, [-1.25, 1.25, 0.0]);
        assert_eq!(verts[2].position, [1.25, -1.25, 0.0]);
        assert!(idx.iter().all(|&i| i < 4));
    }
}

//! Indexed triangle meshes for the showcase primitives.
//!
//! Vertex layouts, winding and UV orientation follow the usual WebGL
//! conventions: counter-clockwise front faces, `v = 1` at the top edge.

use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }

    /// Line-list indices covering every distinct triangle edge once.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = FnvHashSet::default();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for j in 0..3 {
                let a = tri[j];
                let b = tri[(j + 1) % 3];
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }

    /// Axis-aligned box centered on the origin, one quad per face.
    pub fn box_geometry(width: f32, height: f32, depth: f32) -> Self {
        let mut mesh = Self::default();
        // (u axis, v axis, w axis, u dir, v dir, plane width, plane height, plane depth)
        let faces: [(usize, usize, usize, f32, f32, f32, f32, f32); 6] = [
            (2, 1, 0, -1.0, -1.0, depth, height, width),
            (2, 1, 0, 1.0, -1.0, depth, height, -width),
            (0, 2, 1, 1.0, 1.0, width, depth, height),
            (0, 2, 1, 1.0, -1.0, width, depth, -height),
            (0, 1, 2, 1.0, -1.0, width, height, depth),
            (0, 1, 2, -1.0, -1.0, width, height, -depth),
        ];
        for (u, v, w, udir, vdir, pw, ph, pd) in faces {
            let start = mesh.positions.len() as u32;
            for iy in 0..2 {
                let y = iy as f32 * ph - ph * 0.5;
                for ix in 0..2 {
                    let x = ix as f32 * pw - pw * 0.5;
                    let mut p = [0.0_f32; 3];
                    p[u] = x * udir;
                    p[v] = y * vdir;
                    p[w] = pd * 0.5;
                    let mut n = [0.0_f32; 3];
                    n[w] = if pd > 0.0 { 1.0 } else { -1.0 };
                    mesh.push_vertex(Vec3::from(p), Vec3::from(n), [ix as f32, 1.0 - iy as f32]);
                }
            }
            let (a, b, c, d) = (start, start + 2, start + 3, start + 1);
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
        mesh
    }

    /// UV sphere; the pole rows collapse to single triangles.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let mut mesh = Self::default();
        let mut grid = Vec::with_capacity(hs as usize + 1);

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };
            let mut row = Vec::with_capacity(ws as usize + 1);
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let theta = v * PI;
                let phi = u * TAU;
                let p = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                row.push(mesh.push_vertex(p, p.normalize_or_zero(), [u + u_offset, 1.0 - v]));
            }
            grid.push(row);
        }

        for iy in 0..hs as usize {
            for ix in 0..ws as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs as usize - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        mesh
    }

    /// Subdivided plane in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let gx = width_segments.max(1);
        let gy = height_segments.max(1);
        let gx1 = gx + 1;
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;
        let mut mesh = Self::default();

        for iy in 0..=gy {
            let y = iy as f32 * seg_h - height * 0.5;
            for ix in 0..=gx {
                let x = ix as f32 * seg_w - width * 0.5;
                mesh.push_vertex(
                    Vec3::new(x, -y, 0.0),
                    Vec3::Z,
                    [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32],
                );
            }
        }
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + gx1 * iy;
                let b = ix + gx1 * (iy + 1);
                let c = ix + 1 + gx1 * (iy + 1);
                let d = ix + 1 + gx1 * iy;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    /// Torus around the Z axis: `radius` to the tube center, `tube` thick.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(2);
        let tubular = tubular_segments.max(3);
        let mut mesh = Self::default();

        for j in 0..=radial {
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let v = j as f32 / radial as f32 * TAU;
                let ring = radius + tube * v.cos();
                let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                mesh.push_vertex(
                    p,
                    (p - center).normalize_or_zero(),
                    [i as f32 / tubular as f32, j as f32 / radial as f32],
                );
            }
        }
        let stride = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }
}

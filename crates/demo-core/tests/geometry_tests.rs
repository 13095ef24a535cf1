// Host-side tests for mesh generators.

use approx::assert_relative_eq;
use demo_core::*;
use glam::Vec3;

fn assert_well_formed(mesh: &MeshData) {
    let n = mesh.vertex_count();
    assert_eq!(mesh.normals.len(), n);
    assert_eq!(mesh.uvs.len(), n);
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < n));
    for normal in &mesh.normals {
        assert_relative_eq!(Vec3::from(*normal).length(), 1.0, epsilon = 1e-5);
    }
    // sphere pole rows shift u by half a segment
    for uv in &mesh.uvs {
        assert!(uv[0] >= -0.05 && uv[0] <= 1.05);
        assert!(uv[1] >= -1e-6 && uv[1] <= 1.0 + 1e-6);
    }
}

#[test]
fn box_has_four_vertices_per_face() {
    let mesh = MeshData::box_geometry(1.0, 1.0, 1.0);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.indices.len(), 36);
    for p in &mesh.positions {
        assert!(p.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
    }
}

#[test]
fn box_faces_wind_counter_clockwise_outward() {
    let mesh = MeshData::box_geometry(1.0, 1.0, 1.0);
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.positions[i as usize]));
        let face_normal = (b - a).cross(c - a).normalize();
        let stored = Vec3::from(mesh.normals[tri[0] as usize]);
        assert!(face_normal.dot(stored) > 0.99);
    }
}

#[test]
fn sphere_matches_segment_counts() {
    let mesh = MeshData::sphere(0.5, 16, 16);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 17 * 17);
    // pole rows contribute one triangle per segment instead of two
    assert_eq!(mesh.indices.len(), (16 * 16 * 2 - 2 * 16) * 3);
    for p in &mesh.positions {
        assert_relative_eq!(Vec3::from(*p).length(), 0.5, epsilon = 1e-5);
    }
}

#[test]
fn plane_matches_segment_counts() {
    let mesh = MeshData::plane(1.0, 1.0, 100, 100);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 101 * 101);
    assert_eq!(mesh.indices.len(), 100 * 100 * 6);
    assert_eq!(mesh.positions[0], [-0.5, 0.5, 0.0]);
    assert_eq!(mesh.uvs[0], [0.0, 1.0]);
}

#[test]
fn torus_matches_segment_counts() {
    let mesh = MeshData::torus(0.3, 0.2, 16, 32);
    assert_well_formed(&mesh);
    assert_eq!(mesh.vertex_count(), 17 * 33);
    assert_eq!(mesh.indices.len(), 16 * 32 * 6);
    for p in &mesh.positions {
        let ring = Vec3::new(p[0], p[1], 0.0).length();
        let tube = ((ring - 0.3).powi(2) + p[2] * p[2]).sqrt();
        assert_relative_eq!(tube, 0.2, epsilon = 1e-5);
    }
}

#[test]
fn wireframe_lists_each_edge_once() {
    let quad = MeshData::plane(1.0, 1.0, 1, 1);
    let lines = quad.wireframe_indices();
    assert_eq!(lines.len(), 10);

    let cube = MeshData::box_geometry(1.0, 1.0, 1.0);
    // faces do not share vertices: 6 faces x 5 edges
    assert_eq!(cube.wireframe_indices().len(), 6 * 5 * 2);
}

#[test]
fn wireframe_of_a_grid_counts_shared_edges_once() {
    let grid = MeshData::plane(1.0, 1.0, 4, 3);
    // horizontal + vertical + one diagonal per cell
    let edges = 4 * 4 + 5 * 3 + 4 * 3;
    assert_eq!(grid.wireframe_indices().len(), edges * 2);
}

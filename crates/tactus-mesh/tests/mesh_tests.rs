//! Integration tests for tactus-mesh.

use std::sync::Arc;

use tactus_math::Vec3;
use tactus_mesh::generators::{quad_grid, uv_sphere};
use tactus_mesh::normals::compute_vertex_normals;
use tactus_mesh::{GeometryStore, Mesh};
use tactus_types::{TactusError, TriangleId, VertexId};

fn single_triangle() -> Mesh {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex_at(Vec3::new(0.0, 0.0, 0.0));
    let b = mesh.add_vertex_at(Vec3::new(1.0, 0.0, 0.0));
    let c = mesh.add_vertex_at(Vec3::new(0.0, 1.0, 0.0));
    mesh.add_triangle(a, b, c).unwrap();
    mesh
}

// ─── Mesh Edit Tests ──────────────────────────────────────────

#[test]
fn basic_counts() {
    let mesh = single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.alive_triangle_count(), 1);
}

#[test]
fn revision_bumps_on_every_edit() {
    let mut mesh = Mesh::new();
    let r0 = mesh.revision();

    let a = mesh.add_vertex_at(Vec3::ZERO);
    assert!(mesh.revision() > r0);

    let b = mesh.add_vertex_at(Vec3::X);
    let c = mesh.add_vertex_at(Vec3::Y);
    let r_verts = mesh.revision();

    let t = mesh.add_triangle(a, b, c).unwrap();
    assert!(mesh.revision() > r_verts);

    let r_tri = mesh.revision();
    mesh.remove_triangle(t).unwrap();
    assert!(mesh.revision() > r_tri);

    let r_removed = mesh.revision();
    mesh.clear();
    assert!(mesh.revision() > r_removed);
}

#[test]
fn add_triangle_rejects_bad_index() {
    let mut mesh = Mesh::new();
    mesh.add_vertex_at(Vec3::ZERO);
    mesh.add_vertex_at(Vec3::X);

    let err = mesh
        .add_triangle(VertexId(0), VertexId(1), VertexId(9))
        .unwrap_err();
    assert!(matches!(err, TactusError::InvalidIndex { index: 9, .. }));
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn remove_missing_triangle_is_not_found() {
    let mut mesh = single_triangle();
    let err = mesh.remove_triangle(TriangleId(5)).unwrap_err();
    assert!(matches!(err, TactusError::NotFound(_)));

    // Removing twice reports NotFound the second time.
    mesh.remove_triangle(TriangleId(0)).unwrap();
    let err = mesh.remove_triangle(TriangleId(0)).unwrap_err();
    assert!(matches!(err, TactusError::NotFound(_)));
}

#[test]
fn removed_triangle_stays_until_compact() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0);
    let before = mesh.triangle_count();

    mesh.remove_triangle(TriangleId(3)).unwrap();
    assert_eq!(mesh.triangle_count(), before); // Slot still present
    assert!(!mesh.is_alive(3));
    assert_eq!(mesh.alive_triangle_count(), before - 1);

    mesh.compact();
    assert_eq!(mesh.triangle_count(), before - 1);
    assert_eq!(mesh.alive_triangle_count(), before - 1);
    assert!(mesh.validate().is_ok());
}

#[test]
fn compact_preserves_alive_order() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0);
    let survivors: Vec<[u32; 3]> = (0..mesh.triangle_count())
        .filter(|&t| t != 2)
        .map(|t| mesh.triangle(t))
        .collect();

    mesh.remove_triangle(TriangleId(2)).unwrap();
    mesh.compact();

    let after: Vec<[u32; 3]> = (0..mesh.triangle_count()).map(|t| mesh.triangle(t)).collect();
    assert_eq!(after, survivors);
}

#[test]
fn face_normal_cached_on_add() {
    let mesh = single_triangle();
    let n = mesh.face_normal(0);
    assert!((n.z - 1.0).abs() < 1e-6);
}

#[test]
fn set_position_bumps_revision() {
    let mut mesh = single_triangle();
    let r = mesh.revision();
    mesh.set_position(0, Vec3::new(0.0, 0.0, 0.5));
    assert!(mesh.revision() > r);

    mesh.refresh_face_normals();
    let n = mesh.face_normal(0);
    assert!((n.length() - 1.0).abs() < 1e-5);
    assert!(n.z < 1.0); // Tilted by the moved vertex
}

#[test]
fn validate_ok_for_generators() {
    assert!(quad_grid(4, 4, 1.0, 1.0).validate().is_ok());
    assert!(uv_sphere(0.5, 8, 12).validate().is_ok());
}

#[test]
fn mesh_serde_round_trip() {
    let mesh = single_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: Mesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.vertex_count(), 3);
    assert_eq!(recovered.triangle_count(), 1);
    assert_eq!(recovered.revision(), mesh.revision());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(4, 3, 2.0, 1.5);
    assert_eq!(mesh.vertex_count(), 5 * 4);
    assert_eq!(mesh.triangle_count(), 4 * 3 * 2);
}

#[test]
fn quad_grid_is_flat_facing_z() {
    let mesh = quad_grid(3, 3, 1.0, 1.0);
    for i in 0..mesh.vertex_count() {
        assert_eq!(mesh.position(i).z, 0.0);
    }
    for t in 0..mesh.triangle_count() {
        assert!(mesh.face_normal(t).z > 0.99);
    }
}

#[test]
fn uv_sphere_on_radius() {
    let mesh = uv_sphere(0.5, 8, 12);
    for i in 0..mesh.vertex_count() {
        assert!((mesh.position(i).length() - 0.5).abs() < 1e-5);
    }
}

#[test]
fn uv_sphere_face_normals_point_outward() {
    let mesh = uv_sphere(0.5, 8, 12);
    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(t);
        let centroid = (a + b + c) / 3.0;
        assert!(
            mesh.face_normal(t).dot(centroid) > 0.0,
            "triangle {t} faces inward"
        );
    }
}

// ─── Normal Computation Tests ─────────────────────────────────

#[test]
fn vertex_normals_flat_grid() {
    let mut mesh = quad_grid(3, 3, 1.0, 1.0);
    compute_vertex_normals(&mut mesh);
    for i in 0..mesh.vertex_count() {
        let n = mesh.vertex_normal(i);
        assert!((n.z - 1.0).abs() < 1e-5);
    }
}

#[test]
fn vertex_normals_skip_dead_triangles() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0);
    for t in 0..mesh.triangle_count() {
        mesh.remove_triangle(TriangleId(t as u32)).unwrap();
    }
    compute_vertex_normals(&mut mesh);
    // All triangles dead: accumulation is zero, normals left unnormalized.
    for i in 0..mesh.vertex_count() {
        assert_eq!(mesh.vertex_normal(i), Vec3::ZERO);
    }
}

// ─── GeometryStore Tests ──────────────────────────────────────

#[test]
fn snapshot_is_isolated_from_commits() {
    let store = GeometryStore::new(single_triangle());
    let before = store.snapshot();

    store
        .commit(|mesh| {
            let d = mesh.add_vertex_at(Vec3::new(1.0, 1.0, 0.0));
            mesh.add_triangle(VertexId(1), d, VertexId(2)).map(|_| ())
        })
        .unwrap();

    // The old snapshot still sees one triangle; the new one sees two.
    assert_eq!(before.triangle_count(), 1);
    assert_eq!(store.snapshot().triangle_count(), 2);
    assert!(store.revision() > before.revision());
}

#[test]
fn failed_commit_publishes_nothing() {
    let store = GeometryStore::new(single_triangle());
    let revision = store.revision();

    let result = store.commit(|mesh| {
        mesh.add_vertex_at(Vec3::ONE);
        mesh.add_triangle(VertexId(0), VertexId(1), VertexId(42))
            .map(|_| ())
    });

    assert!(result.is_err());
    assert_eq!(store.revision(), revision);
    assert_eq!(store.snapshot().vertex_count(), 3); // Partial edit discarded
}

#[test]
fn commit_compacts_dead_triangles() {
    let store = GeometryStore::new(quad_grid(2, 2, 1.0, 1.0));
    let before = store.snapshot().triangle_count();

    store
        .commit(|mesh| mesh.remove_triangle(TriangleId(0)))
        .unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.triangle_count(), before - 1);
    assert_eq!(snapshot.alive_triangle_count(), before - 1);
}

#[test]
fn concurrent_snapshots_share_data() {
    let store = Arc::new(GeometryStore::new(quad_grid(8, 8, 1.0, 1.0)));

    let reader = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            // Servo-style reader: snapshot each "tick", never blocked
            // into seeing a half-applied edit.
            for _ in 0..100 {
                let snap = store.snapshot();
                assert!(snap.validate().is_ok());
            }
        })
    };

    for i in 0..20 {
        store
            .commit(|mesh| mesh.remove_triangle(TriangleId(i)))
            .unwrap();
    }

    reader.join().unwrap();
}

//! Integration tests for tactus-types.

use tactus_types::{ObjectId, PointId, TactusError, TriangleId, VertexId};

// ─── ID Tests ─────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn triangle_id_index() {
    let id = TriangleId(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn ids_are_not_interchangeable() {
    // Compile-time guarantee — these types are distinct.
    let _v = VertexId(0);
    let _t = TriangleId(0);
    let _o = ObjectId(0);
    let _p = PointId(0);
}

#[test]
fn triangle_ids_are_ordered() {
    assert!(TriangleId(3) < TriangleId(7));
    assert!(ObjectId(0) < ObjectId(1));
}

#[test]
fn ids_are_serializable() {
    let id = TriangleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: TriangleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn invalid_index_display() {
    let err = TactusError::InvalidIndex { index: 9, count: 3 };
    let msg = err.to_string();
    assert!(msg.contains('9'));
    assert!(msg.contains('3'));
}

#[test]
fn not_found_display() {
    let err = TactusError::NotFound("triangle 12".into());
    assert!(err.to_string().contains("triangle 12"));
}

#[test]
fn stale_geometry_display() {
    let err = TactusError::StaleGeometry {
        built: 4,
        current: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains('4'));
    assert!(msg.contains('7'));
}

#[test]
fn budget_overrun_display() {
    let err = TactusError::BudgetOverrun {
        budget_us: 1000,
        actual_us: 1850,
    };
    let msg = err.to_string();
    assert!(msg.contains("1850"));
    assert!(msg.contains("1000"));
}

#[test]
fn constraint_invalidated_display() {
    let err = TactusError::ConstraintInvalidated { triangle: 31 };
    assert!(err.to_string().contains("31"));
}

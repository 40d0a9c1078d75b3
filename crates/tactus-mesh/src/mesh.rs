//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! Each vertex channel is stored contiguously (`pos_x: [x0, x1, ...]`).
//! Triangles carry a cached face normal and an alive flag: removal
//! marks a triangle for deletion, and [`Mesh::compact`] drops dead
//! triangles at a commit boundary. Every edit bumps the `revision`
//! counter so collision structures built against an older revision
//! can detect staleness and rebuild.

use serde::{Deserialize, Serialize};
use tactus_math::{triangle::face_normal, Vec3};
use tactus_types::{TactusError, TactusResult, TriangleId, VertexId};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Vertex channels (position, normal, UV, color) are public contiguous
/// arrays. Triangle topology is private: it is edited only through
/// [`Mesh::add_triangle`] / [`Mesh::remove_triangle`] so the alive
/// flags, cached face normals, and revision counter stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// X components of vertex normals.
    pub normal_x: Vec<f32>,
    /// Y components of vertex normals.
    pub normal_y: Vec<f32>,
    /// Z components of vertex normals.
    pub normal_z: Vec<f32>,

    /// U texture coordinates.
    pub uv_u: Vec<f32>,
    /// V texture coordinates.
    pub uv_v: Vec<f32>,

    /// Vertex colors, RGB in `[0, 1]`.
    pub color_r: Vec<f32>,
    pub color_g: Vec<f32>,
    pub color_b: Vec<f32>,

    // --- Triangle data ---
    /// Triangle indices, stored flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    indices: Vec<u32>,

    /// Cached face normals (SoA, one entry per triangle).
    face_nx: Vec<f32>,
    face_ny: Vec<f32>,
    face_nz: Vec<f32>,

    /// Alive flags. A removed triangle is marked dead and skipped by
    /// queries until the next `compact`.
    alive: Vec<bool>,

    /// Monotonically increasing edit counter.
    revision: u64,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            color_r: Vec::with_capacity(vertex_capacity),
            color_g: Vec::with_capacity(vertex_capacity),
            color_b: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
            face_nx: Vec::with_capacity(triangle_capacity),
            face_ny: Vec::with_capacity(triangle_capacity),
            face_nz: Vec::with_capacity(triangle_capacity),
            alive: Vec::with_capacity(triangle_capacity),
            revision: 0,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangle slots, including dead ones.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the number of alive triangles.
    pub fn alive_triangle_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Returns the current revision counter.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the vertex normal of vertex `i`.
    #[inline]
    pub fn vertex_normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.position(a as usize),
            self.position(b as usize),
            self.position(c as usize),
        ]
    }

    /// Returns the cached face normal of triangle `t`.
    ///
    /// Zero for degenerate triangles.
    #[inline]
    pub fn face_normal(&self, t: usize) -> Vec3 {
        Vec3::new(self.face_nx[t], self.face_ny[t], self.face_nz[t])
    }

    /// Returns true if triangle `t` is alive (not marked for deletion).
    #[inline]
    pub fn is_alive(&self, t: usize) -> bool {
        self.alive[t]
    }

    /// Appends a vertex with full channel data. Bumps the revision.
    pub fn add_vertex(&mut self, pos: Vec3, normal: Vec3, uv: [f32; 2], color: [f32; 3]) -> VertexId {
        let id = VertexId(self.vertex_count() as u32);
        self.pos_x.push(pos.x);
        self.pos_y.push(pos.y);
        self.pos_z.push(pos.z);
        self.normal_x.push(normal.x);
        self.normal_y.push(normal.y);
        self.normal_z.push(normal.z);
        self.uv_u.push(uv[0]);
        self.uv_v.push(uv[1]);
        self.color_r.push(color[0]);
        self.color_g.push(color[1]);
        self.color_b.push(color[2]);
        self.revision += 1;
        id
    }

    /// Appends a vertex at `pos` with default normal, UV, and color.
    pub fn add_vertex_at(&mut self, pos: Vec3) -> VertexId {
        self.add_vertex(pos, Vec3::ZERO, [0.0, 0.0], [1.0, 1.0, 1.0])
    }

    /// Appends a triangle referencing three existing vertices.
    ///
    /// Caches the face normal and bumps the revision. Fails with
    /// [`TactusError::InvalidIndex`] if any index is out of range.
    pub fn add_triangle(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
    ) -> TactusResult<TriangleId> {
        let count = self.vertex_count() as u32;
        for id in [v0, v1, v2] {
            if id.0 >= count {
                return Err(TactusError::InvalidIndex { index: id.0, count });
            }
        }

        let t = TriangleId(self.triangle_count() as u32);
        self.indices.extend_from_slice(&[v0.0, v1.0, v2.0]);

        let n = face_normal(
            self.position(v0.index()),
            self.position(v1.index()),
            self.position(v2.index()),
        )
        .unwrap_or(Vec3::ZERO);
        self.face_nx.push(n.x);
        self.face_ny.push(n.y);
        self.face_nz.push(n.z);
        self.alive.push(true);
        self.revision += 1;
        Ok(t)
    }

    /// Marks a triangle for deletion. Bumps the revision.
    ///
    /// The slot stays in place (indices of other triangles are stable)
    /// until the next [`Mesh::compact`]. Removing a missing or already
    /// dead triangle fails with [`TactusError::NotFound`].
    pub fn remove_triangle(&mut self, t: TriangleId) -> TactusResult<()> {
        let idx = t.index();
        if idx >= self.triangle_count() || !self.alive[idx] {
            return Err(TactusError::NotFound(format!("triangle {}", t.0)));
        }
        self.alive[idx] = false;
        self.revision += 1;
        Ok(())
    }

    /// Drops dead triangles, preserving the relative order of alive ones.
    ///
    /// Triangle indices shift, so this runs only at a commit boundary
    /// (never mid-query). Bumps the revision when anything was dropped.
    pub fn compact(&mut self) {
        if self.alive.iter().all(|&a| a) {
            return;
        }

        let mut write = 0usize;
        for read in 0..self.triangle_count() {
            if !self.alive[read] {
                continue;
            }
            if write != read {
                let rb = read * 3;
                let wb = write * 3;
                for k in 0..3 {
                    self.indices[wb + k] = self.indices[rb + k];
                }
                self.face_nx[write] = self.face_nx[read];
                self.face_ny[write] = self.face_ny[read];
                self.face_nz[write] = self.face_nz[read];
            }
            write += 1;
        }

        self.indices.truncate(write * 3);
        self.face_nx.truncate(write);
        self.face_ny.truncate(write);
        self.face_nz.truncate(write);
        self.alive.clear();
        self.alive.resize(write, true);
        self.revision += 1;
    }

    /// Removes all vertices and triangles. Bumps the revision.
    pub fn clear(&mut self) {
        self.pos_x.clear();
        self.pos_y.clear();
        self.pos_z.clear();
        self.normal_x.clear();
        self.normal_y.clear();
        self.normal_z.clear();
        self.uv_u.clear();
        self.uv_v.clear();
        self.color_r.clear();
        self.color_g.clear();
        self.color_b.clear();
        self.indices.clear();
        self.face_nx.clear();
        self.face_ny.clear();
        self.face_nz.clear();
        self.alive.clear();
        self.revision += 1;
    }

    /// Moves vertex `i` to `pos`. Bumps the revision — collision
    /// structures depend on positions, not just topology.
    ///
    /// Cached face normals of incident triangles become stale; call
    /// [`Mesh::refresh_face_normals`] (the store's commit does) after
    /// a batch of position edits.
    pub fn set_position(&mut self, i: usize, pos: Vec3) {
        self.pos_x[i] = pos.x;
        self.pos_y[i] = pos.y;
        self.pos_z[i] = pos.z;
        self.revision += 1;
    }

    /// Recomputes all cached face normals from current positions.
    pub fn refresh_face_normals(&mut self) {
        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            let n = face_normal(
                self.position(a as usize),
                self.position(b as usize),
                self.position(c as usize),
            )
            .unwrap_or(Vec3::ZERO);
            self.face_nx[t] = n.x;
            self.face_ny[t] = n.y;
            self.face_nz[t] = n.z;
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    pub fn validate(&self) -> TactusResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(TactusError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(TactusError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != n || self.uv_v.len() != n {
            return Err(TactusError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }
        if self.color_r.len() != n || self.color_g.len() != n || self.color_b.len() != n {
            return Err(TactusError::InvalidMesh(
                "Color arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(TactusError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        let tri_count = self.triangle_count();
        if self.alive.len() != tri_count
            || self.face_nx.len() != tri_count
            || self.face_ny.len() != tri_count
            || self.face_nz.len() != tri_count
        {
            return Err(TactusError::InvalidMesh(format!(
                "Per-triangle arrays inconsistent with triangle count ({tri_count})"
            )));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(TactusError::InvalidMesh(format!(
                    "Index {idx} at position {i} is out of range (vertex count: {n})"
                )));
            }
        }

        for t in 0..tri_count {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(TactusError::InvalidMesh(format!(
                    "Triangle {t} has repeated vertex indices: [{a}, {b}, {c}]"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounding volume hierarchy collision detector.
//!
//! Array-based AABB tree over the mesh's alive triangles. The tree is
//! rebuilt wholesale whenever the geometry revision changes — no
//! incremental updates; rebuild is O(n log n) and mesh edits are
//! infrequent relative to the servo rate. `prepare` does the rebuild
//! at a tick/commit boundary; a revision mismatch detected inside
//! `query` is recovered by an inline rebuild (logged, never an error).

use tactus_math::{Aabb, Vec3};
use tactus_mesh::Mesh;
use tactus_types::constants::BVH_LEAF_SIZE;
use tactus_types::{ObjectId, TactusError, TactusResult};

use crate::detector::{probe_triangle, CollisionDetector};
use crate::event::CollisionRecorder;
use crate::probe::Probe;
use crate::settings::CollisionSettings;

/// Sentinel child index for leaf nodes.
const NO_CHILD: u32 = u32::MAX;

/// One node of the hierarchy.
///
/// Internal nodes carry two child indices; leaves carry a contiguous
/// range into the tree's triangle-index array, so no triangle is ever
/// split across nodes.
#[derive(Debug, Clone, Copy)]
struct BvhNode {
    /// Tight box around every triangle beneath this node.
    aabb: Aabb,
    /// Left child index, or `NO_CHILD` for a leaf.
    left: u32,
    /// Right child index, or `NO_CHILD` for a leaf.
    right: u32,
    /// Leaf payload: start of the triangle range.
    start: u32,
    /// Leaf payload: length of the triangle range. Zero for internal nodes.
    count: u32,
    /// Depth in the tree (root = 0).
    depth: u32,
}

impl BvhNode {
    fn is_leaf(&self) -> bool {
        self.left == NO_CHILD
    }
}

/// Bounding volume hierarchy detector.
///
/// Caches the built tree together with the mesh revision it was built
/// against; [`CollisionDetector::prepare`] rebuilds on mismatch.
pub struct Bvh {
    nodes: Vec<BvhNode>,
    /// Permutation of alive triangle indices; leaves own disjoint slices.
    tri_indices: Vec<u32>,
    /// Revision the tree was built against. `None` before the first build.
    built_revision: Option<u64>,
    leaf_size: usize,
}

impl Bvh {
    /// Creates an empty (unbuilt) hierarchy with the default leaf size.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            tri_indices: Vec::new(),
            built_revision: None,
            leaf_size: BVH_LEAF_SIZE,
        }
    }

    /// Number of nodes in the current tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node (0 for an empty or single-node tree).
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Rebuilds the tree from scratch for the given snapshot.
    pub fn rebuild(&mut self, mesh: &Mesh) {
        self.nodes.clear();
        self.tri_indices.clear();

        // Only alive triangles enter the tree.
        self.tri_indices.extend(
            (0..mesh.triangle_count())
                .filter(|&t| mesh.is_alive(t))
                .map(|t| t as u32),
        );
        self.built_revision = Some(mesh.revision());

        if self.tri_indices.is_empty() {
            return;
        }

        let centroids: Vec<Vec3> = (0..mesh.triangle_count())
            .map(|t| {
                let [a, b, c] = mesh.triangle_positions(t);
                (a + b + c) / 3.0
            })
            .collect();

        let count = self.tri_indices.len();
        self.build_node(mesh, &centroids, 0, count, 0);
    }

    /// Recursively builds the node for `tri_indices[start..start+count]`
    /// and returns its index.
    fn build_node(
        &mut self,
        mesh: &Mesh,
        centroids: &[Vec3],
        start: usize,
        count: usize,
        depth: u32,
    ) -> u32 {
        let mut aabb = Aabb::empty();
        for &t in &self.tri_indices[start..start + count] {
            let [a, b, c] = mesh.triangle_positions(t as usize);
            aabb = aabb.union(&Aabb::from_triangle(a, b, c));
        }

        let node_index = self.nodes.len() as u32;
        self.nodes.push(BvhNode {
            aabb,
            left: NO_CHILD,
            right: NO_CHILD,
            start: start as u32,
            count: count as u32,
            depth,
        });

        if count <= self.leaf_size {
            return node_index;
        }

        // Median split along the box's longest axis: partition the
        // index range in place around the median centroid.
        let axis = aabb.longest_axis();
        let mid = count / 2;
        let range = &mut self.tri_indices[start..start + count];
        range.select_nth_unstable_by(mid, |&ta, &tb| {
            centroids[ta as usize][axis].total_cmp(&centroids[tb as usize][axis])
        });

        let left = self.build_node(mesh, centroids, start, mid, depth + 1);
        let right = self.build_node(mesh, centroids, start + mid, count - mid, depth + 1);

        let node = &mut self.nodes[node_index as usize];
        node.left = left;
        node.right = right;
        node.count = 0;

        node_index
    }

    /// Checks the structural invariants of the current tree.
    ///
    /// - Every internal node's box contains the union of its children's boxes.
    /// - Every leaf range is in bounds and references alive triangles.
    /// - Every alive triangle appears in exactly one leaf.
    pub fn validate(&self, mesh: &Mesh) -> TactusResult<()> {
        let mut seen = vec![0u32; mesh.triangle_count()];

        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                let start = node.start as usize;
                let end = start + node.count as usize;
                if end > self.tri_indices.len() {
                    return Err(TactusError::InvariantViolation(format!(
                        "leaf {i} range {start}..{end} exceeds index array"
                    )));
                }
                for &t in &self.tri_indices[start..end] {
                    if t as usize >= mesh.triangle_count() {
                        return Err(TactusError::InvariantViolation(format!(
                            "leaf {i} references out-of-range triangle {t}"
                        )));
                    }
                    seen[t as usize] += 1;
                }
            } else {
                for child in [node.left, node.right] {
                    let child_box = &self.nodes[child as usize].aabb;
                    if !node.aabb.contains_aabb(child_box) {
                        return Err(TactusError::InvariantViolation(format!(
                            "node {i} does not contain child {child}"
                        )));
                    }
                }
            }
        }

        for (t, &hits) in seen.iter().enumerate() {
            let expected = u32::from(mesh.is_alive(t));
            if hits != expected {
                return Err(TactusError::InvariantViolation(format!(
                    "triangle {t} appears in {hits} leaves (expected {expected})"
                )));
            }
        }

        Ok(())
    }

    /// Box-level pruning test for the probe.
    fn probe_hits_box(probe: &Probe, aabb: &Aabb, max_distance: f32) -> bool {
        match *probe {
            Probe::Point(p) => {
                aabb.distance_squared_to_point(p) <= max_distance * max_distance
            }
            Probe::Segment { start, end } => aabb.intersects_segment(start, end),
            Probe::Sphere { center, radius } => {
                let reach = radius + max_distance;
                aabb.distance_squared_to_point(center) <= reach * reach
            }
        }
    }
}

impl Default for Bvh {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionDetector for Bvh {
    fn prepare(&mut self, mesh: &Mesh) -> TactusResult<()> {
        if self.built_revision != Some(mesh.revision()) {
            self.rebuild(mesh);
        }
        Ok(())
    }

    fn query(
        &mut self,
        object: ObjectId,
        probe: &Probe,
        mesh: &Mesh,
        settings: &CollisionSettings,
        recorder: &mut CollisionRecorder,
    ) -> TactusResult<()> {
        if probe.is_degenerate() {
            return Ok(());
        }

        // Stale-structure recovery: rebuild inline rather than fail
        // the servo tick.
        if self.built_revision != Some(mesh.revision()) {
            tracing::debug!(
                built = ?self.built_revision,
                current = mesh.revision(),
                "stale geometry at query time, rebuilding"
            );
            self.rebuild(mesh);
        }

        if self.nodes.is_empty() {
            return Ok(());
        }

        let mut stack: Vec<u32> = vec![0];
        while let Some(index) = stack.pop() {
            let node = self.nodes[index as usize];
            if !Self::probe_hits_box(probe, &node.aabb, settings.max_distance) {
                continue;
            }

            if node.is_leaf() {
                let start = node.start as usize;
                for &t in &self.tri_indices[start..start + node.count as usize] {
                    if let Some(event) =
                        probe_triangle(object, probe, mesh, t as usize, settings.max_distance)
                    {
                        recorder.record(event);
                    }
                }
            } else {
                // Right pushed first so the left child is visited first.
                stack.push(node.right);
                stack.push(node.left);
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "bvh"
    }
}

//! Procedural mesh generators for scenarios and testing.
//!
//! These generators produce deterministic, resolution-configurable
//! meshes with correct winding order, normals, and UV coordinates.

use tactus_math::Vec3;

use crate::mesh::Mesh;

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]`
/// in Y, centered at the origin at Z=0, with normals facing +Z.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
/// - `width` — Total width in meters.
/// - `height` — Total height in meters.
///
/// # Example
/// ```
/// use tactus_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> Mesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = Mesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            mesh.add_vertex(
                Vec3::new(-half_w + u * width, half_h - v * height, 0.0),
                Vec3::Z,
                [u, v],
                [1.0, 1.0, 1.0],
            );
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            // Winding chosen so face normals point along +Z
            mesh.add_triangle(top_left.into(), bot_left.into(), top_right.into())
                .expect("grid indices are in range");
            mesh.add_triangle(top_right.into(), bot_left.into(), bot_right.into())
                .expect("grid indices are in range");
        }
    }

    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// # Arguments
/// - `radius` — Sphere radius in meters.
/// - `stacks` — Number of horizontal slices (latitude divisions).
/// - `slices` — Number of vertical slices (longitude divisions).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> Mesh {
    let mut mesh = Mesh::with_capacity((stacks + 1) * (slices + 1), stacks * slices * 2);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32; // 0 to PI
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;

            let dir = Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin());
            mesh.add_vertex(
                dir * radius,
                dir, // For a sphere, normal = position / radius
                [j as f32 / slices as f32, i as f32 / stacks as f32],
                [1.0, 1.0, 1.0],
            );
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Winding chosen so face normals point outward.
            // Skip degenerate triangles at poles.
            if i != 0 {
                mesh.add_triangle(a.into(), (a + 1).into(), b.into())
                    .expect("sphere indices are in range");
            }
            if i != stacks - 1 {
                mesh.add_triangle((a + 1).into(), (b + 1).into(), b.into())
                    .expect("sphere indices are in range");
            }
        }
    }

    mesh
}

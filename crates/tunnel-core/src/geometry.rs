//! CPU-side mesh building for the tube and the flat scene panels.

use crate::path::Curve;
use glam::{Quat, Vec2, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    /// 1.0 multiplies `color` by the renderer's current tube colour.
    pub tint: f32,
    /// Image coordinates, top-left origin. Untextured geometry samples a
    /// plain white texel, so any value works there.
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Parallel-transport frames sampled uniformly along a curve.
#[derive(Clone, Debug)]
pub struct Frames {
    tangents: Vec<Vec3>,
    normals: Vec<Vec3>,
    binormals: Vec<Vec3>,
}

#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl Frames {
    pub fn build<C: Curve>(curve: &C, samples: usize) -> Self {
        let samples = samples.max(2);
        let tangents: Vec<Vec3> = (0..samples)
            .map(|i| curve.tangent_at(i as f32 / (samples - 1) as f32))
            .collect();

        let mut normals = Vec::with_capacity(samples);
        let mut binormals = Vec::with_capacity(samples);

        let mut n0 = Vec3::Y;
        if n0.dot(tangents[0]).abs() > 0.9 {
            n0 = Vec3::X;
        }
        n0 = (n0 - tangents[0] * n0.dot(tangents[0])).normalize_or_zero();
        normals.push(n0);
        binormals.push(tangents[0].cross(n0).normalize_or_zero());

        for i in 1..samples {
            let t_prev = tangents[i - 1];
            let t_cur = tangents[i];
            let mut n = normals[i - 1];

            let axis = t_prev.cross(t_cur);
            let axis_len = axis.length();
            if axis_len > 1e-8 {
                let angle = t_prev.dot(t_cur).clamp(-1.0, 1.0).acos();
                n = Quat::from_axis_angle(axis / axis_len, angle) * n;
            }

            let n = (n - t_cur * n.dot(t_cur)).normalize_or_zero();
            binormals.push(t_cur.cross(n).normalize_or_zero());
            normals.push(n);
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    pub fn frame_at(&self, u: f32) -> Frame {
        let samples = self.tangents.len();
        let i_f = u.clamp(0.0, 1.0) * (samples - 1) as f32;
        let i = (i_f.floor() as usize).min(samples - 2);
        let t = i_f - i as f32;
        let lerp = |v: &[Vec3]| v[i].lerp(v[i + 1], t).normalize_or_zero();
        Frame {
            tangent: lerp(&self.tangents),
            normal: lerp(&self.normals),
            binormal: lerp(&self.binormals),
        }
    }
}

/// Tube of `radius` around `curve`, every vertex tinted by the tube colour.
pub fn tube_mesh<C: Curve>(
    curve: &C,
    frames: &Frames,
    tubular_segments: usize,
    radial_segments: usize,
    radius: f32,
) -> Mesh {
    let rings = tubular_segments + 1;
    let ring_verts = radial_segments + 1;

    let mut vertices = Vec::with_capacity(rings * ring_verts);
    for j in 0..rings {
        let u = j as f32 / tubular_segments as f32;
        let center = curve.point_at(u);
        let f = frames.frame_at(u);
        for i in 0..ring_verts {
            let ang = i as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let dir = f.normal * ang.cos() + f.binormal * ang.sin();
            // subtle banding so the walls read as moving past the camera
            let shade = if (j + i) % 2 == 0 { 1.0 } else { 0.85 };
            vertices.push(Vertex {
                position: (center + dir * radius).to_array(),
                color: [shade, shade, shade, 1.0],
                tint: 1.0,
                uv: [u, i as f32 / radial_segments as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
    for j in 0..tubular_segments {
        let ring0 = j * ring_verts;
        let ring1 = (j + 1) * ring_verts;
        for i in 0..radial_segments {
            let a = (ring0 + i) as u32;
            let b = (ring1 + i) as u32;
            let c = (ring1 + i + 1) as u32;
            let d = (ring0 + i + 1) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Mesh { vertices, indices }
}

/// Flat XY quad centred on `center`, mapping a whole image upright onto it.
pub fn quad(center: Vec3, half_size: Vec2, color: [f32; 4]) -> Mesh {
    let corners = [
        (Vec2::new(-half_size.x, -half_size.y), [0.0, 1.0]),
        (Vec2::new(half_size.x, -half_size.y), [1.0, 1.0]),
        (Vec2::new(half_size.x, half_size.y), [1.0, 0.0]),
        (Vec2::new(-half_size.x, half_size.y), [0.0, 0.0]),
    ];
    Mesh {
        vertices: corners
            .iter()
            .map(|&(c, uv)| Vertex {
                position: (center + c.extend(0.0)).to_array(),
                color,
                tint: 0.0,
                uv,
            })
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LineCurve;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
    }

    #[test]
    fn quad_maps_image_top_to_top_edge() {
        let m = quad(Vec3::ZERO, Vec2::new(2.0, 1.0), [1.0; 4]);
        for v in &m.vertices {
            let [x, y, _] = v.position;
            assert_eq!(v.uv[0], if x < 0.0 { 0.0 } else { 1.0 });
            assert_eq!(v.uv[1], if y > 0.0 { 0.0 } else { 1.0 });
        }
    }

    #[test]
    fn tube_counts_and_radius() {
        let curve = LineCurve::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        let frames = Frames::build(&curve, 16);
        let mesh = tube_mesh(&curve, &frames, 8, 6, 0.65);
        assert_eq!(mesh.vertices.len(), 9 * 7);
        assert_eq!(mesh.indices.len(), 8 * 6 * 6);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.truncate().length() - 0.65).abs() < 1e-4);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn frames_are_orthonormal() {
        let curve = LineCurve::new(Vec3::ZERO, Vec3::new(3.0, 1.0, -10.0));
        let frames = Frames::build(&curve, 8);
        let f = frames.frame_at(0.37);
        assert!(f.tangent.dot(f.normal).abs() < 1e-4);
        assert!(f.normal.dot(f.binormal).abs() < 1e-4);
        assert!((f.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn append_offsets_indices() {
        let mut m = quad(Vec3::ZERO, Vec2::ONE, [1.0; 4]);
        m.append(&quad(Vec3::Z, Vec2::ONE, [1.0; 4]));
        assert_eq!(m.vertices.len(), 8);
        assert_eq!(&m.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }
}

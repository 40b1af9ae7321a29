//! Where pictures and segment markers sit in the tunnel.

use crate::constants::*;
use crate::effects::EffectTable;
use crate::geometry::{quad, Mesh};
use crate::objects::InteractiveObject;
use crate::path::{Curve, PathModel};
use glam::{Vec2, Vec3};

/// Top-left, top-right, bottom-left, bottom-right of the cluster rectangle.
const CORNERS: [Vec2; 4] = [
    Vec2::new(-CLUSTER_WIDTH / 2.0, CLUSTER_HEIGHT / 2.0),
    Vec2::new(CLUSTER_WIDTH / 2.0, CLUSTER_HEIGHT / 2.0),
    Vec2::new(-CLUSTER_WIDTH / 2.0, -CLUSTER_HEIGHT / 2.0),
    Vec2::new(CLUSTER_WIDTH / 2.0, -CLUSTER_HEIGHT / 2.0),
];

pub fn texture_url(index: usize) -> String {
    format!("img/img{}.jpeg", index + 1)
}

pub fn audio_url(index: usize) -> String {
    format!("audio/sound{}.mp3", index + 1)
}

pub fn picture_position(index: usize) -> Vec3 {
    let cluster = index / PICTURES_PER_CLUSTER;
    let corner = CORNERS[index % PICTURES_PER_CLUSTER];
    Vec3::new(corner.x, corner.y, -(cluster as f32) * CLUSTER_SPACING)
}

pub fn picture_object(index: usize) -> InteractiveObject {
    InteractiveObject::new(
        index,
        picture_position(index),
        Vec2::new(PICTURE_WIDTH, PICTURE_HEIGHT),
    )
}

/// Markers sit at `(i + 1) / (count + 1)`, so none lands on either end.
#[inline]
pub fn marker_fraction(index: usize, count: usize) -> f32 {
    (index + 1) as f32 / (count + 1) as f32
}

/// Rough rendered width of `label` at the marker text size.
pub fn label_width(label: &str) -> f32 {
    label.chars().count() as f32 * MARKER_TEXT_SIZE * MARKER_GLYPH_ADVANCE
}

/// Left edge of a marker label, centred horizontally on the path.
pub fn marker_position<C: Curve>(
    path: &PathModel<C>,
    index: usize,
    count: usize,
    label: &str,
) -> Vec3 {
    let center = path.point_at_fraction(marker_fraction(index, count)).position;
    center + Vec3::new(-0.5 * label_width(label), 0.0, 0.0)
}

/// Textured panel for one picture; white so the image shows unaltered.
pub fn picture_mesh(object: &InteractiveObject) -> Mesh {
    quad(object.position, object.half_size, [1.0; 4])
}

/// One bar per segment label, in the label's text colour.
pub fn marker_mesh<C: Curve>(path: &PathModel<C>, table: &EffectTable) -> Mesh {
    let mut mesh = Mesh::default();
    let count = table.len();
    for (i, effect) in table.iter().enumerate() {
        let half = Vec2::new(label_width(effect.label) * 0.5, MARKER_BAR_HEIGHT * 0.5);
        let left = marker_position(path, i, count, effect.label);
        let center = left + Vec3::new(half.x, 0.0, 0.0);
        mesh.append(&quad(center, half, effect.text_color.linear_rgba(1.0)));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LineCurve;

    #[test]
    fn pictures_fill_corners_then_advance() {
        assert_eq!(picture_position(0), Vec3::new(-0.55, 0.35, 0.0));
        assert_eq!(picture_position(3), Vec3::new(0.55, -0.35, 0.0));
        assert_eq!(picture_position(4), Vec3::new(-0.55, 0.35, -5.0));
        assert_eq!(picture_position(100).z, -125.0);
    }

    #[test]
    fn texture_urls_are_one_based() {
        assert_eq!(texture_url(0), "img/img1.jpeg");
        assert_eq!(texture_url(100), "img/img101.jpeg");
        assert_eq!(audio_url(4), "audio/sound5.mp3");
    }

    #[test]
    fn markers_are_evenly_spread() {
        let path = PathModel::new(LineCurve::new(TUNNEL_START, TUNNEL_END));
        assert!((marker_fraction(0, 12) - 1.0 / 13.0).abs() < 1e-6);
        let m = marker_position(&path, 11, 12, "December");
        assert!((m.z + 100.0 * 12.0 / 13.0).abs() < 1e-3);
        assert!((m.x + 0.5 * label_width("December")).abs() < 1e-6);
    }

    #[test]
    fn picture_mesh_covers_the_pickable_panel() {
        let object = picture_object(5);
        let mesh = picture_mesh(&object);
        assert_eq!(mesh.vertices.len(), 4);
        assert!(mesh.vertices.iter().all(|v| v.tint == 0.0 && v.color == [1.0; 4]));
        let min_x = mesh.vertices.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert!((min_x - (object.position.x - object.half_size.x)).abs() < 1e-6);
        assert!(mesh.vertices.iter().all(|v| v.position[2] == object.position.z));
        let mut uvs: Vec<_> = mesh.vertices.iter().map(|v| v.uv).collect();
        uvs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(uvs, vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn one_marker_bar_per_segment() {
        let path = PathModel::new(LineCurve::new(TUNNEL_START, TUNNEL_END));
        let table = EffectTable::months(AUDIO_TRACK_COUNT);
        let bars = marker_mesh(&path, &table);
        assert_eq!(bars.vertices.len(), 12 * 4);
        assert_eq!(bars.indices.len(), 12 * 6);
        assert!(marker_mesh(&path, &EffectTable::new(vec![])).is_empty());
    }
}

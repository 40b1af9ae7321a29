use glam::Vec2;

/// Client (CSS) coordinates to canvas backing-store pixels.
///
/// `rect` is the canvas bounding client rect as `[left, top, width, height]`.
#[inline]
pub fn client_to_canvas_px(client: Vec2, rect: [f32; 4], canvas_px: (u32, u32)) -> Vec2 {
    let [left, top, width, height] = rect;
    let sx = if width > 0.0 { canvas_px.0 as f32 / width } else { 1.0 };
    let sy = if height > 0.0 { canvas_px.1 as f32 / height } else { 1.0 };
    Vec2::new((client.x - left) * sx, (client.y - top) * sy)
}

/// Backing-store size for a CSS box at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr) as u32;
    let h = (css_height * dpr) as u32;
    (w.max(1), h.max(1))
}

#[inline]
pub fn is_start_key(key: &str, key_code: u32) -> bool {
    key == "Enter" || key_code == 13
}

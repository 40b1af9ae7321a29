//! Text shown to the user: popup, toggle button, load progress.

use glam::Vec3;

pub fn popup_html(position: Vec3) -> String {
    format!(
        "You clicked on a picture!<br>Position: {}, {}, {}",
        position.x, position.y, position.z
    )
}

#[inline]
pub fn toggle_label(playing: bool) -> &'static str {
    if playing {
        "Pause Audio"
    } else {
        "Play Audio"
    }
}

pub fn progress_line(url: &str, loaded: usize, total: usize) -> String {
    format!("Loading file: {}. Loaded {} of {} files.", url, loaded, total)
}

/// DOM hooks and asset locations used by the web front-end.
///
/// Element ids match the hosting page; everything numeric about the scene
/// lives in `tunnel_core::constants`.
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const TOGGLE_AUDIO_ID: &str = "toggle-audio";

pub const FONT_URL: &str = "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json";


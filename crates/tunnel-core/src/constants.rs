use glam::Vec3;

// Shared traversal/scene tuning constants used by the web frontend.

// Scroll
pub const SCROLL_SENSITIVITY: f32 = 0.00005; // progress per raw wheel unit
pub const LOOK_AHEAD: f32 = 0.03; // camera look-at offset along the path (fraction)

// Path
pub const TUNNEL_START: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const TUNNEL_END: Vec3 = Vec3::new(0.0, 0.0, -100.0);

// Tube
pub const TUBE_RADIUS: f32 = 0.65;
pub const TUBULAR_SEGMENTS: usize = 222;
pub const RADIAL_SEGMENTS: usize = 16;
pub const FRAME_SAMPLES: usize = 256; // parallel-transport frames sampled along the path

// Picture clusters
pub const PICTURE_COUNT: usize = 101;
pub const PICTURES_PER_CLUSTER: usize = 4;
pub const CLUSTER_SPACING: f32 = 5.0; // distance between clusters along -Z
pub const CLUSTER_WIDTH: f32 = 1.1; // corner rectangle the pictures sit on
pub const CLUSTER_HEIGHT: f32 = 0.7;
pub const PICTURE_WIDTH: f32 = 0.7;
pub const PICTURE_HEIGHT: f32 = 0.35;

// Segment markers
pub const MARKER_TEXT_SIZE: f32 = 0.5;
pub const MARKER_GLYPH_ADVANCE: f32 = 0.6; // approximate advance per glyph, in text sizes
pub const MARKER_BAR_HEIGHT: f32 = 0.12;

// Audio
pub const AUDIO_TRACK_COUNT: usize = 5;
pub const AUDIO_VOLUME: f32 = 0.5;

// Atmosphere
pub const FOG_DENSITY: f32 = 0.3;
pub const FOG_COLOR: u32 = 0x000000;
pub const INITIAL_TUBE_COLOR: u32 = 0x00ff00;
pub const INITIAL_BACKGROUND_COLOR: u32 = 0x000000;

// Camera projection
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub mod assets;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod effects;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod objects;
pub mod path;
pub mod pick;
pub mod scroll;
pub mod segment;
pub mod traversal;

pub use assets::*;
pub use camera::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use driver::*;
pub use effects::*;
pub use geometry::*;
pub use input::*;
pub use objects::*;
pub use path::*;
pub use pick::*;
pub use scroll::*;
pub use segment::*;
pub use traversal::*;

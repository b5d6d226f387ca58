pub mod view;

pub use view::{Viewport, WheelPainter};

pub const MARKER_RADIUS: f64 = 15.0; // day marker circle size
pub const CAPSULE_RADIUS: f64 = 19.0; // highlight ring around the centered day
pub const CAPSULE_LINE_WIDTH: f64 = 3.0;
pub const CENTER_CIRCLE_RADIUS: f64 = 60.0;
pub const EVENT_DOT_RADIUS: f64 = 2.5;
pub const MARKER_FONT_SIZE: f64 = 12.0;
pub const CENTER_FONT_SIZE: f64 = 18.0;
pub const CENTER_DETAIL_FONT_SIZE: f64 = 11.0;
pub const MARKER_IDLE_ALPHA: f64 = 0.7;

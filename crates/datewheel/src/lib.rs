//! Circular date wheel: a ring of day markers rotated by vertical drags, with tap/drag
//! disambiguation and snapping to the nearest day on release.

pub mod animation;
pub mod calendar;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod render;
pub mod ring;
pub mod state;
pub mod wheel;

pub use calendar::{CalendarError, WheelKind};
pub use config::{WheelConfig, WheelOverrides};
pub use geometry::Point;
pub use gesture::{DragSample, Resolution};
pub use render::{Capsule, Frame, Marker, MarkerLayer, RenderMode};
pub use ring::{Annotations, EventCount};
pub use state::WheelState;
pub use wheel::DateWheel;

use std::f64::consts::{PI, TAU};

pub const START_OFFSET: f64 = -PI / 2.0; // index 0 sits at 12 o'clock

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn offset_by(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

pub fn angle_per_slot(slot_count: usize) -> f64 {
    debug_assert!(slot_count > 0, "wheel used with an empty ring");
    TAU / slot_count.max(1) as f64
}

/// Screen angle of a slot, with `rotation` added on top of the index-derived angle.
pub fn slot_screen_angle(index: usize, slot_count: usize, rotation: f64) -> f64 {
    index as f64 * angle_per_slot(slot_count) + START_OFFSET + rotation
}

pub fn position_for_slot(index: usize, slot_count: usize, radius: f64, rotation: f64) -> Point {
    let theta = slot_screen_angle(index, slot_count, rotation);
    Point::new(radius * theta.cos(), radius * theta.sin())
}

/// Converts an incremental vertical drag into a rotation increment.
///
/// Screen y grows downward. Dragging up (negative delta) lowers the angle, which moves the
/// highlight toward later slots.
pub fn drag_delta_to_angle_delta(vertical_delta: f64, radius: f64, sensitivity: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    vertical_delta / radius * sensitivity
}

pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if normalized >= TAU { 0.0 } else { normalized }
}

/// Exact rotation at which `index` is the highlighted slot.
pub fn angle_for_slot(index: usize, slot_count: usize) -> f64 {
    -(index as f64) * angle_per_slot(slot_count)
}

pub fn nearest_slot_index(angle: f64, slot_count: usize) -> usize {
    if slot_count == 0 {
        debug_assert!(false, "wheel used with an empty ring");
        return 0;
    }
    let steps = (-normalize_angle(angle) / angle_per_slot(slot_count)).round() as i64;
    steps.rem_euclid(slot_count as i64) as usize
}

/// Fractional slot position for a rotation, in `[0, slot_count)`.
pub fn fractional_index(angle: f64, slot_count: usize) -> f64 {
    if slot_count == 0 {
        return 0.0;
    }
    (-angle / angle_per_slot(slot_count)).rem_euclid(slot_count as f64)
}

pub fn angular_distance(a: f64, b: f64) -> f64 {
    // shortest path around the circle, in [0, PI]
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

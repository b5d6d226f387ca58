use crate::config::WheelConfig;
use crate::geometry::{self, Point};
use crate::ring::{Annotations, EventCount, Ring};
use chrono::NaiveDate;

/// Ring contents plus rotation. `highlighted_index` and `center_date` are always derived from
/// `current_angle`, so every mutation goes through here.
#[derive(Debug, Clone)]
pub struct WheelState {
    config: WheelConfig,
    ring: Ring,
    current_angle: f64,
    highlighted_index: usize,
    center_date: Option<NaiveDate>,
    today: NaiveDate,
}

impl WheelState {
    pub fn new(config: WheelConfig, today: NaiveDate) -> Self {
        Self {
            config,
            ring: Ring::default(),
            current_angle: 0.0,
            highlighted_index: 0,
            center_date: None,
            today,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn slot_count(&self) -> usize {
        self.ring.len()
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted_index
    }

    pub fn center_date(&self) -> Option<NaiveDate> {
        self.center_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn today_index(&self) -> Option<usize> {
        self.ring.index_of(self.today)
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Replaces the ring. Keeps the center date when the new ring still has it, otherwise
    /// falls back to today, then to the first slot.
    pub fn setup_days(&mut self, dates: &[NaiveDate], annotations: &Annotations) {
        let previous = self.center_date;
        self.ring = Ring::new(dates, annotations, self.config.radius);

        let index = previous
            .and_then(|d| self.ring.index_of(d))
            .or_else(|| self.today_index())
            .unwrap_or(0);

        log::debug!(
            "Ring rebuilt with {} slots, center {:?} -> index {}",
            self.ring.len(),
            previous,
            index
        );
        self.set_highlighted_index(index);
    }

    pub fn set_config(&mut self, config: WheelConfig) {
        self.config = config;
        self.ring.relayout(config.radius);
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.config.radius = radius;
        self.ring.relayout(radius);
    }

    /// Re-centers on `date` without any drag semantics. Returns the new index, or `None` when
    /// the date is not on the ring.
    pub fn set_center_date(&mut self, date: NaiveDate) -> Option<usize> {
        let index = self.ring.index_of(date)?;
        self.set_highlighted_index(index);
        Some(index)
    }

    pub fn set_highlighted_index(&mut self, index: usize) {
        let count = self.ring.len();
        if count == 0 {
            self.current_angle = 0.0;
            self.highlighted_index = 0;
            self.center_date = None;
            return;
        }
        let index = index % count;
        self.current_angle = geometry::angle_for_slot(index, count);
        self.highlighted_index = index;
        self.center_date = self.ring.date(index);
    }

    /// Applies live drag rotation. No snapping happens here; returns `true` when the
    /// highlighted slot changed.
    pub fn rotate_by(&mut self, delta: f64) -> bool {
        self.set_current_angle(self.current_angle + delta)
    }

    /// Sets a free rotation and re-derives the highlight from it.
    pub fn set_current_angle(&mut self, angle: f64) -> bool {
        self.current_angle = angle;
        if self.ring.is_empty() {
            return false;
        }
        let index = geometry::nearest_slot_index(angle, self.ring.len());
        let changed = index != self.highlighted_index;
        self.highlighted_index = index;
        self.center_date = self.ring.date(index);
        changed
    }

    /// Commits the nearest slot and resets the angle to its exact value.
    pub fn snap(&mut self) -> usize {
        let index = self.nearest_index();
        self.set_highlighted_index(index);
        index
    }

    pub fn nearest_index(&self) -> usize {
        if self.ring.is_empty() {
            return 0;
        }
        geometry::nearest_slot_index(self.current_angle, self.ring.len())
    }

    pub fn angle_for_index(&self, index: usize) -> f64 {
        if self.ring.is_empty() {
            return 0.0;
        }
        geometry::angle_for_slot(index, self.ring.len())
    }

    pub fn event_count(&self, index: usize) -> EventCount {
        self.ring.event_count(index)
    }

    pub fn has_events(&self, index: usize) -> bool {
        self.ring.has_events(index)
    }

    pub fn position(&self, index: usize) -> Point {
        self.ring.position(index)
    }
}

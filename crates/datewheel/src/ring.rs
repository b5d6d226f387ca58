use crate::geometry::{self, Point};
use chrono::NaiveDate;
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct EventCount(u32);

impl EventCount {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn has_events(&self) -> bool {
        self.0 > 0
    }
}

pub type Annotations = HashMap<NaiveDate, EventCount>;

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub date: NaiveDate,
    pub angle: f64,
    pub offset: Point,
    pub events: EventCount,
}

/// Chronological day slots laid out on a circle. Offsets are relative to the ring center and
/// only change when the ring is rebuilt or its radius changes.
#[derive(Debug, Clone, Default)]
pub struct Ring {
    slots: Vec<Slot>,
    radius: f64,
}

impl Ring {
    pub fn new(dates: &[NaiveDate], annotations: &Annotations, radius: f64) -> Self {
        debug_assert!(!dates.is_empty(), "ring built from an empty date range");
        debug_assert!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "ring dates must be strictly chronological"
        );

        let count = dates.len();
        let slots = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| Slot {
                date,
                angle: geometry::slot_screen_angle(i, count, 0.0),
                offset: geometry::position_for_slot(i, count, radius, 0.0),
                events: annotations.get(&date).copied().unwrap_or_default(),
            })
            .collect();

        Self { slots, radius }
    }

    pub fn relayout(&mut self, radius: f64) {
        if radius == self.radius {
            return;
        }
        let count = self.slots.len();
        self.radius = radius;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.offset = geometry::position_for_slot(i, count, radius, 0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.get(index).map(|s| s.date)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.slots.binary_search_by(|s| s.date.cmp(&date)).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    pub fn event_count(&self, index: usize) -> EventCount {
        self.get(index).map(|s| s.events).unwrap_or_default()
    }

    pub fn has_events(&self, index: usize) -> bool {
        self.event_count(index).has_events()
    }

    pub fn position(&self, index: usize) -> Point {
        self.get(index).map(|s| s.offset).unwrap_or_default()
    }

    /// Closest slot whose marker contains `point` (relative to the ring center).
    pub fn hit_test(&self, point: Point, hit_radius: f64) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.offset.distance(point)))
            .filter(|&(_, d)| d <= hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

use crate::geometry::{self, Point};
use crate::ring::EventCount;
use crate::state::WheelState;
use chrono::NaiveDate;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Rebuilds every marker on every frame.
    #[strum(serialize = "immediate", serialize = "simple")]
    Immediate,
    /// Keeps the marker layer cached and only refreshes the capsule per frame.
    #[default]
    #[strum(serialize = "layered", serialize = "optimized")]
    Layered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub date: NaiveDate,
    pub offset: Point,
    pub highlighted: bool,
    pub is_today: bool,
    pub events: EventCount,
}

/// Static day markers. `generation` changes whenever the layer is rebuilt, so a renderer can
/// tell when its cached copy is stale.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    pub generation: u64,
    pub markers: Vec<Marker>,
}

/// The moving highlight. Its offset follows the displayed angle continuously.
#[derive(Debug, Clone, PartialEq)]
pub struct Capsule {
    pub offset: Point,
    pub index: usize,
    pub date: NaiveDate,
    pub events: EventCount,
}

#[derive(Debug)]
pub struct Frame<'a> {
    pub markers: &'a MarkerLayer,
    pub markers_changed: bool,
    pub capsule: Option<Capsule>,
}

#[derive(Debug, Default)]
pub struct RenderAdapter {
    mode: RenderMode,
    layer: MarkerLayer,
    rendered_highlight: Option<usize>,
    dirty: bool,
}

impl RenderAdapter {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            layer: MarkerLayer::default(),
            rendered_highlight: None,
            dirty: true,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    /// Forces a marker rebuild on the next frame (ring contents or radius changed).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn rebuilds(&self) -> u64 {
        self.layer.generation
    }

    pub fn needs_markers(&self, state: &WheelState) -> bool {
        match self.mode {
            RenderMode::Immediate => true,
            RenderMode::Layered => {
                self.dirty || self.rendered_highlight != Some(state.highlighted_index())
            }
        }
    }

    pub fn frame(&mut self, state: &WheelState, displayed_angle: f64) -> Frame<'_> {
        let markers_changed = self.needs_markers(state);
        if markers_changed {
            self.rebuild(state);
        }

        Frame {
            markers: &self.layer,
            markers_changed,
            capsule: capsule(state, displayed_angle),
        }
    }

    fn rebuild(&mut self, state: &WheelState) {
        let highlighted = state.highlighted_index();
        let today = state.today();

        self.layer.markers = state
            .ring()
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| Marker {
                index,
                date: slot.date,
                offset: slot.offset,
                highlighted: index == highlighted,
                is_today: slot.date == today,
                events: slot.events,
            })
            .collect();
        self.layer.generation += 1;
        self.rendered_highlight = Some(highlighted);
        self.dirty = false;
    }
}

pub fn capsule(state: &WheelState, displayed_angle: f64) -> Option<Capsule> {
    let count = state.slot_count();
    let date = state.center_date()?;
    let index = state.highlighted_index();

    Some(Capsule {
        offset: geometry::position_for_slot(0, count, state.config().radius, -displayed_angle),
        index,
        date,
        events: state.event_count(index),
    })
}

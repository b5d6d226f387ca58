use crate::geometry::{self, Point};
use crate::state::WheelState;
use chrono::NaiveDate;

/// One pointer sample. Both fields are in points; `location` is relative to the ring center
/// and `translation` is the total movement since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    pub location: Point,
    pub translation: Point,
}

impl DragSample {
    pub fn new(location: Point, translation: Point) -> Self {
        Self {
            location,
            translation,
        }
    }

    pub fn start_location(&self) -> Point {
        self.location.relative_to(self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub start_location: Point,
    pub start_angle: f64,
    pub last_translation: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pressed(Session),
    Dragging(Session),
}

/// How a finished gesture picked its date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Tap inside the center capsule: the current center date is confirmed as is.
    Confirmed { index: usize, date: NaiveDate },
    /// Tap on a day marker: that slot is selected directly, no rotation.
    Selected { index: usize, date: NaiveDate },
    /// Drag released: the wheel snapped to the nearest slot and should animate
    /// from `from_angle` to `to_angle`.
    Settled {
        index: usize,
        date: NaiveDate,
        from_angle: f64,
        to_angle: f64,
    },
}

impl Resolution {
    pub fn date(&self) -> NaiveDate {
        match *self {
            Self::Confirmed { date, .. }
            | Self::Selected { date, .. }
            | Self::Settled { date, .. } => date,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Self::Confirmed { index, .. }
            | Self::Selected { index, .. }
            | Self::Settled { index, .. } => index,
        }
    }

    pub fn is_tap(&self) -> bool {
        !matches!(self, Self::Settled { .. })
    }
}

#[derive(Debug, Default)]
pub struct GestureInterpreter {
    phase: Phase,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn touch_down(&mut self, location: Point, state: &WheelState) {
        self.phase = Phase::Pressed(Session {
            start_location: location,
            start_angle: state.current_angle(),
            last_translation: Point::default(),
        });
    }

    /// Rotates the wheel 1:1 with the vertical movement since the previous sample. Returns
    /// `true` when the highlighted slot changed.
    pub fn drag_changed(&mut self, sample: DragSample, state: &mut WheelState) -> bool {
        let mut session = match self.phase {
            Phase::Idle => Session {
                start_location: sample.start_location(),
                start_angle: state.current_angle(),
                last_translation: Point::default(),
            },
            Phase::Pressed(session) | Phase::Dragging(session) => session,
        };

        let changed = Self::apply_increment(&mut session, sample, state);
        self.phase = Phase::Dragging(session);
        changed
    }

    /// Classifies the finished gesture as a tap or a drag and commits the result. Calling it
    /// again without a new gesture does nothing.
    pub fn drag_ended(&mut self, sample: DragSample, state: &mut WheelState) -> Option<Resolution> {
        let mut session = match std::mem::take(&mut self.phase) {
            Phase::Idle => return None,
            Phase::Pressed(session) | Phase::Dragging(session) => session,
        };

        let displacement = sample.location.distance(session.start_location);
        if displacement < state.config().tap_threshold {
            // the start angle can be mid-animation when the press interrupted a snap
            state.set_current_angle(session.start_angle);
            state.snap();
            return Self::resolve_tap(sample.location, state);
        }

        Self::apply_increment(&mut session, sample, state);
        let from_angle = state.current_angle();
        let index = state.snap();
        let date = state.center_date()?;
        log::debug!("Drag settled on slot {} ({})", index, date);

        Some(Resolution::Settled {
            index,
            date,
            from_angle,
            to_angle: state.current_angle(),
        })
    }

    /// Abandons the gesture and puts the rotation back where it started.
    pub fn cancel(&mut self, state: &mut WheelState) {
        if let Phase::Pressed(session) | Phase::Dragging(session) = std::mem::take(&mut self.phase)
        {
            state.set_current_angle(session.start_angle);
        }
    }

    fn apply_increment(session: &mut Session, sample: DragSample, state: &mut WheelState) -> bool {
        let dy = sample.translation.y - session.last_translation.y;
        session.last_translation = sample.translation;
        if dy == 0.0 {
            return false;
        }

        let config = state.config();
        let delta = geometry::drag_delta_to_angle_delta(dy, config.radius, config.sensitivity);
        state.rotate_by(delta)
    }

    fn resolve_tap(location: Point, state: &mut WheelState) -> Option<Resolution> {
        let config = *state.config();

        if location.magnitude() <= config.center_hit_radius {
            let date = state.center_date()?;
            log::debug!("Center tapped, confirming {}", date);
            return Some(Resolution::Confirmed {
                index: state.highlighted_index(),
                date,
            });
        }

        let index = state.ring().hit_test(location, config.slot_hit_radius)?;
        state.set_highlighted_index(index);
        let date = state.center_date()?;
        log::debug!("Slot {} tapped ({})", index, date);
        Some(Resolution::Selected { index, date })
    }
}

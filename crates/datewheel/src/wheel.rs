use crate::animation::SnapAnimation;
use crate::config::WheelConfig;
use crate::geometry::Point;
use crate::gesture::{DragSample, GestureInterpreter, Resolution};
use crate::render::{Frame, RenderAdapter, RenderMode};
use crate::ring::Annotations;
use crate::state::WheelState;
use chrono::NaiveDate;
use std::fmt;
use std::time::Instant;

pub type DateCallback = Box<dyn FnMut(NaiveDate)>;

/// A date wheel as a host sees it: feed it pointer events, ring contents and external
/// selections, draw the frames it produces, and receive resolved dates through the callback.
pub struct DateWheel {
    state: WheelState,
    gesture: GestureInterpreter,
    adapter: RenderAdapter,
    snap: Option<SnapAnimation>,
    on_resolved: Option<DateCallback>,
}

impl fmt::Debug for DateWheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateWheel")
            .field("state", &self.state)
            .field("gesture", &self.gesture)
            .field("adapter", &self.adapter)
            .field("snap", &self.snap)
            .finish_non_exhaustive()
    }
}

impl DateWheel {
    pub fn new(config: WheelConfig, mode: RenderMode, today: NaiveDate) -> Self {
        Self {
            state: WheelState::new(config, today),
            gesture: GestureInterpreter::new(),
            adapter: RenderAdapter::new(mode),
            snap: None,
            on_resolved: None,
        }
    }

    pub fn on_date_resolved(&mut self, callback: impl FnMut(NaiveDate) + 'static) {
        self.on_resolved = Some(Box::new(callback));
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn center_date(&self) -> Option<NaiveDate> {
        self.state.center_date()
    }

    pub fn highlighted_index(&self) -> usize {
        self.state.highlighted_index()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.adapter.mode()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.adapter.set_mode(mode);
    }

    pub fn set_config(&mut self, config: WheelConfig) {
        self.state.set_config(config);
        self.adapter.invalidate();
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if self.state.today() != today {
            self.state.set_today(today);
            self.adapter.invalidate();
        }
    }

    /// Replaces the ring. A gesture in progress is abandoned since its start angle belongs to
    /// the old ring.
    pub fn setup_days(&mut self, dates: &[NaiveDate], annotations: &Annotations) {
        self.gesture.cancel(&mut self.state);
        self.snap = None;
        self.state.setup_days(dates, annotations);
        self.adapter.invalidate();
    }

    /// Re-centers on a date chosen outside the wheel and returns its slot, or `None` when the
    /// date is not on the ring. Never fires the callback.
    pub fn push_external_selection(&mut self, date: NaiveDate) -> Option<usize> {
        let Some(index) = self.state.ring().index_of(date) else {
            log::debug!("External selection {} is not on the ring", date);
            return None;
        };
        if self.state.center_date() == Some(date) && !self.gesture.is_active() {
            return Some(index);
        }

        self.gesture.cancel(&mut self.state);
        self.snap = None;
        self.state.set_center_date(date);
        log::debug!("External selection {} -> slot {}", date, index);
        Some(index)
    }

    pub fn touch_down(&mut self, location: Point, now: Instant) {
        self.interrupt_snap(now);
        self.gesture.touch_down(location, &self.state);
    }

    pub fn drag_changed(&mut self, sample: DragSample, now: Instant) -> bool {
        if !self.gesture.is_active() {
            self.interrupt_snap(now);
        }
        self.gesture.drag_changed(sample, &mut self.state)
    }

    pub fn drag_ended(&mut self, sample: DragSample, now: Instant) -> Option<Resolution> {
        let resolution = self.gesture.drag_ended(sample, &mut self.state)?;
        if let Resolution::Settled {
            from_angle,
            to_angle,
            ..
        } = resolution
        {
            self.start_snap(from_angle, to_angle, now);
        }
        self.notify(resolution.date());
        Some(resolution)
    }

    pub fn cancel(&mut self) {
        self.gesture.cancel(&mut self.state);
    }

    /// Rotates to today with the same animated correction as a drag release.
    pub fn jump_to_today(&mut self, now: Instant) -> Option<NaiveDate> {
        let index = self.state.today_index()?;
        let from = self.displayed_angle(now);
        self.gesture.cancel(&mut self.state);
        self.state.set_highlighted_index(index);
        self.start_snap(from, self.state.current_angle(), now);

        let today = self.state.center_date()?;
        log::debug!("Jumped to today ({}) at slot {}", today, index);
        self.notify(today);
        Some(today)
    }

    pub fn displayed_angle(&self, now: Instant) -> f64 {
        match &self.snap {
            Some(anim) if !anim.is_finished(now) => anim.value_at(now),
            _ => self.state.current_angle(),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.snap.is_some_and(|anim| !anim.is_finished(now))
    }

    pub fn frame(&mut self, now: Instant) -> Frame<'_> {
        if self.snap.is_some_and(|anim| anim.is_finished(now)) {
            self.snap = None;
        }
        let angle = self.displayed_angle(now);
        self.adapter.frame(&self.state, angle)
    }

    fn start_snap(&mut self, from: f64, to: f64, now: Instant) {
        self.snap = Some(SnapAnimation::new(
            from,
            to,
            now,
            self.state.config().snap_duration(),
        ));
    }

    // A new gesture takes over from wherever the snap animation currently is.
    fn interrupt_snap(&mut self, now: Instant) {
        if let Some(anim) = self.snap.take()
            && !anim.is_finished(now)
        {
            self.state.set_current_angle(anim.value_at(now));
        }
    }

    fn notify(&mut self, date: NaiveDate) {
        if let Some(callback) = self.on_resolved.as_mut() {
            callback(date);
        }
    }
}

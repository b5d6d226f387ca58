use chrono::{NaiveDate, Weekday};
use datewheel::geometry::{self, angle_per_slot};
use datewheel::{
    Annotations, DateWheel, DragSample, EventCount, Point, RenderMode, Resolution, WheelConfig,
    WheelKind, calendar,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Harness {
    wheel: DateWheel,
    resolved: Rc<RefCell<Vec<NaiveDate>>>,
    now: Instant,
}

impl Harness {
    fn new(kind: WheelKind, anchor: NaiveDate, today: NaiveDate) -> Self {
        let days = calendar::window(kind, anchor, Weekday::Mon).unwrap();
        let mut wheel = DateWheel::new(WheelConfig::for_kind(kind), RenderMode::Layered, today);
        wheel.setup_days(&days, &Annotations::new());

        let resolved = Rc::new(RefCell::new(Vec::new()));
        let sink = resolved.clone();
        wheel.on_date_resolved(move |d| sink.borrow_mut().push(d));

        Self {
            wheel,
            resolved,
            now: Instant::now(),
        }
    }

    /// Drags from `start` in `steps` equal vertical increments totalling `dy`, then releases.
    fn drag(&mut self, start: Point, dy: f64, steps: u32) -> Option<Resolution> {
        self.wheel.touch_down(start, self.now);
        let mut translation = Point::default();
        for i in 1..=steps {
            translation = Point::new(0.0, dy * i as f64 / steps as f64);
            self.wheel
                .drag_changed(DragSample::new(start.offset_by(translation), translation), self.now);
        }
        self.wheel
            .drag_ended(DragSample::new(start.offset_by(translation), translation), self.now)
    }

    fn tap(&mut self, at: Point) -> Option<Resolution> {
        self.wheel.touch_down(at, self.now);
        self.wheel.drag_ended(DragSample::new(at, Point::default()), self.now)
    }

    fn resolved(&self) -> Vec<NaiveDate> {
        self.resolved.borrow().clone()
    }
}

#[test]
fn one_slot_drag_on_week_wheel_advances_one_day() {
    // 2026-10-12 is a Monday; today is outside the week so slot 0 starts highlighted
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), date(2026, 9, 1));
    assert_eq!(h.wheel.highlighted_index(), 0);
    assert_eq!(h.wheel.state().current_angle(), 0.0);

    let one_slot_px = angle_per_slot(7) * 140.0 / 0.5;
    let resolution = h.drag(Point::new(0.0, 100.0), -one_slot_px, 12);

    assert!(matches!(resolution, Some(Resolution::Settled { index: 1, .. })));
    assert_eq!(h.wheel.highlighted_index(), 1);
    assert_eq!(h.wheel.center_date(), Some(date(2026, 10, 13)));
    assert_eq!(h.resolved(), vec![date(2026, 10, 13)]);
}

#[test]
fn drag_release_matches_nearest_slot_for_many_distances() {
    for px in [12.0, 80.0, 133.3, 250.0, 601.0, 1999.0, -45.0, -700.0] {
        let mut h = Harness::new(WheelKind::Month, date(2026, 10, 1), date(2026, 10, 9));
        let start = Point::new(10.0, 100.0);
        h.wheel.touch_down(start, h.now);
        let t = Point::new(0.0, px);
        h.wheel
            .drag_changed(DragSample::new(start.offset_by(t), t), h.now);
        let at_release = h.wheel.state().current_angle();

        h.wheel
            .drag_ended(DragSample::new(start.offset_by(t), t), h.now);
        assert_eq!(
            h.wheel.highlighted_index(),
            geometry::nearest_slot_index(at_release, 31),
            "drag of {px}px"
        );
        assert_eq!(
            h.wheel.state().current_angle(),
            geometry::angle_for_slot(h.wheel.highlighted_index(), 31)
        );
    }
}

#[test]
fn jump_to_today_fires_once() {
    let today = date(2026, 10, 15);
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), today);
    h.wheel.push_external_selection(date(2026, 10, 18));
    assert_eq!(h.wheel.highlighted_index(), 6);

    assert_eq!(h.wheel.jump_to_today(h.now), Some(today));
    assert_eq!(h.wheel.highlighted_index(), 3);
    assert_eq!(h.wheel.center_date(), Some(today));
    assert_eq!(h.resolved(), vec![today]);
    assert!(h.wheel.is_animating(h.now + Duration::from_millis(10)));
}

#[test]
fn center_tap_confirms_without_rotation() {
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), date(2026, 10, 14));
    let angle = h.wheel.state().current_angle();

    let resolution = h.tap(Point::new(20.0, -15.0));
    assert!(matches!(resolution, Some(Resolution::Confirmed { index: 2, .. })));
    assert_eq!(h.wheel.state().current_angle(), angle);
    assert_eq!(h.resolved(), vec![date(2026, 10, 14)]);
    assert!(!h.wheel.is_animating(h.now));
}

#[test]
fn marker_tap_selects_that_day() {
    let mut h = Harness::new(WheelKind::Month, date(2026, 10, 1), date(2026, 10, 1));
    let target = h.wheel.state().position(20);

    let resolution = h.tap(target.offset_by(Point::new(2.0, -1.0)));
    assert!(matches!(resolution, Some(Resolution::Selected { index: 20, .. })));
    assert_eq!(h.wheel.center_date(), Some(date(2026, 10, 21)));
    assert_eq!(h.resolved(), vec![date(2026, 10, 21)]);
}

#[test]
fn tap_below_threshold_keeps_committed_slot() {
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), date(2026, 10, 16));
    let resolution = h.drag(Point::new(90.0, 0.0), -4.0, 4);

    assert_eq!(resolution, None);
    assert_eq!(h.wheel.highlighted_index(), 4);
    assert!(h.resolved().is_empty());
}

#[test]
fn refresh_keeps_center_date() {
    let mut h = Harness::new(WheelKind::Month, date(2026, 10, 1), date(2026, 10, 2));
    h.wheel.push_external_selection(date(2026, 10, 27));

    let days = calendar::month_window(date(2026, 10, 1)).unwrap();
    let mut annotations = Annotations::new();
    annotations.insert(date(2026, 10, 27), EventCount::new(4));
    h.wheel.setup_days(&days, &annotations);

    assert_eq!(h.wheel.center_date(), Some(date(2026, 10, 27)));
    assert_eq!(h.wheel.highlighted_index(), 26);
    assert!(h.wheel.state().has_events(26));

    let frame = h.wheel.frame(h.now);
    let capsule = frame.capsule.unwrap();
    assert_eq!(*capsule.events, 4);
}

#[test]
fn navigating_weeks_falls_back_deterministically() {
    let today = date(2026, 10, 17);
    let mut h = Harness::new(WheelKind::Week, today, today);
    assert_eq!(h.wheel.center_date(), Some(today));

    let next = calendar::shift(WheelKind::Week, today, 1).unwrap();
    let days = calendar::week_window(next, Weekday::Mon).unwrap();
    h.wheel.setup_days(&days, &Annotations::new());
    assert_eq!(h.wheel.center_date(), Some(date(2026, 10, 19)));

    let days = calendar::week_window(today, Weekday::Mon).unwrap();
    h.wheel.setup_days(&days, &Annotations::new());
    assert_eq!(h.wheel.center_date(), Some(today));
    assert!(h.resolved().is_empty());
}

#[test]
fn layered_frames_only_rebuild_markers_on_highlight_change() {
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), date(2026, 9, 1));
    let start = Point::new(0.0, 100.0);
    h.wheel.frame(h.now);

    h.wheel.touch_down(start, h.now);
    let mut rebuilds = 0;
    for i in 1..=40 {
        let t = Point::new(0.0, -(i as f64) * 10.0);
        h.wheel
            .drag_changed(DragSample::new(start.offset_by(t), t), h.now);
        if h.wheel.frame(h.now).markers_changed {
            rebuilds += 1;
        }
    }
    // 400px is a little over one and a half slots at 140pt radius
    assert_eq!(rebuilds, 2);
}

#[test]
fn wrap_around_drag_lands_on_earlier_day() {
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), date(2026, 9, 1));
    let one_slot_px = angle_per_slot(7) * 140.0 / 0.5;

    h.drag(Point::new(0.0, -100.0), one_slot_px * 2.0, 5);
    assert_eq!(h.wheel.highlighted_index(), 5);
    assert_eq!(h.wheel.center_date(), Some(date(2026, 10, 17)));
}

#[test]
fn switching_to_month_mid_gesture_keeps_centered_day() {
    let today = date(2026, 10, 15);
    let mut h = Harness::new(WheelKind::Week, date(2026, 10, 12), today);
    h.wheel.touch_down(Point::default(), h.now);

    let days = calendar::window(WheelKind::Month, today, Weekday::Mon).unwrap();
    h.wheel.set_config(WheelConfig::for_kind(WheelKind::Month));
    h.wheel.setup_days(&days, &Annotations::new());
    assert_eq!(h.wheel.center_date(), Some(today));

    // the finger lifts on the new ring; the old press must not confirm anything
    let resolution = h.wheel.drag_ended(DragSample::default(), h.now);
    assert_eq!(resolution, None);
    assert_eq!(h.wheel.center_date(), Some(today));
    assert!(h.resolved().is_empty());

    // the next tap works against the month ring
    let resolution = h.tap(Point::default());
    assert!(matches!(resolution, Some(Resolution::Confirmed { index: 14, .. })));
    assert_eq!(h.resolved(), vec![today]);
}

#[test]
fn tap_during_snap_leaves_capsule_on_marker() {
    let mut h = Harness::new(WheelKind::Month, date(2026, 10, 1), date(2026, 10, 1));
    // 110px is about 1.7 slots on the month wheel, so the snap has real distance to cover
    h.drag(Point::new(0.0, 100.0), -110.0, 6);
    let index = h.wheel.highlighted_index();
    assert!(h.wheel.is_animating(h.now));

    h.now += Duration::from_millis(80);
    let resolution = h.tap(Point::new(3.0, 4.0));
    assert!(matches!(resolution, Some(Resolution::Confirmed { .. })));
    assert_eq!(h.wheel.highlighted_index(), index);
    assert_eq!(
        h.wheel.state().current_angle(),
        geometry::angle_for_slot(index, 31)
    );

    let frame = h.wheel.frame(h.now);
    let capsule = frame.capsule.unwrap();
    assert!(capsule.offset.distance(h.wheel.state().position(index)) < 1e-9);
}

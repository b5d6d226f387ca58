use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{Viewport, WheelPainter};
use chrono::{Local, NaiveDate};
use datewheel::{DateWheel, DragSample, Point, WheelKind, calendar};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub wheel: Rc<RefCell<DateWheel>>,
    pub painter: Rc<RefCell<WheelPainter>>,
    pub config: Config,
    pub anchor: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    TouchDown(Point),
    DragUpdate { location: Point, translation: Point },
    DragEnd { location: Point, translation: Point },
    DragCancel,
    JumpToToday,
    Select(NaiveDate),
    Navigate(i32),
    SwitchKind(WheelKind),
    DateResolved(NaiveDate),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::JumpToToday => AppMsg::JumpToToday,
            AppEvent::Select(d) => AppMsg::Select(d),
            AppEvent::Navigate(n) => AppMsg::Navigate(n),
            AppEvent::SwitchKind(k) => AppMsg::SwitchKind(k),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn ring_center(&self) -> Point {
        Point::new(
            self.drawing_area.width() as f64 / 2.0,
            self.drawing_area.height() as f64 / 2.0,
        )
    }

    fn to_ring(&self, location: Point) -> Point {
        location.relative_to(self.ring_center())
    }

    fn reload_days(&mut self) {
        let days = match calendar::window(self.config.kind, self.anchor, self.config.week_start) {
            Ok(days) => days,
            Err(e) => {
                log::error!("Failed to build date window: {}", e);
                return;
            }
        };
        let annotations = self.config.annotations();

        {
            let mut wheel = self.wheel.borrow_mut();
            wheel.set_today(Local::now().date_naive());
            wheel.setup_days(&days, &annotations);
        }
        self.drawing_area.queue_draw();
    }

    /// Moves the visible window so that `date` is on the ring.
    fn ensure_visible(&mut self, date: NaiveDate) {
        let visible = self.wheel.borrow().state().ring().contains(date);
        if !visible {
            self.anchor = date;
            self.reload_days();
        }
    }

    pub fn heading(&self) -> String {
        let wheel = self.wheel.borrow();
        let slots = wheel.state().ring().slots();
        match (slots.first(), slots.last()) {
            (Some(first), Some(last)) => match self.config.kind {
                WheelKind::Month => first.date.format("%B %Y").to_string(),
                WheelKind::Week => format!(
                    "{} - {}",
                    first.date.format("%-d %b"),
                    last.date.format("%-d %b %Y")
                ),
            },
            _ => String::new(),
        }
    }

    pub fn footer(&self) -> String {
        match self.selected {
            Some(date) => format!("Selected {}", date.format("%A %-d %B %Y")),
            None => "Drag the wheel or tap a day".to_string(),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, NaiveDate, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            set_default_size: (420, 520),
            add_css_class: "orbit-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Left => sender.input(AppMsg::Navigate(-1)),
                        gtk::gdk::Key::Right => sender.input(AppMsg::Navigate(1)),
                        gtk::gdk::Key::Home | gtk::gdk::Key::t => sender.input(AppMsg::JumpToToday),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 4,

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 6,
                    set_margin_all: 6,

                    gtk::Button {
                        set_icon_name: "go-previous-symbolic",
                        connect_clicked => AppMsg::Navigate(-1),
                    },

                    gtk::Label {
                        set_hexpand: true,
                        add_css_class: "orbit-heading",
                        #[watch]
                        set_label: &model.heading(),
                    },

                    gtk::Button {
                        set_icon_name: "go-next-symbolic",
                        connect_clicked => AppMsg::Navigate(1),
                    },

                    gtk::Button {
                        set_label: "Today",
                        connect_clicked => AppMsg::JumpToToday,
                    },
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "orbit-drawing-area",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::TouchDown(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::DragUpdate {
                                    location: Point::new(x + dx, y + dy),
                                    translation: Point::new(dx, dy),
                                });
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::DragEnd {
                                    location: Point::new(x + dx, y + dy),
                                    translation: Point::new(dx, dy),
                                });
                            }
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::DragCancel);
                        },
                    }
                },

                gtk::Label {
                    set_margin_all: 8,
                    #[watch]
                    set_label: &model.footer(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, anchor, rx) = init;

        theme::load_css();

        let mut wheel = DateWheel::new(config.wheel(), config.render, Local::now().date_naive());
        {
            let sender = sender.clone();
            wheel.on_date_resolved(move |date| sender.input(AppMsg::DateResolved(date)));
        }

        let mut model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            painter: Rc::new(RefCell::new(WheelPainter::new())),
            config,
            anchor,
            selected: None,
            drawing_area: gtk::DrawingArea::default(),
        };
        model.reload_days();
        model.wheel.borrow_mut().push_external_selection(anchor);

        let widgets = view_output!();
        model.drawing_area = widgets.drawing_area.clone();

        let wheel_draw = model.wheel.clone();
        let painter_draw = model.painter.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let viewport = Viewport::new(width, height, drawing_area.scale_factor());

                let mut wheel = wheel_draw.borrow_mut();
                let mode = wheel.render_mode();
                let radius = wheel.state().config().radius;
                let frame = wheel.frame(Instant::now());
                if let Err(e) =
                    painter_draw
                        .borrow_mut()
                        .paint(cr, &frame, mode, radius, viewport, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        // keep repainting while a snap animation runs, plus one frame to land on the target
        let wheel_tick = model.wheel.clone();
        let settling = Cell::new(false);
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, _clock| {
                let animating = wheel_tick.borrow().is_animating(Instant::now());
                if animating || settling.get() {
                    drawing_area.queue_draw();
                }
                settling.set(animating);
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = Instant::now();
        match msg {
            AppMsg::TouchDown(point) => {
                let location = self.to_ring(point);
                self.wheel.borrow_mut().touch_down(location, now);
            }
            AppMsg::DragUpdate {
                location,
                translation,
            } => {
                let sample = DragSample::new(self.to_ring(location), translation);
                self.wheel.borrow_mut().drag_changed(sample, now);
                // the capsule follows every sample, markers only redraw on highlight change
                self.drawing_area.queue_draw();
            }
            AppMsg::DragEnd {
                location,
                translation,
            } => {
                let sample = DragSample::new(self.to_ring(location), translation);
                if let Some(resolution) = self.wheel.borrow_mut().drag_ended(sample, now) {
                    log::debug!("Gesture resolved: {:?}", resolution);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::DragCancel => {
                self.wheel.borrow_mut().cancel();
                self.drawing_area.queue_draw();
            }
            AppMsg::JumpToToday => {
                let today = Local::now().date_naive();
                self.ensure_visible(today);
                if self.wheel.borrow_mut().jump_to_today(now).is_none() {
                    log::warn!("Today ({}) is not on the wheel", today);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Select(date) => {
                self.ensure_visible(date);
                if self.wheel.borrow_mut().push_external_selection(date).is_some() {
                    self.selected = Some(date);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Navigate(steps) => match calendar::shift(self.config.kind, self.anchor, steps) {
                Ok(anchor) => {
                    self.anchor = anchor;
                    self.reload_days();
                }
                Err(e) => log::warn!("Cannot navigate: {}", e),
            },
            AppMsg::SwitchKind(kind) => {
                if kind == self.config.kind {
                    return;
                }
                let center = self.wheel.borrow().center_date();
                self.config.kind = kind;
                self.anchor = center.unwrap_or(self.anchor);
                self.wheel.borrow_mut().set_config(self.config.wheel());
                self.painter.borrow_mut().invalidate();
                self.reload_days();
            }
            AppMsg::DateResolved(date) => {
                log::info!("Date selected: {}", date);
                self.selected = Some(date);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.config = new_config;
                    {
                        let mut wheel = self.wheel.borrow_mut();
                        wheel.set_config(self.config.wheel());
                        wheel.set_render_mode(self.config.render);
                    }
                    self.painter.borrow_mut().invalidate();
                    self.reload_days();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

use super::{
    CAPSULE_LINE_WIDTH, CAPSULE_RADIUS, CENTER_CIRCLE_RADIUS, CENTER_DETAIL_FONT_SIZE,
    CENTER_FONT_SIZE, EVENT_DOT_RADIUS, MARKER_FONT_SIZE, MARKER_IDLE_ALPHA, MARKER_RADIUS,
};
use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface};
use chrono::Datelike;
use datewheel::{Capsule, Frame, Marker, MarkerLayer, Point, RenderMode};
use palette::Srgba;
use std::f64::consts::PI;

struct MarkerRenderer<'a> {
    marker: &'a Marker,
    center: Point,
}

impl<'a> MarkerRenderer<'a> {
    fn new(marker: &'a Marker, center: Point) -> Self {
        Self { marker, center }
    }

    fn position(&self) -> Point {
        self.center.offset_by(self.marker.offset)
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_label(cr, colors)?;
        if self.marker.events.has_events() {
            self.draw_event_dot(cr, colors)?;
        }
        Ok(())
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let p = self.position();
        set_color(cr, MarkerState::resolve(self.marker).color(colors));
        cr.arc(p.x, p.y, MARKER_RADIUS, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.text.into_components();
        // dim days that are neither selected nor today
        let alpha = match MarkerState::resolve(self.marker) {
            MarkerState::Idle | MarkerState::Busy => a * MARKER_IDLE_ALPHA,
            _ => a,
        };
        cr.set_source_rgba(r, g, b, alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(MARKER_FONT_SIZE);
        draw_text_centered(cr, &self.marker.date.day().to_string(), self.position())
    }

    fn draw_event_dot(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let p = self.position();
        set_color(cr, colors.event_dot);
        cr.arc(
            p.x,
            p.y + MARKER_RADIUS - EVENT_DOT_RADIUS * 2.0,
            EVENT_DOT_RADIUS,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerState {
    Highlighted,
    Today,
    Busy,
    Idle,
}

impl MarkerState {
    /// Visual state of a day marker by priority:
    /// 1. Highlighted (centered)
    /// 2. Today
    /// 3. Busy (has events)
    /// 4. Idle
    fn resolve(marker: &Marker) -> Self {
        if marker.highlighted {
            Self::Highlighted
        } else if marker.is_today {
            Self::Today
        } else if marker.events.has_events() {
            Self::Busy
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Highlighted => colors.highlighted,
            Self::Today => colors.today,
            Self::Busy => colors.busy,
            Self::Idle => colors.marker,
        }
    }
}

/// Logical drawing-area size plus the device scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub scale: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32, scale: i32) -> Self {
        Self {
            width,
            height,
            scale: scale.max(1),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

struct MarkerCache {
    surface: ImageSurface,
    generation: u64,
    viewport: Viewport,
}

impl MarkerCache {
    fn render(
        layer: &MarkerLayer,
        radius: f64,
        viewport: Viewport,
        colors: &ThemeColors,
    ) -> Result<Self, cairo::Error> {
        let scale = viewport.scale;
        let surface =
            ImageSurface::create(Format::ARgb32, viewport.width * scale, viewport.height * scale)?;
        surface.set_device_scale(scale as f64, scale as f64);
        {
            let cr = Context::new(&surface)?;
            draw_static_layer(&cr, layer, viewport.center(), radius, colors)?;
        }
        surface.flush();

        Ok(Self {
            surface,
            generation: layer.generation,
            viewport,
        })
    }

    fn is_current(&self, layer: &MarkerLayer, viewport: Viewport) -> bool {
        self.generation == layer.generation && self.viewport == viewport
    }
}

/// Paints wheel frames. In layered mode the ring track and day markers live in an offscreen
/// surface that is only re-rendered when the marker layer changes; the capsule and the
/// center label are painted on top every frame.
#[derive(Default)]
pub struct WheelPainter {
    cache: Option<MarkerCache>,
}

impl WheelPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn paint(
        &mut self,
        cr: &Context,
        frame: &Frame<'_>,
        mode: RenderMode,
        radius: f64,
        viewport: Viewport,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        if viewport.is_empty() {
            return Ok(());
        }
        let center = viewport.center();

        match mode {
            RenderMode::Immediate => {
                self.cache = None;
                draw_static_layer(cr, frame.markers, center, radius, colors)?;
            }
            RenderMode::Layered => {
                let cache = match self.cache.take() {
                    Some(cache) if cache.is_current(frame.markers, viewport) => cache,
                    _ => MarkerCache::render(frame.markers, radius, viewport, colors)?,
                };
                cr.set_source_surface(&cache.surface, 0.0, 0.0)?;
                cr.paint()?;
                self.cache = Some(cache);
            }
        }

        draw_center_circle(cr, center, colors)?;
        if let Some(capsule) = &frame.capsule {
            draw_capsule(cr, capsule, center, colors)?;
            draw_center_label(cr, capsule, center, colors)?;
        }
        Ok(())
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_text_centered(cr: &Context, text: &str, at: Point) -> Result<(), cairo::Error> {
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)?;
    }
    Ok(())
}

fn draw_static_layer(
    cr: &Context,
    layer: &MarkerLayer,
    center: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.track);
    cr.set_line_width(1.0);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.stroke()?;

    for marker in &layer.markers {
        MarkerRenderer::new(marker, center).draw(cr, colors)?;
    }
    Ok(())
}

fn draw_center_circle(cr: &Context, center: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.center_circle);
    cr.arc(center.x, center.y, CENTER_CIRCLE_RADIUS, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_capsule(
    cr: &Context,
    capsule: &Capsule,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let p = center.offset_by(capsule.offset);
    set_color(cr, colors.capsule);
    cr.set_line_width(CAPSULE_LINE_WIDTH);
    cr.arc(p.x, p.y, CAPSULE_RADIUS, 0.0, 2.0 * PI);
    cr.stroke()
}

fn draw_center_label(
    cr: &Context,
    capsule: &Capsule,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(CENTER_FONT_SIZE);
    let title = capsule.date.format("%a %-d").to_string();
    draw_text_centered(cr, &title, Point::new(center.x, center.y - 8.0))?;

    let detail = match *capsule.events {
        0 => capsule.date.format("%B %Y").to_string(),
        1 => "1 event".to_string(),
        n => format!("{n} events"),
    };
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(CENTER_DETAIL_FONT_SIZE);
    draw_text_centered(cr, &detail, Point::new(center.x, center.y + 14.0))
}

use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub marker: Srgba<f64>,
    pub highlighted: Srgba<f64>,
    pub today: Srgba<f64>,
    pub busy: Srgba<f64>,
    pub event_dot: Srgba<f64>,
    pub capsule: Srgba<f64>,
    pub center_circle: Srgba<f64>,
    pub track: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            marker: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.6),
                Some(0.6),
            ),
            highlighted: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            today: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.2, 0.5, 0.9, 0.45),
                Some(0.45),
            ),
            busy: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.25, 0.25, 0.25, 0.35),
                Some(0.25),
            ),
            event_dot: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.95, 0.6, 0.1, 1.0),
                Some(1.0),
            ),
            capsule: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 1.0),
                Some(1.0),
            ),
            center_circle: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 0.1),
                Some(0.08),
            ),
            track: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.5, 0.5, 0.5, 0.3),
                Some(0.3),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.9, 0.9, 0.9, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-drawing-area {
    background: none;
    background-color: transparent;
}
.orbit-heading {
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

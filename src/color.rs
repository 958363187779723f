use eframe::egui::Color32;
use palette::named;
use palette::Srgb;
use serde::Serialize;

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Marker colours
// ---------------------------------------------------------------------------

/// Fixed marker colour per category: dark red for radiation, blue for chemical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum MarkerColor {
    DarkRed,
    Blue,
}

impl MarkerColor {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Radiation => MarkerColor::DarkRed,
            Category::Chemical => MarkerColor::Blue,
        }
    }

    /// CSS colour keyword, as understood by browsers and Leaflet.
    pub fn css_name(self) -> &'static str {
        match self {
            MarkerColor::DarkRed => "darkred",
            MarkerColor::Blue => "blue",
        }
    }

    pub fn srgb(self) -> Srgb<u8> {
        match self {
            MarkerColor::DarkRed => named::DARKRED,
            MarkerColor::Blue => named::BLUE,
        }
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        let c = self.srgb();
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    }

    pub fn color32(self) -> Color32 {
        let c = self.srgb();
        Color32::from_rgb(c.red, c.green, c.blue)
    }

    /// Marker fill with the given opacity in `0.0..=1.0`.
    pub fn fill_color32(self, opacity: f32) -> Color32 {
        let c = self.srgb();
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, alpha)
    }
}

impl From<MarkerColor> for &'static str {
    fn from(color: MarkerColor) -> Self {
        color.css_name()
    }
}

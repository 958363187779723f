use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points};
use measurement_map::color::MarkerColor;
use measurement_map::data::model::Category;
use measurement_map::data::projection::Marker;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Measurement map (central panel)
// ---------------------------------------------------------------------------

/// Render the markers on a longitude / latitude plane.
pub fn measurement_map(ui: &mut Ui, state: &AppState) {
    let projection = &state.projection;
    let Some((center_lat, center_lon)) = projection.center else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data to display");
        });
        return;
    };

    ui.label(format!(
        "Centre {center_lat:.6}, {center_lon:.6} · {} markers",
        projection.markers.len()
    ));

    let options = &state.config.map;
    let hover_markers: Vec<Marker> = projection.markers.clone();

    Plot::new("measurement_map")
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| hover_label(&hover_markers, name, value))
        .show(ui, |plot_ui| {
            for category in Category::ALL {
                let points: PlotPoints = projection
                    .markers
                    .iter()
                    .filter(|m| m.category == category)
                    .map(|m| [m.position.1, m.position.0])
                    .collect();

                let color = MarkerColor::for_category(category);
                let series = Points::new(points)
                    .name(category.to_string())
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(options.marker_radius)
                    .color(color.fill_color32(options.fill_opacity));

                plot_ui.points(series);
            }
        });
}

/// Label of the marker under the cursor, or the cursor position.
fn hover_label(markers: &[Marker], name: &str, value: &PlotPoint) -> String {
    if !name.is_empty() {
        let hit = markers
            .iter()
            .find(|m| m.position.1 == value.x && m.position.0 == value.y);
        if let Some(marker) = hit {
            return marker.label.clone();
        }
    }
    format!("{:.6}, {:.6}", value.y, value.x)
}

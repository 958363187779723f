use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use measurement_map::color::MarkerColor;
use measurement_map::data::model::Category;

use crate::state::{AppState, Status};

const FORM_BUTTON_HEIGHT: f32 = 24.0;

// ---------------------------------------------------------------------------
// Right side panel – data entry
// ---------------------------------------------------------------------------

/// Render the data entry panel: two manual forms, imports, clear, records.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("⚙ Data entry");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!("☢ Radiation ({})", Category::Radiation.unit()));
            entry_form(ui, state, Category::Radiation);
            ui.separator();

            ui.strong("🧪 Chemical substance");
            entry_form(ui, state, Category::Chemical);
            ui.separator();

            for category in Category::ALL {
                let text = format!("📂 Import {category} file…");
                if full_width_button(ui, &text).clicked() {
                    open_import_dialog(state, category);
                }
            }
            if full_width_button(ui, "🧹 Clear all data").clicked() {
                state.clear_all();
            }
            ui.separator();

            let total = state.store.snapshot().total();
            egui::CollapsingHeader::new(RichText::new(format!("Records ({total})")).strong())
                .id_salt("records")
                .default_open(false)
                .show(ui, |ui: &mut Ui| records_table(ui, state));
        });
}

fn entry_form(ui: &mut Ui, state: &mut AppState, category: Category) {
    let form = state.form_mut(category);
    let value_label = match category {
        Category::Radiation => "Dose rate",
        Category::Chemical => "Concentration",
    };

    egui::Grid::new(("entry_form", category))
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            if category == Category::Chemical {
                ui.label("Substance");
                ui.text_edit_singleline(&mut form.substance);
                ui.end_row();
            }

            ui.label("Lat");
            ui.add(
                egui::DragValue::new(&mut form.latitude)
                    .speed(0.0001)
                    .range(-90.0..=90.0)
                    .fixed_decimals(6),
            );
            ui.end_row();

            ui.label("Lon");
            ui.add(
                egui::DragValue::new(&mut form.longitude)
                    .speed(0.0001)
                    .range(-180.0..=180.0)
                    .fixed_decimals(6),
            );
            ui.end_row();

            ui.label(value_label);
            ui.add(
                egui::DragValue::new(&mut form.value)
                    .speed(0.01)
                    .range(0.0..=f64::MAX)
                    .fixed_decimals(2)
                    .suffix(format!(" {}", category.unit())),
            );
            ui.end_row();

            ui.label("Time");
            ui.add(
                egui::TextEdit::singleline(&mut form.timestamp).hint_text("YYYY-MM-DD HH:MM"),
            );
            ui.end_row();
        });

    let text = match category {
        Category::Radiation => "➕ Add radiation",
        Category::Chemical => "➕ Add chemical",
    };
    if full_width_button(ui, text).clicked() {
        state.submit_form(category);
    }
}

fn records_table(ui: &mut Ui, state: &AppState) {
    let snapshot = state.store.snapshot();
    if snapshot.is_empty() {
        ui.label("No measurements yet.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(14.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            for title in ["", "Lat", "Lon", "Value", "Time"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in snapshot.records() {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        let color = MarkerColor::for_category(record.category).color32();
                        ui.label(RichText::new("●").color(color))
                            .on_hover_text(&record.substance_name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.5}", record.latitude));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.5}", record.longitude));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", record.value));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&record.timestamp);
                    });
                });
            }
        });
}

fn full_width_button(ui: &mut Ui, text: &str) -> egui::Response {
    ui.add_sized(
        [ui.available_width(), FORM_BUTTON_HEIGHT],
        egui::Button::new(text),
    )
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for category in Category::ALL {
                if ui.button(format!("Import {category}…")).clicked() {
                    open_import_dialog(state, category);
                    ui.close_menu();
                }
            }
            ui.separator();
            let can_export = state.projection.has_data();
            if ui
                .add_enabled(can_export, egui::Button::new("Export map (HTML)…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear all").clicked() {
                state.clear_all();
                ui.close_menu();
            }
        });

        ui.separator();

        let snapshot = state.store.snapshot();
        ui.label(format!(
            "{} radiation, {} chemical",
            snapshot.radiation.len(),
            snapshot.chemical.len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_legend, "Legend").clicked() {
            state.show_legend = !state.show_legend;
        }
        if state.show_legend {
            for category in Category::ALL {
                let color = MarkerColor::for_category(category).color32();
                ui.label(RichText::new("●").color(color));
                ui.label(category.to_string());
            }
        }

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_import_dialog(state: &mut AppState, category: Category) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Import {category} measurements"))
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.import_file(category, &path);
    }
}

pub fn save_export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export map")
        .set_file_name(state.config.export_file_name.clone())
        .add_filter("HTML", &["html"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}

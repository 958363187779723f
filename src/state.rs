use std::path::Path;

use measurement_map::config::AppConfig;
use measurement_map::data::loader;
use measurement_map::data::model::Category;
use measurement_map::data::projection::{project, Projection};
use measurement_map::data::store::{ManualEntry, MeasurementStore};
use measurement_map::export;

// ---------------------------------------------------------------------------
// Entry forms
// ---------------------------------------------------------------------------

/// Field values of one manual entry form. Values persist after a submit so
/// nearby readings can be entered by editing a single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
    pub timestamp: String,
    pub substance: String,
}

impl EntryForm {
    fn to_entry(&self, category: Category) -> ManualEntry {
        ManualEntry {
            latitude: self.latitude,
            longitude: self.longitude,
            value: self.value,
            timestamp: self.timestamp.clone(),
            substance_name: match category {
                Category::Chemical => Some(self.substance.clone()),
                Category::Radiation => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Measurements of this session.
    pub store: MeasurementStore,

    /// Markers and centre derived from `store` (cached).
    pub projection: Projection,

    pub radiation_form: EntryForm,
    pub chemical_form: EntryForm,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,

    /// Whether the colour legend is shown.
    pub show_legend: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let chemical_form = EntryForm {
            substance: config.default_substance.clone(),
            ..EntryForm::default()
        };
        Self {
            store: MeasurementStore::with_aliases(config.column_aliases.clone()),
            projection: Projection::default(),
            radiation_form: EntryForm::default(),
            chemical_form,
            status: None,
            show_legend: false,
            config,
        }
    }

    /// Recompute markers after the store changed.
    pub fn refresh_projection(&mut self) {
        self.projection = project(self.store.snapshot());
    }

    pub fn form(&self, category: Category) -> &EntryForm {
        match category {
            Category::Radiation => &self.radiation_form,
            Category::Chemical => &self.chemical_form,
        }
    }

    pub fn form_mut(&mut self, category: Category) -> &mut EntryForm {
        match category {
            Category::Radiation => &mut self.radiation_form,
            Category::Chemical => &mut self.chemical_form,
        }
    }

    /// Append the values of one entry form to the store.
    pub fn submit_form(&mut self, category: Category) {
        let entry = self.form(category).to_entry(category);
        match self.store.add_manual(category, entry) {
            Ok(_) => {
                let total = self.store.set(category).len();
                self.status = Some(Status::Info(format!(
                    "Added {category} measurement ({total} total)"
                )));
                self.refresh_projection();
            }
            Err(e) => {
                log::warn!("Rejected manual {category} entry: {e}");
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    /// Replace one set with the contents of a CSV / JSON file.
    pub fn import_file(&mut self, category: Category, path: &Path) {
        let table = match loader::load_file(path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
                return;
            }
        };

        match self.store.import_bulk(category, &table) {
            Ok(result) => {
                self.status = Some(Status::Info(result.summary(category)));
                self.refresh_projection();
            }
            Err(e) => {
                log::error!("Failed to import {}: {e}", path.display());
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.store.clear(None);
        self.refresh_projection();
        self.status = Some(Status::Info("All measurements cleared".into()));
    }

    /// Write the current map to a standalone HTML file.
    pub fn export_to(&mut self, path: &Path) {
        match export::write_html(path, &self.projection, &self.config.map) {
            Ok(()) => {
                self.status = Some(Status::Info(format!("Map saved to {}", path.display())));
            }
            Err(e) => {
                log::error!("Failed to export map: {e}");
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn chemical_form_starts_with_default_substance() {
        let s = state();
        assert_eq!(s.chemical_form.substance, "Хлор");
        assert!(s.radiation_form.substance.is_empty());
    }

    #[test]
    fn submitting_a_form_updates_projection() {
        let mut s = state();
        s.radiation_form = EntryForm {
            latitude: 50.45,
            longitude: 30.52,
            value: 0.35,
            timestamp: "2026-01-09 12:00".into(),
            substance: String::new(),
        };
        s.submit_form(Category::Radiation);

        assert_eq!(s.projection.center, Some((50.45, 30.52)));
        assert_eq!(s.projection.markers.len(), 1);
        assert!(matches!(s.status, Some(Status::Info(_))));
    }

    #[test]
    fn rejected_form_reports_error_and_keeps_store() {
        let mut s = state();
        s.chemical_form.timestamp = "t".into();
        s.chemical_form.substance.clear();
        s.submit_form(Category::Chemical);

        assert!(s.store.snapshot().is_empty());
        assert!(matches!(&s.status, Some(Status::Error(msg)) if msg.contains("substance")));
    }

    #[test]
    fn import_with_missing_columns_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radiation.data.csv");
        std::fs::write(&path, "lat,lon\n1,2\n").unwrap();

        let mut s = state();
        s.radiation_form.timestamp = "t".into();
        s.submit_form(Category::Radiation);
        s.import_file(Category::Radiation, &path);

        assert_eq!(s.store.set(Category::Radiation).len(), 1);
        assert!(matches!(&s.status, Some(Status::Error(msg)) if msg.contains("value, timestamp")));
    }

    #[test]
    fn export_without_data_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("situation_map.html");
        let mut s = state();
        s.export_to(&path);
        assert!(matches!(s.status, Some(Status::Error(_))));
        assert!(!path.exists());
    }
}

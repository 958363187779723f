use crate::color::MarkerColor;

use super::model::{Category, MeasurementRecord, Snapshot};

// ---------------------------------------------------------------------------
// Marker / Projection
// ---------------------------------------------------------------------------

/// One renderable map element.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub category: Category,
    /// `(latitude, longitude)`
    pub position: (f64, f64),
    pub color: MarkerColor,
    pub label: String,
}

/// Everything a renderer needs for one frame or one exported document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Mean position of all records; `None` when there is nothing to show.
    pub center: Option<(f64, f64)>,
    pub markers: Vec<Marker>,
}

impl Projection {
    pub fn has_data(&self) -> bool {
        self.center.is_some()
    }
}

/// Turn the store contents into markers plus a view centre.
///
/// Radiation markers come first, then chemical, each in insertion order.
pub fn project(snapshot: Snapshot<'_>) -> Projection {
    let markers: Vec<Marker> = snapshot.records().map(marker_for).collect();

    let n = markers.len();
    let center = (n > 0).then(|| {
        let (lat_sum, lon_sum) = markers
            .iter()
            .fold((0.0, 0.0), |(la, lo), m| (la + m.position.0, lo + m.position.1));
        (lat_sum / n as f64, lon_sum / n as f64)
    });

    Projection { center, markers }
}

fn marker_for(record: &MeasurementRecord) -> Marker {
    Marker {
        category: record.category,
        position: (record.latitude, record.longitude),
        color: MarkerColor::for_category(record.category),
        label: label_text(record),
    }
}

/// `"{name} – {value} {unit}\n{timestamp}"` with the value at two decimals.
pub fn label_text(record: &MeasurementRecord) -> String {
    format!(
        "{} – {:.2} {}\n{}",
        record.substance_name,
        record.value,
        record.category.unit(),
        record.timestamp
    )
}

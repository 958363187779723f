//! End-to-end session: files on disk → store → projection → exported page.

use measurement_map::config::{AppConfig, MapOptions};
use measurement_map::data::loader::{load_file, read_csv};
use measurement_map::data::model::Category;
use measurement_map::data::projection::project;
use measurement_map::data::store::{ManualEntry, MeasurementStore};
use measurement_map::error::{ExportError, StoreError};
use measurement_map::export::{render_html, write_html};

const RADIATION_CSV: &str = "\
lat,lon,dose,time
50.4501,30.5234,0.35,2026-01-09 12:00
50.4550,30.5300,0.42,2026-01-09 12:10
not-a-number,30.5300,0.42,2026-01-09 12:20
";

const CHEMICAL_CSV: &str = "\
latitude,longitude,value,timestamp,substanceName
50.4600,30.5100,1.25,2026-01-09 13:00,Хлор
50.4610,30.5110,abc,2026-01-09 13:05,Хлор
";

// ---------------------------------------------------------------------------
// Legacy headers import and render
// ---------------------------------------------------------------------------
#[test]
fn legacy_files_import_and_render() {
    let dir = tempfile::tempdir().unwrap();
    let rad_path = dir.path().join("radiation.data.csv");
    let chem_path = dir.path().join("chemical.data.csv");
    std::fs::write(&rad_path, RADIATION_CSV).unwrap();
    std::fs::write(&chem_path, CHEMICAL_CSV).unwrap();

    let mut store = MeasurementStore::default();
    let rad = store
        .import_bulk(Category::Radiation, &load_file(&rad_path).unwrap())
        .unwrap();
    let chem = store
        .import_bulk(Category::Chemical, &load_file(&chem_path).unwrap())
        .unwrap();

    assert_eq!((rad.accepted, rad.rejected), (2, 1));
    assert_eq!((chem.accepted, chem.rejected), (1, 1));
    assert_eq!(store.set(Category::Radiation).len(), rad.accepted);
    assert_eq!(store.set(Category::Chemical).len(), chem.accepted);

    let projection = project(store.snapshot());
    assert_eq!(projection.markers.len(), 3);
    assert!(projection.center.is_some());
    assert!(projection
        .markers
        .iter()
        .all(|m| m.position.0.is_finite() && m.position.1.is_finite()));

    let out = dir.path().join("situation_map.html");
    write_html(&out, &projection, &MapOptions::default()).unwrap();
    let html = std::fs::read_to_string(&out).unwrap();
    for m in &projection.markers {
        assert!(html.contains(&m.label));
    }
}

// ---------------------------------------------------------------------------
// Re-import replaces instead of appending
// ---------------------------------------------------------------------------
#[test]
fn second_import_replaces_first() {
    let mut store = MeasurementStore::default();
    let table = read_csv(RADIATION_CSV.as_bytes()).unwrap();
    store.import_bulk(Category::Radiation, &table).unwrap();
    store.import_bulk(Category::Radiation, &table).unwrap();
    assert_eq!(store.set(Category::Radiation).len(), 2);
}

// ---------------------------------------------------------------------------
// Wrong file for the category
// ---------------------------------------------------------------------------
#[test]
fn radiation_file_as_chemical_is_schema_error() {
    let mut store = MeasurementStore::default();
    store
        .add_manual(
            Category::Chemical,
            ManualEntry {
                latitude: 1.0,
                longitude: 2.0,
                value: 3.0,
                timestamp: "t".into(),
                substance_name: Some("Аміак".into()),
            },
        )
        .unwrap();

    let table = read_csv(RADIATION_CSV.as_bytes()).unwrap();
    let err = store.import_bulk(Category::Chemical, &table).unwrap_err();
    match err {
        StoreError::Schema { category, missing } => {
            assert_eq!(category, Category::Chemical);
            assert_eq!(missing, vec!["substanceName".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
    assert_eq!(store.set(Category::Chemical).len(), 1);
}

// ---------------------------------------------------------------------------
// Configured aliases
// ---------------------------------------------------------------------------
#[test]
fn configured_aliases_drive_import() {
    let config: AppConfig = serde_json::from_str(
        r#"{ "column_aliases": { "y": "latitude", "x": "longitude", "mSv": "value", "when": "timestamp" } }"#,
    )
    .unwrap();
    let mut store = MeasurementStore::with_aliases(config.column_aliases);
    let table = read_csv("y,x,mSv,when\n10,20,0.5,t\n".as_bytes()).unwrap();
    let result = store.import_bulk(Category::Radiation, &table).unwrap();
    assert_eq!(result.accepted, 1);

    let p = project(store.snapshot());
    assert_eq!(p.center, Some((10.0, 20.0)));
}

// ---------------------------------------------------------------------------
// Clearing empties the map
// ---------------------------------------------------------------------------
#[test]
fn clear_leaves_nothing_to_export() {
    let mut store = MeasurementStore::default();
    let table = read_csv(RADIATION_CSV.as_bytes()).unwrap();
    store.import_bulk(Category::Radiation, &table).unwrap();
    store.clear(None);

    let projection = project(store.snapshot());
    assert_eq!(projection.center, None);
    assert!(matches!(
        render_html(&projection, &MapOptions::default()),
        Err(ExportError::NoData)
    ));
}

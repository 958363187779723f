use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::store::{RawRow, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read an import file into an untyped table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, comma separated
/// * `.json` – `[{ "latitude": 50.4, "longitude": 30.5, ... }, ...]`
///
/// No field is interpreted here; column checks and number parsing happen
/// when the table is imported into the store.
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let table = match ext.as_str() {
        "csv" => read_csv(file),
        "json" => read_json(file),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("reading {}", path.display()))?;

    log::debug!(
        "Read {} rows with columns {:?} from {}",
        table.len(),
        table.columns,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Rows may be shorter or longer than the header; missing cells read as
/// empty and extra cells are dropped.
pub fn read_csv<R: Read>(source: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut table = RawTable::new(columns);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        let row: RawRow = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        table.rows.push(row);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape `df.to_json(orient='records')` writes.
/// Columns are the union of keys across all records.
pub fn read_json<R: Read>(source: R) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_reader(source).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut table = RawTable::default();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            if !table.columns.contains(key) {
                table.columns.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        table.rows.push(row);
    }

    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_keep_header_names() {
        let data = "\u{feff}lat,lon,dose,time\n50.45, 30.52 ,0.35,2026-01-09 12:00\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["lat", "lon", "dose", "time"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0]["lon"], "30.52");
        assert_eq!(table.rows[0]["time"], "2026-01-09 12:00");
    }

    #[test]
    fn ragged_csv_rows_fill_with_empty_cells() {
        let data = "latitude,longitude,value,timestamp\n1,2\n3,4,5,t,extra\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["value"], "");
        assert_eq!(table.rows[1]["timestamp"], "t");
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn header_only_csv_is_empty_table() {
        let table = read_csv("latitude,longitude,value,timestamp\n".as_bytes()).unwrap();
        assert_eq!(table.columns.len(), 4);
        assert!(table.is_empty());
    }

    #[test]
    fn json_records_become_text_cells() {
        let data = r#"[
            {"latitude": 50.45, "longitude": 30.52, "value": 1, "timestamp": "t1", "substanceName": "Хлор"},
            {"latitude": "50.5", "longitude": null, "value": 2.5, "timestamp": "t2"}
        ]"#;
        let table = read_json(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.columns.contains(&"substanceName".to_string()));
        assert_eq!(table.rows[0]["latitude"], "50.45");
        assert_eq!(table.rows[0]["value"], "1");
        assert_eq!(table.rows[1]["latitude"], "50.5");
        assert_eq!(table.rows[1]["longitude"], "");
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(read_json(r#"{"latitude": 1}"#.as_bytes()).is_err());
        assert!(read_json("[1, 2]".as_bytes()).is_err());
    }

    #[test]
    fn load_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.xlsx");
        std::fs::write(&path, b"whatever").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension: .xlsx"));
    }

    #[test]
    fn load_file_reads_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radiation.data.csv");
        std::fs::write(&path, "latitude,longitude,value,timestamp\n1,2,3,t\n").unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 1);
    }
}

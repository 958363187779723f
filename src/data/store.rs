use std::collections::BTreeMap;

use crate::config::ColumnAliases;
use crate::error::{RowError, StoreError, ValidationError};

use super::model::{
    Category, MeasurementRecord, MeasurementSet, RecordId, Snapshot, RADIATION_LABEL,
};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Field values typed into one of the manual entry forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
    pub timestamp: String,
    /// Ignored for radiation.
    pub substance_name: Option<String>,
}

/// One untyped row of an import file: header cell → cell text.
pub type RawRow = BTreeMap<String, String>;

/// An import file as read from disk, before any field is interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header cells in file order, as written in the file.
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Import outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    /// 1-based data row (the header is not counted).
    pub row: usize,
    pub error: RowError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    pub accepted: usize,
    pub rejected: usize,
    pub rejections: Vec<RowRejection>,
}

impl ImportResult {
    /// One-line summary for the status bar.
    pub fn summary(&self, category: Category) -> String {
        if self.rejected == 0 {
            format!("Imported {} {category} measurements", self.accepted)
        } else {
            format!(
                "Imported {} {category} measurements, skipped {} invalid rows",
                self.accepted, self.rejected
            )
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementStore
// ---------------------------------------------------------------------------

/// Owns the radiation and chemical sets for one session.
///
/// Manual entry appends; file import replaces the target set with the rows
/// that validated. A rejected operation never touches either set.
#[derive(Debug, Clone)]
pub struct MeasurementStore {
    radiation: MeasurementSet,
    chemical: MeasurementSet,
    aliases: ColumnAliases,
}

impl Default for MeasurementStore {
    fn default() -> Self {
        Self::with_aliases(ColumnAliases::default())
    }
}

impl MeasurementStore {
    pub fn with_aliases(aliases: ColumnAliases) -> Self {
        Self {
            radiation: MeasurementSet::new(Category::Radiation),
            chemical: MeasurementSet::new(Category::Chemical),
            aliases,
        }
    }

    pub fn set(&self, category: Category) -> &MeasurementSet {
        match category {
            Category::Radiation => &self.radiation,
            Category::Chemical => &self.chemical,
        }
    }

    fn set_mut(&mut self, category: Category) -> &mut MeasurementSet {
        match category {
            Category::Radiation => &mut self.radiation,
            Category::Chemical => &mut self.chemical,
        }
    }

    /// Validate a manually entered measurement and append it.
    ///
    /// The value is checked as typed, then rounded to two decimals.
    pub fn add_manual(
        &mut self,
        category: Category,
        entry: ManualEntry,
    ) -> Result<RecordId, StoreError> {
        check_value(entry.value)?;
        let record = build_record(
            category,
            entry.latitude,
            entry.longitude,
            round2(entry.value),
            &entry.timestamp,
            entry.substance_name.as_deref(),
        )?;
        let id = self.set_mut(category).push(record);
        log::debug!("Added {category} measurement #{}", id.index);
        Ok(id)
    }

    /// Replace a set with the valid rows of an import file.
    ///
    /// Fails without touching the store when a required column is absent.
    /// Rows with unparseable or out-of-range fields are skipped and reported.
    pub fn import_bulk(
        &mut self,
        category: Category,
        table: &RawTable,
    ) -> Result<ImportResult, StoreError> {
        let columns = self.resolve_columns(category, &table.columns)?;

        let mut records = Vec::with_capacity(table.len());
        let mut result = ImportResult::default();
        for (i, row) in table.rows.iter().enumerate() {
            match parse_row(category, row, &columns) {
                Ok(record) => records.push(record),
                Err(error) => {
                    log::warn!("Skipping {category} row {}: {error}", i + 1);
                    result.rejections.push(RowRejection { row: i + 1, error });
                }
            }
        }
        result.accepted = records.len();
        result.rejected = result.rejections.len();

        self.set_mut(category).replace(records);
        log::info!(
            "Imported {category} data: {} accepted, {} rejected",
            result.accepted,
            result.rejected
        );
        Ok(result)
    }

    /// Empty one set, or both when `category` is `None`.
    pub fn clear(&mut self, category: Option<Category>) {
        match category {
            Some(c) => self.set_mut(c).clear(),
            None => {
                self.radiation.clear();
                self.chemical.clear();
            }
        }
        log::info!(
            "Cleared {}",
            category.map_or_else(|| "all measurements".to_string(), |c| format!("{c} measurements"))
        );
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            radiation: &self.radiation,
            chemical: &self.chemical,
        }
    }

    /// Map each required canonical column onto the header that supplies it.
    /// An exact canonical header beats an alias of it.
    fn resolve_columns<'t>(
        &self,
        category: Category,
        headers: &'t [String],
    ) -> Result<BTreeMap<&'static str, &'t str>, StoreError> {
        let mut columns = BTreeMap::new();
        let mut missing = Vec::new();

        for &name in category.required_columns() {
            let exact = headers
                .iter()
                .find(|h| !self.aliases.is_alias(h) && self.aliases.resolve(h) == name);
            let aliased = || headers.iter().find(|h| self.aliases.resolve(h) == name);
            match exact.or_else(aliased) {
                Some(header) => {
                    columns.insert(name, header.as_str());
                }
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(columns)
        } else {
            log::warn!("Rejected {category} import, missing columns {missing:?}");
            Err(StoreError::Schema { category, missing })
        }
    }
}

// ---------------------------------------------------------------------------
// Row parsing and validation
// ---------------------------------------------------------------------------

fn parse_row(
    category: Category,
    row: &RawRow,
    columns: &BTreeMap<&'static str, &str>,
) -> Result<MeasurementRecord, RowError> {
    let cell = |name: &str| {
        columns
            .get(name)
            .and_then(|header| row.get(*header))
            .map(|s| s.trim())
            .unwrap_or("")
    };

    let latitude = parse_number("latitude", cell("latitude"))?;
    let longitude = parse_number("longitude", cell("longitude"))?;
    let value = parse_number("value", cell("value"))?;
    let substance = match category {
        Category::Chemical => Some(cell("substanceName")),
        Category::Radiation => None,
    };

    Ok(build_record(
        category,
        latitude,
        longitude,
        value,
        cell("timestamp"),
        substance,
    )?)
}

fn parse_number(column: &'static str, raw: &str) -> Result<f64, RowError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::NotNumeric {
            column,
            raw: raw.to_string(),
        }),
    }
}

/// Apply the field rules shared by manual entry and import.
fn build_record(
    category: Category,
    latitude: f64,
    longitude: f64,
    value: f64,
    timestamp: &str,
    substance: Option<&str>,
) -> Result<MeasurementRecord, ValidationError> {
    check_value(value)?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return Err(ValidationError::EmptyTimestamp);
    }
    let substance_name = match category {
        Category::Radiation => RADIATION_LABEL.to_string(),
        Category::Chemical => match substance.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ValidationError::MissingSubstance),
        },
    };

    Ok(MeasurementRecord {
        category,
        latitude,
        longitude,
        // -0.0 prints as "-0.00"
        value: if value == 0.0 { 0.0 } else { value },
        timestamp: timestamp.to_string(),
        substance_name,
    })
}

fn check_value(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue(value))
    }
}

/// Values too large to scale by 100 are already far beyond two decimals.
fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        v
    }
}

use std::fmt;

/// Substance name carried by every radiation record.
pub const RADIATION_LABEL: &str = "Radiation";

// ---------------------------------------------------------------------------
// Category – which set a record belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Radiation,
    Chemical,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Radiation, Category::Chemical];

    /// Unit of the measured value (dose rate or concentration).
    pub fn unit(self) -> &'static str {
        match self {
            Category::Radiation => "мЗв/год",
            Category::Chemical => "мг/м³",
        }
    }

    /// Columns an import file must provide, in canonical names.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Category::Radiation => &["latitude", "longitude", "value", "timestamp"],
            Category::Chemical => &["latitude", "longitude", "value", "timestamp", "substanceName"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Radiation => write!(f, "radiation"),
            Category::Chemical => write!(f, "chemical"),
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one observation
// ---------------------------------------------------------------------------

/// A single validated observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    /// Dose rate for radiation, concentration for chemical.
    pub value: f64,
    /// Free text, usually `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
    pub substance_name: String,
}

/// Position of a record inside its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId {
    pub category: Category,
    pub index: usize,
}

// ---------------------------------------------------------------------------
// MeasurementSet – ordered records of one category
// ---------------------------------------------------------------------------

/// Insertion-ordered records that all share one category.
///
/// Fields are private so the only ways in are the store's append and
/// replace paths, which check the category.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSet {
    category: Category,
    records: Vec<MeasurementRecord>,
}

impl MeasurementSet {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: MeasurementRecord) -> RecordId {
        debug_assert_eq!(record.category, self.category);
        self.records.push(record);
        RecordId {
            category: self.category,
            index: self.records.len() - 1,
        }
    }

    pub(crate) fn replace(&mut self, records: Vec<MeasurementRecord>) {
        debug_assert!(records.iter().all(|r| r.category == self.category));
        self.records = records;
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a MeasurementSet {
    type Item = &'a MeasurementRecord;
    type IntoIter = std::slice::Iter<'a, MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Snapshot – read-only view handed to the projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub radiation: &'a MeasurementSet,
    pub chemical: &'a MeasurementSet,
}

impl<'a> Snapshot<'a> {
    /// All records, radiation first, each set in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &'a MeasurementRecord> {
        self.radiation.iter().chain(self.chemical.iter())
    }

    pub fn total(&self) -> usize {
        self.radiation.len() + self.chemical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category, value: f64) -> MeasurementRecord {
        MeasurementRecord {
            category,
            latitude: 50.0,
            longitude: 30.0,
            value,
            timestamp: "2026-01-09 12:00".into(),
            substance_name: RADIATION_LABEL.into(),
        }
    }

    #[test]
    fn push_returns_position_in_set() {
        let mut set = MeasurementSet::new(Category::Radiation);
        let first = set.push(record(Category::Radiation, 0.1));
        let second = set.push(record(Category::Radiation, 0.2));
        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(second.category, Category::Radiation);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn snapshot_orders_radiation_before_chemical() {
        let mut rad = MeasurementSet::new(Category::Radiation);
        let mut chem = MeasurementSet::new(Category::Chemical);
        chem.push(record(Category::Chemical, 3.0));
        rad.push(record(Category::Radiation, 1.0));
        rad.push(record(Category::Radiation, 2.0));

        let snap = Snapshot {
            radiation: &rad,
            chemical: &chem,
        };
        let values: Vec<f64> = snap.records().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(snap.total(), 3);
    }

    #[test]
    fn chemical_requires_substance_column() {
        assert!(Category::Chemical
            .required_columns()
            .contains(&"substanceName"));
        assert!(!Category::Radiation
            .required_columns()
            .contains(&"substanceName"));
    }
}

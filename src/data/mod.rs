/// Data layer: records, the session store, file reading, and projection.
///
/// Architecture:
/// ```text
///  form fields        .csv / .json
///       │                  │
///       │                  ▼
///       │            ┌──────────┐
///       │            │  loader   │  file → RawTable (untyped cells)
///       │            └──────────┘
///       ▼                  ▼
///   ┌─────────────────────────────┐
///   │ MeasurementStore             │  validate, append / replace, clear
///   └─────────────────────────────┘
///                  │ snapshot
///                  ▼
///   ┌─────────────────────────────┐
///   │ projection                   │  records → markers + centre
///   └─────────────────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod projection;
pub mod store;

//! Radiation and chemical measurement map.
//!
//! Measurements come in through manual entry or file import, live in a
//! [`MeasurementStore`](data::store::MeasurementStore), and are projected
//! into coloured map markers that the desktop UI draws and [`export`]
//! writes out as a standalone HTML page.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
